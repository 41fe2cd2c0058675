use crate::error::Error;
use serde::Deserialize;

const ESR_FIELD: &str = "THUNDERBIRD_ESR";
const ESR_NEXT_FIELD: &str = "THUNDERBIRD_ESR_NEXT";
const NIGHTLY_FIELD: &str = "LATEST_THUNDERBIRD_NIGHTLY_VERSION";
const DEVEL_FIELD: &str = "LATEST_THUNDERBIRD_DEVEL_VERSION";
const RELEASE_FIELD: &str = "LATEST_THUNDERBIRD_VERSION";

/// The upstream document as served, before validation.
#[derive(Debug, Deserialize)]
struct RawVersionMetadata {
    #[serde(rename = "THUNDERBIRD_ESR", default)]
    esr: Option<String>,

    #[serde(rename = "THUNDERBIRD_ESR_NEXT", default)]
    esr_next: Option<String>,

    #[serde(rename = "LATEST_THUNDERBIRD_NIGHTLY_VERSION", default)]
    nightly: Option<String>,

    #[serde(rename = "LATEST_THUNDERBIRD_DEVEL_VERSION", default)]
    devel: Option<String>,

    #[serde(rename = "LATEST_THUNDERBIRD_VERSION", default)]
    release: Option<String>,
}

/// A dotted version string together with its leading numeric component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductVersion {
    text: String,
    major: u32,
}

impl ProductVersion {
    /// Parse a version string, naming `field` in the error if the major component is not numeric.
    pub fn parse(field: &str, text: impl Into<String>) -> Result<Self, Error> {
        let text = text.into();
        let major = major_component(&text)
            .ok_or_else(|| Error::configuration(format!("version metadata field '{field}' has no numeric major version: '{text}'")))?;

        Ok(Self { text, major })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn major(&self) -> u32 {
        self.major
    }
}

/// Extract the leading numeric component of a version string.
///
/// Everything from the first `.` on is ignored, so `"136.0a1"` yields `136`.
#[must_use]
pub fn major_component(version: &str) -> Option<u32> {
    version.split('.').next()?.trim().parse().ok()
}

/// Immutable snapshot of the upstream Thunderbird version metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionMetadata {
    esr: ProductVersion,
    esr_next: Option<ProductVersion>,
    nightly: ProductVersion,
    devel: ProductVersion,
    release: ProductVersion,
}

impl VersionMetadata {
    /// Build metadata from already-known version strings.
    pub fn new(esr: &str, nightly: &str, devel: &str, release: &str) -> Result<Self, Error> {
        Ok(Self {
            esr: ProductVersion::parse(ESR_FIELD, esr)?,
            esr_next: None,
            nightly: ProductVersion::parse(NIGHTLY_FIELD, nightly)?,
            devel: ProductVersion::parse(DEVEL_FIELD, devel)?,
            release: ProductVersion::parse(RELEASE_FIELD, release)?,
        })
    }

    /// Attach the upcoming ESR version.
    pub fn with_esr_next(mut self, esr_next: &str) -> Result<Self, Error> {
        self.esr_next = Some(ProductVersion::parse(ESR_NEXT_FIELD, esr_next)?);
        Ok(self)
    }

    /// Parse the upstream JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if a required field is absent or empty, or if any
    /// version lacks a numeric major component.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let raw: RawVersionMetadata =
            serde_json::from_str(text).map_err(|e| Error::configuration(format!("malformed version metadata: {e}")))?;

        let metadata = Self::new(
            &required(ESR_FIELD, raw.esr)?,
            &required(NIGHTLY_FIELD, raw.nightly)?,
            &required(DEVEL_FIELD, raw.devel)?,
            &required(RELEASE_FIELD, raw.release)?,
        )?;

        // upstream publishes an empty string when no next ESR is scheduled
        match raw.esr_next.filter(|s| !s.trim().is_empty()) {
            Some(next) => metadata.with_esr_next(&next),
            None => Ok(metadata),
        }
    }

    #[must_use]
    pub const fn esr(&self) -> &ProductVersion {
        &self.esr
    }

    #[must_use]
    pub const fn esr_next(&self) -> Option<&ProductVersion> {
        self.esr_next.as_ref()
    }

    #[must_use]
    pub const fn nightly(&self) -> &ProductVersion {
        &self.nightly
    }

    #[must_use]
    pub const fn devel(&self) -> &ProductVersion {
        &self.devel
    }

    #[must_use]
    pub const fn release(&self) -> &ProductVersion {
        &self.release
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, Error> {
    value
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| Error::configuration(format!("version metadata field '{field}' is missing")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "LATEST_THUNDERBIRD_DEVEL_VERSION": "135.0b3",
        "LATEST_THUNDERBIRD_NIGHTLY_VERSION": "136.0a1",
        "LATEST_THUNDERBIRD_VERSION": "134.0.1",
        "THUNDERBIRD_ESR": "128.6.0esr",
        "THUNDERBIRD_ESR_NEXT": ""
    }"#;

    #[test]
    fn test_major_component() {
        assert_eq!(major_component("136.0a1"), Some(136));
        assert_eq!(major_component("128.6.0esr"), Some(128));
        assert_eq!(major_component("134"), Some(134));
        assert_eq!(major_component("x.1"), None);
        assert_eq!(major_component(""), None);
    }

    #[test]
    fn test_from_json() {
        let metadata = VersionMetadata::from_json(DOCUMENT).unwrap();
        assert_eq!(metadata.esr().major(), 128);
        assert_eq!(metadata.nightly().as_str(), "136.0a1");
        assert_eq!(metadata.nightly().major(), 136);
        assert_eq!(metadata.devel().major(), 135);
        assert_eq!(metadata.release().major(), 134);
        assert!(metadata.esr_next().is_none());
    }

    #[test]
    fn test_from_json_with_esr_next() {
        let text = DOCUMENT.replace(r#""THUNDERBIRD_ESR_NEXT": """#, r#""THUNDERBIRD_ESR_NEXT": "140.0esr""#);
        let metadata = VersionMetadata::from_json(&text).unwrap();
        assert_eq!(metadata.esr_next().map(ProductVersion::major), Some(140));
    }

    #[test]
    fn test_from_json_missing_field() {
        let text = r#"{
            "LATEST_THUNDERBIRD_DEVEL_VERSION": "135.0b3",
            "LATEST_THUNDERBIRD_VERSION": "134.0.1",
            "THUNDERBIRD_ESR": "128.6.0esr"
        }"#;

        let err = VersionMetadata::from_json(text).unwrap_err();
        assert!(matches!(err, Error::Configuration(ref msg) if msg.contains(NIGHTLY_FIELD)), "{err}");
    }

    #[test]
    fn test_from_json_empty_field() {
        let text = DOCUMENT.replace("\"134.0.1\"", "\"\"");
        let err = VersionMetadata::from_json(&text).unwrap_err();
        assert!(matches!(err, Error::Configuration(ref msg) if msg.contains(RELEASE_FIELD)), "{err}");
    }

    #[test]
    fn test_from_json_non_numeric_major() {
        let text = DOCUMENT.replace("136.0a1", "nightly");
        let err = VersionMetadata::from_json(&text).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = VersionMetadata::from_json("not json").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
