use super::http;
use crate::error::Error;
use crate::versions::{VersionSet, major_component};
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;

const LOG_TARGET: &str = "     usage";
const SERVICE: &str = "usage-stats";

/// Installation counts for one day.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct UsageDay {
    /// Installations across all versions
    pub count: u64,

    /// Installations per reported version string
    #[serde(default)]
    pub versions: BTreeMap<String, u64>,
}

impl UsageDay {
    /// Installations of one version, zero if it was not reported.
    #[must_use]
    pub fn version_count(&self, version: &str) -> u64 {
        self.versions.get(version).copied().unwrap_or(0)
    }

    /// Sum of the installations of `versions`; unreported versions contribute zero.
    pub fn sum_versions<'a>(&self, versions: impl IntoIterator<Item = &'a str>) -> u64 {
        versions.into_iter().map(|v| self.version_count(v)).sum()
    }

    /// Installations of the beta line.
    ///
    /// The usage service reports beta builds under the `<major>.0` key of their line, so the
    /// first beta version's line stands for the whole channel.
    #[must_use]
    pub fn beta_count(&self, betas: &VersionSet) -> u64 {
        betas
            .first()
            .and_then(|first| first.split('b').next())
            .map_or(0, |line| self.version_count(line))
    }

    /// Installations of stable versions whose major is at most `cutoff`.
    #[must_use]
    pub fn legacy_esr_count(&self, cutoff: u32) -> u64 {
        self.versions
            .iter()
            .filter(|(version, _)| is_stable(version))
            .filter(|(version, _)| major_component(version).is_some_and(|major| major <= cutoff))
            .map(|(_, count)| count)
            .sum()
    }

    /// Stable versions reported for `major`, in version order.
    #[must_use]
    pub fn stable_versions_of(&self, major: u32) -> Vec<String> {
        let mut versions: Vec<String> = self
            .versions
            .keys()
            .filter(|version| is_stable(version) && major_component(version) == Some(major))
            .cloned()
            .collect();

        versions.sort_by_key(|v| numeric_key(v));
        versions
    }
}

/// The usage statistics document, keyed by `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct UsageDocument {
    days: BTreeMap<String, UsageDay>,
}

impl UsageDocument {
    /// Parse the document from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] if the text is not a usage document.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        serde_json::from_str(text).map_err(|e| Error::UnexpectedResponse {
            service: SERVICE,
            reason: e.to_string(),
        })
    }

    /// Counts for `date`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] if the document has no entry for `date`.
    pub fn day(&self, date: NaiveDate) -> Result<&UsageDay, Error> {
        let key = date.format("%Y-%m-%d").to_string();
        self.days.get(&key).ok_or_else(|| Error::UnexpectedResponse {
            service: SERVICE,
            reason: format!("no usage data for {key}"),
        })
    }

    /// Counts for the most recent date in the document.
    #[must_use]
    pub fn latest_day(&self) -> Option<&UsageDay> {
        self.days.values().next_back()
    }
}

/// The ESR versions in use, discovered from the usage document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EsrVersions {
    /// Every stable version of the ESR major
    pub all: Vec<String>,

    /// The versions of the newest `major.minor` line
    pub current: Vec<String>,
}

impl EsrVersions {
    /// Discover the stable versions of `major` reported on `day`.
    #[must_use]
    pub fn discover(day: &UsageDay, major: u32) -> Self {
        let all = day.stable_versions_of(major);

        let newest_line = all.iter().filter_map(|v| minor_line(v)).max();
        let current = newest_line.map_or_else(Vec::new, |line| {
            all.iter().filter(|v| minor_line(v) == Some(line)).cloned().collect()
        });

        Self { all, current }
    }

    /// The current versions as crash-stats names them.
    #[must_use]
    pub fn crash_stats_versions(&self) -> VersionSet {
        self.current.iter().map(|v| format!("{v}esr")).collect()
    }
}

/// Fetch the usage statistics document.
pub async fn fetch_document(client: &Client, url: &str) -> Result<UsageDocument, Error> {
    log::info!(target: LOG_TARGET, "Fetching usage statistics from {url}");

    let text = http::get_text(SERVICE, client.get(url)).await?;
    UsageDocument::from_json(&text)
}

/// Alpha and beta builds carry an `a` or `b` in their version string.
fn is_stable(version: &str) -> bool {
    version.contains('.') && !version.contains(['a', 'b'])
}

fn numeric_key(version: &str) -> Vec<u32> {
    version.split('.').map(|part| part.parse().unwrap_or(0)).collect()
}

fn minor_line(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    Some((major, minor))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "2025-01-13": {"count": 90, "versions": {"128.5.0": 10}},
        "2025-01-14": {
            "count": 1000,
            "versions": {
                "136.0a1": 20,
                "135.0": 30,
                "135.0b2": 5,
                "134.0": 200,
                "134.0.1": 100,
                "128.5.0": 40,
                "128.5.2": 60,
                "128.10.0": 15,
                "128.10.1": 5,
                "115.18.0": 25,
                "102.15.1": 5,
                "weird": 1
            }
        }
    }"#;

    fn document() -> UsageDocument {
        UsageDocument::from_json(DOCUMENT).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    #[test]
    fn test_day_lookup() {
        let doc = document();
        assert_eq!(doc.day(date(14)).unwrap().count, 1000);

        let err = doc.day(date(15)).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse { ref reason, .. } if reason.contains("2025-01-15")));
    }

    #[test]
    fn test_sum_versions_treats_absent_as_zero() {
        let doc = document();
        let day = doc.day(date(14)).unwrap();
        assert_eq!(day.sum_versions(["134.0", "134.0.1", "134.0.2", "134.0.3"]), 300);
        assert_eq!(day.sum_versions(["133.0"]), 0);
    }

    #[test]
    fn test_beta_count_uses_line_key() {
        let doc = document();
        let day = doc.day(date(14)).unwrap();
        let betas: VersionSet = ["135.0b1", "135.0b2"].into_iter().collect();
        assert_eq!(day.beta_count(&betas), 30);
        assert_eq!(day.beta_count(&VersionSet::new()), 0);
    }

    #[test]
    fn test_legacy_esr_count() {
        let doc = document();
        let day = doc.day(date(14)).unwrap();
        assert_eq!(day.legacy_esr_count(115), 30);
        assert_eq!(day.legacy_esr_count(102), 5);
    }

    #[test]
    fn test_esr_discovery() {
        let doc = document();
        let esr = EsrVersions::discover(doc.latest_day().unwrap(), 128);

        assert_eq!(esr.all, ["128.5.0", "128.5.2", "128.10.0", "128.10.1"]);
        assert_eq!(esr.current, ["128.10.0", "128.10.1"]);
        assert_eq!(esr.crash_stats_versions().to_string(), "128.10.0esr, 128.10.1esr");
    }

    #[test]
    fn test_esr_discovery_without_versions() {
        let esr = EsrVersions::discover(&UsageDay::default(), 140);
        assert!(esr.all.is_empty());
        assert!(esr.current.is_empty());
        assert!(esr.crash_stats_versions().is_empty());
    }

    #[test]
    fn test_latest_day() {
        assert_eq!(document().latest_day().map(|d| d.count), Some(1000));
        assert!(UsageDocument::default().latest_day().is_none());
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(UsageDocument::from_json("[]"), Err(Error::UnexpectedResponse { .. })));
    }
}
