use crate::Result;
use crate::queries::{Endpoints, Exclusions};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "tb-metrics.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// URL of the Thunderbird version metadata document
    #[serde(default = "default_product_details_url")]
    pub product_details_url: String,

    /// Base URL of the bugzilla instance
    #[serde(default = "default_bugzilla_url")]
    pub bugzilla_url: String,

    /// URL of the usage statistics document
    #[serde(default = "default_usage_stats_url")]
    pub usage_stats_url: String,

    /// Base URL of the crash-stats service
    #[serde(default = "default_crash_stats_url")]
    pub crash_stats_url: String,

    /// Highest major version counted as a legacy ESR
    #[serde(default = "default_legacy_esr_cutoff")]
    pub legacy_esr_cutoff: u32,

    /// Words that exclude a bug when found in its summary
    #[serde(default = "default_summary_exclusions")]
    pub summary_exclusions: Vec<String>,

    /// Words that exclude a bug when found in its component
    #[serde(default = "default_component_exclusions")]
    pub component_exclusions: Vec<String>,
}

fn default_product_details_url() -> String {
    "https://product-details.mozilla.org/1.0/thunderbird_versions.json".to_string()
}

fn default_bugzilla_url() -> String {
    "https://bugzilla.mozilla.org".to_string()
}

fn default_usage_stats_url() -> String {
    "https://stats.thunderbird.net/thunderbird_adi.json".to_string()
}

fn default_crash_stats_url() -> String {
    "https://crash-stats.mozilla.org".to_string()
}

const fn default_legacy_esr_cutoff() -> u32 {
    115
}

fn default_summary_exclusions() -> Vec<String> {
    ["intermit", "perma", "assert", "debug", "ews"].map(String::from).to_vec()
}

fn default_component_exclusions() -> Vec<String> {
    ["add-on", "build", "upstream"].map(String::from).to_vec()
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit `config_path`, `tb-metrics.toml` in `base_dir` is used if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading tb-metrics configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    // No config file found, use defaults
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading tb-metrics configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint is not an http(s) URL, the legacy cutoff is zero,
    /// or an exclusion list is empty or holds a blank or multi-word entry
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("product_details_url", &self.product_details_url),
            ("bugzilla_url", &self.bugzilla_url),
            ("usage_stats_url", &self.usage_stats_url),
            ("crash_stats_url", &self.crash_stats_url),
        ] {
            let url = Url::parse(value).into_app_err_with(|| format!("{key} is not a valid URL: '{value}'"))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(app_err!("{key} must be an http or https URL, got '{value}'"));
            }
        }

        if self.legacy_esr_cutoff == 0 {
            return Err(app_err!("legacy_esr_cutoff must be a major version greater than 0"));
        }

        for (key, words) in [
            ("summary_exclusions", &self.summary_exclusions),
            ("component_exclusions", &self.component_exclusions),
        ] {
            if words.is_empty() {
                return Err(app_err!("{key} must list at least one word"));
            }

            if let Some(word) = words.iter().find(|w| w.is_empty() || w.contains(char::is_whitespace)) {
                return Err(app_err!("{key} entries must be single words, got '{word}'"));
            }
        }

        Ok(())
    }

    /// The service endpoints named by this configuration.
    #[must_use]
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            product_details: self.product_details_url.clone(),
            bugzilla: self.bugzilla_url.clone(),
            usage_stats: self.usage_stats_url.clone(),
            crash_stats: self.crash_stats_url.clone(),
        }
    }

    /// The bugzilla exclusion word lists.
    #[must_use]
    pub fn exclusions(&self) -> Exclusions {
        Exclusions {
            summary: self.summary_exclusions.clone(),
            component: self.component_exclusions.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
    }

    #[test]
    fn test_default_file_matches_field_defaults() {
        let from_empty: Config = toml::from_str("").unwrap();
        assert_eq!(from_empty, Config::default());
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.legacy_esr_cutoff, 115);
        assert_eq!(config.bugzilla_url, "https://bugzilla.mozilla.org");
        assert_eq!(config.summary_exclusions.join(" "), "intermit perma assert debug ews");
        assert_eq!(config.component_exclusions.join(" "), "add-on build upstream");
    }

    #[test]
    fn test_validate_bad_url() {
        let config = Config {
            bugzilla_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_non_http_url() {
        let config = Config {
            crash_stats_url: "ftp://crash-stats.mozilla.org".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_cutoff() {
        let config = Config {
            legacy_esr_cutoff: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_exclusions() {
        let config = Config {
            summary_exclusions: Vec::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_multi_word_exclusion() {
        let config = Config {
            component_exclusions: vec!["build system".to_string()],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(toml::from_str::<Config>("cache_ttl = 3").is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_config_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let config = Config::load(&base_dir, None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_from_base_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        fs::write(base_dir.join(CONFIG_FILE_NAME), "legacy_esr_cutoff = 102\n").unwrap();

        let config = Config::load(&base_dir, None).unwrap();
        assert_eq!(config.legacy_esr_cutoff, 102);
        assert_eq!(config.bugzilla_url, default_bugzilla_url());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_explicit_path_validates() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("custom.toml")).unwrap();
        fs::write(&path, "summary_exclusions = []\n").unwrap();

        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        assert!(Config::load(&base_dir, Some(&path)).is_err());
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let path = Utf8PathBuf::from("/nonexistent/tb-metrics.toml");
        assert!(Config::load(Utf8Path::new("."), Some(&path)).is_err());
    }

    #[test]
    fn test_default_config_toml_is_not_empty() {
        assert!(!DEFAULT_CONFIG_TOML.is_empty());
    }
}
