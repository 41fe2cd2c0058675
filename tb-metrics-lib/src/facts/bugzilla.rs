use super::http;
use crate::error::Error;
use core::fmt::{Debug, Formatter, Result as FmtResult};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde::de::IgnoredAny;

const LOG_TARGET: &str = "  bugzilla";
const SERVICE: &str = "bugzilla";

/// Environment variable holding the bugzilla API key.
pub const API_KEY_VARIABLE: &str = "BMO_API_KEY";

/// A bugzilla API key, never printed.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key read from the command line or the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] if no key was given or it is blank.
    pub fn new(key: Option<&str>) -> Result<Self, Error> {
        match key.map(str::trim) {
            Some(key) if !key.is_empty() => Ok(Self(key.to_string())),
            _ => Err(Error::MissingCredential {
                variable: API_KEY_VARIABLE,
            }),
        }
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Deserialize)]
struct BugList {
    bugs: Vec<IgnoredAny>,
}

/// Run a bugzilla search and return the number of matching bugs.
pub async fn count_bugs(client: &Client, url: &str, api_key: &ApiKey) -> Result<u64, Error> {
    log::debug!(target: LOG_TARGET, "GET {url}");

    let request = client
        .get(url)
        .header(CONTENT_TYPE, "application/json")
        .query(&[("api_key", api_key.as_str())]);

    let list: BugList = http::get_json(SERVICE, request).await?;
    Ok(list.bugs.len() as u64)
}
