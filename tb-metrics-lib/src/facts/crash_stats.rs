use super::http;
use crate::error::Error;
use reqwest::Client;
use serde::Deserialize;

const LOG_TARGET: &str = "   crashes";
const SERVICE: &str = "crash-stats";

#[derive(Debug, Deserialize)]
struct SearchResult {
    total: u64,
}

/// Run a crash-stats super search and return the total number of matching reports.
pub async fn count_crashes(client: &Client, url: &str) -> Result<u64, Error> {
    log::debug!(target: LOG_TARGET, "GET {url}");

    let result: SearchResult = http::get_json(SERVICE, client.get(url)).await?;
    Ok(result.total)
}
