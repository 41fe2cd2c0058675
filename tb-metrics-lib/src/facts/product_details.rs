use super::http;
use crate::error::Error;
use crate::versions::VersionMetadata;
use reqwest::Client;

const LOG_TARGET: &str = "   product";
const SERVICE: &str = "product-details";

/// Fetch the Thunderbird version metadata document.
pub async fn fetch_metadata(client: &Client, url: &str) -> Result<VersionMetadata, Error> {
    log::info!(target: LOG_TARGET, "Fetching version metadata from {url}");

    let text = http::get_text(SERVICE, client.get(url)).await?;
    let metadata = VersionMetadata::from_json(&text)?;

    log::debug!(
        target: LOG_TARGET,
        "esr={} nightly={} devel={} release={}",
        metadata.esr().as_str(),
        metadata.nightly().as_str(),
        metadata.devel().as_str(),
        metadata.release().as_str()
    );

    Ok(metadata)
}
