use crate::error::Error;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

const USER_AGENT: &str = concat!("tb-metrics/", env!("CARGO_PKG_VERSION"));

/// Create the HTTP client shared by every provider in a run.
pub fn client() -> Result<Client, Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|source| Error::Network { service: "http client", source })
}

/// Send `request` and return the body of a successful response.
///
/// Transport failures and non-success statuses are [`Error::Network`].
pub async fn get_text(service: &'static str, request: RequestBuilder) -> Result<String, Error> {
    let response = request
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|source| Error::Network { service, source })?;

    response.text().await.map_err(|source| Error::Network { service, source })
}

/// Send `request` and decode a JSON body.
///
/// A body that does not decode as `T` is [`Error::UnexpectedResponse`].
pub async fn get_json<T: DeserializeOwned>(service: &'static str, request: RequestBuilder) -> Result<T, Error> {
    let text = get_text(service, request).await?;

    serde_json::from_str(&text).map_err(|e| Error::UnexpectedResponse {
        service,
        reason: e.to_string(),
    })
}
