//! Shared HTTP plumbing for the providers.

use crate::error::{ProviderError, Result};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Build the HTTP client every provider uses
pub(crate) fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(15))
        .connect_timeout(Duration::from_secs(5))
        .user_agent(format!("Encore/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ProviderError::Request)
}

/// Parse a configured base URL, insisting on http(s)
pub(crate) fn parse_base_url(raw: &str) -> Result<Url> {
    if raw.is_empty() {
        return Err(ProviderError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = Url::parse(raw.trim_end_matches('/'))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ProviderError::InvalidUrl(format!(
            "unsupported scheme '{}', expected http or https",
            other
        ))),
    }
}

/// Decode a JSON body, turning non-success statuses into `ProviderError`
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let message = response.text().await.unwrap_or_default();
        return Err(ProviderError::Auth(format!("{}: {}", status, message)));
    }

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ProviderError::Server {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json()
        .await
        .map_err(|e| ProviderError::Parse(e.to_string()))
}
