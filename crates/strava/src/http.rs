use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::models::ApiErrorResponse;
use commitpool_core::errors::{Error, ProviderError, Result};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub(crate) fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))
}

pub(crate) fn request_error(e: reqwest::Error) -> Error {
    ProviderError::Request(e.to_string()).into()
}

/// Reads the body and hands it to [`parse_body`].
pub(crate) async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::Request(format!("Failed to read response: {}", e)))?;
    parse_body(status, &body)
}

/// Maps non-2xx statuses to [`ProviderError::Api`] carrying the API's own
/// message when it sent one.
pub(crate) fn parse_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        let message = serde_json::from_str::<ApiErrorResponse>(body)
            .ok()
            .and_then(|err| err.message.or(err.error))
            .unwrap_or_else(|| body.chars().take(200).collect());
        return Err(ProviderError::Api {
            status: status.as_u16(),
            message,
        }
        .into());
    }

    serde_json::from_str(body)
        .map_err(|e| ProviderError::Parse(format!("{} - {}", e, body)).into())
}
