//! reqwest plumbing shared by both clients

use crate::{ClientError, ClientResult};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Build a client carrying the session cookie on every request
pub(crate) fn build_client(cookie: Option<&str>, timeout: Duration) -> ClientResult<Client> {
    let mut headers = HeaderMap::new();
    if let Some(cookie) = cookie {
        let mut value = HeaderValue::from_str(cookie)
            .map_err(|e| ClientError::Validation(format!("invalid cookie header: {e}")))?;
        value.set_sensitive(true);
        headers.insert(COOKIE, value);
    }

    Ok(Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .build()?)
}

/// Map non-success statuses to errors, decode JSON otherwise
pub(crate) async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await?;
        return match status {
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
            _ => Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            }),
        };
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(Into::into)
}
