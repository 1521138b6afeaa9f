//! Key redemption against the vendor's `redeemkey` endpoint
//!
//! The endpoint answers with one of two loosely typed JSON shapes. They are
//! decoded here into [`RedeemOutcome`] so callers never inspect raw fields.

use crate::http::{build_client, handle_response};
use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{RedeemMode, RedeemRequest};

const REDEEM_PATH: &str = "/humbler/redeemkey";

/// Anything that can claim a key for a row
#[async_trait]
pub trait KeyRedeemer: Send + Sync {
    /// Claim one key. `Ok(Rejected)` means the server refused; `Err` means
    /// the request itself failed.
    async fn redeem(&self, request: &RedeemRequest, mode: RedeemMode) -> ClientResult<RedeemOutcome>;
}

/// Decoded redemption result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RedeemOutcome {
    /// Direct reveal
    Revealed { key: String },
    /// Gift mode, carries the full claim URL
    GiftLink { url: String },
    /// `success: false`
    Rejected { message: String },
}

impl RedeemOutcome {
    /// Value to store in the row's revealed field
    pub fn value(&self) -> Option<&str> {
        match self {
            RedeemOutcome::Revealed { key } => Some(key),
            RedeemOutcome::GiftLink { url } => Some(url),
            RedeemOutcome::Rejected { .. } => None,
        }
    }
}

/// Raw endpoint response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedeemResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub giftkey: Option<String>,
    /// Sometimes a string, sometimes a structured object
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub error_msg: Option<String>,
}

impl RedeemResponse {
    /// Decode into an outcome. `gift_base` is the vendor base URL.
    pub fn into_outcome(self, mode: RedeemMode, gift_base: &str) -> ClientResult<RedeemOutcome> {
        if !self.success {
            let message = self
                .error_msg
                .filter(|m| !m.is_empty())
                .or_else(|| self.error.as_ref().and_then(error_text))
                .unwrap_or_else(|| "Unknown error".to_string());
            return Ok(RedeemOutcome::Rejected { message });
        }

        match mode {
            RedeemMode::Gift => {
                let giftkey = self
                    .giftkey
                    .filter(|k| !k.is_empty())
                    .ok_or_else(|| ClientError::InvalidResponse("missing giftkey".to_string()))?;
                Ok(RedeemOutcome::GiftLink {
                    url: gift_link(gift_base, &giftkey),
                })
            }
            RedeemMode::Key => {
                let key = self
                    .key
                    .filter(|k| !k.is_empty())
                    .ok_or_else(|| ClientError::InvalidResponse("missing key".to_string()))?;
                Ok(RedeemOutcome::Revealed { key })
            }
        }
    }
}

fn error_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Gift claim URL for a gift token
pub fn gift_link(base_url: &str, giftkey: &str) -> String {
    format!("{}/gift?key={}", base_url.trim_end_matches('/'), giftkey)
}

/// Form fields in the order the endpoint expects them
pub fn redeem_form(request: &RedeemRequest, mode: RedeemMode) -> ClientResult<Vec<(&'static str, String)>> {
    let keyindex = request.keyindex.ok_or_else(|| {
        ClientError::Validation(format!("{} has no key index", request.machine_name))
    })?;

    let mut form = vec![
        ("keytype", request.machine_name.clone()),
        ("key", request.gamekey.clone()),
        ("keyindex", keyindex.to_string()),
    ];
    if mode.is_gift() {
        form.push(("gift", "true".to_string()));
    }
    Ok(form)
}

/// Vendor HTTP client
#[derive(Debug, Clone)]
pub struct HumbleClient {
    client: Client,
    base_url: String,
}

impl HumbleClient {
    /// Create a new client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = build_client(config.humble_cookie.as_deref(), config.redeem_timeout())?;
        Ok(Self {
            client,
            base_url: config.humble_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl KeyRedeemer for HumbleClient {
    async fn redeem(&self, request: &RedeemRequest, mode: RedeemMode) -> ClientResult<RedeemOutcome> {
        let form = redeem_form(request, mode)?;
        tracing::info!(machine_name = %request.machine_name, gift = mode.is_gift(), "Redeeming product");

        let url = format!("{}{}", self.base_url, REDEEM_PATH);
        let response = self.client.post(&url).form(&form).send().await?;
        let body: RedeemResponse = handle_response(response).await?;
        tracing::debug!(success = body.success, "Redeem response");

        body.into_outcome(mode, &self.base_url)
    }
}
