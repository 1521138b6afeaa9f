//! Owned-app lookup against the store's `dynamicstore/userdata` endpoint

use crate::http::{build_client, handle_response};
use crate::{ClientConfig, ClientResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const USERDATA_PATH: &str = "/dynamicstore/userdata";

/// Source of the ids the platform account owns
#[async_trait]
pub trait OwnedAppsSource: Send + Sync {
    async fn owned_apps(&self) -> ClientResult<Vec<u64>>;
}

/// Relevant part of the userdata payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteamUserData {
    #[serde(default)]
    pub rg_owned_packages: Vec<u64>,
    #[serde(default)]
    pub rg_owned_apps: Vec<u64>,
}

impl SteamUserData {
    /// Packages followed by apps
    pub fn owned_ids(self) -> Vec<u64> {
        let mut ids = self.rg_owned_packages;
        ids.extend(self.rg_owned_apps);
        ids
    }
}

/// Store HTTP client
#[derive(Debug, Clone)]
pub struct SteamClient {
    client: Client,
    base_url: String,
}

impl SteamClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = build_client(config.steam_cookie.as_deref(), config.steam_timeout())?;
        Ok(Self {
            client,
            base_url: config.steam_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl OwnedAppsSource for SteamClient {
    async fn owned_apps(&self) -> ClientResult<Vec<u64>> {
        let url = format!("{}{}", self.base_url, USERDATA_PATH);
        tracing::debug!(%url, "Fetching owned apps");
        let response = self.client.get(&url).send().await?;
        let data: SteamUserData = handle_response(response).await?;
        Ok(data.owned_ids())
    }
}
