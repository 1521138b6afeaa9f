//! Client configuration

use std::time::Duration;

/// Default vendor site
pub const HUMBLE_BASE_URL: &str = "https://www.humblebundle.com";
/// Default platform store site
pub const STEAM_BASE_URL: &str = "https://store.steampowered.com";

/// Configuration shared by the redemption and ownership clients
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Vendor base URL (e.g., "https://www.humblebundle.com")
    pub humble_base_url: String,

    /// Platform store base URL (e.g., "https://store.steampowered.com")
    pub steam_base_url: String,

    /// Raw `Cookie` header for the vendor session
    pub humble_cookie: Option<String>,

    /// Raw `Cookie` header for the store session
    pub steam_cookie: Option<String>,

    /// Redemption request timeout in seconds
    pub redeem_timeout_secs: u64,

    /// Ownership fetch timeout in milliseconds
    pub steam_timeout_ms: u64,
}

impl ClientConfig {
    /// Create a configuration pointing at the production endpoints
    pub fn new() -> Self {
        Self {
            humble_base_url: HUMBLE_BASE_URL.to_string(),
            steam_base_url: STEAM_BASE_URL.to_string(),
            humble_cookie: None,
            steam_cookie: None,
            redeem_timeout_secs: 30,
            steam_timeout_ms: 5000,
        }
    }

    /// Override the vendor base URL
    pub fn with_humble_base_url(mut self, url: impl Into<String>) -> Self {
        self.humble_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the store base URL
    pub fn with_steam_base_url(mut self, url: impl Into<String>) -> Self {
        self.steam_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the vendor session cookie
    pub fn with_humble_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.humble_cookie = Some(cookie.into());
        self
    }

    /// Set the store session cookie
    pub fn with_steam_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.steam_cookie = Some(cookie.into());
        self
    }

    /// Set the redemption timeout
    pub fn with_redeem_timeout(mut self, seconds: u64) -> Self {
        self.redeem_timeout_secs = seconds;
        self
    }

    /// Set the ownership fetch timeout
    pub fn with_steam_timeout_ms(mut self, millis: u64) -> Self {
        self.steam_timeout_ms = millis;
        self
    }

    pub fn redeem_timeout(&self) -> Duration {
        Duration::from_secs(self.redeem_timeout_secs)
    }

    pub fn steam_timeout(&self) -> Duration {
        Duration::from_millis(self.steam_timeout_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
