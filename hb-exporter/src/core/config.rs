use hb_client::ClientConfig;
use hb_client::config::{HUMBLE_BASE_URL, STEAM_BASE_URL};
use std::path::PathBuf;

/// Exporter configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HB_STORE_PATH | localStorage.json | local storage dump |
/// | HB_SESSION_COOKIE | - | vendor `Cookie` header |
/// | STEAM_COOKIE | - | store `Cookie` header |
/// | HB_BASE_URL | https://www.humblebundle.com | vendor site |
/// | STEAM_BASE_URL | https://store.steampowered.com | store site |
/// | HB_REDEEM_TIMEOUT_SECS | 30 | per-redemption timeout |
/// | STEAM_TIMEOUT_MS | 5000 | owned-apps fetch timeout |
/// | LOG_LEVEL | info | tracing filter |
/// | LOG_JSON | false | JSON log lines |
/// | LOG_DIR | - | daily rotating log files |
#[derive(Debug, Clone)]
pub struct Config {
    pub store_path: PathBuf,
    pub humble_cookie: Option<String>,
    pub steam_cookie: Option<String>,
    pub humble_base_url: String,
    pub steam_base_url: String,
    pub redeem_timeout_secs: u64,
    pub steam_timeout_ms: u64,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            store_path: non_empty_var("HB_STORE_PATH")
                .unwrap_or_else(|| "localStorage.json".into())
                .into(),
            humble_cookie: non_empty_var("HB_SESSION_COOKIE"),
            steam_cookie: non_empty_var("STEAM_COOKIE"),
            humble_base_url: non_empty_var("HB_BASE_URL").unwrap_or_else(|| HUMBLE_BASE_URL.into()),
            steam_base_url: non_empty_var("STEAM_BASE_URL").unwrap_or_else(|| STEAM_BASE_URL.into()),
            redeem_timeout_secs: std::env::var("HB_REDEEM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            steam_timeout_ms: std::env::var("STEAM_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            log_level: non_empty_var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: non_empty_var("LOG_DIR"),
        }
    }

    /// Client settings for both remote endpoints
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new()
            .with_humble_base_url(&self.humble_base_url)
            .with_steam_base_url(&self.steam_base_url)
            .with_redeem_timeout(self.redeem_timeout_secs)
            .with_steam_timeout_ms(self.steam_timeout_ms);
        if let Some(cookie) = &self.humble_cookie {
            config = config.with_humble_cookie(cookie);
        }
        if let Some(cookie) = &self.steam_cookie {
            config = config.with_steam_cookie(cookie);
        }
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: "localStorage.json".into(),
            humble_cookie: None,
            steam_cookie: None,
            humble_base_url: HUMBLE_BASE_URL.into(),
            steam_base_url: STEAM_BASE_URL.into(),
            redeem_timeout_secs: 30,
            steam_timeout_ms: 5000,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
        }
    }
}
