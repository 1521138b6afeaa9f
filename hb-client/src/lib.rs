//! hb-client - HTTP clients for key redemption and ownership lookup
//!
//! Both endpoints authenticate with the user's existing browser session
//! cookies; this crate only forwards them.

pub mod config;
pub mod error;
pub mod http;
pub mod redeem;
pub mod steam;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use redeem::{HumbleClient, KeyRedeemer, RedeemOutcome, RedeemResponse};
pub use steam::{OwnedAppsSource, SteamClient, SteamUserData};

// Re-export shared request types for convenience
pub use shared::{RedeemMode, RedeemRequest};
