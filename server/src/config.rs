//! Server Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{bail, Context, Result};
use std::env;
use std::fmt;
use std::time::Duration;

/// Default LINE Messaging API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.line.me";

/// Default LINE content endpoint (message content is served from a separate host).
pub const DEFAULT_DATA_API_BASE_URL: &str = "https://api-data.line.me";

/// Liveness route served next to the callback.
pub const HEALTH_PATH: &str = "/health";

/// Server configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,

    /// Path the platform posts webhook callbacks to (default: "/callback")
    pub callback_path: String,

    /// Channel secret, the HMAC key for `X-Line-Signature`
    pub channel_secret: String,

    /// Long-lived channel access token used as the API bearer token
    pub channel_access_token: String,

    /// Messaging API base URL
    pub api_base_url: String,

    /// Content API base URL
    pub data_api_base_url: String,

    /// Timeout for outbound API calls in seconds (default: 10)
    pub api_timeout_secs: u64,

    /// Maximum accepted callback body in bytes (default: 1MB)
    pub max_body_size: usize,

    /// Answer unsigned or malformed callbacks with 401/400 instead of 200
    pub reject_invalid_callbacks: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let callback_path = env::var("CALLBACK_PATH").unwrap_or_else(|_| "/callback".into());
        if !callback_path.starts_with('/') {
            bail!("CALLBACK_PATH must start with '/', got {callback_path:?}");
        }
        if callback_path == HEALTH_PATH {
            bail!("CALLBACK_PATH must not be {HEALTH_PATH}, which is reserved for health checks");
        }

        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            callback_path,
            channel_secret: env::var("LINE_CHANNEL_SECRET")
                .context("LINE_CHANNEL_SECRET must be set")?,
            channel_access_token: env::var("LINE_CHANNEL_ACCESS_TOKEN")
                .context("LINE_CHANNEL_ACCESS_TOKEN must be set")?,
            api_base_url: env::var("LINE_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.into()),
            data_api_base_url: env::var("LINE_DATA_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATA_API_BASE_URL.into()),
            api_timeout_secs: env::var("LINE_API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            max_body_size: env::var("MAX_CALLBACK_BODY_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024 * 1024), // 1MB
            reject_invalid_callbacks: env::var("REJECT_INVALID_CALLBACKS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        })
    }

    /// Outbound API timeout as a [`Duration`].
    #[must_use]
    pub const fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    /// Create a default configuration for testing.
    ///
    /// API URLs point at an unroutable local port; tests that exercise the
    /// client override them with a mock server URI.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".into(),
            callback_path: "/callback".into(),
            channel_secret: "test-channel-secret".into(),
            channel_access_token: "test-access-token".into(),
            api_base_url: "http://127.0.0.1:9".into(),
            data_api_base_url: "http://127.0.0.1:9".into(),
            api_timeout_secs: 2,
            max_body_size: 1024 * 1024,
            reject_invalid_callbacks: false,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("callback_path", &self.callback_path)
            .field("channel_secret", &"[REDACTED]")
            .field("channel_access_token", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("data_api_base_url", &self.data_api_base_url)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("max_body_size", &self.max_body_size)
            .field("reject_invalid_callbacks", &self.reject_invalid_callbacks)
            .finish()
    }
}
