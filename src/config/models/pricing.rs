//! Pricing configuration models

use super::default_timeout;
use serde::{Deserialize, Serialize};

/// LiteLLM price feed, the remote source merged into the current table
pub const PRICES_URL: &str =
    "https://raw.githubusercontent.com/BerriAI/litellm/main/model_prices_and_context_window.json";

/// Price table configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingConfig {
    /// Price feed location: an http(s) URL or a local file path
    #[serde(default = "default_prices_url")]
    pub url: String,
    /// Fetch timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout: u64,
    /// Refresh once in the background when the calculator is created
    #[serde(default)]
    pub refresh_on_startup: bool,
    /// Keep refreshing every N seconds after startup
    #[serde(default)]
    pub refresh_interval: Option<u64>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            url: default_prices_url(),
            request_timeout: default_timeout(),
            refresh_on_startup: false,
            refresh_interval: None,
        }
    }
}

impl PricingConfig {
    /// Whether the feed is fetched over HTTP rather than read from disk
    pub fn is_remote(&self) -> bool {
        self.url.starts_with("http")
    }
}

fn default_prices_url() -> String {
    PRICES_URL.to_string()
}
