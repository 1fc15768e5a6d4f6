//! Anthropic token counting configuration

use super::default_timeout;
use serde::{Deserialize, Serialize};

/// Configuration for the remote count_tokens endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnthropicConfig {
    /// API key; without one every Claude count uses the character heuristic
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Value of the anthropic-version header
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout: u64,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            api_version: default_api_version(),
            request_timeout: default_timeout(),
        }
    }
}

impl AnthropicConfig {
    /// Create
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}
