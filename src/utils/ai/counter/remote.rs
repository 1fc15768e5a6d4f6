//! Remote token counting for Claude models
//!
//! The provider's count endpoint is the primary strategy; the character
//! heuristic is the documented approximation used whenever it fails.

use super::types::ChatMessage;
use crate::config::{AnthropicConfig, CountingConfig};
use crate::utils::error::{Result, TokenCostError};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use serde_json::{Value, json};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Provider-side token counting
#[async_trait]
pub trait RemoteTokenCounter: Send + Sync {
    /// Authoritative input-token count for `messages`
    async fn count_tokens(&self, model: &str, messages: &[ChatMessage]) -> Result<usize>;
}

#[derive(Debug, Deserialize)]
struct CountTokensResponse {
    input_tokens: u64,
}

/// Client for Anthropic's `/v1/messages/count_tokens`
#[derive(Debug, Clone)]
pub struct AnthropicTokenCounter {
    config: AnthropicConfig,
    http_client: Client,
}

impl AnthropicTokenCounter {
    /// Create
    pub fn new(config: AnthropicConfig) -> Result<Self> {
        if config.api_key.is_none() {
            return Err(TokenCostError::config(
                "ANTHROPIC_API_KEY or CLAUDE_API_KEY is required for remote token counting",
            ));
        }

        let http_client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .map_err(|e| TokenCostError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/messages/count_tokens",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(ref api_key) = self.config.api_key {
            if let Ok(api_key_header) = api_key.parse() {
                headers.insert("x-api-key", api_key_header);
            }
        }

        if let Ok(version_header) = self.config.api_version.parse() {
            headers.insert("anthropic-version", version_header);
        }

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// The endpoint only accepts user and assistant turns
    fn request_body(model: &str, messages: &[ChatMessage]) -> Value {
        let messages: Vec<Value> = messages
            .iter()
            .map(|message| {
                let role = match message.role.as_str() {
                    "user" | "assistant" => message.role.as_str(),
                    _ => "user",
                };
                json!({ "role": role, "content": message.content })
            })
            .collect();

        json!({ "model": model, "messages": messages })
    }
}

#[async_trait]
impl RemoteTokenCounter for AnthropicTokenCounter {
    async fn count_tokens(&self, model: &str, messages: &[ChatMessage]) -> Result<usize> {
        let response = self
            .http_client
            .post(self.endpoint())
            .headers(self.build_headers())
            .json(&Self::request_body(model, messages))
            .send()
            .await
            .map_err(|e| TokenCostError::network(format!("Failed to count tokens: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TokenCostError::network(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(TokenCostError::network(format!("HTTP {}: {}", status, text)));
        }

        let parsed: CountTokensResponse = serde_json::from_str(&text).map_err(|e| {
            TokenCostError::parsing(format!("Failed to parse count_tokens response: {}", e))
        })?;

        debug!("Anthropic counted {} input tokens for {}", parsed.input_tokens, model);
        Ok(parsed.input_tokens as usize)
    }
}

/// `ceil(len / chars_per_token)` per message content, summed, where `len`
/// is the content length in UTF-16 code units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharHeuristic {
    chars_per_token: usize,
}

impl CharHeuristic {
    pub fn new(chars_per_token: usize) -> Self {
        Self {
            chars_per_token: chars_per_token.max(1),
        }
    }

    pub fn estimate(&self, messages: &[ChatMessage]) -> usize {
        messages
            .iter()
            .map(|message| message.content.encode_utf16().count().div_ceil(self.chars_per_token))
            .sum()
    }
}

impl Default for CharHeuristic {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CHARS_PER_TOKEN)
    }
}

/// Primary remote counter plus the approximate fallback
#[derive(Clone)]
pub struct RemoteCountStrategy {
    primary: Option<Arc<dyn RemoteTokenCounter>>,
    heuristic: CharHeuristic,
}

impl fmt::Debug for RemoteCountStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteCountStrategy")
            .field("primary", &self.primary.is_some())
            .field("heuristic", &self.heuristic)
            .finish()
    }
}

impl RemoteCountStrategy {
    pub fn new(primary: Arc<dyn RemoteTokenCounter>, heuristic: CharHeuristic) -> Self {
        Self {
            primary: Some(primary),
            heuristic,
        }
    }

    /// Always estimate; used when no API key is configured
    pub fn heuristic_only(heuristic: CharHeuristic) -> Self {
        Self {
            primary: None,
            heuristic,
        }
    }

    pub fn from_config(anthropic: &AnthropicConfig, counting: &CountingConfig) -> Result<Self> {
        let heuristic = CharHeuristic::new(counting.chars_per_token);

        if anthropic.api_key.is_none() {
            debug!("No Anthropic API key configured, Claude counts will be estimated");
            return Ok(Self::heuristic_only(heuristic));
        }

        let client = AnthropicTokenCounter::new(anthropic.clone())?;
        Ok(Self::new(Arc::new(client), heuristic))
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Count with the primary strategy, estimating on any failure
    pub async fn count(&self, model: &str, messages: &[ChatMessage]) -> usize {
        let Some(primary) = &self.primary else {
            warn!(
                "Remote token counting unavailable for {}, estimating from character length",
                model
            );
            return self.heuristic.estimate(messages);
        };

        match primary.count_tokens(model, messages).await {
            Ok(tokens) => tokens,
            Err(e) => {
                error!("Error counting tokens with Anthropic API: {}", e);
                self.heuristic.estimate(messages)
            }
        }
    }
}
