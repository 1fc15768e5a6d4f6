//! Type definitions for the pricing service

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

/// Key of the schema-describing pseudo entry shipped in the LiteLLM feed
pub const SAMPLE_SPEC_KEY: &str = "sample_spec";

/// Model name -> pricing entry
pub type PriceTable = HashMap<String, ModelInfo>;

/// LiteLLM compatible model pricing data structure
///
/// Every field is optional: the feed mixes chat, embedding, image and audio
/// entries, and only the per-token costs matter for cost calculation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModelInfo {
    /// Maximum total tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,
    /// Maximum input tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_input_tokens: Option<u64>,
    /// Maximum output tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u64>,
    /// Input cost per token, USD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_cost_per_token: Option<f64>,
    /// Output cost per token, USD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_cost_per_token: Option<f64>,
    /// LiteLLM provider name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub litellm_provider: Option<String>,
    /// Model mode (chat, completion, embedding, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_function_calling: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_vision: Option<bool>,
    /// Fields this crate does not interpret, kept so entries round-trip
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl ModelInfo {
    /// Build an entry carrying only the two per-token costs
    pub fn with_costs(input_cost_per_token: f64, output_cost_per_token: f64) -> Self {
        Self {
            input_cost_per_token: Some(input_cost_per_token),
            output_cost_per_token: Some(output_cost_per_token),
            ..Default::default()
        }
    }

    /// Whether both per-token costs are present
    pub fn is_token_priced(&self) -> bool {
        self.input_cost_per_token.is_some() && self.output_cost_per_token.is_some()
    }

    /// Per-token cost for the given side of the exchange
    pub fn cost_per_token(&self, token_type: TokenType) -> Option<f64> {
        match token_type {
            TokenType::Input => self.input_cost_per_token,
            TokenType::Output => self.output_cost_per_token,
        }
    }

    pub fn provider(&self) -> &str {
        self.litellm_provider.as_deref().unwrap_or("unknown")
    }
}

/// Which per-token rate applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Input,
    Output,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Input => write!(f, "input"),
            TokenType::Output => write!(f, "output"),
        }
    }
}

impl std::str::FromStr for TokenType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "input" => Ok(TokenType::Input),
            "output" => Ok(TokenType::Output),
            other => Err(format!("token type must be 'input' or 'output', got '{}'", other)),
        }
    }
}

/// Current pricing state, swapped atomically on refresh
#[derive(Debug, Clone)]
pub(super) struct PricingData {
    pub models: Arc<PriceTable>,
    /// Set after the first successful refresh
    pub last_updated: Option<SystemTime>,
}

/// Event for pricing updates
#[derive(Debug, Clone, PartialEq)]
pub struct PricingUpdateEvent {
    /// Models not present before the refresh
    pub added: usize,
    /// Models whose entry was replaced by the refresh
    pub updated: usize,
    /// Table size after the refresh
    pub total_models: usize,
    pub timestamp: SystemTime,
}

/// Pricing statistics
#[derive(Debug, Clone, Serialize)]
pub struct PricingStatistics {
    /// Total number of models
    pub total_models: usize,
    /// Count of models per provider
    pub provider_stats: HashMap<String, usize>,
    /// Token cost ranges by provider
    pub cost_ranges: HashMap<String, CostRange>,
    /// Last refresh time, if any
    pub last_updated: Option<SystemTime>,
}

/// Cost range information
#[derive(Debug, Clone, Serialize)]
pub struct CostRange {
    pub input_min: f64,
    pub input_max: f64,
    pub output_min: f64,
    pub output_max: f64,
}
