//! Configuration management for tokencost
//!
//! This module handles loading, validation, and management of all configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{Result, TokenCostError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Price table configuration
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Counting constants
    #[serde(default)]
    pub counting: CountingConfig,
    /// Remote token counting for Claude models
    #[serde(default)]
    pub anthropic: AnthropicConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| TokenCostError::config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| TokenCostError::config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env_overrides();

        config.validate()?;
        Ok(config)
    }

    /// Overlay values from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Overlay values produced by `lookup`, keyed by environment variable name
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("TOKENCOST_PRICES_URL") {
            self.pricing.url = url;
        }

        if let Some(refresh) = lookup("TOKENCOST_REFRESH_ON_STARTUP") {
            self.pricing.refresh_on_startup = refresh.parse().unwrap_or(false);
        }

        if let Some(level) = lookup("TOKENCOST_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(api_key) =
            lookup("ANTHROPIC_API_KEY").or_else(|| lookup("CLAUDE_API_KEY"))
        {
            self.anthropic.api_key = Some(api_key);
        }

        if let Some(base_url) = lookup("ANTHROPIC_BASE_URL") {
            self.anthropic.base_url = base_url;
        }

        if let Some(api_version) = lookup("ANTHROPIC_API_VERSION") {
            self.anthropic.api_version = api_version;
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.pricing
            .validate()
            .map_err(|e| TokenCostError::config(format!("Pricing config error: {}", e)))?;

        self.counting
            .validate()
            .map_err(|e| TokenCostError::config(format!("Counting config error: {}", e)))?;

        self.anthropic
            .validate()
            .map_err(|e| TokenCostError::config(format!("Anthropic config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| TokenCostError::config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
