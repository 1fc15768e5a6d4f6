//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.

use super::models::*;
use tracing::debug;
use url::Url;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Require a well-formed http(s) URL with a host
fn validate_http_url(url_str: &str, context: &str) -> Result<(), String> {
    let url = Url::parse(url_str)
        .map_err(|e| format!("{} has invalid URL format: {}", context, e))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(format!(
                "{} must use http:// or https:// scheme, got: {}",
                context, scheme
            ));
        }
    }

    if url.host_str().is_none() {
        return Err(format!("{} URL must have a valid host", context));
    }

    Ok(())
}

impl Validate for PricingConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating pricing configuration");

        if self.url.trim().is_empty() {
            return Err("Price feed location cannot be empty".to_string());
        }

        // Anything else is a local file path
        if self.is_remote() {
            validate_http_url(&self.url, "Price feed")?;
        }

        if self.request_timeout == 0 {
            return Err("Price feed timeout must be greater than 0".to_string());
        }

        if self.refresh_interval == Some(0) {
            return Err("Refresh interval must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for CountingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.chars_per_token == 0 {
            return Err("chars_per_token must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for AnthropicConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating anthropic configuration");

        validate_http_url(&self.base_url, "Anthropic base URL")?;

        if self.api_version.is_empty() {
            return Err("Anthropic API version cannot be empty".to_string());
        }

        if self.request_timeout == 0 {
            return Err("Anthropic timeout must be greater than 0".to_string());
        }

        if matches!(&self.api_key, Some(key) if key.trim().is_empty()) {
            return Err("Anthropic API key cannot be blank".to_string());
        }

        Ok(())
    }
}
