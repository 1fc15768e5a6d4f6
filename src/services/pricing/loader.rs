//! Data loading functionality for the pricing service

use super::service::PricingService;
use super::types::{ModelInfo, PriceTable, SAMPLE_SPEC_KEY};
use crate::utils::error::{Result, TokenCostError};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Curated subset of the LiteLLM feed bundled at build time
const EMBEDDED_PRICES: &str = include_str!("model_prices.json");

/// Parse a LiteLLM price feed.
///
/// The top level must be a JSON object. Entries that do not fit [`ModelInfo`]
/// (such as `sample_spec`, whose fields are prose) are skipped individually.
pub fn parse_price_feed(text: &str) -> Result<PriceTable> {
    let root: Value = serde_json::from_str(text)
        .map_err(|e| TokenCostError::parsing(format!("Failed to parse pricing JSON: {}", e)))?;

    let Value::Object(entries) = root else {
        return Err(TokenCostError::parsing(
            "Pricing data must be a JSON object keyed by model name",
        ));
    };

    let mut table = PriceTable::with_capacity(entries.len());
    for (model, entry) in entries {
        match serde_json::from_value::<ModelInfo>(entry) {
            Ok(info) => {
                table.insert(model, info);
            }
            Err(e) => debug!("Skipping pricing entry {}: {}", model, e),
        }
    }
    table.remove(SAMPLE_SPEC_KEY);
    Ok(table)
}

/// Keep only entries that carry both per-token costs
pub fn retain_token_priced(mut table: PriceTable) -> PriceTable {
    table.retain(|_, info| info.is_token_priced());
    table
}

/// The bundled table, filtered to token-priced entries
pub fn load_static_table() -> Result<PriceTable> {
    parse_price_feed(EMBEDDED_PRICES).map(retain_token_priced)
}

impl PricingService {
    /// Fetch the price feed from the configured source without touching the
    /// current table
    pub async fn fetch_costs(&self) -> Result<PriceTable> {
        if self.config.is_remote() {
            self.load_from_url().await
        } else {
            self.load_from_file().await
        }
    }

    /// Load pricing data from URL
    pub(super) async fn load_from_url(&self) -> Result<PriceTable> {
        let response = self
            .http_client
            .get(&self.config.url)
            .timeout(Duration::from_secs(self.config.request_timeout))
            .send()
            .await
            .map_err(|e| TokenCostError::network(format!("Failed to fetch pricing data: {}", e)))?;

        if !response.status().is_success() {
            return Err(TokenCostError::network(format!(
                "HTTP {}: Failed to fetch pricing data",
                response.status()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| TokenCostError::network(format!("Failed to read response: {}", e)))?;

        let data = parse_price_feed(&text)?;
        debug!("Loaded {} models from URL", data.len());
        Ok(data)
    }

    /// Load pricing data from local file
    pub(super) async fn load_from_file(&self) -> Result<PriceTable> {
        let content = tokio::fs::read_to_string(&self.config.url).await?;

        let data = parse_price_feed(&content)?;
        debug!("Loaded {} models from file", data.len());
        Ok(data)
    }
}
