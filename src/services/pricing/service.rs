//! Main pricing service implementation

use super::loader::load_static_table;
use super::types::{
    CostRange, ModelInfo, PriceTable, PricingData, PricingStatistics, PricingUpdateEvent,
};
use crate::config::PricingConfig;
use crate::utils::error::Result;
use arc_swap::ArcSwap;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::broadcast;
use tracing::info;

/// Pricing service holding the static and current LiteLLM price tables
///
/// Readers take lock-free snapshots of the current table; refreshes replace
/// it wholesale, so a reader never observes a partially merged table.
#[derive(Debug)]
pub struct PricingService {
    /// Bundled table, never modified after construction
    pub(super) static_table: Arc<PriceTable>,
    /// Current table and refresh timestamp
    pub(super) pricing_data: ArcSwap<PricingData>,
    /// HTTP client for fetching updates
    pub(super) http_client: reqwest::Client,
    /// Feed location and refresh settings
    pub(super) config: PricingConfig,
    /// Event broadcaster for updates
    pub(super) event_sender: broadcast::Sender<PricingUpdateEvent>,
}

impl PricingService {
    /// Create a pricing service seeded from the bundled price table
    pub fn new(config: &PricingConfig) -> Result<Self> {
        Self::with_static_table(load_static_table()?, config)
    }

    /// Create a pricing service seeded from an explicit table
    pub fn with_static_table(table: PriceTable, config: &PricingConfig) -> Result<Self> {
        let (event_sender, _) = broadcast::channel(64);
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        let static_table = Arc::new(table);
        let service = Self {
            pricing_data: ArcSwap::from_pointee(PricingData {
                models: Arc::clone(&static_table),
                last_updated: None,
            }),
            static_table,
            http_client,
            config: config.clone(),
            event_sender,
        };

        info!(
            "Pricing service initialized with {} models, feed: {}",
            service.static_table.len(),
            service.config.url
        );
        Ok(service)
    }

    /// The bundled table, unaffected by refreshes
    pub fn static_table(&self) -> Arc<PriceTable> {
        Arc::clone(&self.static_table)
    }

    /// Consistent snapshot of the current table
    pub fn snapshot(&self) -> Arc<PriceTable> {
        Arc::clone(&self.pricing_data.load().models)
    }

    pub fn last_updated(&self) -> Option<SystemTime> {
        self.pricing_data.load().last_updated
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Get model information
    pub fn get_model_info(&self, model: &str) -> Option<ModelInfo> {
        self.pricing_data.load().models.get(model).cloned()
    }

    pub fn contains_model(&self, model: &str) -> bool {
        self.pricing_data.load().models.contains_key(model)
    }

    /// Get (input, output) cost per token for a model
    pub fn get_cost_per_token(&self, model: &str) -> Option<(f64, f64)> {
        let data = self.pricing_data.load();
        let info = data.models.get(model)?;
        Some((info.input_cost_per_token?, info.output_cost_per_token?))
    }

    /// Get all available models for a provider, sorted
    pub fn get_models_by_provider(&self, provider: &str) -> Vec<String> {
        let data = self.pricing_data.load();
        let mut models: Vec<String> = data
            .models
            .iter()
            .filter(|(_, info)| info.litellm_provider.as_deref() == Some(provider))
            .map(|(model, _)| model.clone())
            .collect();
        models.sort();
        models
    }

    /// Get all available providers
    pub fn get_providers(&self) -> Vec<String> {
        let data = self.pricing_data.load();
        let mut providers: Vec<String> = data
            .models
            .values()
            .filter_map(|info| info.litellm_provider.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        providers.sort();
        providers
    }

    /// Get pricing statistics
    pub fn get_statistics(&self) -> PricingStatistics {
        let data = self.pricing_data.load();
        let total_models = data.models.len();

        let mut provider_stats = HashMap::new();
        let mut cost_ranges = HashMap::new();

        for model_info in data.models.values() {
            let provider = model_info.provider().to_string();
            *provider_stats.entry(provider.clone()).or_insert(0) += 1;

            if let (Some(input_cost), Some(output_cost)) = (
                model_info.input_cost_per_token,
                model_info.output_cost_per_token,
            ) {
                let range = cost_ranges.entry(provider).or_insert(CostRange {
                    input_min: f64::MAX,
                    input_max: f64::MIN,
                    output_min: f64::MAX,
                    output_max: f64::MIN,
                });

                range.input_min = range.input_min.min(input_cost);
                range.input_max = range.input_max.max(input_cost);
                range.output_min = range.output_min.min(output_cost);
                range.output_max = range.output_max.max(output_cost);
            }
        }

        PricingStatistics {
            total_models,
            provider_stats,
            cost_ranges,
            last_updated: data.last_updated,
        }
    }
}
