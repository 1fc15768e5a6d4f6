//! Refresh functionality for the pricing service

use super::service::PricingService;
use super::types::{PriceTable, PricingData, PricingUpdateEvent, SAMPLE_SPEC_KEY};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::{debug, error, info, warn};

impl PricingService {
    /// Fetch the feed and merge it into the current table.
    ///
    /// Fetched entries overwrite same-named entries, entries absent from the
    /// feed are kept, and `sample_spec` is always removed. On failure the
    /// current table is left untouched. Returns the resulting table size.
    pub async fn refresh(&self) -> Result<usize> {
        info!("Refreshing pricing data from: {}", self.config.url);

        let fetched = self.fetch_costs().await?;
        let event = self.merge(fetched);
        let total = event.total_models;

        let _ = self.event_sender.send(event);

        info!("Pricing data refreshed successfully ({} models)", total);
        Ok(total)
    }

    /// Merge an already fetched table into the current one
    pub fn merge(&self, fetched: PriceTable) -> PricingUpdateEvent {
        let now = SystemTime::now();
        let mut added: usize = 0;
        let mut updated: usize = 0;

        self.pricing_data.rcu(|current| {
            let mut models = PriceTable::clone(&current.models);
            added = 0;
            updated = 0;
            for (model, info) in &fetched {
                match models.insert(model.clone(), info.clone()) {
                    Some(_) => updated += 1,
                    None => added += 1,
                }
            }
            if models.remove(SAMPLE_SPEC_KEY).is_some() {
                added = added.saturating_sub(1);
            }
            PricingData {
                models: Arc::new(models),
                last_updated: Some(now),
            }
        });

        PricingUpdateEvent {
            added,
            updated,
            total_models: self.pricing_data.load().models.len(),
            timestamp: now,
        }
    }

    /// Run one refresh on the current tokio runtime, logging any failure.
    ///
    /// Returns `None` when called outside a runtime.
    pub fn spawn_background_refresh(
        self: &Arc<Self>,
    ) -> Option<tokio::task::JoinHandle<()>> {
        let handle = tokio::runtime::Handle::try_current().ok()?;
        let service = Arc::clone(self);
        Some(handle.spawn(async move {
            if let Err(e) = service.refresh().await {
                error!("Failed to update token costs: {}", e);
            }
        }))
    }

    /// Start automatic pricing data refresh task
    pub fn start_auto_refresh_task(self: Arc<Self>, period: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;

                if let Err(e) = self.refresh().await {
                    warn!("Auto-refresh pricing data failed: {}", e);
                } else {
                    debug!("Auto-refresh pricing data completed successfully");
                }
            }
        })
    }
}
