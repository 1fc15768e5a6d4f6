//! Price table manager using the LiteLLM pricing data format
//!
//! Holds the bundled static table and a current table that starts as a copy
//! of it and absorbs entries fetched from the LiteLLM feed.

mod cache;
mod events;
mod loader;
mod service;
mod types;


// Re-export public types
pub use loader::{load_static_table, parse_price_feed, retain_token_priced};
pub use service::PricingService;
pub use types::{
    CostRange, ModelInfo, PriceTable, PricingStatistics, PricingUpdateEvent, SAMPLE_SPEC_KEY,
    TokenType,
};
