//! Services module
//!
//! Price table management and cost calculation

pub mod cost;
pub mod pricing;

pub use cost::{CostCalculator, Prompt, TokenCostResult, completion_from_json};
pub use pricing::{
    CostRange, ModelInfo, PriceTable, PricingService, PricingStatistics, PricingUpdateEvent,
    TokenType,
};
