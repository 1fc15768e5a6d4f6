//! Cost calculator
//!
//! Multiplies token counts by the per-token rates of the current price table.

mod calculator;
mod prompt;
mod types;


pub use calculator::CostCalculator;
pub use prompt::{Prompt, completion_from_json};
pub use types::TokenCostResult;
