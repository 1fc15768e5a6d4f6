//! Cost calculation result types

use serde::{Deserialize, Serialize};

/// Costs in USD and token counts for one prompt/completion pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenCostResult {
    pub prompt_cost: f64,
    pub prompt_tokens: usize,
    pub completion_cost: f64,
    pub completion_tokens: usize,
}

impl TokenCostResult {
    pub fn total_cost(&self) -> f64 {
        self.prompt_cost + self.completion_cost
    }

    pub fn total_tokens(&self) -> usize {
        self.prompt_tokens + self.completion_tokens
    }
}
