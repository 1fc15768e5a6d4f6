//! # tokencost
//!
//! Token counting and USD cost estimation for LLM prompts and completions.
//!
//! ## Features
//!
//! - **Local counting** with the model's BPE encoding, including chat format overhead
//! - **Remote counting** for Claude models through Anthropic's count endpoint, with
//!   a character heuristic when the endpoint is unreachable
//! - **LiteLLM price table** bundled at build time and refreshable from the live feed.
//!   The bundled table is a curated subset; refresh to price every model in the feed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tokencost::{ChatMessage, Config, CostCalculator, Prompt};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let calculator = CostCalculator::new(&Config::from_env()?)?;
//!
//!     let prompt = Prompt::from(vec![
//!         ChatMessage::system("You are a helpful assistant."),
//!         ChatMessage::user("What is the capital of France?"),
//!     ]);
//!     let result = calculator
//!         .calculate_all_costs_and_tokens(&prompt, "The capital of France is Paris.", "gpt-4")
//!         .await?;
//!
//!     println!("{} prompt tokens, ${:.6}", result.prompt_tokens, result.prompt_cost);
//!     Ok(())
//! }
//! ```
//!
//! ## Live Prices
//!
//! ```rust,no_run
//! use tokencost::{Config, CostCalculator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let calculator = CostCalculator::new(&Config::from_env()?)?;
//!     let models = calculator.update_token_costs().await?;
//!     println!("{} models priced", models);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod services;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use services::cost::{CostCalculator, Prompt, TokenCostResult, completion_from_json};
pub use services::pricing::{ModelInfo, PriceTable, PricingService, TokenType};
pub use utils::ai::counter::{ChatMessage, RemoteTokenCounter, TokenCounter};
pub use utils::ai::models::{ModelFamily, strip_ft_model_name};
pub use utils::error::{Result, TokenCostError};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp, seconds since the epoch
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
