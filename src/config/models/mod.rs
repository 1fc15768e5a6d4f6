//! Configuration data models
//!
//! This module defines all configuration structures used by tokencost.

pub mod anthropic;
pub mod counting;
pub mod logging;
pub mod pricing;

// Re-export all configuration types
pub use anthropic::*;
pub use counting::*;
pub use logging::*;
pub use pricing::*;

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}
