//! Utility modules for tokencost
//!
//! - **ai**: model names, encodings and token counting
//! - **error**: error taxonomy
//! - **logging**: tracing subscriber setup

pub mod ai;
pub mod error;
pub mod logging;

pub use ai::{ChatMessage, EncodingResolver, ModelFamily, ModelUtils, TokenCounter};
pub use error::{Result, TokenCostError};
