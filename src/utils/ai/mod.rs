//! AI and Model utilities
//!
//! This module provides model name handling, encoding resolution and token counting.

pub mod counter;
pub mod encoding;
pub mod models;

// Re-export commonly used types and functions
pub use counter::{ChatMessage, TokenCounter};
pub use encoding::{Encoding, EncodingResolver};
pub use models::{ModelFamily, ModelUtils, strip_ft_model_name};
