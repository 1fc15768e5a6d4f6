//! Model name handling
//!
//! Canonicalizes model identifiers and classifies them into the families that
//! drive encoding and counting rules.

pub mod family;
pub mod utils;

pub use family::{MessageOverhead, ModelFamily};
pub use utils::{ModelUtils, strip_ft_model_name};
