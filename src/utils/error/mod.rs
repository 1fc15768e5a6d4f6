//! Error handling for tokencost
//!
//! This module defines the error taxonomy shared by the counting, pricing and
//! configuration layers.

mod helpers;
mod types;

pub use types::{Result, TokenCostError};
