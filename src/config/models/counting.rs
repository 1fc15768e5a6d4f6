//! Token counting configuration models

use serde::{Deserialize, Serialize};

/// Tokens the Anthropic API reports on top of the message-based completion count
pub const DEFAULT_COMPLETION_TOKEN_CORRECTION: usize = 13;

/// Characters per token assumed when the remote count is unavailable
pub const DEFAULT_CHARS_PER_TOKEN: usize = 4;

/// Empirically tuned counting constants
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountingConfig {
    /// Subtracted from remotely counted completion tokens, clamped at zero
    #[serde(default = "default_completion_token_correction")]
    pub completion_token_correction: usize,
    /// Divisor of the character heuristic
    #[serde(default = "default_chars_per_token")]
    pub chars_per_token: usize,
}

impl Default for CountingConfig {
    fn default() -> Self {
        Self {
            completion_token_correction: DEFAULT_COMPLETION_TOKEN_CORRECTION,
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
        }
    }
}

fn default_completion_token_correction() -> usize {
    DEFAULT_COMPLETION_TOKEN_CORRECTION
}

fn default_chars_per_token() -> usize {
    DEFAULT_CHARS_PER_TOKEN
}
