//! Token counting
//!
//! Local counting reproduces the chat prompt format overhead of each model
//! family; Claude models are counted by the provider with a character
//! heuristic as the fallback.

pub mod remote;
pub mod token_counter;
pub mod types;


pub use remote::{AnthropicTokenCounter, CharHeuristic, RemoteCountStrategy, RemoteTokenCounter};
pub use token_counter::TokenCounter;
pub use types::ChatMessage;
