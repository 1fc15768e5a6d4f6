//! Token counting implementation

use super::remote::RemoteCountStrategy;
use super::types::ChatMessage;
use crate::config::Config;
use crate::utils::ai::encoding::{Encoding, EncodingResolver};
use crate::utils::ai::models::family::REPLY_PRIMER_TOKENS;
use crate::utils::ai::models::{MessageOverhead, ModelFamily, ModelUtils};
use crate::utils::error::{Result, TokenCostError};
use tracing::warn;

/// Token counter for plain text and chat transcripts
#[derive(Debug, Clone)]
pub struct TokenCounter {
    remote: RemoteCountStrategy,
}

impl TokenCounter {
    /// Create a new token counter
    pub fn new(remote: RemoteCountStrategy) -> Self {
        Self { remote }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let remote = RemoteCountStrategy::from_config(&config.anthropic, &config.counting)?;
        Ok(Self::new(remote))
    }

    pub fn remote_strategy(&self) -> &RemoteCountStrategy {
        &self.remote
    }

    /// Count the tokens of `text` under the encoding of `model`.
    ///
    /// Claude models cannot be counted locally; use
    /// [`count_message_tokens`](Self::count_message_tokens) for them.
    pub fn count_string_tokens(&self, text: &str, model: &str) -> Result<usize> {
        let model = ModelUtils::tokenizer_name(model);

        if ModelFamily::is_remote_counted(&model) {
            return Err(TokenCostError::unsupported(
                "Anthropic does not support this method. Please use the `count_message_tokens` function for the exact counts.",
            ));
        }

        let encoding = EncodingResolver::resolve(&model)?;
        Ok(encoding.count(text))
    }

    /// Count the tokens of a chat transcript, including chat format overhead
    pub async fn count_message_tokens(
        &self,
        messages: &[ChatMessage],
        model: &str,
    ) -> Result<usize> {
        let model = ModelUtils::pricing_key(model);

        match ModelFamily::classify(&model) {
            ModelFamily::RemoteCounted => Ok(self.remote.count(&model, messages).await),
            family => Self::count_local_message_tokens(messages, &model, family),
        }
    }

    fn count_local_message_tokens(
        messages: &[ChatMessage],
        model: &str,
        family: ModelFamily,
    ) -> Result<usize> {
        let (model, overhead) = match family {
            ModelFamily::Alias { snapshot } => {
                warn!(
                    "{} may update over time. Returning num tokens assuming {}.",
                    model, snapshot
                );
                let overhead = ModelFamily::classify(snapshot)
                    .message_overhead()
                    .unwrap_or(MessageOverhead::CURRENT);
                (snapshot, overhead)
            }
            ModelFamily::Unknown => {
                warn!(
                    "Token counting not specifically implemented for model {}. Using default values.",
                    model
                );
                (model, MessageOverhead::CURRENT)
            }
            other => (
                model,
                other.message_overhead().unwrap_or(MessageOverhead::CURRENT),
            ),
        };

        let encoding = EncodingResolver::resolve(model)?;
        Ok(Self::formatted_tokens(&encoding, messages, overhead))
    }

    /// Sum of per-message overhead, encoded field values, per-name overhead
    /// and the reply primer
    pub(super) fn formatted_tokens(
        encoding: &Encoding,
        messages: &[ChatMessage],
        overhead: MessageOverhead,
    ) -> usize {
        let mut total: i64 = 0;

        for message in messages {
            total += overhead.per_message;
            for (field, value) in message.fields() {
                total += encoding.count(value) as i64;
                if field == "name" {
                    total += overhead.per_name;
                }
            }
        }

        total += REPLY_PRIMER_TOKENS;
        usize::try_from(total).unwrap_or(0)
    }
}

impl Default for TokenCounter {
    fn default() -> Self {
        Self::new(RemoteCountStrategy::heuristic_only(Default::default()))
    }
}
