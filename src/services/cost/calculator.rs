//! Cost calculator implementation

use super::prompt::{Prompt, completion_from_json};
use super::types::TokenCostResult;
use crate::config::Config;
use crate::services::pricing::{PriceTable, PricingService, TokenType};
use crate::utils::ai::counter::{ChatMessage, TokenCounter};
use crate::utils::ai::models::{ModelFamily, ModelUtils};
use crate::utils::error::{Result, TokenCostError};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Periodic refresh task, aborted on drop
#[derive(Debug)]
struct RefreshTask(JoinHandle<()>);

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Token counting and pricing against an owned price table
///
/// Cloning is cheap; clones share the price table and the periodic refresh
/// task, which stops once the last clone is dropped.
#[derive(Debug, Clone)]
pub struct CostCalculator {
    pricing: Arc<PricingService>,
    counter: TokenCounter,
    /// Subtracted from remotely counted completions
    completion_token_correction: usize,
    refresh_task: Option<Arc<RefreshTask>>,
}

impl CostCalculator {
    /// Build a calculator from configuration.
    ///
    /// Starts the configured background refreshes when called inside a tokio
    /// runtime.
    pub fn new(config: &Config) -> Result<Self> {
        let pricing = Arc::new(PricingService::new(&config.pricing)?);
        let counter = TokenCounter::from_config(config)?;

        if config.pricing.refresh_on_startup && pricing.spawn_background_refresh().is_none() {
            debug!("No async runtime available, skipping startup price refresh");
        }

        let refresh_task = match config.pricing.refresh_interval {
            Some(seconds) if tokio::runtime::Handle::try_current().is_ok() => {
                let handle =
                    Arc::clone(&pricing).start_auto_refresh_task(Duration::from_secs(seconds));
                Some(Arc::new(RefreshTask(handle)))
            }
            Some(_) => {
                debug!("No async runtime available, skipping periodic price refresh");
                None
            }
            None => None,
        };

        let mut calculator = Self::with_components(
            pricing,
            counter,
            config.counting.completion_token_correction,
        );
        calculator.refresh_task = refresh_task;
        Ok(calculator)
    }

    /// Assemble a calculator from explicit parts
    pub fn with_components(
        pricing: Arc<PricingService>,
        counter: TokenCounter,
        completion_token_correction: usize,
    ) -> Self {
        Self {
            pricing,
            counter,
            completion_token_correction,
            refresh_task: None,
        }
    }

    /// Whether a periodic price refresh is running for this calculator
    pub fn has_refresh_task(&self) -> bool {
        self.refresh_task.is_some()
    }

    pub fn pricing(&self) -> &Arc<PricingService> {
        &self.pricing
    }

    pub fn counter(&self) -> &TokenCounter {
        &self.counter
    }

    /// Current price table snapshot
    pub fn token_costs(&self) -> Arc<PriceTable> {
        self.pricing.snapshot()
    }

    /// Bundled price table
    pub fn token_costs_static(&self) -> Arc<PriceTable> {
        self.pricing.static_table()
    }

    /// Fetch the remote feed and merge it into the current table
    pub async fn update_token_costs(&self) -> Result<usize> {
        self.pricing.refresh().await
    }

    /// Fetch the remote feed without merging it
    pub async fn fetch_costs(&self) -> Result<PriceTable> {
        self.pricing.fetch_costs().await
    }

    pub fn count_string_tokens(&self, text: &str, model: &str) -> Result<usize> {
        self.counter.count_string_tokens(text, model)
    }

    pub async fn count_message_tokens(
        &self,
        messages: &[ChatMessage],
        model: &str,
    ) -> Result<usize> {
        self.counter.count_message_tokens(messages, model).await
    }

    /// Cost in USD of `tokens` tokens of `model` at the selected rate
    pub fn calculate_cost_by_tokens(
        &self,
        tokens: usize,
        model: &str,
        token_type: TokenType,
    ) -> Result<f64> {
        let model = ModelUtils::normalize(model);
        let cost_per_token = self.cost_per_token(&model, token_type)?;
        Ok(cost_per_token * tokens as f64)
    }

    /// Cost in USD of a prompt
    pub async fn calculate_prompt_cost(&self, prompt: &Prompt, model: &str) -> Result<f64> {
        let model = ModelUtils::pricing_key(model);
        self.ensure_priced(&model)?;

        let tokens = self.prompt_tokens(prompt, &model).await?;
        self.calculate_cost_by_tokens(tokens, &model, TokenType::Input)
    }

    /// Cost in USD of a completion.
    ///
    /// The model is fine-tune stripped but not lower-cased before the
    /// price lookup.
    pub async fn calculate_completion_cost(&self, completion: &str, model: &str) -> Result<f64> {
        let model = ModelUtils::strip_ft_model_name(model);
        self.ensure_priced(&model)?;

        let tokens = self.completion_tokens(completion, &model).await?;
        self.calculate_cost_by_tokens(tokens, &model, TokenType::Output)
    }

    /// [`calculate_prompt_cost`](Self::calculate_prompt_cost) for an untyped
    /// JSON prompt. The model is checked before the prompt shape.
    pub async fn calculate_prompt_cost_value(&self, prompt: &Value, model: &str) -> Result<f64> {
        self.ensure_priced(&ModelUtils::pricing_key(model))?;
        let prompt = Prompt::try_from(prompt)?;
        self.calculate_prompt_cost(&prompt, model).await
    }

    /// [`calculate_completion_cost`](Self::calculate_completion_cost) for an
    /// untyped JSON completion. The model is checked before the completion shape.
    pub async fn calculate_completion_cost_value(
        &self,
        completion: &Value,
        model: &str,
    ) -> Result<f64> {
        self.ensure_priced(&ModelUtils::strip_ft_model_name(model))?;
        let completion = completion_from_json(completion)?;
        self.calculate_completion_cost(completion, model).await
    }

    /// Both costs and both token counts.
    ///
    /// Token counts are computed independently of the costs, and the four
    /// parts run concurrently.
    pub async fn calculate_all_costs_and_tokens(
        &self,
        prompt: &Prompt,
        completion: &str,
        model: &str,
    ) -> Result<TokenCostResult> {
        let prompt_model = ModelUtils::pricing_key(model);
        let completion_model = ModelUtils::strip_ft_model_name(model);

        let (prompt_cost, completion_cost, prompt_tokens, completion_tokens) = tokio::try_join!(
            self.calculate_prompt_cost(prompt, model),
            self.calculate_completion_cost(completion, model),
            self.prompt_tokens(prompt, &prompt_model),
            self.completion_tokens(completion, &completion_model),
        )?;

        Ok(TokenCostResult {
            prompt_cost,
            prompt_tokens,
            completion_cost,
            completion_tokens,
        })
    }

    async fn prompt_tokens(&self, prompt: &Prompt, model: &str) -> Result<usize> {
        match prompt {
            Prompt::Text(text) if !ModelFamily::is_remote_counted(model) => {
                self.counter.count_string_tokens(text, model)
            }
            _ => {
                self.counter
                    .count_message_tokens(&prompt.to_messages(), model)
                    .await
            }
        }
    }

    async fn completion_tokens(&self, completion: &str, model: &str) -> Result<usize> {
        if ModelFamily::is_remote_counted(model) {
            let counted = self
                .counter
                .count_message_tokens(&[ChatMessage::assistant(completion)], model)
                .await?;
            Ok(counted.saturating_sub(self.completion_token_correction))
        } else {
            self.counter.count_string_tokens(completion, model)
        }
    }

    fn ensure_priced(&self, model: &str) -> Result<()> {
        self.cost_per_token(model, TokenType::Input).map(|_| ())
    }

    /// Entries lacking the requested rate are treated as unknown models
    fn cost_per_token(&self, model: &str, token_type: TokenType) -> Result<f64> {
        self.pricing
            .snapshot()
            .get(model)
            .and_then(|info| info.cost_per_token(token_type))
            .ok_or_else(|| TokenCostError::unknown_model(model))
    }
}
