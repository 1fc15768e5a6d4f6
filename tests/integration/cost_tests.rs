//! End-to-end cost calculation tests against the bundled price table

#[cfg(test)]
mod tests {
    use crate::common::MessageFactory;
    use tokencost::config::Config;
    use tokencost::{CostCalculator, Prompt, TokenCostError, TokenType, strip_ft_model_name};

    const PROMPT: &str = "What is the capital of France?";
    const COMPLETION: &str = "The capital of France is Paris.";

    fn calculator() -> CostCalculator {
        CostCalculator::new(&Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_gpt4_all_costs_and_tokens() {
        let calculator = calculator();
        let prompt = Prompt::from(PROMPT);

        let result = calculator
            .calculate_all_costs_and_tokens(&prompt, COMPLETION, "gpt-4")
            .await
            .unwrap();

        assert!(result.prompt_cost > 0.0);
        assert!(result.prompt_tokens > 0);
        assert!(result.completion_cost > 0.0);
        assert!(result.completion_tokens > 0);
        assert_eq!(
            result.prompt_cost,
            calculator.calculate_prompt_cost(&prompt, "gpt-4").await.unwrap()
        );
        assert_eq!(
            result.completion_cost,
            calculator
                .calculate_completion_cost(COMPLETION, "gpt-4")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_prompt_cost_is_tokens_times_rate() {
        let calculator = calculator();

        for model in ["gpt-4", "gpt-4o", "gpt-3.5-turbo", "gpt-4o-mini", "gpt-4-turbo"] {
            let cost = calculator
                .calculate_prompt_cost(&Prompt::from(PROMPT), model)
                .await
                .unwrap();
            let tokens = calculator.count_string_tokens(PROMPT, model).unwrap();
            let rate = calculator.token_costs()[model].input_cost_per_token.unwrap();

            assert!(cost > 0.0, "{}", model);
            assert_eq!(cost, tokens as f64 * rate, "{}", model);
        }
    }

    #[tokio::test]
    async fn test_message_prompt_cost() {
        let calculator = calculator();
        let messages = MessageFactory::named_conversation();

        let cost = calculator
            .calculate_prompt_cost(&Prompt::from(messages.clone()), "gpt-4o")
            .await
            .unwrap();
        let tokens = calculator
            .count_message_tokens(&messages, "gpt-4o")
            .await
            .unwrap();

        assert!(tokens >= 3 + 3 * messages.len());
        crate::assert_approx_eq!(
            cost,
            calculator
                .calculate_cost_by_tokens(tokens, "gpt-4o", TokenType::Input)
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_fine_tuned_model_priced_as_base() {
        let calculator = calculator();
        let model = "ft:gpt-3.5-turbo:my-org:custom_suffix:id";

        assert_eq!(strip_ft_model_name(model), "ft:gpt-3.5-turbo");
        let cost = calculator
            .calculate_completion_cost(COMPLETION, model)
            .await
            .unwrap();
        assert!(cost > 0.0);
    }

    #[tokio::test]
    async fn test_unknown_model() {
        let err = calculator()
            .calculate_prompt_cost(&Prompt::from("hi"), "not-a-real-model")
            .await
            .unwrap_err();

        assert!(matches!(err, TokenCostError::UnknownModel(_)));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_claude_without_api_key_uses_heuristic() {
        let calculator = calculator();

        // "Hi" -> 1, "Hello!" -> 2 - 13 clamped to 0
        let result = calculator
            .calculate_all_costs_and_tokens(&Prompt::from("Hi"), "Hello!", "claude-3-haiku-20240307")
            .await
            .unwrap();

        assert_eq!(result.prompt_tokens, 1);
        assert_eq!(result.completion_tokens, 0);
    }

    #[test]
    fn test_result_serializes_to_json() {
        let result = tokencost::TokenCostResult {
            prompt_cost: 0.5,
            prompt_tokens: 10,
            completion_cost: 0.25,
            completion_tokens: 5,
        };
        let value = serde_json::to_value(result).unwrap();
        assert_eq!(value["prompt_tokens"], 10);
        assert_eq!(value["completion_cost"], 0.25);
    }
}
