//! Remote token counting integration tests

#[cfg(test)]
mod tests {
    use crate::common::{MessageFactory, TestCalculator};
    use serde_json::json;
    use tokencost::config::{AnthropicConfig, CountingConfig};
    use tokencost::utils::ai::counter::{AnthropicTokenCounter, RemoteCountStrategy};
    use tokencost::{ChatMessage, Prompt, RemoteTokenCounter, TokenCostError};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const COUNT_PATH: &str = "/v1/messages/count_tokens";
    const CLAUDE: &str = "claude-3-5-sonnet-20240620";

    async fn serve_count(input_tokens: u64) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COUNT_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "input_tokens": input_tokens })),
            )
            .mount(&server)
            .await;
        server
    }

    // ==================== Anthropic Client ====================

    #[tokio::test]
    async fn test_request_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COUNT_PATH))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_partial_json(json!({
                "model": CLAUDE,
                "messages": [
                    { "role": "user", "content": "You are a helpful assistant." },
                    { "role": "user", "content": "What is the capital of France?" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "input_tokens": 21 })))
            .expect(1)
            .mount(&server)
            .await;

        let counter =
            AnthropicTokenCounter::new(TestCalculator::anthropic_config(&server.uri())).unwrap();
        let tokens = counter
            .count_tokens(CLAUDE, &MessageFactory::conversation())
            .await
            .unwrap();

        assert_eq!(tokens, 21);
    }

    #[tokio::test]
    async fn test_client_requires_api_key() {
        let err = AnthropicTokenCounter::new(AnthropicConfig::default()).unwrap_err();
        assert!(matches!(err, TokenCostError::Config(_)));
    }

    #[tokio::test]
    async fn test_error_status_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COUNT_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid x-api-key"))
            .mount(&server)
            .await;

        let counter =
            AnthropicTokenCounter::new(TestCalculator::anthropic_config(&server.uri())).unwrap();
        let err = counter
            .count_tokens(CLAUDE, &[ChatMessage::user("hi")])
            .await
            .unwrap_err();

        assert!(matches!(err, TokenCostError::Network(ref msg) if msg.contains("401")));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parsing_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COUNT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tokens": 3 })))
            .mount(&server)
            .await;

        let counter =
            AnthropicTokenCounter::new(TestCalculator::anthropic_config(&server.uri())).unwrap();
        let err = counter
            .count_tokens(CLAUDE, &[ChatMessage::user("hi")])
            .await
            .unwrap_err();

        assert!(matches!(err, TokenCostError::Parsing(_)));
    }

    // ==================== Strategy ====================

    #[tokio::test]
    async fn test_server_error_falls_back_to_heuristic() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COUNT_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let strategy = RemoteCountStrategy::from_config(
            &TestCalculator::anthropic_config(&server.uri()),
            &CountingConfig::default(),
        )
        .unwrap();
        assert!(strategy.has_primary());

        // ceil(28 / 4) + ceil(30 / 4)
        let tokens = strategy.count(CLAUDE, &MessageFactory::conversation()).await;
        assert_eq!(tokens, 7 + 8);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_falls_back_to_heuristic() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let calculator = TestCalculator::with_anthropic(&uri);
        let tokens = calculator
            .count_message_tokens(&[ChatMessage::user("12345678")], CLAUDE)
            .await
            .unwrap();
        assert_eq!(tokens, 2);
    }

    // ==================== Through The Calculator ====================

    #[tokio::test]
    async fn test_message_count_uses_remote() {
        let server = serve_count(42).await;
        let calculator = TestCalculator::with_anthropic(&server.uri());

        let tokens = calculator
            .count_message_tokens(&MessageFactory::conversation(), "Claude-3-5-Sonnet-20240620")
            .await
            .unwrap();
        assert_eq!(tokens, 42);
    }

    #[tokio::test]
    async fn test_string_count_rejected_for_claude() {
        let server = serve_count(42).await;
        let calculator = TestCalculator::with_anthropic(&server.uri());

        let err = calculator.count_string_tokens("hello", CLAUDE).unwrap_err();
        assert!(matches!(err, TokenCostError::UnsupportedOperation(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_completion_tokens_subtract_correction() {
        let server = serve_count(30).await;
        let calculator = TestCalculator::with_anthropic(&server.uri());

        let result = calculator
            .calculate_all_costs_and_tokens(&Prompt::from("Hi"), "Hello there!", CLAUDE)
            .await
            .unwrap();

        assert_eq!(result.prompt_tokens, 30);
        assert_eq!(result.completion_tokens, 17);
        crate::assert_approx_eq!(result.completion_cost, 17.0 * 0.000015);
    }

    #[tokio::test]
    async fn test_completion_tokens_never_negative() {
        let server = serve_count(9).await;
        let calculator = TestCalculator::with_anthropic(&server.uri());

        let result = calculator
            .calculate_all_costs_and_tokens(&Prompt::from("Hi"), "Hey", CLAUDE)
            .await
            .unwrap();

        assert_eq!(result.completion_tokens, 0);
        assert_eq!(result.completion_cost, 0.0);
    }
}
