//! Price feed refresh integration tests

#[cfg(test)]
mod tests {
    use crate::common::fixtures::FEED_PATH;
    use crate::common::{PriceFeedFactory, TestCalculator};
    use std::io::Write;
    use tokencost::config::Config;
    use tokencost::{CostCalculator, TokenCostError, TokenType};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve_feed(status: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(FEED_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(PriceFeedFactory::feed()))
            .mount(&server)
            .await;
        server
    }

    // ==================== Successful Refresh ====================

    #[tokio::test]
    async fn test_refresh_merges_feed() {
        let server = serve_feed(200).await;
        let calculator = TestCalculator::with_feed(&server.uri());
        let static_len = calculator.token_costs_static().len();

        calculator.update_token_costs().await.unwrap();
        let current = calculator.token_costs();

        // Fetched entries overwrite, absent entries stay
        assert_eq!(current["gpt-4"].input_cost_per_token, Some(0.00004));
        assert!(current.contains_key("brand-new-model"));
        assert!(current.contains_key("gpt-3.5-turbo"));
        assert!(!current.contains_key("sample_spec"));
        assert!(current.len() >= static_len);

        // The static table is never modified
        assert_eq!(
            calculator.token_costs_static()["gpt-4"].input_cost_per_token,
            Some(0.00003)
        );
    }

    #[tokio::test]
    async fn test_refreshed_prices_apply_to_costs() {
        let server = serve_feed(200).await;
        let calculator = TestCalculator::with_feed(&server.uri());

        assert!(matches!(
            calculator.calculate_cost_by_tokens(10, "brand-new-model", TokenType::Input),
            Err(TokenCostError::UnknownModel(_))
        ));

        calculator.update_token_costs().await.unwrap();

        let cost = calculator
            .calculate_cost_by_tokens(1_000_000, "brand-new-model", TokenType::Output)
            .unwrap();
        crate::assert_approx_eq!(cost, 2.0);
    }

    #[tokio::test]
    async fn test_unpriced_feed_entry_is_unknown_model() {
        let server = serve_feed(200).await;
        let calculator = TestCalculator::with_feed(&server.uri());
        calculator.update_token_costs().await.unwrap();

        // Merged as-is, but it carries no per-token rates
        assert!(calculator.token_costs().contains_key("image-model"));
        assert!(matches!(
            calculator.calculate_cost_by_tokens(10, "image-model", TokenType::Input),
            Err(TokenCostError::UnknownModel(_))
        ));
    }

    #[tokio::test]
    async fn test_refresh_twice_is_idempotent() {
        let server = serve_feed(200).await;
        let calculator = TestCalculator::with_feed(&server.uri());

        calculator.update_token_costs().await.unwrap();
        let first = calculator.token_costs();
        calculator.update_token_costs().await.unwrap();
        let second = calculator.token_costs();

        assert_eq!(*first, *second);
    }

    #[tokio::test]
    async fn test_refresh_emits_event() {
        let server = serve_feed(200).await;
        let calculator = TestCalculator::with_feed(&server.uri());
        let mut events = calculator.pricing().subscribe_to_updates();

        let total = calculator.update_token_costs().await.unwrap();
        let event = events.recv().await.unwrap();

        assert_eq!(event.total_models, total);
        assert!(event.added >= 2);
        assert!(event.updated >= 1);
    }

    #[tokio::test]
    async fn test_fetch_costs_does_not_merge() {
        let server = serve_feed(200).await;
        let calculator = TestCalculator::with_feed(&server.uri());

        let fetched = calculator.fetch_costs().await.unwrap();
        assert!(fetched.contains_key("brand-new-model"));
        assert!(!fetched.contains_key("sample_spec"));
        assert!(!calculator.token_costs().contains_key("brand-new-model"));
    }

    // ==================== Failed Refresh ====================

    #[tokio::test]
    async fn test_non_success_status_leaves_table_unchanged() {
        let server = serve_feed(503).await;
        let calculator = TestCalculator::with_feed(&server.uri());
        let before = calculator.token_costs();

        let err = calculator.update_token_costs().await.unwrap_err();

        assert!(matches!(err, TokenCostError::Network(ref msg) if msg.contains("503")));
        assert!(err.is_transient());
        assert_eq!(*before, *calculator.token_costs());
        assert!(calculator.pricing().last_updated().is_none());
    }

    #[tokio::test]
    async fn test_malformed_feed_leaves_table_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(FEED_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let calculator = TestCalculator::with_feed(&server.uri());
        let before = calculator.token_costs();

        let err = calculator.update_token_costs().await.unwrap_err();
        assert!(matches!(err, TokenCostError::Parsing(_)));
        assert!(!err.is_transient());
        assert_eq!(*before, *calculator.token_costs());
    }

    #[tokio::test]
    async fn test_startup_refresh_failure_is_logged_not_raised() {
        let server = serve_feed(500).await;
        let mut config = Config {
            pricing: TestCalculator::pricing_config(&server.uri()),
            ..Default::default()
        };
        config.pricing.refresh_on_startup = true;

        let calculator = CostCalculator::new(&config).unwrap();
        let handle = calculator.pricing().spawn_background_refresh().unwrap();
        handle.await.unwrap();

        assert_eq!(
            calculator.token_costs()["gpt-4"].input_cost_per_token,
            Some(0.00003)
        );
    }

    // ==================== Local Feed ====================

    #[tokio::test]
    async fn test_refresh_from_config_file_and_local_feed() {
        let mut feed = tempfile::NamedTempFile::new().unwrap();
        write!(feed, "{}", PriceFeedFactory::feed()).unwrap();

        let mut config_file = tempfile::NamedTempFile::new().unwrap();
        write!(
            config_file,
            "pricing:\n  url: \"{}\"\ncounting:\n  chars_per_token: 4\n",
            feed.path().display()
        )
        .unwrap();

        let config = Config::from_file(config_file.path()).await.unwrap();
        assert!(!config.pricing.is_remote());

        let calculator = CostCalculator::new(&config).unwrap();
        calculator.update_token_costs().await.unwrap();
        assert!(calculator.token_costs().contains_key("brand-new-model"));
    }
}
