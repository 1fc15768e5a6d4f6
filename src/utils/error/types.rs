//! Error types for tokencost

use thiserror::Error;

/// Result type alias for tokencost
pub type Result<T> = std::result::Result<T, TokenCostError>;

/// Main error type for tokencost
#[derive(Error, Debug)]
pub enum TokenCostError {
    /// Model is absent from the active price table
    #[error("Model {0} is not implemented. Double-check your spelling, or submit an issue/PR")]
    UnknownModel(String),

    /// Prompt or completion argument has the wrong shape
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation is not available for this model family
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Price feed or remote counting request failed
    #[error("Network error: {0}")]
    Network(String),

    /// Response or document could not be parsed
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tokenizer could not be loaded
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
