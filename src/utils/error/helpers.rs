//! Helper functions for creating specific error types

use super::types::TokenCostError;

impl TokenCostError {
    pub fn unknown_model<S: Into<String>>(model: S) -> Self {
        Self::UnknownModel(model.into())
    }

    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn unsupported<S: Into<String>>(message: S) -> Self {
        Self::UnsupportedOperation(message.into())
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn encoding<S: Into<String>>(message: S) -> Self {
        Self::Encoding(message.into())
    }

    /// Whether the failure came from infrastructure and may succeed on retry.
    ///
    /// Validation errors (`UnknownModel`, `InvalidArgument`, `UnsupportedOperation`)
    /// are never transient.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::HttpClient(_))
    }
}
