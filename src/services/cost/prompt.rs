//! Prompt and completion arguments

use crate::utils::ai::counter::ChatMessage;
use crate::utils::error::{Result, TokenCostError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A prompt: plain text or a chat transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prompt {
    Text(String),
    Messages(Vec<ChatMessage>),
}

impl Prompt {
    /// Messages to count when the prompt goes through message counting.
    ///
    /// Plain text becomes a single user message.
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        match self {
            Prompt::Text(text) => vec![ChatMessage::user(text.as_str())],
            Prompt::Messages(messages) => messages.clone(),
        }
    }
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Prompt::Text(text.to_string())
    }
}

impl From<String> for Prompt {
    fn from(text: String) -> Self {
        Prompt::Text(text)
    }
}

impl From<Vec<ChatMessage>> for Prompt {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Prompt::Messages(messages)
    }
}

impl From<&[ChatMessage]> for Prompt {
    fn from(messages: &[ChatMessage]) -> Self {
        Prompt::Messages(messages.to_vec())
    }
}

impl TryFrom<&Value> for Prompt {
    type Error = TokenCostError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(Prompt::Text(text.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    ChatMessage::deserialize(item).map_err(|e| {
                        TokenCostError::invalid_argument(format!(
                            "Prompt must be either a string or list of message objects but found an invalid message ({}) instead.",
                            e
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(Prompt::Messages),
            other => Err(TokenCostError::invalid_argument(format!(
                "Prompt must be either a string or list of message objects but found {} instead.",
                json_type_name(other)
            ))),
        }
    }
}

impl TryFrom<Value> for Prompt {
    type Error = TokenCostError;

    fn try_from(value: Value) -> Result<Self> {
        Prompt::try_from(&value)
    }
}

/// Borrow a completion from a JSON value, which must be a string
pub fn completion_from_json(value: &Value) -> Result<&str> {
    value.as_str().ok_or_else(|| {
        TokenCostError::invalid_argument(format!(
            "Completion must be a string but found {} instead.",
            json_type_name(value)
        ))
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
