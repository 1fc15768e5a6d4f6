//! Token counter types

use serde::{Deserialize, Serialize};

/// One message of a chat transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role (system, user, assistant, ...)
    pub role: String,
    /// Message text
    pub content: String,
    /// Optional participant name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            name: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Present fields in wire order: role, content, then name
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [("role", self.role.as_str()), ("content", self.content.as_str())]
            .into_iter()
            .chain(self.name.as_deref().map(|name| ("name", name)))
    }
}
