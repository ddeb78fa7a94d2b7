use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::LlmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Interface for a stateless chat completion backend.
/// Nothing is remembered between calls; every request carries its full message list.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run a single completion and return the text of the first choice
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}
