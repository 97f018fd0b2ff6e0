//! AI concierge boundary.
//!
//! The core never generates chat text itself: it supplies a persona profile
//! and conversation history to a [`ConciergeProvider`] and consumes a
//! free-text reply. Prompt construction lives here at the boundary, not in
//! the classifier or scorer.

pub mod gemini;
pub mod prompts;
pub mod routes;

pub use gemini::GeminiConcierge;

use async_trait::async_trait;

use crate::error::ConciergeError;
use crate::persona::model::PersonaProfile;

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        };
        write!(f, "{s}")
    }
}

/// A single chat turn.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A hosted generative-AI backend for the concierge chat.
#[async_trait]
pub trait ConciergeProvider: Send + Sync {
    /// Generate a reply to `message` given the user's persona and the
    /// conversation so far.
    async fn generate_reply(
        &self,
        message: &str,
        profile: &PersonaProfile,
        history: &[ChatMessage],
    ) -> Result<String, ConciergeError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
