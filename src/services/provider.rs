//! Provider abstraction: a text model reached over the network.
//!
//! Handlers only see [`ChatProvider`], so the Gemini client can be swapped
//! for a stub in tests.

use async_trait::async_trait;
use thiserror::Error;

/// Any failure while talking to the provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Prompt blocked: {0}")]
    Blocked(String),

    #[error("Provider returned no text")]
    EmptyResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Generate the next model turn for `history`.
    async fn generate(&self, history: &[Turn]) -> Result<String, ProviderError>;

    /// Model identifier, for logs.
    fn model(&self) -> &str;
}

/// Start a conversation with no prior turns.
pub fn start_chat(provider: &dyn ChatProvider) -> ChatSession<'_> {
    ChatSession {
        provider,
        history: Vec::new(),
    }
}

/// A provider-side conversation. Lives for a single request.
pub struct ChatSession<'a> {
    provider: &'a dyn ChatProvider,
    history: Vec<Turn>,
}

impl ChatSession<'_> {
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Send a user turn and wait for the full reply.
    ///
    /// On failure the user turn stays in the history without a reply.
    pub async fn send_message(&mut self, text: &str) -> Result<String, ProviderError> {
        self.history.push(Turn {
            role: Role::User,
            text: text.to_string(),
        });

        let reply = self.provider.generate(&self.history).await?;

        self.history.push(Turn {
            role: Role::Model,
            text: reply.clone(),
        });
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder {
        seen: Mutex<Vec<Vec<Turn>>>,
        fail: bool,
    }

    #[async_trait]
    impl ChatProvider for Recorder {
        async fn generate(&self, history: &[Turn]) -> Result<String, ProviderError> {
            self.seen.lock().unwrap().push(history.to_vec());
            if self.fail {
                return Err(ProviderError::Network("down".into()));
            }
            Ok(format!("echo: {}", history.last().unwrap().text))
        }

        fn model(&self) -> &str {
            "recorder"
        }
    }

    #[tokio::test]
    async fn session_starts_empty_and_records_turns() {
        let provider = Recorder { seen: Mutex::new(Vec::new()), fail: false };
        let mut chat = start_chat(&provider);
        assert!(chat.history().is_empty());

        let reply = chat.send_message("Hello").await.unwrap();
        assert_eq!(reply, "echo: Hello");
        assert_eq!(chat.history().len(), 2);
        assert_eq!(chat.history()[1].role, Role::Model);

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], vec![Turn { role: Role::User, text: "Hello".into() }]);
    }

    #[tokio::test]
    async fn failed_send_keeps_only_user_turn() {
        let provider = Recorder { seen: Mutex::new(Vec::new()), fail: true };
        let mut chat = start_chat(&provider);
        let err = chat.send_message("Hello").await.unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
        assert_eq!(chat.history().len(), 1);
    }
}
