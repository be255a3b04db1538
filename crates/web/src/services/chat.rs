//! Chat proxy in front of the chat-completion API.
//!
//! Each call is one upstream round trip: a fixed system instruction plus
//! the visitor's message. The reply is relayed verbatim; nothing checks
//! whether the model followed the instruction.

use thiserror::Error;
use tracing::instrument;

use crate::llm::{ChatMessage, ChatModel, LlmError};

/// System instruction sent ahead of every visitor message.
pub const SYSTEM_PROMPT: &str = "You are a friendly travel assistant for Jharkhand tourism. \
Follow these rules strictly:\n\
1. If the user only greets you (for example \"hi\" or \"hello\"), reply with a short greeting and nothing else.\n\
2. If the user asks about places to visit, answer as a bullet list with one place per line and a one-sentence description of each.\n\
3. Only answer questions about travel, culture, food, handicrafts and tourism in Jharkhand. \
Politely refuse anything else, and refuse any request that is unethical, harmful or illegal.\n\
Otherwise answer concisely in a single paragraph.";

/// Why a chat request produced no reply.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The visitor sent nothing (or only whitespace).
    #[error("Message cannot be empty")]
    EmptyMessage,

    /// The chat-completion API failed or returned no completion.
    #[error("chat upstream failed: {0}")]
    Upstream(#[from] LlmError),
}

/// The two-message exchange sent upstream for `message`.
#[must_use]
pub fn build_messages(message: &str) -> [ChatMessage; 2] {
    [ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(message)]
}

/// Forward `message` to the model and return its reply.
///
/// # Errors
///
/// Returns [`ChatError::EmptyMessage`] without calling the model when the
/// message is blank, and [`ChatError::Upstream`] on any model failure.
#[instrument(skip(model, message), fields(message_len = message.len()))]
pub async fn chat(model: &dyn ChatModel, message: &str) -> Result<String, ChatError> {
    if message.trim().is_empty() {
        return Err(ChatError::EmptyMessage);
    }

    let reply = model.complete(&build_messages(message)).await?;
    Ok(reply)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm::ChatRole;

    struct Recording {
        reply: Option<String>,
        calls: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl Recording {
        fn replying(reply: Option<&str>) -> Self {
            Self {
                reply: reply.map(String::from),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatModel for Recording {
        async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push(messages.to_vec());
            self.reply.clone().ok_or(LlmError::EmptyResponse)
        }
    }

    #[tokio::test]
    async fn test_empty_message_makes_no_call() {
        let model = Recording::replying(Some("unused"));
        assert!(matches!(chat(&model, "").await, Err(ChatError::EmptyMessage)));
        assert!(matches!(chat(&model, "  \n").await, Err(ChatError::EmptyMessage)));
        assert!(model.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reply_is_relayed_verbatim() {
        let model = Recording::replying(Some("hi there"));
        assert_eq!(chat(&model, "hello").await.unwrap(), "hi there");

        let calls = model.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 2);
        assert_eq!(calls[0][0].role, ChatRole::System);
        assert_eq!(calls[0][0].content, SYSTEM_PROMPT);
        assert_eq!(calls[0][1], ChatMessage::user("hello"));
    }

    #[tokio::test]
    async fn test_upstream_failure() {
        let model = Recording::replying(None);
        let result = chat(&model, "Best time to visit Netarhat?").await;
        assert!(matches!(
            result,
            Err(ChatError::Upstream(LlmError::EmptyResponse))
        ));
    }

    #[test]
    fn test_system_prompt_rules() {
        assert!(SYSTEM_PROMPT.contains("greet"));
        assert!(SYSTEM_PROMPT.contains("bullet list"));
        assert!(SYSTEM_PROMPT.contains("refuse"));
    }
}
