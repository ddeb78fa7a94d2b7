use tracing::{error, info};

use crate::llm::{ChatMessage, CompletionClient};

pub const EMPTY_TRANSCRIPT_REPLY: &str = "Sorry, I didn't catch that.";
pub const MISSING_API_KEY_REPLY: &str = "OpenAI API key is not configured.";
pub const COMPLETION_FAILED_REPLY: &str = "I'm having trouble processing your request right now.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    EmptyTranscript,
    MissingApiKey,
    CompletionFailed,
}

/// Outcome of turning a caller's transcript into something to say back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Generated(String),
    Fallback(FallbackReason),
}

impl FallbackReason {
    pub fn phrase(self) -> &'static str {
        match self {
            FallbackReason::EmptyTranscript => EMPTY_TRANSCRIPT_REPLY,
            FallbackReason::MissingApiKey => MISSING_API_KEY_REPLY,
            FallbackReason::CompletionFailed => COMPLETION_FAILED_REPLY,
        }
    }
}

impl Reply {
    /// Text to speak; never empty
    pub fn text(&self) -> &str {
        match self {
            Reply::Generated(text) => text,
            Reply::Fallback(reason) => reason.phrase(),
        }
    }
}

/// Resolve the spoken reply for one transcription.
///
/// The completion call gets exactly two messages: the system prompt and the
/// transcript as the user turn, forwarded untouched. Errors are logged and
/// become a fallback.
pub async fn resolve_reply(
    llm: Option<&dyn CompletionClient>,
    system_prompt: &str,
    transcription: Option<&str>,
) -> Reply {
    let transcription = match transcription {
        Some(text) if !text.is_empty() => text,
        _ => return Reply::Fallback(FallbackReason::EmptyTranscript),
    };

    let Some(llm) = llm else {
        return Reply::Fallback(FallbackReason::MissingApiKey);
    };

    let messages = [
        ChatMessage::system(system_prompt),
        ChatMessage::user(transcription),
    ];

    match llm.complete(&messages).await {
        Ok(text) => {
            info!("Completion returned {} chars", text.len());
            Reply::Generated(text)
        }
        Err(e) => {
            error!("OpenAI API error: {}", e);
            Reply::Fallback(FallbackReason::CompletionFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmError, Role};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Recording {
        reply: Option<String>,
        seen: Mutex<Vec<ChatMessage>>,
    }

    impl Recording {
        fn answering(reply: Option<&str>) -> Self {
            Self {
                reply: reply.map(str::to_string),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for Recording {
        async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
            self.seen.lock().unwrap().extend_from_slice(messages);
            self.reply.clone().ok_or(LlmError::EmptyResponse)
        }
    }

    #[tokio::test]
    async fn missing_transcript_falls_back() {
        let llm = Recording::answering(Some("unused"));
        let reply = resolve_reply(Some(&llm), "sys", None).await;
        assert_eq!(reply, Reply::Fallback(FallbackReason::EmptyTranscript));
        assert_eq!(reply.text(), "Sorry, I didn't catch that.");
        assert!(llm.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_transcript_falls_back_before_key_check() {
        let reply = resolve_reply(None, "sys", Some("")).await;
        assert_eq!(reply.text(), EMPTY_TRANSCRIPT_REPLY);
    }

    #[tokio::test]
    async fn whitespace_transcript_still_reaches_completion() {
        let llm = Recording::answering(Some("Could you repeat that?"));
        let reply = resolve_reply(Some(&llm), "sys", Some("   ")).await;

        assert_eq!(reply, Reply::Generated("Could you repeat that?".to_string()));
        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].content, "   ");
    }

    #[tokio::test]
    async fn padded_transcript_is_forwarded_verbatim() {
        let llm = Recording::answering(Some("Sure."));
        resolve_reply(Some(&llm), "sys", Some("  hi there \n")).await;

        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen[1].role, Role::User);
        assert_eq!(seen[1].content, "  hi there \n");
    }

    #[tokio::test]
    async fn missing_client_falls_back() {
        let reply = resolve_reply(None, "sys", Some("hello")).await;
        assert_eq!(reply.text(), "OpenAI API key is not configured.");
    }

    #[tokio::test]
    async fn completion_error_falls_back() {
        let llm = Recording::answering(None);
        let reply = resolve_reply(Some(&llm), "sys", Some("hello")).await;
        assert_eq!(reply.text(), "I'm having trouble processing your request right now.");
    }

    #[tokio::test]
    async fn sends_system_then_user_turn() {
        let llm = Recording::answering(Some("Pizza is on aisle five."));
        let reply = resolve_reply(
            Some(&llm),
            "You are a helpful assistant.",
            Some("Where is pizza?"),
        )
        .await;

        assert_eq!(reply, Reply::Generated("Pizza is on aisle five.".to_string()));
        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].role, Role::System);
        assert_eq!(seen[0].content, "You are a helpful assistant.");
        assert_eq!(seen[1].role, Role::User);
        assert_eq!(seen[1].content, "Where is pizza?");
    }
}
