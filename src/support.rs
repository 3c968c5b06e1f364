//! Support chat: a thin pass-through to the text generator that never fails.

use tracing::warn;

use crate::llm::{GenerationOptions, SUPPORT_SYSTEM_PROMPT, TextGenerator};
use crate::models::{ChatMessage, ChatReply, ChatSource};

/// Reply used when the generator errors
pub const FALLBACK_REPLY: &str =
    "I'm sorry, I'm having trouble connecting right now. Please try again in a moment.";

/// Reply used when no generator is configured
pub const MOCK_REPLY: &str = "Thanks for your message! The assistant is running in demo mode, \
so I can't give a detailed answer right now. You can manage properties, tenants, and leases \
from the dashboard, and generate lease clauses from the Leases page.";

/// Answer a support conversation
///
/// The support system prompt is prepended unless the conversation already
/// carries a system message.
pub async fn respond(generator: Option<&dyn TextGenerator>, messages: &[ChatMessage]) -> ChatReply {
    let Some(generator) = generator else {
        return ChatReply {
            message: MOCK_REPLY.to_string(),
            source: ChatSource::Mock,
        };
    };

    let conversation = with_system_prompt(messages);
    let options = GenerationOptions {
        max_tokens: 500,
        ..Default::default()
    };

    match generator.complete(&conversation, &options).await {
        Ok(message) if !message.trim().is_empty() => ChatReply {
            message,
            source: ChatSource::OpenAi,
        },
        Ok(_) => {
            warn!("Support chat received an empty reply, using fallback");
            fallback()
        }
        Err(e) => {
            warn!("Support chat generation failed, using fallback: {}", e);
            fallback()
        }
    }
}

fn fallback() -> ChatReply {
    ChatReply {
        message: FALLBACK_REPLY.to_string(),
        source: ChatSource::Fallback,
    }
}

fn with_system_prompt(messages: &[ChatMessage]) -> Vec<ChatMessage> {
    if messages.iter().any(ChatMessage::is_system) {
        return messages.to_vec();
    }

    let mut conversation = Vec::with_capacity(messages.len() + 1);
    conversation.push(ChatMessage::system(SUPPORT_SYSTEM_PROMPT));
    conversation.extend_from_slice(messages);
    conversation
}
