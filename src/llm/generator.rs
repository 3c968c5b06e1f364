use async_trait::async_trait;
use thiserror::Error;

use crate::models::ChatMessage;

/// Failure of a text-generation call
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("text generation timed out")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("rate limited by text generation service")]
    RateLimited,
    #[error("invalid api key")]
    InvalidApiKey,
    #[error("json error: {0}")]
    Serde(String),
    #[error("missing api key: OPENAI_API_KEY environment variable not set")]
    MissingApiKey,
    #[error("text generation is not configured")]
    NotConfigured,
    #[error("text generation returned an empty response")]
    EmptyResponse,
    #[error("no numbered clauses found in rewrite response")]
    UnparseableResponse,
}

impl GenerationError {
    /// Returns true if the error is transient and the call may be repeated.
    pub fn should_retry(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout | Self::RateLimited => true,
            Self::Http { status, .. } => (500..=599).contains(status),
            _ => false,
        }
    }
}

/// Per-call generation settings
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    /// System prompt, sent ahead of the user prompt
    pub system: Option<String>,
    /// Sampling temperature (0-2, lower = more deterministic)
    pub temperature: f64,
    /// Maximum tokens in the response
    pub max_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            system: None,
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

/// A hosted text-generation capability.
///
/// The pipeline only depends on this trait, so stages can run against a
/// deterministic stub in tests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete a chat conversation and return the assistant text
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &GenerationOptions,
    ) -> Result<String, GenerationError>;

    /// Generate text for a single prompt, prefixed by `options.system` if set
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &options.system {
            messages.push(ChatMessage::system(system.as_str()));
        }
        messages.push(ChatMessage::user(prompt));

        self.complete(&messages, options).await
    }
}

/// Stand-in used when no API key is configured; every call fails
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

#[async_trait]
impl TextGenerator for Unconfigured {
    async fn complete(
        &self,
        _messages: &[ChatMessage],
        _options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        Err(GenerationError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::ScriptedGenerator;

    #[tokio::test]
    async fn test_unconfigured_always_fails() {
        let result = Unconfigured
            .generate("hello", &GenerationOptions::default())
            .await;
        assert!(matches!(result, Err(GenerationError::NotConfigured)));
    }

    #[test]
    fn test_should_retry() {
        assert!(GenerationError::Timeout.should_retry());
        assert!(GenerationError::RateLimited.should_retry());
        assert!(GenerationError::Transport("reset".to_string()).should_retry());
        assert!(
            GenerationError::Http {
                status: 503,
                body: String::new()
            }
            .should_retry()
        );
        assert!(
            !GenerationError::Http {
                status: 400,
                body: String::new()
            }
            .should_retry()
        );
        assert!(!GenerationError::InvalidApiKey.should_retry());
        assert!(!GenerationError::EmptyResponse.should_retry());
    }

    #[tokio::test]
    async fn test_generate_prepends_system_prompt() {
        let generator = ScriptedGenerator::new(vec![Ok("done".to_string())]);
        let options = GenerationOptions {
            system: Some("be brief".to_string()),
            ..Default::default()
        };

        let text = generator.generate("hello", &options).await.unwrap();
        assert_eq!(text, "done");

        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            vec![ChatMessage::system("be brief"), ChatMessage::user("hello")]
        );
    }

    #[tokio::test]
    async fn test_generate_without_system_prompt() {
        let generator = ScriptedGenerator::new(vec![Ok("done".to_string())]);

        generator
            .generate("hello", &GenerationOptions::default())
            .await
            .unwrap();

        assert_eq!(generator.calls()[0], vec![ChatMessage::user("hello")]);
    }
}
