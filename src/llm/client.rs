use std::time::Duration;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{GenerationError, GenerationOptions, TextGenerator};
use crate::models::ChatMessage;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for the OpenAI chat-completions client
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key (from OPENAI_API_KEY env var)
    pub api_key: String,
    /// Model to use (e.g., "gpt-4o-mini")
    pub model: String,
    /// API base URL, without the trailing `/chat/completions`
    pub base_url: String,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
    /// Retries on transient failures (transport, timeout, 429, 5xx)
    pub max_retries: usize,
}

impl OpenAiConfig {
    /// Create config from environment variables
    ///
    /// Reads `OPENAI_API_KEY` (required), `OPENAI_MODEL` and `OPENAI_BASE_URL`.
    pub fn from_env() -> Result<Self, GenerationError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(GenerationError::MissingApiKey)?;

        let mut config = Self::new(api_key);
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.model = model;
        }
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }
        Ok(config)
    }

    /// Create with default model and endpoint
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(60),
            max_retries: 2,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// OpenAI chat-completions client
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, GenerationError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("leasewise/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn send_request(&self, request: &CompletionRequest<'_>) -> Result<String, GenerationError> {
        let response = self
            .http
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        match response.status() {
            s if s.is_success() => {
                let body: CompletionResponse = response
                    .json()
                    .await
                    .map_err(|e| GenerationError::Serde(e.to_string()))?;
                body.into_text()
            }
            StatusCode::UNAUTHORIZED => Err(GenerationError::InvalidApiKey),
            StatusCode::TOO_MANY_REQUESTS => Err(GenerationError::RateLimited),
            s => {
                let status = s.as_u16();
                let body = response.text().await.unwrap_or_default();
                Err(GenerationError::Http { status, body })
            }
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        let request = CompletionRequest {
            model: &self.config.model,
            messages,
            temperature: Some(options.temperature),
            max_tokens: options.max_tokens,
        };

        debug!(
            "Sending {} messages to {} (max_tokens={})",
            messages.len(),
            self.config.model,
            options.max_tokens
        );

        (|| async { self.send_request(&request).await })
            .retry(
                ExponentialBuilder::default()
                    .with_min_delay(Duration::from_millis(500))
                    .with_max_delay(Duration::from_secs(10))
                    .with_max_times(self.config.max_retries)
                    .with_jitter(),
            )
            .when(|e: &GenerationError| e.should_retry())
            .notify(|e: &GenerationError, dur: Duration| {
                warn!(
                    "Completion call failed, retrying after {:.2}s: {}",
                    dur.as_secs_f64(),
                    e
                )
            })
            .await
    }
}

fn map_reqwest_error(e: reqwest::Error) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout
    } else {
        GenerationError::Transport(e.to_string())
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

impl CompletionResponse {
    /// Text of the first choice; blank or missing content is an error
    fn into_text(self) -> Result<String, GenerationError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = OpenAiConfig::new("sk-test".to_string());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_retries, 2);
        assert_eq!(
            config.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_completions_url_trims_slash() {
        let mut config = OpenAiConfig::new("sk-test".to_string());
        config.base_url = "http://localhost:8080/v1/".to_string();
        assert_eq!(
            config.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_serialization() {
        let messages = vec![ChatMessage::system("rules"), ChatMessage::user("hi")];
        let request = CompletionRequest {
            model: "gpt-4o-mini",
            messages: &messages,
            temperature: Some(0.2),
            max_tokens: 512,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hi");
        assert_eq!(value["max_tokens"], 512);
    }

    #[test]
    fn test_response_text_extraction() {
        let json = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "1. No pets."}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 4, "total_tokens": 14}
        }"#;

        let response: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_text().unwrap(), "1. No pets.");
    }

    #[test]
    fn test_response_without_content_is_empty() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let response: CompletionResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(
            response.into_text(),
            Err(GenerationError::EmptyResponse)
        ));

        let response: CompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            response.into_text(),
            Err(GenerationError::EmptyResponse)
        ));
    }
}
