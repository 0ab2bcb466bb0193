//! OpenAI-compatible chat completions client.
//!
//! Posts to `{base_url}/v1/chat/completions` with bearer auth. Any server
//! speaking the OpenAI wire format works by overriding the base URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::traits::CompletionProvider;
use crate::types::{ChatResponse, CompletionOptions, Message, Usage};
use crate::{EventsmithError, Result};

/// Default base URL for the OpenAI API
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the OpenAI chat completions endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    /// Create a client against the public OpenAI API.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom base URL and timeout (proxies, wiremock).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(EventsmithError::Configuration("OpenAI API key is empty".into()));
        }
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            EventsmithError::Configuration(format!("failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            api_key,
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn handle_response_errors(
        status: reqwest::StatusCode,
        headers: &reqwest::header::HeaderMap,
        body: &str,
    ) -> Result<()> {
        if status.is_success() {
            return Ok(());
        }

        match status.as_u16() {
            401 => Err(EventsmithError::AuthenticationFailed),
            429 => {
                let retry_after = headers
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs);
                Err(EventsmithError::RateLimited { retry_after })
            }
            code => {
                let message = serde_json::from_str::<ErrorEnvelope>(body)
                    .map(|e| e.error.message)
                    .unwrap_or_else(|_| format!("OpenAI API error: {status}"));
                Err(EventsmithError::Api {
                    status: code,
                    message,
                })
            }
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<ChatResponse> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                model: &options.model,
                messages,
                max_tokens: options.max_tokens,
                temperature: options.temperature,
                top_p: options.top_p,
                frequency_penalty: options.frequency_penalty,
                presence_penalty: options.presence_penalty,
            })
            .send()
            .await
            .map_err(|e| EventsmithError::Http(e.to_string()))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| EventsmithError::Http(e.to_string()))?;

        Self::handle_response_errors(status, &headers, &body)?;

        let parsed: CompletionResponse = serde_json::from_str(&body)?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(EventsmithError::EmptyResponse)?;

        Ok(ChatResponse {
            content: choice.message.content.unwrap_or_default(),
            usage: parsed.usage,
            model: parsed.model,
        })
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: usize,
    temperature: f32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
    model: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_rejected() {
        let err = OpenAiClient::new("  ").unwrap_err();
        assert!(matches!(err, EventsmithError::Configuration(_)));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client =
            OpenAiClient::with_base_url("sk-test", "http://localhost:9/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9");
    }

    #[test]
    fn debug_hides_api_key() {
        let client = OpenAiClient::new("sk-secret").unwrap();
        assert!(!format!("{client:?}").contains("sk-secret"));
    }

    #[test]
    fn request_serializes_openai_shape() {
        let messages = [Message::system("sys"), Message::user("hi")];
        let options = CompletionOptions::new("gpt-3.5-turbo", 64, 0.7);
        let req = CompletionRequest {
            model: &options.model,
            messages: &messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            top_p: options.top_p,
            frequency_penalty: options.frequency_penalty,
            presence_penalty: options.presence_penalty,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert_eq!(json["max_tokens"], 64);
    }

    #[test]
    fn error_body_message_is_surfaced() {
        let body = r#"{"error":{"message":"model overloaded","type":"server_error"}}"#;
        let err = OpenAiClient::handle_response_errors(
            reqwest::StatusCode::SERVICE_UNAVAILABLE,
            &reqwest::header::HeaderMap::new(),
            body,
        )
        .unwrap_err();
        match err {
            EventsmithError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "model overloaded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rate_limit_parses_retry_after() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("retry-after", "7".parse().unwrap());
        let err = OpenAiClient::handle_response_errors(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            &headers,
            "",
        )
        .unwrap_err();
        assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
    }
}
