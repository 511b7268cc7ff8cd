//! OpenAI-compatible chat-completions client.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAiConfig::new(api_key).with_base_url("https://api.openai.com/v1");
//! let service = OpenAiCompletionService::new(config, "gpt-4o-mini");
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::ports::{CompletionError, CompletionRequest, CompletionResponse, CompletionService};

/// Configuration for the OpenAI-compatible provider.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Completion service backed by an OpenAI-compatible chat-completions
/// endpoint. One instance per model; the extraction and merge calls use
/// different models.
pub struct OpenAiCompletionService {
    config: OpenAiConfig,
    model: String,
    client: Client,
}

impl OpenAiCompletionService {
    /// Creates a new service for the given model.
    pub fn new(config: OpenAiConfig, model: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            model: model.into(),
            client,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn to_api_request(&self, request: &CompletionRequest) -> ApiRequest {
        ApiRequest {
            model: self.model.clone(),
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: request.system_prompt.clone(),
                },
                ApiMessage {
                    role: "user",
                    content: request.prompt.clone(),
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    async fn handle_error_status(&self, response: Response) -> CompletionError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => CompletionError::AuthenticationFailed,
            429 => CompletionError::RateLimited {
                retry_after_secs: parse_retry_after(&body),
            },
            400 => CompletionError::InvalidRequest(body),
            500..=599 => CompletionError::Unavailable(format!("server error {}: {}", status, body)),
            _ => CompletionError::Network(format!("unexpected status {}: {}", status, body)),
        }
    }
}

#[async_trait]
impl CompletionService for OpenAiCompletionService {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let api_request = self.to_api_request(&request);
        debug!(model = %self.model, prompt_chars = request.prompt.len(), "sending completion request");

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    CompletionError::Network(format!("connection failed: {}", e))
                } else {
                    CompletionError::Network(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(self.handle_error_status(response).await);
        }

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| CompletionError::MalformedResponse("no choices in response".to_string()))?;

        Ok(CompletionResponse {
            content,
            model: body.model.unwrap_or_else(|| self.model.clone()),
        })
    }
}

/// Pulls a "try again in Xs" hint out of a 429 body. Defaults to 30
/// seconds when the provider gives none.
fn parse_retry_after(body: &str) -> u32 {
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = parsed
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            if let Some(idx) = msg.find("try again in ") {
                let rest = &msg[idx + 13..];
                let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                if let Ok(secs) = digits.parse::<u32>() {
                    return secs;
                }
            }
        }
    }
    30
}

#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ApiMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    model: Option<String>,
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ApiChoiceMessage {
    content: String,
}
