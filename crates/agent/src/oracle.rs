//! HTTP client for an OpenAI-compatible chat-completions oracle.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use cardwise_core::config::OracleConfig;

use crate::llm::{LanguageOracle, OracleError};

/// Single-attempt client: the configured timeout bounds each call and there
/// are no retries. A failed call surfaces immediately so the caller can take
/// its fallback path.
pub struct OracleClient {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    model: String,
    temperature: f32,
    timeout_secs: u64,
}

impl OracleClient {
    pub fn from_config(config: &OracleConfig) -> Result<Self, OracleError> {
        let api_key = config.api_key.clone().ok_or(OracleError::Disabled)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| OracleError::Transport(error.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            timeout_secs: config.timeout_secs,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[async_trait]
impl LanguageOracle for OracleClient {
    async fn complete(&self, prompt: &str) -> Result<String, OracleError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|error| {
                if error.is_timeout() {
                    OracleError::Timeout { timeout_secs: self.timeout_secs }
                } else {
                    OracleError::Transport(error.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(OracleError::Status { status: status.as_u16(), detail });
        }

        let payload: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|error| OracleError::MalformedResponse(error.to_string()))?;

        payload
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| OracleError::MalformedResponse("no choices in completion".to_string()))
    }
}
