use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::gateway::error::GatewayError;
use crate::gateway::traits::{ChatGateway, CredentialStore};
use crate::models::ChatTurn;

/// Bounded request timeout: 30 seconds, with zero automatic retries.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Static gateway configuration; the gateway holds no other mutable state.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            temperature: 0.7,
            max_tokens: 250,
            stream: false,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions client for OpenAI-compatible endpoints
pub struct OpenAiGateway {
    client: Client,
    config: GatewayConfig,
    credentials: Arc<dyn CredentialStore>,
}

impl OpenAiGateway {
    pub fn new(config: GatewayConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            config: GatewayConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
            credentials,
        })
    }
}

#[async_trait]
impl ChatGateway for OpenAiGateway {
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, GatewayError> {
        if turns.is_empty() {
            warn!("complete() called with an empty turn list");
        }

        let body = ChatRequest {
            model: &self.config.model,
            messages: turns,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            stream: self.config.stream,
        };

        let url = format!("{}/chat/completions", self.config.base_url);
        info!(model = %self.config.model, turns = turns.len(), "Calling model endpoint");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.credentials.api_key())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Model request failed: {}", e);
                GatewayError::network(e)
            })?;

        let status = response.status();
        let text = response.text().await.map_err(GatewayError::network)?;

        if !status.is_success() {
            warn!(status = %status, "Model endpoint returned an error");
            return Err(GatewayError::from_status(status.as_u16(), &text));
        }

        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(GatewayError::undecodable)?;

        // No choices is a valid empty completion, not a failure.
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        debug!(bytes = content.len(), "Model completion received");
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedKey;

    impl CredentialStore for FixedKey {
        fn api_key(&self) -> String {
            "test-key".to_string()
        }
    }

    #[test]
    fn config_defaults_match_contract() {
        let config = GatewayConfig::new("https://api.openai.com/v1", "gpt-4o-mini");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_tokens, 250);
        assert!(!config.stream);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let gateway = OpenAiGateway::new(
            GatewayConfig::new("https://api.openai.com/v1/", "gpt-4o-mini"),
            Arc::new(FixedKey),
        )
        .unwrap();
        assert!(!gateway.config.base_url.ends_with('/'));
        assert_eq!(gateway.model_name(), "gpt-4o-mini");
    }

    #[test]
    fn empty_choices_decodes_to_empty_completion() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        assert_eq!(content, "");
    }

    #[test]
    fn completion_body_decodes() {
        let raw = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Solid deal."}, "finish_reason": "stop"}
            ]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Solid deal.")
        );
    }
}
