//! Language model adapter for OpenAI-compatible chat completion endpoints
//! (OpenAI, OpenRouter, Ollama, vLLM, ...).

use crate::config::FileModelConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use squadron_application::{JSON_RESPONSE_MARKER, LanguageModel, ModelError};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiCompatibleModel {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiCompatibleModel {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ModelError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModelError::NotConfigured(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    /// Build from `[model]`, reading the API key from `api_key_env`.
    ///
    /// A missing key is not an error: local servers usually need none.
    pub fn from_config(config: &FileModelConfig) -> Result<Self, ModelError> {
        let api_key = std::env::var(&config.api_key_env).ok();
        if api_key.is_none() {
            debug!("{} not set; sending requests without a key", config.api_key_env);
        }
        Self::new(
            &config.base_url,
            &config.model,
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request<'a>(&'a self, prompt: &'a str, max_tokens: u32, temperature: f32) -> ChatRequest<'a> {
        // Routing prompts ask for a JSON object; let the server enforce it
        let response_format = prompt
            .trim_end()
            .ends_with(JSON_RESPONSE_MARKER)
            .then(|| json!({ "type": "json_object" }));

        ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
            temperature,
            response_format,
        }
    }
}

fn extract_content(body: &str) -> Result<String, ModelError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ModelError::InvalidResponse(format!("Malformed completion: {}", e)))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ModelError::InvalidResponse("Completion has no content".into()))
}

#[async_trait]
impl LanguageModel for OpenAiCompatibleModel {
    async fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ModelError> {
        let request = self.build_request(prompt, max_tokens, temperature);
        debug!(
            "POST {} (model {}, {} prompt chars)",
            self.endpoint(),
            self.model,
            prompt.len()
        );

        let mut builder = self.http_client.post(self.endpoint()).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ModelError::Timeout
            } else {
                ModelError::ConnectionError(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ModelError::Timeout
            } else {
                ModelError::ConnectionError(e.to_string())
            }
        })?;

        if !status.is_success() {
            return Err(ModelError::RequestFailed(format!(
                "{}: {}",
                status,
                squadron_domain::util::preview(&body, 200)
            )));
        }

        extract_content(&body)
    }
}
