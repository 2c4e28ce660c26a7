use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::chat::ChatMessage;
use super::traits::ChatCompletionProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.studio.nebius.com/v1";
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Any endpoint speaking the OpenAI chat-completions protocol.
pub struct OpenAiCompatibleProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

impl OpenAiCompatibleProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_options(
            api_key,
            DEFAULT_BASE_URL.to_string(),
            DEFAULT_MODEL.to_string(),
            DEFAULT_TEMPERATURE,
        )
    }

    pub fn with_options(api_key: String, base_url: String, model: String, temperature: f32) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(60));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            temperature,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

// ── Chat-completions wire types ─────────────────────────────────────

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ChatCompletionProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        "OpenAI-compatible"
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage, CoreError> {
        let url = format!("{}/chat/completions", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                model: &self.model,
                temperature: self.temperature,
                messages,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CoreError::Api {
                provider: self.name().into(),
                message: format!("Completion request failed ({status}): {body}"),
            });
        }

        let parsed: CompletionResponse = resp.json().await.map_err(|e| CoreError::Api {
            provider: self.name().into(),
            message: format!("Failed to parse completion: {e}"),
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| CoreError::Api {
                provider: self.name().into(),
                message: "Completion returned no choices".into(),
            })
    }
}
