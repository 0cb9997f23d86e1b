//! OpenAI-compatible fallback estimator.
//!
//! Asks a chat-completions endpoint for a single number when the MET catalog
//! has no match. Works with any OpenAI-compatible API (OpenAI, Ollama, vLLM).
//! Every failure is logged and reduced to `None`.

use async_trait::async_trait;
use calorie_core::config::FallbackConfig;
use calorie_core::{parse_fallback_calories, FallbackContext, FallbackEstimator};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// System message sent with every estimate request
const SYSTEM_PROMPT: &str =
    "You are a fitness expert that provides accurate calorie burn estimates. Always respond with only a number.";

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

// ============================================================================
// Provider
// ============================================================================

/// Fallback estimator backed by a chat-completions endpoint
#[derive(Clone, Debug)]
pub struct OpenAiFallback {
    base_url: String,
    model: String,
    api_key: SecretString,
    max_tokens: u32,
    temperature: f32,
    client: Client,
}

impl OpenAiFallback {
    /// Create a provider from config and an API key
    pub fn new(config: &FallbackConfig, api_key: SecretString) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            client,
        })
    }

    /// Build the provider when the fallback is enabled and a key is present
    ///
    /// Returns None (fallback disabled) otherwise.
    pub fn from_config(config: &FallbackConfig) -> Option<Self> {
        if !config.enabled {
            debug!("Fallback estimator disabled by configuration");
            return None;
        }

        let Some(key) = config.api_key() else {
            warn!(
                "{} is not set; fallback estimates are disabled",
                config.api_key_env
            );
            return None;
        };

        match Self::new(config, SecretString::new(key)) {
            Ok(provider) => Some(provider),
            Err(e) => {
                warn!("Failed to build fallback HTTP client: {}", e);
                None
            }
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Send one completion request and return the raw reply text
    async fn complete(&self, prompt: String) -> Result<Option<String>, reqwest::Error> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: SYSTEM_PROMPT.into(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response: ChatResponse = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content))
    }
}

#[async_trait]
impl FallbackEstimator for OpenAiFallback {
    async fn estimate(&self, context: &FallbackContext) -> Option<i64> {
        let reply = match self.complete(context.prompt()).await {
            Ok(Some(reply)) => reply,
            Ok(None) => {
                warn!("Fallback provider returned no content");
                return None;
            }
            Err(e) => {
                warn!("Fallback provider request failed: {}", e);
                return None;
            }
        };

        let calories = parse_fallback_calories(&reply);
        if calories.is_none() {
            warn!("Fallback provider reply was not a number: {:?}", reply.trim());
        } else {
            debug!("Fallback estimate for '{}': {:?}", context.activity_name, calories);
        }
        calories
    }
}
