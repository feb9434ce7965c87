use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Default generation endpoint of a local Ollama instance
pub const DEFAULT_GENERATE_URL: &str = "http://localhost:11434/api/generate";

/// Maximum number of characters of a raw body quoted in errors and logs
const MAX_QUOTED_BODY_CHARS: usize = 500;

/// Ollama client for the `/api/generate` endpoint
#[derive(Debug, Clone)]
pub struct Ollama {
    /// Full URL of the generate endpoint, used verbatim
    endpoint: String,
    /// HTTP client for making requests
    client: Client,
}

/// Generate request for the Ollama API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    pub model: String,
    /// Prompt to generate from
    pub prompt: String,
    /// Whether to stream the response; always false here
    pub stream: bool,
}

impl GenerationRequest {
    /// Create a new non-streaming generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
        }
    }
}

/// Generation response from the Ollama API
///
/// Every field is optional. A body without `response` decodes to an empty
/// generated text; the remaining fields are only used for logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Generated text
    #[serde(default)]
    pub response: String,
    /// Model name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Whether the generation is complete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    /// Total duration of the request in nanoseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<u64>,
    /// Number of prompt tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    /// Number of generated tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
}

impl Ollama {
    /// Create a client for the default local endpoint
    pub fn new() -> Self {
        Self::from_url(DEFAULT_GENERATE_URL)
    }

    /// Create a client from a complete generate URL
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            endpoint: url.into(),
            client: Client::new(),
        }
    }

    /// The URL requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one generation request. No retries: the first failure is returned.
    pub async fn generate_raw(&self, request: &GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        debug!(
            "POST {} (model: {}, prompt: {} chars)",
            self.endpoint,
            request.model,
            request.prompt.chars().count()
        );

        let response = self.client.post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("{}: {}", self.endpoint, e)))?;

        let status = response.status();

        // Read the whole body before looking at the status so the connection
        // is released on every path
        let response_text = response.text().await
            .map_err(|e| ProviderError::Transport(format!("Failed to read response body: {}", e)))?;

        if status != StatusCode::OK {
            let message = quote_body(&response_text);
            error!("Generation endpoint error ({}): {}", status, message);
            return Err(ProviderError::UpstreamStatus {
                status_code: status.as_u16(),
                message,
            });
        }

        let generated: GenerationResponse = serde_json::from_str(&response_text)
            .map_err(|e| {
                error!("Failed to parse generation response: {}. Raw response: {}", e, quote_body(&response_text));
                ProviderError::Decode(e.to_string())
            })?;

        debug!(
            "Generation finished (model: {}, prompt tokens: {:?}, generated tokens: {:?}, total: {:?} ns)",
            generated.model.as_deref().unwrap_or("unknown"),
            generated.prompt_eval_count,
            generated.eval_count,
            generated.total_duration
        );

        Ok(generated)
    }
}

impl Default for Ollama {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for Ollama {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let request = GenerationRequest::new(model, prompt);
        let response = self.generate_raw(&request).await?;
        Ok(response.response)
    }
}

fn quote_body(body: &str) -> String {
    if body.chars().count() > MAX_QUOTED_BODY_CHARS {
        let mut quoted: String = body.chars().take(MAX_QUOTED_BODY_CHARS).collect();
        quoted.push_str("...");
        quoted
    } else {
        body.to_string()
    }
}
