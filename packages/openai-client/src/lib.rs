//! Pure OpenAI-compatible REST API client
//!
//! A small client for chat-completions endpoints (OpenAI, Fireworks and other
//! compatible providers) with no domain-specific logic. Supports structured
//! outputs constrained by a JSON schema.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{OpenAIClient, StructuredRequest};
//! use std::time::Duration;
//!
//! let client = OpenAIClient::new(api_key)
//!     .with_base_url("https://api.fireworks.ai/inference/v1")
//!     .with_timeout(Duration::from_secs(120))?;
//!
//! let json = client
//!     .structured_output(
//!         StructuredRequest::new(model, system_prompt, user_prompt, schema).json_object_mode(),
//!     )
//!     .await?;
//! ```
//!
//! # Type-Safe Structured Output
//!
//! ```rust,ignore
//! #[derive(Deserialize, JsonSchema)]
//! struct Summary {
//!     headline: String,
//! }
//!
//! let summary: Summary = client.extract::<Summary>(model, system_prompt, user_prompt).await?;
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::{OpenAIError, Result};
pub use schema::StructuredOutput;
pub use types::*;

use std::time::{Duration, Instant};

use reqwest::{header, Client};
use tracing::{debug, warn};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI-compatible API client.
///
/// Holds no per-call state; clone it or share it behind an `Arc`.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl OpenAIClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Set a custom base URL (Fireworks, Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Bound every request made by this client.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OpenAIError::Config(format!("Failed to build HTTP client: {}", e)))?;
        self.timeout = Some(timeout);
        Ok(self)
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Type-safe structured output extraction.
    ///
    /// Generates a JSON schema from `T`, sends it with the prompts and
    /// deserializes the reply.
    pub async fn extract<T: StructuredOutput>(
        &self,
        model: &str,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Result<T> {
        let schema = T::openai_schema();
        debug!(type_name = T::type_name(), "Generated schema for extraction");

        let request = StructuredRequest::new(model, system_prompt, user_prompt, schema);
        let json_str = self.structured_output(request).await?;

        serde_json::from_str(strip_code_blocks(&json_str))
            .map_err(|e| OpenAIError::Parse(format!("Failed to deserialize response: {}", e)))
    }

    /// Structured output with a JSON schema.
    ///
    /// Returns the raw message content of the first choice; the caller parses it.
    pub async fn structured_output(&self, request: StructuredRequest) -> Result<String> {
        let start = Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Structured output API error");
            return Err(OpenAIError::Api(format!("{}: {}", status, error_text)));
        }

        let chat_response: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                model = %request.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Token usage"
            );
        }

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| OpenAIError::Api("No content in model response".into()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "Structured output completion"
        );

        Ok(content)
    }

    fn transport_error(&self, e: reqwest::Error) -> OpenAIError {
        warn!(error = %e, "Chat completion request failed");
        match self.timeout {
            Some(timeout) if e.is_timeout() => OpenAIError::Timeout(timeout),
            _ => OpenAIError::Network(e.to_string()),
        }
    }
}
