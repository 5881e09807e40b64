// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (what to prompt for, how to clean text) lives in domain layers.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BasePageFetcher)

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// AI Trait (Infrastructure - Generic LLM capabilities)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Generate structured output with a JSON schema
    /// Returns the raw JSON string the model produced; parse it in calling code
    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema: serde_json::Value,
        temperature: f32,
    ) -> Result<String>;

    /// Model identifier used for requests
    fn model(&self) -> &str;
}

// =============================================================================
// Page Fetcher Trait (Infrastructure - HTTP GET)
// =============================================================================

#[async_trait]
pub trait BasePageFetcher: Send + Sync {
    /// Fetch the body of a page as text
    /// Errors on network failure, timeout, or a non-2xx status
    async fn fetch(&self, url: &str) -> Result<String>;
}
