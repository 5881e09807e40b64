// Test doubles for the kernel traits
//
// In-memory implementations that can be injected into ServerDeps for tests.
// Every double records the calls it receives.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{BaseAI, BasePageFetcher, ServerDeps};

// =============================================================================
// Mock Page Fetcher
// =============================================================================

#[derive(Debug, Clone)]
enum MockPage {
    Body(String),
    Status(u16),
    Timeout,
}

/// Page fetcher serving canned bodies keyed by URL
#[derive(Clone, Default)]
pub struct MockPageFetcher {
    pages: Arc<Mutex<HashMap<String, MockPage>>>,
    fetch_calls: Arc<Mutex<Vec<String>>>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`
    pub fn with_page(self, url: &str, html: &str) -> Self {
        self.insert(url, MockPage::Body(html.to_string()));
        self
    }

    /// Answer `url` with a non-2xx status
    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.insert(url, MockPage::Status(status));
        self
    }

    /// Make `url` time out
    pub fn with_timeout(self, url: &str) -> Self {
        self.insert(url, MockPage::Timeout);
        self
    }

    /// Get all URLs that were fetched
    pub fn fetch_calls(&self) -> Vec<String> {
        self.fetch_calls.lock().unwrap().clone()
    }

    /// Check if a URL was fetched
    pub fn was_fetched(&self, url: &str) -> bool {
        self.fetch_calls.lock().unwrap().iter().any(|u| u == url)
    }

    fn insert(&self, url: &str, page: MockPage) {
        self.pages.lock().unwrap().insert(url.to_string(), page);
    }
}

#[async_trait]
impl BasePageFetcher for MockPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.fetch_calls.lock().unwrap().push(url.to_string());

        let page = self.pages.lock().unwrap().get(url).cloned();
        match page {
            Some(MockPage::Body(html)) => Ok(html),
            Some(MockPage::Status(status)) => Err(anyhow!(
                "HTTP status client error ({}) for url ({})",
                status,
                url
            )),
            Some(MockPage::Timeout) => Err(anyhow!("operation timed out fetching {}", url)),
            None => Err(anyhow!("error sending request for url ({})", url)),
        }
    }
}

// =============================================================================
// Mock AI
// =============================================================================

/// Arguments captured from a generate_structured call
#[derive(Debug, Clone)]
pub struct StructuredCallArgs {
    pub system_prompt: String,
    pub user_prompt: String,
    pub schema: serde_json::Value,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
enum MockReply {
    Content(String),
    Failure(String),
    Panic(String),
}

/// AI double that replays queued replies in order
#[derive(Clone)]
pub struct MockAI {
    replies: Arc<Mutex<Vec<MockReply>>>,
    calls: Arc<Mutex<Vec<StructuredCallArgs>>>,
    model: String,
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            model: "mock-model".to_string(),
        }
    }

    /// Queue a raw reply (returned verbatim as message content)
    pub fn with_response(self, content: &str) -> Self {
        self.push(MockReply::Content(content.to_string()));
        self
    }

    /// Queue a JSON reply
    pub fn with_json(self, value: serde_json::Value) -> Self {
        self.push(MockReply::Content(value.to_string()));
        self
    }

    /// Queue a failed model call
    pub fn with_error(self, message: &str) -> Self {
        self.push(MockReply::Failure(message.to_string()));
        self
    }

    /// Queue a call that panics inside the handler
    pub fn with_panic(self, message: &str) -> Self {
        self.push(MockReply::Panic(message.to_string()));
        self
    }

    /// Get all calls with their arguments
    pub fn calls(&self) -> Vec<StructuredCallArgs> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn push(&self, reply: MockReply) {
        self.replies.lock().unwrap().push(reply);
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema: serde_json::Value,
        temperature: f32,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(StructuredCallArgs {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            schema,
            temperature,
        });

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                None
            } else {
                Some(replies.remove(0))
            }
        };

        match reply {
            Some(MockReply::Content(content)) => Ok(content),
            Some(MockReply::Failure(message)) => Err(anyhow!(message)),
            Some(MockReply::Panic(message)) => panic!("{}", message),
            None => Ok(
                r#"{"violations": [], "total_violations": 0, "summary": "No violations found."}"#
                    .to_string(),
            ),
        }
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Bundle of doubles plus the ServerDeps wired to them
#[derive(Clone)]
pub struct TestDependencies {
    pub page_fetcher: MockPageFetcher,
    pub ai: MockAI,
}

impl TestDependencies {
    pub fn new(page_fetcher: MockPageFetcher, ai: MockAI) -> Self {
        Self { page_fetcher, ai }
    }

    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(Arc::new(self.page_fetcher.clone()), Arc::new(self.ai.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_fetcher_records_calls() {
        let fetcher = MockPageFetcher::new()
            .with_page("https://example.com", "<p>hi</p>")
            .with_status("https://example.com/missing", 404);

        assert_eq!(fetcher.fetch("https://example.com").await.unwrap(), "<p>hi</p>");
        let err = fetcher.fetch("https://example.com/missing").await.unwrap_err();
        assert!(err.to_string().contains("404"));

        assert_eq!(
            fetcher.fetch_calls(),
            vec!["https://example.com", "https://example.com/missing"]
        );
        assert!(fetcher.was_fetched("https://example.com"));
        assert!(!fetcher.was_fetched("https://other.com"));
    }

    #[tokio::test]
    async fn test_mock_ai_replays_in_order() {
        let ai = MockAI::new().with_response("first").with_error("boom");

        let schema = serde_json::json!({});
        assert_eq!(
            ai.generate_structured("s", "u", schema.clone(), 0.2).await.unwrap(),
            "first"
        );
        assert!(ai.generate_structured("s", "u", schema, 0.2).await.is_err());
        assert_eq!(ai.call_count(), 2);
        assert_eq!(ai.calls()[0].user_prompt, "u");
    }
}
