//! Server dependencies (using traits for testability)
//!
//! This module provides the dependency container handed to the compliance
//! domain. All external services sit behind trait abstractions so tests can
//! swap them for in-memory doubles.

use anyhow::{Context, Result};
use openai_client::OpenAIClient;
use std::sync::Arc;

use crate::config::Config;
use crate::kernel::{BaseAI, BasePageFetcher, HostedModel, HttpPageFetcher};

/// Dependencies shared by every request. Built once at start-up; holds no
/// per-request state.
#[derive(Clone)]
pub struct ServerDeps {
    pub page_fetcher: Arc<dyn BasePageFetcher>,
    pub ai: Arc<dyn BaseAI>,
}

impl ServerDeps {
    pub fn new(page_fetcher: Arc<dyn BasePageFetcher>, ai: Arc<dyn BaseAI>) -> Self {
        Self { page_fetcher, ai }
    }

    /// Build the production dependencies from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let page_fetcher = HttpPageFetcher::new(config.fetch_timeout)?;

        let client = OpenAIClient::new(config.fireworks_api_key.clone())
            .with_base_url(config.fireworks_base_url.clone())
            .with_timeout(config.model_timeout)
            .context("Failed to create model client")?;

        Ok(Self::new(
            Arc::new(page_fetcher),
            Arc::new(HostedModel::new(client, config.model.clone())),
        ))
    }
}
