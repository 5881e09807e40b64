// AI implementation using an OpenAI-compatible chat-completions endpoint
//
// This is the infrastructure implementation of BaseAI.
// Business logic (what to prompt for) lives in domain layers.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{OpenAIClient, StructuredRequest};

use super::BaseAI;

/// Hosted-model implementation of AI capabilities
#[derive(Clone)]
pub struct HostedModel {
    client: OpenAIClient,
    model: String,
}

impl HostedModel {
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl BaseAI for HostedModel {
    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema: serde_json::Value,
        temperature: f32,
    ) -> Result<String> {
        let request = StructuredRequest::new(&self.model, system_prompt, user_prompt, schema)
            .json_object_mode()
            .temperature(temperature);

        Ok(self.client.structured_output(request).await?)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_configured_model() {
        let model = HostedModel::new(
            OpenAIClient::new("fw-test"),
            "accounts/fireworks/models/mixtral-8x7b-instruct",
        );
        assert_eq!(
            model.model(),
            "accounts/fireworks/models/mixtral-8x7b-instruct"
        );
    }
}
