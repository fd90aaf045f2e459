//! Ticket classification service
//!
//! Asks the completion API to suggest a category and priority for a
//! free-text ticket description. Never fails outward: every error path
//! resolves to the fixed fallback `{general, medium}` so an LLM outage or
//! misconfiguration cannot block ticket intake.

pub mod error;
pub mod prompts;
pub mod sanitize;
pub mod validation;

pub use error::ClassifyError;

use crate::model::{ClassifierConfig, Suggestion};
use crate::service::llm::LlmClient;

/// Output-token ceiling for the reply; the JSON object needs far less
const MAX_COMPLETION_TOKENS: u32 = 64;

/// Service suggesting a category and priority for ticket descriptions
pub struct ClassificationService {
    llm: Option<LlmClient>,
}

impl ClassificationService {
    /// Create a classification service from configuration
    ///
    /// Without an API key the service still works, returning the fallback
    /// suggestion for every request.
    pub fn new(config: &ClassifierConfig) -> Self {
        let llm = LlmClient::from_config(config);

        match &llm {
            Some(client) => {
                tracing::info!(model = %client.model(), "Classification service initialized")
            }
            None => tracing::warn!(
                "No API credential configured, classification service running in fallback-only mode"
            ),
        }

        Self { llm }
    }

    /// Suggest a category and priority for a ticket description
    ///
    /// Always returns a fully-populated suggestion with both fields inside
    /// their enum sets; failures are logged and absorbed into the fallback.
    pub async fn classify(&self, description: &str) -> Suggestion {
        match self.try_classify(description).await {
            Ok(suggestion) => suggestion,
            Err(ClassifyError::MissingCredential) => {
                tracing::warn!("Skipping classification, no API credential configured");
                Suggestion::fallback()
            }
            Err(ClassifyError::Validation(payload)) => {
                tracing::warn!(payload = %payload, "Model returned out-of-range values");
                Suggestion::fallback()
            }
            Err(ClassifyError::Parse(e)) => {
                tracing::error!(error = %e, "Model reply was not valid JSON");
                Suggestion::fallback()
            }
            Err(ClassifyError::Api(e)) => {
                tracing::error!(error = %e, "Completion API call failed");
                Suggestion::fallback()
            }
        }
    }

    async fn try_classify(&self, description: &str) -> Result<Suggestion, ClassifyError> {
        let llm = self.llm.as_ref().ok_or(ClassifyError::MissingCredential)?;

        let prompt = prompts::build_classify_prompt(description);

        let start_time = std::time::Instant::now();
        let raw_reply = llm.complete(&prompt, MAX_COMPLETION_TOKENS).await?;

        tracing::debug!(
            model = %llm.model(),
            elapsed_ms = start_time.elapsed().as_millis(),
            reply_length = raw_reply.len(),
            "Completion API call finished"
        );

        let cleaned = sanitize::strip_code_fence(&raw_reply);
        validation::parse_suggestion(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Priority};

    fn unconfigured_service() -> ClassificationService {
        ClassificationService::new(&ClassifierConfig {
            api_key: None,
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
        })
    }

    #[tokio::test]
    async fn test_missing_credential_returns_fallback() {
        let service = unconfigured_service();
        let suggestion = service.classify("My invoice is wrong and I was double charged").await;
        assert_eq!(suggestion, Suggestion::fallback());
        assert_eq!(suggestion.category, Category::General);
        assert_eq!(suggestion.priority, Priority::Medium);
    }

    #[tokio::test]
    async fn test_missing_credential_is_deterministic() {
        let service = unconfigured_service();
        for description in ["", "short", "a much longer description of a server outage"] {
            assert_eq!(service.classify(description).await, Suggestion::fallback());
        }
    }
}
