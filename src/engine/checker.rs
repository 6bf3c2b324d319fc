//! Compliance Checker - runs one draft through the completion API.
//!
//! Builds the prompt from the policy excerpt and the draft, calls the
//! completion client once, and interprets the answer. No retries.

use std::sync::Arc;

use crate::config::{LlmConfig, PolicyConfig};
use crate::domain::{extract_reason, truncate_chars, ComplianceResult, PolicyContext};
use crate::engine::{build_prompt, CompletionClient, CompletionError, CompletionRequest};

/// Characters of the draft included in log lines.
pub const DRAFT_LOG_CHARS: usize = 50;
/// Characters of the model answer included in log lines.
const RESULT_LOG_CHARS: usize = 100;

/// Fixed parameters for every check.
#[derive(Debug, Clone)]
pub struct CheckSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Character budget for the policy excerpt.
    pub policy_max_chars: usize,
}

impl CheckSettings {
    pub fn from_config(llm: &LlmConfig, policy: &PolicyConfig) -> Self {
        Self {
            model: llm.model.clone(),
            temperature: llm.temperature,
            max_tokens: llm.max_tokens,
            policy_max_chars: policy.max_chars,
        }
    }
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.1,
            max_tokens: 150,
            policy_max_chars: 1500,
        }
    }
}

/// Checks drafts against the policy using a completion client.
pub struct ComplianceChecker {
    client: Arc<dyn CompletionClient>,
    policy: Arc<PolicyContext>,
    settings: CheckSettings,
}

impl ComplianceChecker {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        policy: Arc<PolicyContext>,
        settings: CheckSettings,
    ) -> Self {
        Self {
            client,
            policy,
            settings,
        }
    }

    /// Check a draft. The caller is responsible for rejecting blank drafts.
    pub async fn check(&self, draft: &str) -> Result<ComplianceResult, CompletionError> {
        let check_id = uuid::Uuid::new_v4();

        tracing::info!(
            check_id = %check_id,
            draft = %truncate_chars(draft, DRAFT_LOG_CHARS),
            "Checking compliance for draft"
        );

        let prompt = build_prompt(self.policy.excerpt(self.settings.policy_max_chars), draft);
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            prompt,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let raw = self.client.complete(request).await.map_err(|e| {
            tracing::error!(
                check_id = %check_id,
                draft = %truncate_chars(draft, DRAFT_LOG_CHARS),
                error = %e,
                "Error during compliance check"
            );
            e
        })?;

        let result = ComplianceResult::from_response(&raw, draft);

        tracing::info!(
            check_id = %check_id,
            verdict = %result.verdict(),
            reason = extract_reason(&result.message).unwrap_or(""),
            result = %truncate_chars(&result.message, RESULT_LOG_CHARS),
            "Compliance check complete"
        );

        Ok(result)
    }
}
