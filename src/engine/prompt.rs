//! Prompt construction for compliance classification.

/// Build the classification prompt from a policy excerpt and a draft.
///
/// The policy must already be truncated; the draft is included in full.
pub fn build_prompt(policy_excerpt: &str, draft: &str) -> String {
    format!(
        r#"You are a compliance assistant. Classify the draft as "Compliant" or "Non-Compliant" based on the policy.

Policy Context:
{policy_excerpt}

Draft:
{draft}

Respond with: "Compliant." or "Non-Compliant. Reason: [specific policy violated]"
Keep response concise."#
    )
}
