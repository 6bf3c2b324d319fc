//! Compliance-check domain types.
//!
//! Represents the gateway's verdict for a submitted draft.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Marker the model uses for a passing draft.
const COMPLIANT_TAG: &str = "Compliant";
/// Marker the model uses for a failing draft.
const NON_COMPLIANT_TAG: &str = "Non-Compliant";

/// Classification derived from the model's free-text answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Compliant,
    NonCompliant,
}

impl Verdict {
    /// Interpret a model answer.
    ///
    /// Compliant iff the text mentions "Compliant" and never "Non-Compliant".
    /// Anything else, including answers with neither marker, is non-compliant.
    pub fn from_response(response: &str) -> Self {
        if response.contains(COMPLIANT_TAG) && !response.contains(NON_COMPLIANT_TAG) {
            Verdict::Compliant
        } else {
            Verdict::NonCompliant
        }
    }

    pub fn is_compliant(self) -> bool {
        matches!(self, Verdict::Compliant)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Compliant => write!(f, "compliant"),
            Verdict::NonCompliant => write!(f, "non_compliant"),
        }
    }
}

/// The "Reason: ..." clause of a non-compliant answer, if the model gave one.
pub fn extract_reason(response: &str) -> Option<&str> {
    let (_, reason) = response.split_once("Reason:")?;
    let reason = reason.trim();
    (!reason.is_empty()).then_some(reason)
}

/// Outcome of checking one draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ComplianceResult {
    /// Whether the draft passed.
    pub compliant: bool,
    /// The model's answer, trimmed.
    pub message: String,
    /// Character count of the submitted draft.
    pub draft_length: usize,
}

impl ComplianceResult {
    /// Build a result from a raw model answer and the draft it judged.
    pub fn from_response(raw: &str, draft: &str) -> Self {
        let message = raw.trim().to_string();
        let verdict = Verdict::from_response(&message);

        Self {
            compliant: verdict.is_compliant(),
            message,
            draft_length: draft.chars().count(),
        }
    }

    pub fn verdict(&self) -> Verdict {
        if self.compliant {
            Verdict::Compliant
        } else {
            Verdict::NonCompliant
        }
    }
}
