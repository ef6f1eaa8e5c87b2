mod conditions;
mod rules;

pub use conditions::{evaluate_all, evaluate_condition};

use super::domain::{AnswerSet, Outcome, RuleDocument};
use serde::Serialize;

/// Resolves the outcome for a set of answers. Falls back to the document's
/// default result, so every answer combination produces an outcome.
pub fn evaluate(document: &RuleDocument, answers: &AnswerSet) -> Outcome {
    explain(document, answers).outcome
}

/// Outcome together with the id of the rule that produced it.
pub fn explain(document: &RuleDocument, answers: &AnswerSet) -> Evaluation {
    match rules::find_matching_rule(&document.rules, answers) {
        Some(rule) => Evaluation {
            matched_rule: Some(rule.id.clone()),
            outcome: rule.result.clone(),
        },
        None => Evaluation {
            matched_rule: None,
            outcome: document.default_result.clone(),
        },
    }
}

/// Evaluation trail so callers can audit which rule fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// `None` when the default result applied.
    pub matched_rule: Option<String>,
    pub outcome: Outcome,
}
