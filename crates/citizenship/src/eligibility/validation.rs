use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::domain::{AnswerKind, AnswerSet, Condition, ConditionValue, RuleDocument};

/// Static problems detected in a rule document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentIssue {
    NoQuestions,
    DuplicateQuestionId { question_id: String },
    DuplicateRuleId { rule_id: String },
    DuplicateFlowEntry { question_id: String },
    FlowForUnknownQuestion { question_id: String },
    UnknownBranchTarget { from: String, target: String },
    UnknownConditionQuestion { location: String, question_id: String },
    ListValueForScalarOperator { location: String, question_id: String },
    SelectWithoutOptions { question_id: String },
}

impl DocumentIssue {
    /// Issues that make question lookups ambiguous or the wizard impossible to start.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DocumentIssue::NoQuestions | DocumentIssue::DuplicateQuestionId { .. }
        )
    }
}

impl fmt::Display for DocumentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentIssue::NoQuestions => write!(f, "document defines no questions"),
            DocumentIssue::DuplicateQuestionId { question_id } => {
                write!(f, "question id '{question_id}' is declared more than once")
            }
            DocumentIssue::DuplicateRuleId { rule_id } => {
                write!(f, "rule id '{rule_id}' is declared more than once")
            }
            DocumentIssue::DuplicateFlowEntry { question_id } => write!(
                f,
                "question '{question_id}' has more than one flow entry; the first one is used"
            ),
            DocumentIssue::FlowForUnknownQuestion { question_id } => {
                write!(f, "flow entry references unknown question '{question_id}'")
            }
            DocumentIssue::UnknownBranchTarget { from, target } => write!(
                f,
                "flow from '{from}' targets unknown question '{target}' and will end the wizard"
            ),
            DocumentIssue::UnknownConditionQuestion {
                location,
                question_id,
            } => write!(
                f,
                "{location}: condition references unknown question '{question_id}' and never matches"
            ),
            DocumentIssue::ListValueForScalarOperator {
                location,
                question_id,
            } => write!(
                f,
                "{location}: equals/not_equals on '{question_id}' given a value list never matches"
            ),
            DocumentIssue::SelectWithoutOptions { question_id } => {
                write!(f, "select question '{question_id}' has no options")
            }
        }
    }
}

/// Checks a rule document for configuration errors.
///
/// Dangling references are reported but tolerated at evaluation time, where
/// they resolve to "no match" or "end of wizard".
pub fn validate_document(document: &RuleDocument) -> Vec<DocumentIssue> {
    let mut issues = Vec::new();

    if document.questions.is_empty() {
        issues.push(DocumentIssue::NoQuestions);
    }

    let mut question_ids = HashSet::new();
    for question in &document.questions {
        if !question_ids.insert(question.id.as_str()) {
            issues.push(DocumentIssue::DuplicateQuestionId {
                question_id: question.id.clone(),
            });
        }
        if question.kind == AnswerKind::Select && question.options.is_empty() {
            issues.push(DocumentIssue::SelectWithoutOptions {
                question_id: question.id.clone(),
            });
        }
    }

    let mut flow_ids = HashSet::new();
    for entry in &document.question_flow {
        if !flow_ids.insert(entry.question_id.as_str()) {
            issues.push(DocumentIssue::DuplicateFlowEntry {
                question_id: entry.question_id.clone(),
            });
        }
        if !question_ids.contains(entry.question_id.as_str()) {
            issues.push(DocumentIssue::FlowForUnknownQuestion {
                question_id: entry.question_id.clone(),
            });
        }

        let location = format!("flow '{}'", entry.question_id);
        let targets = entry
            .branches
            .iter()
            .filter_map(|branch| branch.next_question_id.as_deref())
            .chain(entry.default_next.as_deref());
        for target in targets {
            if !question_ids.contains(target) {
                issues.push(DocumentIssue::UnknownBranchTarget {
                    from: entry.question_id.clone(),
                    target: target.to_string(),
                });
            }
        }
        for branch in &entry.branches {
            check_conditions(&branch.conditions, &location, &question_ids, &mut issues);
        }
    }

    let mut rule_ids = HashSet::new();
    for rule in &document.rules {
        if !rule_ids.insert(rule.id.as_str()) {
            issues.push(DocumentIssue::DuplicateRuleId {
                rule_id: rule.id.clone(),
            });
        }
        let location = format!("rule '{}'", rule.id);
        check_conditions(&rule.conditions, &location, &question_ids, &mut issues);
    }

    issues
}

fn check_conditions(
    conditions: &[Condition],
    location: &str,
    question_ids: &HashSet<&str>,
    issues: &mut Vec<DocumentIssue>,
) {
    for condition in conditions {
        if !question_ids.contains(condition.question_id.as_str()) {
            issues.push(DocumentIssue::UnknownConditionQuestion {
                location: location.to_string(),
                question_id: condition.question_id.clone(),
            });
        }
        if condition.operator.is_scalar() && matches!(condition.value, ConditionValue::Many(_)) {
            issues.push(DocumentIssue::ListValueForScalarOperator {
                location: location.to_string(),
                question_id: condition.question_id.clone(),
            });
        }
    }
}

/// Required questions on the visited path that still lack an answer.
pub fn validate_answers(
    document: &RuleDocument,
    answers: &AnswerSet,
    question_history: &[String],
) -> AnswerValidation {
    let missing_questions: Vec<String> = question_history
        .iter()
        .filter(|id| {
            document
                .question(id)
                .map(|question| question.required)
                .unwrap_or(false)
        })
        .filter(|id| answers.get(id).map_or(true, str::is_empty))
        .cloned()
        .collect();

    AnswerValidation {
        valid: missing_questions.is_empty(),
        missing_questions,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerValidation {
    pub valid: bool,
    pub missing_questions: Vec<String>,
}
