use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Versioned rule set for one country's citizenship pathway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDocument {
    pub country_code: String,
    pub version: String,
    pub country_name: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub question_flow: Vec<FlowEntry>,
    #[serde(default)]
    pub rules: Vec<Rule>,
    pub default_result: Outcome,
    pub last_updated: NaiveDate,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

impl RuleDocument {
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn question_index(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|question| question.id == id)
    }

    pub fn first_question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// Flow entry for a question. The first entry wins when ids repeat.
    pub fn flow_for(&self, question_id: &str) -> Option<&FlowEntry> {
        self.question_flow
            .iter()
            .find(|entry| entry.question_id == question_id)
    }
}

/// Shape of the answer a question expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    Boolean,
    Select,
    Text,
}

impl AnswerKind {
    pub const fn label(self) -> &'static str {
        match self {
            AnswerKind::Boolean => "boolean",
            AnswerKind::Select => "select",
            AnswerKind::Text => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(rename = "type")]
    pub kind: AnswerKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<AnswerOption>,
    #[serde(default)]
    pub required: bool,
}

impl Question {
    /// Whether `value` is a well-formed answer for this question.
    pub fn accepts(&self, value: &str) -> bool {
        match self.kind {
            AnswerKind::Boolean => matches!(value, "true" | "false"),
            AnswerKind::Select => self.options.iter().any(|option| option.value == value),
            AnswerKind::Text => !value.trim().is_empty(),
        }
    }

    pub fn option(&self, value: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

/// Comparison applied by a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    In,
    NotIn,
}

impl ConditionOperator {
    /// Operators that compare against a single value.
    pub const fn is_scalar(self) -> bool {
        matches!(self, ConditionOperator::Equals | ConditionOperator::NotEquals)
    }
}

/// Right-hand side of a condition: one value or a set of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    One(String),
    Many(Vec<String>),
}

impl ConditionValue {
    /// Set membership, treating a single value as a singleton set.
    pub fn contains(&self, answer: &str) -> bool {
        match self {
            ConditionValue::One(value) => value == answer,
            ConditionValue::Many(values) => values.iter().any(|value| value == answer),
        }
    }
}

impl From<&str> for ConditionValue {
    fn from(value: &str) -> Self {
        ConditionValue::One(value.to_string())
    }
}

impl From<Vec<&str>> for ConditionValue {
    fn from(values: Vec<&str>) -> Self {
        ConditionValue::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// Atomic predicate over a single answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub question_id: String,
    pub operator: ConditionOperator,
    pub value: ConditionValue,
}

impl Condition {
    pub fn new(
        question_id: impl Into<String>,
        operator: ConditionOperator,
        value: impl Into<ConditionValue>,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn equals(question_id: impl Into<String>, value: &str) -> Self {
        Self::new(question_id, ConditionOperator::Equals, value)
    }
}

/// Prioritized conjunction of conditions mapped to an outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    pub result: Outcome,
    pub priority: i32,
}

/// Routing for a single question: first matching branch, else `default_next`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEntry {
    pub question_id: String,
    #[serde(default)]
    pub branches: Vec<Branch>,
    pub default_next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// `None` ends the wizard.
    pub next_question_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Eligible,
    NotEligible,
    NeedsInfo,
}

impl EligibilityStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EligibilityStatus::Eligible => "eligible",
            EligibilityStatus::NotEligible => "not_eligible",
            EligibilityStatus::NeedsInfo => "needs_info",
        }
    }
}

/// Terminal eligibility determination with supporting guidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub status: EligibilityStatus,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub documents: Vec<RequiredDocument>,
    #[serde(default)]
    pub next_steps: Vec<NextStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caveats: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredDocument {
    pub name: String,
    pub description: String,
    pub mandatory: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextStep {
    pub order: u32,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Answers keyed by question id. Re-answering a question overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, String>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.0.contains_key(question_id)
    }

    pub fn insert(&mut self, question_id: impl Into<String>, value: impl Into<String>) {
        self.0.insert(question_id.into(), value.into());
    }

    pub fn remove(&mut self, question_id: &str) -> Option<String> {
        self.0.remove(question_id)
    }

    /// Copy of this set with one answer recorded.
    pub fn with_answer(&self, question_id: &str, value: &str) -> Self {
        let mut next = self.clone();
        next.insert(question_id, value);
        next
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for AnswerSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
