use chrono::NaiveDate;

use crate::eligibility::domain::{
    AnswerKind, AnswerOption, AnswerSet, Branch, Condition, EligibilityStatus, FlowEntry, Outcome,
    Question, Rule, RuleDocument,
};
use crate::eligibility::registry::CountryRegistry;

pub(super) fn outcome(status: EligibilityStatus, explanation: &str) -> Outcome {
    Outcome {
        status,
        explanation: explanation.to_string(),
        reasoning: None,
        documents: Vec::new(),
        next_steps: Vec::new(),
        caveats: None,
    }
}

pub(super) fn question(id: &str, kind: AnswerKind) -> Question {
    let options = match kind {
        AnswerKind::Select => ["yes", "no", "unsure"]
            .iter()
            .map(|value| AnswerOption {
                value: value.to_string(),
                label: value.to_uppercase(),
                description: None,
            })
            .collect(),
        _ => Vec::new(),
    };

    Question {
        id: id.to_string(),
        text: format!("Question {id}?"),
        help_text: None,
        kind,
        options,
        required: true,
    }
}

pub(super) fn rule(id: &str, priority: i32, conditions: Vec<Condition>, result: Outcome) -> Rule {
    Rule {
        id: id.to_string(),
        conditions,
        result,
        priority,
    }
}

pub(super) fn branch(conditions: Vec<Condition>, next: Option<&str>) -> Branch {
    Branch {
        conditions,
        next_question_id: next.map(str::to_string),
    }
}

pub(super) fn flow(
    question_id: &str,
    branches: Vec<Branch>,
    default_next: Option<&str>,
) -> FlowEntry {
    FlowEntry {
        question_id: question_id.to_string(),
        branches,
        default_next: default_next.map(str::to_string),
    }
}

/// Boolean questions in document order, no flow table, no rules.
pub(super) fn linear_document(ids: &[&str]) -> RuleDocument {
    RuleDocument {
        country_code: "zz".to_string(),
        version: "0.1.0".to_string(),
        country_name: "Testland".to_string(),
        description: "Synthetic rules".to_string(),
        questions: ids
            .iter()
            .map(|id| question(id, AnswerKind::Boolean))
            .collect(),
        question_flow: Vec::new(),
        rules: Vec::new(),
        default_result: outcome(EligibilityStatus::NeedsInfo, "fallback"),
        last_updated: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
        sources: Vec::new(),
    }
}

pub(super) fn answers(pairs: &[(&str, &str)]) -> AnswerSet {
    pairs.iter().copied().collect()
}

pub(super) fn registry() -> CountryRegistry {
    CountryRegistry::builtin().expect("built-in rules load")
}

pub(super) fn jamaica() -> RuleDocument {
    registry().rules("jm").expect("jamaica rules registered").clone()
}
