use serde::{Deserialize, Serialize};

use super::domain::{AnswerSet, Outcome, Question, RuleDocument};
use super::evaluation::evaluate;
use super::flow::{next_question, FlowTarget};

/// Snapshot of one wizard session.
///
/// Transitions never mutate a snapshot in place; each returns a new value so
/// callers holding an earlier snapshot are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub country_code: String,
    pub current_question_index: usize,
    pub current_question_id: String,
    pub answers: AnswerSet,
    pub question_history: Vec<String>,
    /// Question answered by each `advance`, oldest first.
    #[serde(default)]
    pub answered_questions: Vec<String>,
    pub is_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Outcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    InProgress,
    Complete,
}

impl WizardState {
    pub fn phase(&self) -> WizardPhase {
        if self.is_complete {
            WizardPhase::Complete
        } else {
            WizardPhase::InProgress
        }
    }

    fn completed(
        &self,
        question_id: &str,
        answers: AnswerSet,
        answered_questions: Vec<String>,
        result: Outcome,
    ) -> Self {
        Self {
            current_question_id: question_id.to_string(),
            answers,
            answered_questions,
            is_complete: true,
            result: Some(result),
            ..self.clone()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("no questions defined for country: {country_code}")]
    NoQuestions { country_code: String },
}

/// Fresh state positioned on the first question in document order.
pub fn initialize(document: &RuleDocument) -> Result<WizardState, WizardError> {
    let first = document
        .first_question()
        .ok_or_else(|| WizardError::NoQuestions {
            country_code: document.country_code.clone(),
        })?;

    Ok(WizardState {
        country_code: document.country_code.clone(),
        current_question_index: 0,
        current_question_id: first.id.clone(),
        answers: AnswerSet::new(),
        question_history: vec![first.id.clone()],
        answered_questions: Vec::new(),
        is_complete: false,
        result: None,
    })
}

/// Records an answer and moves to the next question, or completes the wizard.
///
/// A `question_id` other than the current question is still recorded under its
/// own key and traversal continues from that question. Completed states are
/// returned unchanged.
pub fn advance(
    document: &RuleDocument,
    state: &WizardState,
    question_id: &str,
    value: &str,
) -> WizardState {
    if state.is_complete {
        return state.clone();
    }

    let answers = state.answers.with_answer(question_id, value);
    let mut answered_questions = state.answered_questions.clone();
    answered_questions.push(question_id.to_string());

    match next_question(document, question_id, &answers) {
        FlowTarget::EndOfWizard => {
            let result = evaluate(document, &answers);
            state.completed(question_id, answers, answered_questions, result)
        }
        FlowTarget::Question(next) => {
            let mut question_history = state.question_history.clone();
            question_history.push(next.id.clone());

            WizardState {
                country_code: state.country_code.clone(),
                current_question_index: state.current_question_index + 1,
                current_question_id: next.id.clone(),
                answers,
                question_history,
                answered_questions,
                is_complete: false,
                result: None,
            }
        }
    }
}

/// Undoes the most recent `advance`.
///
/// The answer given in that step is forgotten and the wizard returns to the
/// question it was on before it. The initial state is returned unchanged.
pub fn retreat(_document: &RuleDocument, state: &WizardState) -> WizardState {
    let mut answered_questions = state.answered_questions.clone();
    let Some(last_answered) = answered_questions.pop() else {
        return state.clone();
    };
    let mut answers = state.answers.clone();
    answers.remove(&last_answered);

    let mut question_history = state.question_history.clone();
    let mut current_question_index = state.current_question_index;
    // Completion leaves the history untouched.
    if !state.is_complete {
        question_history.pop();
        current_question_index = current_question_index.saturating_sub(1);
    }
    let Some(reopened) = question_history.last().cloned() else {
        return state.clone();
    };

    WizardState {
        country_code: state.country_code.clone(),
        current_question_index,
        current_question_id: reopened,
        answers,
        question_history,
        answered_questions,
        is_complete: false,
        result: None,
    }
}

/// Discards any progress and starts over.
pub fn restart(document: &RuleDocument) -> Result<WizardState, WizardError> {
    initialize(document)
}

pub fn current_question<'a>(
    document: &'a RuleDocument,
    state: &WizardState,
) -> Option<&'a Question> {
    document.question(&state.current_question_id)
}

/// The question one step back in the history, if any.
pub fn previous_question<'a>(
    document: &'a RuleDocument,
    state: &WizardState,
) -> Option<&'a Question> {
    let history = &state.question_history;
    if history.len() < 2 {
        return None;
    }
    document.question(&history[history.len() - 2])
}

/// Approximate completion percentage.
///
/// Branching can skip questions, so this is history length over the total
/// question count, capped at 99 until the wizard is complete.
pub fn progress_percent(document: &RuleDocument, state: &WizardState) -> u8 {
    if state.is_complete {
        return 100;
    }

    let total = document.questions.len();
    if total == 0 {
        return 0;
    }

    let visited = state.question_history.len();
    let rounded = (200 * visited + total) / (2 * total);
    rounded.min(99) as u8
}
