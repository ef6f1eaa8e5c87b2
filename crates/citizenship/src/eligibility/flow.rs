use super::domain::{AnswerSet, Question, RuleDocument};
use super::evaluation::evaluate_all;

/// Where the wizard goes after a question has been answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowTarget<'a> {
    Question(&'a Question),
    EndOfWizard,
}

impl<'a> FlowTarget<'a> {
    pub fn question(self) -> Option<&'a Question> {
        match self {
            FlowTarget::Question(question) => Some(question),
            FlowTarget::EndOfWizard => None,
        }
    }

    pub fn is_end(self) -> bool {
        matches!(self, FlowTarget::EndOfWizard)
    }
}

/// Resolves the question that follows `current_question_id`.
///
/// Questions without a flow entry fall through to document order. Flow entries
/// use first-match branch semantics, then `default_next`. Targets that do not
/// name an existing question end the wizard.
pub fn next_question<'a>(
    document: &'a RuleDocument,
    current_question_id: &str,
    answers: &AnswerSet,
) -> FlowTarget<'a> {
    let Some(entry) = document.flow_for(current_question_id) else {
        return document
            .question_index(current_question_id)
            .and_then(|index| document.questions.get(index + 1))
            .map_or(FlowTarget::EndOfWizard, FlowTarget::Question);
    };

    let target = entry
        .branches
        .iter()
        .find(|branch| evaluate_all(&branch.conditions, answers))
        .map_or(entry.default_next.as_deref(), |branch| {
            branch.next_question_id.as_deref()
        });

    target
        .and_then(|id| document.question(id))
        .map_or(FlowTarget::EndOfWizard, FlowTarget::Question)
}

/// True when answering `current_question_id` leaves nothing further to ask.
pub fn is_complete(
    document: &RuleDocument,
    current_question_id: &str,
    answers: &AnswerSet,
) -> bool {
    next_question(document, current_question_id, answers).is_end()
}
