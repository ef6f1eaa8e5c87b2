//! Citizenship eligibility rules, question flow, and wizard state.
//!
//! Rule documents are plain data: the same engine serves every country. The
//! engine itself is pure; the registry, run repository, and service layer are
//! the collaborators a request layer talks to.

pub mod domain;
pub mod evaluation;
pub mod flow;
pub mod registry;
pub mod repository;
pub mod service;
pub mod validation;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use domain::{
    AnswerKind, AnswerOption, AnswerSet, Branch, Condition, ConditionOperator, ConditionValue,
    EligibilityStatus, FlowEntry, NextStep, Outcome, Question, RequiredDocument, Rule,
    RuleDocument,
};
pub use evaluation::{evaluate, evaluate_all, evaluate_condition, explain, Evaluation};
pub use flow::{is_complete, next_question, FlowTarget};
pub use registry::{
    load_document, parse_document, CountryMetadata, CountryRegistry, CountryStatus,
    RuleDocumentError,
};
pub use repository::{
    EligibilityRun, InMemoryRunRepository, RepositoryError, RunId, RunRepository, RunSummary,
    UserId,
};
pub use service::{
    EligibilityService, EvaluateResponse, SaveRunRequest, ServiceError, DEFAULT_HISTORY_LIMIT,
};
pub use validation::{validate_answers, validate_document, AnswerValidation, DocumentIssue};
pub use wizard::{
    advance, current_question, initialize, previous_question, progress_percent, restart, retreat,
    WizardError, WizardPhase, WizardState,
};
