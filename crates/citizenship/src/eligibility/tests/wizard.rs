use super::common::*;
use crate::eligibility::domain::{EligibilityStatus, RuleDocument};
use crate::eligibility::wizard::{
    advance, current_question, initialize, previous_question, progress_percent, restart, retreat,
    WizardError, WizardPhase, WizardState,
};

fn walk(document: &RuleDocument, steps: &[(&str, &str)]) -> Vec<WizardState> {
    let mut states = vec![initialize(document).expect("document has questions")];
    for (question_id, value) in steps {
        let last = states.last().expect("at least the initial state");
        let next = advance(document, last, question_id, value);
        states.push(next);
    }
    states
}

#[test]
fn initialize_starts_on_first_question() {
    let document = jamaica();
    let state = initialize(&document).expect("initial state");

    assert_eq!(state.country_code, "jm");
    assert_eq!(state.current_question_id, "born_in_jamaica");
    assert_eq!(state.current_question_index, 0);
    assert_eq!(state.question_history, vec!["born_in_jamaica".to_string()]);
    assert!(state.answers.is_empty());
    assert_eq!(state.phase(), WizardPhase::InProgress);
    assert!(state.result.is_none());
}

#[test]
fn initialize_rejects_document_without_questions() {
    let document = linear_document(&[]);

    match initialize(&document) {
        Err(WizardError::NoQuestions { country_code }) => assert_eq!(country_code, "zz"),
        other => panic!("expected no questions error, got {other:?}"),
    }
}

#[test]
fn born_in_jamaica_completes_after_one_answer() {
    let document = jamaica();
    let states = walk(&document, &[("born_in_jamaica", "true")]);
    let done = states.last().expect("final state");

    assert_eq!(done.phase(), WizardPhase::Complete);
    assert_eq!(done.current_question_index, 0);
    assert_eq!(done.question_history.len(), 1);
    let result = done.result.as_ref().expect("completed state carries a result");
    assert_eq!(result.status, EligibilityStatus::Eligible);
}

#[test]
fn parent_pathway_visits_documents_question_before_completing() {
    let document = jamaica();
    let states = walk(
        &document,
        &[
            ("born_in_jamaica", "false"),
            ("parent_jamaican_birth", "true"),
            ("parent_citizen_at_birth", "true"),
            ("birth_registered", "yes"),
            ("can_provide_documents", "true"),
        ],
    );

    let before_last = &states[states.len() - 2];
    assert_eq!(before_last.current_question_id, "can_provide_documents");
    assert!(!before_last.is_complete);

    let done = states.last().expect("final state");
    assert!(done.is_complete);
    assert_eq!(done.answers.len(), 5);
    assert_eq!(
        done.question_history,
        vec![
            "born_in_jamaica",
            "parent_jamaican_birth",
            "parent_citizen_at_birth",
            "birth_registered",
            "can_provide_documents",
        ]
    );
    let result = done.result.as_ref().expect("result");
    assert_eq!(result.status, EligibilityStatus::Eligible);
}

#[test]
fn no_lineage_is_not_eligible_after_three_answers() {
    let document = jamaica();
    let states = walk(
        &document,
        &[
            ("born_in_jamaica", "false"),
            ("parent_jamaican_birth", "false"),
            ("grandparent_jamaican_birth", "false"),
        ],
    );
    let done = states.last().expect("final state");

    assert!(done.is_complete);
    assert_eq!(done.current_question_index, 2);
    let result = done.result.as_ref().expect("result");
    assert_eq!(result.status, EligibilityStatus::NotEligible);
}

#[test]
fn grandparent_pathway_asks_about_parent_registration() {
    let document = jamaica();
    let states = walk(
        &document,
        &[
            ("born_in_jamaica", "false"),
            ("parent_jamaican_birth", "false"),
            ("grandparent_jamaican_birth", "true"),
        ],
    );
    let state = states.last().expect("final state");

    assert!(!state.is_complete);
    assert_eq!(state.current_question_id, "parent_registered");

    let unregistered = advance(&document, state, "parent_registered", "unsure");
    assert_eq!(unregistered.current_question_id, "birth_registered");
}

#[test]
fn advance_on_completed_state_is_a_no_op() {
    let document = jamaica();
    let states = walk(&document, &[("born_in_jamaica", "true")]);
    let done = states.last().expect("final state");

    let again = advance(&document, done, "parent_jamaican_birth", "true");

    assert_eq!(&again, done);
}

#[test]
fn advance_does_not_touch_the_previous_snapshot() {
    let document = jamaica();
    let start = initialize(&document).expect("initial state");
    let snapshot = start.clone();

    let _ = advance(&document, &start, "born_in_jamaica", "false");

    assert_eq!(start, snapshot);
}

#[test]
fn answer_for_other_question_is_recorded_and_flow_continues_from_it() {
    let document = jamaica();
    let start = initialize(&document).expect("initial state");

    let state = advance(&document, &start, "parent_jamaican_birth", "true");

    assert_eq!(state.answers.get("parent_jamaican_birth"), Some("true"));
    assert!(!state.answers.contains("born_in_jamaica"));
    assert_eq!(state.current_question_id, "parent_citizen_at_birth");
}

#[test]
fn retreat_forgets_answer_given_for_other_question() {
    let document = jamaica();
    let start = initialize(&document).expect("initial state");

    let next = advance(&document, &start, "parent_jamaican_birth", "true");
    let undone = retreat(&document, &next);

    assert_eq!(undone, start);
    assert!(!undone.answers.contains("parent_jamaican_birth"));
}

#[test]
fn completing_with_other_question_freezes_on_that_question() {
    let document = jamaica();
    let start = initialize(&document).expect("initial state");

    let done = advance(&document, &start, "can_provide_documents", "true");

    assert!(done.is_complete);
    assert_eq!(done.current_question_id, "can_provide_documents");
    assert_eq!(done.question_history, vec!["born_in_jamaica".to_string()]);

    let reopened = retreat(&document, &done);
    assert_eq!(reopened, start);
    assert_eq!(reopened.current_question_id, "born_in_jamaica");
}

#[test]
fn each_advance_records_the_answered_question() {
    let document = jamaica();
    let states = walk(
        &document,
        &[("born_in_jamaica", "false"), ("grandparent_jamaican_birth", "true")],
    );
    let last = states.last().expect("final state");

    assert_eq!(
        last.answered_questions,
        vec!["born_in_jamaica", "grandparent_jamaican_birth"]
    );
    assert_eq!(last.current_question_id, "parent_registered");
}

#[test]
fn retreat_undoes_each_advance() {
    let document = jamaica();
    let states = walk(
        &document,
        &[
            ("born_in_jamaica", "false"),
            ("parent_jamaican_birth", "false"),
            ("grandparent_jamaican_birth", "true"),
            ("parent_registered", "yes"),
        ],
    );

    for pair in states.windows(2) {
        assert_eq!(retreat(&document, &pair[1]), pair[0]);
    }
}

#[test]
fn retreat_reopens_completed_wizard() {
    let document = jamaica();
    let states = walk(
        &document,
        &[
            ("born_in_jamaica", "false"),
            ("parent_jamaican_birth", "false"),
            ("grandparent_jamaican_birth", "false"),
        ],
    );
    let done = &states[3];
    let reopened = retreat(&document, done);

    assert_eq!(reopened, states[2]);
    assert_eq!(reopened.current_question_id, "grandparent_jamaican_birth");
    assert!(reopened.result.is_none());
}

#[test]
fn retreat_after_single_answer_completion_restores_start() {
    let document = jamaica();
    let states = walk(&document, &[("born_in_jamaica", "true")]);

    assert_eq!(retreat(&document, &states[1]), states[0]);
}

#[test]
fn retreat_on_initial_state_is_a_no_op() {
    let document = jamaica();
    let start = initialize(&document).expect("initial state");

    assert_eq!(retreat(&document, &start), start);
}

#[test]
fn restart_matches_fresh_initialize() {
    let document = jamaica();
    let states = walk(
        &document,
        &[("born_in_jamaica", "false"), ("parent_jamaican_birth", "true")],
    );
    assert!(states.last().is_some_and(|state| !state.answers.is_empty()));

    let restarted = restart(&document).expect("restart");

    assert_eq!(restarted, initialize(&document).expect("initial state"));
}

#[test]
fn restart_is_idempotent() {
    let document = jamaica();

    let first = restart(&document).expect("restart");
    let second = restart(&document).expect("restart again");

    assert_eq!(first, second);
    assert!(first.answered_questions.is_empty());
}

#[test]
fn current_and_previous_questions_follow_history() {
    let document = jamaica();
    let states = walk(&document, &[("born_in_jamaica", "false")]);

    assert!(previous_question(&document, &states[0]).is_none());
    let current = current_question(&document, &states[1]).expect("current question");
    assert_eq!(current.id, "parent_jamaican_birth");
    let previous = previous_question(&document, &states[1]).expect("previous question");
    assert_eq!(previous.id, "born_in_jamaica");
}

#[test]
fn progress_rises_and_only_reaches_full_on_completion() {
    let document = jamaica();
    let states = walk(
        &document,
        &[
            ("born_in_jamaica", "false"),
            ("parent_jamaican_birth", "true"),
            ("parent_citizen_at_birth", "false"),
            ("birth_registered", "unsure"),
            ("can_provide_documents", "false"),
        ],
    );

    let percents: Vec<u8> = states
        .iter()
        .map(|state| progress_percent(&document, state))
        .collect();

    assert_eq!(percents[0], 14);
    assert!(percents.windows(2).all(|pair| pair[0] <= pair[1]));
    for (state, percent) in states.iter().zip(&percents) {
        if state.is_complete {
            assert_eq!(*percent, 100);
        } else {
            assert!(*percent < 100);
        }
    }
}

#[test]
fn progress_caps_below_full_while_in_progress() {
    let document = linear_document(&["a"]);
    let start = initialize(&document).expect("initial state");

    assert_eq!(progress_percent(&document, &start), 99);
}

#[test]
fn state_serializes_with_camel_case_keys() {
    let document = jamaica();
    let start = initialize(&document).expect("initial state");

    let value = serde_json::to_value(&start).expect("serialize");

    assert_eq!(value["currentQuestionId"], "born_in_jamaica");
    assert_eq!(value["isComplete"], false);
    assert!(value.get("result").is_none());
}
