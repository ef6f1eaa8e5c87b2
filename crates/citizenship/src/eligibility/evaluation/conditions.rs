use super::super::domain::{AnswerSet, Condition, ConditionOperator, ConditionValue};

/// Evaluates one condition. An unanswered question never satisfies any operator.
pub fn evaluate_condition(condition: &Condition, answers: &AnswerSet) -> bool {
    let Some(answer) = answers.get(&condition.question_id) else {
        return false;
    };

    match (condition.operator, &condition.value) {
        (ConditionOperator::Equals, ConditionValue::One(value)) => answer == value,
        (ConditionOperator::NotEquals, ConditionValue::One(value)) => answer != value,
        // A value list on a scalar operator is a misconfigured condition and never passes.
        (ConditionOperator::Equals | ConditionOperator::NotEquals, ConditionValue::Many(_)) => {
            false
        }
        (ConditionOperator::In, value) => value.contains(answer),
        (ConditionOperator::NotIn, value) => !value.contains(answer),
    }
}

/// Conjunction of conditions; an empty list holds unconditionally.
pub fn evaluate_all(conditions: &[Condition], answers: &AnswerSet) -> bool {
    conditions
        .iter()
        .all(|condition| evaluate_condition(condition, answers))
}
