use super::super::domain::{AnswerSet, Rule};
use super::conditions::evaluate_all;

/// First rule, in ascending priority, whose conditions all hold.
///
/// The sort is stable so rules sharing a priority keep their declaration order.
pub(crate) fn find_matching_rule<'a>(rules: &'a [Rule], answers: &AnswerSet) -> Option<&'a Rule> {
    let mut ordered: Vec<&Rule> = rules.iter().collect();
    ordered.sort_by_key(|rule| rule.priority);

    ordered
        .into_iter()
        .find(|rule| evaluate_all(&rule.conditions, answers))
}
