use super::Constraint;
use crate::engine::variables::IntegerVariable;
use crate::propagators::CountPropagator;
use crate::propagators::CountRelation;

/// Creates the [`Constraint`] that exactly `count` of the `variables` take the value `value`.
pub fn count_equals<Var: IntegerVariable>(
    variables: impl IntoIterator<Item = Var>,
    value: i32,
    count: i32,
) -> impl Constraint {
    CountPropagator::new(variables, value, count, CountRelation::Equal)
}

/// Creates the [`Constraint`] that at most `count` of the `variables` take the value `value`.
pub fn count_at_most<Var: IntegerVariable>(
    variables: impl IntoIterator<Item = Var>,
    value: i32,
    count: i32,
) -> impl Constraint {
    CountPropagator::new(variables, value, count, CountRelation::AtMost)
}

/// Creates the [`Constraint`] that at least `count` of the `variables` take the value `value`.
pub fn count_at_least<Var: IntegerVariable>(
    variables: impl IntoIterator<Item = Var>,
    value: i32,
    count: i32,
) -> impl Constraint {
    CountPropagator::new(variables, value, count, CountRelation::AtLeast)
}
