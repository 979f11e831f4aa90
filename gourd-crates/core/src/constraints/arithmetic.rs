use super::Constraint;
use crate::basic_types::ConstraintOperationError;
use crate::engine::variables::IntegerVariable;
use crate::propagators::NotEqualPropagator;
use crate::Solver;

/// Creates the [`Constraint`] `a != b`. Offsets are expressed through views, e.g.
/// `not_equals(a, b.offset(1))` for `a != b + 1`.
pub fn not_equals(a: impl IntegerVariable, b: impl IntegerVariable) -> impl Constraint {
    NotEqualPropagator::new(a, b)
}

/// Creates the [`Constraint`] `variable == value`. Posting fails if `value` is not in the current
/// domain of `variable`.
pub fn fixed<Var: IntegerVariable>(variable: Var, value: i32) -> impl Constraint {
    Fixed { variable, value }
}

struct Fixed<Var> {
    variable: Var,
    value: i32,
}

impl<Var: IntegerVariable> Constraint for Fixed<Var> {
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        solver.fix(self.variable, self.value)
    }
}
