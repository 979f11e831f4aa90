use crate::basic_types::PropagationStatusCP;
use crate::basic_types::Solution;
use crate::engine::propagation::PropagationContext;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::OffsetView;
use crate::engine::DomainStore;

/// Propagates `a != b`, where both sides may carry a constant offset.
#[derive(Clone, Debug)]
pub struct NotEqualPropagator {
    variables: [OffsetView; 2],
}

impl NotEqualPropagator {
    pub fn new(a: impl IntegerVariable, b: impl IntegerVariable) -> Self {
        NotEqualPropagator {
            variables: [a.view(), b.view()],
        }
    }

    pub(crate) fn variables(&self) -> &[OffsetView] {
        &self.variables
    }

    pub(crate) fn propagate(&self, context: &mut PropagationContext<'_>) -> PropagationStatusCP {
        let [a, b] = &self.variables;

        if context.upper_bound(a) < context.lower_bound(b)
            || context.upper_bound(b) < context.lower_bound(a)
        {
            return Ok(());
        }

        if let Some(value) = context.fixed_value(a) {
            context.remove(b, value)?;
        }

        if let Some(value) = context.fixed_value(b) {
            context.remove(a, value)?;
        }

        Ok(())
    }

    pub(crate) fn is_entailed(&self, store: &DomainStore) -> bool {
        let [a, b] = &self.variables;

        if a.upper_bound(store) < b.lower_bound(store) || b.upper_bound(store) < a.lower_bound(store)
        {
            return true;
        }

        a.fixed_value(store)
            .is_some_and(|value| !b.contains(store, value))
            || b.fixed_value(store)
                .is_some_and(|value| !a.contains(store, value))
    }

    pub(crate) fn is_satisfied(&self, solution: &Solution) -> bool {
        let [a, b] = &self.variables;
        solution.get_integer_value(*a) != solution.get_integer_value(*b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_solver::TestSolver;
    use crate::engine::variables::TransformableVariable;

    #[test]
    fn detects_conflict() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 0);
        let b = solver.new_variable(0, 0);

        let _ = solver
            .new_propagator(NotEqualPropagator::new(a, b))
            .expect_err("Expected conflict to be detected");
    }

    #[test]
    fn propagate_when_one_is_fixed() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 0);
        let b = solver.new_variable(0, 1);

        let _ = solver
            .new_propagator(NotEqualPropagator::new(a, b))
            .expect("Expected no conflict to be detected");

        solver.assert_bounds(b, 1, 1);
    }

    #[test]
    fn propagates_after_later_assignment() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 5);
        let b = solver.new_variable(0, 5);

        let _ = solver
            .new_propagator(NotEqualPropagator::new(a, b))
            .expect("Expected no conflict to be detected");
        solver.assert_bounds(b, 0, 5);

        solver.assign(a, 3).expect("Value is in the domain");
        assert!(!solver.propagate().is_failed());

        assert!(!solver.contains(b, 3));
        assert_eq!(5, solver.size(b));
    }

    #[test]
    fn offsets_are_taken_into_account() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(2, 2);
        let b = solver.new_variable(0, 5);

        // a + 1 != b + 2, so b != 1
        let _ = solver
            .new_propagator(NotEqualPropagator::new(a.offset(1), b.offset(2)))
            .expect("Expected no conflict to be detected");

        assert!(!solver.contains(b, 1));
        assert_eq!(5, solver.size(b));
    }

    #[test]
    fn non_overlapping_is_ok() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 5);
        let b = solver.new_variable(6, 10);

        let propagator = NotEqualPropagator::new(a, b);
        assert!(propagator.is_entailed(solver.store()));

        let _ = solver
            .new_propagator(propagator)
            .expect("Expected no conflict to be detected");

        solver.assert_bounds(a, 0, 5);
        solver.assert_bounds(b, 6, 10);
    }
}
