use super::Constraint;
use crate::basic_types::ConstraintOperationError;
use crate::engine::variables::IntegerVariable;
use crate::propagators::AllDifferentConsistency;
use crate::propagators::AllDifferentPropagator;
use crate::Solver;

/// Creates the [`Constraint`] that enforces that all the given `variables` are distinct, at the
/// consistency configured in the [`crate::options::SolverOptions`] of the solver it is posted to.
pub fn all_different<Var: IntegerVariable>(
    variables: impl IntoIterator<Item = Var>,
) -> impl Constraint {
    AllDifferent {
        variables: variables.into_iter().collect(),
    }
}

/// Creates the [`Constraint`] that enforces that all the given `variables` are distinct, at the
/// given consistency.
pub fn all_different_with_consistency<Var: IntegerVariable>(
    variables: impl IntoIterator<Item = Var>,
    consistency: AllDifferentConsistency,
) -> impl Constraint {
    AllDifferentPropagator::new(variables, consistency)
}

struct AllDifferent<Var> {
    variables: Vec<Var>,
}

impl<Var: IntegerVariable> Constraint for AllDifferent<Var> {
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        let consistency = solver.all_different_consistency();
        AllDifferentPropagator::new(self.variables, consistency).post(solver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::search::SearchStatus;
    use crate::engine::termination::Indefinite;

    #[test]
    fn permutations_are_counted_at_every_consistency() {
        for consistency in [
            AllDifferentConsistency::Value,
            AllDifferentConsistency::Bounds,
            AllDifferentConsistency::Domain,
        ] {
            let mut solver = Solver::default();
            let variables = (0..4)
                .map(|_| solver.new_bounded_integer(1, 4).expect("non-empty domain"))
                .collect::<Vec<_>>();
            solver
                .add_constraint(all_different_with_consistency(variables, consistency))
                .post()
                .expect("variables exist");

            let mut brancher = solver.default_brancher();
            let (status, solutions) = solver.solutions(&mut brancher, &mut Indefinite, None);

            assert_eq!(status, SearchStatus::Exhausted);
            assert_eq!(solutions.len(), 24, "{consistency:?}");
        }
    }

    #[test]
    fn pigeonhole_is_unsatisfiable() {
        let mut solver = Solver::default();
        let variables = (0..3)
            .map(|_| solver.new_bounded_integer(1, 2).expect("non-empty domain"))
            .collect::<Vec<_>>();
        solver
            .add_constraint(all_different(variables))
            .post()
            .expect("posting does not propagate");

        let mut brancher = solver.default_brancher();
        let (status, solutions) = solver.solutions(&mut brancher, &mut Indefinite, None);

        assert_eq!(status, SearchStatus::Exhausted);
        assert!(solutions.is_empty());
    }
}
