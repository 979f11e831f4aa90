mod bounds;
mod matching;

use std::fmt::Display;
use std::str::FromStr;

use crate::basic_types::ConfigurationError;
use crate::basic_types::EmptyDomain;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::Solution;
use crate::containers::HashSet;
use crate::engine::domains::DomainEvents;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::Priority;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::OffsetView;
use crate::engine::DomainStore;

/// The strength of the all-different propagation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AllDifferentConsistency {
    /// Removes the value of every fixed variable from the other variables, and fails when the
    /// variables together have fewer values than there are variables.
    Value,
    /// Additionally detects Hall intervals: `k` variables whose domains lie within an interval
    /// of `k` values. Those values are removed from the bounds of every other variable.
    Bounds,
    /// Removes every value which does not take part in any maximum matching between the
    /// variables and the values, which is the strongest pruning for the constraint.
    #[default]
    Domain,
}

impl AllDifferentConsistency {
    const NAMES: &'static str = "value, bounds, domain";
}

impl FromStr for AllDifferentConsistency {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "value" | "val" => Ok(AllDifferentConsistency::Value),
            "bounds" | "bnd" => Ok(AllDifferentConsistency::Bounds),
            "domain" | "dom" => Ok(AllDifferentConsistency::Domain),
            _ => Err(ConfigurationError::UnknownPolicy {
                kind: "all-different consistency",
                name: s.to_owned(),
                expected: Self::NAMES,
            }),
        }
    }
}

impl Display for AllDifferentConsistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllDifferentConsistency::Value => write!(f, "value"),
            AllDifferentConsistency::Bounds => write!(f, "bounds"),
            AllDifferentConsistency::Domain => write!(f, "domain"),
        }
    }
}

/// Propagates that all variables take pairwise distinct values.
#[derive(Clone, Debug)]
pub struct AllDifferentPropagator {
    variables: Box<[OffsetView]>,
    consistency: AllDifferentConsistency,
}

impl AllDifferentPropagator {
    pub fn new<Var: IntegerVariable>(
        variables: impl IntoIterator<Item = Var>,
        consistency: AllDifferentConsistency,
    ) -> Self {
        AllDifferentPropagator {
            variables: variables.into_iter().map(|var| var.view()).collect(),
            consistency,
        }
    }

    pub fn consistency(&self) -> AllDifferentConsistency {
        self.consistency
    }

    pub(crate) fn variables(&self) -> &[OffsetView] {
        &self.variables
    }

    pub(crate) fn priority(&self) -> Priority {
        match self.consistency {
            AllDifferentConsistency::Value => Priority::Medium,
            AllDifferentConsistency::Bounds => Priority::Low,
            AllDifferentConsistency::Domain => Priority::VeryLow,
        }
    }

    pub(crate) fn events(&self) -> DomainEvents {
        match self.consistency {
            AllDifferentConsistency::Bounds => DomainEvents::BOUNDS,
            AllDifferentConsistency::Value | AllDifferentConsistency::Domain => DomainEvents::ANY,
        }
    }

    pub(crate) fn propagate(&self, context: &mut PropagationContext<'_>) -> PropagationStatusCP {
        match self.consistency {
            AllDifferentConsistency::Value => {
                self.remove_fixed_values(context)?;
                self.check_pigeonhole(context)
            }
            AllDifferentConsistency::Bounds => loop {
                let num_changes = context.num_changes();
                self.remove_fixed_values(context)?;
                bounds::prune_hall_intervals(&self.variables, context)?;
                if context.num_changes() == num_changes {
                    return Ok(());
                }
            },
            AllDifferentConsistency::Domain => {
                self.remove_fixed_values(context)?;
                matching::prune_unmatchable_values(&self.variables, context)
            }
        }
    }

    /// Removes the value of every fixed variable from all other variables, until no new variable
    /// becomes fixed.
    fn remove_fixed_values(&self, context: &mut PropagationContext<'_>) -> PropagationStatusCP {
        let mut is_processed = vec![false; self.variables.len()];

        loop {
            let mut has_new_fixed = false;

            for index in 0..self.variables.len() {
                if is_processed[index] {
                    continue;
                }
                let Some(value) = context.fixed_value(&self.variables[index]) else {
                    continue;
                };

                is_processed[index] = true;
                has_new_fixed = true;

                for (other_index, other) in self.variables.iter().enumerate() {
                    if other_index != index {
                        context.remove(other, value)?;
                    }
                }
            }

            if !has_new_fixed {
                return Ok(());
            }
        }
    }

    fn check_pigeonhole(&self, context: &PropagationContext<'_>) -> PropagationStatusCP {
        let mut values: HashSet<i32> = HashSet::default();
        for var in self.variables.iter() {
            values.extend(context.iterate_domain(var));
            if values.len() >= self.variables.len() {
                return Ok(());
            }
        }

        if values.len() < self.variables.len() {
            Err(EmptyDomain)
        } else {
            Ok(())
        }
    }

    pub(crate) fn is_entailed(&self, store: &DomainStore) -> bool {
        self.variables.iter().all(|var| var.is_fixed(store))
    }

    pub(crate) fn is_satisfied(&self, solution: &Solution) -> bool {
        let mut seen: HashSet<i32> = HashSet::default();
        self.variables
            .iter()
            .all(|var| seen.insert(solution.get_integer_value(*var)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::PropagationStatus;
    use crate::engine::test_solver::TestSolver;
    use crate::engine::variables::TransformableVariable;

    const ALL_LEVELS: [AllDifferentConsistency; 3] = [
        AllDifferentConsistency::Value,
        AllDifferentConsistency::Bounds,
        AllDifferentConsistency::Domain,
    ];

    #[test]
    fn three_variables_with_two_values_fail() {
        for consistency in ALL_LEVELS {
            let mut solver = TestSolver::default();
            let x1 = solver.new_variable(1, 2);
            let x2 = solver.new_variable(1, 2);
            let x3 = solver.new_variable(1, 2);

            let _ = solver
                .new_propagator(AllDifferentPropagator::new([x1, x2, x3], consistency))
                .expect_err("Pigeonhole violation should be detected");
        }
    }

    #[test]
    fn fixed_values_are_removed_from_others() {
        for consistency in ALL_LEVELS {
            let mut solver = TestSolver::default();
            let x = solver.new_variable(1, 1);
            let y = solver.new_variable(1, 2);
            let z = solver.new_variable(1, 3);

            let _ = solver
                .new_propagator(AllDifferentPropagator::new([x, y, z], consistency))
                .expect("Expected no conflict");

            solver.assert_bounds(y, 2, 2);
            solver.assert_bounds(z, 3, 3);
        }
    }

    #[test]
    fn hall_interval_is_removed_from_other_bounds() {
        for consistency in [AllDifferentConsistency::Bounds, AllDifferentConsistency::Domain] {
            let mut solver = TestSolver::default();
            let x = solver.new_variable(1, 2);
            let y = solver.new_variable(1, 2);
            let z = solver.new_variable(1, 4);

            let _ = solver
                .new_propagator(AllDifferentPropagator::new([x, y, z], consistency))
                .expect("Expected no conflict");

            solver.assert_bounds(z, 3, 4);
        }
    }

    #[test]
    fn value_consistency_does_not_detect_hall_intervals() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 2);
        let y = solver.new_variable(1, 2);
        let z = solver.new_variable(1, 4);

        let _ = solver
            .new_propagator(AllDifferentPropagator::new(
                [x, y, z],
                AllDifferentConsistency::Value,
            ))
            .expect("Expected no conflict");

        solver.assert_bounds(z, 1, 4);
    }

    #[test]
    fn domain_consistency_removes_interior_values() {
        let mut solver = TestSolver::default();
        let x = solver.new_sparse_variable(&[1, 3]);
        let y = solver.new_sparse_variable(&[1, 3]);
        let z = solver.new_variable(1, 4);

        let _ = solver
            .new_propagator(AllDifferentPropagator::new(
                [x, y, z],
                AllDifferentConsistency::Domain,
            ))
            .expect("Expected no conflict");

        assert!(!solver.contains(z, 1));
        assert!(solver.contains(z, 2));
        assert!(!solver.contains(z, 3));
        assert!(solver.contains(z, 4));
    }

    #[test]
    fn offset_views_are_compared_by_their_values() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 0);
        let y = solver.new_variable(0, 2);

        // x + 1 and y are different, so y != 1
        let _ = solver
            .new_propagator(AllDifferentPropagator::new(
                [x.offset(1), y.offset(0)],
                AllDifferentConsistency::Value,
            ))
            .expect("Expected no conflict");

        assert!(!solver.contains(y, 1));
        assert_eq!(2, solver.size(y));
    }

    #[test]
    fn propagation_is_idempotent() {
        for consistency in ALL_LEVELS {
            let mut solver = TestSolver::default();
            let vars = (0..4)
                .map(|_| solver.new_variable(1, 5))
                .collect::<Vec<_>>();
            let propagator = AllDifferentPropagator::new(vars.clone(), consistency);

            let _ = solver
                .new_propagator(propagator.clone())
                .expect("Expected no conflict");
            solver.assign(vars[0], 1).expect("1 is in the domain");
            solver.set_upper_bound(vars[1], 2).expect("2 is in the domain");

            let first = solver.propagate_once(propagator.clone());
            let second = solver.propagate_once(propagator);

            assert_ne!(PropagationStatus::Failed, first);
            assert_eq!(PropagationStatus::NoChange, second);
        }
    }
}
