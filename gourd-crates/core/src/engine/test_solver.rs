//! A wrapper around a [`Space`] to set up propagator tests.

use crate::basic_types::EmptyDomain;
use crate::basic_types::PropagationStatus;
use crate::engine::propagation::PropagatorId;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::DomainStore;
use crate::engine::Space;
use crate::propagators::Propagator;

#[derive(Debug, Default)]
pub(crate) struct TestSolver {
    space: Space,
}

impl TestSolver {
    pub(crate) fn new_variable(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.space
            .new_variable(lower_bound, upper_bound)
            .expect("Test variables should have non-empty domains")
    }

    pub(crate) fn new_sparse_variable(&mut self, values: &[i32]) -> DomainId {
        self.space
            .new_sparse_variable(values)
            .expect("Test variables should have non-empty domains")
    }

    /// Adds the propagator and propagates to a fixpoint.
    pub(crate) fn new_propagator(
        &mut self,
        propagator: impl Into<Propagator>,
    ) -> Result<PropagatorId, EmptyDomain> {
        let propagator_id = self
            .space
            .add_propagator(propagator)
            .expect("Test propagators should refer to test variables");

        if self.space.propagate().is_failed() {
            Err(EmptyDomain)
        } else {
            Ok(propagator_id)
        }
    }

    pub(crate) fn propagate(&mut self) -> PropagationStatus {
        self.space.propagate()
    }

    /// Runs a single propagator once, outside of the propagation loop.
    pub(crate) fn propagate_once(&mut self, propagator: impl Into<Propagator>) -> PropagationStatus {
        propagator.into().propagate(self.space.domains_mut())
    }

    pub(crate) fn assign(&mut self, var: impl IntegerVariable, value: i32) -> Result<(), EmptyDomain> {
        let _ = var.assign(self.space.domains_mut(), value)?;
        Ok(())
    }

    pub(crate) fn set_upper_bound(
        &mut self,
        var: impl IntegerVariable,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        let _ = var.set_upper_bound(self.space.domains_mut(), bound)?;
        Ok(())
    }

    pub(crate) fn contains(&self, var: impl IntegerVariable, value: i32) -> bool {
        var.contains(self.space.domains(), value)
    }

    pub(crate) fn size(&self, var: impl IntegerVariable) -> usize {
        var.size(self.space.domains())
    }

    pub(crate) fn store(&self) -> &DomainStore {
        self.space.domains()
    }

    pub(crate) fn assert_bounds(&self, var: impl IntegerVariable, lower_bound: i32, upper_bound: i32) {
        let actual_lower_bound = var.lower_bound(self.space.domains());
        let actual_upper_bound = var.upper_bound(self.space.domains());
        assert_eq!(
            (lower_bound, upper_bound),
            (actual_lower_bound, actual_upper_bound),
            "The expected bounds [{lower_bound}..{upper_bound}] did not match the actual bounds [{actual_lower_bound}..{actual_upper_bound}]"
        );
    }
}
