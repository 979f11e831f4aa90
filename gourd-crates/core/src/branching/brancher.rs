use crate::basic_types::Solution;
#[cfg(doc)]
use crate::branching::branchers::IndependentVariableValueBrancher;
use crate::branching::SelectionContext;
use crate::engine::predicate::Predicate;
use crate::engine::propagation::PropagatorId;

/// A trait for definining a branching strategy.
///
/// The search calls [`Brancher::next_decision`] at every stable node which is not assigned. Next
/// to that, the brancher is notified of the events of the search, which adaptive strategies (such
/// as accumulated failure counts) use to update their state.
///
/// See [`IndependentVariableValueBrancher`] for the default implementation.
pub trait Brancher {
    /// Returns the next decision, or `None` if every variable the brancher is responsible for is
    /// fixed.
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Predicate>;

    /// Called whenever the search enters a node.
    fn on_node(&mut self) {}

    /// Called when propagation fails, with the propagator that detected the failure if there is
    /// one.
    fn on_failure(&mut self, _failed_propagator: Option<PropagatorId>) {}

    /// Called when a solution is found.
    fn on_solution(&mut self, _solution: &Solution) {}
}

impl<T: Brancher + ?Sized> Brancher for Box<T> {
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Predicate> {
        (**self).next_decision(context)
    }

    fn on_node(&mut self) {
        (**self).on_node()
    }

    fn on_failure(&mut self, failed_propagator: Option<PropagatorId>) {
        (**self).on_failure(failed_propagator)
    }

    fn on_solution(&mut self, solution: &Solution) {
        (**self).on_solution(solution)
    }
}
