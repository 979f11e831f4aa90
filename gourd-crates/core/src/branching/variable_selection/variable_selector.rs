use crate::branching::SelectionContext;
use crate::engine::propagation::PropagatorId;

/// A trait containing the interface for [`VariableSelector`]s, specifying the hooks into the
/// search and the method for selecting variables.
pub trait VariableSelector<Var> {
    /// Determines which variable to select next if there are any left to branch on.
    /// Should only return [`None`] when all variables which have been passed to the
    /// [`VariableSelector`] are fixed. Otherwise it should return the variable to branch on next.
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var>;

    /// Called whenever the search enters a node.
    fn on_node(&mut self) {}

    /// Called when propagation fails, with the propagator that detected the failure.
    fn on_failure(&mut self, _failed_propagator: Option<PropagatorId>) {}
}

impl<Var, T: VariableSelector<Var> + ?Sized> VariableSelector<Var> for Box<T> {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var> {
        (**self).select_variable(context)
    }

    fn on_node(&mut self) {
        (**self).on_node()
    }

    fn on_failure(&mut self, failed_propagator: Option<PropagatorId>) {
        (**self).on_failure(failed_propagator)
    }
}
