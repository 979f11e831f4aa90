use crate::branching::SelectionContext;
use crate::engine::predicate::Predicate;

/// A trait containing the interface for [`ValueSelector`]s, specifying how the domain of the
/// selected variable is split.
pub trait ValueSelector<Var> {
    /// Determines which value to select for the provided variable, which is not fixed.
    fn select_value(&mut self, context: &mut SelectionContext, decision_variable: Var)
        -> Predicate;
}

impl<Var, T: ValueSelector<Var> + ?Sized> ValueSelector<Var> for Box<T> {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: Var,
    ) -> Predicate {
        (**self).select_value(context, decision_variable)
    }
}
