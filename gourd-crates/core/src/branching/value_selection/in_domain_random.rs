use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::predicate::Predicate;
use crate::engine::variables::DomainId;

/// A [`ValueSelector`] which assigns the variable to a value of its domain chosen uniformly at
/// random.
#[derive(Debug, Clone, Copy)]
pub struct InDomainRandom;

impl ValueSelector<DomainId> for InDomainRandom {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
    ) -> Predicate {
        let size = context.size(decision_variable);
        let random_index = context.random().generate_usize_in_range(0..size);
        let value = context
            .domain_values(decision_variable)
            .nth(random_index)
            .unwrap_or_else(|| context.lower_bound(decision_variable));
        Predicate::Equal {
            domain_id: decision_variable,
            value,
        }
    }
}
