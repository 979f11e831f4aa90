use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::predicate::Predicate;
use crate::engine::variables::DomainId;
use crate::gourd_assert_advanced;

/// A [`ValueSelector`] which splits the domain at the midpoint of its bounds and first explores
/// the lower half, i.e. it posts `x <= (lb + ub) / 2` and then `x > (lb + ub) / 2`.
///
/// Note that this strategy will not necessarily result in an equal split if there are holes in the
/// domain.
#[derive(Debug, Copy, Clone)]
pub struct InDomainSplit;

impl ValueSelector<DomainId> for InDomainSplit {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
    ) -> Predicate {
        let lower_bound = context.lower_bound(decision_variable);
        let upper_bound = context.upper_bound(decision_variable);
        let bound = (lower_bound as i64 + (upper_bound as i64 - lower_bound as i64) / 2) as i32;
        gourd_assert_advanced!(
            bound >= lower_bound && bound < upper_bound,
            "It should hold that {lower_bound} <= {bound} < {upper_bound}"
        );
        Predicate::UpperBound {
            domain_id: decision_variable,
            value: bound,
        }
    }
}
