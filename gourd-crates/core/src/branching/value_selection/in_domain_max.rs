use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::predicate::Predicate;
use crate::engine::variables::DomainId;

/// A [`ValueSelector`] which assigns the variable to its upper bound.
#[derive(Debug, Copy, Clone)]
pub struct InDomainMax;

impl ValueSelector<DomainId> for InDomainMax {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
    ) -> Predicate {
        Predicate::Equal {
            domain_id: decision_variable,
            value: context.upper_bound(decision_variable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::tests::TestRandom;

    #[test]
    fn test_returns_correct_predicate() {
        let space = SelectionContext::create_for_testing(&[(3, 10)]);
        let domain_ids = space.domains().domain_ids().collect::<Vec<_>>();
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(&space, &mut test_rng);

        let selected_predicate = InDomainMax.select_value(&mut context, domain_ids[0]);

        assert_eq!(
            selected_predicate,
            Predicate::Equal {
                domain_id: domain_ids[0],
                value: 10
            }
        );
    }
}
