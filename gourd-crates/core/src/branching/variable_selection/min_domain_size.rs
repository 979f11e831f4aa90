use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;
use crate::gourd_assert_eq_simple;

/// A [`VariableSelector`] which selects the variable with the fewest values in its domain
/// (first-fail).
///
/// Uses a [`TieBreaker`] to break ties, the default is the [`InOrderTieBreaker`] but it is
/// possible to construct the variable selector with a custom [`TieBreaker`] by using
/// the method [`MinDomainSize::with_tie_breaker`].
pub struct MinDomainSize<TieBreaking> {
    variables: Vec<DomainId>,
    tie_breaker: TieBreaking,
}

impl<TieBreaking> std::fmt::Debug for MinDomainSize<TieBreaking> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MinDomainSize").finish()
    }
}

impl MinDomainSize<InOrderTieBreaker<DomainId, usize>> {
    pub fn new(variables: &[DomainId]) -> Self {
        Self::with_tie_breaker(variables, InOrderTieBreaker::new(Direction::Minimum))
    }
}

impl<TieBreaking: TieBreaker<DomainId, usize>> MinDomainSize<TieBreaking> {
    pub fn with_tie_breaker(variables: &[DomainId], tie_breaker: TieBreaking) -> Self {
        gourd_assert_eq_simple!(
            tie_breaker.get_direction(),
            Direction::Minimum,
            "The provided tie-breaker to MinDomainSize attempts to find the Maximum value
             instead of the Minimum value, please ensure that you have passed the correct tie-breaker");
        if variables.is_empty() {
            warn!("The MinDomainSize variable selector was not provided with any variables");
        }

        Self {
            variables: variables.to_vec(),
            tie_breaker,
        }
    }
}

impl<TieBreaking> VariableSelector<DomainId> for MinDomainSize<TieBreaking>
where
    TieBreaking: TieBreaker<DomainId, usize>,
{
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        for &variable in &self.variables {
            if !context.is_fixed(variable) {
                self.tie_breaker.consider(variable, context.size(variable));
            }
        }
        self.tie_breaker.select(context.random())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::tests::TestRandom;
    use crate::branching::tie_breaking::RandomTieBreaker;
    use crate::engine::predicate::Predicate;

    #[test]
    fn test_correctly_selected() {
        let mut space = SelectionContext::create_for_testing(&[(0, 10), (5, 20)]);
        let variables = space.domains().domain_ids().collect::<Vec<_>>();
        let mut strategy = MinDomainSize::new(&variables);
        let mut random = TestRandom::default();

        {
            let mut context = SelectionContext::new(&space, &mut random);
            assert_eq!(strategy.select_variable(&mut context), Some(variables[0]));
        }

        space
            .post(Predicate::LowerBound {
                domain_id: variables[1],
                value: 15,
            })
            .expect("value is in the domain");

        let mut context = SelectionContext::new(&space, &mut random);
        assert_eq!(strategy.select_variable(&mut context), Some(variables[1]));
    }

    #[test]
    fn holes_count_towards_the_size() {
        let mut space = SelectionContext::create_for_testing(&[(0, 4), (0, 3)]);
        let variables = space.domains().domain_ids().collect::<Vec<_>>();
        for value in [1, 2, 3] {
            space
                .post(Predicate::NotEqual {
                    domain_id: variables[0],
                    value,
                })
                .expect("domain stays non-empty");
        }
        let mut random = TestRandom::default();
        let mut context = SelectionContext::new(&space, &mut random);

        let mut strategy = MinDomainSize::new(&variables);
        assert_eq!(strategy.select_variable(&mut context), Some(variables[0]));
    }

    #[test]
    fn ties_are_broken_randomly() {
        let space = SelectionContext::create_for_testing(&[(0, 3), (0, 3), (0, 3)]);
        let variables = space.domains().domain_ids().collect::<Vec<_>>();
        let mut random = TestRandom {
            usizes: vec![2],
            ..Default::default()
        };
        let mut context = SelectionContext::new(&space, &mut random);

        let mut strategy =
            MinDomainSize::with_tie_breaker(&variables, RandomTieBreaker::new(Direction::Minimum));
        assert_eq!(strategy.select_variable(&mut context), Some(variables[2]));
    }

    #[test]
    fn fixed_variables_are_not_selected() {
        let space = SelectionContext::create_for_testing(&[(10, 10), (20, 20)]);
        let variables = space.domains().domain_ids().collect::<Vec<_>>();
        let mut random = TestRandom::default();
        let mut context = SelectionContext::new(&space, &mut random);

        let mut strategy = MinDomainSize::new(&variables);
        assert!(strategy.select_variable(&mut context).is_none());
    }
}
