use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;
use crate::gourd_assert_eq_simple;

/// A [`VariableSelector`] which selects the unfixed variable with the smallest ratio of domain
/// size over degree. A variable without active propagators has an infinite ratio.
pub struct MinSizeOverDegree<TieBreaking> {
    variables: Vec<DomainId>,
    tie_breaker: TieBreaking,
}

impl<TieBreaking> std::fmt::Debug for MinSizeOverDegree<TieBreaking> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MinSizeOverDegree").finish()
    }
}

impl MinSizeOverDegree<InOrderTieBreaker<DomainId, f64>> {
    pub fn new(variables: &[DomainId]) -> Self {
        Self::with_tie_breaker(variables, InOrderTieBreaker::new(Direction::Minimum))
    }
}

impl<TieBreaking: TieBreaker<DomainId, f64>> MinSizeOverDegree<TieBreaking> {
    pub fn with_tie_breaker(variables: &[DomainId], tie_breaker: TieBreaking) -> Self {
        gourd_assert_eq_simple!(
            tie_breaker.get_direction(),
            Direction::Minimum,
            "The provided tie-breaker to MinSizeOverDegree attempts to find the Maximum value
             instead of the Minimum value, please ensure that you have passed the correct tie-breaker");
        if variables.is_empty() {
            warn!("The MinSizeOverDegree variable selector was not provided with any variables");
        }

        Self {
            variables: variables.to_vec(),
            tie_breaker,
        }
    }
}

impl<TieBreaking> VariableSelector<DomainId> for MinSizeOverDegree<TieBreaking>
where
    TieBreaking: TieBreaker<DomainId, f64>,
{
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        for &variable in &self.variables {
            if context.is_fixed(variable) {
                continue;
            }
            let degree = context.degree(variable);
            let ratio = if degree == 0 {
                f64::INFINITY
            } else {
                context.size(variable) as f64 / degree as f64
            };
            self.tie_breaker.consider(variable, ratio);
        }
        self.tie_breaker.select(context.random())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::tests::TestRandom;
    use crate::propagators::NotEqualPropagator;

    #[test]
    fn degree_outweighs_a_slightly_smaller_domain() {
        // x0: size 4, degree 1 (ratio 4); x1: size 6, degree 3 (ratio 2)
        let mut space = SelectionContext::create_for_testing(&[(0, 3), (0, 5), (0, 5), (0, 5)]);
        let variables = space.domains().domain_ids().collect::<Vec<_>>();
        for (a, b) in [(0, 1), (1, 2), (1, 3)] {
            let _ = space
                .add_propagator(NotEqualPropagator::new(variables[a], variables[b]))
                .expect("variables exist");
        }

        let mut random = TestRandom::default();
        let mut context = SelectionContext::new(&space, &mut random);
        let mut strategy = MinSizeOverDegree::new(&variables[..2]);
        assert_eq!(strategy.select_variable(&mut context), Some(variables[1]));
    }

    #[test]
    fn unconstrained_variable_is_selected_last() {
        let mut space = SelectionContext::create_for_testing(&[(0, 1), (0, 9), (0, 9)]);
        let variables = space.domains().domain_ids().collect::<Vec<_>>();
        let _ = space
            .add_propagator(NotEqualPropagator::new(variables[1], variables[2]))
            .expect("variables exist");

        let mut random = TestRandom::default();
        let mut context = SelectionContext::new(&space, &mut random);
        let mut strategy = MinSizeOverDegree::new(&variables);
        assert_eq!(strategy.select_variable(&mut context), Some(variables[1]));
    }
}
