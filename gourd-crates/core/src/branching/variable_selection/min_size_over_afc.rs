use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::AccumulatedFailureCount;
use crate::branching::variable_selection::Decay;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::propagation::PropagatorId;
use crate::engine::variables::DomainId;
use crate::gourd_assert_eq_simple;

/// A [`VariableSelector`] which selects the unfixed variable with the smallest ratio of domain
/// size over accumulated failure count. A variable without active propagators has an infinite
/// ratio.
pub struct MinSizeOverAfc<TieBreaking> {
    variables: Vec<DomainId>,
    counts: AccumulatedFailureCount,
    tie_breaker: TieBreaking,
}

impl<TieBreaking> std::fmt::Debug for MinSizeOverAfc<TieBreaking> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MinSizeOverAfc")
            .field("counts", &self.counts)
            .finish()
    }
}

impl MinSizeOverAfc<InOrderTieBreaker<DomainId, f64>> {
    pub fn new(variables: &[DomainId], decay: Decay) -> Self {
        Self::with_tie_breaker(variables, decay, InOrderTieBreaker::new(Direction::Minimum))
    }
}

impl<TieBreaking: TieBreaker<DomainId, f64>> MinSizeOverAfc<TieBreaking> {
    pub fn with_tie_breaker(
        variables: &[DomainId],
        decay: Decay,
        tie_breaker: TieBreaking,
    ) -> Self {
        gourd_assert_eq_simple!(
            tie_breaker.get_direction(),
            Direction::Minimum,
            "The provided tie-breaker to MinSizeOverAfc attempts to find the Maximum value
             instead of the Minimum value, please ensure that you have passed the correct tie-breaker");
        if variables.is_empty() {
            warn!("The MinSizeOverAfc variable selector was not provided with any variables");
        }

        Self {
            variables: variables.to_vec(),
            counts: AccumulatedFailureCount::new(decay),
            tie_breaker,
        }
    }
}

impl<TieBreaking> VariableSelector<DomainId> for MinSizeOverAfc<TieBreaking>
where
    TieBreaking: TieBreaker<DomainId, f64>,
{
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        for &variable in &self.variables {
            if context.is_fixed(variable) {
                continue;
            }
            let afc = self.counts.variable_afc(context, variable);
            let ratio = if afc > 0.0 {
                context.size(variable) as f64 / afc
            } else {
                f64::INFINITY
            };
            self.tie_breaker.consider(variable, ratio);
        }
        self.tie_breaker.select(context.random())
    }

    fn on_node(&mut self) {
        self.counts.on_node();
    }

    fn on_failure(&mut self, failed_propagator: Option<PropagatorId>) {
        self.counts.on_failure(failed_propagator);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::tests::TestRandom;
    use crate::propagators::NotEqualPropagator;

    #[test]
    fn size_and_failures_are_combined() {
        // x0 has the smaller domain, but x2 and x3 share a propagator which failed twice
        let mut space = SelectionContext::create_for_testing(&[(0, 2), (0, 5), (0, 5), (0, 5)]);
        let variables = space.domains().domain_ids().collect::<Vec<_>>();
        let _ = space
            .add_propagator(NotEqualPropagator::new(variables[0], variables[1]))
            .expect("variables exist");
        let failing = space
            .add_propagator(NotEqualPropagator::new(variables[2], variables[3]))
            .expect("variables exist");

        let mut strategy = MinSizeOverAfc::new(&variables, Decay::default());
        let mut random = TestRandom::default();
        {
            let mut context = SelectionContext::new(&space, &mut random);
            assert_eq!(strategy.select_variable(&mut context), Some(variables[0]));
        }

        strategy.on_failure(Some(failing));
        strategy.on_failure(Some(failing));

        let mut context = SelectionContext::new(&space, &mut random);
        assert_eq!(strategy.select_variable(&mut context), Some(variables[2]));
    }
}
