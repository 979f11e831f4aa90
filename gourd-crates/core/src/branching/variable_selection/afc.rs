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

/// A [`VariableSelector`] which selects the unfixed variable with the largest accumulated failure
/// count, see [`AccumulatedFailureCount`].
pub struct Afc<TieBreaking> {
    variables: Vec<DomainId>,
    counts: AccumulatedFailureCount,
    tie_breaker: TieBreaking,
}

impl<TieBreaking> std::fmt::Debug for Afc<TieBreaking> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Afc").field("counts", &self.counts).finish()
    }
}

impl Afc<InOrderTieBreaker<DomainId, f64>> {
    pub fn new(variables: &[DomainId], decay: Decay) -> Self {
        Self::with_tie_breaker(variables, decay, InOrderTieBreaker::new(Direction::Maximum))
    }
}

impl<TieBreaking: TieBreaker<DomainId, f64>> Afc<TieBreaking> {
    pub fn with_tie_breaker(
        variables: &[DomainId],
        decay: Decay,
        tie_breaker: TieBreaking,
    ) -> Self {
        gourd_assert_eq_simple!(
            tie_breaker.get_direction(),
            Direction::Maximum,
            "The provided tie-breaker to Afc attempts to find the Minimum value
             instead of the Maximum value, please ensure that you have passed the correct tie-breaker");
        if variables.is_empty() {
            warn!("The Afc variable selector was not provided with any variables");
        }

        Self {
            variables: variables.to_vec(),
            counts: AccumulatedFailureCount::new(decay),
            tie_breaker,
        }
    }

    pub fn counts(&self) -> &AccumulatedFailureCount {
        &self.counts
    }
}

impl<TieBreaking> VariableSelector<DomainId> for Afc<TieBreaking>
where
    TieBreaking: TieBreaker<DomainId, f64>,
{
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        for &variable in &self.variables {
            if !context.is_fixed(variable) {
                let afc = self.counts.variable_afc(context, variable);
                self.tie_breaker.consider(variable, afc);
            }
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
