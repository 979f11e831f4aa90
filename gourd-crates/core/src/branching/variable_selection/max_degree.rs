use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;
use crate::gourd_assert_eq_simple;

/// A [`VariableSelector`] which selects the unfixed variable which occurs in the most active
/// propagators.
pub struct MaxDegree<TieBreaking> {
    variables: Vec<DomainId>,
    tie_breaker: TieBreaking,
}

impl<TieBreaking> std::fmt::Debug for MaxDegree<TieBreaking> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaxDegree").finish()
    }
}

impl MaxDegree<InOrderTieBreaker<DomainId, usize>> {
    pub fn new(variables: &[DomainId]) -> Self {
        Self::with_tie_breaker(variables, InOrderTieBreaker::new(Direction::Maximum))
    }
}

impl<TieBreaking: TieBreaker<DomainId, usize>> MaxDegree<TieBreaking> {
    pub fn with_tie_breaker(variables: &[DomainId], tie_breaker: TieBreaking) -> Self {
        gourd_assert_eq_simple!(
            tie_breaker.get_direction(),
            Direction::Maximum,
            "The provided tie-breaker to MaxDegree attempts to find the Minimum value
             instead of the Maximum value, please ensure that you have passed the correct tie-breaker");
        if variables.is_empty() {
            warn!("The MaxDegree variable selector was not provided with any variables");
        }

        Self {
            variables: variables.to_vec(),
            tie_breaker,
        }
    }
}

impl<TieBreaking> VariableSelector<DomainId> for MaxDegree<TieBreaking>
where
    TieBreaking: TieBreaker<DomainId, usize>,
{
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        for &variable in &self.variables {
            if !context.is_fixed(variable) {
                self.tie_breaker.consider(variable, context.degree(variable));
            }
        }
        self.tie_breaker.select(context.random())
    }
}
