use log::warn;

use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;

/// A [`VariableSelector`] which selects an unfixed variable uniformly at random.
#[derive(Debug, Clone)]
pub struct RandomSelection {
    variables: Vec<DomainId>,
    unfixed: Vec<DomainId>,
}

impl RandomSelection {
    pub fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("The RandomSelection variable selector was not provided with any variables");
        }
        RandomSelection {
            variables: variables.to_vec(),
            unfixed: Vec::with_capacity(variables.len()),
        }
    }
}

impl VariableSelector<DomainId> for RandomSelection {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        self.unfixed.clear();
        self.unfixed.extend(
            self.variables
                .iter()
                .copied()
                .filter(|&variable| !context.is_fixed(variable)),
        );
        match self.unfixed.len() {
            0 => None,
            num_unfixed => {
                let index = context.random().generate_usize_in_range(0..num_unfixed);
                Some(self.unfixed[index])
            }
        }
    }
}
