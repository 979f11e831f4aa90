use log::warn;

use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;

/// A [`VariableSelector`] which selects the first variable which is not fixed given the order in
/// the provided list.
#[derive(Debug, Clone)]
pub struct InputOrder {
    variables: Vec<DomainId>,
}

impl InputOrder {
    pub fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("The InputOrder variable selector was not provided with any variables");
        }
        InputOrder {
            variables: variables.to_vec(),
        }
    }
}

impl VariableSelector<DomainId> for InputOrder {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        self.variables
            .iter()
            .copied()
            .find(|&variable| !context.is_fixed(variable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::tests::TestRandom;
    use crate::engine::predicate::Predicate;

    #[test]
    fn test_correctly_selected() {
        let mut space = SelectionContext::create_for_testing(&[(0, 10), (5, 20)]);
        let variables = space.domains().domain_ids().collect::<Vec<_>>();
        let mut strategy = InputOrder::new(&variables);
        let mut random = TestRandom::default();

        {
            let mut context = SelectionContext::new(&space, &mut random);
            assert_eq!(strategy.select_variable(&mut context), Some(variables[0]));
        }

        space
            .post(Predicate::Equal {
                domain_id: variables[0],
                value: 0,
            })
            .expect("value is in the domain");

        let mut context = SelectionContext::new(&space, &mut random);
        assert_eq!(strategy.select_variable(&mut context), Some(variables[1]));
    }

    #[test]
    fn fixed_variables_are_not_selected() {
        let space = SelectionContext::create_for_testing(&[(10, 10), (20, 20)]);
        let variables = space.domains().domain_ids().collect::<Vec<_>>();
        let mut random = TestRandom::default();
        let mut context = SelectionContext::new(&space, &mut random);

        let mut strategy = InputOrder::new(&variables);
        assert!(strategy.select_variable(&mut context).is_none());
    }
}
