use std::fmt::Display;
use std::str::FromStr;

use crate::basic_types::ConfigurationError;
use crate::branching::branchers::IndependentVariableValueBrancher;
use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::RandomTieBreaker;
use crate::branching::value_selection::InDomainMax;
use crate::branching::value_selection::InDomainMin;
use crate::branching::value_selection::InDomainRandom;
use crate::branching::value_selection::InDomainSplit;
use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::Afc;
use crate::branching::variable_selection::Decay;
use crate::branching::variable_selection::InputOrder;
use crate::branching::variable_selection::MaxDegree;
use crate::branching::variable_selection::MinDomainSize;
use crate::branching::variable_selection::MinSizeOverAfc;
use crate::branching::variable_selection::MinSizeOverDegree;
use crate::branching::variable_selection::RandomSelection;
use crate::branching::variable_selection::VariableSelector;
use crate::engine::variables::DomainId;

pub type BoxedVariableSelector = Box<dyn VariableSelector<DomainId> + Send>;
pub type BoxedValueSelector = Box<dyn ValueSelector<DomainId> + Send>;

/// The brancher built from [`BranchingOptions`].
pub type DynamicBrancher =
    IndependentVariableValueBrancher<DomainId, BoxedVariableSelector, BoxedValueSelector>;

/// Which unfixed variable to branch on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VariableSelectionPolicy {
    /// The first unfixed variable in the order the variables were given.
    InputOrder,
    /// The variable with the fewest values.
    #[default]
    MinSize,
    /// The variable which occurs in the most active propagators.
    MaxDegree,
    /// The variable with the smallest domain size over degree.
    MinSizeOverDegree,
    /// The variable with the largest accumulated failure count.
    Afc,
    /// The variable with the smallest domain size over accumulated failure count.
    MinSizeOverAfc,
    /// A variable chosen uniformly at random.
    Random,
}

impl VariableSelectionPolicy {
    const NAMES: &'static str =
        "input-order, min-size, max-degree, min-size-over-degree, afc, min-size-over-afc, random";
}

impl FromStr for VariableSelectionPolicy {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input-order" | "none" => Ok(VariableSelectionPolicy::InputOrder),
            "min-size" | "size" => Ok(VariableSelectionPolicy::MinSize),
            "max-degree" | "degree" => Ok(VariableSelectionPolicy::MaxDegree),
            "min-size-over-degree" | "sizedeg" => Ok(VariableSelectionPolicy::MinSizeOverDegree),
            "afc" => Ok(VariableSelectionPolicy::Afc),
            "min-size-over-afc" | "sizeafc" => Ok(VariableSelectionPolicy::MinSizeOverAfc),
            "random" => Ok(VariableSelectionPolicy::Random),
            _ => Err(ConfigurationError::UnknownPolicy {
                kind: "variable selection",
                name: s.to_owned(),
                expected: Self::NAMES,
            }),
        }
    }
}

impl Display for VariableSelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VariableSelectionPolicy::InputOrder => "input-order",
            VariableSelectionPolicy::MinSize => "min-size",
            VariableSelectionPolicy::MaxDegree => "max-degree",
            VariableSelectionPolicy::MinSizeOverDegree => "min-size-over-degree",
            VariableSelectionPolicy::Afc => "afc",
            VariableSelectionPolicy::MinSizeOverAfc => "min-size-over-afc",
            VariableSelectionPolicy::Random => "random",
        };
        write!(f, "{name}")
    }
}

/// How the domain of the selected variable is split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ValueSelectionPolicy {
    /// `x == lb` and then `x != lb`.
    #[default]
    Min,
    /// `x == ub` and then `x != ub`.
    Max,
    /// `x <= mid` and then `x > mid`, where `mid` is the midpoint of the bounds.
    SplitMin,
    /// `x == v` and then `x != v` for a random value `v` of the domain.
    Random,
}

impl ValueSelectionPolicy {
    const NAMES: &'static str = "min, max, split-min, random";
}

impl FromStr for ValueSelectionPolicy {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(ValueSelectionPolicy::Min),
            "max" => Ok(ValueSelectionPolicy::Max),
            "split-min" | "split" => Ok(ValueSelectionPolicy::SplitMin),
            "random" => Ok(ValueSelectionPolicy::Random),
            _ => Err(ConfigurationError::UnknownPolicy {
                kind: "value selection",
                name: s.to_owned(),
                expected: Self::NAMES,
            }),
        }
    }
}

impl Display for ValueSelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueSelectionPolicy::Min => "min",
            ValueSelectionPolicy::Max => "max",
            ValueSelectionPolicy::SplitMin => "split-min",
            ValueSelectionPolicy::Random => "random",
        };
        write!(f, "{name}")
    }
}

/// The textual configuration of a brancher.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BranchingOptions {
    pub variable_selection: VariableSelectionPolicy,
    pub value_selection: ValueSelectionPolicy,
    /// The decay of the accumulated failure counts.
    pub afc_decay: Decay,
    /// Whether ties between equally good variables are broken randomly instead of by input
    /// order.
    pub random_tie_breaking: bool,
}

impl Default for BranchingOptions {
    fn default() -> Self {
        BranchingOptions {
            variable_selection: VariableSelectionPolicy::default(),
            value_selection: ValueSelectionPolicy::default(),
            afc_decay: Decay::default(),
            random_tie_breaking: false,
        }
    }
}

impl BranchingOptions {
    /// Builds a fresh brancher over `variables`; the selectors keep no state between builds.
    pub fn build(&self, variables: &[DomainId]) -> DynamicBrancher {
        IndependentVariableValueBrancher::new(
            self.variable_selector(variables),
            self.value_selector(),
        )
    }

    fn variable_selector(&self, variables: &[DomainId]) -> BoxedVariableSelector {
        let random = self.random_tie_breaking;
        let decay = self.afc_decay;
        let selector: BoxedVariableSelector = match self.variable_selection {
            VariableSelectionPolicy::InputOrder => Box::new(InputOrder::new(variables)),
            VariableSelectionPolicy::Random => Box::new(RandomSelection::new(variables)),
            VariableSelectionPolicy::MinSize if random => Box::new(
                MinDomainSize::with_tie_breaker(variables, RandomTieBreaker::new(Direction::Minimum)),
            ),
            VariableSelectionPolicy::MinSize => Box::new(MinDomainSize::new(variables)),
            VariableSelectionPolicy::MaxDegree if random => Box::new(
                MaxDegree::with_tie_breaker(variables, RandomTieBreaker::new(Direction::Maximum)),
            ),
            VariableSelectionPolicy::MaxDegree => Box::new(MaxDegree::new(variables)),
            VariableSelectionPolicy::MinSizeOverDegree if random => {
                Box::new(MinSizeOverDegree::with_tie_breaker(
                    variables,
                    RandomTieBreaker::new(Direction::Minimum),
                ))
            }
            VariableSelectionPolicy::MinSizeOverDegree => {
                Box::new(MinSizeOverDegree::new(variables))
            }
            VariableSelectionPolicy::Afc if random => Box::new(Afc::with_tie_breaker(
                variables,
                decay,
                RandomTieBreaker::new(Direction::Maximum),
            )),
            VariableSelectionPolicy::Afc => Box::new(Afc::new(variables, decay)),
            VariableSelectionPolicy::MinSizeOverAfc if random => {
                Box::new(MinSizeOverAfc::with_tie_breaker(
                    variables,
                    decay,
                    RandomTieBreaker::new(Direction::Minimum),
                ))
            }
            VariableSelectionPolicy::MinSizeOverAfc => {
                Box::new(MinSizeOverAfc::new(variables, decay))
            }
        };
        selector
    }

    fn value_selector(&self) -> BoxedValueSelector {
        match self.value_selection {
            ValueSelectionPolicy::Min => Box::new(InDomainMin),
            ValueSelectionPolicy::Max => Box::new(InDomainMax),
            ValueSelectionPolicy::SplitMin => Box::new(InDomainSplit),
            ValueSelectionPolicy::Random => Box::new(InDomainRandom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::tests::TestRandom;
    use crate::branching::Brancher;
    use crate::branching::SelectionContext;
    use crate::engine::predicate::Predicate;

    #[test]
    fn policy_names_round_trip_through_display() {
        for policy in [
            VariableSelectionPolicy::InputOrder,
            VariableSelectionPolicy::MinSize,
            VariableSelectionPolicy::MaxDegree,
            VariableSelectionPolicy::MinSizeOverDegree,
            VariableSelectionPolicy::Afc,
            VariableSelectionPolicy::MinSizeOverAfc,
            VariableSelectionPolicy::Random,
        ] {
            assert_eq!(policy.to_string().parse::<VariableSelectionPolicy>(), Ok(policy));
        }
    }

    #[test]
    fn short_names_are_accepted() {
        let parse = |name: &str| name.parse::<VariableSelectionPolicy>();
        assert_eq!(parse("none"), Ok(VariableSelectionPolicy::InputOrder));
        assert_eq!(parse("size"), Ok(VariableSelectionPolicy::MinSize));
        assert_eq!(parse("sizedeg"), Ok(VariableSelectionPolicy::MinSizeOverDegree));
        assert_eq!(parse("sizeafc"), Ok(VariableSelectionPolicy::MinSizeOverAfc));
        assert_eq!(
            "split-min".parse::<ValueSelectionPolicy>(),
            Ok(ValueSelectionPolicy::SplitMin)
        );
    }

    #[test]
    fn unknown_policy_names_the_alternatives() {
        let error = "smallest".parse::<VariableSelectionPolicy>().unwrap_err();
        assert!(matches!(
            error,
            ConfigurationError::UnknownPolicy { ref name, .. } if name == "smallest"
        ));
        assert!(error.to_string().contains("min-size-over-afc"));

        assert!("middle".parse::<ValueSelectionPolicy>().is_err());
    }

    #[test]
    fn built_brancher_follows_the_policies() {
        let space = SelectionContext::create_for_testing(&[(0, 9), (2, 6)]);
        let variables = space.domains().domain_ids().collect::<Vec<_>>();
        let mut random = TestRandom::default();
        let mut context = SelectionContext::new(&space, &mut random);

        let options = BranchingOptions {
            variable_selection: VariableSelectionPolicy::MinSize,
            value_selection: ValueSelectionPolicy::SplitMin,
            ..Default::default()
        };
        let mut brancher = options.build(&variables);

        assert_eq!(
            brancher.next_decision(&mut context),
            Some(Predicate::UpperBound {
                domain_id: variables[1],
                value: 4
            })
        );
    }
}
