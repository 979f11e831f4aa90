use std::fmt::Display;

use crate::basic_types::EmptyDomain;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::Solution;
use crate::engine::propagation::PropagationContext;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::OffsetView;
use crate::engine::DomainStore;

/// How the number of occurrences of the value relates to the bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CountRelation {
    Equal,
    AtMost,
    AtLeast,
}

impl Display for CountRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountRelation::Equal => write!(f, "=="),
            CountRelation::AtMost => write!(f, "<="),
            CountRelation::AtLeast => write!(f, ">="),
        }
    }
}

/// Propagates `|{ x in variables | x == value }| <relation> bound`.
///
/// The propagator maintains two counts: the variables which are *forced* to the value (fixed to
/// it), and the variables which *can* take the value (contain it).
/// - If the forced count exceeds an upper bound, or the possible count falls below a lower bound,
///   the constraint fails.
/// - If the forced count reaches the upper bound, the value is removed from every variable that
///   is not forced to it.
/// - If the possible count reaches the lower bound, every variable which can take the value is
///   assigned to it.
#[derive(Clone, Debug)]
pub struct CountPropagator {
    variables: Box<[OffsetView]>,
    value: i32,
    bound: i32,
    relation: CountRelation,
}

#[derive(Clone, Copy, Debug)]
struct Occurrences {
    forced: i64,
    possible: i64,
}

impl CountPropagator {
    pub fn new<Var: IntegerVariable>(
        variables: impl IntoIterator<Item = Var>,
        value: i32,
        bound: i32,
        relation: CountRelation,
    ) -> Self {
        CountPropagator {
            variables: variables.into_iter().map(|var| var.view()).collect(),
            value,
            bound,
            relation,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self.relation {
            CountRelation::Equal => "CountEqual",
            CountRelation::AtMost => "CountAtMost",
            CountRelation::AtLeast => "CountAtLeast",
        }
    }

    pub(crate) fn variables(&self) -> &[OffsetView] {
        &self.variables
    }

    fn count(&self, store: &DomainStore) -> Occurrences {
        let mut occurrences = Occurrences {
            forced: 0,
            possible: 0,
        };
        for var in self.variables.iter() {
            if var.contains(store, self.value) {
                occurrences.possible += 1;
                if var.is_fixed(store) {
                    occurrences.forced += 1;
                }
            }
        }
        occurrences
    }

    fn has_upper_limit(&self) -> bool {
        matches!(self.relation, CountRelation::Equal | CountRelation::AtMost)
    }

    fn has_lower_limit(&self) -> bool {
        matches!(self.relation, CountRelation::Equal | CountRelation::AtLeast)
    }

    pub(crate) fn propagate(&self, context: &mut PropagationContext<'_>) -> PropagationStatusCP {
        let Occurrences { forced, possible } = self.count(context.store());
        let bound = i64::from(self.bound);

        if self.has_upper_limit() && forced > bound {
            return Err(EmptyDomain);
        }
        if self.has_lower_limit() && possible < bound {
            return Err(EmptyDomain);
        }

        if self.has_upper_limit() && forced == bound && possible > forced {
            for var in self.variables.iter() {
                if context.fixed_value(var) != Some(self.value) {
                    context.remove(var, self.value)?;
                }
            }
        } else if self.has_lower_limit() && possible == bound && forced < possible {
            for var in self.variables.iter() {
                if context.contains(var, self.value) {
                    context.assign(var, self.value)?;
                }
            }
        }

        Ok(())
    }

    pub(crate) fn is_entailed(&self, store: &DomainStore) -> bool {
        let Occurrences { forced, possible } = self.count(store);
        let bound = i64::from(self.bound);

        match self.relation {
            CountRelation::Equal => forced == bound && possible == bound,
            CountRelation::AtMost => possible <= bound,
            CountRelation::AtLeast => forced >= bound,
        }
    }

    pub(crate) fn is_satisfied(&self, solution: &Solution) -> bool {
        let occurrences = self
            .variables
            .iter()
            .filter(|var| solution.get_integer_value(**var) == self.value)
            .count() as i64;
        let bound = i64::from(self.bound);

        match self.relation {
            CountRelation::Equal => occurrences == bound,
            CountRelation::AtMost => occurrences <= bound,
            CountRelation::AtLeast => occurrences >= bound,
        }
    }
}
