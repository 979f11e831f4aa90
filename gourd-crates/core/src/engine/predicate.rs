use std::fmt::Display;
use std::ops::Not;

use crate::basic_types::EmptyDomain;
use crate::engine::variables::DomainId;
use crate::engine::DomainStore;

/// An atomic statement about a domain. Branching decisions are predicates; the alternative branch
/// is the negation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// `[x == value]`
    Equal { domain_id: DomainId, value: i32 },
    /// `[x != value]`
    NotEqual { domain_id: DomainId, value: i32 },
    /// `[x >= value]`
    LowerBound { domain_id: DomainId, value: i32 },
    /// `[x <= value]`
    UpperBound { domain_id: DomainId, value: i32 },
}

impl Predicate {
    pub fn domain_id(&self) -> DomainId {
        match *self {
            Predicate::Equal { domain_id, .. }
            | Predicate::NotEqual { domain_id, .. }
            | Predicate::LowerBound { domain_id, .. }
            | Predicate::UpperBound { domain_id, .. } => domain_id,
        }
    }

    /// Narrows the domain such that the predicate holds. Returns whether the domain changed.
    pub fn apply(&self, store: &mut DomainStore) -> Result<bool, EmptyDomain> {
        match *self {
            Predicate::Equal { domain_id, value } => store.assign(domain_id, value),
            Predicate::NotEqual { domain_id, value } => store.remove(domain_id, value),
            Predicate::LowerBound { domain_id, value } => store.set_lower_bound(domain_id, value),
            Predicate::UpperBound { domain_id, value } => store.set_upper_bound(domain_id, value),
        }
    }

    /// Whether the predicate holds for every value in the current domain.
    pub fn is_true(&self, store: &DomainStore) -> bool {
        match *self {
            Predicate::Equal { domain_id, value } => store.fixed_value(domain_id) == Some(value),
            Predicate::NotEqual { domain_id, value } => !store.contains(domain_id, value),
            Predicate::LowerBound { domain_id, value } => store.lower_bound(domain_id) >= value,
            Predicate::UpperBound { domain_id, value } => store.upper_bound(domain_id) <= value,
        }
    }
}

impl Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Self::Output {
        match self {
            Predicate::Equal { domain_id, value } => Predicate::NotEqual { domain_id, value },
            Predicate::NotEqual { domain_id, value } => Predicate::Equal { domain_id, value },
            Predicate::LowerBound { domain_id, value } => Predicate::UpperBound {
                domain_id,
                value: value - 1,
            },
            Predicate::UpperBound { domain_id, value } => Predicate::LowerBound {
                domain_id,
                value: value + 1,
            },
        }
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::Equal { domain_id, value } => write!(f, "[{domain_id} == {value}]"),
            Predicate::NotEqual { domain_id, value } => write!(f, "[{domain_id} != {value}]"),
            Predicate::LowerBound { domain_id, value } => write!(f, "[{domain_id} >= {value}]"),
            Predicate::UpperBound { domain_id, value } => write!(f, "[{domain_id} <= {value}]"),
        }
    }
}
