//! The propagators of the engine. The set of propagator kinds is closed, so they are modelled as
//! the variants of [`Propagator`] rather than as trait objects.
//!
//! A propagator is a pure function of the domains of its scope: it stores no state which changes
//! during search, and can therefore be shared between the spaces of parallel workers.

mod all_different;
mod count;
mod not_equal;

pub use all_different::AllDifferentConsistency;
pub use all_different::AllDifferentPropagator;
pub use count::CountPropagator;
pub use count::CountRelation;
pub use not_equal::NotEqualPropagator;

use crate::basic_types::PropagationStatus;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::Solution;
use crate::engine::domains::DomainEvents;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::Priority;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::OffsetView;
use crate::engine::DomainStore;

#[derive(Clone, Debug)]
pub enum Propagator {
    NotEqual(NotEqualPropagator),
    AllDifferent(AllDifferentPropagator),
    Count(CountPropagator),
}

impl Propagator {
    pub fn name(&self) -> &'static str {
        match self {
            Propagator::NotEqual(_) => "NotEqual",
            Propagator::AllDifferent(_) => "AllDifferent",
            Propagator::Count(propagator) => propagator.name(),
        }
    }

    /// The variables read and narrowed by the propagator.
    pub fn variables(&self) -> &[OffsetView] {
        match self {
            Propagator::NotEqual(propagator) => propagator.variables(),
            Propagator::AllDifferent(propagator) => propagator.variables(),
            Propagator::Count(propagator) => propagator.variables(),
        }
    }

    /// The domains underlying [`Propagator::variables`], without duplicates.
    pub fn scope(&self) -> Vec<DomainId> {
        let mut scope = self
            .variables()
            .iter()
            .map(IntegerVariable::domain_id)
            .collect::<Vec<_>>();
        scope.sort_unstable();
        scope.dedup();
        scope
    }

    pub(crate) fn priority(&self) -> Priority {
        match self {
            Propagator::NotEqual(_) => Priority::High,
            Propagator::Count(_) => Priority::Medium,
            Propagator::AllDifferent(propagator) => propagator.priority(),
        }
    }

    /// The changes to the scope which can enable further narrowing.
    pub(crate) fn events(&self) -> DomainEvents {
        match self {
            Propagator::NotEqual(_) => DomainEvents::ASSIGN,
            Propagator::Count(_) => DomainEvents::ANY,
            Propagator::AllDifferent(propagator) => propagator.events(),
        }
    }

    /// Narrows the domains in the store once. Running it again without intervening changes
    /// yields [`PropagationStatus::NoChange`].
    pub fn propagate(&self, store: &mut DomainStore) -> PropagationStatus {
        let changes_before = store.num_pending_events();
        match self.propagate_with(&mut PropagationContext::new(store)) {
            Err(_) => PropagationStatus::Failed,
            Ok(()) if store.num_pending_events() > changes_before => PropagationStatus::Changed,
            Ok(()) => PropagationStatus::NoChange,
        }
    }

    pub(crate) fn propagate_with(&self, context: &mut PropagationContext<'_>) -> PropagationStatusCP {
        match self {
            Propagator::NotEqual(propagator) => propagator.propagate(context),
            Propagator::AllDifferent(propagator) => propagator.propagate(context),
            Propagator::Count(propagator) => propagator.propagate(context),
        }
    }

    /// Whether the constraint holds for every assignment of the current domains, in which case the
    /// propagator can no longer narrow anything.
    pub fn is_entailed(&self, store: &DomainStore) -> bool {
        match self {
            Propagator::NotEqual(propagator) => propagator.is_entailed(store),
            Propagator::AllDifferent(propagator) => propagator.is_entailed(store),
            Propagator::Count(propagator) => propagator.is_entailed(store),
        }
    }

    /// Checks the constraint against a complete assignment, independently of propagation.
    pub fn is_satisfied(&self, solution: &Solution) -> bool {
        match self {
            Propagator::NotEqual(propagator) => propagator.is_satisfied(solution),
            Propagator::AllDifferent(propagator) => propagator.is_satisfied(solution),
            Propagator::Count(propagator) => propagator.is_satisfied(solution),
        }
    }
}

impl From<NotEqualPropagator> for Propagator {
    fn from(value: NotEqualPropagator) -> Self {
        Propagator::NotEqual(value)
    }
}

impl From<AllDifferentPropagator> for Propagator {
    fn from(value: AllDifferentPropagator) -> Self {
        Propagator::AllDifferent(value)
    }
}

impl From<CountPropagator> for Propagator {
    fn from(value: CountPropagator) -> Self {
        Propagator::Count(value)
    }
}
