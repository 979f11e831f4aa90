#[cfg(doc)]
use crate::engine::DomainStore;

/// The result of invoking a propagator, or of running a space to its fixpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropagationStatus {
    /// No domain was narrowed.
    NoChange,
    /// At least one domain was narrowed.
    Changed,
    /// An inconsistency was detected; the state cannot be extended to a solution.
    Failed,
}

impl PropagationStatus {
    pub fn is_failed(self) -> bool {
        matches!(self, PropagationStatus::Failed)
    }
}

/// Returned by the [`DomainStore`] when a change would leave a domain without values. The change
/// is not applied.
///
/// Propagators also return it when they detect that some domain must become empty, such as a
/// pigeonhole violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EmptyDomain;

/// The result of a single propagator run, driven with `?` on the domain operations.
pub(crate) type PropagationStatusCP = Result<(), EmptyDomain>;
