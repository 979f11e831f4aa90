//! The propagation and search engine: domains and their store, the [`Space`] which propagates a
//! problem to a fixpoint, and the depth-first search over spaces.

pub(crate) mod domains;
pub(crate) mod predicate;
pub(crate) mod propagation;
pub(crate) mod search;
mod space;
pub(crate) mod termination;
#[cfg(test)]
pub(crate) mod test_solver;
pub(crate) mod variables;

pub use domains::DomainStore;
pub use space::Space;
pub use space::SpaceState;
