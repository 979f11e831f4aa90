//! The engine of gourd, a finite-domain constraint solver.
//!
//! A problem is modelled on a [`Solver`] by creating integer variables and posting
//! [`constraints`] over them. Solutions are enumerated by a depth-first search which alternates
//! propagation to a fixpoint with the decisions of a [`branching::Brancher`]; the subtrees of the
//! search can also be explored by a pool of worker threads.
#[doc(hidden)]
pub mod asserts;
pub(crate) mod basic_types;
pub mod containers;
pub(crate) mod engine;
pub(crate) mod propagators;

pub mod branching;
pub mod constraints;
pub mod statistics;

pub use convert_case;
pub use rand;

// We declare a private module with public use, so that all exports from API are exports directly
// from the crate.
//
// Example:
// `use gourd_core::Solver;`
// vs.
// `use gourd_core::api::Solver;`
mod api;

pub use api::*;

pub use crate::api::solver::Solver;
pub use crate::basic_types::ConfigurationError;
pub use crate::basic_types::ConstraintOperationError;
pub use crate::basic_types::Random;
pub use crate::basic_types::Solution;
