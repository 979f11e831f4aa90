//! Contains structures and traits to define the decision making procedure of the search.
//!
//! A [`Brancher`] is asked for a decision at every node which is stable but not yet assigned.
//! The decision is a [`Predicate`]; the search first explores the branch in which the predicate
//! holds, and then the branch in which its negation holds.
//!
//! The most common brancher is the [`IndependentVariableValueBrancher`], which combines a
//! [`VariableSelector`] (which variable to branch on) with a [`ValueSelector`] (how to split its
//! domain). [`BranchingOptions`] build such a brancher from policy names.
//!
//! [`Predicate`]: crate::engine::predicate::Predicate
//! [`IndependentVariableValueBrancher`]: branchers::IndependentVariableValueBrancher
//! [`VariableSelector`]: variable_selection::VariableSelector
//! [`ValueSelector`]: value_selection::ValueSelector

mod brancher;
mod branching_options;
pub mod branchers;
mod selection_context;
pub mod tie_breaking;
pub mod value_selection;
pub mod variable_selection;

pub use brancher::Brancher;
pub use branching_options::*;
pub use selection_context::SelectionContext;
