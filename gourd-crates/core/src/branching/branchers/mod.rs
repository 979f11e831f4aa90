//! Implementations of the [`Brancher`](crate::branching::Brancher) trait.

mod independent_variable_value_brancher;

pub use independent_variable_value_brancher::IndependentVariableValueBrancher;
