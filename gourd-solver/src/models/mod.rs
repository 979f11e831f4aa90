//! Models of well-known puzzles, each building its variables and constraints on a
//! [`crate::Solver`] and reading its answer back from a [`crate::Solution`].
pub mod queens;
pub mod sudoku;
