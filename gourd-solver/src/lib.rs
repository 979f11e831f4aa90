//! # gourd
//! gourd is a finite-domain constraint solver. Problems are stated over integer variables with
//! bounded domains, and constrained by disequalities, all-different constraints and counting
//! constraints. Solutions are found by a depth-first search that propagates every constraint to a
//! fixpoint after each decision.
//!
//! ```rust
//! # use gourd_solver::constraints;
//! # use gourd_solver::termination::Indefinite;
//! # use gourd_solver::Solver;
//! let mut solver = Solver::default();
//!
//! let x = solver.new_bounded_integer(1, 3).unwrap();
//! let y = solver.new_bounded_integer(1, 3).unwrap();
//! solver.add_constraint(constraints::not_equals(x, y)).post().unwrap();
//!
//! let mut brancher = solver.default_brancher();
//! let (_, solutions) = solver.solutions(&mut brancher, &mut Indefinite, None);
//! assert_eq!(solutions.len(), 6);
//! ```
//!
//! The [`models`] module contains the two problems shipped with the solver binary: N-Queens and
//! Sudoku.
pub use gourd_core::*;

pub mod models;
