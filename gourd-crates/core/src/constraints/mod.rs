//! Defines the constraints that gourd provides out of the box which can be added to the
//! [`Solver`].
//!
//! A constraint is a relation over variables. In the solver, constraints are enforced through
//! propagators, and therefore constraints can be viewed as a collection of propagators.
//!
//! # Example
//! ```
//! # use gourd_core::constraints;
//! # use gourd_core::Solver;
//! let mut solver = Solver::default();
//!
//! let a = solver.new_bounded_integer(0, 3).unwrap();
//! let b = solver.new_bounded_integer(0, 3).unwrap();
//!
//! solver.add_constraint(constraints::not_equals(a, b)).post().unwrap();
//! ```
//!
//! A constraint is only checked against the domains when it is posted; an infeasible model is
//! reported by the search rather than by [`ConstraintPoster::post`].

mod all_different;
mod arithmetic;
mod constraint_poster;
mod count;

pub use all_different::*;
pub use arithmetic::*;
pub use constraint_poster::*;
pub use count::*;

use crate::basic_types::ConstraintOperationError;
use crate::propagators::AllDifferentPropagator;
use crate::propagators::CountPropagator;
use crate::propagators::NotEqualPropagator;
use crate::Solver;

/// A [`Constraint`] is a relation over variables. It disqualifies certain partial assignments of
/// making it into a solution of the problem.
///
/// For example, the constraint `a != b` over two variables `a` and `b` rejects every assignment
/// where `a` and `b` take the same value.
pub trait Constraint {
    /// Add the [`Constraint`] to the [`Solver`].
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError>;
}

impl<C: Constraint> Constraint for Vec<C> {
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        self.into_iter().try_for_each(|c| c.post(solver))
    }
}

impl Constraint for NotEqualPropagator {
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        solver.add_propagator(self)
    }
}

impl Constraint for AllDifferentPropagator {
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        solver.add_propagator(self)
    }
}

impl Constraint for CountPropagator {
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        solver.add_propagator(self)
    }
}
