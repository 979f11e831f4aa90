use log::warn;

use super::Constraint;
use crate::basic_types::ConstraintOperationError;
use crate::Solver;

/// Returned by [`Solver::add_constraint`]; the constraint only takes effect once
/// [`ConstraintPoster::post`] is called. See [`crate::constraints`] for an example.
#[derive(Debug)]
pub struct ConstraintPoster<'solver, C> {
    solver: &'solver mut Solver,
    /// Taken when the constraint is posted, so that a dropped poster can be detected.
    pending: Option<C>,
}

impl<'solver, C> ConstraintPoster<'solver, C> {
    pub(crate) fn new(solver: &'solver mut Solver, constraint: C) -> Self {
        ConstraintPoster {
            solver,
            pending: Some(constraint),
        }
    }
}

impl<C: Constraint> ConstraintPoster<'_, C> {
    /// Adds the propagators of the constraint to the solver, or narrows the domains it fixes.
    ///
    /// Fails with a [`ConstraintOperationError`] when the constraint mentions a variable of
    /// another solver, or fixes a variable to a value it cannot take.
    pub fn post(mut self) -> Result<(), ConstraintOperationError> {
        let Some(constraint) = self.pending.take() else {
            return Ok(());
        };
        constraint.post(self.solver)
    }
}

impl<C> Drop for ConstraintPoster<'_, C> {
    fn drop(&mut self) {
        if self.pending.is_some() {
            warn!("A constraint was added to the solver but never posted");
        }
    }
}
