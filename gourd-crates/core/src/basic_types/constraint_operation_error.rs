use thiserror::Error;

use crate::engine::variables::DomainId;
#[cfg(doc)]
use crate::Solver;

/// Errors related to defining a problem on the [`Solver`]. These are detected when the problem is
/// constructed, before any search takes place.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    /// A constraint refers to a variable which was not created by this [`Solver`].
    #[error("The variable {0} does not exist")]
    UnknownVariable(DomainId),
    /// A fixed value is not part of the (current) domain of the variable, e.g. because the value
    /// lies outside of the declared bounds or because the variable was already fixed to another
    /// value.
    #[error("The value {value} is not in the domain of {variable}")]
    ValueOutsideDomain { variable: DomainId, value: i32 },
    /// A variable was declared with a lower-bound which exceeds its upper-bound.
    #[error("Cannot create a variable with the empty domain [{lower_bound}, {upper_bound}]")]
    EmptyDomain { lower_bound: i32, upper_bound: i32 },
    /// A variable was declared with an empty set of values.
    #[error("Cannot create a variable without any values")]
    EmptySparseDomain,
}
