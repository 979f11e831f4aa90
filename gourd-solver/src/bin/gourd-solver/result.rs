use gourd_solver::models::sudoku::InvalidPuzzle;
use gourd_solver::ConfigurationError;
use gourd_solver::ConstraintOperationError;
use thiserror::Error;

pub(crate) type GourdResult<T> = Result<T, GourdError>;

#[derive(Error, Debug)]
pub(crate) enum GourdError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The problem definition is invalid: {0}")]
    InvalidProblem(#[from] ConstraintOperationError),
    #[error("The search configuration is invalid: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),
    #[error("The puzzle is invalid: {0}")]
    InvalidPuzzle(#[from] InvalidPuzzle),
}
