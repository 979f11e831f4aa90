use crate::basic_types::Solution;
#[cfg(doc)]
use crate::Solver;

/// The outcome of [`Solver::satisfy`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SatisfactionResult {
    /// The first solution found by the search.
    Satisfiable(Solution),
    /// The search tree was exhausted without a solution.
    Unsatisfiable,
    /// The search was terminated before it found a solution or exhausted the tree.
    Unknown,
}

impl SatisfactionResult {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SatisfactionResult::Satisfiable(solution) => Some(solution),
            SatisfactionResult::Unsatisfiable | SatisfactionResult::Unknown => None,
        }
    }

    /// Whether the search reached a conclusion, either a solution or a proof that there is none.
    pub fn is_decided(&self) -> bool {
        !matches!(self, SatisfactionResult::Unknown)
    }
}
