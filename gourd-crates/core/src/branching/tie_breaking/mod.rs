//! Tie breakers decide between variables which are considered equally good by a
//! [`VariableSelector`](crate::branching::variable_selection::VariableSelector).
//!
//! A selector calls [`TieBreaker::consider`] for every candidate together with its score, and
//! then [`TieBreaker::select`] to obtain the winner; selecting resets the tie breaker.

mod in_order_tie_breaker;
mod random_tie_breaker;

pub use in_order_tie_breaker::InOrderTieBreaker;
pub use random_tie_breaker::RandomTieBreaker;

use crate::basic_types::Random;

/// Whether a [`TieBreaker`] is looking for the candidate with the largest or the smallest score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Maximum,
    Minimum,
}

impl Direction {
    /// Returns true if `value` is strictly better than `current` in this direction.
    pub(crate) fn improves<Value: PartialOrd>(self, value: &Value, current: &Value) -> bool {
        match self {
            Direction::Maximum => value > current,
            Direction::Minimum => value < current,
        }
    }
}

pub trait TieBreaker<Var, Value> {
    /// Offers `variable` with score `value` as a candidate.
    fn consider(&mut self, variable: Var, value: Value);

    /// Returns the best candidate since the last call to [`TieBreaker::select`], or `None` if
    /// no candidate was considered. Randomised tie breakers draw from `random`.
    fn select(&mut self, random: &mut dyn Random) -> Option<Var>;

    fn get_direction(&self) -> Direction;
}
