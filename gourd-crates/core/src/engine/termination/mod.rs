//! A [`TerminationCondition`] is polled by the search before every node. It tells the search to
//! give up, even though the search space has not been exhausted and the solution sink has not
//! asked to stop. The common example is [`TimeBudget`], which gives the search a fixed amount of
//! wall-clock time.

mod combinator;
mod indefinite;
mod node_budget;
mod time_budget;

pub use combinator::Combinator;
pub use indefinite::Indefinite;
pub use node_budget::NodeBudget;
pub use time_budget::TimeBudget;

/// Determines when the search should stop looking for solutions.
pub trait TerminationCondition {
    /// Returns `true` when the search should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;

    /// Called once for every node the search visits.
    fn node_visited(&mut self) {}
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(t) => t.should_stop(),
            None => false,
        }
    }

    fn node_visited(&mut self) {
        if let Some(t) = self {
            t.node_visited()
        }
    }
}

impl<T: TerminationCondition + ?Sized> TerminationCondition for Box<T> {
    fn should_stop(&mut self) -> bool {
        (**self).should_stop()
    }

    fn node_visited(&mut self) {
        (**self).node_visited()
    }
}
