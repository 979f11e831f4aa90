//! Depth-first exploration of the search tree, sequentially or over parallel subtrees.
//!
//! At every node the [`Space`](crate::engine::Space) is propagated to a fixpoint. A failed node is
//! a leaf; a stable node which is fully assigned is a solution and is handed to a
//! [`SolutionSink`]; any other node is split by the decision of a
//! [`Brancher`](crate::branching::Brancher) into a branch where the decision holds and one where
//! its negation holds.
//!
//! The search stops when the tree is exhausted, when the sink asks it to, or when a
//! [`TerminationCondition`](crate::engine::termination::TerminationCondition) is met. All of these
//! are checked at the start of each node.

mod depth_first;
mod parallel;
mod search_statistics;
mod solution_sink;

pub use depth_first::depth_first_search;
pub use depth_first::SearchStatus;
pub(crate) use depth_first::DepthFirstSearch;
pub use parallel::parallel_search;
pub use parallel::ParallelOptions;
pub use parallel::SolutionAggregator;
pub use search_statistics::SearchStatistics;
pub use search_statistics::StatisticsSnapshot;
pub use solution_sink::SinkDecision;
pub use solution_sink::SolutionCollector;
pub use solution_sink::SolutionSink;
