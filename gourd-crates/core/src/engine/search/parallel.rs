use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Mutex;

use log::debug;
use log::warn;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use super::depth_first::next_decision;
use crate::basic_types::Solution;
use crate::branching::Brancher;
use crate::engine::search::DepthFirstSearch;
use crate::engine::search::SearchStatistics;
use crate::engine::search::SearchStatus;
use crate::engine::search::SinkDecision;
use crate::engine::search::SolutionSink;
use crate::engine::termination::TerminationCondition;
use crate::engine::Space;

/// The configuration of [`parallel_search`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelOptions {
    pub num_threads: usize,
    /// The search tree is split into about this many subtrees per thread before the workers start.
    pub subproblems_per_thread: usize,
    /// Worker `i` draws its random choices from a generator seeded with `seed ^ i`.
    pub seed: u64,
}

impl Default for ParallelOptions {
    fn default() -> Self {
        ParallelOptions {
            num_threads: std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
            subproblems_per_thread: 4,
            seed: 42,
        }
    }
}

/// Collects the solutions of concurrent searches, and tells all of them to stop once `limit`
/// solutions have been collected.
///
/// Solutions are only ever appended; their order depends on the scheduling of the workers.
#[derive(Debug, Default)]
pub struct SolutionAggregator {
    solutions: Mutex<Vec<Solution>>,
    limit: Option<usize>,
    stop: AtomicBool,
}

impl SolutionAggregator {
    pub fn new(limit: Option<usize>) -> Self {
        if limit == Some(0) {
            warn!("A solution aggregator with limit 0 keeps no solutions");
        }
        SolutionAggregator {
            solutions: Mutex::default(),
            limit,
            stop: AtomicBool::new(false),
        }
    }

    pub fn submit(&self, solution: Solution) -> SinkDecision {
        let Ok(mut solutions) = self.solutions.lock() else {
            self.stop.store(true, Ordering::Relaxed);
            return SinkDecision::Stop;
        };

        if self.limit.is_some_and(|limit| solutions.len() >= limit) {
            self.stop.store(true, Ordering::Relaxed);
            return SinkDecision::Stop;
        }
        solutions.push(solution);

        match self.limit {
            Some(limit) if solutions.len() >= limit => {
                self.stop.store(true, Ordering::Relaxed);
                SinkDecision::Stop
            }
            _ => SinkDecision::Continue,
        }
    }

    /// Whether the limit has been reached or a worker asked to stop.
    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    pub fn num_solutions(&self) -> usize {
        self.solutions.lock().map_or(0, |solutions| solutions.len())
    }

    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn stop_flag(&self) -> &AtomicBool {
        &self.stop
    }
}

impl SolutionSink for &SolutionAggregator {
    fn on_solution(&mut self, solution: Solution) -> SinkDecision {
        self.submit(solution)
    }
}

/// Explores the search tree below `space` with a pool of worker threads.
///
/// The tree is first expanded breadth-first into independent subtrees, each with its own clone
/// of the space. The workers explore the subtrees depth-first with their own brancher and
/// termination condition, created by `make_brancher` and `make_termination`. Solutions and
/// statistics are merged in `aggregator` and `statistics`.
///
/// The result is [`SearchStatus::Stopped`] if the aggregator stopped the search,
/// [`SearchStatus::Terminated`] if any worker was terminated, and [`SearchStatus::Exhausted`]
/// otherwise.
pub fn parallel_search<B, T>(
    space: &Space,
    make_brancher: impl Fn() -> B + Sync,
    make_termination: impl Fn() -> T + Sync,
    aggregator: &SolutionAggregator,
    options: &ParallelOptions,
    statistics: &SearchStatistics,
) -> SearchStatus
where
    B: Brancher,
    T: TerminationCondition,
{
    let num_threads = options.num_threads.max(1);
    let target = num_threads * options.subproblems_per_thread.max(1);

    let subproblems = match split(
        space,
        &mut make_brancher(),
        &mut make_termination(),
        options.seed,
        target,
        aggregator,
        statistics,
    ) {
        Ok(subproblems) => subproblems,
        Err(status) => return status,
    };
    debug!(
        "Exploring {} subtrees with {num_threads} threads",
        subproblems.len()
    );

    let explore = || {
        subproblems
            .into_par_iter()
            .enumerate()
            .map(|(index, (mut subproblem, depth))| {
                if aggregator.is_stopped() {
                    return SearchStatus::Stopped;
                }
                let mut brancher = make_brancher();
                let mut termination = make_termination();
                let mut random = SmallRng::seed_from_u64(options.seed ^ index as u64);
                let mut sink = aggregator;

                DepthFirstSearch {
                    brancher: &mut brancher,
                    sink: &mut sink,
                    termination: &mut termination,
                    random: &mut random,
                    statistics,
                    cancel: Some(aggregator.stop_flag()),
                }
                .run_at_depth(&mut subproblem, depth)
            })
            .collect::<Vec<_>>()
    };

    let statuses = match ThreadPoolBuilder::new().num_threads(num_threads).build() {
        Ok(pool) => pool.install(explore),
        Err(error) => {
            warn!("Could not create a thread pool ({error}), using the global pool");
            explore()
        }
    };

    if aggregator.is_stopped() {
        SearchStatus::Stopped
    } else if statuses.contains(&SearchStatus::Terminated) {
        SearchStatus::Terminated
    } else {
        SearchStatus::Exhausted
    }
}

/// Expands the tree breadth-first until the frontier holds `target` unexplored nodes or the tree
/// is exhausted. Returns the frontier with the depth of each node.
fn split(
    space: &Space,
    brancher: &mut impl Brancher,
    termination: &mut impl TerminationCondition,
    seed: u64,
    target: usize,
    aggregator: &SolutionAggregator,
    statistics: &SearchStatistics,
) -> Result<Vec<(Space, u64)>, SearchStatus> {
    let mut random = SmallRng::seed_from_u64(seed);
    let mut frontier = VecDeque::from([(space.clone(), 0)]);

    while frontier.len() < target {
        let Some((mut node, depth)) = frontier.pop_front() else {
            break;
        };
        if termination.should_stop() {
            return Err(SearchStatus::Terminated);
        }
        termination.node_visited();
        brancher.on_node();
        statistics.record_node(depth);

        let num_propagations = node.num_propagations();
        let status = node.propagate();
        statistics.record_propagations(node.num_propagations() - num_propagations);

        if status.is_failed() {
            statistics.record_failure();
            brancher.on_failure(node.failed_propagator());
            continue;
        }

        let Some(decision) = next_decision(&node, brancher, &mut random) else {
            if let Some(solution) = node.solution() {
                statistics.record_solution();
                brancher.on_solution(&solution);
                if aggregator.submit(solution) == SinkDecision::Stop {
                    return Err(SearchStatus::Stopped);
                }
            }
            continue;
        };

        for branch in [decision, !decision] {
            let mut child = node.clone();
            match child.post(branch) {
                Ok(()) => frontier.push_back((child, depth + 1)),
                Err(_) => {
                    statistics.record_failure();
                    brancher.on_failure(child.failed_propagator());
                }
            }
        }
    }

    Ok(frontier.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::branchers::IndependentVariableValueBrancher;
    use crate::branching::value_selection::InDomainMin;
    use crate::branching::variable_selection::MinDomainSize;
    use crate::engine::search::depth_first_search;
    use crate::engine::search::SolutionCollector;
    use crate::engine::termination::Indefinite;
    use crate::engine::variables::DomainId;
    use crate::engine::variables::TransformableVariable;
    use crate::propagators::AllDifferentConsistency;
    use crate::propagators::AllDifferentPropagator;

    fn queens(n: i32) -> (Space, Vec<DomainId>) {
        let mut space = Space::default();
        let rows = (0..n)
            .map(|_| space.new_variable(0, n - 1).expect("non-empty domain"))
            .collect::<Vec<_>>();
        let ascending = rows
            .iter()
            .enumerate()
            .map(|(index, row)| row.offset(index as i32))
            .collect::<Vec<_>>();
        let descending = rows
            .iter()
            .enumerate()
            .map(|(index, row)| row.offset(-(index as i32)))
            .collect::<Vec<_>>();
        for views in [
            rows.iter().map(|row| row.offset(0)).collect::<Vec<_>>(),
            ascending,
            descending,
        ] {
            let _ = space
                .add_propagator(AllDifferentPropagator::new(
                    views,
                    AllDifferentConsistency::Domain,
                ))
                .expect("variables exist");
        }
        (space, rows)
    }

    fn options(num_threads: usize) -> ParallelOptions {
        ParallelOptions {
            num_threads,
            subproblems_per_thread: 4,
            seed: 7,
        }
    }

    #[test]
    fn parallel_and_sequential_search_agree() {
        let (mut space, rows) = queens(8);
        let statistics = SearchStatistics::default();
        let aggregator = SolutionAggregator::new(None);

        let status = parallel_search(
            &space,
            || IndependentVariableValueBrancher::new(MinDomainSize::new(&rows), InDomainMin),
            || Indefinite,
            &aggregator,
            &options(4),
            &statistics,
        );
        assert_eq!(status, SearchStatus::Exhausted);
        assert_eq!(statistics.snapshot().num_solutions, 92);

        let mut parallel_solutions = aggregator.into_solutions();
        parallel_solutions.sort_by(|a, b| a.values().cmp(b.values()));
        parallel_solutions.dedup();
        assert_eq!(parallel_solutions.len(), 92);

        let mut collector = SolutionCollector::all();
        let _ = depth_first_search(
            &mut space,
            &mut IndependentVariableValueBrancher::new(MinDomainSize::new(&rows), InDomainMin),
            &mut collector,
            &mut Indefinite,
            &mut SmallRng::seed_from_u64(7),
            &SearchStatistics::default(),
        );
        let mut sequential_solutions = collector.into_solutions();
        sequential_solutions.sort_by(|a, b| a.values().cmp(b.values()));
        assert_eq!(parallel_solutions, sequential_solutions);
    }

    #[test]
    fn aggregator_limit_is_exact() {
        let (space, rows) = queens(8);
        let aggregator = SolutionAggregator::new(Some(3));

        let status = parallel_search(
            &space,
            || IndependentVariableValueBrancher::new(MinDomainSize::new(&rows), InDomainMin),
            || Indefinite,
            &aggregator,
            &options(3),
            &SearchStatistics::default(),
        );

        assert_eq!(status, SearchStatus::Stopped);
        let solutions = aggregator.into_solutions();
        assert_eq!(solutions.len(), 3);
        for solution in &solutions {
            assert!(space.is_solution(solution));
        }
    }

    #[test]
    fn infeasible_problem_has_no_subtrees() {
        let (space, rows) = queens(3);
        let aggregator = SolutionAggregator::new(None);

        let status = parallel_search(
            &space,
            || IndependentVariableValueBrancher::new(MinDomainSize::new(&rows), InDomainMin),
            || Indefinite,
            &aggregator,
            &options(2),
            &SearchStatistics::default(),
        );

        assert_eq!(status, SearchStatus::Exhausted);
        assert_eq!(aggregator.num_solutions(), 0);
    }

    #[test]
    fn submissions_past_the_limit_are_rejected() {
        let aggregator = SolutionAggregator::new(Some(1));
        assert_eq!(
            aggregator.submit(Solution::new(vec![1])),
            SinkDecision::Stop
        );
        assert_eq!(
            aggregator.submit(Solution::new(vec![2])),
            SinkDecision::Stop
        );
        assert!(aggregator.is_stopped());
        assert_eq!(aggregator.into_solutions(), vec![Solution::new(vec![1])]);
    }
}
