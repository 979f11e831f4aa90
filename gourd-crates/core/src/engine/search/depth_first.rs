use std::ops::ControlFlow;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use log::debug;
use log::trace;

use crate::basic_types::Random;
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::engine::predicate::Predicate;
use crate::engine::search::SearchStatistics;
use crate::engine::search::SinkDecision;
use crate::engine::search::SolutionSink;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::IntegerVariable;
use crate::engine::Space;
use crate::gourd_assert_advanced;

/// How a search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchStatus {
    /// The whole search tree was explored.
    Exhausted,
    /// The solution sink asked the search to stop.
    Stopped,
    /// A termination condition was met before the tree was exhausted.
    Terminated,
}

/// Explores the search tree below the current state of `space` and hands every solution to
/// `sink`.
///
/// The space is returned to its state from before the call. The caller's `termination` is polled,
/// and notified, once per node.
pub fn depth_first_search(
    space: &mut Space,
    brancher: &mut (impl Brancher + ?Sized),
    sink: &mut (impl SolutionSink + ?Sized),
    termination: &mut (impl TerminationCondition + ?Sized),
    random: &mut dyn Random,
    statistics: &SearchStatistics,
) -> SearchStatus {
    let mut search = DepthFirstSearch {
        brancher,
        sink,
        termination,
        random,
        statistics,
        cancel: None,
    };
    search.run(space)
}

/// The state of one sequential search, borrowed for its duration.
pub(crate) struct DepthFirstSearch<'a, B: ?Sized, S: ?Sized, T: ?Sized> {
    pub(crate) brancher: &'a mut B,
    pub(crate) sink: &'a mut S,
    pub(crate) termination: &'a mut T,
    pub(crate) random: &'a mut dyn Random,
    pub(crate) statistics: &'a SearchStatistics,
    /// Raised when any cooperating search stops; checked at every node.
    pub(crate) cancel: Option<&'a AtomicBool>,
}

impl<B: ?Sized, S: ?Sized, T: ?Sized> std::fmt::Debug for DepthFirstSearch<'_, B, S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepthFirstSearch")
            .field("statistics", &self.statistics)
            .finish()
    }
}

impl<B, S, T> DepthFirstSearch<'_, B, S, T>
where
    B: Brancher + ?Sized,
    S: SolutionSink + ?Sized,
    T: TerminationCondition + ?Sized,
{
    pub(crate) fn run(&mut self, space: &mut Space) -> SearchStatus {
        self.run_at_depth(space, 0)
    }

    pub(crate) fn run_at_depth(&mut self, space: &mut Space, depth: u64) -> SearchStatus {
        let root = space.checkpoint();
        let outcome = self.explore(space, depth);
        space.restore_to(root);

        let status = match outcome {
            ControlFlow::Continue(()) => SearchStatus::Exhausted,
            ControlFlow::Break(status) => status,
        };
        debug!("Search finished: {status:?} ({})", self.statistics.snapshot());
        status
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .is_some_and(|cancel| cancel.load(Ordering::Relaxed))
    }

    fn explore(&mut self, space: &mut Space, depth: u64) -> ControlFlow<SearchStatus> {
        if self.is_cancelled() {
            return ControlFlow::Break(SearchStatus::Stopped);
        }
        if self.termination.should_stop() {
            return ControlFlow::Break(SearchStatus::Terminated);
        }
        self.termination.node_visited();
        self.brancher.on_node();
        self.statistics.record_node(depth);

        let num_propagations = space.num_propagations();
        let status = space.propagate();
        self.statistics
            .record_propagations(space.num_propagations() - num_propagations);

        if status.is_failed() {
            trace!("Failure at depth {depth}");
            self.statistics.record_failure();
            self.brancher.on_failure(space.failed_propagator());
            return ControlFlow::Continue(());
        }

        let Some(decision) = next_decision(space, self.brancher, self.random) else {
            return self.emit_solution(space);
        };

        trace!("Branching on {decision} at depth {depth}");
        self.explore_branch(space, decision, depth)?;
        self.explore_branch(space, !decision, depth)
    }

    fn explore_branch(
        &mut self,
        space: &mut Space,
        decision: Predicate,
        depth: u64,
    ) -> ControlFlow<SearchStatus> {
        let checkpoint = space.checkpoint();
        let outcome = match space.post(decision) {
            Ok(()) => self.explore(space, depth + 1),
            Err(_) => {
                self.statistics.record_failure();
                self.brancher.on_failure(space.failed_propagator());
                ControlFlow::Continue(())
            }
        };
        space.restore_to(checkpoint);
        outcome
    }

    fn emit_solution(&mut self, space: &Space) -> ControlFlow<SearchStatus> {
        let Some(solution) = space.solution() else {
            return ControlFlow::Continue(());
        };
        gourd_assert_advanced!(
            space.is_solution(&solution),
            "An assignment at a fixpoint violates a constraint"
        );

        self.statistics.record_solution();
        self.brancher.on_solution(&solution);
        debug!("Found solution {}", self.statistics.snapshot().num_solutions);

        match self.sink.on_solution(solution) {
            SinkDecision::Continue => ControlFlow::Continue(()),
            SinkDecision::Stop => {
                if let Some(cancel) = self.cancel {
                    cancel.store(true, Ordering::Relaxed);
                }
                ControlFlow::Break(SearchStatus::Stopped)
            }
        }
    }
}

/// The decision of the brancher, or an assignment of the first unfixed variable when the brancher
/// does not cover every variable. Returns `None` when every variable is fixed.
pub(crate) fn next_decision(
    space: &Space,
    brancher: &mut (impl Brancher + ?Sized),
    random: &mut dyn Random,
) -> Option<Predicate> {
    let mut context = SelectionContext::new(space, random);
    brancher.next_decision(&mut context).or_else(|| {
        space
            .domains()
            .domain_ids()
            .find(|&domain| !domain.is_fixed(space.domains()))
            .map(|domain_id| Predicate::Equal {
                domain_id,
                value: domain_id.lower_bound(space.domains()),
            })
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::basic_types::Solution;
    use crate::branching::branchers::IndependentVariableValueBrancher;
    use crate::branching::value_selection::InDomainMin;
    use crate::branching::variable_selection::InputOrder;
    use crate::engine::propagation::PropagatorId;
    use crate::engine::search::SolutionCollector;
    use crate::engine::termination::Indefinite;
    use crate::engine::termination::NodeBudget;
    use crate::engine::variables::DomainId;
    use crate::engine::variables::TransformableVariable;
    use crate::propagators::AllDifferentConsistency;
    use crate::propagators::AllDifferentPropagator;
    use crate::propagators::NotEqualPropagator;

    fn queens(n: i32) -> (Space, Vec<DomainId>) {
        let mut space = Space::default();
        let rows = (0..n)
            .map(|_| space.new_variable(0, n - 1).expect("non-empty domain"))
            .collect::<Vec<_>>();
        for (index, &row) in rows.iter().enumerate() {
            for (other_index, &other) in rows.iter().enumerate().skip(index + 1) {
                let distance = (other_index - index) as i32;
                let _ = space
                    .add_propagator(NotEqualPropagator::new(row, other))
                    .expect("variables exist");
                let _ = space
                    .add_propagator(NotEqualPropagator::new(row, other.offset(distance)))
                    .expect("variables exist");
                let _ = space
                    .add_propagator(NotEqualPropagator::new(row, other.offset(-distance)))
                    .expect("variables exist");
            }
        }
        (space, rows)
    }

    fn solve(
        space: &mut Space,
        variables: &[DomainId],
        sink: &mut impl SolutionSink,
        termination: &mut impl TerminationCondition,
    ) -> (SearchStatus, SearchStatistics) {
        let mut brancher =
            IndependentVariableValueBrancher::new(InputOrder::new(variables), InDomainMin);
        let mut random = SmallRng::seed_from_u64(42);
        let statistics = SearchStatistics::default();
        let status = depth_first_search(
            space,
            &mut brancher,
            sink,
            termination,
            &mut random,
            &statistics,
        );
        (status, statistics)
    }

    #[test]
    fn six_queens_has_four_solutions() {
        let (mut space, rows) = queens(6);
        let mut collector = SolutionCollector::all();

        let (status, statistics) = solve(&mut space, &rows, &mut collector, &mut Indefinite);

        assert_eq!(status, SearchStatus::Exhausted);
        assert_eq!(collector.num_solutions(), 4);
        assert_eq!(statistics.snapshot().num_solutions, 4);
        for solution in collector.solutions() {
            assert!(space.is_solution(solution));
        }
    }

    #[test]
    fn solutions_are_enumerated_in_branching_order() {
        let (mut space, rows) = queens(4);
        let mut collector = SolutionCollector::all();

        let _ = solve(&mut space, &rows, &mut collector, &mut Indefinite);

        let values = collector
            .solutions()
            .iter()
            .map(|solution| solution.values().to_vec())
            .collect::<Vec<_>>();
        assert_eq!(values, vec![vec![1, 3, 0, 2], vec![2, 0, 3, 1]]);
    }

    #[test]
    fn stopping_sink_ends_the_search_immediately() {
        let (mut space, rows) = queens(8);
        let mut nodes_at_stop = None;
        let statistics = SearchStatistics::default();
        let handle = statistics.clone();
        let mut sink = |_: Solution| {
            nodes_at_stop = Some(handle.snapshot());
            SinkDecision::Stop
        };
        let mut brancher =
            IndependentVariableValueBrancher::new(InputOrder::new(&rows), InDomainMin);
        let mut random = SmallRng::seed_from_u64(42);

        let status = depth_first_search(
            &mut space,
            &mut brancher,
            &mut sink,
            &mut Indefinite,
            &mut random,
            &statistics,
        );

        assert_eq!(status, SearchStatus::Stopped);
        let at_stop = nodes_at_stop.expect("a solution was found");
        assert_eq!(at_stop.num_solutions, 1);
        assert_eq!(statistics.snapshot(), at_stop);
    }

    #[test]
    fn space_is_restored_after_search() {
        let (mut space, rows) = queens(5);
        let before = rows
            .iter()
            .map(|&row| row.size(space.domains()))
            .collect::<Vec<_>>();

        let _ = solve(&mut space, &rows, &mut SolutionCollector::all(), &mut Indefinite);

        let after = rows
            .iter()
            .map(|&row| row.size(space.domains()))
            .collect::<Vec<_>>();
        assert_eq!(before, after);
        assert_eq!(space.domains().checkpoint_depth(), 0);
    }

    #[test]
    fn root_failure_yields_no_solutions() {
        let mut space = Space::default();
        let variables = (0..3)
            .map(|_| space.new_variable(1, 2).expect("non-empty domain"))
            .collect::<Vec<_>>();
        let _ = space
            .add_propagator(AllDifferentPropagator::new(
                variables.iter().copied(),
                AllDifferentConsistency::Value,
            ))
            .expect("variables exist");
        let mut collector = SolutionCollector::all();

        let (status, statistics) = solve(&mut space, &variables, &mut collector, &mut Indefinite);

        assert_eq!(status, SearchStatus::Exhausted);
        assert_eq!(collector.num_solutions(), 0);
        assert_eq!(statistics.snapshot().num_nodes, 1);
        assert_eq!(statistics.snapshot().num_failures, 1);
    }

    #[test]
    fn node_budget_terminates_the_search() {
        let (mut space, rows) = queens(8);
        let mut collector = SolutionCollector::all();

        let (status, statistics) =
            solve(&mut space, &rows, &mut collector, &mut NodeBudget::new(10));

        assert_eq!(status, SearchStatus::Terminated);
        assert_eq!(statistics.snapshot().num_nodes, 10);
    }

    /// Branches once on a value outside the domain of its variable, and counts the failures it
    /// is told about.
    #[derive(Debug)]
    struct OutOfDomainBrancher {
        variable: DomainId,
        has_branched: bool,
        num_failures: usize,
    }

    impl Brancher for OutOfDomainBrancher {
        fn next_decision(&mut self, _: &mut SelectionContext) -> Option<Predicate> {
            if self.has_branched {
                return None;
            }
            self.has_branched = true;
            Some(Predicate::Equal {
                domain_id: self.variable,
                value: 7,
            })
        }

        fn on_failure(&mut self, _: Option<PropagatorId>) {
            self.num_failures += 1;
        }
    }

    #[test]
    fn failing_decision_is_reported_to_the_brancher() {
        let mut space = Space::default();
        let x = space.new_variable(0, 1).expect("non-empty domain");
        let mut brancher = OutOfDomainBrancher {
            variable: x,
            has_branched: false,
            num_failures: 0,
        };
        let mut collector = SolutionCollector::all();
        let statistics = SearchStatistics::default();

        let status = depth_first_search(
            &mut space,
            &mut brancher,
            &mut collector,
            &mut Indefinite,
            &mut SmallRng::seed_from_u64(42),
            &statistics,
        );

        assert_eq!(status, SearchStatus::Exhausted);
        assert_eq!(collector.num_solutions(), 2);
        assert_eq!(statistics.snapshot().num_failures, 1);
        assert_eq!(brancher.num_failures, 1);
    }

    #[test]
    fn unbranched_variables_are_still_assigned() {
        let mut space = Space::default();
        let x = space.new_variable(0, 1).expect("non-empty domain");
        let y = space.new_variable(0, 1).expect("non-empty domain");
        let _ = space
            .add_propagator(NotEqualPropagator::new(x, y))
            .expect("variables exist");
        let mut collector = SolutionCollector::all();

        let _ = solve(&mut space, &[], &mut collector, &mut Indefinite);

        assert_eq!(collector.num_solutions(), 2);
    }
}
