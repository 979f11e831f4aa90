use log::warn;

use crate::basic_types::Solution;

/// What the search should do after a solution has been handed to a [`SolutionSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SinkDecision {
    Continue,
    Stop,
}

/// Receives the solutions found by the search.
pub trait SolutionSink {
    fn on_solution(&mut self, solution: Solution) -> SinkDecision;
}

impl<F: FnMut(Solution) -> SinkDecision> SolutionSink for F {
    fn on_solution(&mut self, solution: Solution) -> SinkDecision {
        self(solution)
    }
}

/// A [`SolutionSink`] which keeps the solutions and stops once it holds `limit` of them.
#[derive(Clone, Debug, Default)]
pub struct SolutionCollector {
    solutions: Vec<Solution>,
    limit: Option<usize>,
}

impl SolutionCollector {
    /// Stops after the first solution.
    pub fn first() -> Self {
        SolutionCollector::up_to(1)
    }

    /// Stops after `limit` solutions. A limit of zero stops at the first solution without keeping
    /// it.
    pub fn up_to(limit: usize) -> Self {
        if limit == 0 {
            warn!("A solution collector with limit 0 keeps no solutions");
        }
        SolutionCollector {
            solutions: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Never stops the search.
    pub fn all() -> Self {
        SolutionCollector {
            solutions: Vec::new(),
            limit: None,
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn num_solutions(&self) -> usize {
        self.solutions.len()
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
    }
}

impl SolutionSink for SolutionCollector {
    fn on_solution(&mut self, solution: Solution) -> SinkDecision {
        if self.limit.is_some_and(|limit| self.solutions.len() >= limit) {
            return SinkDecision::Stop;
        }
        self.solutions.push(solution);

        match self.limit {
            Some(limit) if self.solutions.len() >= limit => SinkDecision::Stop,
            _ => SinkDecision::Continue,
        }
    }
}
