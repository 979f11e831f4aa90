use std::fmt::Display;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::statistics::log_statistic;
use crate::statistics::log_statistic_postfix;

#[derive(Debug, Default)]
struct Counters {
    num_nodes: AtomicU64,
    num_failures: AtomicU64,
    num_propagations: AtomicU64,
    num_solutions: AtomicU64,
    peak_depth: AtomicU64,
}

/// The counters of a search. Cloning yields a handle onto the same counters, so that they can be
/// read from another thread while the search runs, and so that parallel workers count together.
///
/// All counters only increase.
#[derive(Clone, Debug, Default)]
pub struct SearchStatistics {
    counters: Arc<Counters>,
}

/// The values of [`SearchStatistics`] at one moment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StatisticsSnapshot {
    pub num_nodes: u64,
    pub num_failures: u64,
    pub num_propagations: u64,
    pub num_solutions: u64,
    pub peak_depth: u64,
}

impl SearchStatistics {
    pub fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            num_nodes: self.counters.num_nodes.load(Ordering::Relaxed),
            num_failures: self.counters.num_failures.load(Ordering::Relaxed),
            num_propagations: self.counters.num_propagations.load(Ordering::Relaxed),
            num_solutions: self.counters.num_solutions.load(Ordering::Relaxed),
            peak_depth: self.counters.peak_depth.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn record_node(&self, depth: u64) {
        let _ = self.counters.num_nodes.fetch_add(1, Ordering::Relaxed);
        let _ = self.counters.peak_depth.fetch_max(depth, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        let _ = self.counters.num_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_propagations(&self, num_propagations: u64) {
        let _ = self
            .counters
            .num_propagations
            .fetch_add(num_propagations, Ordering::Relaxed);
    }

    pub(crate) fn record_solution(&self) {
        let _ = self.counters.num_solutions.fetch_add(1, Ordering::Relaxed);
    }

    /// Writes the current values through the statistic logger.
    pub fn log(&self) {
        self.snapshot().log();
    }
}

impl StatisticsSnapshot {
    /// The counters of one run on average, for a snapshot taken after `num_runs` identical
    /// searches on the same statistics. The peak depth is already a maximum and is kept.
    pub fn mean_over(&self, num_runs: u64) -> StatisticsSnapshot {
        let num_runs = num_runs.max(1);
        StatisticsSnapshot {
            num_nodes: self.num_nodes / num_runs,
            num_failures: self.num_failures / num_runs,
            num_propagations: self.num_propagations / num_runs,
            num_solutions: self.num_solutions / num_runs,
            peak_depth: self.peak_depth,
        }
    }

    pub fn log(&self) {
        log_statistic("nodes", self.num_nodes);
        log_statistic("failures", self.num_failures);
        log_statistic("propagations", self.num_propagations);
        log_statistic("solutions", self.num_solutions);
        log_statistic("peakDepth", self.peak_depth);
        log_statistic_postfix();
    }
}

impl Display for StatisticsSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "nodes={} failures={} propagations={} solutions={} peak_depth={}",
            self.num_nodes,
            self.num_failures,
            self.num_propagations,
            self.num_solutions,
            self.peak_depth
        )
    }
}
