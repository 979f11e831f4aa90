use std::fmt::Display;
use std::str::FromStr;

use crate::basic_types::ConfigurationError;
use crate::branching::SelectionContext;
use crate::containers::KeyedVec;
use crate::engine::propagation::PropagatorId;
use crate::engine::variables::DomainId;

const RESCALE_THRESHOLD: f64 = 1e100;
const RESCALE_FACTOR: f64 = 1e-100;

/// The rate in `[0, 1)` at which accumulated failure counts forget older failures. A decay of 0
/// never forgets a failure.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Decay(f64);

impl Decay {
    pub fn new(decay: f64) -> Result<Decay, ConfigurationError> {
        if (0.0..1.0).contains(&decay) {
            Ok(Decay(decay))
        } else {
            Err(ConfigurationError::InvalidDecay(decay))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl FromStr for Decay {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decay = s
            .parse::<f64>()
            .map_err(|_| ConfigurationError::MalformedDecay(s.to_owned()))?;
        Decay::new(decay)
    }
}

impl Display for Decay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The accumulated failure count of every propagator, with exponential decay towards older
/// failures.
///
/// Rather than multiplying every count by `1 - decay` at each node, the amount added on a failure
/// grows by `1 / (1 - decay)` per node. All counts are rescaled together once the increment
/// grows too large, which preserves their ratios. A propagator which never failed counts as 1 (in
/// the current scale), so that variables are initially ordered by degree.
///
/// The afc of a variable is the sum of the counts of the active propagators it occurs in.
#[derive(Debug, Clone)]
pub struct AccumulatedFailureCount {
    counts: KeyedVec<PropagatorId, f64>,
    initial_count: f64,
    increment: f64,
    growth: f64,
}

impl AccumulatedFailureCount {
    pub fn new(decay: Decay) -> Self {
        AccumulatedFailureCount {
            counts: KeyedVec::default(),
            initial_count: 1.0,
            increment: 1.0,
            growth: 1.0 / (1.0 - decay.value()),
        }
    }

    /// Ages all counts by one node.
    pub fn on_node(&mut self) {
        self.increment *= self.growth;
        if self.increment > RESCALE_THRESHOLD {
            self.counts
                .iter_mut()
                .for_each(|count| *count *= RESCALE_FACTOR);
            self.initial_count *= RESCALE_FACTOR;
            self.increment *= RESCALE_FACTOR;
        }
    }

    pub fn on_failure(&mut self, failed_propagator: Option<PropagatorId>) {
        if let Some(propagator) = failed_propagator {
            self.counts.accomodate(propagator, self.initial_count);
            self.counts[propagator] += self.increment;
        }
    }

    pub fn propagator_afc(&self, propagator: PropagatorId) -> f64 {
        self.counts
            .get(propagator)
            .copied()
            .unwrap_or(self.initial_count)
    }

    pub fn variable_afc(&self, context: &SelectionContext, variable: DomainId) -> f64 {
        context
            .active_propagators_of(variable)
            .map(|propagator| self.propagator_afc(propagator))
            .sum()
    }

    /// The counts of the propagators in order of their ids, relative to the current scale.
    pub fn relative_counts(&self) -> impl Iterator<Item = f64> + '_ {
        self.counts
            .keys()
            .map(|propagator| self.counts[propagator] / self.initial_count)
    }
}

impl Default for AccumulatedFailureCount {
    fn default() -> Self {
        AccumulatedFailureCount::new(Decay::default())
    }
}
