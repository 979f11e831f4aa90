mod outputs;
pub(crate) mod solver;

pub mod results {
    //! Contains the outputs of solving using the [`Solver`].
    pub use crate::api::outputs::SatisfactionResult;
    pub use crate::basic_types::Solution;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod variables {
    //! Contains the variables which are used by the [`Solver`].
    //!
    //! A variable is a view onto a domain. A [`DomainId`] forwards the domain unaltered, an
    //! [`OffsetView`] shifts every value by a constant; it is created with
    //! [`TransformableVariable::offset`]. Domains are created with [`Solver::new_bounded_integer`]
    //! or, with holes, with [`Solver::new_sparse_integer`].
    pub use crate::engine::variables::DomainId;
    pub use crate::engine::variables::DomainValues;
    pub use crate::engine::variables::IntegerVariable;
    pub use crate::engine::variables::OffsetView;
    pub use crate::engine::variables::TransformableVariable;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod options {
    //! Contains the options which can be passed to the [`Solver`].
    pub use crate::api::solver::SolverOptions;
    pub use crate::engine::search::ParallelOptions;
    pub use crate::propagators::AllDifferentConsistency;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod termination {
    //! Contains the conditions which are used to determine when the search should stop even
    //! though the search tree has not been exhausted.
    //!
    //! A [`TerminationCondition`] is polled before every node of the search. The most common
    //! example is [`TimeBudget`].
    pub use crate::engine::termination::*;
}

pub mod search {
    //! Contains the depth-first search, its parallel variant, the sinks which receive solutions,
    //! and the statistics of a search.
    pub use crate::engine::search::depth_first_search;
    pub use crate::engine::search::parallel_search;
    pub use crate::engine::search::SearchStatistics;
    pub use crate::engine::search::SearchStatus;
    pub use crate::engine::search::SinkDecision;
    pub use crate::engine::search::SolutionAggregator;
    pub use crate::engine::search::SolutionCollector;
    pub use crate::engine::search::SolutionSink;
    pub use crate::engine::search::StatisticsSnapshot;
}

pub mod state {
    //! Contains the state of a search branch: the domains in their [`DomainStore`] and the
    //! [`Space`] which propagates them.
    pub use crate::basic_types::EmptyDomain;
    pub use crate::basic_types::PropagationStatus;
    pub use crate::engine::domains::Checkpoint;
    pub use crate::engine::domains::Domain;
    pub use crate::engine::domains::DomainEvent;
    pub use crate::engine::domains::DomainEvents;
    pub use crate::engine::domains::DomainIterator;
    pub use crate::engine::DomainStore;
    pub use crate::engine::Space;
    pub use crate::engine::SpaceState;
}

pub mod predicates {
    //! Contains the [`Predicate`]s `[x == v]`, `[x != v]`, `[x >= v]` and `[x <= v]` which are
    //! used as branching decisions.
    pub use crate::engine::predicate::Predicate;
}

pub mod propagators {
    //! Contains the propagators which enforce the constraints, see [`crate::constraints`] for
    //! creating them.
    pub use crate::engine::propagation::Priority;
    pub use crate::engine::propagation::PropagatorId;
    pub use crate::propagators::*;
}
