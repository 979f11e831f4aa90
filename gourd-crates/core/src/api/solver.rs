use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::outputs::SatisfactionResult;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Solution;
use crate::branching::branchers::IndependentVariableValueBrancher;
use crate::branching::value_selection::InDomainMin;
use crate::branching::variable_selection::MinDomainSize;
use crate::branching::Brancher;
use crate::branching::BranchingOptions;
use crate::branching::DynamicBrancher;
use crate::constraints::ConstraintPoster;
use crate::engine::predicate::Predicate;
use crate::engine::search::depth_first_search;
use crate::engine::search::parallel_search;
use crate::engine::search::ParallelOptions;
use crate::engine::search::SearchStatistics;
use crate::engine::search::SearchStatus;
use crate::engine::search::SolutionAggregator;
use crate::engine::search::SolutionCollector;
use crate::engine::search::SolutionSink;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::Space;
use crate::propagators::AllDifferentConsistency;
use crate::propagators::Propagator;

/// The options of a [`Solver`].
#[derive(Clone, Debug)]
pub struct SolverOptions {
    /// The generator from which every random choice of the search is drawn.
    pub random_generator: SmallRng,
    /// The consistency of [`crate::constraints::all_different`].
    pub all_different: AllDifferentConsistency,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            random_generator: SmallRng::seed_from_u64(42),
            all_different: AllDifferentConsistency::default(),
        }
    }
}

/// The main interaction point which allows the creation of variables, the addition of constraints,
/// and solving problems.
///
/// ```rust
/// # use gourd_core::constraints;
/// # use gourd_core::results::SatisfactionResult;
/// # use gourd_core::termination::Indefinite;
/// # use gourd_core::Solver;
/// let mut solver = Solver::default();
///
/// let x = solver.new_bounded_integer(0, 2).unwrap();
/// let y = solver.new_bounded_integer(0, 2).unwrap();
/// let z = solver.new_sparse_integer(vec![0, 2]).unwrap();
///
/// solver
///     .add_constraint(constraints::all_different([x, y, z]))
///     .post()
///     .unwrap();
/// solver.add_constraint(constraints::fixed(z, 0)).post().unwrap();
///
/// let mut brancher = solver.default_brancher();
/// let SatisfactionResult::Satisfiable(solution) = solver.satisfy(&mut brancher, &mut Indefinite)
/// else {
///     panic!("the problem has a solution")
/// };
/// assert_eq!(solution.get_integer_value(z), 0);
/// assert_ne!(solution.get_integer_value(x), solution.get_integer_value(y));
/// ```
#[derive(Debug, Default)]
pub struct Solver {
    space: Space,
    options: SolverOptions,
    statistics: SearchStatistics,
}

impl Solver {
    /// Creates a solver with the provided [`SolverOptions`].
    pub fn with_options(options: SolverOptions) -> Self {
        Solver {
            space: Space::default(),
            options,
            statistics: SearchStatistics::default(),
        }
    }

    /// The counters of all searches performed by this solver.
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Logs the statistics currently present in the solver.
    pub fn log_statistics(&self) {
        self.statistics.log();
    }

    pub fn space(&self) -> &Space {
        &self.space
    }

    pub fn lower_bound(&self, variable: &impl IntegerVariable) -> i32 {
        variable.lower_bound(self.space.domains())
    }

    pub fn upper_bound(&self, variable: &impl IntegerVariable) -> i32 {
        variable.upper_bound(self.space.domains())
    }

    pub fn all_different_consistency(&self) -> AllDifferentConsistency {
        self.options.all_different
    }
}

/// Methods to retrieve new variables.
impl Solver {
    /// Creates a variable with the domain `[lower_bound, upper_bound]`.
    pub fn new_bounded_integer(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
    ) -> Result<DomainId, ConstraintOperationError> {
        self.space.new_variable(lower_bound, upper_bound)
    }

    /// Creates a variable whose domain consists of the given values.
    pub fn new_sparse_integer(
        &mut self,
        values: impl Into<Vec<i32>>,
    ) -> Result<DomainId, ConstraintOperationError> {
        self.space.new_sparse_variable(&values.into())
    }

    /// All variables, in order of creation.
    pub fn variables(&self) -> impl Iterator<Item = DomainId> {
        self.space.domains().domain_ids()
    }
}

/// Functions for adding new constraints to the solver.
impl Solver {
    /// Add a constraint to the solver. This returns a [`ConstraintPoster`] on which
    /// [`ConstraintPoster::post`] adds the constraint.
    ///
    /// If the poster is not used, the constraint _is not_ actually added to the solver. In this
    /// case, a warning is emitted.
    pub fn add_constraint<Constraint>(
        &mut self,
        constraint: Constraint,
    ) -> ConstraintPoster<'_, Constraint> {
        ConstraintPoster::new(self, constraint)
    }

    /// Adds a propagator, which is first run at the start of the next search.
    pub(crate) fn add_propagator(
        &mut self,
        propagator: impl Into<Propagator>,
    ) -> Result<(), ConstraintOperationError> {
        let _ = self.space.add_propagator(propagator)?;
        Ok(())
    }

    /// Removes every value but `value` from the domain of `variable`. Fails if the value is not
    /// in the current domain.
    pub(crate) fn fix(
        &mut self,
        variable: impl IntegerVariable,
        value: i32,
    ) -> Result<(), ConstraintOperationError> {
        let domain_id = variable.domain_id();
        if !self.space.domains().has_domain(domain_id) {
            return Err(ConstraintOperationError::UnknownVariable(domain_id));
        }
        if !variable.contains(self.space.domains(), value) {
            return Err(ConstraintOperationError::ValueOutsideDomain {
                variable: domain_id,
                value,
            });
        }

        let view = variable.view();
        self.space
            .post(Predicate::Equal {
                domain_id,
                value: value - view.offset_value(),
            })
            .map_err(|_| ConstraintOperationError::ValueOutsideDomain {
                variable: domain_id,
                value,
            })
    }
}

/// Functions for solving with the constraints that have been added to the [`Solver`].
impl Solver {
    /// Explores the whole search tree, or until `sink` asks to stop or `termination` triggers,
    /// and hands every solution to `sink`.
    pub fn search<B, S, T>(
        &mut self,
        brancher: &mut B,
        sink: &mut S,
        termination: &mut T,
    ) -> SearchStatus
    where
        B: Brancher + ?Sized,
        S: SolutionSink + ?Sized,
        T: TerminationCondition + ?Sized,
    {
        debug!(
            "Searching over {} variables and {} propagators",
            self.space.num_variables(),
            self.space.num_propagators()
        );
        depth_first_search(
            &mut self.space,
            brancher,
            sink,
            termination,
            &mut self.options.random_generator,
            &self.statistics,
        )
    }

    /// Searches until it finds a solution (or is indicated to terminate by the provided
    /// [`TerminationCondition`]).
    pub fn satisfy<B, T>(&mut self, brancher: &mut B, termination: &mut T) -> SatisfactionResult
    where
        B: Brancher + ?Sized,
        T: TerminationCondition + ?Sized,
    {
        let mut collector = SolutionCollector::first();
        match self.search(brancher, &mut collector, termination) {
            SearchStatus::Terminated => SatisfactionResult::Unknown,
            SearchStatus::Exhausted | SearchStatus::Stopped => {
                match collector.into_solutions().pop() {
                    Some(solution) => SatisfactionResult::Satisfiable(solution),
                    None => SatisfactionResult::Unsatisfiable,
                }
            }
        }
    }

    /// Collects up to `limit` solutions, or all of them if there is no limit.
    pub fn solutions<B, T>(
        &mut self,
        brancher: &mut B,
        termination: &mut T,
        limit: Option<usize>,
    ) -> (SearchStatus, Vec<Solution>)
    where
        B: Brancher + ?Sized,
        T: TerminationCondition + ?Sized,
    {
        let mut collector = match limit {
            Some(limit) => SolutionCollector::up_to(limit),
            None => SolutionCollector::all(),
        };
        let status = self.search(brancher, &mut collector, termination);
        (status, collector.into_solutions())
    }

    /// Explores the search tree with a pool of worker threads, see [`parallel_search`].
    pub fn search_parallel<B, T>(
        &self,
        make_brancher: impl Fn() -> B + Sync,
        make_termination: impl Fn() -> T + Sync,
        aggregator: &SolutionAggregator,
        options: &ParallelOptions,
    ) -> SearchStatus
    where
        B: Brancher,
        T: TerminationCondition,
    {
        parallel_search(
            &self.space,
            make_brancher,
            make_termination,
            aggregator,
            options,
            &self.statistics,
        )
    }
}

/// Branchers over the variables of the solver.
impl Solver {
    /// Branches on the variable with the smallest domain, and tries its smallest value first.
    pub fn default_brancher(&self) -> DynamicBrancher {
        let variables = self.variables().collect::<Vec<_>>();
        IndependentVariableValueBrancher::new(
            Box::new(MinDomainSize::new(&variables)),
            Box::new(InDomainMin),
        )
    }

    /// Builds the brancher described by `options` over all variables of the solver.
    pub fn brancher(&self, options: &BranchingOptions) -> DynamicBrancher {
        options.build(&self.variables().collect::<Vec<_>>())
    }
}
