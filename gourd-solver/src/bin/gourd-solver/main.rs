mod os_signal_termination;
mod result;

use std::io::Write;
use std::time::Duration;
use std::time::Instant;

use clap::Parser;
use clap::Subcommand;
use gourd_solver::branching::variable_selection::Decay;
use gourd_solver::branching::BranchingOptions;
use gourd_solver::branching::ValueSelectionPolicy;
use gourd_solver::branching::VariableSelectionPolicy;
use gourd_solver::convert_case::Case;
use gourd_solver::models::queens::Queens;
use gourd_solver::models::queens::QueensModel;
use gourd_solver::models::sudoku::Puzzle;
use gourd_solver::models::sudoku::Sudoku;
use gourd_solver::options::AllDifferentConsistency;
use gourd_solver::options::ParallelOptions;
use gourd_solver::options::SolverOptions;
use gourd_solver::rand::rngs::SmallRng;
use gourd_solver::rand::SeedableRng;
use gourd_solver::search::SearchStatus;
use gourd_solver::search::SolutionAggregator;
use gourd_solver::statistics::configure_statistic_logging;
use gourd_solver::statistics::log_statistic;
use gourd_solver::termination::Combinator;
use gourd_solver::termination::NodeBudget;
use gourd_solver::termination::TimeBudget;
use gourd_solver::variables::DomainId;
use gourd_solver::Solution;
use gourd_solver::Solver;
use log::debug;
use log::error;
use log::info;
use log::warn;
use log::LevelFilter;
use os_signal_termination::OsSignal;
use result::GourdResult;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    #[command(subcommand)]
    problem: Problem,
}

#[derive(Debug, Subcommand)]
enum Problem {
    /// Place queens on a chess board such that no two queens attack each other.
    Queens(QueensArgs),
    /// Complete a sudoku grid.
    Sudoku(SudokuArgs),
}

#[derive(Debug, clap::Args)]
struct QueensArgs {
    /// The number of queens, which is also the number of rows and columns of the board.
    #[arg(long, default_value_t = 8)]
    size: usize,

    /// How the problem is encoded.
    ///
    /// Possible values: binary, mixed, distinct, one-hot
    #[arg(long, default_value_t, verbatim_doc_comment)]
    model: QueensModel,

    #[command(flatten)]
    search: SearchArgs,
}

#[derive(Debug, clap::Args)]
struct SudokuArgs {
    /// The index of a built-in puzzle: 0 is a 4x4 grid, 1 and 2 are 9x9 grids and 3 is a 16x16
    /// grid.
    #[arg(long, default_value_t = 1)]
    puzzle: usize,

    /// A grid of n^4 cells in row-major order, which takes precedence over `--puzzle`.
    ///
    /// Cells are digits, or letters for the values from 10 upwards; '.' and '0' are empty cells.
    #[arg(long)]
    grid: Option<String>,

    #[command(flatten)]
    search: SearchArgs,
}

#[derive(Debug, clap::Args)]
struct SearchArgs {
    /// Which variable to branch on. Defaults to 'min-size' for queens and to 'sizeafc' for sudoku.
    ///
    /// Possible values: input-order (none), min-size (size), max-degree (degree),
    /// min-size-over-degree (sizedeg), afc, min-size-over-afc (sizeafc), random
    #[arg(long, verbatim_doc_comment)]
    branching: Option<VariableSelectionPolicy>,

    /// How to split the domain of the selected variable. Defaults to 'min' for queens and to
    /// 'split-min' for sudoku.
    ///
    /// Possible values: min, max, split-min, random
    #[arg(long, verbatim_doc_comment)]
    value: Option<ValueSelectionPolicy>,

    /// The consistency of the all-different constraints.
    ///
    /// Possible values: value, bounds, domain
    #[arg(long, default_value_t, verbatim_doc_comment)]
    propagation: AllDifferentConsistency,

    /// The number of solutions to report; 0 reports all of them.
    #[arg(long, default_value_t = 1)]
    solutions: usize,

    /// The seed of every random choice made during search.
    #[arg(long, default_value_t = 42)]
    random_seed: u64,

    /// The decay of the accumulated failure counts, in [0, 1).
    #[arg(long, default_value_t)]
    decay: Decay,

    /// Break ties between equally good variables randomly rather than by input order.
    #[arg(long)]
    random_tie_breaking: bool,

    /// The number of times the search is repeated for benchmarking. A single run is the default;
    /// with more runs, the mean time and the mean statistics of a run are reported.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    iterations: u32,

    /// The time limit in milliseconds of every search.
    #[arg(long)]
    time_limit: Option<u64>,

    /// The maximum number of nodes visited by every search. In a parallel search, the limit
    /// applies to each worker.
    #[arg(long)]
    node_limit: Option<u64>,

    /// Explore the search tree with this many threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Log the search milestones.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Log the statistics of the search when it finishes.
    #[arg(short = 's', long)]
    log_statistics: bool,
}

impl SearchArgs {
    fn branching_options(
        &self,
        variable_selection: VariableSelectionPolicy,
        value_selection: ValueSelectionPolicy,
    ) -> BranchingOptions {
        BranchingOptions {
            variable_selection: self.branching.unwrap_or(variable_selection),
            value_selection: self.value.unwrap_or(value_selection),
            afc_decay: self.decay,
            random_tie_breaking: self.random_tie_breaking,
        }
    }

    fn solution_limit(&self) -> Option<usize> {
        (self.solutions > 0).then_some(self.solutions)
    }
}

impl Problem {
    fn search_args(&self) -> &SearchArgs {
        match self {
            Problem::Queens(args) => &args.search,
            Problem::Sudoku(args) => &args.search,
        }
    }
}

fn configure_logging(verbose: bool, log_statistics: bool) -> std::io::Result<()> {
    if log_statistics {
        configure_statistic_logging(
            "%%%mzn-stat:",
            Some("%%%mzn-stat-end"),
            Some(Case::Camel),
            None,
        );
    }
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "% ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
    Ok(())
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> GourdResult<()> {
    let args = Args::parse();
    let search = args.problem.search_args();

    configure_logging(search.verbose, search.log_statistics)?;

    if gourd_solver::asserts::GOURD_ASSERT_LEVEL_DEFINITION
        >= gourd_solver::asserts::GOURD_ASSERT_MODERATE
    {
        warn!(
            "Potential performance degradation: the gourd assert level is set to {}, meaning many debug asserts are active which may result in performance degradation.",
            gourd_solver::asserts::GOURD_ASSERT_LEVEL_DEFINITION
        );
    };

    let mut solver = Solver::with_options(SolverOptions {
        random_generator: SmallRng::seed_from_u64(search.random_seed),
        all_different: search.propagation,
    });

    match &args.problem {
        Problem::Queens(queens_args) => {
            let queens = Queens::build(&mut solver, queens_args.size, queens_args.model)?;
            let branching = search
                .branching_options(VariableSelectionPolicy::MinSize, ValueSelectionPolicy::Min);
            let (status, solutions) =
                solve(&mut solver, queens.variables(), &branching, search)?;
            print_solutions(status, &solutions, |solution| queens.format(solution));
        }
        Problem::Sudoku(sudoku_args) => {
            let puzzle = match &sudoku_args.grid {
                Some(grid) => Puzzle::parse(grid)?,
                None => Puzzle::built_in(sudoku_args.puzzle)?,
            };
            let sudoku = Sudoku::build(&mut solver, &puzzle)?;
            let branching = search.branching_options(
                VariableSelectionPolicy::MinSizeOverAfc,
                ValueSelectionPolicy::SplitMin,
            );
            let (status, solutions) =
                solve(&mut solver, sudoku.variables(), &branching, search)?;
            print_solutions(status, &solutions, |solution| sudoku.format(solution));
        }
    }

    Ok(())
}

/// Runs the search `--iterations` times, and returns the outcome of the last run. The logged
/// statistics describe one run on average.
fn solve(
    solver: &mut Solver,
    variables: &[DomainId],
    branching: &BranchingOptions,
    search: &SearchArgs,
) -> GourdResult<(SearchStatus, Vec<Solution>)> {
    let signal = OsSignal::install()?;
    let limit = search.solution_limit();
    let node_budget = search.node_limit.map(NodeBudget::new);

    let mut total_time = Duration::ZERO;
    let mut outcome = (SearchStatus::Exhausted, Vec::new());
    for iteration in 1..=search.iterations {
        let time_budget = search
            .time_limit
            .map(|limit| TimeBudget::starting_now(Duration::from_millis(limit)));
        let make_termination =
            || Combinator::new(signal.clone(), Combinator::new(time_budget, node_budget));

        let started = Instant::now();
        outcome = match search.threads {
            Some(num_threads) => {
                let aggregator = SolutionAggregator::new(limit);
                let options = ParallelOptions {
                    num_threads,
                    seed: search.random_seed,
                    ..Default::default()
                };
                let status = solver.search_parallel(
                    || branching.build(variables),
                    make_termination,
                    &aggregator,
                    &options,
                );
                (status, aggregator.into_solutions())
            }
            None => {
                let mut brancher = branching.build(variables);
                solver.solutions(&mut brancher, &mut make_termination(), limit)
            }
        };
        let elapsed = started.elapsed();
        total_time += elapsed;

        debug!(
            "Iteration {iteration} ended with {:?} and {} solutions after {elapsed:?}",
            outcome.0,
            outcome.1.len()
        );
    }

    let mean_time = total_time / search.iterations;
    if search.iterations > 1 {
        println!(
            "% Mean time over {} iterations: {:.3} ms",
            search.iterations,
            mean_time.as_secs_f64() * 1000.0
        );
    }
    log_statistic("iterations", search.iterations);
    log_statistic("meanTimeMs", mean_time.as_secs_f64() * 1000.0);
    solver
        .statistics()
        .snapshot()
        .mean_over(u64::from(search.iterations))
        .log();

    Ok(outcome)
}

/// Prints every solution followed by `----------`, and closes with `==========` when the search
/// space was exhausted.
fn print_solutions(
    status: SearchStatus,
    solutions: &[Solution],
    format: impl Fn(&Solution) -> String,
) {
    for solution in solutions {
        print!("{}", format(solution));
        println!("----------");
    }

    match status {
        SearchStatus::Exhausted if solutions.is_empty() => println!("=====UNSATISFIABLE====="),
        SearchStatus::Exhausted => println!("=========="),
        SearchStatus::Terminated if solutions.is_empty() => println!("=====UNKNOWN====="),
        SearchStatus::Stopped | SearchStatus::Terminated => {}
    }
    info!("Found {} solutions", solutions.len());
}
