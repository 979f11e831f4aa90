//! The N-Queens problem: place `n` queens on an `n x n` board such that no two queens share a
//! row, a column or a diagonal.
//!
//! Four encodings are provided. The first three have one variable per column holding the row of
//! its queen, and differ in how the constraints are stated. [`QueensModel::OneHot`] has a 0/1
//! variable per square instead.
use std::fmt::Display;
use std::str::FromStr;

use crate::constraints;
use crate::variables::DomainId;
use crate::variables::TransformableVariable;
use crate::ConfigurationError;
use crate::ConstraintOperationError;
use crate::Solution;
use crate::Solver;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum QueensModel {
    /// Pairwise disequalities for the rows and both diagonals.
    Binary,
    /// An all-different over the rows, and pairwise disequalities for the diagonals.
    Mixed,
    /// An all-different over the rows and over both (offset) diagonals.
    #[default]
    Distinct,
    /// A 0/1 board with exactly one queen per row and column, and at most one per diagonal.
    OneHot,
}

impl QueensModel {
    pub const ALL: [QueensModel; 4] = [
        QueensModel::Binary,
        QueensModel::Mixed,
        QueensModel::Distinct,
        QueensModel::OneHot,
    ];
}

impl FromStr for QueensModel {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary" => Ok(QueensModel::Binary),
            "mixed" => Ok(QueensModel::Mixed),
            "distinct" => Ok(QueensModel::Distinct),
            "one-hot" => Ok(QueensModel::OneHot),
            _ => Err(ConfigurationError::UnknownPolicy {
                kind: "queens model",
                name: s.to_owned(),
                expected: "binary, mixed, distinct, one-hot",
            }),
        }
    }
}

impl Display for QueensModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueensModel::Binary => write!(f, "binary"),
            QueensModel::Mixed => write!(f, "mixed"),
            QueensModel::Distinct => write!(f, "distinct"),
            QueensModel::OneHot => write!(f, "one-hot"),
        }
    }
}

/// The variables of an N-Queens instance posted on a [`Solver`].
#[derive(Clone, Debug)]
pub struct Queens {
    size: usize,
    model: QueensModel,
    /// Either the row of the queen in every column, or the 0/1 squares in row-major order.
    variables: Vec<DomainId>,
}

impl Queens {
    /// Creates the variables and posts the constraints of an instance with `size` queens.
    ///
    /// An empty board is rejected as [`ConstraintOperationError::EmptyDomain`], since the rows
    /// `0..size` a queen can be placed in are empty.
    pub fn build(
        solver: &mut Solver,
        size: usize,
        model: QueensModel,
    ) -> Result<Queens, ConstraintOperationError> {
        let upper = size as i32 - 1;
        if size == 0 {
            return Err(ConstraintOperationError::EmptyDomain {
                lower_bound: 0,
                upper_bound: upper,
            });
        }
        let variables = match model {
            QueensModel::OneHot => (0..size * size)
                .map(|_| solver.new_bounded_integer(0, 1))
                .collect::<Result<Vec<_>, _>>()?,
            _ => (0..size)
                .map(|_| solver.new_bounded_integer(0, upper))
                .collect::<Result<Vec<_>, _>>()?,
        };

        let queens = Queens {
            size,
            model,
            variables,
        };
        match model {
            QueensModel::Binary => queens.post_binary(solver)?,
            QueensModel::Mixed => queens.post_mixed(solver)?,
            QueensModel::Distinct => queens.post_distinct(solver)?,
            QueensModel::OneHot => queens.post_one_hot(solver)?,
        }
        Ok(queens)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn model(&self) -> QueensModel {
        self.model
    }

    /// The variables to branch on.
    pub fn variables(&self) -> &[DomainId] {
        &self.variables
    }

    /// The row of the queen in every column.
    pub fn placement(&self, solution: &Solution) -> Vec<usize> {
        match self.model {
            QueensModel::OneHot => (0..self.size)
                .map(|column| {
                    (0..self.size)
                        .position(|row| {
                            solution.get_integer_value(self.square(row, column)) == 1
                        })
                        .unwrap_or(0)
                })
                .collect(),
            _ => self
                .variables
                .iter()
                .map(|&queen| solution.get_integer_value(queen) as usize)
                .collect(),
        }
    }

    /// Draws the board with a `Q` for every queen.
    pub fn format(&self, solution: &Solution) -> String {
        let placement = self.placement(solution);
        let mut board = String::new();
        for row in 0..self.size {
            for (column, &queen) in placement.iter().enumerate() {
                if column > 0 {
                    board.push(' ');
                }
                board.push(if queen == row { 'Q' } else { '.' });
            }
            board.push('\n');
        }
        board
    }

    fn square(&self, row: usize, column: usize) -> DomainId {
        self.variables[row * self.size + column]
    }

    fn shift(index: usize) -> i32 {
        index as i32
    }

    fn post_diagonal_disequalities(
        &self,
        solver: &mut Solver,
    ) -> Result<(), ConstraintOperationError> {
        for (i, &a) in self.variables.iter().enumerate() {
            for (j, &b) in self.variables.iter().enumerate().skip(i + 1) {
                solver
                    .add_constraint(constraints::not_equals(
                        a.offset(Self::shift(i)),
                        b.offset(Self::shift(j)),
                    ))
                    .post()?;
                solver
                    .add_constraint(constraints::not_equals(
                        a.offset(-Self::shift(i)),
                        b.offset(-Self::shift(j)),
                    ))
                    .post()?;
            }
        }
        Ok(())
    }

    fn post_binary(&self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        for (i, &a) in self.variables.iter().enumerate() {
            for &b in self.variables.iter().skip(i + 1) {
                solver.add_constraint(constraints::not_equals(a, b)).post()?;
            }
        }
        self.post_diagonal_disequalities(solver)
    }

    fn post_mixed(&self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        solver
            .add_constraint(constraints::all_different(self.variables.iter().copied()))
            .post()?;
        self.post_diagonal_disequalities(solver)
    }

    fn post_distinct(&self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        solver
            .add_constraint(constraints::all_different(self.variables.iter().copied()))
            .post()?;
        solver
            .add_constraint(constraints::all_different(
                self.variables
                    .iter()
                    .enumerate()
                    .map(|(i, queen)| queen.offset(Self::shift(i))),
            ))
            .post()?;
        solver
            .add_constraint(constraints::all_different(
                self.variables
                    .iter()
                    .enumerate()
                    .map(|(i, queen)| queen.offset(-Self::shift(i))),
            ))
            .post()
    }

    fn post_one_hot(&self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        let n = self.size;
        for line in 0..n {
            let row = (0..n).map(|column| self.square(line, column));
            solver
                .add_constraint(constraints::count_equals(row, 1, 1))
                .post()?;
            let column = (0..n).map(|row| self.square(row, line));
            solver
                .add_constraint(constraints::count_equals(column, 1, 1))
                .post()?;
        }

        // Diagonals are indexed by `row + column` and by `row - column + n - 1`; those with a
        // single square cannot be violated.
        for diagonal in 1..(2 * n).saturating_sub(2) {
            let rising = (0..n)
                .filter_map(|row| {
                    let column = diagonal.checked_sub(row).filter(|&column| column < n)?;
                    Some(self.square(row, column))
                })
                .collect::<Vec<_>>();
            solver
                .add_constraint(constraints::count_at_most(rising, 1, 1))
                .post()?;

            let falling = (0..n)
                .filter_map(|row| {
                    let column = (row + n - 1)
                        .checked_sub(diagonal)
                        .filter(|&column| column < n)?;
                    Some(self.square(row, column))
                })
                .collect::<Vec<_>>();
            solver
                .add_constraint(constraints::count_at_most(falling, 1, 1))
                .post()?;
        }
        Ok(())
    }
}
