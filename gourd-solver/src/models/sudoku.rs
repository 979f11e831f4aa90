//! Sudoku of order `n`: fill an `n^2 x n^2` grid with the values `1..=n^2` such that every row,
//! every column and every `n x n` box contains each value once.
//!
//! A grid is written as a string of `n^4` cells in row-major order. A cell is a digit, or a
//! letter for the values from 10 upwards (`a` or `A` is 10); `.` and `0` mark an empty cell.
//! Whitespace is ignored.
use log::debug;
use thiserror::Error;

use crate::constraints;
use crate::variables::DomainId;
use crate::ConstraintOperationError;
use crate::Solution;
use crate::Solver;

/// The puzzles which can be selected by index.
const BUILT_IN_PUZZLES: &[&str] = &[
    "..3.4.....1.2...",
    "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79",
    "8..........36......7..9.2...5...7.......457.....1...3...1....68..85...1..9....4..",
    "4....c....21g..bec56d..1g.3..f8a.921g.3...8a.c5.g...4f.aec...921\
     .....5.d921.7.b4c......g73b.f..e..1.73b....ec56...b4f.ae.5...21g\
     ..ec..d.2.g.3b4f5.d921..3..f..e.21.73.4.8.....d93b4..aec56..21..\
     .ec.6.92....b..86d92...3b4.8a.c.1g.3b..8a...6d92b.f...c.6..2.g7.",
];

/// The largest supported order; its values are written `1..9` and `a..p`.
const MAX_ORDER: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidPuzzle {
    #[error("A grid of {0} cells is not a square of a square, expected 16, 81, 256 or 625 cells")]
    MalformedGrid(usize),
    #[error("The cell '{character}' at position {position} is not a value of the grid")]
    InvalidCell { character: char, position: usize },
    #[error("The value {value} is given at both {first:?} and {second:?}")]
    ConflictingGivens {
        value: i32,
        first: (usize, usize),
        second: (usize, usize),
    },
    #[error("There is no built-in puzzle {index}, choose one of 0..{available}")]
    UnknownPuzzle { index: usize, available: usize },
}

/// The givens of a sudoku, before it is posted on a [`Solver`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    order: usize,
    /// The given value of every cell, in row-major order.
    cells: Vec<Option<i32>>,
}

impl Puzzle {
    /// The built-in puzzle with the given index.
    pub fn built_in(index: usize) -> Result<Puzzle, InvalidPuzzle> {
        let grid = BUILT_IN_PUZZLES
            .get(index)
            .ok_or(InvalidPuzzle::UnknownPuzzle {
                index,
                available: BUILT_IN_PUZZLES.len(),
            })?;
        Puzzle::parse(grid)
    }

    pub fn num_built_in() -> usize {
        BUILT_IN_PUZZLES.len()
    }

    /// Reads a grid; the order follows from the number of cells. Fails on a malformed grid, or
    /// when two givens conflict in a row, a column or a box.
    pub fn parse(grid: &str) -> Result<Puzzle, InvalidPuzzle> {
        let characters = grid
            .chars()
            .filter(|character| !character.is_whitespace())
            .collect::<Vec<_>>();
        let order = (1..=MAX_ORDER)
            .find(|order| order.pow(4) == characters.len())
            .ok_or(InvalidPuzzle::MalformedGrid(characters.len()))?;
        let side = order * order;

        let cells = characters
            .iter()
            .enumerate()
            .map(|(position, &character)| match character {
                '.' | '0' => Ok(None),
                _ => character
                    .to_digit(36)
                    .filter(|&value| value as usize <= side)
                    .map(|value| Some(value as i32))
                    .ok_or(InvalidPuzzle::InvalidCell {
                        character,
                        position,
                    }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let puzzle = Puzzle { order, cells };
        puzzle.check_givens()?;
        Ok(puzzle)
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// The number of cells in a row.
    pub fn side(&self) -> usize {
        self.order * self.order
    }

    pub fn given(&self, row: usize, column: usize) -> Option<i32> {
        self.cells[row * self.side() + column]
    }

    pub fn num_givens(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// The cells of every row, column and box, in row-major order within each group.
    fn groups(&self) -> Vec<Vec<(usize, usize)>> {
        let side = self.side();
        let order = self.order;
        let rows = (0..side).map(|row| (0..side).map(|column| (row, column)).collect::<Vec<_>>());
        let columns =
            (0..side).map(|column| (0..side).map(|row| (row, column)).collect::<Vec<_>>());
        let boxes = (0..side).map(|index| {
            let (top, left) = (index / order * order, index % order * order);
            (0..side)
                .map(|cell| (top + cell / order, left + cell % order))
                .collect::<Vec<_>>()
        });
        rows.chain(columns).chain(boxes).collect()
    }

    fn check_givens(&self) -> Result<(), InvalidPuzzle> {
        for group in self.groups() {
            let mut seen: Vec<Option<(usize, usize)>> = vec![None; self.side() + 1];
            for (row, column) in group {
                let Some(value) = self.given(row, column) else {
                    continue;
                };
                if let Some(first) = seen[value as usize] {
                    return Err(InvalidPuzzle::ConflictingGivens {
                        value,
                        first,
                        second: (row, column),
                    });
                }
                seen[value as usize] = Some((row, column));
            }
        }
        Ok(())
    }
}

/// The variables of a sudoku posted on a [`Solver`].
#[derive(Clone, Debug)]
pub struct Sudoku {
    order: usize,
    cells: Vec<DomainId>,
}

impl Sudoku {
    /// Creates a variable per cell with domain `1..=n^2`, posts an all-different per row, column
    /// and box, and fixes the givens.
    pub fn build(
        solver: &mut Solver,
        puzzle: &Puzzle,
    ) -> Result<Sudoku, ConstraintOperationError> {
        let side = puzzle.side();
        let cells = (0..side * side)
            .map(|_| solver.new_bounded_integer(1, side as i32))
            .collect::<Result<Vec<_>, _>>()?;
        let sudoku = Sudoku {
            order: puzzle.order(),
            cells,
        };

        for group in puzzle.groups() {
            let variables = group
                .into_iter()
                .map(|(row, column)| sudoku.cell(row, column))
                .collect::<Vec<_>>();
            solver
                .add_constraint(constraints::all_different(variables))
                .post()?;
        }

        for row in 0..side {
            for column in 0..side {
                if let Some(value) = puzzle.given(row, column) {
                    solver
                        .add_constraint(constraints::fixed(sudoku.cell(row, column), value))
                        .post()?;
                }
            }
        }
        debug!(
            "Posted a sudoku of order {} with {} givens",
            sudoku.order,
            puzzle.num_givens()
        );

        Ok(sudoku)
    }

    pub fn cell(&self, row: usize, column: usize) -> DomainId {
        self.cells[row * self.order * self.order + column]
    }

    /// The variables to branch on.
    pub fn variables(&self) -> &[DomainId] {
        &self.cells
    }

    /// The value of every cell, in row-major order.
    pub fn values(&self, solution: &Solution) -> Vec<i32> {
        self.cells
            .iter()
            .map(|&cell| solution.get_integer_value(cell))
            .collect()
    }

    /// Draws the grid with lines between the boxes.
    pub fn format(&self, solution: &Solution) -> String {
        format_grid(self.order, &self.values(solution))
    }
}

/// Draws a grid of the given order, with values from 10 upwards written as letters.
pub fn format_grid(order: usize, values: &[i32]) -> String {
    let side = order * order;
    let separator = vec!["-".repeat(2 * order - 1); order].join("-+-");

    let mut grid = String::new();
    for (row, line) in values.chunks(side).enumerate() {
        if row > 0 && row % order == 0 {
            grid.push_str(&separator);
            grid.push('\n');
        }
        let boxes = line
            .chunks(order)
            .map(|cells| {
                cells
                    .iter()
                    .map(|&value| cell_symbol(value).to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>();
        grid.push_str(&boxes.join(" | "));
        grid.push('\n');
    }
    grid
}

fn cell_symbol(value: i32) -> char {
    u32::try_from(value)
        .ok()
        .and_then(|value| char::from_digit(value, 36))
        .map(|symbol| symbol.to_ascii_uppercase())
        .unwrap_or('?')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termination::Indefinite;

    #[test]
    fn order_follows_from_the_number_of_cells() {
        assert_eq!(Puzzle::parse("..3.4.....1.2...").map(|p| p.order()), Ok(2));
        assert_eq!(Puzzle::built_in(1).map(|p| p.order()), Ok(3));
        assert_eq!(Puzzle::built_in(3).map(|p| p.order()), Ok(4));
        assert_eq!(Puzzle::parse("12345"), Err(InvalidPuzzle::MalformedGrid(5)));
    }

    #[test]
    fn whitespace_and_zeroes_are_accepted() {
        let puzzle = Puzzle::parse("0 0 3 0\n4 0 0 0\n0 0 1 0\n2 0 0 0").expect("valid grid");
        assert_eq!(puzzle, Puzzle::parse("..3.4.....1.2...").expect("valid grid"));
        assert_eq!(puzzle.num_givens(), 4);
        assert_eq!(puzzle.given(1, 0), Some(4));
    }

    #[test]
    fn values_outside_the_grid_are_rejected() {
        assert_eq!(
            Puzzle::parse("..5............."),
            Err(InvalidPuzzle::InvalidCell {
                character: '5',
                position: 2
            })
        );
        assert!(matches!(
            Puzzle::parse("..#............."),
            Err(InvalidPuzzle::InvalidCell { character: '#', .. })
        ));
    }

    #[test]
    fn conflicting_givens_are_reported() {
        // both 1s are in the top-left box
        assert_eq!(
            Puzzle::parse("1....1.........."),
            Err(InvalidPuzzle::ConflictingGivens {
                value: 1,
                first: (0, 0),
                second: (1, 1),
            })
        );
        assert!(matches!(
            Puzzle::parse("2..2............"),
            Err(InvalidPuzzle::ConflictingGivens { value: 2, .. })
        ));
    }

    #[test]
    fn unknown_built_in_puzzle() {
        assert_eq!(
            Puzzle::built_in(17),
            Err(InvalidPuzzle::UnknownPuzzle {
                index: 17,
                available: Puzzle::num_built_in()
            })
        );
    }

    #[test]
    fn four_by_four_has_a_unique_solution() {
        let mut solver = Solver::default();
        let puzzle = Puzzle::built_in(0).expect("valid puzzle");
        let sudoku = Sudoku::build(&mut solver, &puzzle).expect("valid model");

        let mut brancher = solver.default_brancher();
        let (_, solutions) = solver.solutions(&mut brancher, &mut Indefinite, None);

        assert_eq!(solutions.len(), 1);
        assert_eq!(
            sudoku.values(&solutions[0]),
            vec![1, 2, 3, 4, 4, 3, 2, 1, 3, 4, 1, 2, 2, 1, 4, 3]
        );
        assert_eq!(
            sudoku.format(&solutions[0]),
            "1 2 | 3 4\n4 3 | 2 1\n----+----\n3 4 | 1 2\n2 1 | 4 3\n"
        );
    }

    #[test]
    fn large_values_are_printed_as_letters() {
        let values = (1..=16).cycle().take(256).collect::<Vec<_>>();
        let grid = format_grid(4, &values);
        let first_line = grid.lines().next().expect("non-empty grid");
        assert_eq!(first_line, "1 2 3 4 | 5 6 7 8 | 9 A B C | D E F G");
    }
}
