//! Classic 9 × 9 Sudoku. Givens become single value domains and are
//! assigned first, the blanks follow in row-major order.
//!
//! The input may start with a line naming the solver to use, either a
//! search engine such as `breadth-first-tree` or one of the backtracking
//! solver names `BacktrackingSolver` and `RecursiveBacktrackingSolver`.

use crate::parsers::{parse_complete, parse_sudoku_grid, InputLines};
use crate::puzzles::csp::{Assignment, Constraint, Csp, Value};
use crate::search::SearchEngineName;
use crate::InputError;
use clap::ValueEnum;
use itertools::Itertools;

pub const SIZE: usize = 9;

pub type Grid = [[u8; SIZE]; SIZE];

#[derive(Debug, Clone)]
pub struct Sudoku {
    givens: Vec<Option<u8>>,
    solver: Option<SearchEngineName>,
    csp: Csp,
}

impl Sudoku {
    /// `cells` in row-major order, `None` for a blank.
    pub fn new(cells: Vec<Option<u8>>) -> Result<Self, InputError> {
        if cells.len() != SIZE * SIZE {
            return Err(InputError::OutOfDomain {
                what: "sudoku grid",
                message: format!("expected {} cells, found {}", SIZE * SIZE, cells.len()),
            });
        }
        let mut csp = Csp::new("sudoku");
        for (cell, given) in cells.iter().enumerate() {
            let name = format!("r{}c{}", cell / SIZE + 1, cell % SIZE + 1);
            match given {
                Some(digit) => csp.add_variable(&name, [Value::from(*digit)]),
                None => csp.add_variable(&name, 1..=9),
            };
        }
        for unit in units() {
            csp.add_constraint(Constraint::AllDifferent(unit))?;
        }
        let (given, blank): (Vec<usize>, Vec<usize>) =
            (0..SIZE * SIZE).partition(|&cell| cells[cell].is_some());
        csp.set_order(given.into_iter().chain(blank).collect())?;
        Ok(Self {
            givens: cells,
            solver: None,
            csp,
        })
    }

    pub fn from_text(text: &str) -> Result<Self, InputError> {
        let mut lines = InputLines::new(text);
        let first = lines.next_line("sudoku grid")?;
        let (solver, grid) = if first.starts_with(|c: char| c.is_ascii_alphabetic()) {
            (Some(solver_engine(first)?), lines.remainder())
        } else {
            (None, text.to_string())
        };
        let mut sudoku = Self::new(parse_complete("sudoku grid", &grid, parse_sudoku_grid)?)?;
        sudoku.solver = solver;
        Ok(sudoku)
    }

    /// The engine named on the first input line, if there was one.
    pub fn solver(&self) -> Option<SearchEngineName> {
        self.solver
    }

    pub fn csp(&self) -> &Csp {
        &self.csp
    }

    pub fn blanks(&self) -> usize {
        self.givens.iter().filter(|cell| cell.is_none()).count()
    }

    pub fn solve(&self) -> Option<Grid> {
        Self::decode(&self.csp.first_solution()?)
    }

    pub fn decode(assignment: &Assignment) -> Option<Grid> {
        let values = assignment.values()?;
        let mut grid = [[0; SIZE]; SIZE];
        for (cell, value) in values.into_iter().enumerate() {
            grid[cell / SIZE][cell % SIZE] = u8::try_from(value).ok()?;
        }
        Some(grid)
    }

    pub fn render(grid: &Grid) -> String {
        grid.iter().map(|row| row.iter().join("")).join("\n")
    }
}

fn solver_engine(name: &str) -> Result<SearchEngineName, InputError> {
    match name {
        "BacktrackingSolver" | "RecursiveBacktrackingSolver" => {
            Ok(SearchEngineName::DepthFirstTree)
        }
        _ => <SearchEngineName as ValueEnum>::from_str(name, true).map_err(|_| {
            InputError::OutOfDomain {
                what: "sudoku solver",
                message: format!("unknown solver {}", name),
            }
        }),
    }
}

/// Rows, columns and boxes, as lists of cell indices.
fn units() -> Vec<Vec<usize>> {
    let rows = (0..SIZE).map(|row| {
        (0..SIZE)
            .map(|column| row * SIZE + column)
            .collect::<Vec<_>>()
    });
    let columns = (0..SIZE).map(|column| {
        (0..SIZE)
            .map(|row| row * SIZE + column)
            .collect::<Vec<_>>()
    });
    let boxes = (0..SIZE).map(|square| {
        let (top, left) = (square / 3 * 3, square % 3 * 3);
        (0..SIZE)
            .map(|i| (top + i / 3) * SIZE + left + i % 3)
            .collect::<Vec<_>>()
    });
    rows.chain(columns).chain(boxes).collect()
}
