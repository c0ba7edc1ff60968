//! N rooks on an N × N board, none attacking another. Every rook is its own
//! variable ranging over all squares, numbered row-major, so solutions are
//! placements of labelled rooks.

use crate::puzzles::csp::{Assignment, Constraint, Csp, Value};
use crate::InputError;
use itertools::Itertools;

pub type Square = (usize, usize);

#[derive(Debug, Clone)]
pub struct Rooks {
    n: usize,
    csp: Csp,
}

impl Rooks {
    pub fn new(n: usize) -> Result<Self, InputError> {
        if n == 0 {
            return Err(InputError::OutOfDomain {
                what: "number of rooks",
                message: "there must be at least one rook".to_string(),
            });
        }
        let mut csp = Csp::new("rooks");
        let squares = (n * n) as Value;
        let rooks: Vec<usize> = (0..n)
            .map(|rook| csp.add_variable(&format!("R{}", rook + 1), 0..squares))
            .collect();
        let side = n as Value;
        for (&first, &second) in rooks.iter().tuple_combinations() {
            csp.add_constraint(Constraint::predicate(vec![first, second], move |pair| {
                pair[0] / side != pair[1] / side && pair[0] % side != pair[1] % side
            }))?;
        }
        Ok(Self { n, csp })
    }

    pub fn csp(&self) -> &Csp {
        &self.csp
    }

    /// `(row, column)` of every rook.
    pub fn solve(&self) -> Option<Vec<Square>> {
        self.csp
            .first_solution()
            .as_ref()
            .and_then(|assignment| self.decode(assignment))
    }

    pub fn count_solutions(&self) -> usize {
        self.csp.solutions().count()
    }

    pub fn decode(&self, assignment: &Assignment) -> Option<Vec<Square>> {
        assignment
            .values()?
            .into_iter()
            .map(|value| {
                let square = usize::try_from(value).ok()?;
                Some((square / self.n, square % self.n))
            })
            .collect()
    }

    /// The board with `R` for a rook and `.` for an empty square.
    pub fn render(&self, rooks: &[Square]) -> String {
        (0..self.n)
            .map(|row| {
                (0..self.n)
                    .map(|column| {
                        if rooks.contains(&(row, column)) {
                            'R'
                        } else {
                            '.'
                        }
                    })
                    .collect::<String>()
            })
            .join("\n")
    }
}
