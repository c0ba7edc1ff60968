//! The N queens puzzle as a constraint satisfaction problem: one variable
//! per row holding the queen's column.

use crate::puzzles::csp::{Assignment, Constraint, Csp, Value};
use crate::InputError;
use itertools::Itertools;

#[derive(Debug, Clone)]
pub struct Queens {
    n: usize,
    csp: Csp,
}

impl Queens {
    pub fn new(n: usize) -> Result<Self, InputError> {
        if n == 0 {
            return Err(InputError::OutOfDomain {
                what: "number of queens",
                message: "there must be at least one queen".to_string(),
            });
        }
        let mut csp = Csp::new("queens");
        let rows: Vec<usize> = (0..n)
            .map(|row| csp.add_variable(&format!("Q{}", row + 1), 0..n as Value))
            .collect();
        csp.add_constraint(Constraint::AllDifferent(rows.clone()))?;
        for (&upper, &lower) in rows.iter().tuple_combinations() {
            let distance = (lower - upper) as Value;
            csp.add_constraint(Constraint::predicate(vec![upper, lower], move |columns| {
                (columns[0] - columns[1]).abs() != distance
            }))?;
        }
        Ok(Self { n, csp })
    }

    pub fn csp(&self) -> &Csp {
        &self.csp
    }

    /// Column of the queen in every row.
    pub fn solve(&self) -> Option<Vec<usize>> {
        self.csp
            .first_solution()
            .as_ref()
            .and_then(Self::decode)
    }

    pub fn count_solutions(&self) -> usize {
        self.csp.solutions().count()
    }

    /// The board with `Q` for a queen and `.` for an empty square, top row
    /// first.
    pub fn render(&self, columns: &[usize]) -> String {
        columns
            .iter()
            .map(|&column| {
                (0..self.n)
                    .map(|square| if square == column { 'Q' } else { '.' })
                    .collect::<String>()
            })
            .join("\n")
    }

    /// Column of the queen in every row of a complete assignment.
    pub fn decode(assignment: &Assignment) -> Option<Vec<usize>> {
        assignment
            .values()?
            .into_iter()
            .map(|value| usize::try_from(value).ok())
            .collect()
    }
}

pub fn solve(n: usize) -> Result<Option<Vec<usize>>, InputError> {
    Ok(Queens::new(n)?.solve())
}

pub fn count_solutions(n: usize) -> Result<usize, InputError> {
    Ok(Queens::new(n)?.count_solutions())
}
