//! Order four magic square: the values 1 to 16, each used once, with every
//! row and every column summing to 34.

use crate::puzzles::csp::{Assignment, Constraint, Csp, Value};
use crate::InputError;
use itertools::Itertools;

pub const ORDER: usize = 4;

pub const MAGIC_SUM: Value = 34;

/// Cells are filled row by row but interleaved with the first column, so
/// column sums start pruning early.
const ASSIGNMENT_ORDER: [usize; 16] = [0, 1, 2, 3, 4, 8, 12, 5, 6, 7, 9, 13, 10, 11, 14, 15];

pub type Square = [[Value; ORDER]; ORDER];

#[derive(Debug, Clone)]
pub struct MagicSquare {
    csp: Csp,
}

impl MagicSquare {
    pub fn new() -> Result<Self, InputError> {
        let mut csp = Csp::new("magic-square");
        let cells: Vec<usize> = (0..ORDER * ORDER)
            .map(|cell| csp.add_variable(&format!("cell{}", cell), 1..=16))
            .collect();
        csp.add_constraint(Constraint::AllDifferent(cells.clone()))?;
        for row in cells.chunks(ORDER) {
            csp.add_constraint(Constraint::ExactSum {
                scope: row.to_vec(),
                target: MAGIC_SUM,
            })?;
        }
        for column in 0..ORDER {
            csp.add_constraint(Constraint::ExactSum {
                scope: cells.iter().copied().skip(column).step_by(ORDER).collect(),
                target: MAGIC_SUM,
            })?;
        }
        csp.set_order(ASSIGNMENT_ORDER.to_vec())?;
        Ok(Self { csp })
    }

    pub fn csp(&self) -> &Csp {
        &self.csp
    }

    pub fn solve(&self) -> Option<Square> {
        Self::decode(&self.csp.first_solution()?)
    }

    pub fn decode(assignment: &Assignment) -> Option<Square> {
        let values = assignment.values()?;
        let mut square = [[0; ORDER]; ORDER];
        for (cell, value) in values.into_iter().enumerate() {
            square[cell / ORDER][cell % ORDER] = value;
        }
        Some(square)
    }

    pub fn render(square: &Square) -> String {
        square
            .iter()
            .map(|row| row.iter().map(|value| format!("{:>2}", value)).join(" "))
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solution_is_magic() {
        let square = MagicSquare::new().unwrap().solve().unwrap();
        for i in 0..ORDER {
            assert_eq!(square[i].iter().sum::<Value>(), MAGIC_SUM);
            assert_eq!(square.iter().map(|row| row[i]).sum::<Value>(), MAGIC_SUM);
        }
        let mut values: Vec<Value> = square.iter().flatten().copied().collect();
        values.sort_unstable();
        assert_eq!(values, (1..=16).collect::<Vec<_>>());
    }

    #[test]
    fn columns_are_constrained() {
        let problem = MagicSquare::new().unwrap();
        let columns: Vec<&[usize]> = problem
            .csp()
            .constraints()
            .iter()
            .filter(|constraint| matches!(constraint, Constraint::ExactSum { .. }))
            .map(|constraint| constraint.scope())
            .skip(ORDER)
            .collect();
        assert_eq!(columns[0], &[0, 4, 8, 12]);
        assert_eq!(columns[3], &[3, 7, 11, 15]);
    }

    #[test]
    fn renders_rows() {
        let square = [[16, 3, 2, 13], [5, 10, 11, 8], [9, 6, 7, 12], [4, 15, 14, 1]];
        assert_eq!(
            MagicSquare::render(&square).lines().next(),
            Some("16  3  2 13")
        );
    }
}
