//! The molecule puzzle: two hydrogen atoms and one oxygen atom on a board
//! with walls. An atom, once pushed, slides until it hits the edge of the
//! board, a wall or another atom. The goal is the molecule `H1 O H2` lying
//! on a single row.

use crate::parsers::{parse_position, InputLines};
use crate::puzzles::grid::{Board, Position};
use crate::search::Problem;
use crate::InputError;
use std::collections::HashSet;
use std::fmt::Display;
use strum::IntoEnumIterator;
use strum_macros::{Display as StrumDisplay, EnumIter};

pub const BOARD: Board = Board::new(9, 7);

pub const DEFAULT_WALLS: [Position; 14] = [
    Position::new(0, 1),
    Position::new(1, 1),
    Position::new(1, 3),
    Position::new(2, 5),
    Position::new(3, 1),
    Position::new(3, 6),
    Position::new(4, 2),
    Position::new(5, 6),
    Position::new(6, 1),
    Position::new(6, 2),
    Position::new(6, 3),
    Position::new(7, 3),
    Position::new(7, 6),
    Position::new(8, 5),
];

/// Starting positions of `H1`, `O` and `H2` in the classic layout.
pub const DEFAULT_ATOMS: MoleculeState = [
    Position::new(2, 1),
    Position::new(7, 2),
    Position::new(2, 6),
];

/// Positions of `H1`, `O` and `H2`, in that order.
pub type MoleculeState = [Position; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
pub enum Atom {
    H1,
    O,
    H2,
}

impl Atom {
    fn index(self) -> usize {
        match self {
            Atom::H1 => 0,
            Atom::O => 1,
            Atom::H2 => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
pub enum Slide {
    Right,
    Left,
    Up,
    Down,
}

impl Slide {
    fn step(self) -> (i32, i32) {
        match self {
            Slide::Right => (1, 0),
            Slide::Left => (-1, 0),
            Slide::Up => (0, 1),
            Slide::Down => (0, -1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoleculeAction {
    pub atom: Atom,
    pub slide: Slide,
}

impl Display for MoleculeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.slide, self.atom)
    }
}

#[derive(Debug, Clone)]
pub struct Molecule {
    walls: HashSet<Position>,
    initial: MoleculeState,
}

impl Molecule {
    pub fn new(
        walls: impl IntoIterator<Item = Position>,
        atoms: MoleculeState,
    ) -> Result<Self, InputError> {
        let walls: HashSet<Position> = walls.into_iter().collect();
        for atom in Atom::iter() {
            let position = atoms[atom.index()];
            if !BOARD.contains(&position) {
                return Err(InputError::OffBoard {
                    what: "atom",
                    value: position.to_string(),
                });
            }
            if walls.contains(&position) {
                return Err(InputError::OutOfDomain {
                    what: "atom",
                    message: format!("{} at {} is inside a wall", atom, position),
                });
            }
        }
        if atoms[0] == atoms[1] || atoms[1] == atoms[2] || atoms[0] == atoms[2] {
            return Err(InputError::OutOfDomain {
                what: "atom",
                message: "two atoms share a cell".to_string(),
            });
        }
        Ok(Self {
            walls,
            initial: atoms,
        })
    }

    /// The layout of the original exercise.
    pub fn classic() -> Self {
        Self {
            walls: DEFAULT_WALLS.into_iter().collect(),
            initial: DEFAULT_ATOMS,
        }
    }

    /// Three lines with the positions of `H1`, `O` and `H2`, placed among
    /// the default walls.
    pub fn from_text(text: &str) -> Result<Self, InputError> {
        let mut lines = InputLines::new(text);
        let h1 = lines.parse_next("position of H1", parse_position)?;
        let o = lines.parse_next("position of O", parse_position)?;
        let h2 = lines.parse_next("position of H2", parse_position)?;
        Self::new(DEFAULT_WALLS, [h1, o, h2])
    }

    fn is_free(&self, state: &MoleculeState, position: &Position) -> bool {
        BOARD.contains(position) && !self.walls.contains(position) && !state.contains(position)
    }

    /// Where `atom` stops when pushed in direction `slide`.
    fn slide(&self, state: &MoleculeState, atom: Atom, slide: Slide) -> Position {
        let mut position = state[atom.index()];
        while self.is_free(state, &position.offset(slide.step())) {
            position = position.offset(slide.step());
        }
        position
    }
}

impl Problem for Molecule {
    type State = MoleculeState;
    type Action = MoleculeAction;

    fn name(&self) -> &str {
        "molecule"
    }

    fn initial_state(&self) -> &MoleculeState {
        &self.initial
    }

    fn successors(&self, state: &MoleculeState) -> Vec<(MoleculeAction, MoleculeState)> {
        let mut successors = vec![];
        for atom in Atom::iter() {
            for slide in Slide::iter() {
                let target = self.slide(state, atom, slide);
                if target != state[atom.index()] {
                    let mut next = *state;
                    next[atom.index()] = target;
                    successors.push((MoleculeAction { atom, slide }, next));
                }
            }
        }
        successors
    }

    fn is_goal(&self, [h1, o, h2]: &MoleculeState) -> bool {
        h1.y == o.y && o.y == h2.y && h1.x + 1 == o.x && o.x + 1 == h2.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{search_engines::breadth_first_graph_search, validate};
    use crate::test_utils::*;

    #[test]
    fn classic_successors() {
        let problem = Molecule::classic();
        let successors: Vec<(String, MoleculeState)> = problem
            .successors(problem.initial_state())
            .into_iter()
            .map(|(action, state)| (action.to_string(), state))
            .collect();
        let h1 = DEFAULT_ATOMS[0];
        let o = DEFAULT_ATOMS[1];
        let h2 = DEFAULT_ATOMS[2];
        assert_eq!(
            successors,
            vec![
                ("UpH1".to_string(), [Position::new(2, 4), o, h2]),
                ("DownH1".to_string(), [Position::new(2, 0), o, h2]),
                ("RightO".to_string(), [h1, Position::new(8, 2), h2]),
                ("DownO".to_string(), [h1, Position::new(7, 0), h2]),
                ("LeftH2".to_string(), [h1, o, Position::new(0, 6)]),
            ]
        );
    }

    #[test]
    fn atoms_block_each_other() {
        let problem = Molecule::new(
            Vec::<Position>::new(),
            [Position::new(0, 0), Position::new(5, 0), Position::new(5, 3)],
        )
        .unwrap();
        let state = *problem.initial_state();
        assert_eq!(problem.slide(&state, Atom::H1, Slide::Right), Position::new(4, 0));
        assert_eq!(problem.slide(&state, Atom::O, Slide::Up), Position::new(5, 2));
        assert_eq!(problem.slide(&state, Atom::H2, Slide::Down), Position::new(5, 1));
        assert_eq!(problem.slide(&state, Atom::H2, Slide::Left), Position::new(0, 3));
    }

    #[test]
    fn goal_requires_h1_o_h2_in_a_row() {
        let problem = Molecule::classic();
        let row = |x: i32| {
            [
                Position::new(x, 4),
                Position::new(x + 1, 4),
                Position::new(x + 2, 4),
            ]
        };
        assert!(problem.is_goal(&row(3)));
        let [h1, o, h2] = row(3);
        assert!(!problem.is_goal(&[h2, o, h1]));
        assert!(!problem.is_goal(&[h1, o, Position::new(h2.x, 5)]));
    }

    #[test]
    fn classic_layout_is_solved_in_seven_moves() {
        let problem = Molecule::classic();
        let node = breadth_first_graph_search(&problem)
            .into_solution_node()
            .unwrap();
        assert_eq!(node.depth(), 7);
        assert_eq!(validate(&problem, &node.solution()), Ok(()));
    }

    #[test]
    fn parsed_layout_matches_classic() {
        let problem = Molecule::from_text(MOLECULE_DEFAULT_TEXT).unwrap();
        assert_eq!(problem.initial_state(), &DEFAULT_ATOMS);
    }

    #[test]
    fn rejects_bad_positions() {
        assert!(matches!(
            Molecule::from_text("2,1\n7,2\n9,6"),
            Err(InputError::OffBoard { .. })
        ));
        assert!(matches!(
            Molecule::from_text("0,1\n7,2\n2,6"),
            Err(InputError::OutOfDomain { .. })
        ));
        assert!(matches!(
            Molecule::from_text("2,1\n7,2"),
            Err(InputError::MissingLine { .. })
        ));
    }
}
