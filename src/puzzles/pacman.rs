//! Pac-Man on a 10 × 10 maze collecting stars. Every action moves Pac-Man
//! one cell: straight on, back, or after turning left or right, and the new
//! heading is the direction he moved in.

use crate::parsers::{parse_heading, parse_position, parse_unsigned, InputLines};
use crate::puzzles::grid::{Board, Position};
use crate::search::{HeuristicValue, Problem, SearchNode};
use crate::{InputError, SearchError};
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

pub const BOARD: Board = Board::new(10, 10);

pub const OBSTACLES: [(i32, i32); 28] = [
    (6, 0),
    (4, 1),
    (5, 1),
    (6, 1),
    (8, 1),
    (1, 2),
    (6, 2),
    (1, 3),
    (1, 4),
    (8, 4),
    (9, 4),
    (4, 5),
    (0, 6),
    (3, 6),
    (4, 6),
    (5, 6),
    (4, 7),
    (8, 7),
    (9, 7),
    (0, 8),
    (8, 8),
    (9, 8),
    (0, 9),
    (1, 9),
    (2, 9),
    (3, 9),
    (4, 9),
    (6, 9),
];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Heading {
    #[strum(to_string = "north", serialize = "sever")]
    North,
    #[strum(to_string = "south", serialize = "jug")]
    South,
    #[strum(to_string = "east", serialize = "istok")]
    East,
    #[strum(to_string = "west", serialize = "zapad")]
    West,
}

impl Heading {
    pub fn step(self) -> (i32, i32) {
        match self {
            Heading::North => (0, 1),
            Heading::South => (0, -1),
            Heading::East => (1, 0),
            Heading::West => (-1, 0),
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Heading::North => Heading::South,
            Heading::South => Heading::North,
            Heading::East => Heading::West,
            Heading::West => Heading::East,
        }
    }

    pub fn left(self) -> Self {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    pub fn right(self) -> Self {
        self.left().reverse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum PacmanAction {
    ContinueForward,
    ContinueBackward,
    TurnLeft,
    TurnRight,
}

impl PacmanAction {
    pub fn heading_after(self, heading: Heading) -> Heading {
        match self {
            PacmanAction::ContinueForward => heading,
            PacmanAction::ContinueBackward => heading.reverse(),
            PacmanAction::TurnLeft => heading.left(),
            PacmanAction::TurnRight => heading.right(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PacmanState {
    pub position: Position,
    pub heading: Heading,
    pub stars: BTreeSet<Position>,
}

#[derive(Debug, Clone)]
pub struct Pacman {
    obstacles: HashSet<Position>,
    initial: PacmanState,
}

impl Pacman {
    pub fn new(
        position: Position,
        heading: Heading,
        stars: impl IntoIterator<Item = Position>,
    ) -> Result<Self, InputError> {
        let obstacles: HashSet<Position> = OBSTACLES.into_iter().map(Position::from).collect();
        let stars: BTreeSet<Position> = stars.into_iter().collect();
        for (what, cell) in std::iter::once(("Pac-Man", &position))
            .chain(stars.iter().map(|star| ("star", star)))
        {
            if !BOARD.contains(cell) {
                return Err(InputError::OffBoard {
                    what,
                    value: cell.to_string(),
                });
            }
            if obstacles.contains(cell) {
                return Err(InputError::OutOfDomain {
                    what,
                    message: format!("{} is an obstacle", cell),
                });
            }
        }
        let mut stars = stars;
        stars.remove(&position);
        Ok(Self {
            obstacles,
            initial: PacmanState {
                position,
                heading,
                stars,
            },
        })
    }

    /// `x`, `y`, the heading and the number of stars on their own lines,
    /// followed by one `x,y` line per star.
    pub fn from_text(text: &str) -> Result<Self, InputError> {
        let mut lines = InputLines::new(text);
        let x = lines.parse_next("x coordinate of Pac-Man", parse_unsigned)?;
        let y = lines.parse_next("y coordinate of Pac-Man", parse_unsigned)?;
        let heading = lines.parse_next("heading of Pac-Man", parse_heading)?;
        let count = lines.parse_next("number of stars", parse_unsigned)?;
        let stars = (0..count)
            .map(|_| lines.parse_next("position of a star", parse_position))
            .collect::<Result<Vec<_>, _>>()?;
        let coordinate = |value: usize| {
            i32::try_from(value).map_err(|_| InputError::OffBoard {
                what: "Pac-Man",
                value: value.to_string(),
            })
        };
        Self::new(Position::new(coordinate(x)?, coordinate(y)?), heading, stars)
    }
}

impl Problem for Pacman {
    type State = PacmanState;
    type Action = PacmanAction;

    fn name(&self) -> &str {
        "pacman"
    }

    fn initial_state(&self) -> &PacmanState {
        &self.initial
    }

    fn successors(&self, state: &PacmanState) -> Vec<(PacmanAction, PacmanState)> {
        PacmanAction::iter()
            .filter_map(|action| {
                let heading = action.heading_after(state.heading);
                let position = state.position.offset(heading.step());
                if !BOARD.contains(&position) || self.obstacles.contains(&position) {
                    return None;
                }
                let mut stars = state.stars.clone();
                stars.remove(&position);
                Some((
                    action,
                    PacmanState {
                        position,
                        heading,
                        stars,
                    },
                ))
            })
            .collect()
    }

    fn is_goal(&self, state: &PacmanState) -> bool {
        state.stars.is_empty()
    }

    /// Reaching the furthest star takes at least its Manhattan distance.
    fn heuristic(
        &self,
        node: &SearchNode<PacmanState, PacmanAction>,
    ) -> Result<HeuristicValue, SearchError> {
        let state = node.state();
        let furthest = state
            .stars
            .iter()
            .map(|star| star.manhattan(&state.position))
            .max()
            .unwrap_or(0);
        Ok(OrderedFloat(furthest as f64))
    }
}
