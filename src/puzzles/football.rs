//! The football puzzle: a man dribbles a ball past two static opponents
//! into the goal. The man steps up, down, right or diagonally forward; when
//! he steps onto the ball, the ball is pushed one cell the same way.

use crate::parsers::{parse_position, InputLines};
use crate::puzzles::grid::{Board, Position};
use crate::search::{HeuristicValue, Problem, SearchNode};
use crate::{InputError, SearchError};
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::fmt::Display;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

pub const BOARD: Board = Board::new(8, 6);

pub const OPPONENTS: [Position; 2] = [Position::new(3, 3), Position::new(5, 3)];

pub const GOALS: [Position; 2] = [Position::new(7, 2), Position::new(7, 3)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FootballState {
    pub man: Position,
    pub ball: Position,
}

impl Display for FootballState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "man {} ball {}", self.man, self.ball)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Step {
    Up,
    Down,
    Right,
    UpRight,
    DownRight,
}

impl Step {
    fn offset(self) -> (i32, i32) {
        match self {
            Step::Up => (0, 1),
            Step::Down => (0, -1),
            Step::Right => (1, 0),
            Step::UpRight => (1, 1),
            Step::DownRight => (1, -1),
        }
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Up => write!(f, "up"),
            Step::Down => write!(f, "down"),
            Step::Right => write!(f, "right"),
            Step::UpRight => write!(f, "up-right"),
            Step::DownRight => write!(f, "down-right"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FootballAction {
    MoveMan(Step),
    PushBall(Step),
}

impl Display for FootballAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FootballAction::MoveMan(step) => write!(f, "Move man {}", step),
            FootballAction::PushBall(step) => write!(f, "Push ball {}", step),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Football {
    initial: FootballState,
}

impl Football {
    pub fn new(man: Position, ball: Position) -> Result<Self, InputError> {
        for (what, position) in [("man", man), ("ball", ball)] {
            if !BOARD.contains(&position) {
                return Err(InputError::OffBoard {
                    what,
                    value: position.to_string(),
                });
            }
        }
        if man == ball || OPPONENTS.contains(&man) || OPPONENTS.contains(&ball) {
            return Err(InputError::OutOfDomain {
                what: "positions",
                message: format!("man at {} and ball at {} overlap", man, ball),
            });
        }
        Ok(Self {
            initial: FootballState { man, ball },
        })
    }

    /// Two lines, the man's position then the ball's.
    pub fn from_text(text: &str) -> Result<Self, InputError> {
        let mut lines = InputLines::new(text);
        let man = lines.parse_next("position of the man", parse_position)?;
        let ball = lines.parse_next("position of the ball", parse_position)?;
        Self::new(man, ball)
    }

    fn man_may_stand(position: &Position) -> bool {
        BOARD.contains(position) && !OPPONENTS.contains(position)
    }

    /// The ball may not touch an opponent, diagonals included.
    fn ball_may_stand(position: &Position) -> bool {
        BOARD.contains(position)
            && OPPONENTS
                .iter()
                .all(|opponent| opponent.chebyshev(position) > 1)
    }
}

impl Problem for Football {
    type State = FootballState;
    type Action = FootballAction;

    fn name(&self) -> &str {
        "football"
    }

    fn initial_state(&self) -> &FootballState {
        &self.initial
    }

    fn successors(&self, state: &FootballState) -> Vec<(FootballAction, FootballState)> {
        let mut successors = vec![];
        for step in Step::iter() {
            let man = state.man.offset(step.offset());
            if man == state.ball {
                let ball = state.ball.offset(step.offset());
                if Self::man_may_stand(&man) && Self::ball_may_stand(&ball) {
                    successors.push((FootballAction::PushBall(step), FootballState { man, ball }));
                }
            } else if Self::man_may_stand(&man) {
                successors.push((
                    FootballAction::MoveMan(step),
                    FootballState {
                        man,
                        ball: state.ball,
                    },
                ));
            }
        }
        successors
    }

    fn is_goal(&self, state: &FootballState) -> bool {
        GOALS.contains(&state.ball)
    }

    /// Every action moves the ball at most one cell in each axis, so the
    /// ball's Chebyshev distance to the closest goal cell is admissible.
    fn heuristic(
        &self,
        node: &SearchNode<FootballState, FootballAction>,
    ) -> Result<HeuristicValue, SearchError> {
        let ball = node.state().ball;
        let distance = GOALS
            .iter()
            .map(|goal| goal.chebyshev(&ball))
            .min()
            .unwrap_or(0);
        Ok(OrderedFloat(distance as f64))
    }
}
