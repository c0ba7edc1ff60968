//! Positions on the rectangular boards shared by the grid puzzles. The
//! origin is the bottom left corner and `y` grows upwards.

use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    pub fn offset(&self, (dx, dy): (i32, i32)) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(&self, other: &Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn chebyshev(&self, other: &Self) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Whether the positions are different but touch, diagonals included.
    pub fn is_adjacent(&self, other: &Self) -> bool {
        self != other && self.chebyshev(other) <= 1
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: i32,
    pub height: i32,
}

impl Board {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: &Position) -> bool {
        (0..self.width).contains(&position.x) && (0..self.height).contains(&position.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Position::new(1, 2);
        let b = Position::new(4, 0);
        assert_eq!(a.manhattan(&b), 5);
        assert_eq!(a.chebyshev(&b), 3);
        assert!(a.is_adjacent(&Position::new(2, 3)));
        assert!(!a.is_adjacent(&a));
        assert!(!a.is_adjacent(&Position::new(3, 2)));
    }

    #[test]
    fn board_bounds() {
        let board = Board::new(8, 6);
        assert!(board.contains(&Position::new(0, 0)));
        assert!(board.contains(&Position::new(7, 5)));
        assert!(!board.contains(&Position::new(8, 5)));
        assert!(!board.contains(&Position::new(0, -1)));
    }
}
