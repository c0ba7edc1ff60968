//! The toy problems the search engines are exercised on. Grid puzzles
//! implement [`crate::search::Problem`] directly; the constraint puzzles
//! are built on the generic [`csp::Csp`].

pub mod csp;
pub mod football;
pub mod grid;
pub mod magic_square;
pub mod meeting;
pub mod molecule;
pub mod pacman;
pub mod queens;
pub mod rooks;
pub mod sudoku;
