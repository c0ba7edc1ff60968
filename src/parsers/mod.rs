//! `nom` parsers for the line based puzzle input formats.

mod comments;
mod heading;
mod numbers;
mod position;
mod sudoku_grid;
mod test_helpers;
mod utilities;

#[cfg(test)]
pub(crate) use test_helpers::Match;
pub use test_helpers::UnwrapValue;

pub type Span<'a> = nom_locate::LocatedSpan<&'a str>;

pub type ParseError<'a> = nom_greedyerror::GreedyError<Span<'a>, nom::error::ErrorKind>;

pub type ParseResult<'a, T, E = ParseError<'a>> = nom::IResult<Span<'a>, T, E>;

// Parsers
pub use comments::ignore_comment;
pub use heading::parse_heading;
pub use numbers::parse_unsigned;
pub use position::parse_position;
pub use sudoku_grid::parse_sudoku_grid;

pub use utilities::{leading_whitespace, parse_complete, surrounding_whitespace, InputLines};
