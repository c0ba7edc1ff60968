use crate::parsers::{ParseResult, Span};
use nom::{
    character::complete::{multispace0, one_of},
    combinator::map,
    multi::many1,
    sequence::preceded,
};

/// Parses grid cells in row-major order. A digit from 1 to 9 is a given,
/// `0` or `.` is a blank. Whitespace between cells is ignored, so the grid
/// can be written on one line or as nine rows.
///
/// ## Example
/// ```
/// # use puzzlesearch::parsers::{parse_sudoku_grid, Span, UnwrapValue};
/// assert!(parse_sudoku_grid(Span::new("5 3 .\n0 7")).is_value(vec![
///     Some(5), Some(3), None, None, Some(7)
/// ]));
/// ```
pub fn parse_sudoku_grid<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, Vec<Option<u8>>> {
    many1(preceded(
        multispace0,
        map(one_of("0123456789."), |cell| match cell.to_digit(10) {
            Some(0) | None => None,
            Some(digit) => Some(digit as u8),
        }),
    ))(input.into())
}
