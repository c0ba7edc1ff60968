use crate::parsers::{leading_whitespace, ParseResult, Span};
use nom::{character::complete, combinator::map};

/// Parses an unsigned decimal integer, allowing leading spaces.
pub fn parse_unsigned<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, usize> {
    map(leading_whitespace(complete::u32), |value| value as usize)(input.into())
}
