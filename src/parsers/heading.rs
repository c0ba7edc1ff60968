use crate::parsers::{leading_whitespace, ParseResult, Span};
use crate::puzzles::pacman::Heading;
use nom::{character::complete::alpha1, combinator::map_opt};
use std::str::FromStr;

/// Parses a compass heading, case insensitively.
///
/// ## Example
/// ```
/// # use puzzlesearch::parsers::{parse_heading, Span, UnwrapValue};
/// # use puzzlesearch::puzzles::pacman::Heading;
/// assert!(parse_heading(Span::new("North")).is_value(Heading::North));
/// ```
pub fn parse_heading<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, Heading> {
    map_opt(leading_whitespace(alpha1), |name: Span| {
        Heading::from_str(name.fragment()).ok()
    })(input.into())
}
