use crate::parsers::{leading_whitespace, ParseResult, Span};
use crate::puzzles::grid::Position;
use nom::{
    character::complete::{char, i32},
    combinator::map,
    sequence::separated_pair,
};

/// Parses a comma separated coordinate pair such as `3,4` or `3, 4`.
///
/// ## Example
/// ```
/// # use puzzlesearch::parsers::{parse_position, Span, UnwrapValue};
/// # use puzzlesearch::puzzles::grid::Position;
/// assert!(parse_position(Span::new("7,2")).is_value(Position::new(7, 2)));
/// ```
pub fn parse_position<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, Position> {
    map(
        separated_pair(
            leading_whitespace(i32),
            leading_whitespace(char(',')),
            leading_whitespace(i32),
        ),
        |(x, y)| Position::new(x, y),
    )(input.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{Match, UnwrapValue};

    #[test]
    fn coordinate_pairs() {
        assert!(parse_position("0,1").is_exactly(Position::new(0, 1)));
        assert!(parse_position(" 3 , 4").is_exactly(Position::new(3, 4)));
        assert!(parse_position("-1,5").is_exactly(Position::new(-1, 5)));
        assert!(parse_position("3 4").is_err());
        assert!(parse_position("3,").is_err());
    }

    #[test]
    fn stops_after_the_pair() {
        assert!(parse_position("2,5 rest").is_value(Position::new(2, 5)));
    }
}
