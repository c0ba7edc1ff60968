use crate::parsers::{ParseResult, Span};
use nom::bytes::complete::is_not;
use nom::character::complete::{char, multispace0};
use nom::combinator::{opt, value};
use nom::sequence::{pair, terminated, tuple};

/// Skips `#` comments running to the end of the line, together with any
/// whitespace and further comments that follow.
pub fn ignore_comment<'a, S: Into<Span<'a>>>(input: S) -> ParseResult<'a, ()> {
    value(
        (),
        opt(terminated(
            pair(char('#'), opt(is_not("\r\n"))),
            tuple((multispace0, opt(ignore_comment))),
        )),
    )(input.into())
}
