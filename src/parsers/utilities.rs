//! Utility parsers and the line reader the puzzles build their input from.

use crate::parsers::{ignore_comment, ParseResult, Span};
use crate::InputError;
use nom::{
    character::complete::{multispace0, space0},
    combinator::all_consuming,
    sequence::{delimited, preceded},
};

/// A combinator that takes a parser `inner` and produces a parser that also
/// consumes leading spaces and tabs, returning the output of `inner`.
pub fn leading_whitespace<'a, F, O>(inner: F) -> impl FnMut(Span<'a>) -> ParseResult<'a, O>
where
    F: FnMut(Span<'a>) -> ParseResult<'a, O>,
{
    preceded(space0, inner)
}

/// A combinator that takes a parser `inner` and produces a parser that also
/// consumes surrounding whitespace and comments, returning the output of
/// `inner`.
pub fn surrounding_whitespace<'a, F, O>(inner: F) -> impl FnMut(Span<'a>) -> ParseResult<'a, O>
where
    F: FnMut(Span<'a>) -> ParseResult<'a, O>,
{
    delimited(
        preceded(multispace0, ignore_comment),
        inner,
        preceded(multispace0, ignore_comment),
    )
}

/// Runs `parser` over the whole of `text`, failing unless everything apart
/// from surrounding whitespace and comments is consumed.
pub fn parse_complete<'a, F, O>(what: &'static str, text: &'a str, parser: F) -> Result<O, InputError>
where
    F: FnMut(Span<'a>) -> ParseResult<'a, O>,
{
    all_consuming(surrounding_whitespace(parser))(Span::new(text))
        .map(|(_, value)| value)
        .map_err(|_| InputError::Parse {
            what,
            fragment: text.trim().to_string(),
        })
}

/// Reads puzzle input one meaningful line at a time. Blank lines and lines
/// holding only a `#` comment are skipped.
#[derive(Debug, Clone)]
pub struct InputLines<'a> {
    lines: std::str::Lines<'a>,
}

impl<'a> InputLines<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
        }
    }

    pub fn next_line(&mut self, what: &'static str) -> Result<&'a str, InputError> {
        self.lines
            .by_ref()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#'))
            .ok_or(InputError::MissingLine { what })
    }

    /// Parses the next line as a whole with `parser`.
    pub fn parse_next<F, O>(&mut self, what: &'static str, parser: F) -> Result<O, InputError>
    where
        F: FnMut(Span<'a>) -> ParseResult<'a, O>,
    {
        let line = self.next_line(what)?;
        parse_complete(what, line, parser)
    }

    /// Everything not read yet, joined back into one string.
    pub fn remainder(self) -> String {
        self.lines.collect::<Vec<_>>().join("\n")
    }
}
