use crate::parsers::ParseResult;
use std::fmt::Debug;

/// Inspects the value of a successful parse.
pub trait UnwrapValue<T> {
    /// Whether the parse succeeded with `value`, ignoring any remainder.
    fn is_value(&self, value: T) -> bool;

    /// The parsed value. Panics if the parse failed.
    fn unwrap_value(self) -> T;
}

impl<T: PartialEq + Debug> UnwrapValue<T> for ParseResult<'_, T> {
    fn is_value(&self, value: T) -> bool {
        matches!(self, Ok((_, parsed)) if *parsed == value)
    }

    fn unwrap_value(self) -> T {
        match self {
            Ok((_, value)) => value,
            Err(error) => panic!("parse failed: {:?}", error),
        }
    }
}

/// Like [`UnwrapValue::is_value`] but also requires the whole input to be
/// consumed.
#[allow(dead_code)]
pub trait Match<T> {
    fn is_exactly(&self, value: T) -> bool;
}

impl<T: PartialEq> Match<T> for ParseResult<'_, T> {
    fn is_exactly(&self, value: T) -> bool {
        matches!(self, Ok((remainder, parsed)) if remainder.is_empty() && *parsed == value)
    }
}
