//! Error types. Exhausting the frontier or hitting a depth bound are normal
//! search outcomes and live in [`crate::search::SearchResult`], not here.

use std::path::PathBuf;
use thiserror::Error;

/// Misconfiguration of a search, detected before or during the search.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SearchError {
    #[error("problem '{problem}' does not define a heuristic, which informed search requires")]
    MissingHeuristic { problem: String },

    #[error("heuristic of problem '{problem}' returned an invalid value {value}")]
    InvalidHeuristicValue { problem: String, value: f64 },
}

/// Replaying a solution through a problem failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("action {action} at step {step} is not applicable in state {state}")]
    NotApplicable {
        step: usize,
        action: String,
        state: String,
    },

    #[error("solution does not reach a goal, final state is {state}")]
    GoalNotReached { state: String },
}

/// Malformed or out-of-domain puzzle input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputError {
    #[error("could not parse {what} from '{fragment}'")]
    Parse { what: &'static str, fragment: String },

    #[error("missing input line: expected {what}")]
    MissingLine { what: &'static str },

    #[error("{what} {value} is outside the board")]
    OffBoard { what: &'static str, value: String },

    #[error("invalid value for {what}: {message}")]
    OutOfDomain { what: &'static str, message: String },
}

/// Loading a search configuration failed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid duration '{value}': {source}")]
    Duration {
        value: String,
        #[source]
        source: humantime::DurationError,
    },
}
