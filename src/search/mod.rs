mod config;
pub mod frontiers;
mod heuristic;
mod problem;
pub mod search_engines;
mod search_node;
mod search_statistics;
mod validate;
mod verbosity;

pub use config::{parse_duration, SearchConfig, SearchLimits};
pub use frontiers::{FifoQueue, Frontier, PriorityFrontier, Select, Stack};
pub use heuristic::{HeuristicValue, MemoizedHeuristic};
pub use problem::Problem;
pub use search_engines::{
    CancellationFlag, ProblemResult, SearchEngine, SearchEngineName, SearchResult,
    TerminationCondition, TerminationReason,
};
pub use search_node::{NodeRef, ProblemNode, SearchNode};
pub use search_statistics::SearchStatistics;
pub use validate::validate;
pub use verbosity::Verbosity;
