mod best_first;
mod depth_limited;
mod graph_search;
mod rbfs;
mod search_engine;
mod termination_condition;
mod tree_search;

pub use best_first::{
    astar_search, best_first_graph_search, greedy_best_first_search, BestFirst, Evaluation,
};
pub use depth_limited::{
    depth_limited_search, iterative_deepening_search, DepthLimited, IterativeDeepening,
};
pub use graph_search::{
    breadth_first_graph_search, depth_first_graph_search, graph_search, uniform_cost_search,
    GraphSearch, UniformCost,
};
pub use rbfs::{recursive_best_first_search, Rbfs};
pub use search_engine::{
    ProblemResult, SearchEngine, SearchEngineName, SearchOutput, SearchResult,
};
pub use termination_condition::{CancellationFlag, TerminationCondition, TerminationReason};
pub use tree_search::{
    breadth_first_tree_search, depth_first_tree_search, tree_search, ExpansionOrder, Solutions,
    TreeSearch,
};
