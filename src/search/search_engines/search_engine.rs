use crate::search::{
    search_engines::{
        BestFirst, DepthLimited, Evaluation, ExpansionOrder, GraphSearch, IterativeDeepening, Rbfs,
        TerminationCondition, TerminationReason, TreeSearch, UniformCost,
    },
    NodeRef, Problem, SearchConfig, SearchLimits, SearchStatistics,
};
use crate::SearchError;
use serde::Deserialize;
use std::fmt::Display;
use tracing::info;

/// Outcome of a search that ran to completion or was stopped by its budget.
/// Neither "no solution" nor "cutoff" is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult<S, A> {
    /// A goal node was reached
    Solution(NodeRef<S, A>),
    /// The search space was exhausted without reaching a goal
    NoSolution,
    /// Depth-limited search hit its bound somewhere, so a deeper goal may
    /// still exist
    Cutoff,
    /// A resource budget or cancellation stopped the search
    Terminated(TerminationReason),
}

/// The result type of searching problem `P`.
pub type ProblemResult<P> = SearchResult<<P as Problem>::State, <P as Problem>::Action>;

/// What [`SearchEngine::search`] returns.
pub type SearchOutput<P> = Result<(ProblemResult<P>, SearchStatistics), SearchError>;

impl<S, A> SearchResult<S, A> {
    pub fn is_solution(&self) -> bool {
        matches!(self, SearchResult::Solution(_))
    }

    pub fn is_cutoff(&self) -> bool {
        matches!(self, SearchResult::Cutoff)
    }

    pub fn solution_node(&self) -> Option<&NodeRef<S, A>> {
        match self {
            SearchResult::Solution(node) => Some(node),
            _ => None,
        }
    }

    pub fn into_solution_node(self) -> Option<NodeRef<S, A>> {
        match self {
            SearchResult::Solution(node) => Some(node),
            _ => None,
        }
    }
}

impl<S, A> Display for SearchResult<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchResult::Solution(node) => write!(
                f,
                "solution at depth {} with cost {}",
                node.depth(),
                node.path_cost()
            ),
            SearchResult::NoSolution => write!(f, "no solution"),
            SearchResult::Cutoff => write!(f, "cutoff"),
            SearchResult::Terminated(reason) => write!(f, "terminated: {}", reason),
        }
    }
}

pub trait SearchEngine {
    fn search<P: Problem>(&mut self, problem: &P) -> SearchOutput<P>;
}

/// Runs `search` with fresh statistics and a termination condition built
/// from `limits`, logging both once the search returns.
pub(super) fn instrumented<P, F>(limits: &SearchLimits, search: F) -> SearchOutput<P>
where
    P: Problem,
    F: FnOnce(
        &mut TerminationCondition,
        &mut SearchStatistics,
    ) -> Result<ProblemResult<P>, SearchError>,
{
    let mut statistics = SearchStatistics::new();
    let mut termination = TerminationCondition::new(limits);
    let result = search(&mut termination, &mut statistics)?;
    termination.finalise();
    statistics.finalise_search();
    info!(result = %result);
    Ok((result, statistics))
}

#[derive(clap::ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[clap(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SearchEngineName {
    #[clap(help = "Breadth-first tree search, no repeated-state check.")]
    BreadthFirstTree,
    #[clap(help = "Depth-first tree search, may not terminate on cyclic spaces.")]
    DepthFirstTree,
    #[clap(help = "Breadth-first graph search.")]
    BreadthFirstGraph,
    #[clap(help = "Depth-first graph search.")]
    DepthFirstGraph,
    #[clap(help = "Depth-first tree search bounded by the depth limit.")]
    DepthLimited,
    #[clap(help = "Depth-limited search with increasing limits.")]
    IterativeDeepening,
    #[clap(help = "Graph search ordered by path cost.")]
    UniformCost,
    #[clap(help = "Greedy best-first search on the heuristic alone.")]
    Greedy,
    #[clap(help = "A* search, ordered by path cost plus heuristic.")]
    Astar,
    #[clap(name = "rbfs", help = "Recursive best-first search, linear memory.")]
    Rbfs,
}

impl SearchEngineName {
    /// Whether the engine needs the problem to define a heuristic.
    pub fn is_informed(&self) -> bool {
        matches!(
            self,
            SearchEngineName::Greedy | SearchEngineName::Astar | SearchEngineName::Rbfs
        )
    }

    pub fn search<P: Problem>(&self, problem: &P, config: &SearchConfig) -> SearchOutput<P> {
        let limits = config.limits.clone();
        match self {
            SearchEngineName::BreadthFirstTree => {
                TreeSearch::new(ExpansionOrder::BreadthFirst, limits).search(problem)
            }
            SearchEngineName::DepthFirstTree => {
                TreeSearch::new(ExpansionOrder::DepthFirst, limits).search(problem)
            }
            SearchEngineName::BreadthFirstGraph => {
                GraphSearch::new(ExpansionOrder::BreadthFirst, limits).search(problem)
            }
            SearchEngineName::DepthFirstGraph => {
                GraphSearch::new(ExpansionOrder::DepthFirst, limits).search(problem)
            }
            SearchEngineName::DepthLimited => {
                DepthLimited::new(config.depth_limit, limits).search(problem)
            }
            SearchEngineName::IterativeDeepening => IterativeDeepening::new(limits).search(problem),
            SearchEngineName::UniformCost => UniformCost::new(limits).search(problem),
            SearchEngineName::Greedy => BestFirst::new(Evaluation::Greedy, limits).search(problem),
            SearchEngineName::Astar => BestFirst::new(Evaluation::AStar, limits).search(problem),
            SearchEngineName::Rbfs => Rbfs::new(limits).search(problem),
        }
    }
}
