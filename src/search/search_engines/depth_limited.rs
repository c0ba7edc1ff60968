//! Depth-limited and iterative deepening search.

use crate::search::{
    search_engines::{
        search_engine::{instrumented, SearchOutput},
        ProblemResult, SearchEngine, SearchResult, TerminationCondition,
    },
    Frontier, NodeRef, Problem, SearchLimits, SearchNode, SearchStatistics, Stack,
};
use tracing::debug;

/// Depth-first tree search that does not expand nodes at `depth_limit`.
/// Returns [`SearchResult::Cutoff`] rather than
/// [`SearchResult::NoSolution`] if the bound pruned any node, since a goal
/// may then still exist deeper down.
#[derive(Debug, Clone)]
pub struct DepthLimited {
    depth_limit: usize,
    limits: SearchLimits,
}

impl DepthLimited {
    pub fn new(depth_limit: usize, limits: SearchLimits) -> Self {
        Self {
            depth_limit,
            limits,
        }
    }
}

impl SearchEngine for DepthLimited {
    fn search<P: Problem>(&mut self, problem: &P) -> SearchOutput<P> {
        instrumented::<P, _>(&self.limits, |termination, statistics| {
            Ok(depth_limited_search_with(
                problem,
                self.depth_limit,
                termination,
                statistics,
            ))
        })
    }
}

/// Runs depth-limited search with limits 0, 1, 2, ... and returns the first
/// result that is not a cutoff. Without a budget this never returns on an
/// infinite space that has no goal.
#[derive(Debug, Clone)]
pub struct IterativeDeepening {
    limits: SearchLimits,
}

impl IterativeDeepening {
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }
}

impl SearchEngine for IterativeDeepening {
    fn search<P: Problem>(&mut self, problem: &P) -> SearchOutput<P> {
        instrumented::<P, _>(&self.limits, |termination, statistics| {
            Ok(iterative_deepening_search_with(
                problem,
                termination,
                statistics,
            ))
        })
    }
}

/// Children are visited in the order the problem lists them. The pending
/// siblings are kept on an explicit stack, so the depth limit is not bounded
/// by the thread's stack size.
pub(super) fn depth_limited_search_with<P: Problem>(
    problem: &P,
    depth_limit: usize,
    termination: &mut TerminationCondition,
    statistics: &mut SearchStatistics,
) -> ProblemResult<P> {
    let mut stack: Stack<NodeRef<P::State, P::Action>> = Stack::new();
    stack.append(SearchNode::root(problem.initial_state().clone()));
    let mut cutoff_occurred = false;

    while let Some(node) = stack.pop() {
        if problem.is_goal(node.state()) {
            return SearchResult::Solution(node);
        }
        if node.depth() >= depth_limit {
            cutoff_occurred = true;
            continue;
        }
        if let Some(reason) = termination.tick() {
            return SearchResult::Terminated(reason);
        }
        statistics.increment_expanded_nodes(node.depth());

        let children = node.expand(problem);
        statistics.increment_generated_nodes(children.len());
        stack.extend(children.into_iter().rev());
    }

    if cutoff_occurred {
        SearchResult::Cutoff
    } else {
        SearchResult::NoSolution
    }
}

pub(super) fn iterative_deepening_search_with<P: Problem>(
    problem: &P,
    termination: &mut TerminationCondition,
    statistics: &mut SearchStatistics,
) -> ProblemResult<P> {
    let mut depth_limit = 0;
    loop {
        statistics.increment_iterations();
        debug!(depth_limit, "starting depth-limited iteration");
        match depth_limited_search_with(problem, depth_limit, termination, statistics) {
            SearchResult::Cutoff => depth_limit += 1,
            result => return result,
        }
    }
}

pub fn depth_limited_search<P: Problem>(problem: &P, depth_limit: usize) -> ProblemResult<P> {
    depth_limited_search_with(
        problem,
        depth_limit,
        &mut TerminationCondition::unlimited(),
        &mut SearchStatistics::new(),
    )
}

pub fn iterative_deepening_search<P: Problem>(problem: &P) -> ProblemResult<P> {
    iterative_deepening_search_with(
        problem,
        &mut TerminationCondition::unlimited(),
        &mut SearchStatistics::new(),
    )
}
