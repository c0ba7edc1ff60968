//! Graph search keeps an explored set, so no state is expanded twice.

use crate::search::{
    search_engines::{
        search_engine::{instrumented, SearchOutput},
        ExpansionOrder, ProblemResult, SearchEngine, SearchResult, TerminationCondition,
    },
    FifoQueue, Frontier, HeuristicValue, NodeRef, PriorityFrontier, Problem, SearchLimits,
    SearchNode, SearchStatistics, Select, Stack,
};
use std::collections::HashSet;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct GraphSearch {
    order: ExpansionOrder,
    limits: SearchLimits,
}

impl GraphSearch {
    pub fn new(order: ExpansionOrder, limits: SearchLimits) -> Self {
        Self { order, limits }
    }
}

impl SearchEngine for GraphSearch {
    fn search<P: Problem>(&mut self, problem: &P) -> SearchOutput<P> {
        instrumented::<P, _>(&self.limits, |termination, statistics| {
            Ok(match self.order {
                ExpansionOrder::BreadthFirst => {
                    graph_search_with(problem, FifoQueue::new(), termination, statistics)
                }
                ExpansionOrder::DepthFirst => {
                    graph_search_with(problem, Stack::new(), termination, statistics)
                }
            })
        })
    }
}

/// Graph search over a frontier ordered by path cost. Optimal as long as no
/// step cost is negative.
#[derive(Debug, Clone)]
pub struct UniformCost {
    limits: SearchLimits,
}

impl UniformCost {
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }
}

impl SearchEngine for UniformCost {
    fn search<P: Problem>(&mut self, problem: &P) -> SearchOutput<P> {
        instrumented::<P, _>(&self.limits, |termination, statistics| {
            Ok(graph_search_with(
                problem,
                path_cost_frontier::<P>(),
                termination,
                statistics,
            ))
        })
    }
}

fn path_cost_frontier<P: Problem>() -> PriorityFrontier<
    NodeRef<P::State, P::Action>,
    impl Fn(&NodeRef<P::State, P::Action>) -> HeuristicValue,
> {
    PriorityFrontier::new(Select::Min, |node: &NodeRef<P::State, P::Action>| {
        node.path_cost()
    })
}

/// A popped node whose state was already expanded is skipped, so the
/// successors of a state are generated at most once.
pub(super) fn graph_search_with<P, F>(
    problem: &P,
    mut frontier: F,
    termination: &mut TerminationCondition,
    statistics: &mut SearchStatistics,
) -> ProblemResult<P>
where
    P: Problem,
    F: Frontier<NodeRef<P::State, P::Action>>,
{
    let mut explored = HashSet::new();
    frontier.append(SearchNode::root(problem.initial_state().clone()));

    while let Some(node) = frontier.pop() {
        if problem.is_goal(node.state()) {
            return SearchResult::Solution(node);
        }
        if explored.contains(node.state()) {
            trace!(state = ?node.state(), "skipping explored state");
            statistics.increment_pruned_nodes();
            continue;
        }
        if let Some(reason) = termination.tick() {
            return SearchResult::Terminated(reason);
        }
        explored.insert(node.state().clone());
        statistics.increment_expanded_nodes(node.depth());

        let children: Vec<_> = node
            .expand(problem)
            .into_iter()
            .filter(|child| !explored.contains(child.state()))
            .collect();
        statistics.increment_generated_nodes(children.len());
        frontier.extend(children);
    }

    SearchResult::NoSolution
}

/// Graph search over a caller supplied frontier, without any budget.
pub fn graph_search<P, F>(problem: &P, frontier: F) -> ProblemResult<P>
where
    P: Problem,
    F: Frontier<NodeRef<P::State, P::Action>>,
{
    graph_search_with(
        problem,
        frontier,
        &mut TerminationCondition::unlimited(),
        &mut SearchStatistics::new(),
    )
}

pub fn breadth_first_graph_search<P: Problem>(problem: &P) -> ProblemResult<P> {
    graph_search(problem, FifoQueue::new())
}

pub fn depth_first_graph_search<P: Problem>(problem: &P) -> ProblemResult<P> {
    graph_search(problem, Stack::new())
}

pub fn uniform_cost_search<P: Problem>(problem: &P) -> ProblemResult<P> {
    graph_search(problem, path_cost_frontier::<P>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::TerminationReason;
    use crate::test_utils::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn cycle_without_goal_terminates() {
        let problem = GraphProblem::cycle(5);
        assert_eq!(breadth_first_graph_search(&problem), SearchResult::NoSolution);
        assert_eq!(depth_first_graph_search(&problem), SearchResult::NoSolution);
        assert_eq!(uniform_cost_search(&problem), SearchResult::NoSolution);
    }

    #[test]
    fn each_state_is_expanded_at_most_once() {
        let problem = GraphProblem::grid(6, 6);
        let result = breadth_first_graph_search(&problem);
        assert!(result.is_solution());
        assert_eq!(problem.max_expansions_per_state(), 1);

        let problem = GraphProblem::cycle(7);
        let (_, statistics) =
            GraphSearch::new(ExpansionOrder::DepthFirst, SearchLimits::default())
                .search(&problem)
                .unwrap();
        assert_eq!(problem.max_expansions_per_state(), 1);
        assert_eq!(statistics.expanded_nodes(), 7);
    }

    #[test]
    fn breadth_first_finds_fewest_steps() {
        let problem = GraphProblem::grid(4, 3);
        let node = breadth_first_graph_search(&problem)
            .into_solution_node()
            .unwrap();
        assert_eq!(node.depth(), 3 + 2);
    }

    #[test]
    fn uniform_cost_finds_cheapest_path() {
        let problem = GraphProblem::diamond();
        let node = uniform_cost_search(&problem).into_solution_node().unwrap();
        assert_eq!(node.path_states(), vec![0, 2, 3]);
        assert_eq!(node.path_cost(), HeuristicValue::from(5.));
    }

    #[test]
    fn uniform_cost_on_weighted_grid_is_optimal() {
        for seed in 0..4 {
            let problem = GraphProblem::weighted_grid(4, 4, seed);
            let node = uniform_cost_search(&problem).into_solution_node().unwrap();
            assert_approx_eq!(node.path_cost().into_inner(), problem.cheapest_cost());
        }
    }

    #[test]
    fn budget_stops_graph_search() {
        let problem = GraphProblem::infinite_tree(3, vec![]);
        let (result, _) = UniformCost::new(SearchLimits::with_max_expansions(50))
            .search(&problem)
            .unwrap();
        assert_eq!(
            result,
            SearchResult::Terminated(TerminationReason::ExpansionLimitExceeded)
        );
    }
}
