//! Best-first graph search and its greedy and A* specialisations.

use crate::search::{
    search_engines::{
        search_engine::{instrumented, SearchOutput},
        ProblemResult, SearchEngine, SearchResult, TerminationCondition,
    },
    Frontier, HeuristicValue, MemoizedHeuristic, NodeRef, PriorityFrontier, Problem, ProblemNode,
    SearchLimits, SearchNode, SearchStatistics, Select,
};
use crate::SearchError;
use std::collections::HashSet;

/// The evaluation function `f` a [`BestFirst`] search orders its frontier by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// `f(n) = h(n)`
    Greedy,
    /// `f(n) = g(n) + h(n)`
    AStar,
}

#[derive(Debug, Clone)]
pub struct BestFirst {
    evaluation: Evaluation,
    limits: SearchLimits,
}

impl BestFirst {
    pub fn new(evaluation: Evaluation, limits: SearchLimits) -> Self {
        Self { evaluation, limits }
    }
}

impl SearchEngine for BestFirst {
    fn search<P: Problem>(&mut self, problem: &P) -> SearchOutput<P> {
        instrumented::<P, _>(&self.limits, |termination, statistics| {
            let mut heuristic = MemoizedHeuristic::new(problem);
            match self.evaluation {
                Evaluation::Greedy => best_first_graph_search_with(
                    problem,
                    |node| heuristic.evaluate(node),
                    termination,
                    statistics,
                ),
                Evaluation::AStar => best_first_graph_search_with(
                    problem,
                    |node| Ok(node.path_cost() + heuristic.evaluate(node)?),
                    termination,
                    statistics,
                ),
            }
        })
    }
}

/// Graph search over a frontier ordered by `evaluate`, lowest first. When a
/// state is reached again while still on the frontier, the entry with the
/// lower evaluation is kept.
///
/// The root is evaluated before anything else, so an evaluation that cannot
/// be computed fails the search up front.
pub(super) fn best_first_graph_search_with<P, E>(
    problem: &P,
    mut evaluate: E,
    termination: &mut TerminationCondition,
    statistics: &mut SearchStatistics,
) -> Result<ProblemResult<P>, SearchError>
where
    P: Problem,
    E: FnMut(&ProblemNode<P>) -> Result<HeuristicValue, SearchError>,
{
    let root = SearchNode::root(problem.initial_state().clone());
    root.set_f(evaluate(&root)?);

    let mut frontier =
        PriorityFrontier::new(Select::Min, |node: &NodeRef<P::State, P::Action>| node.f());
    frontier.append(root);
    let mut explored = HashSet::new();

    while let Some(node) = frontier.pop() {
        statistics.register_evaluation(node.f());
        if problem.is_goal(node.state()) {
            return Ok(SearchResult::Solution(node));
        }
        if let Some(reason) = termination.tick() {
            return Ok(SearchResult::Terminated(reason));
        }
        explored.insert(node.state().clone());
        statistics.increment_expanded_nodes(node.depth());

        let children = node.expand(problem);
        statistics.increment_generated_nodes(children.len());
        for child in children {
            if explored.contains(child.state()) {
                statistics.increment_pruned_nodes();
                continue;
            }
            child.set_f(evaluate(&child)?);
            match frontier.score_of(&child) {
                None => frontier.append(child),
                Some(incumbent) if child.f() < incumbent => {
                    frontier.remove(&child);
                    frontier.append(child);
                    statistics.increment_replaced_nodes();
                }
                Some(_) => {}
            }
        }
    }

    Ok(SearchResult::NoSolution)
}

/// Best-first graph search with a caller supplied evaluation, without any
/// budget.
pub fn best_first_graph_search<P, E>(
    problem: &P,
    evaluate: E,
) -> Result<ProblemResult<P>, SearchError>
where
    P: Problem,
    E: FnMut(&ProblemNode<P>) -> Result<HeuristicValue, SearchError>,
{
    best_first_graph_search_with(
        problem,
        evaluate,
        &mut TerminationCondition::unlimited(),
        &mut SearchStatistics::new(),
    )
}

/// Fast, but the solution found need not be the cheapest.
pub fn greedy_best_first_search<P: Problem>(
    problem: &P,
) -> Result<ProblemResult<P>, SearchError> {
    BestFirst::new(Evaluation::Greedy, SearchLimits::unlimited())
        .search(problem)
        .map(|(result, _)| result)
}

/// Optimal whenever the problem's heuristic is admissible.
pub fn astar_search<P: Problem>(problem: &P) -> Result<ProblemResult<P>, SearchError> {
    BestFirst::new(Evaluation::AStar, SearchLimits::unlimited())
        .search(problem)
        .map(|(result, _)| result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::TerminationReason;
    use crate::test_utils::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn astar_replaces_worse_frontier_entry() {
        let problem = GraphProblem::diamond();
        let (result, statistics) = BestFirst::new(Evaluation::AStar, SearchLimits::default())
            .search(&problem)
            .unwrap();
        let node = result.into_solution_node().unwrap();
        assert_eq!(node.path_states(), vec![0, 2, 3]);
        assert_eq!(node.path_cost(), HeuristicValue::from(5.));
        assert_eq!(statistics.replaced_nodes(), 1);
    }

    #[test]
    fn greedy_follows_heuristic() {
        let problem = GraphProblem::diamond();
        let node = greedy_best_first_search(&problem)
            .unwrap()
            .into_solution_node()
            .unwrap();
        assert_eq!(node.solution(), vec![Edge(0, 2), Edge(2, 3)]);
    }

    #[test]
    fn astar_is_optimal_with_admissible_heuristic() {
        for seed in 0..6 {
            let problem = GraphProblem::weighted_grid(5, 4, seed);
            let node = astar_search(&problem)
                .unwrap()
                .into_solution_node()
                .unwrap();
            assert_approx_eq!(node.path_cost().into_inner(), problem.cheapest_cost());
        }
    }

    #[test]
    fn heuristic_is_evaluated_once_per_state() {
        let problem = GraphProblem::grid(5, 5);
        astar_search(&problem).unwrap();
        assert!(problem.heuristic_calls() <= 25);
    }

    #[test]
    fn missing_heuristic_fails_before_expanding() {
        let problem = GraphProblem::grid(3, 3).without_heuristic();
        assert!(matches!(
            astar_search(&problem),
            Err(SearchError::MissingHeuristic { .. })
        ));
        assert!(matches!(
            greedy_best_first_search(&problem),
            Err(SearchError::MissingHeuristic { .. })
        ));
        assert_eq!(problem.max_expansions_per_state(), 0);
    }

    #[test]
    fn custom_evaluation_without_heuristic() {
        let problem = GraphProblem::diamond().without_heuristic();
        let result = best_first_graph_search(&problem, |node| Ok(node.path_cost())).unwrap();
        assert_eq!(
            result.solution_node().unwrap().path_cost(),
            HeuristicValue::from(5.)
        );
    }

    #[test]
    fn goalless_cycle_has_no_solution() {
        let problem = GraphProblem::cycle(6);
        assert_eq!(astar_search(&problem).unwrap(), SearchResult::NoSolution);
    }

    #[test]
    fn budget_stops_astar() {
        let problem = GraphProblem::infinite_tree(2, vec![]);
        let (result, statistics) =
            BestFirst::new(Evaluation::AStar, SearchLimits::with_max_expansions(20))
                .search(&problem)
                .unwrap();
        assert_eq!(
            result,
            SearchResult::Terminated(TerminationReason::ExpansionLimitExceeded)
        );
        assert_eq!(statistics.expanded_nodes(), 20);
    }
}
