//! Tree search: the frontier alone decides the expansion order and repeated
//! states are never detected, so it only terminates on acyclic spaces or
//! under a budget.

use crate::search::{
    search_engines::{
        search_engine::{instrumented, SearchOutput},
        ProblemResult, SearchEngine, SearchResult, TerminationCondition,
    },
    FifoQueue, Frontier, NodeRef, Problem, SearchLimits, SearchNode, SearchStatistics, Stack,
};

/// Which uninformed frontier the tree and graph searches run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionOrder {
    /// First-in-first-out queue
    BreadthFirst,
    /// Last-in-first-out stack
    DepthFirst,
}

#[derive(Debug, Clone)]
pub struct TreeSearch {
    order: ExpansionOrder,
    limits: SearchLimits,
}

impl TreeSearch {
    pub fn new(order: ExpansionOrder, limits: SearchLimits) -> Self {
        Self { order, limits }
    }

    /// Every goal node in depth-first order. Goal nodes are not expanded
    /// further, and the children of a node are visited in the order the
    /// problem lists its actions.
    pub fn solutions<P: Problem>(problem: &P) -> Solutions<'_, P> {
        let mut stack = Stack::new();
        stack.append(SearchNode::root(problem.initial_state().clone()));
        Solutions { problem, stack }
    }
}

impl SearchEngine for TreeSearch {
    fn search<P: Problem>(&mut self, problem: &P) -> SearchOutput<P> {
        instrumented::<P, _>(&self.limits, |termination, statistics| {
            Ok(match self.order {
                ExpansionOrder::BreadthFirst => {
                    tree_search_with(problem, FifoQueue::new(), termination, statistics)
                }
                ExpansionOrder::DepthFirst => {
                    tree_search_with(problem, Stack::new(), termination, statistics)
                }
            })
        })
    }
}

pub(super) fn tree_search_with<P, F>(
    problem: &P,
    mut frontier: F,
    termination: &mut TerminationCondition,
    statistics: &mut SearchStatistics,
) -> ProblemResult<P>
where
    P: Problem,
    F: Frontier<NodeRef<P::State, P::Action>>,
{
    frontier.append(SearchNode::root(problem.initial_state().clone()));

    while let Some(node) = frontier.pop() {
        if problem.is_goal(node.state()) {
            return SearchResult::Solution(node);
        }
        if let Some(reason) = termination.tick() {
            return SearchResult::Terminated(reason);
        }
        statistics.increment_expanded_nodes(node.depth());

        let children = node.expand(problem);
        statistics.increment_generated_nodes(children.len());
        frontier.extend(children);
    }

    SearchResult::NoSolution
}

/// Tree search over a caller supplied frontier, without any budget.
pub fn tree_search<P, F>(problem: &P, frontier: F) -> ProblemResult<P>
where
    P: Problem,
    F: Frontier<NodeRef<P::State, P::Action>>,
{
    tree_search_with(
        problem,
        frontier,
        &mut TerminationCondition::unlimited(),
        &mut SearchStatistics::new(),
    )
}

pub fn breadth_first_tree_search<P: Problem>(problem: &P) -> ProblemResult<P> {
    tree_search(problem, FifoQueue::new())
}

pub fn depth_first_tree_search<P: Problem>(problem: &P) -> ProblemResult<P> {
    tree_search(problem, Stack::new())
}

/// Iterator returned by [`TreeSearch::solutions`].
pub struct Solutions<'a, P: Problem> {
    problem: &'a P,
    stack: Stack<NodeRef<P::State, P::Action>>,
}

impl<P: Problem> std::fmt::Debug for Solutions<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solutions")
            .field("problem", &self.problem.name())
            .field("pending", &self.stack.len())
            .finish()
    }
}

impl<P: Problem> Iterator for Solutions<'_, P> {
    type Item = NodeRef<P::State, P::Action>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if self.problem.is_goal(node.state()) {
                return Some(node);
            }
            let mut children = node.expand(self.problem);
            children.reverse();
            self.stack.extend(children);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{HeuristicValue, TerminationReason};
    use crate::test_utils::*;

    #[test]
    fn breadth_first_finds_shallowest_goal() {
        let problem = GraphProblem::diamond();
        let result = breadth_first_tree_search(&problem);
        let node = result.solution_node().unwrap();
        assert_eq!(node.solution(), vec![Edge(0, 1), Edge(1, 3)]);
        assert_eq!(node.path_cost(), HeuristicValue::from(6.));
    }

    #[test]
    fn depth_first_follows_last_child() {
        let problem = GraphProblem::diamond();
        let result = depth_first_tree_search(&problem);
        let node = result.solution_node().unwrap();
        assert_eq!(node.path_states(), vec![0, 2, 3]);
    }

    #[test]
    fn exhausted_acyclic_space_has_no_solution() {
        let problem = GraphProblem::disconnected();
        assert_eq!(breadth_first_tree_search(&problem), SearchResult::NoSolution);
        assert_eq!(depth_first_tree_search(&problem), SearchResult::NoSolution);
    }

    #[test]
    fn root_goal_is_returned_without_expansion() {
        let problem = GraphProblem::diamond().starting_at(3);
        let (result, statistics) =
            TreeSearch::new(ExpansionOrder::BreadthFirst, SearchLimits::default())
                .search(&problem)
                .unwrap();
        assert!(result.solution_node().unwrap().solution().is_empty());
        assert_eq!(statistics.expanded_nodes(), 0);
    }

    #[test]
    fn cycles_need_a_budget() {
        let problem = GraphProblem::cycle(3);
        let (result, statistics) =
            TreeSearch::new(ExpansionOrder::DepthFirst, SearchLimits::with_max_expansions(100))
                .search(&problem)
                .unwrap();
        assert_eq!(
            result,
            SearchResult::Terminated(TerminationReason::ExpansionLimitExceeded)
        );
        assert_eq!(statistics.expanded_nodes(), 100);
    }

    #[test]
    fn solutions_enumerates_every_goal_path() {
        let problem = GraphProblem::diamond();
        let paths: Vec<Vec<usize>> = TreeSearch::solutions(&problem)
            .map(|node| node.path_states())
            .collect();
        assert_eq!(paths, vec![vec![0, 1, 3], vec![0, 2, 3]]);
    }

    #[test]
    fn solutions_of_goalless_space_is_empty() {
        let problem = GraphProblem::disconnected();
        assert_eq!(TreeSearch::solutions(&problem).count(), 0);
    }
}
