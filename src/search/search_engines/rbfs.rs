//! Recursive best-first search (RBFS). Memory is linear in the depth of the
//! search: only the current path and the siblings along it are kept, and
//! the f-value of a forgotten subtree is backed up into its root so the
//! subtree is re-entered only once it looks best again.

use crate::search::{
    search_engines::{
        search_engine::{instrumented, SearchOutput},
        ProblemResult, SearchEngine, SearchResult, TerminationCondition,
    },
    HeuristicValue, MemoizedHeuristic, NodeRef, Problem, SearchLimits, SearchNode,
    SearchStatistics,
};
use crate::SearchError;
use ordered_float::OrderedFloat;

#[derive(Debug, Clone)]
pub struct Rbfs {
    limits: SearchLimits,
}

impl Rbfs {
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }
}

impl SearchEngine for Rbfs {
    fn search<P: Problem>(&mut self, problem: &P) -> SearchOutput<P> {
        instrumented::<P, _>(&self.limits, |termination, statistics| {
            let mut heuristic = MemoizedHeuristic::new(problem);
            let root = SearchNode::root(problem.initial_state().clone());
            root.set_f(heuristic.evaluate(&root)?);

            let mut search = RbfsSearch {
                problem,
                heuristic,
                termination,
                statistics,
            };
            search.run(root)
        })
    }
}

/// One level of the current path: a node being searched within `f_limit`
/// and its successors. The first successor, once sorted, is the child
/// currently being searched.
struct Frame<S, A> {
    node: NodeRef<S, A>,
    f_limit: HeuristicValue,
    successors: Vec<NodeRef<S, A>>,
}

struct RbfsSearch<'a, P: Problem> {
    problem: &'a P,
    heuristic: MemoizedHeuristic<'a, P>,
    termination: &'a mut TerminationCondition,
    statistics: &'a mut SearchStatistics,
}

impl<P: Problem> RbfsSearch<'_, P> {
    /// Searches below `root`. The path is kept as an explicit stack of
    /// frames, so its depth is not bounded by the thread's stack size.
    fn run(
        &mut self,
        root: NodeRef<P::State, P::Action>,
    ) -> Result<ProblemResult<P>, SearchError> {
        let mut path: Vec<Frame<P::State, P::Action>> = vec![];
        let mut next = Some((root, OrderedFloat(f64::INFINITY)));

        loop {
            if let Some((node, f_limit)) = next.take() {
                if self.problem.is_goal(node.state()) {
                    return Ok(SearchResult::Solution(node));
                }
                if let Some(reason) = self.termination.tick() {
                    return Ok(SearchResult::Terminated(reason));
                }
                let successors = self.expand(&node)?;
                path.push(Frame {
                    node,
                    f_limit,
                    successors,
                });
            }

            let Some(frame) = path.last_mut() else {
                return Ok(SearchResult::NoSolution);
            };
            frame.successors.sort_by_key(|successor| successor.f());
            let best = frame.successors.first().cloned();
            let best_f = best
                .as_ref()
                .map_or(OrderedFloat(f64::INFINITY), |successor| successor.f());

            // An infinite best value can never come under any limit
            let within_limit = best_f <= frame.f_limit && best_f.into_inner().is_finite();
            let Some(best) = best.filter(|_| within_limit) else {
                if let Some(failed) = path.pop() {
                    failed.node.set_f(best_f);
                }
                if path.is_empty() {
                    return Ok(SearchResult::NoSolution);
                }
                continue;
            };

            let alternative = frame
                .successors
                .get(1)
                .map_or(OrderedFloat(f64::INFINITY), |successor| successor.f());
            next = Some((best, frame.f_limit.min(alternative)));
        }
    }

    /// Successors of `node` with their f-values, never below the parent's.
    fn expand(
        &mut self,
        node: &NodeRef<P::State, P::Action>,
    ) -> Result<Vec<NodeRef<P::State, P::Action>>, SearchError> {
        self.statistics.increment_expanded_nodes(node.depth());
        self.statistics.register_evaluation(node.f());

        let successors = node.expand(self.problem);
        self.statistics.increment_generated_nodes(successors.len());
        for successor in &successors {
            let f = successor.path_cost() + self.heuristic.evaluate(successor)?;
            successor.set_f(f.max(node.f()));
        }
        Ok(successors)
    }
}

pub fn recursive_best_first_search<P: Problem>(
    problem: &P,
) -> Result<ProblemResult<P>, SearchError> {
    Rbfs::new(SearchLimits::unlimited())
        .search(problem)
        .map(|(result, _)| result)
}
