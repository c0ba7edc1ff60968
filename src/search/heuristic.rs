use crate::search::{Problem, SearchNode};
use crate::SearchError;
use ordered_float::OrderedFloat;
use std::collections::HashMap;
use std::fmt::Debug;

/// Heuristic estimates, path costs and evaluation scores all share this type
/// so that `g + h` needs no conversion and values are totally ordered.
pub type HeuristicValue = OrderedFloat<f64>;

/// Caches the heuristic value of every state evaluated during one search
/// invocation. A fresh cache is created per search so that values never
/// leak between unrelated problems.
pub struct MemoizedHeuristic<'a, P: Problem> {
    problem: &'a P,
    cache: HashMap<P::State, HeuristicValue>,
}

impl<'a, P: Problem> MemoizedHeuristic<'a, P> {
    pub fn new(problem: &'a P) -> Self {
        Self {
            problem,
            cache: HashMap::new(),
        }
    }

    /// Evaluates `node`, reusing the value of a previously seen equal state.
    /// Engines evaluate the root before anything else, so a problem without
    /// a heuristic fails there instead of being searched as if every state
    /// were at distance zero from the goal.
    pub fn evaluate(
        &mut self,
        node: &SearchNode<P::State, P::Action>,
    ) -> Result<HeuristicValue, SearchError> {
        if let Some(&value) = self.cache.get(node.state()) {
            return Ok(value);
        }
        let value = self.problem.heuristic(node)?;
        if value.into_inner().is_nan() || value.into_inner() < 0. {
            return Err(SearchError::InvalidHeuristicValue {
                problem: self.problem.name().to_string(),
                value: value.into_inner(),
            });
        }
        self.cache.insert(node.state().clone(), value);
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl<P: Problem> Debug for MemoizedHeuristic<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoizedHeuristic")
            .field("problem", &self.problem.name())
            .field("cached_values", &self.cache.len())
            .finish()
    }
}
