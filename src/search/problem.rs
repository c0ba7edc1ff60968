use crate::search::{HeuristicValue, SearchNode};
use crate::SearchError;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// The capability set a puzzle provides to the search engines. Engines only
/// ever see a puzzle through this trait.
///
/// Implementors must supply [`Problem::successors`]; [`Problem::actions`] and
/// [`Problem::result`] are derived from it. The default goal test compares
/// against [`Problem::goal`], which puzzles with several goal states or a
/// structural goal override.
pub trait Problem {
    /// An immutable configuration of the puzzle, compared and hashed
    /// structurally.
    type State: Clone + Eq + Hash + Debug;
    /// Label of a transition between two states. Carries no cost.
    type Action: Clone + Eq + Debug + Display;

    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    fn initial_state(&self) -> &Self::State;

    /// A single explicit goal state, if the puzzle has one.
    fn goal(&self) -> Option<&Self::State> {
        None
    }

    /// Every `(action, next state)` pair available from `state`.
    fn successors(&self, state: &Self::State) -> Vec<(Self::Action, Self::State)>;

    fn actions(&self, state: &Self::State) -> Vec<Self::Action> {
        self.successors(state)
            .into_iter()
            .map(|(action, _)| action)
            .collect()
    }

    /// The state reached by applying `action` in `state`, or `None` if the
    /// action is not applicable there.
    fn result(&self, state: &Self::State, action: &Self::Action) -> Option<Self::State> {
        self.successors(state)
            .into_iter()
            .find(|(candidate, _)| candidate == action)
            .map(|(_, next)| next)
    }

    fn is_goal(&self, state: &Self::State) -> bool {
        self.goal().is_some_and(|goal| goal == state)
    }

    /// Cost of a path that reaches `to` from `from` via `action`, given the
    /// path up to `from` costs `cost`. Unit cost per step by default.
    fn path_cost(
        &self,
        cost: HeuristicValue,
        _from: &Self::State,
        _action: &Self::Action,
        _to: &Self::State,
    ) -> HeuristicValue {
        cost + 1.
    }

    /// Estimated remaining cost from `node` to a goal. Must never
    /// overestimate for A* to be optimal, and must be consistent for RBFS.
    /// Problems without a heuristic keep the default, which makes informed
    /// search fail with [`SearchError::MissingHeuristic`].
    fn heuristic(
        &self,
        _node: &SearchNode<Self::State, Self::Action>,
    ) -> Result<HeuristicValue, SearchError> {
        Err(SearchError::MissingHeuristic {
            problem: self.name().to_string(),
        })
    }
}
