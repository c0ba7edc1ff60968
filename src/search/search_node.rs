use crate::search::{HeuristicValue, Problem};
use ordered_float::OrderedFloat;
use std::cell::Cell;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Shared handle to a node. Children keep their parent alive through it, so
/// a solution path stays reachable after the frontier is dropped.
pub type NodeRef<S, A> = Rc<SearchNode<S, A>>;

/// The node type used when searching problem `P`.
pub type ProblemNode<P> = SearchNode<<P as Problem>::State, <P as Problem>::Action>;

/// A [`SearchNode`] pairs a state with the way it was reached: the parent
/// node, the action applied to the parent, the cumulative path cost and the
/// depth.
///
/// Two nodes are equal, and hash equally, iff their states are equal. The
/// path is ignored, which is what lets frontiers recognise a state reached
/// along a different path.
#[derive(Debug)]
pub struct SearchNode<S, A> {
    state: S,
    parent: Option<NodeRef<S, A>>,
    action: Option<A>,
    /// G-value, the cost of the path from the root to this node.
    path_cost: HeuristicValue,
    depth: usize,
    /// F-value cached by informed search. Infinite until assigned.
    f: Cell<HeuristicValue>,
}

impl<S, A> SearchNode<S, A> {
    pub fn root(state: S) -> NodeRef<S, A> {
        Rc::new(Self {
            state,
            parent: None,
            action: None,
            path_cost: HeuristicValue::from(0.),
            depth: 0,
            f: Cell::new(OrderedFloat(f64::INFINITY)),
        })
    }

    fn new_child(parent: &NodeRef<S, A>, action: A, state: S, path_cost: HeuristicValue) -> Self {
        Self {
            state,
            parent: Some(Rc::clone(parent)),
            action: Some(action),
            path_cost,
            depth: parent.depth + 1,
            f: Cell::new(OrderedFloat(f64::INFINITY)),
        }
    }

    #[inline(always)]
    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn parent(&self) -> Option<&NodeRef<S, A>> {
        self.parent.as_ref()
    }

    /// The action that produced this node, `None` for the root.
    pub fn action(&self) -> Option<&A> {
        self.action.as_ref()
    }

    #[inline(always)]
    pub fn path_cost(&self) -> HeuristicValue {
        self.path_cost
    }

    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline(always)]
    pub fn f(&self) -> HeuristicValue {
        self.f.get()
    }

    pub fn set_f(&self, f: HeuristicValue) {
        self.f.set(f);
    }

    /// Nodes from the root to this node, both included.
    pub fn path(&self) -> Vec<&Self> {
        let mut path = vec![];
        let mut current = Some(self);
        while let Some(node) = current {
            path.push(node);
            current = node.parent.as_deref();
        }
        path.reverse();
        path
    }
}

impl<S: Clone, A: Clone> SearchNode<S, A> {
    /// Actions leading from the root to this node.
    pub fn solution(&self) -> Vec<A> {
        self.path()
            .into_iter()
            .filter_map(|node| node.action.clone())
            .collect()
    }

    /// States from the root to this node, both included.
    pub fn path_states(&self) -> Vec<S> {
        self.path()
            .into_iter()
            .map(|node| node.state.clone())
            .collect()
    }
}

impl<S, A> SearchNode<S, A>
where
    S: Clone + Eq + Hash + std::fmt::Debug,
    A: Clone + Eq + std::fmt::Debug + std::fmt::Display,
{
    /// One child per action available in this node's state.
    pub fn expand<P>(self: &Rc<Self>, problem: &P) -> Vec<NodeRef<S, A>>
    where
        P: Problem<State = S, Action = A>,
    {
        problem
            .successors(&self.state)
            .into_iter()
            .map(|(action, next)| {
                let cost = problem.path_cost(self.path_cost, &self.state, &action, &next);
                Rc::new(Self::new_child(self, action, next, cost))
            })
            .collect()
    }

    /// The child reached by `action`, or `None` if it does not apply here.
    pub fn child<P>(self: &Rc<Self>, problem: &P, action: &A) -> Option<NodeRef<S, A>>
    where
        P: Problem<State = S, Action = A>,
    {
        let next = problem.result(&self.state, action)?;
        let cost = problem.path_cost(self.path_cost, &self.state, action, &next);
        Some(Rc::new(Self::new_child(self, action.clone(), next, cost)))
    }
}

/// Releases the ancestor chain one node at a time. The derived drop would
/// recurse once per ancestor and overflow the stack on very deep paths.
impl<S, A> Drop for SearchNode<S, A> {
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(node) = parent {
            parent = match Rc::try_unwrap(node) {
                Ok(mut node) => node.parent.take(),
                Err(_) => None,
            };
        }
    }
}

impl<S: PartialEq, A> PartialEq for SearchNode<S, A> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl<S: Eq, A> Eq for SearchNode<S, A> {}

impl<S: Hash, A> Hash for SearchNode<S, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.state.hash(state);
    }
}
