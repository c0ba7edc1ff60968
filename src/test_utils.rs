use crate::search::{HeuristicValue, Problem, SearchNode};
use crate::SearchError;
use ordered_float::OrderedFloat;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt::Display;

pub const MOLECULE_DEFAULT_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benchmarks/molecule/default.txt"
));

pub const FOOTBALL_NEAR_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benchmarks/football/near.txt"
));

pub const FOOTBALL_FAR_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benchmarks/football/far.txt"
));

pub const PACMAN_TWO_STARS_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benchmarks/pacman/two_stars.txt"
));

pub const PACMAN_FIVE_STARS_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benchmarks/pacman/five_stars.txt"
));

pub const SUDOKU_CLASSIC_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benchmarks/sudoku/classic.txt"
));

/// Action of a [`GraphProblem`]: follow the edge from the first node to the
/// second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge(pub usize, pub usize);

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.0, self.1)
    }
}

#[derive(Debug)]
enum Topology {
    /// Adjacency lists of `(target, weight)`
    Explicit(Vec<Vec<(usize, f64)>>),
    /// Unbounded tree in heap numbering: the children of `n` are
    /// `branching * n + 1 ..= branching * n + branching`, all at unit cost
    Tree { branching: usize },
}

/// Small synthetic problems over `usize` states that record how often each
/// state was expanded and how often the heuristic was asked for.
#[derive(Debug)]
pub struct GraphProblem {
    name: String,
    initial: usize,
    goals: Vec<usize>,
    topology: Topology,
    /// Per-state estimates, zero for states past the end; `None` means the
    /// problem has no heuristic at all
    heuristic: Option<Vec<f64>>,
    heuristic_calls: Cell<usize>,
    expansions: RefCell<HashMap<usize, usize>>,
}

impl GraphProblem {
    fn explicit(
        name: &str,
        num_nodes: usize,
        edges: &[(usize, usize, f64)],
        goals: Vec<usize>,
        heuristic: Vec<f64>,
    ) -> Self {
        let mut adjacency = vec![vec![]; num_nodes];
        for &(from, to, weight) in edges {
            adjacency[from].push((to, weight));
        }
        Self {
            name: name.to_string(),
            initial: 0,
            goals,
            topology: Topology::Explicit(adjacency),
            heuristic: Some(heuristic),
            heuristic_calls: Cell::new(0),
            expansions: RefCell::new(HashMap::new()),
        }
    }

    /// `0 -> 1 -> 3` costs 6, `0 -> 2 -> 3` costs 5. The heuristic is
    /// consistent and prefers going through 1 first.
    pub fn diamond() -> Self {
        Self::explicit(
            "diamond",
            4,
            &[(0, 1, 1.), (0, 2, 4.), (1, 3, 5.), (2, 3, 1.)],
            vec![3],
            vec![3., 4., 1., 0.],
        )
    }

    /// A directed ring of `n` states without any goal.
    pub fn cycle(n: usize) -> Self {
        let edges: Vec<_> = (0..n).map(|i| (i, (i + 1) % n, 1.)).collect();
        Self::explicit("cycle", n, &edges, vec![], vec![])
    }

    /// State 2 is the goal but only state 1 is reachable.
    pub fn disconnected() -> Self {
        Self::explicit("disconnected", 3, &[(0, 1, 1.)], vec![2], vec![])
    }

    pub fn infinite_tree(branching: usize, goals: Vec<usize>) -> Self {
        Self {
            name: format!("tree-{}", branching),
            initial: 0,
            goals,
            topology: Topology::Tree { branching },
            heuristic: Some(vec![]),
            heuristic_calls: Cell::new(0),
            expansions: RefCell::new(HashMap::new()),
        }
    }

    /// Four-connected grid from the top left corner to the bottom right one,
    /// unit costs and the Manhattan distance as heuristic.
    pub fn grid(width: usize, height: usize) -> Self {
        Self::grid_with_weights(width, height, |_, _| 1.)
    }

    /// Like [`GraphProblem::grid`] with step costs between 1 and 5 that
    /// depend on `seed`. The Manhattan distance stays consistent.
    pub fn weighted_grid(width: usize, height: usize, seed: usize) -> Self {
        Self::grid_with_weights(width, height, move |from, to| {
            (1 + (from * 31 + to * 17 + seed * 7) % 5) as f64
        })
    }

    fn grid_with_weights(width: usize, height: usize, weight: impl Fn(usize, usize) -> f64) -> Self {
        let index = |x: usize, y: usize| y * width + x;
        let mut edges = vec![];
        for y in 0..height {
            for x in 0..width {
                let from = index(x, y);
                let mut neighbours = vec![];
                if x + 1 < width {
                    neighbours.push(index(x + 1, y));
                }
                if y + 1 < height {
                    neighbours.push(index(x, y + 1));
                }
                if x > 0 {
                    neighbours.push(index(x - 1, y));
                }
                if y > 0 {
                    neighbours.push(index(x, y - 1));
                }
                for to in neighbours {
                    edges.push((from, to, weight(from, to)));
                }
            }
        }
        let heuristic = (0..width * height)
            .map(|cell| ((width - 1 - cell % width) + (height - 1 - cell / width)) as f64)
            .collect();
        Self::explicit(
            &format!("grid-{}x{}", width, height),
            width * height,
            &edges,
            vec![width * height - 1],
            heuristic,
        )
    }

    pub fn with_heuristic(mut self, heuristic: Vec<f64>) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    pub fn without_heuristic(mut self) -> Self {
        self.heuristic = None;
        self
    }

    pub fn starting_at(mut self, state: usize) -> Self {
        self.initial = state;
        self
    }

    pub fn heuristic_calls(&self) -> usize {
        self.heuristic_calls.get()
    }

    pub fn max_expansions_per_state(&self) -> usize {
        self.expansions.borrow().values().copied().max().unwrap_or(0)
    }

    /// Cost of the cheapest path to any goal, by Dijkstra's algorithm.
    pub fn cheapest_cost(&self) -> f64 {
        let Topology::Explicit(adjacency) = &self.topology else {
            panic!("cheapest_cost needs an explicit graph");
        };
        let mut distance = vec![f64::INFINITY; adjacency.len()];
        let mut done = vec![false; adjacency.len()];
        distance[self.initial] = 0.;
        while let Some(current) = (0..adjacency.len())
            .filter(|&node| !done[node] && distance[node].is_finite())
            .min_by(|&a, &b| distance[a].total_cmp(&distance[b]))
        {
            done[current] = true;
            for &(next, weight) in &adjacency[current] {
                distance[next] = distance[next].min(distance[current] + weight);
            }
        }
        self.goals
            .iter()
            .map(|&goal| distance[goal])
            .fold(f64::INFINITY, f64::min)
    }

    fn neighbours(&self, state: usize) -> Vec<(usize, f64)> {
        match &self.topology {
            Topology::Explicit(adjacency) => adjacency[state].clone(),
            Topology::Tree { branching } => (1..=*branching)
                .map(|i| (branching * state + i, 1.))
                .collect(),
        }
    }
}

impl Problem for GraphProblem {
    type State = usize;
    type Action = Edge;

    fn name(&self) -> &str {
        &self.name
    }

    fn initial_state(&self) -> &usize {
        &self.initial
    }

    fn is_goal(&self, state: &usize) -> bool {
        self.goals.contains(state)
    }

    fn successors(&self, state: &usize) -> Vec<(Edge, usize)> {
        *self.expansions.borrow_mut().entry(*state).or_insert(0) += 1;
        self.neighbours(*state)
            .into_iter()
            .map(|(next, _)| (Edge(*state, next), next))
            .collect()
    }

    fn result(&self, state: &usize, action: &Edge) -> Option<usize> {
        if action.0 != *state {
            return None;
        }
        self.neighbours(*state)
            .into_iter()
            .find(|&(next, _)| next == action.1)
            .map(|(next, _)| next)
    }

    fn path_cost(
        &self,
        cost: HeuristicValue,
        from: &usize,
        _action: &Edge,
        to: &usize,
    ) -> HeuristicValue {
        let weight = self
            .neighbours(*from)
            .into_iter()
            .find(|&(next, _)| next == *to)
            .map_or(1., |(_, weight)| weight);
        cost + weight
    }

    fn heuristic(&self, node: &SearchNode<usize, Edge>) -> Result<HeuristicValue, SearchError> {
        self.heuristic_calls.set(self.heuristic_calls.get() + 1);
        match &self.heuristic {
            Some(values) => Ok(OrderedFloat(
                values.get(*node.state()).copied().unwrap_or(0.),
            )),
            None => Err(SearchError::MissingHeuristic {
                problem: self.name.clone(),
            }),
        }
    }
}
