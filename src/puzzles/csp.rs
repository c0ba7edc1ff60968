//! Constraint satisfaction as incremental assignment. Variables are filled
//! in a fixed order, one per action, and an action is only offered when the
//! partial assignment it produces violates no constraint. Any complete
//! assignment reached this way is a solution.

use crate::search::search_engines::{depth_first_tree_search, TreeSearch};
use crate::search::{HeuristicValue, Problem, SearchNode};
use crate::{InputError, SearchError};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::rc::Rc;

pub type Value = i64;

/// Test applied by [`Constraint::Predicate`] to the values of its scope, in
/// scope order.
pub type PredicateFn = Rc<dyn Fn(&[Value]) -> bool>;

#[derive(Clone)]
pub enum Constraint {
    /// No two variables in the scope share a value.
    AllDifferent(Vec<usize>),
    /// The scope sums to exactly `target`. Partial assignments are rejected
    /// as soon as the domain bounds of the unassigned variables can no
    /// longer reach the target.
    ExactSum { scope: Vec<usize>, target: Value },
    /// Arbitrary test, checked once every variable in the scope has a value.
    Predicate { scope: Vec<usize>, test: PredicateFn },
}

impl Constraint {
    pub fn predicate(scope: Vec<usize>, test: impl Fn(&[Value]) -> bool + 'static) -> Self {
        Constraint::Predicate {
            scope,
            test: Rc::new(test),
        }
    }

    pub fn scope(&self) -> &[usize] {
        match self {
            Constraint::AllDifferent(scope)
            | Constraint::ExactSum { scope, .. }
            | Constraint::Predicate { scope, .. } => scope,
        }
    }

    fn is_consistent(&self, assignment: &Assignment, variables: &[Variable]) -> bool {
        match self {
            Constraint::AllDifferent(scope) => scope
                .iter()
                .filter_map(|&variable| assignment.get(variable))
                .all_unique(),
            Constraint::ExactSum { scope, target } => {
                let (mut low, mut high) = (0, 0);
                for &variable in scope {
                    match assignment.get(variable) {
                        Some(value) => {
                            low += value;
                            high += value;
                        }
                        None => {
                            let (min, max) = variables[variable].bounds();
                            low += min;
                            high += max;
                        }
                    }
                }
                (low..=high).contains(target)
            }
            Constraint::Predicate { scope, test } => {
                match scope
                    .iter()
                    .map(|&variable| assignment.get(variable))
                    .collect::<Option<Vec<_>>>()
                {
                    Some(values) => test(&values),
                    None => true,
                }
            }
        }
    }
}

impl Debug for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::AllDifferent(scope) => f.debug_tuple("AllDifferent").field(scope).finish(),
            Constraint::ExactSum { scope, target } => f
                .debug_struct("ExactSum")
                .field("scope", scope)
                .field("target", target)
                .finish(),
            Constraint::Predicate { scope, .. } => f
                .debug_struct("Predicate")
                .field("scope", scope)
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Variable {
    name: Rc<str>,
    domain: Vec<Value>,
}

impl Variable {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &[Value] {
        &self.domain
    }

    fn bounds(&self) -> (Value, Value) {
        match self.domain.iter().minmax().into_option() {
            Some((&min, &max)) => (min, max),
            None => (0, 0),
        }
    }
}

/// Values of the variables assigned so far, indexed by variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Assignment(Vec<Option<Value>>);

impl Assignment {
    pub fn get(&self, variable: usize) -> Option<Value> {
        self.0.get(variable).copied().flatten()
    }

    pub fn assigned(&self) -> usize {
        self.0.iter().filter(|value| value.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    /// Every value in variable order, if the assignment is complete.
    pub fn values(&self) -> Option<Vec<Value>> {
        self.0.iter().copied().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assign {
    pub variable: usize,
    pub name: Rc<str>,
    pub value: Value,
}

impl Display for Assign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

/// A constraint satisfaction problem. Build it with [`Csp::add_variable`]
/// and [`Csp::add_constraint`]; variables are assigned in the order they
/// were added unless [`Csp::set_order`] says otherwise.
#[derive(Debug, Clone)]
pub struct Csp {
    name: String,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    /// Indices into `constraints` for every variable
    constraints_of: Vec<Vec<usize>>,
    order: Vec<usize>,
    initial: Assignment,
}

impl Csp {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            variables: vec![],
            constraints: vec![],
            constraints_of: vec![],
            order: vec![],
            initial: Assignment(vec![]),
        }
    }

    /// Adds a variable and returns its index.
    pub fn add_variable(&mut self, name: &str, domain: impl IntoIterator<Item = Value>) -> usize {
        let index = self.variables.len();
        self.variables.push(Variable {
            name: Rc::from(name),
            domain: domain.into_iter().collect(),
        });
        self.constraints_of.push(vec![]);
        self.order.push(index);
        self.initial.0.push(None);
        index
    }

    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<(), InputError> {
        if let Some(&unknown) = constraint
            .scope()
            .iter()
            .find(|&&variable| variable >= self.variables.len())
        {
            return Err(InputError::OutOfDomain {
                what: "constraint scope",
                message: format!("no variable with index {}", unknown),
            });
        }
        let index = self.constraints.len();
        for &variable in constraint.scope().iter().unique() {
            self.constraints_of[variable].push(index);
        }
        self.constraints.push(constraint);
        Ok(())
    }

    /// Fixes the assignment order. `order` must list every variable once.
    pub fn set_order(&mut self, order: Vec<usize>) -> Result<(), InputError> {
        let mut sorted = order.clone();
        sorted.sort_unstable();
        if !sorted.into_iter().eq(0..self.variables.len()) {
            return Err(InputError::OutOfDomain {
                what: "variable order",
                message: format!("{:?} is not a permutation of the variables", order),
            });
        }
        self.order = order;
        Ok(())
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    fn next_variable(&self, assignment: &Assignment) -> Option<usize> {
        self.order.get(assignment.assigned()).copied()
    }

    /// Whether every constraint touching `variable` holds on `assignment`.
    fn is_consistent(&self, assignment: &Assignment, variable: usize) -> bool {
        self.constraints_of[variable]
            .iter()
            .all(|&index| self.constraints[index].is_consistent(assignment, &self.variables))
    }

    /// The first solution found by depth-first tree search.
    pub fn first_solution(&self) -> Option<Assignment> {
        depth_first_tree_search(self)
            .into_solution_node()
            .map(|node| node.state().clone())
    }

    /// Every solution, lazily, ordered by the domains in assignment order.
    pub fn solutions(&self) -> impl Iterator<Item = Assignment> + '_ {
        TreeSearch::solutions(self).map(|node| node.state().clone())
    }
}

impl Problem for Csp {
    type State = Assignment;
    type Action = Assign;

    fn name(&self) -> &str {
        &self.name
    }

    fn initial_state(&self) -> &Assignment {
        &self.initial
    }

    fn successors(&self, state: &Assignment) -> Vec<(Assign, Assignment)> {
        let Some(variable) = self.next_variable(state) else {
            return vec![];
        };
        let name = &self.variables[variable].name;
        self.variables[variable]
            .domain
            .iter()
            .filter_map(|&value| {
                let mut next = state.clone();
                next.0[variable] = Some(value);
                self.is_consistent(&next, variable).then(|| {
                    (
                        Assign {
                            variable,
                            name: Rc::clone(name),
                            value,
                        },
                        next,
                    )
                })
            })
            .collect()
    }

    fn is_goal(&self, state: &Assignment) -> bool {
        state.is_complete()
    }

    /// Every action assigns exactly one variable, so the number still
    /// unassigned is exact whenever a solution below the node exists.
    fn heuristic(
        &self,
        node: &SearchNode<Assignment, Assign>,
    ) -> Result<HeuristicValue, SearchError> {
        let remaining = self.variables.len() - node.state().assigned();
        Ok(OrderedFloat(remaining as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::search_engines::astar_search;
    use crate::search::validate;

    /// `a + b + c == 6` over distinct values from 1..=3.
    fn permutations_of_three() -> Csp {
        let mut csp = Csp::new("sum");
        let scope: Vec<usize> = ["a", "b", "c"]
            .into_iter()
            .map(|name| csp.add_variable(name, 1..=3))
            .collect();
        csp.add_constraint(Constraint::AllDifferent(scope.clone()))
            .unwrap();
        csp.add_constraint(Constraint::ExactSum { scope, target: 6 })
            .unwrap();
        csp
    }

    #[test]
    fn all_different_prunes_repeated_values() {
        let csp = permutations_of_three();
        let assign_a = Assign {
            variable: 0,
            name: Rc::from("a"),
            value: 2,
        };
        let after_a = csp.result(csp.initial_state(), &assign_a).unwrap();
        let values: Vec<Value> = csp
            .actions(&after_a)
            .into_iter()
            .map(|action| action.value)
            .collect();
        assert_eq!(values, vec![1, 3]);
    }

    #[test]
    fn exact_sum_prunes_with_domain_bounds() {
        let mut csp = Csp::new("bounds");
        let a = csp.add_variable("a", 1..=9);
        let b = csp.add_variable("b", 1..=4);
        csp.add_constraint(Constraint::ExactSum {
            scope: vec![a, b],
            target: 10,
        })
        .unwrap();
        let values: Vec<Value> = csp
            .actions(csp.initial_state())
            .into_iter()
            .map(|action| action.value)
            .collect();
        assert_eq!(values, vec![6, 7, 8, 9]);
    }

    #[test]
    fn predicate_waits_for_its_whole_scope() {
        let mut csp = Csp::new("ordered");
        let a = csp.add_variable("a", 0..3);
        let b = csp.add_variable("b", 0..3);
        csp.add_constraint(Constraint::predicate(vec![a, b], |values| {
            values[0] < values[1]
        }))
        .unwrap();
        assert_eq!(csp.actions(csp.initial_state()).len(), 3);
        assert_eq!(csp.solutions().count(), 3);
    }

    #[test]
    fn enumerates_every_solution_in_order() {
        let csp = permutations_of_three();
        let solutions: Vec<Vec<Value>> = csp
            .solutions()
            .map(|assignment| assignment.values().unwrap())
            .collect();
        assert_eq!(
            solutions,
            vec![
                vec![1, 2, 3],
                vec![1, 3, 2],
                vec![2, 1, 3],
                vec![2, 3, 1],
                vec![3, 1, 2],
                vec![3, 2, 1],
            ]
        );
    }

    #[test]
    fn custom_order_is_followed() {
        let mut csp = permutations_of_three();
        csp.set_order(vec![2, 0, 1]).unwrap();
        let actions = csp.actions(csp.initial_state());
        assert!(actions.iter().all(|action| action.variable == 2));
        assert_eq!(actions[0].to_string(), "c = 1");
        assert!(csp.set_order(vec![0, 0, 1]).is_err());
    }

    #[test]
    fn unsatisfiable_problem_has_no_solution() {
        let mut csp = Csp::new("pigeons");
        let scope: Vec<usize> = (0..3)
            .map(|i| csp.add_variable(&format!("p{}", i), 0..2))
            .collect();
        csp.add_constraint(Constraint::AllDifferent(scope)).unwrap();
        assert_eq!(csp.first_solution(), None);
        assert_eq!(csp.solutions().count(), 0);
    }

    #[test]
    fn informed_search_works_on_assignments() {
        let csp = permutations_of_three();
        let node = astar_search(&csp).unwrap().into_solution_node().unwrap();
        assert_eq!(node.depth(), 3);
        assert_eq!(validate(&csp, &node.solution()), Ok(()));
    }

    #[test]
    fn rejects_unknown_variables() {
        let mut csp = Csp::new("empty");
        assert!(csp
            .add_constraint(Constraint::AllDifferent(vec![0]))
            .is_err());
    }
}
