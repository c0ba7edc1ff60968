use crate::search::{Frontier, HeuristicValue};
use priority_queue::PriorityQueue;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

/// Which end of the score order [`PriorityFrontier::pop`] takes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Select {
    Min,
    Max,
}

/// Position of an entry in the pop order: its score, then its insertion
/// sequence number. The queue pops the greatest rank.
#[derive(Debug, Clone, Copy)]
struct Rank {
    score: HeuristicValue,
    sequence: u64,
    select: Select,
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.select {
            Select::Min => (other.score, other.sequence).cmp(&(self.score, self.sequence)),
            Select::Max => (self.score, self.sequence).cmp(&(other.score, other.sequence)),
        }
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Rank {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Rank {}

/// A frontier ordered by a scoring function `f`, keyed by element equality.
///
/// Each element is scored once, when appended. Ties on the score keep
/// insertion order: [`Select::Min`] pops the lowest scored, earliest
/// inserted element, [`Select::Max`] the highest scored, latest inserted.
///
/// At most one element per equality class is stored. Appending an element
/// equal to a stored one keeps whichever of the two would be popped first.
pub struct PriorityFrontier<T: Hash + Eq, F> {
    queue: PriorityQueue<T, Rank>,
    select: Select,
    sequence: u64,
    f: F,
}

impl<T, F> PriorityFrontier<T, F>
where
    T: Hash + Eq,
    F: Fn(&T) -> HeuristicValue,
{
    pub fn new(select: Select, f: F) -> Self {
        Self {
            queue: PriorityQueue::new(),
            select,
            sequence: 0,
            f,
        }
    }

    /// The stored element equal to `item`, if any.
    pub fn get(&self, item: &T) -> Option<&T> {
        self.queue.get(item).map(|(stored, _)| stored)
    }

    /// The score the stored element equal to `item` was inserted with.
    pub fn score_of(&self, item: &T) -> Option<HeuristicValue> {
        self.queue.get_priority(item).map(|rank| rank.score)
    }

    /// Deletes the stored element equal to `item` and returns it.
    pub fn remove(&mut self, item: &T) -> Option<T> {
        self.queue.remove(item).map(|(removed, _)| removed)
    }

    fn next_rank(&mut self, score: HeuristicValue) -> Rank {
        self.sequence += 1;
        Rank {
            score,
            sequence: self.sequence,
            select: self.select,
        }
    }
}

impl<T, F> Frontier<T> for PriorityFrontier<T, F>
where
    T: Hash + Eq,
    F: Fn(&T) -> HeuristicValue,
{
    fn append(&mut self, item: T) {
        let score = (self.f)(&item);
        let rank = self.next_rank(score);
        match self.queue.get_priority(&item).copied() {
            Some(incumbent) if incumbent >= rank => {}
            Some(_) => {
                self.queue.remove(&item);
                self.queue.push(item, rank);
            }
            None => {
                self.queue.push(item, rank);
            }
        }
    }

    fn pop(&mut self) -> Option<T> {
        self.queue.pop().map(|(item, _)| item)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn contains(&self, item: &T) -> bool {
        self.queue.get_priority(item).is_some()
    }
}

impl<T: Hash + Eq + Debug, F> Debug for PriorityFrontier<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityFrontier")
            .field("select", &self.select)
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::Hasher;

    /// An item whose equality ignores the score, like a search node.
    #[derive(Debug, Clone, Copy)]
    struct Item {
        key: char,
        score: f64,
    }

    impl PartialEq for Item {
        fn eq(&self, other: &Self) -> bool {
            self.key == other.key
        }
    }

    impl Eq for Item {}

    impl Hash for Item {
        fn hash<H: Hasher>(&self, state: &mut H) {
            self.key.hash(state);
        }
    }

    fn item(key: char, score: f64) -> Item {
        Item { key, score }
    }

    fn by_score(item: &Item) -> HeuristicValue {
        HeuristicValue::from(item.score)
    }

    fn drain<F>(frontier: &mut PriorityFrontier<Item, F>) -> Vec<char>
    where
        F: Fn(&Item) -> HeuristicValue,
    {
        std::iter::from_fn(|| frontier.pop())
            .map(|item| item.key)
            .collect()
    }

    #[test]
    fn min_pops_lowest_score() {
        let mut frontier = PriorityFrontier::new(Select::Min, by_score);
        frontier.extend([item('a', 3.), item('b', 1.), item('c', 2.)]);
        assert_eq!(drain(&mut frontier), vec!['b', 'c', 'a']);
    }

    #[test]
    fn max_pops_highest_score() {
        let mut frontier = PriorityFrontier::new(Select::Max, by_score);
        frontier.extend([item('a', 3.), item('b', 1.), item('c', 2.)]);
        assert_eq!(frontier.pop().map(|item| item.key), Some('a'));
        assert_eq!(frontier.pop().map(|item| item.key), Some('c'));
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut frontier = PriorityFrontier::new(Select::Min, by_score);
        frontier.extend([item('a', 1.), item('b', 0.), item('c', 1.), item('d', 1.)]);
        assert_eq!(drain(&mut frontier), vec!['b', 'a', 'c', 'd']);
    }

    #[test]
    fn ties_under_max_pop_latest_first() {
        let mut frontier = PriorityFrontier::new(Select::Max, by_score);
        frontier.extend([item('a', 1.), item('b', 1.)]);
        assert_eq!(frontier.pop().map(|item| item.key), Some('b'));
    }

    #[test]
    fn lookup_and_removal_by_equality() {
        let mut frontier = PriorityFrontier::new(Select::Min, by_score);
        frontier.extend([item('a', 5.), item('b', 2.)]);

        let key = item('a', 0.);
        assert!(frontier.contains(&key));
        assert_eq!(frontier.get(&key).map(|item| item.score), Some(5.));
        assert_eq!(frontier.score_of(&key), Some(HeuristicValue::from(5.)));

        assert_eq!(frontier.remove(&key).map(|item| item.score), Some(5.));
        assert!(!frontier.contains(&key));
        assert_eq!(frontier.len(), 1);
        assert!(frontier.remove(&key).is_none());
    }

    #[test]
    fn replacing_a_worse_entry_keeps_only_the_better() {
        let mut frontier = PriorityFrontier::new(Select::Min, by_score);
        frontier.extend([item('x', 9.), item('y', 4.)]);

        let better = item('x', 1.);
        if let Some(incumbent) = frontier.score_of(&better) {
            if by_score(&better) < incumbent {
                frontier.remove(&better);
                frontier.append(better);
            }
        }

        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.pop().map(|item| item.score), Some(1.));
        assert_eq!(frontier.pop().map(|item| item.key), Some('y'));
        assert!(frontier.is_empty());
    }

    #[test]
    fn appending_an_equal_element_keeps_the_better_one() {
        let mut frontier = PriorityFrontier::new(Select::Min, by_score);
        frontier.extend([item('x', 3.), item('x', 7.), item('y', 5.)]);
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.get(&item('x', 0.)).map(|item| item.score), Some(3.));

        frontier.append(item('x', 6.));
        frontier.append(item('y', 2.));
        assert_eq!(frontier.score_of(&item('y', 0.)), Some(HeuristicValue::from(2.)));
        assert_eq!(drain(&mut frontier), vec!['y', 'x']);
    }

    #[test]
    fn equal_score_keeps_the_incumbent_under_min() {
        let mut frontier = PriorityFrontier::new(Select::Min, by_score);
        frontier.extend([item('a', 1.), item('b', 1.), item('a', 1.)]);
        assert_eq!(drain(&mut frontier), vec!['a', 'b']);
    }

    #[test]
    fn large_frontier_pops_in_order() {
        let mut frontier = PriorityFrontier::new(Select::Min, |key: &u32| {
            HeuristicValue::from(f64::from((key * 7919) % 1000))
        });
        frontier.extend(0..1000);
        let scores: Vec<u32> = std::iter::from_fn(|| frontier.pop())
            .map(|key| (key * 7919) % 1000)
            .collect();
        assert_eq!(scores, (0..1000).collect::<Vec<_>>());
    }
}
