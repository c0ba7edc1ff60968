//! Containers holding generated but not yet expanded nodes. The container's
//! pop order is what turns the generic search loops into breadth-first,
//! depth-first or best-first search.

mod fifo_queue;
mod priority_frontier;
mod stack;

pub use fifo_queue::FifoQueue;
pub use priority_frontier::{PriorityFrontier, Select};
pub use stack::Stack;

pub trait Frontier<T> {
    fn append(&mut self, item: T);

    fn extend<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        for item in items {
            self.append(item);
        }
    }

    /// Removes and returns the next element according to the container's
    /// ordering policy.
    fn pop(&mut self) -> Option<T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Membership by equality. For search nodes that means by state.
    fn contains(&self, item: &T) -> bool;
}
