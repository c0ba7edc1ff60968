use crate::search::Frontier;
use std::collections::VecDeque;

/// First in, first out. Gives breadth-first behaviour.
#[derive(Debug, Clone)]
pub struct FifoQueue<T> {
    data: VecDeque<T>,
}

impl<T> FifoQueue<T> {
    pub fn new() -> Self {
        Self {
            data: VecDeque::new(),
        }
    }
}

impl<T> Default for FifoQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> Frontier<T> for FifoQueue<T> {
    fn append(&mut self, item: T) {
        self.data.push_back(item);
    }

    fn extend<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.data.extend(items);
    }

    fn pop(&mut self) -> Option<T> {
        self.data.pop_front()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn contains(&self, item: &T) -> bool {
        self.data.contains(item)
    }
}
