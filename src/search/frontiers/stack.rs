use crate::search::Frontier;

/// Last in, first out. Gives depth-first behaviour.
#[derive(Debug, Clone)]
pub struct Stack<T> {
    data: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> Frontier<T> for Stack<T> {
    fn append(&mut self, item: T) {
        self.data.push(item);
    }

    fn extend<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.data.extend(items);
    }

    fn pop(&mut self) -> Option<T> {
        self.data.pop()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn contains(&self, item: &T) -> bool {
        self.data.contains(item)
    }
}
