use crate::error::{DrillError, Result};

/// Fixed-capacity LIFO stack.
#[derive(Debug, Clone)]
pub struct BoundedStack<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(DrillError::InvalidCapacity { capacity });
        }
        Ok(Self {
            items: Vec::with_capacity(capacity),
            capacity,
        })
    }

    pub fn push(&mut self, item: T) -> Result<()> {
        if self.items.len() == self.capacity {
            return Err(DrillError::StackOverflow {
                capacity: self.capacity,
            });
        }
        self.items.push(item);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<T> {
        self.items.pop().ok_or(DrillError::StackUnderflow)
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
