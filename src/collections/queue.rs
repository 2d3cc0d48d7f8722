use crate::error::{DrillError, Result};

/// Fixed-capacity FIFO queue over a circular buffer.
/// Slots freed by `dequeue` are reused by later `enqueue` calls.
#[derive(Debug, Clone)]
pub struct ArrayQueue<T> {
    slots: Vec<Option<T>>,
    head: usize,
    len: usize,
}

impl<T> ArrayQueue<T> {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(DrillError::InvalidCapacity { capacity });
        }
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Ok(Self {
            slots,
            head: 0,
            len: 0,
        })
    }

    pub fn enqueue(&mut self, item: T) -> Result<()> {
        if self.is_full() {
            return Err(DrillError::QueueOverflow {
                capacity: self.capacity(),
            });
        }
        let tail = (self.head + self.len) % self.capacity();
        self.slots[tail] = Some(item);
        self.len += 1;
        Ok(())
    }

    pub fn dequeue(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(DrillError::QueueUnderflow);
        }
        let item = self.slots[self.head].take().ok_or(DrillError::QueueUnderflow)?;
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;
        Ok(item)
    }

    pub fn peek(&self) -> Option<&T> {
        if self.len == 0 {
            None
        } else {
            self.slots[self.head].as_ref()
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
