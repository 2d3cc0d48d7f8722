use super::lock;
use crate::error::{DrillError, Result};
use crossbeam::channel::bounded;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, PoisonError};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

// =============================================================================
// Bounded blocking queue
// =============================================================================

struct State<T> {
    items: VecDeque<T>,
    closed: bool,
    peak: usize,
}

/// Bounded FIFO shared between threads. `put` blocks while full and `take`
/// blocks while empty. After `close`, remaining items still drain.
pub struct BlockingQueue<T> {
    state: Mutex<State<T>>,
    not_full: Condvar,
    not_empty: Condvar,
    capacity: usize,
}

impl<T> BlockingQueue<T> {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(DrillError::InvalidCapacity { capacity });
        }
        Ok(Self {
            state: Mutex::new(State {
                items: VecDeque::with_capacity(capacity),
                closed: false,
                peak: 0,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            capacity,
        })
    }

    pub fn put(&self, item: T) -> Result<()> {
        let mut state = lock(&self.state);
        // Loop guards against spurious wakeups.
        while state.items.len() >= self.capacity && !state.closed {
            state = self
                .not_full
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        if state.closed {
            return Err(DrillError::ChannelClosed);
        }
        state.items.push_back(item);
        state.peak = state.peak.max(state.items.len());
        self.not_empty.notify_one();
        Ok(())
    }

    pub fn take(&self) -> Result<T> {
        let mut state = lock(&self.state);
        while state.items.is_empty() && !state.closed {
            state = self
                .not_empty
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        let item = state.items.pop_front().ok_or(DrillError::ChannelClosed)?;
        self.not_full.notify_one();
        Ok(item)
    }

    /// Non-blocking put: `QueueOverflow` when full.
    pub fn try_put(&self, item: T) -> Result<()> {
        let mut state = lock(&self.state);
        if state.closed {
            return Err(DrillError::ChannelClosed);
        }
        if state.items.len() >= self.capacity {
            return Err(DrillError::QueueOverflow {
                capacity: self.capacity,
            });
        }
        state.items.push_back(item);
        state.peak = state.peak.max(state.items.len());
        self.not_empty.notify_one();
        Ok(())
    }

    pub fn try_take(&self) -> Option<T> {
        let mut state = lock(&self.state);
        let item = state.items.pop_front()?;
        self.not_full.notify_one();
        Some(item)
    }

    /// Waits up to `timeout`; `Ok(None)` when nothing arrived in time.
    pub fn take_timeout(&self, timeout: Duration) -> Result<Option<T>> {
        let state = lock(&self.state);
        let (mut state, _) = self
            .not_empty
            .wait_timeout_while(state, timeout, |s| s.items.is_empty() && !s.closed)
            .unwrap_or_else(PoisonError::into_inner);

        match state.items.pop_front() {
            Some(item) => {
                self.not_full.notify_one();
                Ok(Some(item))
            }
            None if state.closed => Err(DrillError::ChannelClosed),
            None => Ok(None),
        }
    }

    /// Rejects further puts and wakes every waiter.
    pub fn close(&self) {
        lock(&self.state).closed = true;
        self.not_full.notify_all();
        self.not_empty.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        lock(&self.state).closed
    }

    pub fn len(&self) -> usize {
        lock(&self.state).items.len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.state).items.is_empty()
    }

    /// Largest length the queue has reached.
    pub fn peak_len(&self) -> usize {
        lock(&self.state).peak
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

// =============================================================================
// Producer / consumer runs
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerConsumerReport {
    pub consumed: Vec<u32>,
    pub peak_len: usize,
    pub capacity: usize,
}

/// One producer puts `1..=items`, one consumer takes until the queue closes.
pub fn produce_consume(capacity: usize, items: u32) -> Result<ProducerConsumerReport> {
    let queue = BlockingQueue::new(capacity)?;

    let consumed = thread::scope(|s| -> Result<Vec<u32>> {
        let producer = s.spawn(|| -> Result<()> {
            let outcome = (1..=items).try_for_each(|item| {
                queue.put(item)?;
                debug!(item, queue_len = queue.len(), "produced");
                Ok(())
            });
            // Close on every path so the consumer never waits forever.
            queue.close();
            outcome
        });

        let consumer = s.spawn(|| {
            let mut seen = Vec::new();
            while let Ok(item) = queue.take() {
                debug!(item, "consumed");
                seen.push(item);
            }
            seen
        });

        producer.join().map_err(|_| DrillError::ChannelClosed)??;
        consumer.join().map_err(|_| DrillError::ChannelClosed)
    })?;

    info!(
        items = consumed.len(),
        peak = queue.peak_len(),
        capacity,
        "producer/consumer finished"
    );
    Ok(ProducerConsumerReport {
        consumed,
        peak_len: queue.peak_len(),
        capacity,
    })
}

/// One producer feeding `consumers` threads over a bounded crossbeam channel.
/// Returns every consumed value, sorted.
pub fn pipeline(capacity: usize, items: u32, consumers: usize) -> Result<Vec<u32>> {
    if capacity == 0 || consumers == 0 {
        return Err(DrillError::InvalidCapacity {
            capacity: capacity.min(consumers),
        });
    }
    let (tx, rx) = bounded::<u32>(capacity);

    let mut all = thread::scope(|s| -> Result<Vec<u32>> {
        s.spawn(move || {
            for item in 1..=items {
                // Blocks while the channel is full.
                if tx.send(item).is_err() {
                    break;
                }
            }
        });

        let handles: Vec<_> = (0..consumers)
            .map(|worker| {
                let rx = rx.clone();
                s.spawn(move || {
                    let got: Vec<u32> = rx.iter().collect();
                    debug!(worker, received = got.len(), "consumer drained");
                    got
                })
            })
            .collect();
        drop(rx);

        let mut all = Vec::new();
        for handle in handles {
            all.extend(handle.join().map_err(|_| DrillError::ChannelClosed)?);
        }
        Ok(all)
    })?;

    all.sort_unstable();
    Ok(all)
}
