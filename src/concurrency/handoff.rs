use super::lock;
use crate::error::{DrillError, Result};
use std::sync::{Condvar, Mutex, PoisonError};
use std::thread;
use tracing::debug;

/// Single-slot exchange between a producer and a consumer.
/// `produce` waits for the slot to empty, `consume` waits for it to fill.
pub struct Handoff<T> {
    slot: Mutex<Option<T>>,
    changed: Condvar,
}

impl<T> Default for Handoff<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Handoff<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            changed: Condvar::new(),
        }
    }

    pub fn produce(&self, value: T) {
        let mut slot = lock(&self.slot);
        while slot.is_some() {
            slot = self.changed.wait(slot).unwrap_or_else(PoisonError::into_inner);
        }
        *slot = Some(value);
        // Both sides wait on the same condvar, so wake everyone.
        self.changed.notify_all();
    }

    pub fn consume(&self) -> T {
        let mut slot = lock(&self.slot);
        loop {
            if let Some(value) = slot.take() {
                self.changed.notify_all();
                return value;
            }
            slot = self.changed.wait(slot).unwrap_or_else(PoisonError::into_inner);
        }
    }

    pub fn is_ready(&self) -> bool {
        lock(&self.slot).is_some()
    }
}

/// Passes every value through one `Handoff` from a producer thread to a
/// consumer thread and returns them in the order received.
pub fn exchange<T: Send>(values: Vec<T>) -> Result<Vec<T>> {
    let handoff = Handoff::new();
    let count = values.len();

    thread::scope(|s| {
        s.spawn(|| {
            for (i, value) in values.into_iter().enumerate() {
                debug!(index = i, "handing off");
                handoff.produce(value);
            }
        });

        let consumer = s.spawn(|| (0..count).map(|_| handoff.consume()).collect::<Vec<T>>());
        consumer.join().map_err(|_| DrillError::ChannelClosed)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_single_value() {
        assert_eq!(exchange(vec![42]).unwrap(), vec![42]);
    }

    #[test]
    fn test_order_preserved() {
        let values: Vec<u32> = (0..200).collect();
        assert_eq!(exchange(values.clone()).unwrap(), values);
        assert!(exchange(Vec::<u8>::new()).unwrap().is_empty());
    }

    #[test]
    fn test_producer_waits_for_consumer() {
        let handoff = Arc::new(Handoff::new());
        handoff.produce(1);
        assert!(handoff.is_ready());

        let second = {
            let handoff = Arc::clone(&handoff);
            thread::spawn(move || handoff.produce(2))
        };

        thread::sleep(Duration::from_millis(20));
        assert_eq!(handoff.consume(), 1);
        second.join().unwrap();
        assert_eq!(handoff.consume(), 2);
        assert!(!handoff.is_ready());
    }
}
