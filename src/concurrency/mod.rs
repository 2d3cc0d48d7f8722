//! Thread coordination drills: bounded producer/consumer, single-slot
//! hand-off, a fixed worker pool and deadlock-free lock ordering.

pub mod blocking_queue;
pub mod handoff;
pub mod lock_order;
pub mod pool;

pub use blocking_queue::{pipeline, produce_consume, BlockingQueue, ProducerConsumerReport};
pub use handoff::{exchange, Handoff};
pub use lock_order::{lock_both, opposite_order_demo, try_lock_both, OrderedLock};
pub use pool::{run_tasks, JobHandle, WorkerPool};

use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

/// Lock, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Non-blocking `lock`. `None` only when another thread holds the mutex.
pub(crate) fn try_lock<T>(mutex: &Mutex<T>) -> Option<MutexGuard<'_, T>> {
    match mutex.try_lock() {
        Ok(guard) => Some(guard),
        Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
        Err(TryLockError::WouldBlock) => None,
    }
}
