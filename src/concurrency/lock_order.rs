use super::{lock, try_lock};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;
use tracing::debug;

/// A mutex with a fixed rank. Acquiring several ranked locks lowest-first
/// rules out the circular wait behind the classic two-lock deadlock.
#[derive(Debug)]
pub struct OrderedLock<T> {
    rank: u64,
    inner: Mutex<T>,
}

impl<T> OrderedLock<T> {
    pub fn new(rank: u64, value: T) -> Self {
        Self {
            rank,
            inner: Mutex::new(value),
        }
    }

    pub fn rank(&self) -> u64 {
        self.rank
    }

    pub fn lock(&self) -> MutexGuard<'_, T> {
        lock(&self.inner)
    }

    fn key(&self) -> (u64, usize) {
        // Address breaks ties between equal ranks.
        (self.rank, self as *const Self as usize)
    }
}

/// Locks both, lowest rank first, and returns the guards in argument order.
/// `a` and `b` must be different locks.
pub fn lock_both<'a, A, B>(
    a: &'a OrderedLock<A>,
    b: &'a OrderedLock<B>,
) -> (MutexGuard<'a, A>, MutexGuard<'a, B>) {
    if a.key() <= b.key() {
        let ga = a.lock();
        let gb = b.lock();
        (ga, gb)
    } else {
        let gb = b.lock();
        let ga = a.lock();
        (ga, gb)
    }
}

/// Like `lock_both` but gives up instead of blocking when either is held.
pub fn try_lock_both<'a, A, B>(
    a: &'a OrderedLock<A>,
    b: &'a OrderedLock<B>,
) -> Option<(MutexGuard<'a, A>, MutexGuard<'a, B>)> {
    let ga = try_lock(&a.inner)?;
    let gb = try_lock(&b.inner)?;
    Some((ga, gb))
}

/// Two threads ask for the same pair of locks in opposite order while
/// holding the first for a while. With ranked acquisition both complete.
pub fn opposite_order_demo() -> Vec<String> {
    let a = OrderedLock::new(1, "A");
    let b = OrderedLock::new(2, "B");
    let hold = Duration::from_millis(20);

    let mut messages = thread::scope(|s| {
        let t1 = s.spawn(|| {
            let (first, second) = lock_both(&a, &b);
            thread::sleep(hold);
            debug!(thread = 1, "acquired both locks");
            format!("thread 1 acquired {} and {}", *first, *second)
        });
        let t2 = s.spawn(|| {
            let (first, second) = lock_both(&b, &a);
            thread::sleep(hold);
            debug!(thread = 2, "acquired both locks");
            format!("thread 2 acquired {} and {}", *first, *second)
        });
        [t1.join(), t2.join()]
            .into_iter()
            .map(|joined| joined.unwrap_or_else(|_| "thread panicked".to_string()))
            .collect::<Vec<_>>()
    });
    messages.sort();
    messages
}
