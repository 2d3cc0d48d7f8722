pub mod lru;
pub mod queue;
pub mod stack;

pub use lru::{CacheStats, LruCache};
pub use queue::ArrayQueue;
pub use stack::BoundedStack;
