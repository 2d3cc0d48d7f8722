//! Drills
//!
//! Classic introductory exercises rebuilt as a typed, tested library.
//!
//! ## Areas Covered
//!
//! 1. **Algorithms** - searching, sorting, integer drills
//! 2. **Text** - reversal, palindromes, balanced brackets, word counts
//! 3. **Arrays** - frequency, dedup, medians, matrices
//! 4. **Collections** - LRU cache, bounded stack, circular queue
//! 5. **Concurrency** - blocking queue, hand-off slot, worker pool, lock ordering
//! 6. **Registries** - library, bank accounts, employee and student rosters
//! 7. **Modeling** - shapes and behaviour through traits
//! 8. **File I/O** - line reading, buffered copy, word counting
//!
//! ## Running Drills
//!
//! ```bash
//! cargo run --bin drills -- list
//! cargo run --bin drills -- run lru-cache producer-consumer
//! cargo run --bin drills -- all --log-level debug
//! ```

pub mod algorithms;
pub mod arrays;
pub mod catalog;
pub mod collections;
pub mod concurrency;
pub mod config;
pub mod error;
pub mod fileio;
pub mod logging;
pub mod patterns;
pub mod registry;
pub mod shapes;
pub mod text;

pub use config::DrillsConfig;
pub use error::{DrillError, Result};
