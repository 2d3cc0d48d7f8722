//! Searching, sorting and integer drills.

pub mod numbers;
pub mod search;
pub mod sort;

pub use search::{binary_search, linear_search, lower_bound, upper_bound};
pub use sort::{
    bubble_sort, insertion_sort, merge_sort, parallel_sort, quick_sort, selection_sort,
    SortAlgorithm,
};
