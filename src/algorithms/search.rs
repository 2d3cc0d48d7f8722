use std::cmp::Ordering;

// =============================================================================
// Binary search over sorted input
// =============================================================================

/// Index of some element equal to `key`, or `None` when absent.
pub fn binary_search<T: Ord>(sorted: &[T], key: &T) -> Option<usize> {
    let mut left = 0;
    let mut right = sorted.len();

    while left < right {
        let mid = left + (right - left) / 2;
        match sorted[mid].cmp(key) {
            Ordering::Equal => return Some(mid),
            Ordering::Less => left = mid + 1,
            Ordering::Greater => right = mid,
        }
    }
    None
}

/// First index whose element is not less than `key`.
pub fn lower_bound<T: Ord>(sorted: &[T], key: &T) -> usize {
    let mut left = 0;
    let mut right = sorted.len();

    while left < right {
        let mid = left + (right - left) / 2;
        if sorted[mid] < *key {
            left = mid + 1;
        } else {
            right = mid;
        }
    }
    left
}

/// First index whose element is greater than `key`.
pub fn upper_bound<T: Ord>(sorted: &[T], key: &T) -> usize {
    let mut left = 0;
    let mut right = sorted.len();

    while left < right {
        let mid = left + (right - left) / 2;
        if sorted[mid] <= *key {
            left = mid + 1;
        } else {
            right = mid;
        }
    }
    left
}

// =============================================================================
// Linear search
// =============================================================================

pub fn linear_search<T: PartialEq>(items: &[T], key: &T) -> Option<usize> {
    items.iter().position(|item| item == key)
}
