use rayon::slice::ParallelSliceMut;

// =============================================================================
// Quadratic sorts
// =============================================================================

/// Bubble sort, stopping early once a pass makes no swap.
pub fn bubble_sort<T: Ord>(items: &mut [T]) {
    let n = items.len();
    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - 1 - pass {
            if items[j] > items[j + 1] {
                items.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

pub fn selection_sort<T: Ord>(items: &mut [T]) {
    let n = items.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            if items[j] < items[min] {
                min = j;
            }
        }
        if min != i {
            items.swap(i, min);
        }
    }
}

pub fn insertion_sort<T: Ord>(items: &mut [T]) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && items[j - 1] > items[j] {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

// =============================================================================
// Divide and conquer
// =============================================================================

/// Quicksort with Hoare partitioning around the middle element.
pub fn quick_sort<T: Ord + Clone>(items: &mut [T]) {
    if items.len() > 1 {
        quick_sort_range(items, 0, items.len() - 1);
    }
}

fn quick_sort_range<T: Ord + Clone>(items: &mut [T], left: usize, right: usize) {
    let pivot = items[left + (right - left) / 2].clone();
    // Signed cursors: `j` may step to one below `left` (i.e. -1 when left == 0).
    let mut i = left as isize;
    let mut j = right as isize;

    while i <= j {
        while items[i as usize] < pivot {
            i += 1;
        }
        while items[j as usize] > pivot {
            j -= 1;
        }
        if i <= j {
            items.swap(i as usize, j as usize);
            i += 1;
            j -= 1;
        }
    }

    if (left as isize) < j {
        quick_sort_range(items, left, j as usize);
    }
    if i < right as isize {
        quick_sort_range(items, i as usize, right);
    }
}

/// Stable top-down merge sort.
pub fn merge_sort<T: Ord + Clone>(items: &mut [T]) {
    let len = items.len();
    if len <= 1 {
        return;
    }

    let mid = len / 2;
    merge_sort(&mut items[..mid]);
    merge_sort(&mut items[mid..]);

    let mut merged = Vec::with_capacity(len);
    {
        let (left, right) = items.split_at(mid);
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            // `<=` keeps equal elements in their original order.
            if left[i] <= right[j] {
                merged.push(left[i].clone());
                i += 1;
            } else {
                merged.push(right[j].clone());
                j += 1;
            }
        }
        merged.extend_from_slice(&left[i..]);
        merged.extend_from_slice(&right[j..]);
    }
    items.clone_from_slice(&merged);
}

pub fn parallel_sort<T: Ord + Send>(items: &mut [T]) {
    items.par_sort();
}

// =============================================================================
// Algorithm selector
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
    Quick,
    Merge,
    Parallel,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 6] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
        SortAlgorithm::Quick,
        SortAlgorithm::Merge,
        SortAlgorithm::Parallel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Selection => "selection",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Quick => "quick",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Parallel => "parallel",
        }
    }

    pub fn sort<T: Ord + Clone + Send>(self, items: &mut [T]) {
        match self {
            SortAlgorithm::Bubble => bubble_sort(items),
            SortAlgorithm::Selection => selection_sort(items),
            SortAlgorithm::Insertion => insertion_sort(items),
            SortAlgorithm::Quick => quick_sort(items),
            SortAlgorithm::Merge => merge_sort(items),
            SortAlgorithm::Parallel => parallel_sort(items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sample_inputs() {
        for algo in SortAlgorithm::ALL {
            let mut a = vec![5, 1, 4, 2, 8];
            algo.sort(&mut a);
            assert_eq!(a, vec![1, 2, 4, 5, 8], "{}", algo.name());

            let mut b = vec![5, 2, 9, 1, 5, 6];
            algo.sort(&mut b);
            assert_eq!(b, vec![1, 2, 5, 5, 6, 9], "{}", algo.name());
        }
    }

    #[test]
    fn test_trivial_inputs() {
        for algo in SortAlgorithm::ALL {
            let mut empty: Vec<i32> = vec![];
            algo.sort(&mut empty);
            assert!(empty.is_empty());

            let mut single = vec![42];
            algo.sort(&mut single);
            assert_eq!(single, vec![42]);
        }
    }

    #[test]
    fn test_reverse_and_sorted_input() {
        for algo in SortAlgorithm::ALL {
            let mut desc: Vec<i32> = (0..50).rev().collect();
            algo.sort(&mut desc);
            assert_eq!(desc, (0..50).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_merge_sort_is_stable() {
        #[derive(Debug, Clone, PartialEq, Eq)]
        struct Tagged(u8, char);
        impl PartialOrd for Tagged {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }
        impl Ord for Tagged {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.0.cmp(&other.0)
            }
        }

        let mut items = vec![Tagged(2, 'a'), Tagged(1, 'b'), Tagged(2, 'c'), Tagged(1, 'd')];
        merge_sort(&mut items);
        let tags: Vec<char> = items.iter().map(|t| t.1).collect();
        assert_eq!(tags, vec!['b', 'd', 'a', 'c']);
    }

    #[test]
    fn test_sorts_strings() {
        let mut words = vec!["pear", "apple", "fig"];
        quick_sort(&mut words);
        assert_eq!(words, vec!["apple", "fig", "pear"]);
    }

    proptest! {
        #[test]
        fn prop_every_algorithm_matches_std(values in prop::collection::vec(any::<i16>(), 0..100)) {
            let mut expected = values.clone();
            expected.sort();
            for algo in SortAlgorithm::ALL {
                let mut actual = values.clone();
                algo.sort(&mut actual);
                prop_assert_eq!(&actual, &expected);
            }
        }
    }
}
