use crate::error::{DrillError, Result};
use crate::text;
use dashmap::DashMap;
use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::hash::Hash;

// =============================================================================
// Counting and deduplication
// =============================================================================

/// Occurrence counts in order of first appearance.
pub fn frequency<T: Hash + Eq + Clone>(items: &[T]) -> IndexMap<T, usize> {
    let mut counts = IndexMap::new();
    for item in items {
        *counts.entry(item.clone()).or_insert(0) += 1;
    }
    counts
}

pub fn dedup_preserving_order<T: Hash + Eq + Clone>(items: &[T]) -> Vec<T> {
    items.iter().cloned().collect::<IndexSet<T>>().into_iter().collect()
}

/// Values seen more than once, each reported once.
pub fn duplicates<T: Hash + Eq + Clone>(items: &[T]) -> Vec<T> {
    frequency(items)
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(item, _)| item)
        .collect()
}

/// Values of `second` also present in `first`, in `second`'s order, no repeats.
pub fn common_elements<T: Hash + Eq + Clone>(first: &[T], second: &[T]) -> Vec<T> {
    let lookup: FxHashSet<&T> = first.iter().collect();
    let mut seen = FxHashSet::default();
    second
        .iter()
        .filter(|item| lookup.contains(item) && seen.insert(*item))
        .cloned()
        .collect()
}

// =============================================================================
// Order statistics
// =============================================================================

/// Largest value strictly below the maximum.
pub fn second_highest<T: Ord + Copy>(items: &[T]) -> Option<T> {
    let mut highest: Option<T> = None;
    let mut second: Option<T> = None;
    for &value in items {
        match highest {
            None => highest = Some(value),
            Some(h) if value > h => {
                second = highest;
                highest = Some(value);
            }
            Some(h) if value < h && second.map_or(true, |s| value > s) => {
                second = Some(value);
            }
            _ => {}
        }
    }
    second
}

pub fn min_max<T: Ord + Copy>(items: &[T]) -> Option<(T, T)> {
    let first = *items.first()?;
    Some(items.iter().fold((first, first), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    }))
}

pub fn median(items: &[i64]) -> Option<f64> {
    if items.is_empty() {
        return None;
    }
    let mut sorted = items.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0)
    } else {
        Some(sorted[mid] as f64)
    }
}

/// The one value absent from `1..=n`, where `items` holds the other `n - 1`.
pub fn missing_number(items: &[u64]) -> Option<u64> {
    let n = items.len() as u64 + 1;
    let expected = u128::from(n) * u128::from(n + 1) / 2;
    let actual: u128 = items.iter().map(|&v| u128::from(v)).sum();
    expected
        .checked_sub(actual)
        .filter(|missing| (1..=u128::from(n)).contains(missing))
        .and_then(|missing| u64::try_from(missing).ok())
}

pub fn sum(items: &[i64]) -> Result<i64> {
    items
        .iter()
        .try_fold(0i64, |acc, &v| acc.checked_add(v))
        .ok_or(DrillError::Overflow("sum"))
}

pub fn merge_arrays<T: Clone>(first: &[T], second: &[T]) -> Vec<T> {
    let mut merged = Vec::with_capacity(first.len() + second.len());
    merged.extend_from_slice(first);
    merged.extend_from_slice(second);
    merged
}

pub fn reverse_in_place<T>(items: &mut [T]) {
    if items.len() < 2 {
        return;
    }
    let (mut i, mut j) = (0, items.len() - 1);
    while i < j {
        items.swap(i, j);
        i += 1;
        j -= 1;
    }
}

// =============================================================================
// Iterator pipelines
// =============================================================================

pub fn sum_squares_of_evens(items: &[i64]) -> Result<i64> {
    items
        .iter()
        .filter(|x| *x % 2 == 0)
        .try_fold(0i64, |acc, &x| x.checked_mul(x).and_then(|sq| acc.checked_add(sq)))
        .ok_or(DrillError::Overflow("sum of squares"))
}

pub fn doubled(items: &[i64]) -> Result<Vec<i64>> {
    items
        .iter()
        .map(|x| x.checked_mul(2).ok_or(DrillError::Overflow("doubling")))
        .collect()
}

/// Case-insensitive word counts across lines, counted in parallel.
/// Sorted by count descending, then word.
pub fn parallel_word_frequency(lines: &[String]) -> Vec<(String, usize)> {
    let counts: DashMap<String, usize> = DashMap::new();
    lines.par_iter().for_each(|line| {
        for word in text::words(line) {
            *counts.entry(word.to_lowercase()).or_insert(0) += 1;
        }
    });

    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

// =============================================================================
// Matrix
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<i64>,
}

impl Matrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != cols) {
            return Err(DrillError::DimensionMismatch {
                left: (1, cols),
                right: (1, bad.len()),
            });
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data: rows.concat(),
        })
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<i64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.data.chunks(self.cols).map(<[i64]>::to_vec).collect()
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "matrix addition", i64::checked_add)
    }

    pub fn sub(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "matrix subtraction", i64::checked_sub)
    }

    pub fn mul(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(self.mismatch(other));
        }
        let mut out = Matrix::new(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i * self.cols + k];
                for j in 0..other.cols {
                    let idx = i * other.cols + j;
                    let acc = out.data[idx];
                    out.data[idx] = a
                        .checked_mul(other.data[k * other.cols + j])
                        .and_then(|p| acc.checked_add(p))
                        .ok_or(DrillError::Overflow("matrix multiplication"))?;
                }
            }
        }
        Ok(out)
    }

    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::new(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        out
    }

    fn zip_with(
        &self,
        other: &Matrix,
        operation: &'static str,
        op: impl Fn(i64, i64) -> Option<i64>,
    ) -> Result<Matrix> {
        if self.dims() != other.dims() {
            return Err(self.mismatch(other));
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| op(a, b).ok_or(DrillError::Overflow(operation)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    fn mismatch(&self, other: &Matrix) -> DrillError {
        DrillError::DimensionMismatch {
            left: self.dims(),
            right: other.dims(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_keeps_first_seen_order() {
        let counts = frequency(&[1, 2, 2, 3, 3, 3]);
        let pairs: Vec<(i32, usize)> = counts.into_iter().collect();
        assert_eq!(pairs, vec![(1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_dedup_and_duplicates() {
        assert_eq!(dedup_preserving_order(&[1, 2, 2, 3, 3, 4]), vec![1, 2, 3, 4]);
        assert_eq!(duplicates(&[4, 1, 4, 2, 1, 4]), vec![4, 1]);
        assert!(duplicates::<i32>(&[]).is_empty());
    }

    #[test]
    fn test_common_elements() {
        assert_eq!(common_elements(&[1, 2, 3, 4, 5], &[3, 4, 5, 6, 7]), vec![3, 4, 5]);
        assert_eq!(common_elements(&[1, 2], &[2, 2, 1]), vec![2, 1]);
    }

    #[test]
    fn test_second_highest() {
        assert_eq!(second_highest(&[10, 5, 20, 20, 15, 5, 30]), Some(20));
        assert_eq!(second_highest(&[7, 7, 7]), None);
        assert_eq!(second_highest(&[3, 9]), Some(3));
        assert_eq!(second_highest(&[9, 3]), Some(3));
        assert_eq!(second_highest::<i32>(&[]), None);
    }

    #[test]
    fn test_min_max_and_median() {
        assert_eq!(min_max(&[3, -1, 8, 0]), Some((-1, 8)));
        assert_eq!(min_max::<i32>(&[]), None);
        assert_eq!(median(&[12, 3, 5, 7, 19]), Some(7.0));
        assert_eq!(median(&[4, 1, 3, 2]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_missing_number() {
        assert_eq!(missing_number(&[1, 2, 4, 5, 6]), Some(3));
        assert_eq!(missing_number(&[2, 3]), Some(1));
        assert_eq!(missing_number(&[]), Some(1));
        assert_eq!(missing_number(&[1, 2, 3]), Some(4));
        assert_eq!(missing_number(&[9, 9]), None);
    }

    #[test]
    fn test_simple_ops() {
        assert_eq!(sum(&[1, 2, 3, 4]).unwrap(), 10);
        assert_eq!(sum(&[]).unwrap(), 0);
        assert_eq!(merge_arrays(&[1, 2], &[3]), vec![1, 2, 3]);
        let mut v = vec![1, 2, 3, 4, 5];
        reverse_in_place(&mut v);
        assert_eq!(v, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_pipelines() {
        let nums = [1, 2, 3, 4, 5];
        assert_eq!(sum_squares_of_evens(&nums).unwrap(), 20);
        assert_eq!(doubled(&nums).unwrap(), vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_overflow_is_reported() {
        assert!(matches!(sum(&[i64::MAX, 1]), Err(DrillError::Overflow(_))));
        assert_eq!(sum(&[i64::MAX, -1, 1]).unwrap(), i64::MAX);
        assert!(matches!(doubled(&[1, i64::MAX]), Err(DrillError::Overflow(_))));
        assert!(matches!(
            sum_squares_of_evens(&[4_000_000_000]),
            Err(DrillError::Overflow(_))
        ));
        assert!(sum_squares_of_evens(&[i64::MAX]).is_ok());
    }

    #[test]
    fn test_matrix_overflow() {
        let max = Matrix::from_rows(&[vec![i64::MAX]]).unwrap();
        let one = Matrix::from_rows(&[vec![1]]).unwrap();
        let min = Matrix::from_rows(&[vec![i64::MIN]]).unwrap();
        assert!(matches!(max.add(&one), Err(DrillError::Overflow(_))));
        assert!(matches!(min.sub(&one), Err(DrillError::Overflow(_))));
        assert!(matches!(max.mul(&max), Err(DrillError::Overflow(_))));

        let row = Matrix::from_rows(&[vec![i64::MAX, 1]]).unwrap();
        let col = Matrix::from_rows(&[vec![1], vec![1]]).unwrap();
        assert!(matches!(row.mul(&col), Err(DrillError::Overflow(_))));
    }

    #[test]
    fn test_parallel_word_frequency() {
        let lines: Vec<String> = vec!["the cat".into(), "The dog".into(), "a cat".into()];
        let counts = parallel_word_frequency(&lines);
        assert_eq!(counts[0], ("cat".to_string(), 2));
        assert_eq!(counts[1], ("the".to_string(), 2));
        assert_eq!(counts.len(), 4);
    }

    #[test]
    fn test_matrix_ops() {
        let a = Matrix::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
        let b = Matrix::from_rows(&[vec![5, 6], vec![7, 8]]).unwrap();
        assert_eq!(a.add(&b).unwrap().to_rows(), vec![vec![6, 8], vec![10, 12]]);
        assert_eq!(b.sub(&a).unwrap().to_rows(), vec![vec![4, 4], vec![4, 4]]);
        assert_eq!(a.mul(&b).unwrap().to_rows(), vec![vec![19, 22], vec![43, 50]]);
        assert_eq!(a.transpose().to_rows(), vec![vec![1, 3], vec![2, 4]]);
        assert_eq!(a.get(1, 0), Some(3));
        assert_eq!(a.get(2, 0), None);
    }

    #[test]
    fn test_matrix_dimension_errors() {
        let a = Matrix::from_rows(&[vec![1, 2, 3]]).unwrap();
        let b = Matrix::from_rows(&[vec![1, 2]]).unwrap();
        assert!(matches!(a.add(&b), Err(DrillError::DimensionMismatch { .. })));
        assert!(a.mul(&b).is_err());
        assert_eq!(a.mul(&a.transpose()).unwrap().to_rows(), vec![vec![14]]);
        assert!(Matrix::from_rows(&[vec![1], vec![1, 2]]).is_err());
    }
}
