// Text patterns, one `String` per row.

use crate::error::{DrillError, Result};

pub fn square(n: usize) -> Vec<String> {
    (0..n).map(|_| "* ".repeat(n).trim_end().to_string()).collect()
}

/// "*", "**", "***", ...
pub fn star_triangle(n: usize) -> Vec<String> {
    (1..=n).map(|i| "*".repeat(i)).collect()
}

/// "****", "***", "**", "*" for `n = 4`.
pub fn inverted_star_triangle(n: usize) -> Vec<String> {
    (1..=n).rev().map(|i| "*".repeat(i)).collect()
}

/// "1", "12", "123", ...
pub fn number_triangle(n: usize) -> Vec<String> {
    (1..=n)
        .map(|i| (1..=i).map(|j| j.to_string()).collect())
        .collect()
}

/// "A", "AB", "ABC", ... wrapping after 'Z'.
pub fn alphabet_triangle(n: usize) -> Vec<String> {
    (1..=n)
        .map(|i| (0..i).map(|j| char::from(b'A' + (j % 26) as u8)).collect())
        .collect()
}

/// Centred pyramid of `n` rows.
pub fn pyramid(n: usize) -> Vec<String> {
    (1..=n)
        .map(|i| format!("{}{}", " ".repeat(n - i), "*".repeat(2 * i - 1)))
        .collect()
}

/// Pyramid of `n` rows followed by its mirror.
pub fn diamond(n: usize) -> Vec<String> {
    let top = pyramid(n);
    let bottom: Vec<String> = top.iter().rev().skip(1).cloned().collect();
    top.into_iter().chain(bottom).collect()
}

pub fn multiplication_table(n: i64, upto: i64) -> Result<Vec<String>> {
    (1..=upto)
        .map(|i| {
            let product = n
                .checked_mul(i)
                .ok_or(DrillError::Overflow("multiplication table"))?;
            Ok(format!("{n} x {i} = {product}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangles() {
        assert_eq!(star_triangle(3), vec!["*", "**", "***"]);
        assert_eq!(number_triangle(4), vec!["1", "12", "123", "1234"]);
        assert_eq!(alphabet_triangle(3), vec!["A", "AB", "ABC"]);
        assert!(star_triangle(0).is_empty());
        assert_eq!(inverted_star_triangle(4), vec!["****", "***", "**", "*"]);
        assert!(inverted_star_triangle(0).is_empty());
    }

    #[test]
    fn test_square() {
        assert_eq!(square(2), vec!["* *", "* *"]);
    }

    #[test]
    fn test_pyramid_and_diamond() {
        assert_eq!(pyramid(3), vec!["  *", " ***", "*****"]);
        assert_eq!(diamond(2), vec![" *", "***", " *"]);
        assert!(diamond(0).is_empty());
    }

    #[test]
    fn test_multiplication_table() {
        let table = multiplication_table(5, 3).unwrap();
        assert_eq!(table, vec!["5 x 1 = 5", "5 x 2 = 10", "5 x 3 = 15"]);
        assert!(multiplication_table(5, 0).unwrap().is_empty());
    }

    #[test]
    fn test_multiplication_table_overflow() {
        assert!(matches!(
            multiplication_table(i64::MAX, 2),
            Err(DrillError::Overflow(_))
        ));
        assert_eq!(multiplication_table(i64::MAX, 1).unwrap().len(), 1);
    }
}
