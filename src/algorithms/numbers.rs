use crate::error::{DrillError, Result};

pub const MINIMUM_VOTING_AGE: u32 = 18;

// =============================================================================
// Predicates
// =============================================================================

pub fn is_even(n: i64) -> bool {
    n % 2 == 0
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut i = 3u64;
    while i.saturating_mul(i) <= n {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

pub fn is_palindrome_number(n: u64) -> bool {
    let mut rest = n;
    let mut reversed: u128 = 0;
    while rest != 0 {
        reversed = reversed * 10 + u128::from(rest % 10);
        rest /= 10;
    }
    reversed == u128::from(n)
}

/// Sum of each digit raised to the digit count equals the number (153, 9474).
pub fn is_armstrong(n: u64) -> bool {
    let digits = digit_count(n);
    let mut rest = n;
    let mut sum: u128 = 0;
    while rest != 0 {
        sum += u128::from(rest % 10).pow(digits);
        rest /= 10;
    }
    sum == u128::from(n)
}

/// Equal to the sum of its proper divisors (6, 28, 496).
pub fn is_perfect_number(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut sum: u128 = 1;
    let mut i = 2u64;
    while i.saturating_mul(i) <= n {
        if n % i == 0 {
            sum += u128::from(i);
            let pair = n / i;
            if pair != i {
                sum += u128::from(pair);
            }
        }
        i += 1;
    }
    sum == u128::from(n)
}

pub fn is_perfect_square(n: u64) -> bool {
    let root = isqrt(u128::from(n));
    root * root == u128::from(n)
}

/// `n` is Fibonacci iff `5n² + 4` or `5n² - 4` is a perfect square.
pub fn is_fibonacci(n: u64) -> bool {
    let five_sq = u128::from(n)
        .checked_mul(u128::from(n))
        .and_then(|sq| sq.checked_mul(5));

    match five_sq {
        Some(v) => {
            let square = |x: u128| {
                let r = isqrt(x);
                r * r == x
            };
            v.checked_add(4).is_some_and(square) || (v >= 4 && square(v - 4))
        }
        // Beyond u128 range: walk the sequence instead.
        None => fibonacci(usize::MAX).into_iter().any(|f| f == n),
    }
}

fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut x = n;
    let mut y = x / 2 + x % 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

fn digit_count(n: u64) -> u32 {
    if n == 0 {
        1
    } else {
        n.ilog10() + 1
    }
}

// =============================================================================
// Sequences
// =============================================================================

/// First `n` Fibonacci terms, truncated where the next term overflows `u64`.
pub fn fibonacci(n: usize) -> Vec<u64> {
    let mut terms = Vec::new();
    let (mut a, mut b) = (0u64, 1u64);
    while terms.len() < n {
        terms.push(a);
        match a.checked_add(b) {
            Some(next) => {
                a = b;
                b = next;
            }
            None => {
                if terms.len() < n {
                    terms.push(b);
                }
                break;
            }
        }
    }
    terms
}

/// Sieve of Eratosthenes over `2..=limit`.
pub fn primes_up_to(limit: usize) -> Vec<usize> {
    if limit < 2 {
        return Vec::new();
    }
    let mut composite = vec![false; limit + 1];
    let mut i = 2;
    while i * i <= limit {
        if !composite[i] {
            let mut multiple = i * i;
            while multiple <= limit {
                composite[multiple] = true;
                multiple += i;
            }
        }
        i += 1;
    }
    (2..=limit).filter(|&n| !composite[n]).collect()
}

// =============================================================================
// Arithmetic
// =============================================================================

pub fn factorial(n: u64) -> Option<u64> {
    (1..=n).try_fold(1u64, |acc, x| acc.checked_mul(x))
}

pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

pub fn lcm(a: u64, b: u64) -> Option<u64> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

/// Square-and-multiply exponentiation, `None` on overflow.
pub fn power(base: i64, exp: u32) -> Option<i64> {
    let mut result: i64 = 1;
    let mut b = base;
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            result = result.checked_mul(b)?;
        }
        e >>= 1;
        if e > 0 {
            b = b.checked_mul(b)?;
        }
    }
    Some(result)
}

pub fn sum_of_digits(mut n: u64) -> u64 {
    let mut sum = 0;
    while n != 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// 1 + 2 + ... + n. `None` when the sum does not fit in `u64`.
pub fn sum_of_naturals(n: u64) -> Option<u64> {
    let n = u128::from(n);
    u64::try_from(n * (n + 1) / 2).ok()
}

/// Reverses the decimal digits, keeping the sign. `None` on overflow.
pub fn reverse_integer(mut n: i64) -> Option<i64> {
    let mut reversed: i64 = 0;
    while n != 0 {
        // `%` keeps the dividend's sign, so negatives reverse as negatives.
        reversed = reversed.checked_mul(10)?.checked_add(n % 10)?;
        n /= 10;
    }
    Some(reversed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
    Zero,
}

pub fn sign(n: i64) -> Sign {
    match n {
        0 => Sign::Zero,
        n if n > 0 => Sign::Positive,
        _ => Sign::Negative,
    }
}

/// Integer division that reports a zero divisor instead of panicking.
pub fn divide(a: i64, b: i64) -> Result<i64> {
    if b == 0 {
        return Err(DrillError::DivisionByZero);
    }
    Ok(a.saturating_div(b))
}

pub fn check_voting_age(age: u32) -> Result<()> {
    if age < MINIMUM_VOTING_AGE {
        return Err(DrillError::Underage {
            age,
            minimum: MINIMUM_VOTING_AGE,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_and_leap() {
        assert!(is_even(10));
        assert!(!is_even(-3));
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_primes() {
        assert!(is_prime(29));
        assert!(is_prime(2));
        assert!(!is_prime(1));
        assert!(!is_prime(91));
        assert_eq!(primes_up_to(20), vec![2, 3, 5, 7, 11, 13, 17, 19]);
        assert_eq!(primes_up_to(100).len(), 25);
        assert!(primes_up_to(1).is_empty());
    }

    #[test]
    fn test_palindrome_and_armstrong() {
        assert!(is_palindrome_number(121));
        assert!(is_palindrome_number(0));
        assert!(!is_palindrome_number(123));
        assert!(!is_palindrome_number(u64::MAX));
        assert!(is_armstrong(153));
        assert!(is_armstrong(9474));
        assert!(is_armstrong(7));
        assert!(!is_armstrong(154));
    }

    #[test]
    fn test_perfect_numbers_and_squares() {
        assert!(is_perfect_number(6));
        assert!(is_perfect_number(28));
        assert!(!is_perfect_number(12));
        assert!(!is_perfect_number(1));
        assert!(is_perfect_square(49));
        assert!(is_perfect_square(0));
        assert!(!is_perfect_square(50));
        assert!(is_perfect_square(u64::from(u32::MAX) * u64::from(u32::MAX)));
    }

    #[test]
    fn test_fibonacci() {
        assert_eq!(fibonacci(10), vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34]);
        assert!(fibonacci(0).is_empty());
        assert!(fibonacci(500).len() < 500);
        assert!(is_fibonacci(21));
        assert!(is_fibonacci(0));
        assert!(is_fibonacci(1));
        assert!(!is_fibonacci(22));
        assert!(is_fibonacci(12_200_160_415_121_876_738));
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(factorial(5), Some(120));
        assert_eq!(factorial(0), Some(1));
        assert_eq!(factorial(21), None);
        assert_eq!(gcd(54, 24), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(lcm(4, 6), Some(12));
        assert_eq!(lcm(0, 6), Some(0));
        assert_eq!(lcm(u64::MAX, u64::MAX - 1), None);
        assert_eq!(power(2, 10), Some(1024));
        assert_eq!(power(-3, 3), Some(-27));
        assert_eq!(power(5, 0), Some(1));
        assert_eq!(power(10, 19), None);
        assert_eq!(sum_of_digits(12345), 15);
    }

    #[test]
    fn test_sum_of_naturals() {
        assert_eq!(sum_of_naturals(10), Some(55));
        assert_eq!(sum_of_naturals(0), Some(0));
        assert_eq!(sum_of_naturals(6_074_000_999), Some(18_446_744_070_963_499_500));
        assert_eq!(sum_of_naturals(6_074_001_000), None);
        assert_eq!(sum_of_naturals(u64::MAX), None);
    }

    #[test]
    fn test_reverse_integer() {
        assert_eq!(reverse_integer(12345), Some(54321));
        assert_eq!(reverse_integer(-120), Some(-21));
        assert_eq!(reverse_integer(0), Some(0));
        assert_eq!(reverse_integer(i64::MAX), None);
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(5), Sign::Positive);
        assert_eq!(sign(-5), Sign::Negative);
        assert_eq!(sign(0), Sign::Zero);
    }

    #[test]
    fn test_errors_instead_of_exceptions() {
        assert_eq!(divide(10, 3).unwrap(), 3);
        assert!(matches!(divide(1, 0), Err(DrillError::DivisionByZero)));
        assert_eq!(divide(i64::MIN, -1).unwrap(), i64::MAX);

        let err = check_voting_age(16).unwrap_err();
        assert_eq!(err.to_string(), "age 16 is under the minimum of 18");
        assert!(check_voting_age(18).is_ok());
    }
}
