use crate::error::{DrillError, Result};
use indexmap::IndexMap;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\S+").expect("word pattern is valid");
}

pub fn words(s: &str) -> impl Iterator<Item = &str> {
    WORD.find_iter(s).map(|m| m.as_str())
}

// =============================================================================
// Reversal
// =============================================================================

/// Reverses by swapping from both ends over the char buffer.
pub fn reverse_chars(s: &str) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    if chars.len() > 1 {
        let (mut start, mut end) = (0, chars.len() - 1);
        while start < end {
            chars.swap(start, end);
            start += 1;
            end -= 1;
        }
    }
    chars.into_iter().collect()
}

/// "Rust is fun" -> "fun is Rust". Whitespace runs collapse to one space.
pub fn reverse_words(s: &str) -> String {
    let parts: Vec<&str> = words(s).collect();
    parts.into_iter().rev().join(" ")
}

// =============================================================================
// Checks
// =============================================================================

pub fn is_palindrome(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    let n = chars.len();
    (0..n / 2).all(|i| chars[i] == chars[n - 1 - i])
}

/// Brackets `()[]{}` close in the right order. Other characters are ignored.
pub fn is_balanced(s: &str) -> bool {
    let mut stack = Vec::new();
    for ch in s.chars() {
        match ch {
            '(' | '[' | '{' => stack.push(ch),
            ')' | ']' | '}' => {
                let opener = match ch {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if stack.pop() != Some(opener) {
                    return false;
                }
            }
            _ => {}
        }
    }
    stack.is_empty()
}

/// Same letters in any order, ignoring case and whitespace.
pub fn is_anagram(a: &str, b: &str) -> bool {
    fn normalized(s: &str) -> Vec<char> {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .sorted()
            .collect()
    }
    normalized(a) == normalized(b)
}

/// Plain substring scan over bytes. An empty needle always matches.
pub fn contains_substring(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|window| window == needle.as_bytes())
}

// =============================================================================
// Counting
// =============================================================================

/// Case-insensitive word counts, in order of first appearance.
pub fn word_frequency(s: &str) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for word in words(s) {
        *counts.entry(word.to_lowercase()).or_insert(0) += 1;
    }
    counts
}

/// Non-whitespace character counts, in order of first appearance.
pub fn char_frequency(s: &str) -> IndexMap<char, usize> {
    let mut counts = IndexMap::new();
    for ch in s.chars().filter(|c| !c.is_whitespace()) {
        *counts.entry(ch).or_insert(0) += 1;
    }
    counts
}

pub fn duplicate_chars(s: &str) -> Vec<char> {
    char_frequency(s)
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(ch, _)| ch)
        .collect()
}

pub fn first_non_repeated_char(s: &str) -> Option<char> {
    char_frequency(s)
        .into_iter()
        .find(|(_, count)| *count == 1)
        .map(|(ch, _)| ch)
}

/// (vowels, consonants) over ASCII letters.
pub fn count_vowels_consonants(s: &str) -> (usize, usize) {
    s.chars()
        .filter(char::is_ascii_alphabetic)
        .fold((0, 0), |(v, c), ch| {
            if matches!(ch.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u') {
                (v + 1, c)
            } else {
                (v, c + 1)
            }
        })
}

pub fn count_occurrences(s: &str, target: char) -> usize {
    s.chars().filter(|&c| c == target).count()
}

pub fn longest_word(s: &str) -> Option<&str> {
    let mut best: Option<&str> = None;
    for word in words(s) {
        // strict `>` keeps the first of equally long words
        if best.map_or(true, |b| word.chars().count() > b.chars().count()) {
            best = Some(word);
        }
    }
    best
}

pub fn shortest_word(s: &str) -> Option<&str> {
    words(s).min_by_key(|w| w.chars().count())
}

// =============================================================================
// Rewriting
// =============================================================================

pub fn remove_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn replace_char(s: &str, from: char, to: char) -> String {
    s.chars().map(|c| if c == from { to } else { c }).collect()
}

/// Decimal integer with an optional leading sign. No surrounding whitespace.
pub fn parse_int(s: &str) -> Result<i64> {
    let (negative, digits) = match s.as_bytes().first() {
        None => return Err(DrillError::parse_int(s, "empty input")),
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        Some(_) => (false, s),
    };
    if digits.is_empty() {
        return Err(DrillError::parse_int(s, "no digits"));
    }

    let mut value: i64 = 0;
    for ch in digits.chars() {
        let digit = ch
            .to_digit(10)
            .ok_or_else(|| DrillError::parse_int(s, format!("unexpected character '{ch}'")))?;
        // Accumulate toward the sign so i64::MIN parses.
        value = value
            .checked_mul(10)
            .and_then(|v| {
                if negative {
                    v.checked_sub(i64::from(digit))
                } else {
                    v.checked_add(i64::from(digit))
                }
            })
            .ok_or_else(|| DrillError::parse_int(s, "out of range"))?;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse() {
        assert_eq!(reverse_chars("HelloWorld"), "dlroWolleH");
        assert_eq!(reverse_chars(""), "");
        assert_eq!(reverse_chars("héllo"), "olléh");
        assert_eq!(reverse_words("Rust is fun"), "fun is Rust");
        assert_eq!(reverse_words("  spaced   out  "), "out spaced");
    }

    #[test]
    fn test_palindrome() {
        assert!(is_palindrome("madam"));
        assert!(is_palindrome(""));
        assert!(!is_palindrome("Madam"));
    }

    #[test]
    fn test_balanced() {
        assert!(is_balanced("{[()]}"));
        assert!(is_balanced("fn(a[0]) { }"));
        assert!(!is_balanced("{[(])}"));
        assert!(!is_balanced("(("));
        assert!(!is_balanced(")("));
        assert!(is_balanced(""));
    }

    #[test]
    fn test_anagram() {
        assert!(is_anagram("Listen", "Silent"));
        assert!(is_anagram("dormitory", "dirty room"));
        assert!(!is_anagram("abc", "abd"));
    }

    #[test]
    fn test_contains_substring() {
        assert!(contains_substring("Hello World", "World"));
        assert!(!contains_substring("Hello World", "world"));
        assert!(contains_substring("abc", ""));
        assert!(!contains_substring("ab", "abc"));
    }

    #[test]
    fn test_word_frequency() {
        let counts = word_frequency("This is a test string and this is a test");
        assert_eq!(counts["this"], 2);
        assert_eq!(counts["is"], 2);
        assert_eq!(counts["string"], 1);
        let order: Vec<&str> = counts.keys().map(String::as_str).take(3).collect();
        assert_eq!(order, vec!["this", "is", "a"]);
    }

    #[test]
    fn test_char_counts() {
        assert_eq!(duplicate_chars("programming"), vec!['r', 'g', 'm']);
        assert_eq!(first_non_repeated_char("swiss"), Some('w'));
        assert_eq!(first_non_repeated_char("aabb"), None);
        assert_eq!(count_vowels_consonants("Hello World!"), (3, 7));
        assert_eq!(count_occurrences("banana", 'a'), 3);
    }

    #[test]
    fn test_longest_word() {
        assert_eq!(longest_word("I love programming in Rust"), Some("programming"));
        assert_eq!(longest_word("ab cd"), Some("ab"));
        assert_eq!(longest_word("   "), None);
        assert_eq!(shortest_word("This is a programming challenge."), Some("a"));
        assert_eq!(shortest_word("ab cd"), Some("ab"));
        assert_eq!(shortest_word(""), None);
    }

    #[test]
    fn test_rewriting() {
        assert_eq!(remove_whitespace("   Hello World!   "), "HelloWorld!");
        assert_eq!(replace_char("hello", 'l', 'x'), "hexxo");
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("12345").unwrap(), 12345);
        assert_eq!(parse_int("-42").unwrap(), -42);
        assert_eq!(parse_int("+7").unwrap(), 7);
        assert_eq!(parse_int("-9223372036854775808").unwrap(), i64::MIN);
        assert!(matches!(parse_int(""), Err(DrillError::ParseInt { .. })));
        assert!(parse_int("-").is_err());
        assert!(parse_int("12a").is_err());
        assert!(parse_int(" 1").is_err());
        assert!(parse_int("9223372036854775808").is_err());
    }
}
