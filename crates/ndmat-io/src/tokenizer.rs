//! Delimiter-based line tokenizer

use std::str::FromStr;

/// Splits text on any of a set of single-character delimiters
///
/// Runs of delimiters never produce empty tokens.
///
/// # Examples
///
/// ```
/// use ndmat_io::Tokenizer;
///
/// let tokenizer = Tokenizer::new(" \t,");
/// assert_eq!(tokenizer.split("1, 2\t\tx ,3"), vec!["1", "2", "x", "3"]);
/// assert_eq!(tokenizer.parse::<i32>("1, 2\t\tx ,3"), vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenizer {
    delimiters: Vec<char>,
}

impl Tokenizer {
    /// Tokenizer splitting on every character of `delimiters`
    pub fn new(delimiters: &str) -> Self {
        Self {
            delimiters: delimiters.chars().collect(),
        }
    }

    /// The delimiter characters
    pub fn delimiters(&self) -> &[char] {
        &self.delimiters
    }

    /// Non-empty tokens of `line`, in order
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        line.split(|c| self.delimiters.contains(&c))
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// Tokens of `line` that parse as `T`; the rest are discarded
    pub fn parse<T: FromStr>(&self, line: &str) -> Vec<T> {
        self.split(line)
            .into_iter()
            .filter_map(|token| token.parse().ok())
            .collect()
    }
}
