//! # Candidate
//!
//! `Password` is the individual the search evolves: an ordered, immutable
//! sequence of characters. Genetic operators never edit a `Password` in
//! place; they build a new one from the characters of their inputs.
//!
//! ## Example
//!
//! ```rust
//! use genpass::candidate::Password;
//!
//! let password = Password::from("s3cr3t!");
//!
//! assert_eq!(password.len(), 7);
//! assert_eq!(password.to_string(), "s3cr3t!");
//! ```

use std::fmt;

/// A candidate password.
///
/// Length is measured in `char`s, not bytes, so entries from a corpus that
/// contain non-ASCII symbols are bounded the same way generated ones are.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Password {
    chars: Vec<char>,
}

impl Password {
    pub fn new(chars: Vec<char>) -> Self {
        Self { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn into_chars(self) -> Vec<char> {
        self.chars
    }

    /// Returns a copy holding at most `max_length` characters.
    pub fn truncated(&self, max_length: usize) -> Self {
        let end = self.chars.len().min(max_length);
        Self::new(self.chars[..end].to_vec())
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            fmt::Write::write_char(f, *c)?;
        }
        Ok(())
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Self::new(value.chars().collect())
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Password> for String {
    fn from(value: Password) -> Self {
        value.as_string()
    }
}

impl FromIterator<char> for Password {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
