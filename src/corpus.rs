//! # Password Corpus
//!
//! Seeded initialization starts the search from known passwords instead of
//! random strings. The corpus is an external collaborator; the search only
//! needs to count it and draw distinct entries from it.
//!
//! ## Example
//!
//! ```rust
//! use genpass::corpus::{InMemoryCorpus, PasswordCorpus};
//! use genpass::rng::RandomNumberGenerator;
//!
//! let corpus = InMemoryCorpus::new(["123456", "password", "qwerty"]);
//! let mut rng = RandomNumberGenerator::from_seed(1);
//!
//! let sample = corpus.sample_without_replacement(2, &mut rng).unwrap();
//! assert_eq!(sample.len(), 2);
//! assert!(corpus.sample_without_replacement(4, &mut rng).is_err());
//! ```

use std::collections::HashSet;
use std::fmt::Debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{GeneticError, Result, ResultExt};
use crate::rng::RandomNumberGenerator;

/// A readable table of known passwords.
pub trait PasswordCorpus: Debug + Send + Sync {
    /// Number of distinct entries.
    fn count(&self) -> usize;

    /// Draws `k` distinct entries.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::InsufficientCorpus` if `count() < k`.
    fn sample_without_replacement(
        &self,
        k: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<String>>;
}

/// A corpus held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryCorpus {
    entries: Vec<String>,
}

impl InMemoryCorpus {
    /// Builds a corpus, keeping the first occurrence of duplicate entries.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .map(Into::into)
            .filter(|entry| seen.insert(entry.clone()))
            .collect();
        Self { entries }
    }

    /// Reads one password per line. Blank lines are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut entries = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let entry = line.trim_end_matches('\r');
            if !entry.is_empty() {
                entries.push(entry.to_string());
            }
        }
        Ok(Self::new(entries))
    }

    /// Reads a newline-separated password list from `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).context(format!("Failed to open corpus {}", path.display()))?;
        let corpus = Self::from_reader(BufReader::new(file))?;
        tracing::debug!(path = %path.display(), entries = corpus.count(), "loaded password corpus");
        Ok(corpus)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl PasswordCorpus for InMemoryCorpus {
    fn count(&self) -> usize {
        self.entries.len()
    }

    fn sample_without_replacement(
        &self,
        k: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<String>> {
        if self.entries.len() < k {
            return Err(GeneticError::InsufficientCorpus {
                requested: k,
                available: self.entries.len(),
            });
        }

        Ok(rng
            .sample_indices(self.entries.len(), k)
            .into_iter()
            .map(|idx| self.entries[idx].clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_duplicates_are_dropped() {
        let corpus = InMemoryCorpus::new(["a", "b", "a", "c", "b"]);
        assert_eq!(corpus.entries(), &["a", "b", "c"]);
        assert_eq!(corpus.count(), 3);
    }

    #[test]
    fn test_sample_is_distinct() {
        let corpus = InMemoryCorpus::new((0..20).map(|i| format!("pw{}", i)));
        let mut rng = RandomNumberGenerator::from_seed(5);

        let mut sample = corpus.sample_without_replacement(20, &mut rng).unwrap();
        sample.sort();
        sample.dedup();
        assert_eq!(sample.len(), 20);
    }

    #[test]
    fn test_insufficient_corpus() {
        let corpus = InMemoryCorpus::new(["one", "two"]);
        let mut rng = RandomNumberGenerator::from_seed(5);

        match corpus.sample_without_replacement(3, &mut rng) {
            Err(GeneticError::InsufficientCorpus {
                requested,
                available,
            }) => {
                assert_eq!(requested, 3);
                assert_eq!(available, 2);
            }
            other => panic!("Expected InsufficientCorpus, got {:?}", other),
        }
    }

    #[test]
    fn test_from_reader_skips_blank_lines() {
        let input = Cursor::new("123456\r\n\npassword\nletmein\n");
        let corpus = InMemoryCorpus::from_reader(input).unwrap();

        assert_eq!(corpus.entries(), &["123456", "password", "letmein"]);
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = InMemoryCorpus::from_path("/definitely/not/here.txt");
        match result {
            Err(GeneticError::Other(msg)) => assert!(msg.contains("Failed to open corpus")),
            other => panic!("Expected Other error, got {:?}", other),
        }
    }
}
