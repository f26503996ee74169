//! # Error Types
//!
//! This module defines the error type shared by every part of the search:
//! configuration validation, population initialization, fitness evaluation
//! and the evolution loop itself.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use genpass::error::{GeneticError, Result};
//!
//! fn check_window(window: usize) -> Result<usize> {
//!     if window == 0 {
//!         return Err(GeneticError::Configuration(
//!             "Convergence window must be at least 1".to_string(),
//!         ));
//!     }
//!     Ok(window)
//! }
//!
//! assert!(check_window(0).is_err());
//! ```
//!
//! Using the `ResultExt` trait to add context to errors:
//!
//! ```rust
//! use genpass::error::{Result, ResultExt};
//! use std::fs::File;
//!
//! fn open_corpus(path: &str) -> Result<()> {
//!     File::open(path).context("Failed to open password corpus")?;
//!     Ok(())
//! }
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use genpass::error::{GeneticError, OptionExt};
//!
//! fn best_score(scores: &[f64]) -> genpass::error::Result<f64> {
//!     scores
//!         .iter()
//!         .cloned()
//!         .reduce(f64::max)
//!         .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

use crate::scorer::ScorerError;

/// Represents errors that can occur while searching for a password.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// An invalid configuration was provided. Detected before any generation runs.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An operator was handed an empty population.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// A tournament asked for more contestants than the population holds.
    #[error(
        "Invalid tournament size: {tournament_size} contestants requested from a population of {population_size}"
    )]
    InvalidTournamentSize {
        tournament_size: usize,
        population_size: usize,
    },

    /// Seeded initialization asked the corpus for more entries than it has.
    #[error("Insufficient corpus: {requested} entries requested but only {available} available")]
    InsufficientCorpus { requested: usize, available: usize },

    /// The external strength scorer failed for a candidate.
    #[error("Strength scorer unavailable: {0}")]
    ScorerUnavailable(#[from] ScorerError),

    /// A fitness factor was negative, NaN or infinite.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Building the next population failed.
    #[error("Breeding error: {0}")]
    Breeding(String),

    /// The evolution loop could not make progress.
    #[error("Evolution error: {0}")]
    Evolution(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for search operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Result to add context to errors.
///
/// ## Examples
///
/// ```rust
/// use genpass::error::ResultExt;
/// use std::fs::File;
///
/// fn read_file(path: &str) -> genpass::error::Result<()> {
///     File::open(path).context("Failed to open file")?;
///     Ok(())
/// }
/// ```
pub trait ResultExt<T, E> {
    /// Converts the error to a `GeneticError::Other` prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| GeneticError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using `err_fn`
    /// to build the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
