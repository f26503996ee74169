//! # Strength Scorer
//!
//! The fitness of a candidate includes an external password-strength score.
//! The search treats that scorer as a black box behind the `StrengthScorer`
//! trait: a deterministic, side-effect-free function from a password to a
//! finite non-negative number.
//!
//! Closures with the right signature are scorers too:
//!
//! ```rust
//! use genpass::scorer::{ScorerError, StrengthScorer};
//!
//! let by_length = |password: &str| -> Result<f64, ScorerError> {
//!     Ok(password.chars().count() as f64)
//! };
//!
//! assert_eq!(by_length.score("abcd").unwrap(), 4.0);
//! ```

use thiserror::Error;

/// Failure reported by a strength scorer.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct ScorerError(String);

impl ScorerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// An external password-strength estimator.
pub trait StrengthScorer: Send + Sync {
    /// Scores `password`. Must be deterministic for a given input.
    fn score(&self, password: &str) -> Result<f64, ScorerError>;

    /// Upper bound of [`score`](Self::score), if the scorer has one.
    ///
    /// Only used to derive the theoretical maximum fitness.
    fn max_score(&self) -> Option<f64> {
        None
    }
}

impl<F> StrengthScorer for F
where
    F: Fn(&str) -> Result<f64, ScorerError> + Send + Sync,
{
    fn score(&self, password: &str) -> Result<f64, ScorerError> {
        self(password)
    }
}

/// A scorer that rates every password `1.0`.
///
/// With it, fitness reduces to entropy × class coverage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NeutralScorer;

impl StrengthScorer for NeutralScorer {
    fn score(&self, _password: &str) -> Result<f64, ScorerError> {
        Ok(1.0)
    }

    fn max_score(&self) -> Option<f64> {
        Some(1.0)
    }
}
