//! # FitnessEvaluator
//!
//! Scores a candidate password as the product of three factors:
//!
//! 1. the number of active character classes it uses,
//! 2. the Shannon entropy of its own symbol distribution,
//! 3. the external strength score.
//!
//! A candidate outside the configured length bounds scores `0` and the
//! external scorer is not consulted for it. Because the factors multiply, a
//! candidate that misses every class or that the scorer rates `0` scores `0`
//! no matter how diverse its symbols are.
//!
//! ## Example
//!
//! ```rust
//! use genpass::evolution::{fitness::FitnessEvaluator, EvolutionOptions};
//! use genpass::candidate::Password;
//! use genpass::scorer::NeutralScorer;
//!
//! let options = EvolutionOptions::builder().length_bounds(4, 8).build().unwrap();
//! let evaluator = FitnessEvaluator::new(&options, NeutralScorer);
//!
//! // four distinct symbols (2 bits) times four classes
//! assert_eq!(evaluator.evaluate(&Password::from("aB3!")).unwrap(), 8.0);
//! assert_eq!(evaluator.evaluate(&Password::from("aB3")).unwrap(), 0.0);
//! ```

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::{
    candidate::Password,
    charset::CharacterClasses,
    error::{GeneticError, Result},
    evolution::options::EvolutionOptions,
    scorer::StrengthScorer,
};

/// Shannon entropy, in bits, of the symbol distribution of `password`.
///
/// Terms are summed in character order, so equal candidates always produce
/// bit-identical results.
pub fn entropy(password: &Password) -> f64 {
    let total = password.len();
    if total == 0 {
        return 0.0;
    }

    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    for c in password.chars() {
        *counts.entry(*c).or_insert(0) += 1;
    }

    counts
        .values()
        .map(|&count| {
            let p = count as f64 / total as f64;
            -p * p.log2()
        })
        .sum()
}

/// Scores candidates against one run's constraints.
///
/// Holds no mutable state, so a single evaluator can score a population
/// from many threads at once.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator<S: StrengthScorer> {
    min_length: usize,
    max_length: usize,
    classes: CharacterClasses,
    parallel_threshold: usize,
    scorer: S,
}

impl<S: StrengthScorer> FitnessEvaluator<S> {
    pub fn new(options: &EvolutionOptions, scorer: S) -> Self {
        Self {
            min_length: options.get_min_length(),
            max_length: options.get_max_length(),
            classes: options.get_character_classes(),
            parallel_threshold: options.get_parallel_threshold(),
            scorer,
        }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Scores a single candidate.
    ///
    /// # Errors
    ///
    /// - `GeneticError::ScorerUnavailable` if the external scorer fails.
    /// - `GeneticError::FitnessCalculation` if it returns a negative or
    ///   non-finite value.
    pub fn evaluate(&self, candidate: &Password) -> Result<f64> {
        let len = candidate.len();
        if len < self.min_length || len > self.max_length {
            return Ok(0.0);
        }

        let coverage = self.classes.coverage(candidate.chars().iter().copied()) as f64;
        let entropy = entropy(candidate);

        let external = self.scorer.score(&candidate.as_string())?;
        if !external.is_finite() || external < 0.0 {
            return Err(GeneticError::FitnessCalculation(format!(
                "Strength scorer returned {} for a {}-character candidate",
                external, len
            )));
        }

        Ok(entropy * coverage * external)
    }

    /// Scores a whole population, in order.
    ///
    /// Populations at or above the parallel threshold are scored with Rayon.
    /// The first failure aborts the pass; no default score is substituted.
    pub fn evaluate_population(&self, population: &[Password]) -> Result<Vec<f64>> {
        if population.len() >= self.parallel_threshold {
            population
                .par_iter()
                .map(|candidate| self.evaluate(candidate))
                .collect()
        } else {
            population
                .iter()
                .map(|candidate| self.evaluate(candidate))
                .collect()
        }
    }

    /// Upper bound of the fitness any candidate can reach under these
    /// constraints, or `None` if the scorer is unbounded.
    pub fn max_possible_fitness(&self) -> Option<f64> {
        let distinct_symbols = self.max_length.min(self.classes.alphabet().len());
        let max_entropy = (distinct_symbols as f64).log2();
        self.scorer
            .max_score()
            .map(|max_score| max_entropy * self.classes.len() as f64 * max_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::CharacterClass;
    use crate::scorer::{NeutralScorer, ScorerError};

    fn options(min: usize, max: usize, classes: CharacterClasses) -> EvolutionOptions {
        EvolutionOptions::builder()
            .length_bounds(min, max)
            .character_classes(classes)
            .build()
            .unwrap()
    }

    #[test]
    fn test_entropy() {
        assert_eq!(entropy(&Password::default()), 0.0);
        assert_eq!(entropy(&Password::from("aaaa")), 0.0);
        assert_eq!(entropy(&Password::from("ab")), 1.0);
        assert_eq!(entropy(&Password::from("abcd")), 2.0);
        assert!((entropy(&Password::from("aab")) - 0.918_295_834).abs() < 1e-6);
    }

    #[test]
    fn test_entropy_is_bit_identical_across_calls() {
        let candidate = Password::from("k7#Qp!x9Lm2@vB4$wZ8&");
        let first = entropy(&candidate);
        for _ in 0..200 {
            assert_eq!(entropy(&candidate).to_bits(), first.to_bits());
        }

        // same multiset of symbols in a different order
        let reversed: Password = candidate.chars().iter().rev().copied().collect();
        assert_eq!(entropy(&reversed).to_bits(), first.to_bits());
    }

    #[test]
    fn test_out_of_bounds_scores_zero_without_scorer() {
        let failing = |_: &str| -> std::result::Result<f64, ScorerError> {
            Err(ScorerError::new("must not be called"))
        };
        let evaluator = FitnessEvaluator::new(&options(4, 6, CharacterClasses::all()), failing);

        assert_eq!(evaluator.evaluate(&Password::from("aB3")).unwrap(), 0.0);
        assert_eq!(evaluator.evaluate(&Password::from("aB3!xyz")).unwrap(), 0.0);
    }

    #[test]
    fn test_product_of_factors() {
        let doubling = |_: &str| -> std::result::Result<f64, ScorerError> { Ok(2.0) };
        let classes = CharacterClasses::from_iter([CharacterClass::Lowercase, CharacterClass::Digits]);
        let evaluator = FitnessEvaluator::new(&options(2, 10, classes), doubling);

        // entropy 2, coverage 2, external 2
        assert_eq!(evaluator.evaluate(&Password::from("ab12")).unwrap(), 8.0);
        // uppercase is not an active class
        assert_eq!(evaluator.evaluate(&Password::from("AB12")).unwrap(), 4.0);
        // no active class at all
        assert_eq!(evaluator.evaluate(&Password::from("AB!?")).unwrap(), 0.0);
    }

    #[test]
    fn test_scorer_failure_propagates() {
        let failing = |_: &str| -> std::result::Result<f64, ScorerError> {
            Err(ScorerError::new("rate limited"))
        };
        let evaluator = FitnessEvaluator::new(&options(1, 10, CharacterClasses::all()), failing);

        let result = evaluator.evaluate(&Password::from("abc"));
        assert!(matches!(result, Err(GeneticError::ScorerUnavailable(_))));

        let result = evaluator.evaluate_population(&[Password::from("a"), Password::from("b")]);
        assert!(matches!(result, Err(GeneticError::ScorerUnavailable(_))));
    }

    #[test]
    fn test_invalid_scorer_output() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let scorer = move |_: &str| -> std::result::Result<f64, ScorerError> { Ok(bad) };
            let evaluator = FitnessEvaluator::new(&options(1, 10, CharacterClasses::all()), scorer);
            assert!(matches!(
                evaluator.evaluate(&Password::from("abc")),
                Err(GeneticError::FitnessCalculation(_))
            ));
        }
    }

    #[test]
    fn test_zero_external_score_zeroes_fitness() {
        let zero = |_: &str| -> std::result::Result<f64, ScorerError> { Ok(0.0) };
        let evaluator = FitnessEvaluator::new(&options(1, 10, CharacterClasses::all()), zero);
        assert_eq!(evaluator.evaluate(&Password::from("aB3!xY")).unwrap(), 0.0);
    }

    #[test]
    fn test_population_parallel_matches_sequential() {
        let population: Vec<Password> = ["abc", "aB3!", "zzzzzzzz", "Q1", "p@ssW0rd"]
            .into_iter()
            .map(Password::from)
            .collect();

        let sequential = FitnessEvaluator::new(&options(2, 8, CharacterClasses::all()), NeutralScorer);
        let parallel = FitnessEvaluator::new(
            &EvolutionOptions::builder()
                .length_bounds(2, 8)
                .parallel_threshold(1)
                .build()
                .unwrap(),
            NeutralScorer,
        );

        let a = sequential.evaluate_population(&population).unwrap();
        let b = parallel.evaluate_population(&population).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), population.len());
    }

    #[test]
    fn test_max_possible_fitness() {
        let digits = CharacterClasses::from_iter([CharacterClass::Digits]);
        let evaluator = FitnessEvaluator::new(&options(8, 36, digits), NeutralScorer);
        // only ten distinct symbols are available
        assert!((evaluator.max_possible_fitness().unwrap() - 10f64.log2()).abs() < 1e-12);

        let evaluator = FitnessEvaluator::new(&options(8, 32, CharacterClasses::all()), NeutralScorer);
        assert_eq!(evaluator.max_possible_fitness().unwrap(), 5.0 * 4.0);

        let unbounded = |_: &str| -> std::result::Result<f64, ScorerError> { Ok(1.0) };
        let evaluator = FitnessEvaluator::new(&options(8, 32, CharacterClasses::all()), unbounded);
        assert_eq!(evaluator.max_possible_fitness(), None);
    }
}
