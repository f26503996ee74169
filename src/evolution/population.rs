//! # Population Initialization
//!
//! Builds the first generation, either from random strings over the active
//! alphabet or from a sample of a known-password corpus.

use std::fmt;
use std::sync::Arc;

use crate::{
    candidate::Password,
    corpus::PasswordCorpus,
    error::{GeneticError, Result},
    evolution::options::EvolutionOptions,
    rng::RandomNumberGenerator,
};

/// How the first generation is produced.
#[derive(Clone, Default)]
pub enum InitStrategy {
    /// Uniform length in `[min_length, max_length]`, uniform characters.
    #[default]
    Random,
    /// `population_size` distinct entries drawn from a corpus.
    Seeded(Arc<dyn PasswordCorpus>),
}

impl InitStrategy {
    pub fn seeded<C: PasswordCorpus + 'static>(corpus: C) -> Self {
        InitStrategy::Seeded(Arc::new(corpus))
    }

    /// Produces exactly `population_size` candidates.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::InsufficientCorpus` if a seeded corpus holds
    /// fewer entries than the population needs. No partial population is
    /// returned. Invalid options yield `GeneticError::Configuration`.
    pub fn initialize(
        &self,
        options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Password>> {
        options.validate()?;
        let size = options.get_population_size();
        let population = match self {
            InitStrategy::Random => random_population(options, rng)?,
            InitStrategy::Seeded(corpus) => {
                if corpus.count() < size {
                    return Err(GeneticError::InsufficientCorpus {
                        requested: size,
                        available: corpus.count(),
                    });
                }
                corpus
                    .sample_without_replacement(size, rng)?
                    .into_iter()
                    .map(Password::from)
                    .collect::<Vec<_>>()
            }
        };

        if population.len() != size {
            return Err(GeneticError::Evolution(format!(
                "Initialization produced {} candidates, expected {}",
                population.len(),
                size
            )));
        }
        Ok(population)
    }
}

impl fmt::Debug for InitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitStrategy::Random => f.write_str("Random"),
            InitStrategy::Seeded(corpus) => f
                .debug_struct("Seeded")
                .field("entries", &corpus.count())
                .finish(),
        }
    }
}

fn random_population(
    options: &EvolutionOptions,
    rng: &mut RandomNumberGenerator,
) -> Result<Vec<Password>> {
    let alphabet = options.get_character_classes().alphabet();
    if alphabet.is_empty() {
        return Err(GeneticError::Configuration(
            "Cannot draw candidates from an empty alphabet".to_string(),
        ));
    }

    Ok((0..options.get_population_size())
        .map(|_| {
            let length =
                rng.gen_range_inclusive(options.get_min_length(), options.get_max_length());
            (0..length)
                .map(|_| alphabet[rng.gen_range_inclusive(0, alphabet.len() - 1)])
                .collect::<Password>()
        })
        .collect())
}
