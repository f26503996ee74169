//! # BreedStrategy
//!
//! The `BreedStrategy` trait defines the interface for strategies responsible for
//! building the next population from the current, scored one.
pub mod crossover;
pub mod mutation;
pub mod ordinary;

use std::fmt::Debug;

use crate::{candidate::Password, error::Result, rng::RandomNumberGenerator};

/// # BreedStrategy
///
/// The `BreedStrategy` trait defines the interface for strategies responsible for breeding
/// the next generation from a scored population.
pub trait BreedStrategy
where
    Self: Debug + Send + Sync,
{
    /// Breeds the next population.
    ///
    /// ## Parameters
    ///
    /// - `elite`: The best candidate of the current generation, carried over unchanged.
    /// - `population`: The current population.
    /// - `fitness`: The fitness of each member of `population`, in the same order.
    /// - `rng`: The run's random number generator.
    ///
    /// ## Returns
    ///
    /// A Result containing exactly `population_size` candidates with `elite` first,
    /// or a GeneticError if breeding fails.
    fn breed(
        &self,
        elite: &Password,
        population: &[Password],
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Password>>;
}

pub use crossover::Crossover;
pub use mutation::{Mutation, MutationAction};
pub use ordinary::OrdinaryStrategy;
