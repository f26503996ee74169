//! # OrdinaryStrategy
//!
//! The `OrdinaryStrategy` struct is the generational breeding step: the elite
//! of the previous generation is carried over unchanged, and every other slot
//! is filled by a child of two tournament winners, recombined and then
//! possibly mutated.
use rayon::prelude::*;

use super::{crossover::Crossover, mutation::Mutation, BreedStrategy};
use crate::{
    candidate::Password,
    error::{GeneticError, Result},
    evolution::options::EvolutionOptions,
    rng::RandomNumberGenerator,
    selection::{SelectionStrategy, TournamentSelection},
};

/// # OrdinaryStrategy
///
/// Elitism plus select/recombine/mutate refill.
#[derive(Debug, Clone)]
pub struct OrdinaryStrategy<S = TournamentSelection>
where
    S: SelectionStrategy + Clone,
{
    selection: S,
    crossover: Crossover,
    mutation: Mutation,
    population_size: usize,
    max_length: usize,
    parallel_threshold: usize,
}

impl OrdinaryStrategy<TournamentSelection> {
    /// Creates the breeding step described by `options`.
    pub fn from_options(options: &EvolutionOptions) -> Result<Self> {
        let selection = TournamentSelection::new(options.get_tournament_size())?;
        Self::with_selection(options, selection)
    }
}

impl<S> OrdinaryStrategy<S>
where
    S: SelectionStrategy + Clone,
{
    /// Creates the breeding step with a custom selection strategy.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if `options` are invalid.
    pub fn with_selection(options: &EvolutionOptions, selection: S) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            selection,
            crossover: options.get_crossover(),
            mutation: Mutation::new(
                options.get_mutation_rate(),
                options.get_mutation_actions().to_vec(),
                options.get_character_classes().alphabet(),
                options.get_max_length(),
            )?,
            population_size: options.get_population_size(),
            max_length: options.get_max_length(),
            parallel_threshold: options.get_parallel_threshold(),
        })
    }

    fn breed_child(
        &self,
        population: &[Password],
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<Password> {
        let p1 = self.selection.select(population, fitness, rng)?;
        let p2 = self.selection.select(population, fitness, rng)?;
        let child = self.crossover.recombine(p1, p2, self.max_length, rng);
        Ok(self.mutation.mutate(child, rng))
    }
}

impl<S> BreedStrategy for OrdinaryStrategy<S>
where
    S: SelectionStrategy + Clone,
{
    /// Breeds the next population.
    ///
    /// ## Errors
    ///
    /// This method will return an error if the population is empty or if
    /// selection fails, e.g. because the population shrank below the
    /// tournament size.
    ///
    /// ## Performance
    ///
    /// Every child gets its own random stream forked from `rng` before any
    /// child is bred, so the result is the same whether the children are
    /// produced sequentially or in parallel with Rayon.
    fn breed(
        &self,
        elite: &Password,
        population: &[Password],
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Password>> {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let num_children = self.population_size.saturating_sub(1);
        let streams: Vec<RandomNumberGenerator> = (0..num_children).map(|_| rng.fork()).collect();

        let mut next = Vec::with_capacity(self.population_size);
        next.push(elite.clone());

        if self.population_size >= self.parallel_threshold {
            let children: Result<Vec<Password>> = streams
                .into_par_iter()
                .map(|mut child_rng| self.breed_child(population, fitness, &mut child_rng))
                .collect();
            next.extend(children?);
        } else {
            for mut child_rng in streams {
                next.push(self.breed_child(population, fitness, &mut child_rng)?);
            }
        }

        Ok(next)
    }
}
