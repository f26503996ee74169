use std::fmt::Debug;

use crate::candidate::Password;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Trait for parent selection strategies.
///
/// A selection strategy picks one parent from a scored population. The
/// breeding step calls it twice per child.
///
/// # Examples
///
/// ```
/// use genpass::candidate::Password;
/// use genpass::rng::RandomNumberGenerator;
/// use genpass::selection::{SelectionStrategy, TournamentSelection};
///
/// let population = vec![Password::from("weak"), Password::from("Str0ng!pass")];
/// let fitness = vec![0.5, 9.0];
/// let mut rng = RandomNumberGenerator::from_seed(3);
///
/// // A tournament over the whole population always finds the best.
/// let selection = TournamentSelection::new(2).unwrap();
/// let parent = selection.select(&population, &fitness, &mut rng).unwrap();
///
/// assert_eq!(parent, &population[1]);
/// ```
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Returns the index of the selected individual.
    ///
    /// # Errors
    ///
    /// Returns an error if `fitness` is empty or if the strategy cannot run
    /// on a population of this size.
    fn select_index(&self, fitness: &[f64], rng: &mut RandomNumberGenerator) -> Result<usize>;

    /// Returns the selected individual.
    ///
    /// # Errors
    ///
    /// Returns an error if the population is empty, if the fitness vector
    /// length doesn't match the population length, or if
    /// [`select_index`](Self::select_index) fails.
    fn select<'a>(
        &self,
        population: &'a [Password],
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<&'a Password> {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        if fitness.len() != population.len() {
            return Err(GeneticError::Configuration(format!(
                "Fitness vector length ({}) doesn't match population length ({})",
                fitness.len(),
                population.len()
            )));
        }

        let idx = self.select_index(fitness, rng)?;
        Ok(&population[idx])
    }
}
