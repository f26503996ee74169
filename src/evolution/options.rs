//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct is the immutable configuration of one search
//! run: length bounds, active character classes, population and generation
//! sizes, operator parameters and stopping conditions.
//!
//! Options are only obtainable through [`EvolutionOptionsBuilder::build`],
//! which validates them, so a constructed value always satisfies:
//!
//! - `1 <= min_length <= max_length`
//! - `1 <= tournament_size <= population_size`
//! - `0 <= mutation_rate <= 1`
//! - at least one character class and one mutation action
//! - `num_generations >= 1` and `convergence_window >= 1`
//!
//! ## Example
//!
//! ```rust
//! use genpass::charset::{CharacterClass, CharacterClasses};
//! use genpass::evolution::options::{EvolutionOptions, LogLevel};
//!
//! let options = EvolutionOptions::builder()
//!     .length_bounds(8, 12)
//!     .character_classes(CharacterClasses::from_iter([CharacterClass::Digits]))
//!     .population_size(10)
//!     .tournament_size(3)
//!     .mutation_rate(0.0)
//!     .num_generations(1)
//!     .log_level(LogLevel::Minimal)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.get_population_size(), 10);
//!
//! // An empty class set is rejected rather than widened to every class.
//! let rejected = EvolutionOptions::builder()
//!     .character_classes(CharacterClasses::empty())
//!     .build();
//! assert!(rejected.is_err());
//! ```

use crate::charset::CharacterClasses;
use crate::error::{GeneticError, Result};
use crate::strategy::crossover::Crossover;
use crate::strategy::mutation::MutationAction;

pub const DEFAULT_MIN_LENGTH: usize = 8;
pub const DEFAULT_MAX_LENGTH: usize = 36;
pub const DEFAULT_POPULATION_SIZE: usize = 100;
pub const DEFAULT_NUM_GENERATIONS: usize = 3000;
pub const DEFAULT_MUTATION_RATE: f64 = 0.1;
pub const DEFAULT_TOURNAMENT_SIZE: usize = 5;
pub const DEFAULT_CONVERGENCE_WINDOW: usize = 50;
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// How much the evolution loop reports through `tracing`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Per-generation summary plus every candidate's score at debug level.
    Verbose,
    /// One line per generation.
    Minimal,
    /// Only terminal states and failures.
    #[default]
    None,
}

#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "UncheckedOptions")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    min_length: usize,
    max_length: usize,
    population_size: usize,
    num_generations: usize,
    mutation_rate: f64,
    tournament_size: usize,
    character_classes: CharacterClasses,
    convergence_window: usize,
    crossover: Crossover,
    mutation_actions: Vec<MutationAction>,
    target_fitness: Option<f64>,
    log_level: LogLevel,
    /// Minimum population size to evaluate and breed in parallel
    parallel_threshold: usize,
}

impl EvolutionOptions {
    /// Returns a builder seeded with the default configuration.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }

    /// Checks every invariant of the configuration.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` describing the first violated rule.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(GeneticError::Configuration(msg));

        if self.min_length == 0 {
            return fail("Minimum length must be at least 1".to_string());
        }
        if self.max_length < self.min_length {
            return fail(format!(
                "Maximum length ({}) cannot be smaller than minimum length ({})",
                self.max_length, self.min_length
            ));
        }
        if self.population_size == 0 {
            return fail("Population size cannot be zero".to_string());
        }
        if self.num_generations == 0 {
            return fail("Number of generations cannot be zero".to_string());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return fail(format!(
                "Mutation rate must be within [0, 1], got {}",
                self.mutation_rate
            ));
        }
        if self.tournament_size == 0 {
            return fail("Tournament size must be at least 1".to_string());
        }
        if self.tournament_size > self.population_size {
            return fail(format!(
                "Tournament size ({}) cannot exceed population size ({})",
                self.tournament_size, self.population_size
            ));
        }
        if self.character_classes.is_empty() {
            return fail("At least one character class must be enabled".to_string());
        }
        if self.convergence_window == 0 {
            return fail("Convergence window must be at least 1".to_string());
        }
        if self.mutation_actions.is_empty() {
            return fail("At least one mutation action must be enabled".to_string());
        }
        if let Some(target) = self.target_fitness {
            if !target.is_finite() || target <= 0.0 {
                return fail(format!(
                    "Target fitness must be a positive finite number, got {}",
                    target
                ));
            }
        }
        Ok(())
    }

    pub fn get_min_length(&self) -> usize {
        self.min_length
    }

    pub fn get_max_length(&self) -> usize {
        self.max_length
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_tournament_size(&self) -> usize {
        self.tournament_size
    }

    pub fn get_character_classes(&self) -> CharacterClasses {
        self.character_classes
    }

    pub fn get_convergence_window(&self) -> usize {
        self.convergence_window
    }

    pub fn get_crossover(&self) -> Crossover {
        self.crossover
    }

    pub fn get_mutation_actions(&self) -> &[MutationAction] {
        &self.mutation_actions
    }

    pub fn get_target_fitness(&self) -> Option<f64> {
        self.target_fitness
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Returns the minimum population size processed in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }
}

/// Deserialized fields before validation.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct UncheckedOptions {
    min_length: usize,
    max_length: usize,
    population_size: usize,
    num_generations: usize,
    mutation_rate: f64,
    tournament_size: usize,
    character_classes: CharacterClasses,
    convergence_window: usize,
    crossover: Crossover,
    mutation_actions: Vec<MutationAction>,
    target_fitness: Option<f64>,
    log_level: LogLevel,
    parallel_threshold: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedOptions> for EvolutionOptions {
    type Error = GeneticError;

    fn try_from(raw: UncheckedOptions) -> Result<Self> {
        let options = Self {
            min_length: raw.min_length,
            max_length: raw.max_length,
            population_size: raw.population_size,
            num_generations: raw.num_generations,
            mutation_rate: raw.mutation_rate,
            tournament_size: raw.tournament_size,
            character_classes: raw.character_classes,
            convergence_window: raw.convergence_window,
            crossover: raw.crossover,
            mutation_actions: raw.mutation_actions,
            target_fitness: raw.target_fitness,
            log_level: raw.log_level,
            parallel_threshold: raw.parallel_threshold,
        };
        options.validate()?;
        Ok(options)
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            population_size: DEFAULT_POPULATION_SIZE,
            num_generations: DEFAULT_NUM_GENERATIONS,
            mutation_rate: DEFAULT_MUTATION_RATE,
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
            character_classes: CharacterClasses::all(),
            convergence_window: DEFAULT_CONVERGENCE_WINDOW,
            crossover: Crossover::default(),
            mutation_actions: MutationAction::DEFAULT.to_vec(),
            target_fitness: None,
            log_level: LogLevel::None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Unset fields keep their defaults; [`build`](Self::build) validates the result.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    options: EvolutionOptions,
}

impl EvolutionOptionsBuilder {
    /// Sets both length bounds.
    pub fn length_bounds(mut self, min_length: usize, max_length: usize) -> Self {
        self.options.min_length = min_length;
        self.options.max_length = max_length;
        self
    }

    pub fn min_length(mut self, value: usize) -> Self {
        self.options.min_length = value;
        self
    }

    pub fn max_length(mut self, value: usize) -> Self {
        self.options.max_length = value;
        self
    }

    pub fn population_size(mut self, value: usize) -> Self {
        self.options.population_size = value;
        self
    }

    /// Sets the generation budget.
    pub fn num_generations(mut self, value: usize) -> Self {
        self.options.num_generations = value;
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.options.mutation_rate = value;
        self
    }

    pub fn tournament_size(mut self, value: usize) -> Self {
        self.options.tournament_size = value;
        self
    }

    pub fn character_classes(mut self, value: CharacterClasses) -> Self {
        self.options.character_classes = value;
        self
    }

    /// Sets how many consecutive non-improving generations end the run.
    pub fn convergence_window(mut self, value: usize) -> Self {
        self.options.convergence_window = value;
        self
    }

    pub fn crossover(mut self, value: Crossover) -> Self {
        self.options.crossover = value;
        self
    }

    /// Sets the actions a triggered mutation chooses from uniformly.
    pub fn mutation_actions<I>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = MutationAction>,
    {
        let mut unique = Vec::new();
        for action in actions {
            if !unique.contains(&action) {
                unique.push(action);
            }
        }
        self.options.mutation_actions = unique;
        self
    }

    /// Stops the run as soon as a generation's best fitness reaches `value`.
    pub fn target_fitness(mut self, value: f64) -> Self {
        self.options.target_fitness = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.options.log_level = value;
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.options.parallel_threshold = value;
        self
    }

    /// Builds and validates the `EvolutionOptions` instance.
    pub fn build(self) -> Result<EvolutionOptions> {
        self.options.validate()?;
        Ok(self.options)
    }
}
