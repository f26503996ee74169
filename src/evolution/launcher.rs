use super::{
    builder::EvolutionLauncherBuilder,
    convergence::{ConvergenceTracker, StopReason},
    fitness::FitnessEvaluator,
    options::{EvolutionOptions, LogLevel},
    population::InitStrategy,
    progress::{CancellationToken, NoProgress, Progress, ProgressSink},
};
use crate::{
    candidate::Password,
    error::{GeneticError, OptionExt, Result},
    rng::RandomNumberGenerator,
    scorer::StrengthScorer,
    strategy::{BreedStrategy, OrdinaryStrategy},
};

/// The final outcome of a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    /// The best candidate found.
    pub candidate: Password,
    /// The fitness of `candidate`, the highest observed in the run.
    pub score: f64,
    /// 0-based index of the last evaluated generation.
    pub generation: usize,
    /// Which terminal state ended the run.
    pub stop_reason: StopReason,
}

/// Runs the generational search for a strong password.
///
/// # Example
///
/// ```rust
/// use genpass::evolution::{EvolutionLauncher, EvolutionOptions};
/// use genpass::rng::RandomNumberGenerator;
/// use genpass::scorer::NeutralScorer;
///
/// let options = EvolutionOptions::builder()
///     .length_bounds(8, 16)
///     .population_size(20)
///     .num_generations(30)
///     .build()
///     .unwrap();
/// let launcher = EvolutionLauncher::new(options, NeutralScorer).unwrap();
/// let mut rng = RandomNumberGenerator::from_seed(42);
///
/// let mut generations = 0;
/// let result = launcher
///     .evolve(&mut rng, &mut |_: &genpass::evolution::Progress| generations += 1)
///     .unwrap();
///
/// assert!(result.score > 0.0);
/// assert_eq!(generations, result.generation + 1);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionLauncher<S, B = OrdinaryStrategy>
where
    S: StrengthScorer,
    B: BreedStrategy,
{
    options: EvolutionOptions,
    evaluator: FitnessEvaluator<S>,
    strategy: B,
    init_strategy: InitStrategy,
    cancellation: CancellationToken,
}

impl<S> EvolutionLauncher<S, OrdinaryStrategy>
where
    S: StrengthScorer,
{
    /// Creates a launcher with random initialization and the ordinary
    /// breeding step.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if `options` are invalid.
    pub fn new(options: EvolutionOptions, scorer: S) -> Result<Self> {
        EvolutionLauncherBuilder::<S>::new()
            .with_options(options)
            .with_scorer(scorer)
            .build()
    }

    pub fn builder() -> EvolutionLauncherBuilder<S> {
        EvolutionLauncherBuilder::new()
    }
}

impl<S, B> EvolutionLauncher<S, B>
where
    S: StrengthScorer,
    B: BreedStrategy,
{
    pub(crate) fn from_parts(
        options: EvolutionOptions,
        evaluator: FitnessEvaluator<S>,
        strategy: B,
        init_strategy: InitStrategy,
        cancellation: CancellationToken,
    ) -> Self {
        Self {
            options,
            evaluator,
            strategy,
            init_strategy,
            cancellation,
        }
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    pub fn evaluator(&self) -> &FitnessEvaluator<S> {
        &self.evaluator
    }

    /// A handle that stops the run at the next generation boundary.
    pub fn cancel_handle(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Theoretical maximum fitness under this configuration, if the scorer is bounded.
    pub fn max_possible_fitness(&self) -> Option<f64> {
        self.evaluator.max_possible_fitness()
    }

    /// Runs the search without progress reporting.
    pub fn evolve_silent(&self, rng: &mut RandomNumberGenerator) -> Result<EvolutionResult> {
        self.evolve(rng, &mut NoProgress)
    }

    /// Runs the search to completion, emitting one progress record per
    /// generation.
    ///
    /// Equivalent to [`start`](Self::start) followed by
    /// [`EvolutionRun::step`] until a terminal state is reached.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - Initialization fails, e.g. `GeneticError::InsufficientCorpus`
    /// - The strength scorer fails (`GeneticError::ScorerUnavailable`) or
    ///   returns an invalid value
    /// - Breeding fails
    pub fn evolve<K>(&self, rng: &mut RandomNumberGenerator, sink: &mut K) -> Result<EvolutionResult>
    where
        K: ProgressSink + ?Sized,
    {
        let mut run = self.start(rng)?;
        loop {
            if let Some(result) = run.step(rng, sink)? {
                return Ok(result);
            }
        }
    }

    /// Builds the first generation and returns a run that can be advanced
    /// one generation at a time.
    ///
    /// # Errors
    ///
    /// Returns the initialization error, e.g. `GeneticError::InsufficientCorpus`.
    pub fn start(&self, rng: &mut RandomNumberGenerator) -> Result<EvolutionRun<'_, S, B>> {
        let population = self.init_strategy.initialize(&self.options, rng)?;
        Ok(EvolutionRun {
            launcher: self,
            population,
            tracker: ConvergenceTracker::new(self.options.get_convergence_window()),
            overall: None,
            generation: 0,
            finished: None,
        })
    }

    fn finish(
        &self,
        overall: Option<(Password, f64)>,
        generation: usize,
        stop_reason: StopReason,
    ) -> Result<EvolutionResult> {
        let (candidate, score) = overall.ok_or_else_genetic(|| {
            GeneticError::Evolution("Evolution ended before any candidate was scored".to_string())
        })?;

        tracing::info!(
            generation,
            score,
            ?stop_reason,
            length = candidate.len(),
            "evolution finished"
        );

        Ok(EvolutionResult {
            candidate,
            score,
            generation,
            stop_reason,
        })
    }

    fn log_generation(
        &self,
        generation: usize,
        population: &[Password],
        fitness: &[f64],
        best_fitness: f64,
        tracker: &ConvergenceTracker,
    ) {
        match self.options.get_log_level() {
            LogLevel::None => {}
            LogLevel::Minimal => tracing::info!(
                generation,
                best_fitness,
                historical_best = tracker.historical_best(),
                stagnant = tracker.stagnant_generations(),
                "generation evaluated"
            ),
            LogLevel::Verbose => {
                tracing::info!(
                    generation,
                    best_fitness,
                    historical_best = tracker.historical_best(),
                    stagnant = tracker.stagnant_generations(),
                    "generation evaluated"
                );
                population
                    .iter()
                    .zip(fitness)
                    .for_each(|(candidate, score)| {
                        tracing::debug!(generation, %candidate, score, "candidate scored")
                    });
            }
        }
    }
}

/// The state of a run between generations.
///
/// A failed [`step`](Self::step) leaves the state untouched, so after a
/// transient scorer failure the same generation can simply be stepped again.
#[derive(Debug)]
pub struct EvolutionRun<'a, S, B = OrdinaryStrategy>
where
    S: StrengthScorer,
    B: BreedStrategy,
{
    launcher: &'a EvolutionLauncher<S, B>,
    population: Vec<Password>,
    tracker: ConvergenceTracker,
    overall: Option<(Password, f64)>,
    generation: usize,
    finished: Option<EvolutionResult>,
}

impl<S, B> EvolutionRun<'_, S, B>
where
    S: StrengthScorer,
    B: BreedStrategy,
{
    /// 0-based index of the generation the next step evaluates.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The population the next step evaluates.
    pub fn population(&self) -> &[Password] {
        &self.population
    }

    /// The terminal result, once reached.
    pub fn result(&self) -> Option<&EvolutionResult> {
        self.finished.as_ref()
    }

    /// Evaluates the current generation and either ends the run or breeds
    /// the next population.
    ///
    /// The generation is scored, its best candidate found (first occurrence
    /// of the maximum), and the stall counter updated. The run ends when the
    /// stall reaches the convergence window, when the generation reaches the
    /// target fitness, after the last generation of the budget, or at the
    /// first generation boundary after cancellation. Otherwise the next
    /// population is bred with the current best carried over unchanged.
    ///
    /// Returns `Ok(Some(result))` once the run is over; further calls return
    /// the same result without doing any work.
    ///
    /// # Errors
    ///
    /// Scorer and breeding failures are returned without advancing the run
    /// and without emitting progress.
    pub fn step<K>(
        &mut self,
        rng: &mut RandomNumberGenerator,
        sink: &mut K,
    ) -> Result<Option<EvolutionResult>>
    where
        K: ProgressSink + ?Sized,
    {
        if let Some(result) = &self.finished {
            return Ok(Some(result.clone()));
        }

        let launcher = self.launcher;
        let options = &launcher.options;
        let generation = self.generation;

        if self.population.len() != options.get_population_size() {
            return Err(GeneticError::Evolution(format!(
                "Generation {} holds {} candidates, expected {}",
                generation,
                self.population.len(),
                options.get_population_size()
            )));
        }

        let fitness = launcher
            .evaluator
            .evaluate_population(&self.population)
            .map_err(|e| {
                tracing::warn!(generation, error = %e, "fitness evaluation failed");
                e
            })?;

        let (best_idx, best_fitness) = best_of(&fitness).ok_or_else_genetic(|| {
            GeneticError::Evolution(format!(
                "No viable candidates produced in generation {}",
                generation
            ))
        })?;
        let best_candidate = self.population[best_idx].clone();

        let mut overall = self.overall.clone();
        if overall.as_ref().map_or(true, |(_, score)| best_fitness > *score) {
            overall = Some((best_candidate.clone(), best_fitness));
        }

        let mut tracker = self.tracker.clone();
        let converged = tracker.observe(best_fitness);

        let stop_reason = if converged {
            Some(StopReason::Converged)
        } else if options
            .get_target_fitness()
            .map_or(false, |target| best_fitness >= target)
        {
            Some(StopReason::TargetReached)
        } else if generation + 1 == options.get_num_generations() {
            Some(StopReason::BudgetExhausted)
        } else {
            None
        };

        let next = match stop_reason {
            Some(_) => None,
            None => {
                tracker.advance(best_fitness);
                let next = launcher
                    .strategy
                    .breed(&best_candidate, &self.population, &fitness, rng)
                    .map_err(|e| {
                        GeneticError::Breeding(format!(
                            "Failed to breed candidates in generation {}: {}",
                            generation, e
                        ))
                    })?;
                Some(next)
            }
        };

        launcher.log_generation(generation, &self.population, &fitness, best_fitness, &tracker);
        let progress = Progress {
            best_fitness: tracker.historical_best(),
            best_candidate,
            generation,
        };
        self.tracker = tracker;
        self.overall = overall;

        if let Some(population) = next {
            self.population = population;
            self.generation += 1;
            sink.emit(&progress);
            if !launcher.cancellation.is_cancelled() {
                return Ok(None);
            }
        } else {
            sink.emit(&progress);
        }

        // only a continuing generation can have been cancelled
        let stop_reason = stop_reason.unwrap_or(StopReason::Cancelled);
        let result = launcher.finish(self.overall.clone(), generation, stop_reason)?;
        self.finished = Some(result.clone());
        Ok(Some(result))
    }
}

/// Index and value of the first maximum.
fn best_of(fitness: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &score) in fitness.iter().enumerate() {
        match best {
            Some((_, current)) if score <= current => {}
            _ => best = Some((idx, score)),
        }
    }
    best
}
