use crate::{
    error::{GeneticError, Result},
    scorer::StrengthScorer,
    strategy::{BreedStrategy, OrdinaryStrategy},
};

use super::{
    fitness::FitnessEvaluator, options::EvolutionOptions, population::InitStrategy,
    progress::CancellationToken, EvolutionLauncher,
};

/// Assembles an [`EvolutionLauncher`] from its parts.
///
/// Options and a scorer are required. The breeding step defaults to
/// [`OrdinaryStrategy`] built from the options, initialization defaults to
/// [`InitStrategy::Random`], and a fresh [`CancellationToken`] is created
/// unless one is supplied.
pub struct EvolutionLauncherBuilder<S, B = OrdinaryStrategy>
where
    S: StrengthScorer,
    B: BreedStrategy,
{
    options: Option<EvolutionOptions>,
    scorer: Option<S>,
    breed_strategy: Option<B>,
    init_strategy: InitStrategy,
    cancellation: Option<CancellationToken>,
}

impl<S, B> EvolutionLauncherBuilder<S, B>
where
    S: StrengthScorer,
    B: BreedStrategy,
{
    pub fn new() -> Self {
        Self {
            options: None,
            scorer: None,
            breed_strategy: None,
            init_strategy: InitStrategy::Random,
            cancellation: None,
        }
    }

    pub fn with_options(mut self, options: EvolutionOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_scorer(mut self, scorer: S) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn with_breed_strategy(mut self, breed_strategy: B) -> Self {
        self.breed_strategy = Some(breed_strategy);
        self
    }

    pub fn with_init_strategy(mut self, init_strategy: InitStrategy) -> Self {
        self.init_strategy = init_strategy;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    fn take_parts(
        self,
    ) -> Result<(
        EvolutionOptions,
        S,
        Option<B>,
        InitStrategy,
        CancellationToken,
    )> {
        let options = self.options.ok_or_else(|| {
            GeneticError::Configuration("Evolution options not specified".to_string())
        })?;
        options.validate()?;

        let scorer = self.scorer.ok_or_else(|| {
            GeneticError::Configuration("Strength scorer not specified".to_string())
        })?;

        Ok((
            options,
            scorer,
            self.breed_strategy,
            self.init_strategy,
            self.cancellation.unwrap_or_default(),
        ))
    }
}

impl<S> EvolutionLauncherBuilder<S, OrdinaryStrategy>
where
    S: StrengthScorer,
{
    /// Builds the launcher, creating the ordinary breeding step from the
    /// options unless one was supplied.
    pub fn build(self) -> Result<EvolutionLauncher<S, OrdinaryStrategy>> {
        let (options, scorer, breed_strategy, init_strategy, cancellation) = self.take_parts()?;
        let strategy = match breed_strategy {
            Some(strategy) => strategy,
            None => OrdinaryStrategy::from_options(&options)?,
        };
        let evaluator = FitnessEvaluator::new(&options, scorer);

        Ok(EvolutionLauncher::from_parts(
            options,
            evaluator,
            strategy,
            init_strategy,
            cancellation,
        ))
    }
}

impl<S, B> EvolutionLauncherBuilder<S, B>
where
    S: StrengthScorer,
    B: BreedStrategy,
{
    /// Builds a launcher around a custom breeding step.
    pub fn build_with_strategy(self) -> Result<EvolutionLauncher<S, B>> {
        let (options, scorer, breed_strategy, init_strategy, cancellation) = self.take_parts()?;
        let strategy = breed_strategy.ok_or_else(|| {
            GeneticError::Configuration("Breeding strategy not specified".to_string())
        })?;
        let evaluator = FitnessEvaluator::new(&options, scorer);

        Ok(EvolutionLauncher::from_parts(
            options,
            evaluator,
            strategy,
            init_strategy,
            cancellation,
        ))
    }
}

impl<S, B> Default for EvolutionLauncherBuilder<S, B>
where
    S: StrengthScorer,
    B: BreedStrategy,
{
    fn default() -> Self {
        Self::new()
    }
}
