pub mod candidate;
pub mod charset;
pub mod corpus;
pub mod error;
pub mod evolution;
pub mod rng;
pub mod scorer;
pub mod selection;
pub mod strategy;

// Re-export commonly used types for convenience
pub use candidate::Password;
pub use charset::{CharacterClass, CharacterClasses};
pub use error::{GeneticError, OptionExt, Result, ResultExt};
pub use evolution::{EvolutionLauncher, EvolutionOptions, EvolutionResult, Progress, StopReason};
pub use scorer::{NeutralScorer, ScorerError, StrengthScorer};
