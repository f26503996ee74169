pub mod builder;
pub mod convergence;
pub mod fitness;
pub mod launcher;
pub mod options;
pub mod population;
pub mod progress;

pub use builder::EvolutionLauncherBuilder;
pub use convergence::{ConvergenceTracker, StopReason};
pub use fitness::FitnessEvaluator;
pub use launcher::{EvolutionLauncher, EvolutionResult, EvolutionRun};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder, LogLevel};
pub use population::InitStrategy;
pub use progress::{CancellationToken, NoProgress, Progress, ProgressSink};
