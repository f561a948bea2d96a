//! Snake GA: evolves a linear Snake policy with a genetic algorithm.
//!
//! - `game`, `snake`, `food`, `border`: the environment
//! - `game_input`: the feature vector the policy reads
//! - `brain`: linear action selection
//! - `training`: episode-averaged fitness and the training entry point
//! - `genome`, `evolution`: the optimizer
//! - `replay`: traced run of the final policy

pub mod border;
pub mod brain;
pub mod config;
pub mod error;
pub mod evolution;
pub mod food;
pub mod game;
pub mod game_input;
pub mod genome;
pub mod log;
pub mod replay;
pub mod snake;
pub mod training;
pub mod utils;

pub use brain::{Brain, NUM_ACTIONS, select_action, total_weights};
pub use config::{EvalConfig, GaConfig, GameConfig, MutationKind, RunConfig};
pub use error::{ConfigError, EnvError, PolicyError, SimError};
pub use evolution::{BestSolution, DriverContext, Fitness, GeneticAlgorithm, Optimizer};
pub use game::{Game, StepOutcome};
pub use game_input::{NUM_FEATURES, State};
pub use replay::{EpisodeTrace, Outcome, run_episode};
pub use training::{FitnessEvaluator, run_training};
