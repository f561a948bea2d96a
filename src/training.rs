use crate::brain::{select_action, total_weights};
use crate::config::{EvalConfig, GameConfig, RunConfig};
use crate::error::{ConfigError, SimError};
use crate::evolution::{BestSolution, DriverContext, Fitness, GeneticAlgorithm, Optimizer};
use crate::game::Game;
use crate::utils::derive_seed;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

/// Evolves a policy for `config.game` and returns the best one found.
pub fn run_training(config: &RunConfig) -> Result<BestSolution, SimError> {
    config.validate()?;
    let evaluator = FitnessEvaluator::new(config.game.clone(), config.eval)?;
    let mut ga = GeneticAlgorithm::new(config.ga.clone(), total_weights())?;
    info!(
        genes = total_weights(),
        population = config.ga.population_size,
        generations = config.ga.generations,
        "starting evolution"
    );
    train_with(&mut ga, &evaluator)
}

/// Same as [`run_training`] with any optimizer plugged in.
pub fn train_with(optimizer: &mut dyn Optimizer, evaluator: &FitnessEvaluator) -> Result<BestSolution, SimError> {
    Ok(optimizer.run(evaluator)?)
}

/// Mean episode reward of a linear policy: the fitness signal of the GA.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    game: GameConfig,
    eval: EvalConfig,
}

impl FitnessEvaluator {
    pub fn new(game: GameConfig, eval: EvalConfig) -> Result<Self, ConfigError> {
        game.validate()?;
        eval.validate()?;
        Ok(Self { game, eval })
    }

    /// Runs `episodes` fresh games, each capped at `max_steps`, and averages
    /// the summed rewards. Food placement draws from `rng`.
    pub fn evaluate<R: Rng>(&self, weights: &[f64], rng: &mut R) -> Result<f64, SimError> {
        let mut total_reward = 0.0;
        for _ in 0..self.eval.episodes {
            let mut game = Game::new(self.game.clone(), &mut *rng)?;
            let mut state = game.state();
            let mut episode_reward = 0.0;
            for _ in 0..self.eval.max_steps {
                let action = select_action(&state, weights)?;
                let out = game.step(action)?;
                episode_reward += out.reward;
                state = out.state;
                if out.done {
                    break;
                }
            }
            total_reward += episode_reward;
        }
        Ok(total_reward / self.eval.episodes as f64)
    }
}

impl Fitness for FitnessEvaluator {
    fn fitness(&self, driver: &DriverContext, solution: &[f64], solution_idx: usize) -> f64 {
        let seed = derive_seed(driver.seed, driver.generation, solution_idx);
        let mut rng = StdRng::seed_from_u64(seed);
        match self.evaluate(solution, &mut rng) {
            Ok(fitness) => {
                debug!(generation = driver.generation, candidate = solution_idx, fitness, "evaluated");
                fitness
            }
            Err(e) => {
                warn!(candidate = solution_idx, "evaluation failed: {e}");
                f64::NEG_INFINITY
            }
        }
    }
}
