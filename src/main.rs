use anyhow::Context;
use chrono::Local;
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use snake_ga::utils::derive_seed;
use snake_ga::{Brain, GameConfig, MutationKind, RunConfig, log, run_episode, run_training};
use std::time::Instant;
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mutation {
    Random,
    Perturb,
}

impl From<Mutation> for MutationKind {
    fn from(m: Mutation) -> Self {
        match m {
            Mutation::Random => MutationKind::Random,
            Mutation::Perturb => MutationKind::Perturb,
        }
    }
}

/// Evolve a linear Snake policy, then replay the best one.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[arg(long, default_value_t = 10)]
    width: usize,
    #[arg(long, default_value_t = 10)]
    height: usize,
    /// Apples placed at the start of every episode
    #[arg(long, default_value_t = 10)]
    food: usize,

    /// Episodes averaged per fitness call
    #[arg(long, default_value_t = 5)]
    episodes: usize,
    #[arg(long, default_value_t = 200)]
    max_steps: usize,

    #[arg(long, default_value_t = 100)]
    generations: usize,
    #[arg(long, default_value_t = 50)]
    population: usize,
    #[arg(long, default_value_t = 10)]
    parents: usize,
    #[arg(long, default_value_t = 10.0)]
    mutation_percent: f64,
    #[arg(long, value_enum, default_value_t = Mutation::Random)]
    mutation: Mutation,
    /// Largest step added to a gene by `--mutation perturb`
    #[arg(long, default_value_t = 0.5)]
    perturb_magnitude: f64,
    /// Best individuals copied unchanged into the next generation
    #[arg(long, default_value_t = 1)]
    keep_elitism: usize,
    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    gene_low: f64,
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    gene_high: f64,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Evaluate candidates on one thread
    #[arg(long)]
    sequential: bool,

    /// Step cap for the final replay
    #[arg(long, default_value_t = 200)]
    testing_steps: usize,
    /// Print the replay as JSON instead of text
    #[arg(long)]
    json: bool,
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        let mut cfg = RunConfig::default();
        cfg.game = GameConfig { food_count: self.food, ..GameConfig::new(self.width, self.height) };
        cfg.eval.episodes = self.episodes;
        cfg.eval.max_steps = self.max_steps;
        cfg.ga.generations = self.generations;
        cfg.ga.population_size = self.population;
        cfg.ga.parents_mating = self.parents;
        cfg.ga.mutation_percent_genes = self.mutation_percent;
        cfg.ga.mutation = self.mutation.into();
        cfg.ga.perturb_magnitude = self.perturb_magnitude;
        cfg.ga.keep_elitism = self.keep_elitism;
        cfg.ga.gene_low = self.gene_low;
        cfg.ga.gene_high = self.gene_high;
        cfg.ga.seed = self.seed;
        cfg.ga.parallel = !self.sequential;
        cfg.testing_steps = self.testing_steps;
        cfg
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    log::init(&cli.log_level);

    let started_at = Local::now();
    let start_time = Instant::now();
    let config = cli.run_config();
    config.validate().context("invalid configuration")?;
    info!(config = %serde_json::to_string(&config)?, "run configuration");

    let best = run_training(&config).context("training failed")?;
    println!("\nBest solution fitness: {}", best.fitness);

    let brain = Brain::new(best.weights.clone())?;
    let rng = StdRng::seed_from_u64(derive_seed(config.ga.seed, usize::MAX, 0));
    let trace = run_episode(config.game.clone(), &brain, config.testing_steps, rng)
        .context("replay of the best policy failed")?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
    } else {
        println!("{trace}");
    }

    info!(
        started = %started_at.format("%Y-%m-%d %H:%M:%S"),
        generations = best.history.len(),
        best_fitness = best.fitness,
        replay_score = trace.score(),
        "done in {:?}",
        start_time.elapsed()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_run_config() {
        let cli = Cli::try_parse_from(["snake_ga"]).unwrap();
        assert_eq!(cli.run_config(), RunConfig::default());
    }

    #[test]
    fn ga_flags_reach_the_config() {
        let cli = Cli::try_parse_from([
            "snake_ga",
            "--mutation",
            "perturb",
            "--perturb-magnitude",
            "0.1",
            "--keep-elitism",
            "3",
            "--gene-low",
            "-2",
            "--sequential",
        ])
        .unwrap();
        let cfg = cli.run_config();
        assert_eq!(cfg.ga.mutation, MutationKind::Perturb);
        assert_eq!(cfg.ga.perturb_magnitude, 0.1);
        assert_eq!(cfg.ga.keep_elitism, 3);
        assert_eq!(cfg.ga.gene_low, -2.0);
        assert!(!cfg.ga.parallel);
    }

    #[test]
    fn infinite_gene_bound_fails_validation() {
        let cli = Cli::try_parse_from(["snake_ga", "--gene-low=-inf"]).unwrap();
        assert!(cli.run_config().validate().is_err());
    }
}
