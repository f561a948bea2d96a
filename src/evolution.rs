use crate::config::GaConfig;
use crate::error::ConfigError;
use crate::genome::{GeneSpace, Genome, mutation_gene_count};
use crate::log;
use crate::utils::{Stats, vec_stats};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::time::Instant;
use tracing::info;

/// What the driver tells the fitness function about the current call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverContext {
    pub generation: usize,
    pub seed: u64,
}

/// Scalar objective consumed by an [`Optimizer`]. Higher is better.
pub trait Fitness: Sync {
    fn fitness(&self, driver: &DriverContext, solution: &[f64], solution_idx: usize) -> f64;
}

impl<F> Fitness for F
where
    F: Fn(&DriverContext, &[f64], usize) -> f64 + Sync,
{
    fn fitness(&self, driver: &DriverContext, solution: &[f64], solution_idx: usize) -> f64 {
        self(driver, solution, solution_idx)
    }
}

/// A search strategy over flat parameter vectors.
pub trait Optimizer {
    fn run(&mut self, fitness: &dyn Fitness) -> Result<BestSolution, ConfigError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best: f64,
    pub mean: f64,
    pub min: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestSolution {
    pub weights: Vec<f64>,
    pub fitness: f64,
    /// Index in the final population.
    pub index: usize,
    pub history: Vec<GenerationStats>,
}

#[derive(Clone, Debug)]
pub struct Individual {
    pub genome: Genome,
    pub fitness: f64,
}

pub struct Population {
    pub individuals: Vec<Individual>,
    pub generation: usize,
}

/// NaN sorts below everything else.
fn cmp_fitness(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

impl Population {
    pub fn new_random(rng: &mut StdRng, size: usize, genes: usize, space: GeneSpace) -> Self {
        let individuals = (0..size)
            .map(|_| Individual { genome: Genome::random(rng, genes, space), fitness: 0.0 })
            .collect();
        Self { individuals, generation: 0 }
    }

    /// Scores every individual; candidate `i` always sees the same context.
    pub fn evaluate(&mut self, fitness: &dyn Fitness, seed: u64, parallel: bool) {
        let ctx = DriverContext { generation: self.generation, seed };
        if parallel {
            self.individuals
                .par_iter_mut()
                .enumerate()
                .for_each(|(i, ind)| ind.fitness = fitness.fitness(&ctx, &ind.genome.weights, i));
        } else {
            for (i, ind) in self.individuals.iter_mut().enumerate() {
                ind.fitness = fitness.fitness(&ctx, &ind.genome.weights, i);
            }
        }
    }

    /// Best first.
    pub fn sort(&mut self) {
        self.individuals.sort_by(|a, b| cmp_fitness(b.fitness, a.fitness));
    }

    pub fn stats(&self) -> Stats {
        let fitness: Vec<f64> = self.individuals.iter().map(|i| i.fitness).collect();
        vec_stats(&fitness)
    }

    /// Steady-state step on a sorted population: elites survive, the top
    /// `parents` breed the rest.
    pub fn evolve(&mut self, rng: &mut StdRng, cfg: &GaConfig, space: GeneSpace) {
        let size = self.individuals.len();
        let parents = cfg.parents_mating.min(size);
        let genes = self.individuals.first().map_or(0, |i| i.genome.weights.len());
        let mutate_count = mutation_gene_count(cfg.mutation_percent_genes, genes);

        let mut new_gen: Vec<Individual> = self.individuals[..cfg.keep_elitism.min(size)].to_vec();

        let mut k = 0;
        while new_gen.len() < size {
            let parent1 = &self.individuals[k % parents].genome;
            let parent2 = &self.individuals[(k + 1) % parents].genome;
            let mut child = Genome::crossover(parent1, parent2, rng);
            child.mutate(rng, mutate_count, cfg.mutation, space, cfg.perturb_magnitude);
            new_gen.push(Individual { genome: child, fitness: 0.0 });
            k += 1;
        }

        self.individuals = new_gen;
        self.generation += 1;
    }

    /// Highest-fitness individual and its index; the first one wins ties.
    pub fn best(&self) -> Option<(usize, &Individual)> {
        self.individuals
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| cmp_fitness(b.fitness, a.fitness))
    }
}

/// Generational GA over `genes`-long vectors, configured like a classic
/// steady-state-selection / single-point-crossover / random-mutation setup.
pub struct GeneticAlgorithm {
    config: GaConfig,
    genes: usize,
}

impl GeneticAlgorithm {
    pub fn new(config: GaConfig, genes: usize) -> Result<Self, ConfigError> {
        config.validate()?;
        if genes == 0 {
            return Err(ConfigError::Invalid("genome must have at least one gene"));
        }
        Ok(Self { config, genes })
    }
}

impl Optimizer for GeneticAlgorithm {
    fn run(&mut self, fitness: &dyn Fitness) -> Result<BestSolution, ConfigError> {
        let cfg = &self.config;
        let space = GeneSpace { low: cfg.gene_low, high: cfg.gene_high };
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let mut population = Population::new_random(&mut rng, cfg.population_size, self.genes, space);
        let mut history = Vec::with_capacity(cfg.generations);

        for generation in 0..cfg.generations {
            let start_time = Instant::now();
            population.evaluate(fitness, cfg.seed, cfg.parallel);
            population.sort();

            let stats = population.stats();
            info!(
                "Gen {:>3} | Best Fit: {:>8.2} | Avg: {:>8.2} | Min: {:>8.2} | Time: {:?}",
                generation,
                stats.max,
                stats.mean,
                stats.min,
                start_time.elapsed()
            );
            log::scalar(generation as u64, "best_fitness", stats.max);
            history.push(GenerationStats { generation, best: stats.max, mean: stats.mean, min: stats.min });

            population.evolve(&mut rng, cfg, space);
        }

        // score the last offspring too, so the answer reflects the final population
        population.evaluate(fitness, cfg.seed, cfg.parallel);
        let (index, best) = population
            .best()
            .ok_or(ConfigError::Invalid("population_size must be non-zero"))?;

        Ok(BestSolution {
            weights: best.genome.weights.clone(),
            fitness: best.fitness,
            index,
            history,
        })
    }
}
