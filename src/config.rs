use crate::border::Border;
use crate::error::ConfigError;
use crate::snake::Position;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Board layout and the episode's starting position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Head first.
    pub initial_snake: Vec<Position>,
    /// Apples placed on reset; eating all of them wins.
    pub food_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 10,
            grid_height: 10,
            initial_snake: vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)],
            food_count: 10,
        }
    }
}

impl GameConfig {
    /// `width` x `height` board with a three-cell snake near the middle.
    pub fn new(width: usize, height: usize) -> Self {
        let (cx, cy) = ((width / 2) as i32, (height / 2) as i32);
        Self {
            grid_width: width,
            grid_height: height,
            initial_snake: (0..3).map(|i| Position::new(cx - i, cy)).collect(),
            ..Default::default()
        }
    }

    pub fn small() -> Self {
        Self { food_count: 3, ..Self::new(6, 6) }
    }

    pub fn border(&self) -> Border {
        Border::new(self.grid_width, self.grid_height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid { width: self.grid_width, height: self.grid_height });
        }
        if self.initial_snake.is_empty() {
            return Err(ConfigError::EmptySnake);
        }
        let border = self.border();
        let mut seen = HashSet::new();
        for (index, &cell) in self.initial_snake.iter().enumerate() {
            if !border.is_inside(cell) {
                return Err(ConfigError::SnakeOutOfBounds { x: cell.x, y: cell.y });
            }
            if !seen.insert(cell) {
                return Err(ConfigError::SnakeOverlaps { x: cell.x, y: cell.y });
            }
            if index > 0 && !self.initial_snake[index - 1].is_adjacent(cell) {
                return Err(ConfigError::SnakeNotContiguous { index });
            }
        }
        if self.food_count == 0 {
            return Err(ConfigError::NoFood);
        }
        let free = border.cell_count() - self.initial_snake.len();
        if self.food_count > free {
            return Err(ConfigError::NotEnoughFreeCells { requested: self.food_count, free });
        }
        Ok(())
    }
}

/// How a single candidate is scored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EvalConfig {
    pub episodes: usize,
    pub max_steps: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self { episodes: 5, max_steps: 200 }
    }
}

impl EvalConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.episodes == 0 {
            return Err(ConfigError::Invalid("episodes must be non-zero"));
        }
        if self.max_steps == 0 {
            return Err(ConfigError::Invalid("max_steps must be non-zero"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    /// Replace the gene with a uniform draw from the gene bounds.
    #[default]
    Random,
    /// Add a uniform draw from ±`perturb_magnitude`, clamped to the bounds.
    Perturb,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GaConfig {
    pub generations: usize,
    pub parents_mating: usize,
    pub population_size: usize,
    pub mutation_percent_genes: f64,
    pub gene_low: f64,
    pub gene_high: f64,
    pub mutation: MutationKind,
    pub perturb_magnitude: f64,
    /// Best candidates copied unchanged into the next generation.
    pub keep_elitism: usize,
    pub seed: u64,
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            generations: 100,
            parents_mating: 10,
            population_size: 50,
            mutation_percent_genes: 10.0,
            gene_low: -1.0,
            gene_high: 1.0,
            mutation: MutationKind::Random,
            perturb_magnitude: 0.5,
            keep_elitism: 1,
            seed: 42,
            parallel: true,
        }
    }
}

impl GaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generations == 0 {
            return Err(ConfigError::Invalid("generations must be non-zero"));
        }
        if self.population_size == 0 {
            return Err(ConfigError::Invalid("population_size must be non-zero"));
        }
        if self.parents_mating == 0 || self.parents_mating > self.population_size {
            return Err(ConfigError::Invalid("parents_mating must be in 1..=population_size"));
        }
        if self.keep_elitism > self.population_size {
            return Err(ConfigError::Invalid("keep_elitism cannot exceed population_size"));
        }
        if !(self.mutation_percent_genes > 0.0 && self.mutation_percent_genes <= 100.0) {
            return Err(ConfigError::Invalid("mutation_percent_genes must be in (0, 100]"));
        }
        if !(self.gene_low.is_finite() && self.gene_high.is_finite()) {
            return Err(ConfigError::Invalid("gene bounds must be finite"));
        }
        if !(self.gene_low < self.gene_high) {
            return Err(ConfigError::Invalid("gene_low must be below gene_high"));
        }
        // the sampler needs a representable span
        if !(self.gene_high - self.gene_low).is_finite() {
            return Err(ConfigError::Invalid("gene_high - gene_low overflows"));
        }
        if !(self.perturb_magnitude > 0.0 && self.perturb_magnitude.is_finite()) {
            return Err(ConfigError::Invalid("perturb_magnitude must be positive and finite"));
        }
        Ok(())
    }
}

/// Everything one training + replay run needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub game: GameConfig,
    pub eval: EvalConfig,
    pub ga: GaConfig,
    /// Step cap for the final replay of the best policy.
    pub testing_steps: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            eval: EvalConfig::default(),
            ga: GaConfig::default(),
            testing_steps: 200,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;
        self.eval.validate()?;
        self.ga.validate()?;
        if self.testing_steps == 0 {
            return Err(ConfigError::Invalid("testing_steps must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(RunConfig::default().validate(), Ok(()));
        assert_eq!(GameConfig::small().validate(), Ok(()));
        assert_eq!(GameConfig::new(15, 9).validate(), Ok(()));
    }

    #[test]
    fn rejects_broken_snakes() {
        let mut cfg = GameConfig::default();
        cfg.initial_snake = vec![];
        assert_eq!(cfg.validate(), Err(ConfigError::EmptySnake));

        cfg.initial_snake = vec![Position::new(10, 0)];
        assert_eq!(cfg.validate(), Err(ConfigError::SnakeOutOfBounds { x: 10, y: 0 }));

        cfg.initial_snake = vec![Position::new(1, 1), Position::new(3, 1)];
        assert_eq!(cfg.validate(), Err(ConfigError::SnakeNotContiguous { index: 1 }));

        cfg.initial_snake = vec![Position::new(1, 1), Position::new(2, 1), Position::new(1, 1)];
        assert_eq!(cfg.validate(), Err(ConfigError::SnakeOverlaps { x: 1, y: 1 }));
    }

    #[test]
    fn rejects_too_much_food() {
        let cfg = GameConfig { food_count: 98, ..GameConfig::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::NotEnoughFreeCells { requested: 98, free: 97 }));
        let cfg = GameConfig { food_count: 97, ..GameConfig::default() };
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_ga_settings() {
        let bad = [
            GaConfig { parents_mating: 0, ..GaConfig::default() },
            GaConfig { parents_mating: 51, ..GaConfig::default() },
            GaConfig { gene_low: 1.0, gene_high: 1.0, ..GaConfig::default() },
            GaConfig { mutation_percent_genes: 0.0, ..GaConfig::default() },
            GaConfig { mutation_percent_genes: 101.0, ..GaConfig::default() },
            GaConfig { generations: 0, ..GaConfig::default() },
            GaConfig { gene_low: f64::NEG_INFINITY, ..GaConfig::default() },
            GaConfig { gene_high: f64::INFINITY, ..GaConfig::default() },
            GaConfig { gene_low: f64::NAN, ..GaConfig::default() },
            GaConfig { gene_low: -1e308, gene_high: 1e308, ..GaConfig::default() },
            GaConfig { perturb_magnitude: f64::INFINITY, ..GaConfig::default() },
            GaConfig { perturb_magnitude: 0.0, ..GaConfig::default() },
        ];
        for cfg in bad {
            assert!(cfg.validate().is_err(), "{cfg:?}");
        }
    }

    #[test]
    fn run_config_serializes() {
        let json = serde_json::to_string(&RunConfig::default()).unwrap();
        assert!(json.contains("\"mutation\":\"random\""));
        let back: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RunConfig::default());
    }
}
