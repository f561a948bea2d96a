use crate::brain::Brain;
use crate::config::GameConfig;
use crate::error::SimError;
use crate::game::Game;
use crate::snake::Position;
use rand::Rng;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Won,
    Died,
    StepLimit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStep {
    pub step: usize,
    pub action: usize,
    pub reward: f64,
    pub score: u32,
    pub snake: Vec<Position>,
    pub food: Vec<Position>,
}

/// Step-by-step record of one episode under a fixed policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeTrace {
    pub start_snake: Vec<Position>,
    pub start_food: Vec<Position>,
    pub steps: Vec<TraceStep>,
    pub outcome: Outcome,
    pub total_reward: f64,
}

impl EpisodeTrace {
    pub fn remaining_food(&self) -> &[Position] {
        self.steps.last().map_or(&self.start_food, |s| &s.food)
    }

    pub fn score(&self) -> u32 {
        self.steps.last().map_or(0, |s| s.score)
    }
}

/// Plays one episode of at most `max_steps` with `brain` choosing every move.
pub fn run_episode<R: Rng>(config: GameConfig, brain: &Brain, max_steps: usize, rng: R) -> Result<EpisodeTrace, SimError> {
    let mut game = Game::new(config, rng)?;
    let mut state = game.state();
    let start_snake: Vec<Position> = game.snake().body().collect();
    let start_food = game.food().cells().to_vec();
    let mut steps = Vec::new();
    let mut total_reward = 0.0;

    while !game.is_done() && steps.len() < max_steps {
        let action = brain.decide(&state);
        let out = game.step(action)?;
        total_reward += out.reward;
        state = out.state;
        steps.push(TraceStep {
            step: steps.len() + 1,
            action,
            reward: out.reward,
            score: game.score(),
            snake: game.snake().body().collect(),
            food: game.food().cells().to_vec(),
        });
    }

    let outcome = match (game.is_done(), game.food().is_empty()) {
        (true, true) => Outcome::Won,
        (true, false) => Outcome::Died,
        (false, _) => Outcome::StepLimit,
    };
    Ok(EpisodeTrace { start_snake, start_food, steps, outcome, total_reward })
}

struct Cells<'a>(&'a [Position]);

impl fmt::Display for Cells<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for EpisodeTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Starting test: snake={}, apples={}", Cells(&self.start_snake), Cells(&self.start_food))?;
        for s in &self.steps {
            writeln!(
                f,
                "Step {} | Action: {} | Reward: {} | Score: {} | Snake: {} | Remaining apples: {}",
                s.step,
                s.action,
                s.reward,
                s.score,
                Cells(&s.snake),
                Cells(&s.food)
            )?;
        }
        writeln!(f)?;
        match self.outcome {
            Outcome::Won => write!(f, "All apples eaten!"),
            _ => write!(f, "Game ended. Apples remaining: {}", Cells(self.remaining_food())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::{NUM_ACTIONS, total_weights};
    use crate::game_input::feature;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn always(action: usize) -> Brain {
        let mut w = vec![0.0; total_weights()];
        for f in feature::HEADING_UP..=feature::HEADING_RIGHT {
            w[f * NUM_ACTIONS + action] = 1.0;
        }
        Brain::new(w).unwrap()
    }

    #[test]
    fn single_apple_straight_ahead_is_won() {
        let config = GameConfig {
            grid_width: 5,
            grid_height: 1,
            initial_snake: vec![Position::new(0, 0)],
            food_count: 4,
        };
        let trace = run_episode(config, &always(1), 50, StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(trace.outcome, Outcome::Won);
        assert_eq!(trace.steps.len(), 4);
        assert_eq!(trace.score(), 4);
        let rewards: Vec<f64> = trace.steps.iter().map(|s| s.reward).collect();
        assert_eq!(rewards, vec![10.0, 10.0, 10.0, 50.0]);
        assert_eq!(trace.total_reward, 80.0);
        assert!(trace.to_string().ends_with("All apples eaten!"));
    }

    #[test]
    fn running_into_a_wall_is_a_loss() {
        let config = GameConfig { initial_snake: vec![Position::new(9, 5)], food_count: 1, ..GameConfig::default() };
        let trace = run_episode(config, &always(1), 50, StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(trace.outcome, Outcome::Died);
        assert_eq!(trace.steps.len(), 1);
        assert_eq!(trace.steps[0].reward, -10.0);
        assert_eq!(trace.remaining_food().len(), 1);
        assert!(trace.to_string().contains("Game ended. Apples remaining: [("));
    }

    #[test]
    fn step_limit_is_reported() {
        let trace = run_episode(GameConfig::default(), &always(1), 2, StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(trace.steps.len(), 2);
        assert_eq!(trace.steps[1].step, 2);
        assert_eq!(trace.outcome, Outcome::StepLimit);
    }

    #[test]
    fn trace_lines_match_console_format() {
        let config = GameConfig {
            grid_width: 3,
            grid_height: 1,
            initial_snake: vec![Position::new(0, 0)],
            food_count: 2,
        };
        let text = run_episode(config, &always(1), 10, StdRng::seed_from_u64(0)).unwrap().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("Starting test: snake=[(0, 0)], apples=["));
        assert_eq!(
            lines[1],
            "Step 1 | Action: 1 | Reward: 10 | Score: 1 | Snake: [(1, 0), (0, 0)] | Remaining apples: [(2, 0)]"
        );
        assert_eq!(
            lines[2],
            "Step 2 | Action: 1 | Reward: 50 | Score: 2 | Snake: [(2, 0), (1, 0), (0, 0)] | Remaining apples: []"
        );
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "All apples eaten!");
    }

    #[test]
    fn serializes_to_json() {
        let trace = run_episode(GameConfig::small(), &always(1), 3, StdRng::seed_from_u64(1)).unwrap();
        let json = serde_json::to_value(&trace).unwrap();
        assert!(json["steps"].is_array());
        assert!(json["outcome"].is_string());
    }
}
