use crate::border::Border;
use crate::config::GameConfig;
use crate::error::{ConfigError, EnvError};
use crate::food::Food;
use crate::game_input::{GameInput, State};
use crate::snake::{ACTIONS, DEFAULT_ACTION, Direction, Position, Snake};
use rand::Rng;

pub const STEP_REWARD: f64 = -0.2;
pub const COLLISION_REWARD: f64 = -10.0;
pub const FOOD_REWARD: f64 = 10.0;
pub const WIN_REWARD: f64 = 50.0;

/// What `step` hands back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub state: State,
    pub reward: f64,
    pub done: bool,
}

/// Snake environment: owns the board and the random source used to place food.
pub struct Game<R: Rng> {
    config: GameConfig,
    border: Border,
    snake: Snake,
    food: Food,
    score: u32,
    frame: u32,
    done: bool,
    rng: R,
}

impl<R: Rng> Game<R> {
    /// Validates `config` and resets the board once.
    pub fn new(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let border = config.border();
        let snake = Snake::from_cells(&config.initial_snake, ACTIONS[DEFAULT_ACTION]);
        let mut game = Game {
            config,
            border,
            snake,
            food: Food::default(),
            score: 0,
            frame: 0,
            done: false,
            rng,
        };
        game.reset()?;
        Ok(game)
    }

    /// Builds a game from explicit parts, bypassing food sampling.
    /// `config` is validated; every food cell must be inside the grid and off the snake.
    pub fn with_layout(config: GameConfig, snake: Snake, food: Food, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let border = config.border();
        if snake.is_empty() {
            return Err(ConfigError::EmptySnake);
        }
        if let Some(c) = snake.body().find(|&c| !border.is_inside(c)) {
            return Err(ConfigError::SnakeOutOfBounds { x: c.x, y: c.y });
        }
        if let Some(c) = food.cells().iter().find(|&&c| !border.is_inside(c) || snake.contains(c)) {
            return Err(ConfigError::FoodMisplaced { x: c.x, y: c.y });
        }
        Ok(Game { config, border, snake, food, score: 0, frame: 0, done: false, rng })
    }

    /// Starts a new episode with freshly sampled food.
    pub fn reset(&mut self) -> Result<State, ConfigError> {
        self.done = false;
        self.score = 0;
        self.frame = 0;
        self.snake = Snake::from_cells(&self.config.initial_snake, ACTIONS[DEFAULT_ACTION]);
        self.food = Food::spawn(&mut self.rng, &self.border, &self.snake, self.config.food_count)?;
        Ok(self.state())
    }

    pub fn step(&mut self, action: usize) -> Result<StepOutcome, EnvError> {
        if self.done {
            return Ok(StepOutcome { state: self.state(), reward: 0.0, done: true });
        }
        let requested = Direction::from_action(action).ok_or(EnvError::InvalidAction(action))?;

        self.snake.steer(requested);
        let new_head = self.snake.head().moved_in_direction(self.snake.direction);

        if self.is_collision(new_head) {
            self.done = true;
            return Ok(StepOutcome { state: self.state(), reward: COLLISION_REWARD, done: true });
        }

        let mut reward = STEP_REWARD;
        let ate = self.food.take(new_head);
        self.snake.advance(new_head, ate);
        if ate {
            self.score += 1;
            reward = FOOD_REWARD;
            if self.food.is_empty() {
                self.done = true;
                reward = WIN_REWARD;
            }
        }

        self.frame += 1;
        Ok(StepOutcome { state: self.state(), reward, done: self.done })
    }

    /// Out of bounds or on any current body cell, tail included.
    pub fn is_collision(&self, pos: Position) -> bool {
        !self.border.is_inside(pos) || self.snake.contains(pos)
    }

    pub fn state(&self) -> State {
        GameInput::from_game(self)
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn border(&self) -> &Border {
        &self.border
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}
