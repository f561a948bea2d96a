use thiserror::Error;

/// Rejected configuration, caught before any episode runs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("initial snake must contain at least one cell")]
    EmptySnake,
    #[error("initial snake cell ({x}, {y}) lies outside the grid")]
    SnakeOutOfBounds { x: i32, y: i32 },
    #[error("initial snake visits ({x}, {y}) twice")]
    SnakeOverlaps { x: i32, y: i32 },
    #[error("initial snake segment {index} is not adjacent to the previous one")]
    SnakeNotContiguous { index: usize },
    #[error("food count must be non-zero")]
    NoFood,
    #[error("cannot place {requested} food cells, only {free} cells are free")]
    NotEnoughFreeCells { requested: usize, free: usize },
    #[error("food cell ({x}, {y}) is outside the grid or on the snake")]
    FoodMisplaced { x: i32, y: i32 },
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("policy needs {expected} weights, got {actual}")]
    WeightCount { expected: usize, actual: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("action index {0} is outside the action table")]
    InvalidAction(usize),
}

/// Anything that can stop an episode from being simulated at all.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error(transparent)]
    Env(#[from] EnvError),
}
