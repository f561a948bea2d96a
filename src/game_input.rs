use crate::game::Game;
use crate::snake::{Direction, Position};
use rand::Rng;

/// Length of the feature vector fed to the policy.
pub const NUM_FEATURES: usize = 24;

pub type State = [f64; NUM_FEATURES];

/// Index of each feature inside [`State`].
pub mod feature {
    pub const DANGER_STRAIGHT: usize = 0;
    pub const DANGER_LEFT: usize = 1;
    pub const DANGER_RIGHT: usize = 2;
    pub const WALL_STRAIGHT: usize = 3;
    pub const WALL_LEFT: usize = 4;
    pub const WALL_RIGHT: usize = 5;
    pub const BODY_STRAIGHT: usize = 6;
    pub const BODY_LEFT: usize = 7;
    pub const BODY_RIGHT: usize = 8;
    pub const FOOD_DX: usize = 9;
    pub const FOOD_DY: usize = 10;
    pub const HEADING_UP: usize = 11;
    pub const HEADING_DOWN: usize = 12;
    pub const HEADING_LEFT: usize = 13;
    pub const HEADING_RIGHT: usize = 14;
    pub const FOOD_LEFT: usize = 15;
    pub const TAIL_DISTANCE: usize = 16;
    pub const FOOD_DISTANCE_SUM: usize = 17;
    pub const FOOD_DISTANCE_MEAN: usize = 18;
    pub const QUADRANT_0: usize = 19;
    pub const EMPTY_FRACTION: usize = 23;
}

// body lookahead depth per relative direction
const BODY_DEPTH_STRAIGHT: i32 = 2;
const BODY_DEPTH_LEFT: i32 = 3;
const BODY_DEPTH_RIGHT: i32 = 4;

pub struct GameInput;

impl GameInput {
    pub fn from_game<R: Rng>(game: &Game<R>) -> State {
        let mut input = [0.0f64; NUM_FEATURES];
        let border = game.border();
        let snake = game.snake();
        let food = game.food().cells();
        let head = snake.head();
        let heading = snake.direction;
        let (w, h) = (border.width as f64, border.height as f64);

        let straight = heading.delta();
        let left = heading.left().delta();
        let right = heading.right().delta();

        //danger one step away
        for (i, d) in [straight, left, right].into_iter().enumerate() {
            input[feature::DANGER_STRAIGHT + i] = flag(game.is_collision(head.moved_by(d.0, d.1)));
        }

        //walls only, the body is ignored here
        for (i, d) in [straight, left, right].into_iter().enumerate() {
            input[feature::WALL_STRAIGHT + i] = border.distance_to_wall(head, d);
        }

        input[feature::BODY_STRAIGHT] = flag(snake.body_within(straight, BODY_DEPTH_STRAIGHT));
        input[feature::BODY_LEFT] = flag(snake.body_within(left, BODY_DEPTH_LEFT));
        input[feature::BODY_RIGHT] = flag(snake.body_within(right, BODY_DEPTH_RIGHT));

        let target = game.food().nearest(head).unwrap_or(head);
        input[feature::FOOD_DX] = (target.x - head.x) as f64 / w;
        input[feature::FOOD_DY] = (target.y - head.y) as f64 / h;

        let heading_index = match heading {
            Direction::Up => feature::HEADING_UP,
            Direction::Down => feature::HEADING_DOWN,
            Direction::Left => feature::HEADING_LEFT,
            Direction::Right => feature::HEADING_RIGHT,
        };
        input[heading_index] = 1.0;

        input[feature::FOOD_LEFT] = food.len() as f64;
        input[feature::TAIL_DISTANCE] = head.manhattan(snake.tail()) as f64 / (w + h);

        let (sum, mean) = Self::food_distances(head, food, w + h);
        input[feature::FOOD_DISTANCE_SUM] = sum;
        input[feature::FOOD_DISTANCE_MEAN] = mean;

        let quadrants = Self::food_quadrants(food, border.width, border.height);
        input[feature::QUADRANT_0..feature::QUADRANT_0 + 4].copy_from_slice(&quadrants);

        let cells = border.cell_count();
        let empty = cells as f64 - snake.len() as f64 - food.len() as f64;
        input[feature::EMPTY_FRACTION] = empty / cells as f64;

        input
    }

    /// (sum / (n * norm), mean / norm) of head-to-apple Manhattan distances.
    fn food_distances(head: Position, food: &[Position], norm: f64) -> (f64, f64) {
        if food.is_empty() {
            return (0.0, 0.0);
        }
        let total: i32 = food.iter().map(|c| head.manhattan(*c)).sum();
        let n = food.len() as f64;
        (total as f64 / (n * norm), total as f64 / n / norm)
    }

    /// Share of apples per quadrant, split at the grid midlines.
    fn food_quadrants(food: &[Position], width: usize, height: usize) -> [f64; 4] {
        let mut counts = [0usize; 4];
        for c in food {
            // c < width / 2 as reals
            let west = (c.x as i64) * 2 < width as i64;
            let south = (c.y as i64) * 2 < height as i64;
            let q = match (west, south) {
                (true, true) => 0,
                (false, true) => 1,
                (true, false) => 2,
                (false, false) => 3,
            };
            counts[q] += 1;
        }
        let n = food.len().max(1) as f64;
        counts.map(|k| k as f64 / n)
    }
}

fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}
