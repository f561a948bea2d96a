use crate::border::Border;
use crate::error::ConfigError;
use crate::snake::{Position, Snake};
use rand::Rng;
use rand::seq::SliceRandom;

/// Apples still on the board, in placement order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Food {
    cells: Vec<Position>,
}

impl Food {
    pub fn from_cells(cells: Vec<Position>) -> Self {
        Self { cells }
    }

    /// Samples `count` distinct cells not covered by the snake.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        border: &Border,
        snake: &Snake,
        count: usize,
    ) -> Result<Self, ConfigError> {
        let free: Vec<Position> = border.cells().filter(|c| !snake.contains(*c)).collect();
        if free.len() < count {
            return Err(ConfigError::NotEnoughFreeCells { requested: count, free: free.len() });
        }
        let cells = free.choose_multiple(rng, count).copied().collect();
        Ok(Self { cells })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Removes the apple at `pos`; false if there was none.
    pub fn take(&mut self, pos: Position) -> bool {
        match self.cells.iter().position(|c| *c == pos) {
            Some(idx) => {
                self.cells.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Manhattan-nearest apple to `from`, first one on ties.
    pub fn nearest(&self, from: Position) -> Option<Position> {
        let mut best: Option<(i32, Position)> = None;
        for &c in &self.cells {
            let d = from.manhattan(c);
            if best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, c));
            }
        }
        best.map(|(_, c)| c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn snake() -> Snake {
        Snake::from_cells(&[Position::new(1, 1), Position::new(0, 1)], Direction::Right)
    }

    #[test]
    fn spawn_avoids_snake_and_duplicates() {
        let mut rng = StdRng::seed_from_u64(7);
        let border = Border::new(3, 3);
        let food = Food::spawn(&mut rng, &border, &snake(), 7).unwrap();
        assert_eq!(food.len(), 7);
        for c in food.cells() {
            assert!(border.is_inside(*c));
            assert!(!snake().contains(*c));
        }
        let mut sorted = food.cells().to_vec();
        sorted.sort_by_key(|p| (p.x, p.y));
        sorted.dedup();
        assert_eq!(sorted.len(), 7);
    }

    #[test]
    fn spawn_rejects_overfull_board() {
        let mut rng = StdRng::seed_from_u64(7);
        let err = Food::spawn(&mut rng, &Border::new(3, 3), &snake(), 8).unwrap_err();
        assert_eq!(err, ConfigError::NotEnoughFreeCells { requested: 8, free: 7 });
    }

    #[test]
    fn spawn_is_reproducible_per_seed() {
        let a = Food::spawn(&mut StdRng::seed_from_u64(3), &Border::new(10, 10), &snake(), 5).unwrap();
        let b = Food::spawn(&mut StdRng::seed_from_u64(3), &Border::new(10, 10), &snake(), 5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn nearest_breaks_ties_by_order() {
        let food = Food::from_cells(vec![Position::new(3, 0), Position::new(0, 3), Position::new(1, 0)]);
        assert_eq!(food.nearest(Position::new(0, 0)), Some(Position::new(1, 0)));
        let tied = Food::from_cells(vec![Position::new(2, 0), Position::new(0, 2)]);
        assert_eq!(tied.nearest(Position::new(0, 0)), Some(Position::new(2, 0)));
        assert_eq!(Food::default().nearest(Position::new(0, 0)), None);
    }

    #[test]
    fn take_removes_once() {
        let mut food = Food::from_cells(vec![Position::new(1, 0), Position::new(2, 0)]);
        assert!(food.take(Position::new(1, 0)));
        assert!(!food.take(Position::new(1, 0)));
        assert_eq!(food.cells(), &[Position::new(2, 0)]);
    }
}
