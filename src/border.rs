use crate::snake::Position;

/// Outer wall of the playing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    pub width: usize,
    pub height: usize,
}

impl Border {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn is_inside(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Every cell, column-major.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.width as i32).flat_map(move |x| (0..self.height as i32).map(move |y| Position::new(x, y)))
    }

    /// Cells stepped along `delta` from `from` until the wall is crossed, the
    /// crossing step included, normalized by the longer side.
    pub fn distance_to_wall(&self, from: Position, delta: (i32, i32)) -> f64 {
        let mut pos = from;
        let mut distance = 0usize;
        while self.is_inside(pos) {
            pos = pos.moved_by(delta.0, delta.1);
            distance += 1;
        }
        distance as f64 / self.width.max(self.height) as f64
    }
}
