use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, warn};

use crate::geometry::Position;
use crate::snake::Snake;

/// Attempts allowed for placing `count` items: enough to succeed on anything short of a nearly
/// full board.
pub fn default_attempt_budget(count: usize) -> usize {
    count * 50 + 500
}

#[derive(Clone, Debug, Default)]
pub struct Food {
    positions: HashSet<Position>,
}

impl Food {
    pub fn new() -> Self {
        Food::default()
    }

    pub fn positions(&self) -> &HashSet<Position> {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    /// Places up to `count` items on free cells, sampling uniformly and giving up after
    /// `max_attempts` draws. Returns how many were placed.
    pub fn spawn<R: Rng>(
        &mut self,
        count: usize,
        width: i32,
        height: i32,
        snake: &Snake,
        max_attempts: usize,
        rng: &mut R,
    ) -> usize {
        if count == 0 || width <= 0 || height <= 0 {
            return 0;
        }

        let mut placed = 0;
        let mut attempts = 0;
        while placed < count && attempts < max_attempts {
            attempts += 1;
            let candidate = Position::new(rng.gen_range(0..width), rng.gen_range(0..height));
            if snake.occupies(candidate, true) || !self.positions.insert(candidate) {
                continue;
            }
            debug!(x = candidate.x, y = candidate.y, "food placed");
            placed += 1;
        }

        if placed < count {
            warn!(requested = count, placed, attempts, "food placement budget exhausted");
        }
        placed
    }

    pub fn eat_at(&mut self, pos: Position) {
        self.positions.remove(&pos);
    }
}

#[cfg(test)]
impl Food {
    pub(crate) fn place(&mut self, pos: Position) {
        self.positions.insert(pos);
    }
}
