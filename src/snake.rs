use std::collections::{HashSet, VecDeque};
use std::fmt;

use crate::geometry::{in_bounds, Direction, Position};
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Crash {
    Wall,
    SelfBite,
}

impl fmt::Display for Crash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crash::Wall => write!(f, "hit a wall"),
            Crash::SelfBite => write!(f, "bit itself"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Position, ate: bool },
    Crashed(Crash),
}

impl MoveResult {
    pub fn ate(&self) -> bool {
        matches!(self, Moved { ate: true, .. })
    }

    #[cfg(test)]
    pub(crate) fn is_alive(&self) -> bool {
        matches!(self, Moved { .. })
    }
}

#[derive(Clone, Debug)]
pub struct Snake {
    // head at the front
    body: VecDeque<Position>,
    direction: Direction,
    pending_growth: u32,
}

impl Snake {
    /// Builds a straight snake with its head at `head`, trailing away from `direction`.
    /// A `length` of zero still yields a single segment.
    pub fn new(head: Position, length: usize, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| Position::new(head.x - dx * i, head.y - dy * i))
            .collect();
        Snake { body, direction, pending_growth: 0 }
    }

    pub fn body(&self) -> impl Iterator<Item = &Position> + '_ {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    /// Ignores requests to turn straight back into the neck.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if new_direction != self.direction.opposite() {
            self.direction = new_direction;
        }
    }

    pub fn occupies(&self, pos: Position, include_head: bool) -> bool {
        let skip = if include_head { 0 } else { 1 };
        self.body.iter().skip(skip).any(|seg| *seg == pos)
    }

    /// Advances one cell. On a crash the body is left untouched.
    pub fn step(&mut self, width: i32, height: i32, food: &HashSet<Position>) -> MoveResult {
        let new_head = self.head().offset(self.direction);

        if !in_bounds(new_head, width, height) {
            return Crashed(Crash::Wall);
        }

        // The tail cell is free to enter only if the tail leaves it on this same move.
        let tail_retracts = self.pending_growth == 0;
        if self.occupies(new_head, true) && !(tail_retracts && new_head == self.tail()) {
            return Crashed(Crash::SelfBite);
        }

        let ate = food.contains(&new_head);
        if ate {
            self.pending_growth += 1;
        }

        self.body.push_front(new_head);
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            self.body.pop_back();
        }

        Moved { new_head, ate }
    }
}

#[cfg(test)]
impl Snake {
    pub(crate) fn from_segments(segments: &[(i32, i32)], direction: Direction) -> Self {
        assert!(!segments.is_empty());
        let body = segments.iter().map(|&(x, y)| Position::new(x, y)).collect();
        Snake { body, direction, pending_growth: 0 }
    }
}
