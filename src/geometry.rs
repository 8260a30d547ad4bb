use Direction::*;

/// A cell on the board in logical coordinates: origin bottom-left, y grows upward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Right,
    Up,
    Left,
    Down,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Right => (1, 0),
            Up => (0, 1),
            Left => (-1, 0),
            Down => (0, -1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Right => Left,
            Up => Down,
            Left => Right,
            Down => Up,
        }
    }

    /// Maps the `wasd` movement keys, ignoring case.
    pub fn from_key(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'w' => Some(Up),
            's' => Some(Down),
            'a' => Some(Left),
            'd' => Some(Right),
            _ => None,
        }
    }
}

pub fn in_bounds(pos: Position, width: i32, height: i32) -> bool {
    (0..width).contains(&pos.x) && (0..height).contains(&pos.y)
}

/// Logical position to display `(col, row)`, where row 0 is the top of the screen.
pub fn to_display(pos: Position, height: i32) -> (i32, i32) {
    (pos.x, height - 1 - pos.y)
}

pub fn from_display(col: i32, row: i32, height: i32) -> Position {
    Position::new(col, height - 1 - row)
}
