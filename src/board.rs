use std::collections::HashSet;

use crate::geometry::{to_display, Position};
use crate::snake::Snake;

pub const EMPTY_CHAR: char = '#';
pub const FOOD_CHAR: char = '@';
pub const SNAKE_CHAR: char = 'O';

/// Anything that can show a finished frame.
pub trait FrameSink {
    fn present(&mut self, board: &Board) -> anyhow::Result<()>;
}

/// Render buffer rebuilt from scratch every tick. Row 0 is the top of the screen.
pub struct Board {
    width: i32,
    height: i32,
    grid: Vec<char>,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Self {
        let grid = vec![EMPTY_CHAR; width.max(0) as usize * height.max(0) as usize];
        Board { width, height, grid }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn clear(&mut self) {
        self.grid.iter_mut().for_each(|c| *c = EMPTY_CHAR);
    }

    pub fn draw_food(&mut self, food: &HashSet<Position>) {
        for pos in food {
            self.put(*pos, FOOD_CHAR);
        }
    }

    pub fn draw_snake(&mut self, snake: &Snake) {
        for pos in snake.body() {
            self.put(*pos, SNAKE_CHAR);
        }
    }

    #[cfg(test)]
    pub(crate) fn cell(&self, col: i32, row: i32) -> Option<char> {
        self.index(col, row).map(|i| self.grid[i])
    }

    /// Display rows, top first, cells separated by a space.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.grid.chunks(self.width.max(1) as usize).map(|row| {
            let mut line = String::with_capacity(row.len() * 2);
            for (i, ch) in row.iter().enumerate() {
                if i > 0 {
                    line.push(' ');
                }
                line.push(*ch);
            }
            line
        })
    }

    fn put(&mut self, pos: Position, ch: char) {
        let (col, row) = to_display(pos, self.height);
        if let Some(i) = self.index(col, row) {
            self.grid[i] = ch;
        }
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if (0..self.width).contains(&col) && (0..self.height).contains(&row) {
            Some(row as usize * self.width as usize + col as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction;

    #[test]
    fn fresh_board_is_empty() {
        let board = Board::new(3, 2);
        let rows: Vec<_> = board.rows().collect();
        assert_eq!(rows, vec!["# # #", "# # #"]);
    }

    #[test]
    fn snake_is_drawn_over_food() {
        let mut board = Board::new(4, 3);
        let snake = Snake::new(Position::new(1, 0), 2, Direction::Right);
        let food: HashSet<_> = [Position::new(1, 0), Position::new(3, 2)].into_iter().collect();

        board.draw_food(&food);
        board.draw_snake(&snake);

        let rows: Vec<_> = board.rows().collect();
        assert_eq!(rows, vec!["# # # @", "# # # #", "O O # #"]);
    }

    #[test]
    fn clear_wipes_previous_frame() {
        let mut board = Board::new(2, 2);
        board.draw_snake(&Snake::new(Position::new(1, 1), 2, Direction::Right));
        assert_eq!(board.cell(0, 0), Some(SNAKE_CHAR));

        board.clear();
        assert!(board.rows().all(|r| r == "# #"));
    }

    #[test]
    fn index_does_not_overflow_on_huge_boards() {
        // No grid allocated: only the index arithmetic is under test.
        let board = Board { width: 50_000, height: 50_000, grid: Vec::new() };
        assert_eq!(board.index(49_999, 49_999), Some(2_499_999_999));
        assert_eq!(board.index(50_000, 0), None);
    }

    #[test]
    fn off_board_cells_are_skipped() {
        let mut board = Board::new(2, 2);
        let food: HashSet<_> = [Position::new(5, 5), Position::new(-1, 0)].into_iter().collect();
        board.draw_food(&food);

        assert!(board.rows().all(|r| r == "# #"));
        assert_eq!(board.cell(2, 0), None);
    }
}
