use std::thread::sleep;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::board::{Board, FrameSink};
use crate::config::GameConfig;
use crate::food::{default_attempt_budget, Food};
use crate::geometry::Direction;
use crate::snake::{Crash, MoveResult, Snake};

/// What the player asked for since the previous tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Idle,
    Turn(Direction),
    Quit,
}

pub trait InputSource {
    /// Must not block.
    fn poll_input(&mut self) -> anyhow::Result<Input>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Over(Crash),
}

/// Why the outer loop stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ending {
    Crashed(Crash),
    Quit,
}

/// One game session: owns the snake, the food and the render buffer.
pub struct Game<R> {
    snake: Snake,
    food: Food,
    board: Board,
    food_target: usize,
    score: u32,
    rng: R,
}

impl<R: Rng> Game<R> {
    pub fn new(config: &GameConfig, mut rng: R) -> Self {
        let snake = Snake::new(config.start_position(), config.initial_length, Direction::Right);
        let mut food = Food::new();
        food.spawn(
            config.food_target,
            config.width,
            config.height,
            &snake,
            default_attempt_budget(config.food_target),
            &mut rng,
        );

        Game {
            snake,
            food,
            board: Board::new(config.width, config.height),
            food_target: config.food_target,
            score: 0,
            rng,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn head_on_food(&self) -> bool {
        self.food.contains(self.snake.head())
    }

    /// Simulation half of a tick: turn, move, then settle the food.
    pub fn tick(&mut self, turn: Option<Direction>) -> Status {
        if let Some(dir) = turn {
            self.snake.set_direction(dir);
        }

        let (width, height) = (self.board.width(), self.board.height());
        let moved = self.snake.step(width, height, self.food.positions());
        if let MoveResult::Crashed(crash) = moved {
            return Status::Over(crash);
        }

        if moved.ate() {
            let head = self.snake.head();
            self.food.eat_at(head);
            self.score += 1;
            debug!(x = head.x, y = head.y, score = self.score, "food eaten");
        }

        if self.food.len() < self.food_target {
            let missing = self.food_target - self.food.len();
            self.food.spawn(
                missing,
                width,
                height,
                &self.snake,
                default_attempt_budget(missing),
                &mut self.rng,
            );
        }

        Status::Running
    }

    pub fn render<S: FrameSink>(&mut self, sink: &mut S) -> anyhow::Result<()> {
        self.board.clear();
        self.board.draw_food(self.food.positions());
        self.board.draw_snake(&self.snake);
        sink.present(&self.board)
    }

    /// A full tick. Nothing is drawn once the snake has crashed.
    pub fn run<S: FrameSink>(&mut self, turn: Option<Direction>, sink: &mut S) -> anyhow::Result<Status> {
        let status = self.tick(turn);
        if status == Status::Running {
            self.render(sink)?;
        }
        Ok(status)
    }
}

/// Drives ticks until a crash or a quit request, waiting `interval` after each frame.
pub fn play<R, T>(game: &mut Game<R>, term: &mut T, interval: Duration) -> anyhow::Result<Ending>
where
    R: Rng,
    T: InputSource + FrameSink,
{
    game.render(term)?;

    loop {
        let turn = match term.poll_input()? {
            Input::Quit => return Ok(Ending::Quit),
            Input::Turn(dir) => Some(dir),
            Input::Idle => None,
        };

        if let Status::Over(crash) = game.run(turn, term)? {
            info!(reason = %crash, score = game.score(), length = game.snake().len(), "game over");
            return Ok(Ending::Crashed(crash));
        }

        sleep(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction::*;
    use crate::geometry::Position;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Vec<String>>,
        inputs: VecDeque<Input>,
    }

    impl FrameSink for Recorder {
        fn present(&mut self, board: &Board) -> anyhow::Result<()> {
            self.frames.push(board.rows().collect());
            Ok(())
        }
    }

    impl InputSource for Recorder {
        fn poll_input(&mut self) -> anyhow::Result<Input> {
            Ok(self.inputs.pop_front().unwrap_or(Input::Idle))
        }
    }

    fn new_game(seed: u64) -> Game<StdRng> {
        Game::new(&GameConfig::default(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn starts_with_target_food_off_the_snake() {
        let game = new_game(1);
        assert_eq!(game.food().len(), 3);
        assert_eq!(game.snake().head(), Position::new(7, 7));
        for pos in game.food().positions() {
            assert!(!game.snake().occupies(*pos, true));
        }
    }

    #[test]
    fn eaten_food_is_replaced() {
        let mut game = new_game(2);
        game.food = Food::new();
        game.food.place(Position::new(8, 7));

        assert_eq!(game.tick(None), Status::Running);
        assert_eq!(game.score(), 1);
        assert_eq!(game.snake().len(), 4);
        assert_eq!(game.snake().pending_growth(), 0);
        assert!(!game.food().contains(Position::new(8, 7)));
        assert_eq!(game.food().len(), 3);
        assert!(!game.head_on_food());
    }

    #[test]
    fn reversal_input_is_ignored() {
        let mut game = new_game(3);
        game.tick(Some(Left));
        assert_eq!(game.snake().head(), Position::new(8, 7));
        assert_eq!(game.snake().direction(), Right);
    }

    #[test]
    fn running_into_the_wall_ends_without_a_frame() {
        let mut game = new_game(4);
        game.food = Food::new();
        game.food_target = 0;
        let mut sink = Recorder::default();

        for _ in 0..7 {
            assert_eq!(game.run(None, &mut sink).unwrap(), Status::Running);
        }
        assert_eq!(game.snake().head(), Position::new(14, 7));

        assert_eq!(game.run(None, &mut sink).unwrap(), Status::Over(Crash::Wall));
        assert_eq!(sink.frames.len(), 7);
        assert_eq!(game.snake().head(), Position::new(14, 7));
    }

    #[test]
    fn frames_show_snake_and_food() {
        let mut game = new_game(5);
        game.food = Food::new();
        game.food.place(Position::new(0, 0));
        game.food_target = 1;
        let mut sink = Recorder::default();
        game.run(Some(Up), &mut sink).unwrap();

        let frame = &sink.frames[0];
        assert_eq!(frame.len(), 15);
        // Head moved to (7,8), which is display row 6.
        assert_eq!(frame[6].split(' ').nth(7), Some("O"));
        let snake_cells: usize = frame.iter().map(|r| r.matches('O').count()).sum();
        let food_cells: usize = frame.iter().map(|r| r.matches('@').count()).sum();
        assert_eq!(snake_cells, 3);
        assert_eq!(food_cells, 1);
        assert_eq!(frame[14].split(' ').next(), Some("@"));
    }

    #[test]
    fn play_stops_on_quit() {
        let mut game = new_game(6);
        let mut term = Recorder::default();
        term.inputs.extend([Input::Turn(Up), Input::Quit]);

        let ending = play(&mut game, &mut term, Duration::from_millis(1)).unwrap();
        assert_eq!(ending, Ending::Quit);
        // Opening frame plus one tick.
        assert_eq!(term.frames.len(), 2);
        assert_eq!(game.snake().head(), Position::new(7, 8));
    }

    #[test]
    fn queued_turns_make_a_u_turn_over_two_ticks() {
        let mut game = new_game(8);
        game.food = Food::new();
        game.food_target = 0;
        let mut term = Recorder::default();
        term.inputs.extend([Input::Turn(Up), Input::Turn(Left), Input::Quit]);

        play(&mut game, &mut term, Duration::from_millis(1)).unwrap();

        assert_eq!(game.snake().direction(), Left);
        let body: Vec<_> = game.snake().body().copied().collect();
        assert_eq!(body, vec![Position::new(6, 8), Position::new(7, 8), Position::new(7, 7)]);
    }

    #[test]
    fn play_reports_the_crash() {
        let mut game = new_game(7);
        game.food = Food::new();
        game.food_target = 0;
        let mut term = Recorder::default();
        term.inputs.push_back(Input::Turn(Down));

        let ending = play(&mut game, &mut term, Duration::from_millis(1)).unwrap();
        assert_eq!(ending, Ending::Crashed(Crash::Wall));
        assert_eq!(game.snake().head(), Position::new(7, 0));
    }
}
