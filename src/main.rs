use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use grid_snake::config::{
    GameConfig, DEFAULT_BOARD_SIZE, DEFAULT_FOOD_TARGET, DEFAULT_FRAME_MS, DEFAULT_INITIAL_LENGTH,
};
use grid_snake::game::{self, Ending, Game};
use grid_snake::term::TermManager;

#[derive(Parser)]
#[command(name = "grid-snake", about = "Snake on a fixed grid. WASD or arrow keys to steer, Ctrl+C to quit.")]
struct Args {
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    width: i32,
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    height: i32,
    /// Milliseconds between ticks
    #[arg(long, default_value_t = DEFAULT_FRAME_MS)]
    frame_ms: u64,
    #[arg(long, default_value_t = DEFAULT_INITIAL_LENGTH)]
    initial_length: usize,
    /// Number of food items kept on the board
    #[arg(long, default_value_t = DEFAULT_FOOD_TARGET)]
    food: usize,
    /// Seed for food placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs here (the screen belongs to the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

impl Args {
    fn config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            frame_interval: Duration::from_millis(self.frame_ms),
            initial_length: self.initial_length,
            food_target: self.food,
            seed: self.seed,
        }
    }
}

fn init_logging(args: &Args) -> anyhow::Result<()> {
    if let Some(path) = &args.log_file {
        let file = File::create(path).with_context(|| format!("Error creating log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(args.log_level)
            .init();
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = args.config();
    config.validate()?;

    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, width = config.width, height = config.height, "starting session");
    let mut game = Game::new(&config, StdRng::seed_from_u64(seed));

    let mut term = TermManager::new();
    term.setup()?;
    let ending = game::play(&mut game, &mut term, config.frame_interval);
    term.restore()?;

    match ending? {
        Ending::Crashed(crash) => println!("Game over: the snake {}. Score: {}", crash, game.score()),
        Ending::Quit => println!("Quit. Score: {}", game.score()),
    }
    Ok(())
}
