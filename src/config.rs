use std::time::Duration;

use thiserror::Error;

use crate::geometry::Position;

pub const DEFAULT_BOARD_SIZE: i32 = 15;
pub const DEFAULT_FRAME_MS: u64 = 150;
pub const DEFAULT_INITIAL_LENGTH: usize = 3;
pub const DEFAULT_FOOD_TARGET: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must be at least 1x1, got {width}x{height}")]
    EmptyBoard { width: i32, height: i32 },
    #[error("initial snake length must be at least 1")]
    NoSnake,
    #[error("a snake of length {length} does not fit left of the centre of a {width}-wide board")]
    SnakeTooLong { length: usize, width: i32 },
    #[error("frame interval must be positive")]
    ZeroFrameInterval,
}

/// Session parameters, fixed once the game starts.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub frame_interval: Duration,
    pub initial_length: usize,
    pub food_target: usize,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: DEFAULT_BOARD_SIZE,
            height: DEFAULT_BOARD_SIZE,
            frame_interval: Duration::from_millis(DEFAULT_FRAME_MS),
            initial_length: DEFAULT_INITIAL_LENGTH,
            food_target: DEFAULT_FOOD_TARGET,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 1 || self.height < 1 {
            return Err(ConfigError::EmptyBoard { width: self.width, height: self.height });
        }
        if self.initial_length == 0 {
            return Err(ConfigError::NoSnake);
        }
        if self.initial_length > (self.width / 2 + 1) as usize {
            return Err(ConfigError::SnakeTooLong { length: self.initial_length, width: self.width });
        }
        if self.frame_interval.is_zero() {
            return Err(ConfigError::ZeroFrameInterval);
        }
        Ok(())
    }

    pub fn start_position(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_and_centred() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.start_position(), Position::new(7, 7));
    }

    #[test]
    fn rejects_degenerate_settings() {
        let base = GameConfig::default();

        let c = GameConfig { width: 0, ..base.clone() };
        assert_eq!(c.validate(), Err(ConfigError::EmptyBoard { width: 0, height: 15 }));

        let c = GameConfig { initial_length: 0, ..base.clone() };
        assert_eq!(c.validate(), Err(ConfigError::NoSnake));

        let c = GameConfig { width: 4, initial_length: 4, ..base.clone() };
        assert_eq!(c.validate(), Err(ConfigError::SnakeTooLong { length: 4, width: 4 }));

        let c = GameConfig { frame_interval: Duration::ZERO, ..base };
        assert_eq!(c.validate(), Err(ConfigError::ZeroFrameInterval));
    }

    #[test]
    fn snake_may_touch_the_left_wall() {
        let c = GameConfig { width: 4, initial_length: 3, ..GameConfig::default() };
        assert_eq!(c.validate(), Ok(()));
    }
}
