//! Snake on a bounded grid, drawn in the terminal.
//!
//! The simulation ([`snake`], [`food`], [`game`]) is deterministic given an injected RNG; the
//! terminal only sees finished frames through [`board::FrameSink`].

pub mod board;
pub mod config;
pub mod food;
pub mod game;
pub mod geometry;
pub mod snake;
pub mod term;
