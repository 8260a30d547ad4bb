use std::collections::VecDeque;
use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};

use crate::board::{Board, FrameSink};
use crate::game::{Input, InputSource};
use crate::geometry::Direction;

/// Keys typed but not yet acted on. One direction is released per tick.
#[derive(Default)]
struct KeyQueue {
    turns: VecDeque<Direction>,
    quit: bool,
}

impl KeyQueue {
    fn push(&mut self, ev: KeyEvent) {
        if is_ctrl_c(&ev) {
            self.quit = true;
        } else if let Some(dir) = key_direction(ev.code) {
            self.turns.push_back(dir);
        }
    }

    fn next_input(&mut self) -> Input {
        if self.quit {
            return Input::Quit;
        }
        self.turns.pop_front().map_or(Input::Idle, Input::Turn)
    }
}

pub struct TermManager {
    stdout: Stdout,
    keys: KeyQueue,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), keys: KeyQueue::default() }
    }

    pub fn setup(&mut self) -> anyhow::Result<()> {
        enter_screen(&mut self.stdout, terminal::enable_raw_mode)
    }

    pub fn restore(&mut self) -> anyhow::Result<()> {
        terminal::disable_raw_mode().context("Error unsetting raw mode")?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }

    fn read_key_events_queue(&self) -> anyhow::Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0)).context("Error polling input")? {
            if let Event::Key(ev) = read().context("Error reading input")? {
                events.push(ev);
            }
        }

        Ok(events)
    }
}

impl InputSource for TermManager {
    /// Buffers everything typed since the last tick and hands out the oldest direction.
    fn poll_input(&mut self) -> anyhow::Result<Input> {
        for ev in self.read_key_events_queue()? {
            self.keys.push(ev);
        }
        Ok(self.keys.next_input())
    }
}

impl FrameSink for TermManager {
    fn present(&mut self, board: &Board) -> anyhow::Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;

        // Raw mode does not turn '\n' into a carriage return, so position each row explicitly.
        for (row, line) in board.rows().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, row as u16), style::Print(line))
                .context("Error drawing board")?;
        }

        self.stdout.flush().context("Error flushing")?;
        Ok(())
    }
}

/// Leaves the alternate screen again if raw mode cannot be enabled.
fn enter_screen<W: Write>(
    out: &mut W,
    enable_raw_mode: impl FnOnce() -> crossterm::Result<()>,
) -> anyhow::Result<()> {
    execute!(out, EnterAlternateScreen, cursor::Hide, cursor::DisableBlinking)
        .context("Error entering alt screen")?;
    if let Err(err) = enable_raw_mode() {
        let _ = execute!(out, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen);
        return Err(err).context("Error setting raw mode");
    }
    Ok(())
}

fn key_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Char(ch) => Direction::from_key(ch),
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
