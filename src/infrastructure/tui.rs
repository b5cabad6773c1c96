//! Terminal seam
//!
//! The app runner only talks to a [`TuiLike`]: [`real::RealTui`] drives the
//! user's terminal through crossterm, [`test::TestTui`] replays a scripted
//! event queue against an in-memory backend.

use std::{future::Future, pin::Pin};

use color_eyre::eyre::Result;
use crossterm::{
    cursor,
    event::KeyEvent,
    terminal::{self, LeaveAlternateScreen},
};
use ratatui::prelude::Rect;

pub mod real;

pub type IO = std::io::Stdout;
pub type Frame<'a> = ratatui::Frame<'a>;

pub fn io() -> IO {
    std::io::stdout()
}

/// Everything a terminal can hand to the runner
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The event task started
    Init,
    Quit,
    /// Reading the terminal failed
    Error,
    /// No more events will arrive
    Closed,
    Tick,
    /// Time to draw a frame
    Render,
    FocusGained,
    FocusLost,
    Paste(String),
    Key(KeyEvent),
    Resize(u16, u16),
}

pub type NextEvent<'a> = Pin<Box<dyn Future<Output = Option<Event>> + Send + 'a>>;

pub trait TuiLike: Send {
    /// Take over the terminal
    fn enter(&mut self) -> Result<()>;
    /// Hand the terminal back; safe to call twice
    fn exit(&mut self) -> Result<()>;
    fn draw(&mut self, f: &mut dyn FnMut(&mut Frame<'_>)) -> Result<()>;
    fn resize(&mut self, area: Rect) -> Result<()>;
    /// Next event, or `None` once the source is gone
    fn next(&mut self) -> NextEvent<'_>;
}

/// Put the terminal back into cooked mode, e.g. from a panic hook
pub fn restore() -> Result<()> {
    if terminal::is_raw_mode_enabled()? {
        crossterm::execute!(io(), LeaveAlternateScreen, cursor::Show)?;
        terminal::disable_raw_mode()?;
    }
    Ok(())
}
