//! Terminal User Interface for show-browser using ratatui.
//!
//! The [`App`] is the presenter the browsing session draws into.

mod render;
mod state;
mod types;

pub use render::draw;
pub use state::App;
pub use types::Action;

use crossterm::event::{self, Event};
use std::io;
use std::time::Duration;

/// Poll for keyboard events with a timeout.
pub fn poll_event(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}
