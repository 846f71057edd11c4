//! Terminal User Interface for show-browser using ratatui.
//!
//! This module provides the full-screen renderer: a search bar, a selector
//! panel, and a card list with a details pane.

mod render;
mod state;
mod types;

pub use render::draw;
pub use state::{TuiView, ViewState};
pub use types::{Action, ContentKind, Focus, Listing, SelectorOption, SelectorValue};

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
