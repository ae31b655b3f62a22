//! TUI type definitions for rows and actions.

use show_browser::types::ShowId;
use show_browser::view::{EpisodePick, ShowPick};

/// What a list row points at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowKey {
    Show(ShowId),
    /// Load-time key of an episode.
    Episode(usize),
}

/// One rendered list row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub key: RowKey,
    /// Single-line list label
    pub title: String,
    /// Text for the details pane
    pub details: String,
}

/// Actions that can be returned from the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No action, continue running
    None,
    /// Quit the application
    Quit,
    /// Search text changed to the given value
    Search(String),
    /// Open a show's episode list
    OpenShow(ShowId),
    /// Narrow the catalog to one show, or reset
    PickShow(ShowPick),
    /// Narrow the episode list to one episode, or reset
    PickEpisode(EpisodePick),
    /// Return to the full catalog
    Back,
}
