//! Application state management and input handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use show_browser::presenter::{Displayed, Presenter};
use show_browser::types::{CatalogEntry, DetailEntry, Keyed, strip_html};
use show_browser::view::{EpisodePick, Mode, ShowPick};

use super::types::{Action, Row, RowKey};

/// Application state for the TUI.
///
/// This is the presenter the browsing session renders into; key presses are
/// turned into [`Action`]s for the event loop to forward.
pub struct App {
    /// Mode of the last rendered list
    pub mode: Mode,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Current search text
    pub search_input: String,
    /// Rendered rows, in display order
    pub rows: Vec<Row>,
    /// Cursor over `rows`
    pub list_state: ListState,
    /// Displayed/total counts
    pub count: (usize, usize),
    /// Status line, empty when idle
    pub status_message: String,
    /// Whether help modal is shown
    pub show_help: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            mode: Mode::Catalog,
            should_quit: false,
            search_input: String::new(),
            rows: Vec::new(),
            list_state: ListState::default(),
            count: (0, 0),
            status_message: String::new(),
            show_help: false,
        }
    }

    /// Row under the cursor.
    pub fn selected_row(&self) -> Option<&Row> {
        self.list_state.selected().and_then(|i| self.rows.get(i))
    }

    /// Handle keyboard input and return an action.
    pub fn handle_input(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.should_quit = true;
                    Action::Quit
                }
                KeyCode::Char('a') => match self.mode {
                    Mode::Catalog => Action::PickShow(ShowPick::All),
                    Mode::Detail => {
                        self.search_input.clear();
                        Action::PickEpisode(EpisodePick::All)
                    }
                },
                _ => Action::None,
            };
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1)) {
                self.show_help = false;
            }
            return Action::None;
        }

        match key.code {
            KeyCode::F(1) => {
                self.show_help = true;
                Action::None
            }
            KeyCode::Up => {
                let i = self.list_state.selected().unwrap_or(0);
                if i > 0 {
                    self.list_state.select(Some(i - 1));
                }
                Action::None
            }
            KeyCode::Down => {
                let i = self.list_state.selected().unwrap_or(0);
                if i < self.rows.len().saturating_sub(1) {
                    self.list_state.select(Some(i + 1));
                }
                Action::None
            }
            KeyCode::Enter => match self.selected_row().map(|row| row.key) {
                Some(RowKey::Show(id)) => {
                    self.search_input.clear();
                    Action::OpenShow(id)
                }
                Some(RowKey::Episode(key)) => {
                    self.search_input.clear();
                    Action::PickEpisode(EpisodePick::Key(key))
                }
                None => Action::None,
            },
            KeyCode::Tab => match self.selected_row().map(|row| row.key) {
                Some(RowKey::Show(id)) => Action::PickShow(ShowPick::Id(id)),
                _ => Action::None,
            },
            KeyCode::Esc => {
                if self.search_input.is_empty() {
                    Action::Back
                } else {
                    // Clear search first
                    self.search_input.clear();
                    Action::Search(String::new())
                }
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                Action::Search(self.search_input.clone())
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                Action::Search(self.search_input.clone())
            }
            _ => Action::None,
        }
    }
}

fn show_row(show: &CatalogEntry) -> Row {
    let mut details = format!(
        "Name: {}\nRated: {}\nGenres: {}\nStatus: {}\nRuntime: {}",
        show.name,
        show.rating_display(),
        show.genres_display(),
        show.status_display(),
        show.runtime_display(),
    );
    if let Some(url) = show.image_url() {
        details.push_str(&format!("\nImage: {}", url));
    }
    details.push_str(&format!("\n\n{}", summary_text(show.summary.as_deref())));
    details.push_str("\n\nEnter: episodes  Tab: only this show");

    Row {
        key: RowKey::Show(show.id),
        title: show.to_display(),
        details,
    }
}

fn episode_row(episode: &Keyed<DetailEntry>) -> Row {
    let ep = &episode.entry;
    let mut details = format!("{}\n{}", ep.episode_code(), ep.name);
    if let Some(url) = &ep.url {
        details.push_str(&format!("\nLink: {}", url));
    }
    if let Some(url) = ep.image_url() {
        details.push_str(&format!("\nImage: {}", url));
    }
    details.push_str(&format!("\n\n{}", summary_text(ep.summary.as_deref())));

    Row {
        key: RowKey::Episode(episode.key),
        title: ep.to_display(),
        details,
    }
}

fn summary_text(summary: Option<&str>) -> String {
    match summary.map(strip_html) {
        Some(text) if !text.is_empty() => text,
        _ => "No summary available.".to_string(),
    }
}

impl Presenter for App {
    fn render(&mut self, displayed: Displayed<'_>) {
        self.mode = displayed.mode();
        self.rows = match displayed {
            Displayed::Catalog(shows) => shows.into_iter().map(show_row).collect(),
            Displayed::Detail(episodes) => episodes.into_iter().map(episode_row).collect(),
        };
        self.list_state
            .select(if self.rows.is_empty() { None } else { Some(0) });
    }

    fn set_count(&mut self, displayed: usize, total: usize) {
        self.count = (displayed, total);
    }

    fn set_status_message(&mut self, text: &str) {
        self.status_message = text.to_string();
    }
}
