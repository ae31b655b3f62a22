//! Catalog/detail view state machine.
//!
//! All changes to what is on screen go through [`CatalogViewState`]. It holds
//! the full catalog, the current mode together with that mode's primary
//! dataset, and the filter text; the displayed set is always derived from
//! those and never stored.

use crate::api::Fetcher;
use crate::loader::DetailLoader;
use crate::presenter::{Displayed, Presenter};
use crate::types::{CatalogEntry, DetailEntry, Keyed, ShowId, strip_html};
use log::debug;

/// Which dataset is in scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Catalog,
    Detail,
}

/// A pick from the show selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowPick {
    All,
    Id(ShowId),
}

/// A pick from the episode selector, by the key assigned at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodePick {
    All,
    Key(usize),
}

/// Identifies one show selection so a slow episode load can be recognised as
/// stale once something newer has happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    serial: u64,
    show_id: ShowId,
}

/// Case-insensitive substring search over a record's text fields.
pub trait Searchable {
    /// `needle` must already be lowercase.
    fn matches_lowercase(&self, needle: &str) -> bool;
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn summary_contains(summary: Option<&str>, needle: &str) -> bool {
    summary.is_some_and(|s| contains_ci(&strip_html(s), needle))
}

impl Searchable for CatalogEntry {
    fn matches_lowercase(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle)
            || summary_contains(self.summary.as_deref(), needle)
            || self.genres.iter().any(|g| contains_ci(g, needle))
    }
}

impl Searchable for DetailEntry {
    fn matches_lowercase(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle) || summary_contains(self.summary.as_deref(), needle)
    }
}

/// Whether `entity` matches the search text `query`. Empty text matches
/// everything.
///
/// # Examples
///
/// ```
/// use show_browser::types::CatalogEntry;
/// use show_browser::view::matches;
///
/// let show: CatalogEntry = serde_json::from_str(
///     r#"{"id": 1, "name": "Friends", "genres": ["Comedy", "Romance"]}"#,
/// ).unwrap();
/// assert!(matches(&show, "ROM"));
/// assert!(!matches(&show, "drama"));
/// ```
pub fn matches<T: Searchable + ?Sized>(entity: &T, query: &str) -> bool {
    query.is_empty() || entity.matches_lowercase(&query.to_lowercase())
}

/// Mode plus the dataset that belongs to it.
#[derive(Debug, Clone)]
enum Scope {
    Catalog {
        picked: Option<ShowId>,
    },
    Detail {
        show_id: ShowId,
        episodes: Vec<Keyed<DetailEntry>>,
        picked: Option<usize>,
    },
}

/// The view state machine.
#[derive(Debug, Clone)]
pub struct CatalogViewState {
    catalog: Vec<CatalogEntry>,
    scope: Scope,
    filter: String,
    latest_serial: u64,
}

impl CatalogViewState {
    /// Start in catalog mode showing every entry.
    pub fn new(catalog: Vec<CatalogEntry>) -> Self {
        Self {
            catalog,
            scope: Scope::Catalog { picked: None },
            filter: String::new(),
            latest_serial: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        match self.scope {
            Scope::Catalog { .. } => Mode::Catalog,
            Scope::Detail { .. } => Mode::Detail,
        }
    }

    pub fn filter_text(&self) -> &str {
        &self.filter
    }

    /// The full catalog, regardless of mode.
    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    /// The show whose episodes are open, in detail mode.
    pub fn open_show(&self) -> Option<ShowId> {
        match self.scope {
            Scope::Detail { show_id, .. } => Some(show_id),
            Scope::Catalog { .. } => None,
        }
    }

    /// Episodes of the open show, unfiltered. Empty in catalog mode.
    pub fn episodes(&self) -> &[Keyed<DetailEntry>] {
        match &self.scope {
            Scope::Detail { episodes, .. } => episodes,
            Scope::Catalog { .. } => &[],
        }
    }

    /// Size of the current mode's primary dataset.
    pub fn primary_len(&self) -> usize {
        match &self.scope {
            Scope::Catalog { .. } => self.catalog.len(),
            Scope::Detail { episodes, .. } => episodes.len(),
        }
    }

    /// The records to show: the primary dataset narrowed to a pick, or
    /// filtered by the filter text, in primary order.
    pub fn displayed(&self) -> Displayed<'_> {
        let needle = self.filter.to_lowercase();

        match &self.scope {
            Scope::Catalog { picked: Some(id) } => {
                Displayed::Catalog(self.catalog.iter().filter(|e| e.id == *id).take(1).collect())
            }
            Scope::Catalog { picked: None } => Displayed::Catalog(
                self.catalog
                    .iter()
                    .filter(|e| needle.is_empty() || e.matches_lowercase(&needle))
                    .collect(),
            ),
            Scope::Detail {
                episodes,
                picked: Some(key),
                ..
            } => Displayed::Detail(episodes.iter().filter(|e| e.key == *key).collect()),
            Scope::Detail {
                episodes,
                picked: None,
                ..
            } => Displayed::Detail(
                episodes
                    .iter()
                    .filter(|e| needle.is_empty() || e.entry.matches_lowercase(&needle))
                    .collect(),
            ),
        }
    }

    /// `(displayed, total)` for the count line.
    pub fn count(&self) -> (usize, usize) {
        (self.displayed().len(), self.primary_len())
    }

    /// Re-filter the current primary dataset by `text`. Any single pick is
    /// dropped.
    pub fn search_changed(&mut self, text: &str) {
        self.filter = text.to_string();
        match &mut self.scope {
            Scope::Catalog { picked } => *picked = None,
            Scope::Detail { picked, .. } => *picked = None,
        }
    }

    /// Narrow the catalog to one show, looked up in the full catalog rather
    /// than the filtered view. `ShowPick::All` drops the narrowing.
    ///
    /// Returns `false` if nothing changed: in detail mode, or for an unknown id.
    pub fn single_entry_picked(&mut self, pick: ShowPick) -> bool {
        let Scope::Catalog { picked } = &mut self.scope else {
            debug!("Ignoring show pick outside catalog mode");
            return false;
        };

        match pick {
            ShowPick::All => {
                *picked = None;
                true
            }
            ShowPick::Id(id) if self.catalog.iter().any(|e| e.id == id) => {
                *picked = Some(id);
                true
            }
            ShowPick::Id(id) => {
                debug!("Ignoring pick of unknown show {}", id);
                false
            }
        }
    }

    /// Start opening a show. Any selection still in flight becomes stale.
    pub fn begin_selection(&mut self, show_id: ShowId) -> LoadTicket {
        self.latest_serial += 1;
        LoadTicket {
            serial: self.latest_serial,
            show_id,
        }
    }

    /// Whether `ticket` is still the most recent selection.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.serial == self.latest_serial
    }

    /// Switch to detail mode with a freshly loaded episode list, replacing
    /// any previous one. A stale ticket is discarded and `false` returned.
    pub fn finish_selection(
        &mut self,
        ticket: LoadTicket,
        episodes: Vec<Keyed<DetailEntry>>,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(
                "Discarding stale episode list for show {}",
                ticket.show_id
            );
            return false;
        }

        self.scope = Scope::Detail {
            show_id: ticket.show_id,
            episodes,
            picked: None,
        };
        self.filter.clear();
        true
    }

    /// Load the episodes of `show_id` and switch to detail mode.
    pub async fn entry_selected<F, P>(
        &mut self,
        show_id: ShowId,
        loader: &DetailLoader<'_, F>,
        status: &mut P,
    ) -> bool
    where
        F: Fetcher,
        P: Presenter + ?Sized,
    {
        let ticket = self.begin_selection(show_id);
        let episodes = loader.load_for(show_id, status).await;
        self.finish_selection(ticket, episodes)
    }

    /// Narrow the episode list to one episode by its load-time key, or back to
    /// the whole list. Clears the filter text.
    ///
    /// Returns `false` in catalog mode or for a key outside the list.
    pub fn child_picked(&mut self, pick: EpisodePick) -> bool {
        let Scope::Detail {
            episodes, picked, ..
        } = &mut self.scope
        else {
            debug!("Ignoring episode pick outside detail mode");
            return false;
        };

        match pick {
            EpisodePick::All => *picked = None,
            EpisodePick::Key(key) if key < episodes.len() => *picked = Some(key),
            EpisodePick::Key(key) => {
                debug!("Ignoring pick of unknown episode key {}", key);
                return false;
            }
        }
        self.filter.clear();
        true
    }

    /// Return to the full, unfiltered catalog. A pending selection is
    /// abandoned.
    pub fn back(&mut self) {
        self.latest_serial += 1;
        self.scope = Scope::Catalog { picked: None };
        self.filter.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn show(id: u64, name: &str) -> CatalogEntry {
        serde_json::from_value(json!({"id": id, "name": name})).unwrap()
    }

    fn catalog() -> Vec<CatalogEntry> {
        vec![
            serde_json::from_value(json!({
                "id": 1, "name": "Doctor Who", "genres": ["Drama", "Science-Fiction"],
                "summary": "<p>A time-travelling alien.</p>"
            }))
            .unwrap(),
            serde_json::from_value(json!({
                "id": 2, "name": "Friends", "genres": ["Comedy", "Romance"],
                "summary": "<p>Six friends in New York.</p>"
            }))
            .unwrap(),
            show(3, "Sherlock"),
        ]
    }

    fn episodes(n: usize) -> Vec<Keyed<DetailEntry>> {
        Keyed::assign(
            (1..=n)
                .map(|i| {
                    let summary = if i == 3 { "<p>The detective returns.</p>" } else { "" };
                    serde_json::from_value(json!({
                        "name": format!("Episode {}", i),
                        "season": 1,
                        "number": i,
                        "summary": summary,
                    }))
                    .unwrap()
                })
                .collect(),
        )
    }

    fn catalog_names(state: &CatalogViewState) -> Vec<String> {
        match state.displayed() {
            Displayed::Catalog(shows) => shows.iter().map(|s| s.name.clone()).collect(),
            Displayed::Detail(_) => panic!("expected catalog view"),
        }
    }

    fn detail_keys(state: &CatalogViewState) -> Vec<usize> {
        match state.displayed() {
            Displayed::Detail(eps) => eps.iter().map(|e| e.key).collect(),
            Displayed::Catalog(_) => panic!("expected detail view"),
        }
    }

    fn open(state: &mut CatalogViewState, show_id: ShowId, n: usize) {
        let ticket = state.begin_selection(show_id);
        assert!(state.finish_selection(ticket, episodes(n)));
    }

    #[test]
    fn test_matches_fields() {
        let shows = catalog();
        assert!(matches(&shows[0], "dr"));
        assert!(matches(&shows[0], "SCIENCE"));
        assert!(matches(&shows[0], "alien"));
        assert!(!matches(&shows[1], "dr"));
        assert!(matches(&shows[2], ""));
    }

    #[test]
    fn test_matches_ignores_markup() {
        let shows = catalog();
        // "<p>" is markup, not text
        assert!(!matches(&shows[2], "p>"));
        assert!(!matches(&shows[1], "<p"));
    }

    #[test]
    fn test_detail_matches_name_and_summary_only() {
        let eps = episodes(3);
        assert!(matches(&eps[2].entry, "detective"));
        assert!(matches(&eps[0].entry, "episode 1"));
        assert!(!matches(&eps[0].entry, "drama"));
    }

    #[test]
    fn test_initial_state_shows_full_catalog() {
        let state = CatalogViewState::new(catalog());
        assert_eq!(state.mode(), Mode::Catalog);
        assert_eq!(state.count(), (3, 3));
        assert_eq!(state.filter_text(), "");
    }

    #[test]
    fn test_search_in_catalog() {
        let mut state = CatalogViewState::new(catalog()[..2].to_vec());
        state.search_changed("dr");
        assert_eq!(catalog_names(&state), vec!["Doctor Who"]);
        assert_eq!(state.count(), (1, 2));
    }

    #[test]
    fn test_search_is_not_cumulative() {
        let mut state = CatalogViewState::new(catalog());
        state.search_changed("friends");
        state.search_changed("sher");
        assert_eq!(catalog_names(&state), vec!["Sherlock"]);
        state.search_changed("");
        assert_eq!(catalog_names(&state), vec!["Doctor Who", "Friends", "Sherlock"]);
    }

    #[test]
    fn test_displayed_is_subset_in_order() {
        let mut state = CatalogViewState::new(catalog());
        for text in ["", "o", "e", "zzz", "FRI", "comedy"] {
            state.search_changed(text);
            let shown = catalog_names(&state);
            let all: Vec<String> = state.catalog().iter().map(|s| s.name.clone()).collect();
            let mut last = None;
            for p in shown.iter().map(|n| all.iter().position(|a| a == n).unwrap()) {
                assert!(last.is_none_or(|l| l < p), "order broken for {:?}", text);
                last = Some(p);
            }
        }
    }

    #[test]
    fn test_single_pick_searches_unfiltered_catalog() {
        let mut state = CatalogViewState::new(catalog());
        state.search_changed("friends");
        assert!(state.single_entry_picked(ShowPick::Id(3)));
        assert_eq!(catalog_names(&state), vec!["Sherlock"]);
        assert_eq!(state.count(), (1, 3));
        assert_eq!(state.mode(), Mode::Catalog);

        assert!(state.single_entry_picked(ShowPick::All));
        assert_eq!(catalog_names(&state), vec!["Friends"]);
    }

    #[test]
    fn test_single_pick_unknown_id_is_ignored() {
        let mut state = CatalogViewState::new(catalog());
        assert!(!state.single_entry_picked(ShowPick::Id(99)));
        assert_eq!(state.count(), (3, 3));
    }

    #[test]
    fn test_selection_enters_detail_mode() {
        let mut state = CatalogViewState::new(catalog());
        state.search_changed("doc");
        open(&mut state, 82, 10);

        assert_eq!(state.mode(), Mode::Detail);
        assert_eq!(state.open_show(), Some(82));
        assert_eq!(state.filter_text(), "");
        assert_eq!(state.count(), (10, 10));
    }

    #[test]
    fn test_search_in_detail_mode() {
        let mut state = CatalogViewState::new(catalog());
        open(&mut state, 1, 12);
        state.search_changed("episode 1");
        assert_eq!(detail_keys(&state), vec![0, 9, 10, 11]);
        assert_eq!(state.count(), (4, 12));
    }

    #[test]
    fn test_child_pick_uses_load_time_key() {
        let mut state = CatalogViewState::new(catalog());
        open(&mut state, 1, 10);
        state.search_changed("detective");
        assert_eq!(detail_keys(&state), vec![2]);

        // Key 5 refers to the full list even though the filter hides it.
        assert!(state.child_picked(EpisodePick::Key(5)));
        assert_eq!(detail_keys(&state), vec![5]);
        assert_eq!(state.filter_text(), "");
        assert_eq!(state.count(), (1, 10));

        assert!(state.child_picked(EpisodePick::All));
        assert_eq!(state.count(), (10, 10));
    }

    #[test]
    fn test_child_pick_out_of_range() {
        let mut state = CatalogViewState::new(catalog());
        open(&mut state, 1, 3);
        assert!(!state.child_picked(EpisodePick::Key(3)));
        assert_eq!(state.count(), (3, 3));
    }

    #[test]
    fn test_picks_rejected_in_wrong_mode() {
        let mut state = CatalogViewState::new(catalog());
        assert!(!state.child_picked(EpisodePick::Key(0)));
        open(&mut state, 1, 3);
        assert!(!state.single_entry_picked(ShowPick::Id(1)));
    }

    #[test]
    fn test_back_restores_catalog() {
        let mut state = CatalogViewState::new(catalog());
        open(&mut state, 1, 10);
        state.search_changed("episode");
        state.back();

        assert_eq!(state.mode(), Mode::Catalog);
        assert_eq!(state.filter_text(), "");
        assert_eq!(state.count(), (3, 3));
        assert!(state.episodes().is_empty());
    }

    #[test]
    fn test_newer_selection_wins() {
        let mut state = CatalogViewState::new(catalog());
        let first = state.begin_selection(1);
        let second = state.begin_selection(2);

        assert!(state.finish_selection(second, episodes(2)));
        assert!(!state.finish_selection(first, episodes(7)));
        assert_eq!(state.open_show(), Some(2));
        assert_eq!(state.count(), (2, 2));
    }

    #[test]
    fn test_back_abandons_pending_selection() {
        let mut state = CatalogViewState::new(catalog());
        let ticket = state.begin_selection(1);
        state.back();
        assert!(!state.finish_selection(ticket, episodes(4)));
        assert_eq!(state.mode(), Mode::Catalog);
    }

    #[test]
    fn test_new_selection_replaces_episode_list() {
        let mut state = CatalogViewState::new(catalog());
        open(&mut state, 1, 10);
        open(&mut state, 2, 4);
        assert_eq!(state.open_show(), Some(2));
        assert_eq!(state.episodes().len(), 4);
    }
}
