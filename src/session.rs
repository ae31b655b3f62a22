//! A browsing session: cache, loaders, view state and presenter wired together.
//!
//! [`Browser`] exposes the callbacks a front-end calls on user input. Each one
//! updates the view state and then pushes the new displayed set and count to
//! the presenter.

use crate::api::Fetcher;
use crate::cache::RequestCache;
use crate::config::Config;
use crate::loader::{DetailLoader, PaginatedCollectionLoader};
use crate::presenter::Presenter;
use crate::types::ShowId;
use crate::view::{CatalogViewState, EpisodePick, ShowPick};
use log::info;

/// Status line shown while the catalog is loading.
pub const LOADING_SHOWS: &str = "Loading shows...";

/// Status line shown when no show could be loaded at all.
pub const NO_SHOWS: &str = "No shows could be loaded.";

/// One in-memory browsing session.
pub struct Browser<F, P> {
    cache: RequestCache<F>,
    api_base: String,
    max_pages: usize,
    state: CatalogViewState,
    presenter: P,
}

impl<F: Fetcher, P: Presenter> Browser<F, P> {
    /// Create a session with an empty catalog. Call [`Browser::bootstrap`]
    /// to load it.
    pub fn new(fetcher: F, presenter: P, config: &Config) -> Self {
        Self {
            cache: RequestCache::new(fetcher),
            api_base: config.api_base().to_string(),
            max_pages: config.max_pages,
            state: CatalogViewState::new(Vec::new()),
            presenter,
        }
    }

    /// Load the whole catalog and show it. Returns the number of shows.
    pub async fn bootstrap(&mut self) -> usize {
        self.presenter.set_status_message(LOADING_SHOWS);

        let load = PaginatedCollectionLoader::new(&self.cache, &self.api_base)
            .load_all(self.max_pages)
            .await;
        let total = load.entries.len();
        self.state = CatalogViewState::new(load.entries);

        info!("Catalog ready with {} shows", total);
        self.presenter
            .set_status_message(if total == 0 { NO_SHOWS } else { "" });
        self.refresh();
        total
    }

    pub fn on_search_text_changed(&mut self, text: &str) {
        self.state.search_changed(text);
        self.refresh();
    }

    /// Open a show's episode list.
    pub async fn on_entry_selected(&mut self, show_id: ShowId) {
        let loader = DetailLoader::new(&self.cache, &self.api_base);
        if self
            .state
            .entry_selected(show_id, &loader, &mut self.presenter)
            .await
        {
            self.refresh();
        }
    }

    /// Narrow the catalog to one show, or undo that.
    pub fn on_single_entry_picked(&mut self, pick: ShowPick) {
        if self.state.single_entry_picked(pick) {
            self.refresh();
        }
    }

    pub fn on_child_selected(&mut self, pick: EpisodePick) {
        if self.state.child_picked(pick) {
            self.refresh();
        }
    }

    pub fn on_back(&mut self) {
        self.state.back();
        self.refresh();
    }

    pub fn state(&self) -> &CatalogViewState {
        &self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn cache(&self) -> &RequestCache<F> {
        &self.cache
    }

    fn refresh(&mut self) {
        let (shown, total) = self.state.count();
        self.presenter.render(self.state.displayed());
        self.presenter.set_count(shown, total);
    }
}
