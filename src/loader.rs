//! Collection loaders built on top of [`RequestCache`].
//!
//! [`PaginatedCollectionLoader`] walks the paged show index until it runs
//! dry; [`DetailLoader`] fetches one show's episode list. Neither returns an
//! error: failures are logged and degrade to whatever was loaded so far.

use crate::api::{Fetcher, catalog_page_url, episodes_url};
use crate::cache::RequestCache;
use crate::presenter::Presenter;
use crate::types::{CatalogEntry, DetailEntry, Keyed, ShowId};
use feruca::Collator;
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Status line shown while an episode list is in flight.
pub const LOADING_EPISODES: &str = "Loading episodes...";

/// Status line shown when an episode list could not be fetched.
pub const EPISODES_FAILED: &str = "Error loading episodes. Please try again later.";

/// What a single page of the show index turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// A non-empty list; these are the records that decoded.
    Items(Vec<CatalogEntry>),
    /// An empty list or a non-list payload. No later page is requested.
    Exhausted,
}

impl PageOutcome {
    pub fn classify(payload: &Value) -> Self {
        match payload.as_array() {
            Some(items) if !items.is_empty() => PageOutcome::Items(decode_records(items)),
            _ => PageOutcome::Exhausted,
        }
    }
}

/// Decode each element on its own, skipping the ones that do not fit `T`.
fn decode_records<T: DeserializeOwned>(items: &[Value]) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value::<T>(item.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed record at index {}: {}", i, e);
                None
            }
        })
        .collect()
}

/// Stable, case-insensitive ordering by name under the root collation, so
/// accented letters sort next to their base letter.
pub fn sort_by_name(entries: &mut [CatalogEntry]) {
    let mut collator = Collator::default();
    entries.sort_by(|a, b| {
        collator.collate(a.name.to_lowercase().as_str(), b.name.to_lowercase().as_str())
    });
}

/// Result of a full catalog load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogLoad {
    /// All shows, sorted by name.
    pub entries: Vec<CatalogEntry>,
    /// How many page requests were issued.
    pub pages_requested: usize,
}

/// Loads every page of the show index, one request at a time.
pub struct PaginatedCollectionLoader<'a, F> {
    cache: &'a RequestCache<F>,
    base: &'a str,
}

impl<'a, F: Fetcher> PaginatedCollectionLoader<'a, F> {
    pub fn new(cache: &'a RequestCache<F>, base: &'a str) -> Self {
        Self { cache, base }
    }

    /// Request pages 0, 1, 2, ... until a page comes back empty, a page
    /// fails, or `max_pages` requests have been made.
    ///
    /// Page N+1 is only requested after page N has resolved.
    pub async fn load_all(&self, max_pages: usize) -> CatalogLoad {
        let mut entries = Vec::new();
        let mut pages_requested = 0;

        for page in 0..max_pages {
            let url = catalog_page_url(self.base, page);
            pages_requested += 1;

            let payload = match self.cache.get(&url).await {
                Ok(payload) => payload,
                Err(e) => {
                    error!("Failed fetching show page {}: {}", page, e);
                    break;
                }
            };

            match PageOutcome::classify(&payload) {
                PageOutcome::Items(items) => {
                    debug!("Show page {} returned {} records", page, items.len());
                    entries.extend(items);
                }
                PageOutcome::Exhausted => {
                    debug!("Show page {} is empty, stopping", page);
                    break;
                }
            }
        }

        sort_by_name(&mut entries);

        info!(
            "Loaded {} shows from {} page requests",
            entries.len(),
            pages_requested
        );

        CatalogLoad {
            entries,
            pages_requested,
        }
    }
}

/// Loads the episode list of a single show.
pub struct DetailLoader<'a, F> {
    cache: &'a RequestCache<F>,
    base: &'a str,
}

impl<'a, F: Fetcher> DetailLoader<'a, F> {
    pub fn new(cache: &'a RequestCache<F>, base: &'a str) -> Self {
        Self { cache, base }
    }

    /// Fetch the episodes of `show_id` in server order, each tagged with its
    /// position.
    ///
    /// The presenter's status line reads [`LOADING_EPISODES`] while the
    /// request is pending. On failure it is left at [`EPISODES_FAILED`] and
    /// the list is empty.
    pub async fn load_for<P>(&self, show_id: ShowId, status: &mut P) -> Vec<Keyed<DetailEntry>>
    where
        P: Presenter + ?Sized,
    {
        status.set_status_message(LOADING_EPISODES);

        let url = episodes_url(self.base, show_id);
        match self.cache.get(&url).await {
            Ok(payload) => {
                status.set_status_message("");
                let episodes: Vec<DetailEntry> = match payload.as_array() {
                    Some(items) => decode_records(items),
                    None => {
                        warn!("Episode list for show {} is not a list", show_id);
                        Vec::new()
                    }
                };
                debug!("Loaded {} episodes for show {}", episodes.len(), show_id);
                Keyed::assign(episodes)
            }
            Err(e) => {
                error!("Failed loading episodes for show {}: {}", show_id, e);
                status.set_status_message(EPISODES_FAILED);
                Vec::new()
            }
        }
    }
}
