//! Type definitions for the show-browser application.
//!
//! This module contains the catalog and episode records as they arrive from
//! the TVmaze API, plus the small formatting helpers the front-end needs.
//! Records are immutable once fetched.

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::sync::LazyLock;

/// Identifier of a catalog entry (a show).
pub type ShowId = u64;

/// Placeholder used for any absent field when formatting.
pub const NOT_AVAILABLE: &str = "N/A";

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Treat a `null` or wrongly typed field the same as a missing one.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Keep the string elements of a list and drop everything else.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(text),
            _ => None,
        })
        .collect())
}

/// Poster/still references.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Image {
    #[serde(default, deserialize_with = "lenient")]
    pub medium: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub original: Option<String>,
}

impl Image {
    fn best(&self) -> Option<&str> {
        self.medium.as_deref().or(self.original.as_deref())
    }
}

/// Aggregate rating block of a show.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Rating {
    #[serde(default, deserialize_with = "lenient")]
    pub average: Option<f64>,
}

/// A top-level browsable item: one show of the catalog.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CatalogEntry {
    /// Unique, stable identifier.
    pub id: ShowId,

    /// Display name. Missing names decode as an empty string.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,

    /// HTML summary.
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "string_list")]
    pub genres: Vec<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub rating: Option<Rating>,

    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,

    /// Runtime in minutes.
    #[serde(default, deserialize_with = "lenient")]
    pub runtime: Option<u32>,

    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<Image>,
}

impl CatalogEntry {
    /// Average rating, if the show has one.
    pub fn average_rating(&self) -> Option<f64> {
        self.rating.as_ref().and_then(|r| r.average)
    }

    /// Poster URL, preferring the medium size.
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_ref().and_then(Image::best)
    }

    /// Format the show for display in list rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use show_browser::types::CatalogEntry;
    ///
    /// let show: CatalogEntry = serde_json::from_str(
    ///     r#"{"id": 1, "name": "Under the Dome", "genres": ["Drama"], "rating": {"average": 6.5}}"#,
    /// ).unwrap();
    /// assert_eq!(show.to_display(), "Under the Dome [6.5] Drama");
    /// ```
    pub fn to_display(&self) -> String {
        format!(
            "{} [{}] {}",
            self.name,
            self.rating_display(),
            self.genres_display()
        )
    }

    pub fn rating_display(&self) -> String {
        self.average_rating()
            .map(|r| r.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn genres_display(&self) -> String {
        if self.genres.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            self.genres.join(", ")
        }
    }

    pub fn status_display(&self) -> &str {
        self.status.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn runtime_display(&self) -> String {
        match self.runtime {
            Some(minutes) if minutes > 0 => format!("{} min", minutes),
            _ => NOT_AVAILABLE.to_string(),
        }
    }
}

/// A child item of a show: one episode.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DetailEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,

    /// Season number, 0 when the API leaves it out.
    #[serde(default, deserialize_with = "lenient")]
    pub season: u32,

    /// Episode number within the season, 0 for unnumbered specials.
    #[serde(default, deserialize_with = "lenient")]
    pub number: u32,

    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<Image>,

    /// Link to the episode page on the catalog site.
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
}

impl DetailEntry {
    /// Season/episode code such as `S01E05`.
    pub fn episode_code(&self) -> String {
        format_episode_code(self.season, self.number)
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image.as_ref().and_then(Image::best)
    }

    /// Format the episode for display in list rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use show_browser::types::DetailEntry;
    ///
    /// let ep: DetailEntry = serde_json::from_str(
    ///     r#"{"name": "Pilot", "season": 1, "number": 1}"#,
    /// ).unwrap();
    /// assert_eq!(ep.to_display(), "S01E01 - Pilot");
    /// ```
    pub fn to_display(&self) -> String {
        format!("{} - {}", self.episode_code(), self.name)
    }
}

/// An episode tagged with its position in the list it was loaded with.
///
/// The key is assigned once at load time and stays valid while the list is
/// filtered or narrowed.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyed<T> {
    pub key: usize,
    pub entry: T,
}

impl<T> Keyed<T> {
    /// Tag every item with its index.
    pub fn assign(items: Vec<T>) -> Vec<Keyed<T>> {
        items
            .into_iter()
            .enumerate()
            .map(|(key, entry)| Keyed { key, entry })
            .collect()
    }
}

/// Format a season/episode pair as `SxxExx`.
///
/// # Examples
///
/// ```
/// use show_browser::types::format_episode_code;
///
/// assert_eq!(format_episode_code(1, 5), "S01E05");
/// assert_eq!(format_episode_code(12, 104), "S12E104");
/// ```
pub fn format_episode_code(season: u32, number: u32) -> String {
    format!("S{:02}E{:02}", season, number)
}

/// Strip HTML tags from a rich-text summary for plain-text display.
pub fn strip_html(summary: &str) -> String {
    HTML_TAG.replace_all(summary, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show_json() -> &'static str {
        r#"{
            "id": 82,
            "name": "Game of Thrones",
            "summary": "<p>Based on the bestselling book series.</p>",
            "genres": ["Drama", "Adventure", "Fantasy"],
            "rating": {"average": 8.9},
            "status": "Ended",
            "runtime": 60,
            "image": {"medium": "https://img/medium.jpg", "original": "https://img/original.jpg"}
        }"#
    }

    #[test]
    fn test_catalog_entry_full_record() {
        let show: CatalogEntry = serde_json::from_str(show_json()).unwrap();
        assert_eq!(show.id, 82);
        assert_eq!(show.average_rating(), Some(8.9));
        assert_eq!(show.image_url(), Some("https://img/medium.jpg"));
        assert_eq!(show.runtime_display(), "60 min");
        assert_eq!(show.status_display(), "Ended");
        assert_eq!(show.genres_display(), "Drama, Adventure, Fantasy");
    }

    #[test]
    fn test_catalog_entry_missing_fields_use_defaults() {
        let show: CatalogEntry =
            serde_json::from_str(r#"{"id": 7, "name": null, "genres": null, "rating": {"average": null}}"#)
                .unwrap();
        assert_eq!(show.name, "");
        assert!(show.genres.is_empty());
        assert_eq!(show.rating_display(), NOT_AVAILABLE);
        assert_eq!(show.genres_display(), NOT_AVAILABLE);
        assert_eq!(show.status_display(), NOT_AVAILABLE);
        assert_eq!(show.runtime_display(), NOT_AVAILABLE);
        assert!(show.image_url().is_none());
    }

    #[test]
    fn test_catalog_entry_requires_id() {
        assert!(serde_json::from_str::<CatalogEntry>(r#"{"name": "No Id"}"#).is_err());
    }

    #[test]
    fn test_image_falls_back_to_original() {
        let show: CatalogEntry = serde_json::from_str(
            r#"{"id": 1, "name": "x", "image": {"medium": null, "original": "https://o.jpg"}}"#,
        )
        .unwrap();
        assert_eq!(show.image_url(), Some("https://o.jpg"));
    }

    #[test]
    fn test_catalog_entry_wrongly_typed_fields_use_defaults() {
        let show: CatalogEntry = serde_json::from_str(
            r#"{"id": 9, "name": "Odd", "genres": [null, "Drama", 3], "runtime": -1,
                "rating": "high", "status": 5, "image": {"medium": 1, "original": "o.jpg"}}"#,
        )
        .unwrap();
        assert_eq!(show.genres, vec!["Drama"]);
        assert_eq!(show.runtime, None);
        assert_eq!(show.runtime_display(), NOT_AVAILABLE);
        assert_eq!(show.rating, None);
        assert_eq!(show.status_display(), NOT_AVAILABLE);
        assert_eq!(show.image_url(), Some("o.jpg"));
    }

    #[test]
    fn test_detail_entry_wrongly_typed_fields_use_defaults() {
        let ep: DetailEntry =
            serde_json::from_str(r#"{"name": ["x"], "season": "two", "number": 4, "url": false}"#)
                .unwrap();
        assert_eq!(ep.name, "");
        assert_eq!(ep.season, 0);
        assert_eq!(ep.number, 4);
        assert_eq!(ep.url, None);
    }

    #[test]
    fn test_detail_entry_null_number() {
        let ep: DetailEntry =
            serde_json::from_str(r#"{"name": "Special", "season": 2, "number": null}"#).unwrap();
        assert_eq!(ep.number, 0);
        assert_eq!(ep.to_display(), "S02E00 - Special");
    }

    #[test]
    fn test_format_episode_code_padding() {
        assert_eq!(format_episode_code(1, 1), "S01E01");
        assert_eq!(format_episode_code(10, 23), "S10E23");
    }

    #[test]
    fn test_keyed_assign_positions() {
        let keyed = Keyed::assign(vec!["a", "b", "c"]);
        let keys: Vec<usize> = keyed.iter().map(|k| k.key).collect();
        assert_eq!(keys, vec![0, 1, 2]);
        assert_eq!(keyed[2].entry, "c");
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("<p>A <b>bold</b> story.</p>"),
            "A bold story."
        );
        assert_eq!(strip_html("plain"), "plain");
    }
}
