//! A terminal client for browsing the TVmaze show catalog.
//!
//! show-browser loads the full show index once, lets the user filter it,
//! open a show to list its episodes, narrow to a single episode and go back
//! to the catalog.
//!
//! The library is the browsing engine: a read-through [`cache::RequestCache`],
//! the [`loader`]s that page through the catalog and fetch episode lists, and
//! the [`view::CatalogViewState`] state machine. [`session::Browser`] ties
//! them to a [`presenter::Presenter`]; the binary provides a ratatui one.
//!
//! # Usage
//!
//! ```bash
//! # Browse with default settings
//! cargo run
//!
//! # Only load the first three catalog pages, with debug logging
//! cargo run -- --max-pages 3 --log 3
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod loader;
pub mod presenter;
pub mod session;
pub mod types;
pub mod view;
