//! The seam between the browsing engine and whatever draws it.

use crate::types::{CatalogEntry, DetailEntry, Keyed};
use crate::view::Mode;

/// The set of records currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Displayed<'a> {
    Catalog(Vec<&'a CatalogEntry>),
    Detail(Vec<&'a Keyed<DetailEntry>>),
}

impl Displayed<'_> {
    pub fn len(&self) -> usize {
        match self {
            Displayed::Catalog(shows) => shows.len(),
            Displayed::Detail(episodes) => episodes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn mode(&self) -> Mode {
        match self {
            Displayed::Catalog(_) => Mode::Catalog,
            Displayed::Detail(_) => Mode::Detail,
        }
    }
}

/// Output side of the presentation layer.
///
/// The engine never reads anything back from a presenter; user input flows
/// in through [`crate::session::Browser`]'s `on_*` callbacks.
pub trait Presenter {
    /// Replace the visible list.
    fn render(&mut self, displayed: Displayed<'_>);

    /// Report `displayed` of `total` records in the current mode.
    fn set_count(&mut self, displayed: usize, total: usize);

    /// Show a transient status line. An empty string clears it.
    fn set_status_message(&mut self, text: &str);
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn render(&mut self, displayed: Displayed<'_>) {
        (**self).render(displayed)
    }

    fn set_count(&mut self, displayed: usize, total: usize) {
        (**self).set_count(displayed, total)
    }

    fn set_status_message(&mut self, text: &str) {
        (**self).set_status_message(text)
    }
}
