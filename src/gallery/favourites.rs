// SPDX-License-Identifier: MPL-2.0
//! State of the Favourites screen.

use super::sequence::{FetchSequence, FetchTicket};
use crate::api::Favourite;

/// Keeps favourites whose image still exists on the service.
#[must_use]
pub fn visible_favourites(favourites: Vec<Favourite>) -> Vec<Favourite> {
    favourites
        .into_iter()
        .filter(|fav| !fav.image.is_empty())
        .collect()
}

#[derive(Debug, Default)]
pub struct FavouritesState {
    entries: Vec<Favourite>,
    sequence: FetchSequence,
}

impl FavouritesState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[Favourite] {
        &self.entries
    }

    /// Returns `true` if `ticket` belongs to the latest reload.
    #[must_use]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.sequence.is_current(ticket)
    }

    /// Clears the list and issues a reload.
    pub fn begin_load(&mut self) -> FetchTicket {
        self.entries.clear();
        self.sequence.issue()
    }

    /// Stores the fetched list. Returns `false` if the fetch was superseded.
    pub fn apply_loaded(&mut self, ticket: FetchTicket, favourites: Vec<Favourite>) -> bool {
        if self.sequence.is_stale(ticket) {
            return false;
        }
        self.entries = visible_favourites(favourites);
        true
    }
}
