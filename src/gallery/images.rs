// SPDX-License-Identifier: MPL-2.0
//! State of the Images screen: the uploaded images joined with their scores
//! and favourite status.
//!
//! All mutations go through this type so the screen invariants hold in one
//! place:
//!
//! - votes are applied optimistically and can be rolled back exactly
//! - deletions only happen after confirmation and server success
//! - favourite changes are written after server success only
//! - a load response is applied only if it is the latest issued

use super::scores::{
    build_favorite_map, build_score_map, next_score, FavoriteMap, FavoriteState, ScoreMap,
    VoteDirection,
};
use super::sequence::{FetchSequence, FetchTicket};
use crate::api::{CreatedVote, Favourite, Image, Vote};
use std::collections::HashSet;

/// Everything fetched by one gallery load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryData {
    pub images: Vec<Image>,
    pub votes: Vec<Vote>,
    pub favourites: Vec<Favourite>,
}

/// An issued gallery load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub ticket: FetchTicket,
    /// Replace the image list instead of appending to it.
    pub refresh: bool,
}

/// A vote applied locally and awaiting server confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVote {
    pub image_id: String,
    /// Score before the vote; `None` when the image had no entry.
    pub previous: Option<i32>,
    /// Absolute value sent to the server.
    pub value: i32,
    pub direction: VoteDirection,
}

#[derive(Debug, Default)]
pub struct GalleryState {
    images: Vec<Image>,
    scores: ScoreMap,
    favorites: FavoriteMap,
    pending_delete: Option<String>,
    refreshing: bool,
    sequence: FetchSequence,
}

impl GalleryState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    #[must_use]
    pub fn scores(&self) -> &ScoreMap {
        &self.scores
    }

    #[must_use]
    pub fn favorites(&self) -> &FavoriteMap {
        &self.favorites
    }

    /// Current score of an image, 0 when it has never been voted on.
    #[must_use]
    pub fn score_of(&self, image_id: &str) -> i32 {
        self.scores.get(image_id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn favorite_of(&self, image_id: &str) -> FavoriteState {
        self.favorites
            .get(image_id)
            .copied()
            .unwrap_or(FavoriteState::INACTIVE)
    }

    #[must_use]
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    // ------------------------------------------------------------------
    // Load
    // ------------------------------------------------------------------

    /// Issues a new load. Any earlier load still in flight becomes stale.
    pub fn begin_load(&mut self, refresh: bool) -> LoadRequest {
        if refresh {
            self.refreshing = true;
        }
        LoadRequest {
            ticket: self.sequence.issue(),
            refresh,
        }
    }

    /// Applies a load result. Returns `false` if the request was superseded.
    pub fn apply_loaded(&mut self, request: LoadRequest, data: GalleryData) -> bool {
        if self.sequence.is_stale(request.ticket) {
            tracing::debug!(?request, "discarding stale gallery load");
            return false;
        }

        if request.refresh {
            self.images = data.images;
        } else {
            let known: HashSet<String> = self.images.iter().map(|i| i.id.clone()).collect();
            self.images
                .extend(data.images.into_iter().filter(|i| !known.contains(&i.id)));
        }
        self.scores = build_score_map(&data.votes);
        self.favorites = build_favorite_map(&data.favourites);
        self.refreshing = false;
        true
    }

    /// Ends a failed load; prior data is kept. Returns `false` if the request
    /// was superseded, in which case the failure should not be reported.
    pub fn apply_load_failed(&mut self, request: LoadRequest) -> bool {
        if self.sequence.is_stale(request.ticket) {
            return false;
        }
        self.refreshing = false;
        true
    }

    // ------------------------------------------------------------------
    // Vote
    // ------------------------------------------------------------------

    /// Applies a vote locally and returns what must be sent to the server.
    pub fn begin_vote(&mut self, image_id: &str, direction: VoteDirection) -> PendingVote {
        let previous = self.scores.get(image_id).copied();
        let value = next_score(previous.unwrap_or(0), direction);
        self.scores.insert(image_id.to_string(), value);
        PendingVote {
            image_id: image_id.to_string(),
            previous,
            value,
            direction,
        }
    }

    /// Reconciles a confirmed vote with the value echoed by the server.
    pub fn confirm_vote(&mut self, pending: &PendingVote, created: &CreatedVote) {
        if let Some(value) = created.value {
            self.scores.insert(pending.image_id.clone(), value.max(0));
        }
    }

    /// Restores the score as it was before [`begin_vote`](Self::begin_vote).
    pub fn rollback_vote(&mut self, pending: &PendingVote) {
        match pending.previous {
            Some(score) => {
                self.scores.insert(pending.image_id.clone(), score);
            }
            None => {
                self.scores.remove(&pending.image_id);
            }
        }
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Opens the confirmation dialog for an image.
    pub fn request_delete(&mut self, image_id: &str) {
        self.pending_delete = Some(image_id.to_string());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Closes the dialog and returns the image to delete.
    pub fn confirm_delete(&mut self) -> Option<String> {
        self.pending_delete.take()
    }

    /// Drops an image the server has deleted.
    pub fn remove_image(&mut self, image_id: &str) {
        self.images.retain(|image| image.id != image_id);
        self.scores.remove(image_id);
    }

    // ------------------------------------------------------------------
    // Favourite
    // ------------------------------------------------------------------

    pub fn apply_favorite(&mut self, image_id: &str, state: FavoriteState) {
        self.favorites.insert(image_id.to_string(), state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: &str) -> Image {
        Image {
            id: id.to_string(),
            url: format!("https://cdn.example.test/{id}.jpg"),
            width: 10,
            height: 10,
            sub_id: None,
            created_at: None,
            original_filename: None,
        }
    }

    fn vote(image_id: &str, value: i32) -> Vote {
        Vote {
            id: 1,
            image_id: image_id.to_string(),
            sub_id: None,
            value,
            created_at: None,
            country_code: None,
            image: None,
        }
    }

    fn data(ids: &[&str]) -> GalleryData {
        GalleryData {
            images: ids.iter().map(|id| image(id)).collect(),
            ..GalleryData::default()
        }
    }

    fn ids(state: &GalleryState) -> Vec<&str> {
        state.images().iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn refresh_replaces_images_and_rebuilds_maps() {
        let mut state = GalleryState::new();
        let first = state.begin_load(true);
        assert!(state.is_refreshing());
        state.apply_loaded(
            first,
            GalleryData {
                images: vec![image("a"), image("b")],
                votes: vec![vote("a", 3)],
                favourites: Vec::new(),
            },
        );
        assert!(!state.is_refreshing());

        let second = state.begin_load(true);
        assert!(state.apply_loaded(second, data(&["c"])));
        assert_eq!(ids(&state), vec!["c"]);
        assert!(state.scores().is_empty());
    }

    #[test]
    fn append_skips_already_listed_images() {
        let mut state = GalleryState::new();
        let first = state.begin_load(true);
        state.apply_loaded(first, data(&["a", "b"]));

        let more = state.begin_load(false);
        state.apply_loaded(more, data(&["b", "c"]));
        assert_eq!(ids(&state), vec!["a", "b", "c"]);
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut state = GalleryState::new();
        let old = state.begin_load(true);
        let new = state.begin_load(true);

        assert!(state.apply_loaded(new, data(&["new"])));
        assert!(!state.apply_loaded(old, data(&["old"])));
        assert_eq!(ids(&state), vec!["new"]);
    }

    #[test]
    fn failed_load_keeps_prior_data() {
        let mut state = GalleryState::new();
        let first = state.begin_load(true);
        state.apply_loaded(first, data(&["a"]));

        let failing = state.begin_load(true);
        assert!(state.apply_load_failed(failing));
        assert!(!state.is_refreshing());
        assert_eq!(ids(&state), vec!["a"]);
    }

    #[test]
    fn stale_failure_is_not_reported() {
        let mut state = GalleryState::new();
        let old = state.begin_load(true);
        let _new = state.begin_load(true);

        assert!(!state.apply_load_failed(old));
        assert!(state.is_refreshing());
    }

    #[test]
    fn up_vote_on_unscored_image_starts_at_one() {
        let mut state = GalleryState::new();
        let pending = state.begin_vote("a", VoteDirection::Up);
        assert_eq!(pending.previous, None);
        assert_eq!(pending.value, 1);
        assert_eq!(state.score_of("a"), 1);
    }

    #[test]
    fn down_vote_never_goes_below_zero() {
        let mut state = GalleryState::new();
        let pending = state.begin_vote("a", VoteDirection::Down);
        assert_eq!(pending.value, 0);
        assert_eq!(state.score_of("a"), 0);
    }

    #[test]
    fn rollback_restores_previous_score() {
        let mut state = GalleryState::new();
        let load = state.begin_load(true);
        state.apply_loaded(
            load,
            GalleryData {
                images: vec![image("a")],
                votes: vec![vote("a", 5)],
                favourites: Vec::new(),
            },
        );

        let pending = state.begin_vote("a", VoteDirection::Up);
        assert_eq!(state.score_of("a"), 6);
        state.rollback_vote(&pending);
        assert_eq!(state.scores().get("a"), Some(&5));
    }

    #[test]
    fn rollback_removes_entry_that_did_not_exist() {
        let mut state = GalleryState::new();
        let pending = state.begin_vote("a", VoteDirection::Up);
        state.rollback_vote(&pending);
        assert!(!state.scores().contains_key("a"));
    }

    #[test]
    fn confirm_uses_server_value_when_echoed() {
        let mut state = GalleryState::new();
        let pending = state.begin_vote("a", VoteDirection::Up);
        state.confirm_vote(
            &pending,
            &CreatedVote {
                id: 10,
                value: Some(4),
            },
        );
        assert_eq!(state.score_of("a"), 4);

        state.confirm_vote(&pending, &CreatedVote { id: 11, value: None });
        assert_eq!(state.score_of("a"), 4);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut state = GalleryState::new();
        let load = state.begin_load(true);
        state.apply_loaded(load, data(&["a", "b"]));

        state.request_delete("a");
        assert_eq!(state.pending_delete(), Some("a"));
        state.cancel_delete();
        assert_eq!(state.confirm_delete(), None);
        assert_eq!(ids(&state), vec!["a", "b"]);

        state.request_delete("b");
        assert_eq!(state.confirm_delete().as_deref(), Some("b"));
        assert_eq!(state.pending_delete(), None);
    }

    #[test]
    fn removing_image_drops_its_score() {
        let mut state = GalleryState::new();
        let load = state.begin_load(true);
        state.apply_loaded(
            load,
            GalleryData {
                images: vec![image("a"), image("b")],
                votes: vec![vote("a", 2)],
                favourites: Vec::new(),
            },
        );
        state.remove_image("a");
        assert_eq!(ids(&state), vec!["b"]);
        assert!(!state.scores().contains_key("a"));
    }

    #[test]
    fn unfavouriting_keeps_inactive_entry() {
        let mut state = GalleryState::new();
        state.apply_favorite("a", FavoriteState::active(12));
        assert_eq!(state.favorite_of("a").favorite_id, 12);

        state.apply_favorite("a", FavoriteState::INACTIVE);
        assert_eq!(state.favorites().get("a"), Some(&FavoriteState::INACTIVE));
    }
}
