// SPDX-License-Identifier: MPL-2.0
//! Per-image score and favourite lookups derived from fetched lists.

use crate::api::{Favourite, Vote};
use std::collections::HashMap;

/// Image id to latest raw vote value.
pub type ScoreMap = HashMap<String, i32>;

/// Image id to favourite status.
pub type FavoriteMap = HashMap<String, FavoriteState>;

/// Favourite status of one image.
///
/// `favorite_id` is only meaningful while `is_favorite` is set; an inactive
/// entry keeps the sentinel `0` instead of being removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FavoriteState {
    pub is_favorite: bool,
    pub favorite_id: i64,
}

impl FavoriteState {
    pub const INACTIVE: FavoriteState = FavoriteState {
        is_favorite: false,
        favorite_id: 0,
    };

    #[must_use]
    pub fn active(favorite_id: i64) -> Self {
        Self {
            is_favorite: true,
            favorite_id,
        }
    }
}

/// Direction of a vote button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Lower-case name used in alerts ("up" / "down").
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VoteDirection::Up => "up",
            VoteDirection::Down => "down",
        }
    }
}

/// New score after pressing a vote button: up is unbounded, down stops at 0.
#[must_use]
pub fn next_score(current: i32, direction: VoteDirection) -> i32 {
    match direction {
        VoteDirection::Up => current.saturating_add(1),
        VoteDirection::Down => current.saturating_sub(1).max(0),
    }
}

/// Builds the score map, later votes overwriting earlier ones.
#[must_use]
pub fn build_score_map(votes: &[Vote]) -> ScoreMap {
    votes
        .iter()
        .map(|vote| (vote.image_id.clone(), vote.value))
        .collect()
}

/// Marks every fetched favourite as active with its id.
#[must_use]
pub fn build_favorite_map(favourites: &[Favourite]) -> FavoriteMap {
    favourites
        .iter()
        .map(|fav| (fav.image_id.clone(), FavoriteState::active(fav.id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ImageSnapshot;

    fn vote(image_id: &str, value: i32) -> Vote {
        Vote {
            id: 0,
            image_id: image_id.to_string(),
            sub_id: None,
            value,
            created_at: None,
            country_code: None,
            image: None,
        }
    }

    #[test]
    fn up_vote_increments_without_bound() {
        assert_eq!(next_score(0, VoteDirection::Up), 1);
        assert_eq!(next_score(41, VoteDirection::Up), 42);
        assert_eq!(next_score(i32::MAX, VoteDirection::Up), i32::MAX);
    }

    #[test]
    fn down_vote_is_floored_at_zero() {
        assert_eq!(next_score(3, VoteDirection::Down), 2);
        assert_eq!(next_score(0, VoteDirection::Down), 0);
        assert_eq!(next_score(-4, VoteDirection::Down), 0);
    }

    #[test]
    fn score_map_is_last_write_wins() {
        let scores = build_score_map(&[vote("a", 5), vote("b", 1), vote("a", 2)]);
        assert_eq!(scores.get("a"), Some(&2));
        assert_eq!(scores.get("b"), Some(&1));
        assert_eq!(scores.len(), 2);
    }

    #[test]
    fn score_map_has_no_entry_without_votes() {
        let scores = build_score_map(&[vote("a", 5)]);
        assert!(!scores.contains_key("z"));
    }

    #[test]
    fn favorite_map_marks_entries_active() {
        let favourites = vec![Favourite {
            id: 77,
            image_id: "a".to_string(),
            sub_id: None,
            user_id: None,
            created_at: None,
            image: ImageSnapshot::default(),
        }];
        let map = build_favorite_map(&favourites);
        assert_eq!(map.get("a"), Some(&FavoriteState::active(77)));
    }
}
