// SPDX-License-Identifier: MPL-2.0
//! Top-N ranking of voted images.

use super::sequence::{FetchSequence, FetchTicket};
use crate::api::Vote;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Number of entries shown on the Top screen.
pub const TOP_N: usize = 10;

/// Ranks images by their best vote.
///
/// Votes whose image snapshot is empty are dropped. For each image the vote
/// with the highest value is kept (the first one seen on ties). The result is
/// sorted by value, highest first; images with equal values keep their order
/// of first appearance. At most `n` votes are returned.
#[must_use]
pub fn top_votes(votes: Vec<Vote>, n: usize) -> Vec<Vote> {
    let mut best: Vec<Vote> = Vec::new();
    let mut slot_of: HashMap<String, usize> = HashMap::new();

    for vote in votes.into_iter().filter(Vote::has_image) {
        match slot_of.entry(vote.image_id.clone()) {
            Entry::Occupied(slot) => {
                let kept = &mut best[*slot.get()];
                if vote.value > kept.value {
                    *kept = vote;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(best.len());
                best.push(vote);
            }
        }
    }

    // `sort_by` is stable: ties keep first-appearance order.
    best.sort_by(|a, b| b.value.cmp(&a.value));
    best.truncate(n);
    best
}

/// State of the Top screen.
#[derive(Debug, Default)]
pub struct TopState {
    entries: Vec<Vote>,
    sequence: FetchSequence,
}

impl TopState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[Vote] {
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

    /// Stores a ranked list. Returns `false` if the fetch was superseded.
    pub fn apply_loaded(&mut self, ticket: FetchTicket, ranked: Vec<Vote>) -> bool {
        if self.sequence.is_stale(ticket) {
            return false;
        }
        self.entries = ranked;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ImageSnapshot;

    fn vote(id: i64, image_id: &str, value: i32) -> Vote {
        Vote {
            id,
            image_id: image_id.to_string(),
            sub_id: None,
            value,
            created_at: None,
            country_code: None,
            image: Some(ImageSnapshot {
                id: Some(image_id.to_string()),
                url: Some(format!("https://cdn.example.test/{image_id}.jpg")),
            }),
        }
    }

    fn image_ids(votes: &[Vote]) -> Vec<&str> {
        votes.iter().map(|v| v.image_id.as_str()).collect()
    }

    #[test]
    fn keeps_max_vote_per_image_sorted_desc() {
        let votes = vec![vote(1, "a", 2), vote(2, "b", 5), vote(3, "a", 7), vote(4, "c", 1)];
        let ranked = top_votes(votes, TOP_N);
        assert_eq!(image_ids(&ranked), vec!["a", "b", "c"]);
        assert_eq!(ranked[0].value, 7);
        assert_eq!(ranked[0].id, 3);
    }

    #[test]
    fn later_higher_vote_replaces_earlier_one() {
        let ranked = top_votes(vec![vote(1, "a", 5), vote(2, "a", 9), vote(3, "b", 3)], TOP_N);
        let pairs: Vec<(&str, i32)> = ranked
            .iter()
            .map(|v| (v.image_id.as_str(), v.value))
            .collect();
        assert_eq!(pairs, vec![("a", 9), ("b", 3)]);
    }

    #[test]
    fn drops_votes_on_deleted_images() {
        let mut deleted = vote(1, "gone", 100);
        deleted.image = Some(ImageSnapshot::default());
        let mut missing = vote(2, "none", 50);
        missing.image = None;

        let ranked = top_votes(vec![deleted, missing, vote(3, "a", 1)], TOP_N);
        assert_eq!(image_ids(&ranked), vec!["a"]);
    }

    #[test]
    fn truncates_to_n() {
        let votes: Vec<Vote> = (0..25)
            .map(|i| vote(i, &format!("img{i}"), i as i32))
            .collect();
        let ranked = top_votes(votes, TOP_N);
        assert_eq!(ranked.len(), TOP_N);
        assert_eq!(ranked[0].value, 24);
        assert_eq!(ranked[TOP_N - 1].value, 15);
    }

    #[test]
    fn equal_values_on_same_image_keep_first_seen() {
        let ranked = top_votes(vec![vote(1, "a", 4), vote(2, "a", 4)], TOP_N);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, 1);
    }

    #[test]
    fn equal_values_across_images_keep_input_order() {
        let ranked = top_votes(vec![vote(1, "x", 3), vote(2, "y", 3), vote(3, "z", 3)], TOP_N);
        assert_eq!(image_ids(&ranked), vec!["x", "y", "z"]);
    }

    #[test]
    fn empty_input_gives_empty_ranking() {
        assert!(top_votes(Vec::new(), TOP_N).is_empty());
    }

    #[test]
    fn reload_clears_entries_and_ignores_stale_results() {
        let mut state = TopState::new();
        let first = state.begin_load();
        assert!(state.apply_loaded(first, vec![vote(1, "a", 1)]));
        assert_eq!(state.entries().len(), 1);

        let second = state.begin_load();
        assert!(state.entries().is_empty());
        assert!(!state.apply_loaded(first, vec![vote(1, "a", 1)]));
        assert!(state.apply_loaded(second, vec![vote(2, "b", 2)]));
        assert_eq!(image_ids(state.entries()), vec!["b"]);
    }
}
