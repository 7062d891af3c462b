// SPDX-License-Identifier: MPL-2.0
//! Screen models for the four tabs.
//!
//! Everything here is plain state plus the async functions that talk to a
//! [`CatApi`](crate::api::CatApi). The Iced layer only forwards messages into
//! these types, which keeps the behavior testable without a window.

pub mod actions;
pub mod favourites;
pub mod images;
pub mod ranking;
pub mod scores;
pub mod sequence;
pub mod upload;

pub use actions::LoadFailure;
pub use favourites::FavouritesState;
pub use images::{GalleryData, GalleryState, LoadRequest, PendingVote};
pub use ranking::{top_votes, TopState, TOP_N};
pub use scores::{FavoriteMap, FavoriteState, ScoreMap, VoteDirection};
pub use sequence::{FetchSequence, FetchTicket};
pub use upload::UploadState;
