// SPDX-License-Identifier: MPL-2.0
//! Wire types exchanged with TheCatAPI.
//!
//! Field names follow the JSON payloads of the remote service. Timestamps are
//! optional because the service omits them on some endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A picture hosted by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
}

/// Partial image embedded in votes and favourites.
///
/// The service sends `{}` once the referenced image has been deleted, which
/// deserializes to a snapshot with neither field set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ImageSnapshot {
    /// Returns `true` when the snapshot carries neither an `id` nor a `url`.
    ///
    /// Only the two modelled fields are inspected: any other key the service
    /// might add is dropped during deserialization, so `{"foo": 1}` counts as
    /// empty. Deleted images arrive as `{}`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.url.is_none()
    }
}

/// A user's bookmark of an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favourite {
    pub id: i64,
    pub image_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image: ImageSnapshot,
}

/// A single scoring event on an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: i64,
    pub image_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_id: Option<String>,
    pub value: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSnapshot>,
}

impl Vote {
    /// Returns `true` when the vote references an image that still has data.
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image.as_ref().is_some_and(|image| !image.is_empty())
    }
}

/// Body of `POST /favourites`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewFavourite<'a> {
    pub image_id: &'a str,
}

/// Body of `POST /votes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewVote<'a> {
    pub image_id: &'a str,
    pub value: i32,
}

/// Response of `POST /favourites`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CreatedFavourite {
    pub id: i64,
}

/// Response of `POST /votes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CreatedVote {
    pub id: i64,
    #[serde(default)]
    pub value: Option<i32>,
}

/// Sort direction accepted by list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "ASC", alias = "asc")]
    Asc,
    #[serde(rename = "DESC", alias = "desc")]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Optional filter for `GET /votes`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteQuery {
    pub limit: Option<u32>,
    pub order: Option<SortOrder>,
}

impl VoteQuery {
    /// Query string pairs; absent fields are not sent.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit.filter(|limit| *limit > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(order) = self.order {
            pairs.push(("order", order.as_str().to_string()));
        }
        pairs
    }
}
