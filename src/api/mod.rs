// SPDX-License-Identifier: MPL-2.0
//! Remote image service access.
//!
//! [`CatApi`] is the port the rest of the application depends on: one typed
//! operation per remote call. [`HttpClient`] is the production adapter and
//! [`RequestTracker`] records the loading/error status of each issued call.
//!
//! # Design Notes
//!
//! - Operations take owned arguments so callers can move them into `'static`
//!   futures for Iced's `Task::perform`
//! - Implementations must be cheap to clone; clones share connections
//! - There is no retry: a failure is returned once to the caller

pub mod client;
pub mod error;
pub mod models;
pub mod tracker;
pub mod upload;

pub use client::{ClientConfig, HttpClient};
pub use error::{ApiError, ApiResult};
pub use models::{
    CreatedFavourite, CreatedVote, Favourite, Image, ImageSnapshot, SortOrder, Vote, VoteQuery,
};
pub use tracker::{Operation, RequestId, RequestTracker};
pub use upload::UploadSource;

use std::future::Future;

/// Typed operations of the remote image service.
pub trait CatApi: Clone + Send + Sync + 'static {
    /// `GET /images?limit=100&order=DESC`
    fn list_images(&self) -> impl Future<Output = ApiResult<Vec<Image>>> + Send;

    /// `DELETE /images/{id}`
    fn delete_image(&self, image_id: String) -> impl Future<Output = ApiResult<()>> + Send;

    /// `POST /images/upload` with a multipart `file` field.
    fn upload_image(&self, source: UploadSource) -> impl Future<Output = ApiResult<Image>> + Send;

    /// `GET /favourites`
    fn list_favourites(&self) -> impl Future<Output = ApiResult<Vec<Favourite>>> + Send;

    /// `POST /favourites`
    fn create_favourite(
        &self,
        image_id: String,
    ) -> impl Future<Output = ApiResult<CreatedFavourite>> + Send;

    /// `DELETE /favourites/{id}`
    fn delete_favourite(&self, favourite_id: i64) -> impl Future<Output = ApiResult<()>> + Send;

    /// `GET /votes` with optional `limit` and `order`.
    fn list_votes(&self, query: VoteQuery) -> impl Future<Output = ApiResult<Vec<Vote>>> + Send;

    /// `POST /votes` with the new absolute value.
    fn create_vote(
        &self,
        image_id: String,
        value: i32,
    ) -> impl Future<Output = ApiResult<CreatedVote>> + Send;
}
