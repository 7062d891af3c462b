// SPDX-License-Identifier: MPL-2.0
//! Remote side of the gallery operations.
//!
//! These functions only talk to the service; applying the outcome to screen
//! state is done by the caller once the future resolves.

use super::favourites::visible_favourites;
use super::images::{GalleryData, PendingVote};
use super::ranking::{top_votes, TOP_N};
use super::scores::FavoriteState;
use crate::api::{
    ApiError, ApiResult, CatApi, CreatedVote, Favourite, Image, Operation, UploadSource, Vote,
    VoteQuery,
};
use futures_util::future::try_join3;
use futures_util::TryFutureExt;

/// A failed gallery load, tagged with the call that failed first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub operation: Operation,
    pub error: ApiError,
}

impl LoadFailure {
    fn tag(operation: Operation) -> impl FnOnce(ApiError) -> Self {
        move |error| Self { operation, error }
    }
}

/// Fetches images, votes and favourites concurrently.
///
/// Any failure fails the whole load.
pub async fn load_gallery<A: CatApi>(
    api: A,
    votes: VoteQuery,
) -> Result<GalleryData, LoadFailure> {
    let (images, votes, favourites) = try_join3(
        api.list_images()
            .map_err(LoadFailure::tag(Operation::ListImages)),
        api.list_votes(votes)
            .map_err(LoadFailure::tag(Operation::ListVotes)),
        api.list_favourites()
            .map_err(LoadFailure::tag(Operation::ListFavourites)),
    )
    .await?;

    tracing::debug!(
        images = images.len(),
        votes = votes.len(),
        favourites = favourites.len(),
        "gallery loaded"
    );
    Ok(GalleryData {
        images,
        votes,
        favourites,
    })
}

/// Sends the new absolute value of an optimistic vote.
pub async fn submit_vote<A: CatApi>(api: A, pending: PendingVote) -> ApiResult<CreatedVote> {
    api.create_vote(pending.image_id, pending.value).await
}

/// Flips the favourite status of an image and returns the new status.
pub async fn toggle_favourite<A: CatApi>(
    api: A,
    image_id: String,
    current: FavoriteState,
) -> ApiResult<FavoriteState> {
    if current.is_favorite {
        api.delete_favourite(current.favorite_id).await?;
        Ok(FavoriteState::INACTIVE)
    } else {
        let created = api.create_favourite(image_id).await?;
        Ok(FavoriteState::active(created.id))
    }
}

pub async fn delete_image<A: CatApi>(api: A, image_id: String) -> ApiResult<String> {
    api.delete_image(image_id.clone()).await?;
    Ok(image_id)
}

/// Fetches votes and ranks the best [`TOP_N`] images.
pub async fn load_top<A: CatApi>(api: A, query: VoteQuery) -> ApiResult<Vec<Vote>> {
    let votes = api.list_votes(query).await?;
    Ok(top_votes(votes, TOP_N))
}

/// Fetches favourites whose image still exists.
pub async fn load_favourites<A: CatApi>(api: A) -> ApiResult<Vec<Favourite>> {
    let favourites = api.list_favourites().await?;
    Ok(visible_favourites(favourites))
}

pub async fn upload<A: CatApi>(api: A, source: UploadSource) -> ApiResult<Image> {
    api.upload_image(source).await
}
