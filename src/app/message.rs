// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::api::{ApiResult, CreatedVote, Favourite, Image, RequestId, Vote};
use crate::gallery::{FavoriteState, FetchTicket, GalleryData, LoadFailure, LoadRequest, PendingVote};
use crate::ui::navbar;
use crate::ui::notifications;
use crate::ui::screens::{favourites, images, top, upload};
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// screen messages and carry the results of remote calls together with the
/// tracker id of the call.
#[derive(Debug, Clone)]
pub enum Message {
    Navbar(navbar::Message),
    Images(images::Message),
    Upload(upload::Message),
    Top(top::Message),
    Favourites(favourites::Message),
    Notification(notifications::NotificationMessage),
    GalleryLoaded {
        request: LoadRequest,
        /// One id per gallery call, in `Operation::GALLERY_LOAD` order.
        calls: [RequestId; 3],
        result: Result<GalleryData, LoadFailure>,
    },
    VoteSubmitted {
        call: RequestId,
        pending: PendingVote,
        result: ApiResult<CreatedVote>,
    },
    FavouriteToggled {
        call: RequestId,
        image_id: String,
        result: ApiResult<FavoriteState>,
    },
    ImageDeleted {
        call: RequestId,
        result: ApiResult<String>,
    },
    TopLoaded {
        call: RequestId,
        ticket: FetchTicket,
        result: ApiResult<Vec<Vote>>,
    },
    FavouritesLoaded {
        call: RequestId,
        ticket: FetchTicket,
        result: ApiResult<Vec<Favourite>>,
    },
    UploadFinished {
        call: RequestId,
        result: ApiResult<Image>,
    },
    /// Result from the upload file dialog.
    UploadFilePicked(Option<PathBuf>),
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    ThumbnailLoaded {
        url: String,
        result: ApiResult<Vec<u8>>,
    },
    /// Periodic tick for notification auto-dismiss.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Credential resolved from `--api-key` or the environment. The
    /// settings file is consulted when this is `None`.
    pub api_key: Option<String>,
}
