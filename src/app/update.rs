// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Every remote call is registered with the [`RequestTracker`] under the
//! screen it belongs to before its task is spawned. The tracker id travels
//! with the result so the call is finished exactly once, or discarded when a
//! newer fetch superseded it.

use super::config::Config;
use super::{Message, Screen};
use crate::api::upload::PICKER_EXTENSIONS;
use crate::api::{
    ApiError, ApiResult, CreatedVote, Favourite, HttpClient, Image, Operation, RequestId,
    RequestTracker, UploadSource, Vote,
};
use crate::gallery::{
    actions, FavoriteState, FavouritesState, FetchTicket, GalleryData, GalleryState, LoadFailure,
    LoadRequest, PendingVote, TopState, UploadState,
};
use crate::i18n::fluent::I18n;
use crate::ui::navbar::{self, Event as NavbarEvent};
use crate::ui::notifications::{self, Notification};
use crate::ui::screens::{images, upload};
use crate::ui::thumbnails::ThumbnailCache;
use iced::Task;
use std::path::PathBuf;

const LOAD_ERROR_KEY: &str = "notification-load-error";

/// Mutable view of the application state handed to the handlers.
pub struct UpdateContext<'a> {
    pub screen: &'a mut Screen,
    pub config: &'a Config,
    pub api: Option<&'a HttpClient>,
    pub tracker: &'a mut RequestTracker<Screen>,
    pub gallery: &'a mut GalleryState,
    pub top: &'a mut TopState,
    pub favourites: &'a mut FavouritesState,
    pub upload: &'a mut UploadState,
    pub thumbnails: &'a mut ThumbnailCache,
    pub notifications: &'a mut notifications::Manager,
}

/// Error toast carrying the tracker message as detail.
fn failure_toast(key: &str, detail: Option<String>) -> Notification {
    let notification = Notification::error(key);
    match detail {
        Some(detail) => notification.with_detail(detail),
        None => notification,
    }
}

// ----------------------------------------------------------------------
// Navigation
// ----------------------------------------------------------------------

pub fn handle_navbar_message(ctx: &mut UpdateContext<'_>, message: navbar::Message) -> Task<Message> {
    match navbar::update(message) {
        NavbarEvent::Focus(screen) => focus(ctx, screen),
    }
}

/// Switches to a tab and reloads its data, like the tab gaining focus.
pub fn focus(ctx: &mut UpdateContext<'_>, screen: Screen) -> Task<Message> {
    tracing::debug!(?screen, "tab focused");
    *ctx.screen = screen;
    match screen {
        Screen::Images => load_gallery(ctx, true),
        Screen::Top => load_top(ctx),
        Screen::Favourites => load_favourites(ctx),
        Screen::Upload => Task::none(),
    }
}

// ----------------------------------------------------------------------
// Loads
// ----------------------------------------------------------------------

/// Issues a gallery load. `refresh` replaces the image list, otherwise new
/// images are appended.
pub fn load_gallery(ctx: &mut UpdateContext<'_>, refresh: bool) -> Task<Message> {
    let Some(api) = ctx.api.cloned() else {
        return Task::none();
    };
    if refresh {
        ctx.thumbnails.forget_failures();
    }

    let request = ctx.gallery.begin_load(refresh);
    let calls =
        Operation::GALLERY_LOAD.map(|operation| ctx.tracker.begin(Screen::Images, operation));
    let query = ctx.config.api.vote_query();

    Task::perform(actions::load_gallery(api, query), move |result| {
        Message::GalleryLoaded {
            request,
            calls,
            result,
        }
    })
}

pub fn load_top(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(api) = ctx.api.cloned() else {
        return Task::none();
    };
    let ticket = ctx.top.begin_load();
    let call = ctx.tracker.begin(Screen::Top, Operation::ListVotes);
    let query = ctx.config.api.vote_query();

    Task::perform(actions::load_top(api, query), move |result| {
        Message::TopLoaded {
            call,
            ticket,
            result,
        }
    })
}

pub fn load_favourites(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(api) = ctx.api.cloned() else {
        return Task::none();
    };
    let ticket = ctx.favourites.begin_load();
    let call = ctx.tracker.begin(Screen::Favourites, Operation::ListFavourites);

    Task::perform(actions::load_favourites(api), move |result| {
        Message::FavouritesLoaded {
            call,
            ticket,
            result,
        }
    })
}

/// Starts downloads for the URLs that are neither cached nor in flight.
fn fetch_thumbnails<'u>(
    api: Option<&HttpClient>,
    thumbnails: &mut ThumbnailCache,
    urls: impl IntoIterator<Item = &'u str>,
) -> Task<Message> {
    let Some(api) = api else {
        return Task::none();
    };
    let claimed = thumbnails.claim(urls);
    if claimed.is_empty() {
        return Task::none();
    }
    tracing::debug!(count = claimed.len(), "fetching thumbnails");

    Task::batch(claimed.into_iter().map(|url| {
        let api = api.clone();
        Task::perform(
            async move {
                let result = api.fetch_bytes(&url).await;
                (url, result)
            },
            |(url, result)| Message::ThumbnailLoaded { url, result },
        )
    }))
}

fn discard_all(tracker: &mut RequestTracker<Screen>, calls: impl IntoIterator<Item = RequestId>) {
    for call in calls {
        tracker.discard(call);
    }
}

pub fn handle_gallery_loaded(
    ctx: &mut UpdateContext<'_>,
    request: LoadRequest,
    calls: [RequestId; 3],
    result: Result<GalleryData, LoadFailure>,
) -> Task<Message> {
    match result {
        Ok(data) => {
            if !ctx.gallery.apply_loaded(request, data) {
                discard_all(ctx.tracker, calls);
                return Task::none();
            }
            for call in calls {
                ctx.tracker.finish(call, &Ok::<(), ApiError>(()));
            }
            ctx.notifications.clear_key(LOAD_ERROR_KEY);
            let urls = ctx.gallery.images().iter().map(|image| image.url.as_str());
            let task = fetch_thumbnails(ctx.api, ctx.thumbnails, urls);
            let stats = ctx.thumbnails.stats();
            tracing::debug!(
                cached = ctx.thumbnails.len(),
                hits = stats.hits,
                misses = stats.misses,
                evictions = stats.evictions,
                "thumbnail cache"
            );
            task
        }
        Err(failure) => {
            if !ctx.gallery.apply_load_failed(request) {
                discard_all(ctx.tracker, calls);
                return Task::none();
            }
            let mut detail = None;
            for (operation, call) in Operation::GALLERY_LOAD.into_iter().zip(calls) {
                if operation == failure.operation {
                    detail = ctx.tracker.finish(call, &Err::<(), _>(failure.error.clone()));
                } else {
                    ctx.tracker.finish(call, &Ok::<(), ApiError>(()));
                }
            }
            ctx.notifications.push(failure_toast(LOAD_ERROR_KEY, detail));
            Task::none()
        }
    }
}

pub fn handle_top_loaded(
    ctx: &mut UpdateContext<'_>,
    call: RequestId,
    ticket: FetchTicket,
    result: ApiResult<Vec<Vote>>,
) -> Task<Message> {
    if !ctx.top.is_current(ticket) {
        ctx.tracker.discard(call);
        return Task::none();
    }
    let detail = ctx.tracker.finish(call, &result);
    match result {
        Ok(ranked) => {
            ctx.top.apply_loaded(ticket, ranked);
            let urls = ctx
                .top
                .entries()
                .iter()
                .filter_map(|vote| vote.image.as_ref()?.url.as_deref());
            fetch_thumbnails(ctx.api, ctx.thumbnails, urls)
        }
        Err(_) => {
            ctx.notifications
                .push(failure_toast("notification-top-load-error", detail));
            Task::none()
        }
    }
}

pub fn handle_favourites_loaded(
    ctx: &mut UpdateContext<'_>,
    call: RequestId,
    ticket: FetchTicket,
    result: ApiResult<Vec<Favourite>>,
) -> Task<Message> {
    if !ctx.favourites.is_current(ticket) {
        ctx.tracker.discard(call);
        return Task::none();
    }
    let detail = ctx.tracker.finish(call, &result);
    match result {
        Ok(favourites) => {
            ctx.favourites.apply_loaded(ticket, favourites);
            let urls = ctx
                .favourites
                .entries()
                .iter()
                .filter_map(|favourite| favourite.image.url.as_deref());
            fetch_thumbnails(ctx.api, ctx.thumbnails, urls)
        }
        Err(_) => {
            ctx.notifications
                .push(failure_toast("notification-favourites-load-error", detail));
            Task::none()
        }
    }
}

pub fn handle_thumbnail_loaded(
    ctx: &mut UpdateContext<'_>,
    url: String,
    result: ApiResult<Vec<u8>>,
) {
    match result {
        Ok(bytes) => ctx.thumbnails.insert(url, bytes),
        Err(err) => {
            tracing::debug!(%url, error = %err, "thumbnail download failed");
            ctx.thumbnails.fail(url);
        }
    }
}

// ----------------------------------------------------------------------
// Images screen
// ----------------------------------------------------------------------

pub fn handle_images_message(ctx: &mut UpdateContext<'_>, message: images::Message) -> Task<Message> {
    match message {
        images::Message::Refresh => load_gallery(ctx, true),
        images::Message::LoadMore => load_gallery(ctx, false),
        images::Message::Vote(image_id, direction) => {
            let Some(api) = ctx.api.cloned() else {
                return Task::none();
            };
            let pending = ctx.gallery.begin_vote(&image_id, direction);
            let call = ctx.tracker.begin(Screen::Images, Operation::CreateVote);
            tracing::debug!(%image_id, value = pending.value, "vote applied locally");

            Task::perform(actions::submit_vote(api, pending.clone()), move |result| {
                Message::VoteSubmitted {
                    call,
                    pending,
                    result,
                }
            })
        }
        images::Message::ToggleFavourite(image_id) => {
            let Some(api) = ctx.api.cloned() else {
                return Task::none();
            };
            let current = ctx.gallery.favorite_of(&image_id);
            let operation = if current.is_favorite {
                Operation::DeleteFavourite
            } else {
                Operation::CreateFavourite
            };
            let call = ctx.tracker.begin(Screen::Images, operation);

            Task::perform(
                actions::toggle_favourite(api, image_id.clone(), current),
                move |result| Message::FavouriteToggled {
                    call,
                    image_id,
                    result,
                },
            )
        }
        images::Message::RequestDelete(image_id) => {
            ctx.gallery.request_delete(&image_id);
            Task::none()
        }
        images::Message::CancelDelete => {
            ctx.gallery.cancel_delete();
            Task::none()
        }
        images::Message::ConfirmDelete => {
            let Some(image_id) = ctx.gallery.confirm_delete() else {
                return Task::none();
            };
            let Some(api) = ctx.api.cloned() else {
                return Task::none();
            };
            let call = ctx.tracker.begin(Screen::Images, Operation::DeleteImage);

            Task::perform(actions::delete_image(api, image_id), move |result| {
                Message::ImageDeleted { call, result }
            })
        }
    }
}

pub fn handle_vote_submitted(
    ctx: &mut UpdateContext<'_>,
    call: RequestId,
    pending: PendingVote,
    result: ApiResult<CreatedVote>,
) -> Task<Message> {
    let detail = ctx.tracker.finish(call, &result);
    match result {
        Ok(created) => ctx.gallery.confirm_vote(&pending, &created),
        Err(_) => {
            ctx.gallery.rollback_vote(&pending);
            ctx.notifications.push(
                failure_toast("notification-vote-error", detail)
                    .with_arg("direction", pending.direction.as_str()),
            );
        }
    }
    Task::none()
}

pub fn handle_favourite_toggled(
    ctx: &mut UpdateContext<'_>,
    call: RequestId,
    image_id: String,
    result: ApiResult<FavoriteState>,
) -> Task<Message> {
    let detail = ctx.tracker.finish(call, &result);
    match result {
        Ok(state) => ctx.gallery.apply_favorite(&image_id, state),
        Err(_) => ctx
            .notifications
            .push(failure_toast("notification-favourite-error", detail)),
    }
    Task::none()
}

pub fn handle_image_deleted(
    ctx: &mut UpdateContext<'_>,
    call: RequestId,
    result: ApiResult<String>,
) -> Task<Message> {
    let detail = ctx.tracker.finish(call, &result);
    match result {
        Ok(image_id) => {
            tracing::info!(%image_id, "image deleted");
            ctx.gallery.remove_image(&image_id);
        }
        Err(_) => ctx
            .notifications
            .push(failure_toast("notification-delete-error", detail)),
    }
    Task::none()
}

// ----------------------------------------------------------------------
// Upload screen
// ----------------------------------------------------------------------

pub fn handle_upload_message(
    ctx: &mut UpdateContext<'_>,
    message: upload::Message,
    i18n: &I18n,
) -> Task<Message> {
    match message {
        upload::Message::InputChanged(input) => {
            ctx.upload.set_input(input);
            Task::none()
        }
        upload::Message::Browse => {
            let title = i18n.tr("upload-select-button");
            let filter_name = i18n.tr("upload-filter-name");
            Task::perform(
                async move {
                    rfd::AsyncFileDialog::new()
                        .set_title(title)
                        .add_filter(filter_name, PICKER_EXTENSIONS)
                        .pick_file()
                        .await
                        .map(|handle| handle.path().to_path_buf())
                },
                Message::UploadFilePicked,
            )
        }
        upload::Message::Submit => start_upload(ctx),
    }
}

fn start_upload(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(api) = ctx.api.cloned() else {
        return Task::none();
    };
    if ctx.upload.is_uploading() {
        return Task::none();
    }
    let Some(source) = ctx.upload.begin() else {
        ctx.notifications
            .push(Notification::warning("notification-upload-none"));
        return Task::none();
    };

    tracing::info!(%source, "uploading image");
    let call = ctx.tracker.begin(Screen::Upload, Operation::UploadImage);
    Task::perform(actions::upload(api, source), move |result| {
        Message::UploadFinished { call, result }
    })
}

pub fn handle_file_picked(ctx: &mut UpdateContext<'_>, path: Option<PathBuf>) -> Task<Message> {
    if let Some(path) = path {
        ctx.upload.pick(UploadSource::File(path));
    }
    Task::none()
}

/// Dropped files are only taken while the Upload tab is shown.
pub fn handle_file_dropped(ctx: &mut UpdateContext<'_>, path: PathBuf) -> Task<Message> {
    if *ctx.screen != Screen::Upload || ctx.upload.is_uploading() {
        return Task::none();
    }
    ctx.upload.pick(UploadSource::File(path));
    Task::none()
}

pub fn handle_upload_finished(
    ctx: &mut UpdateContext<'_>,
    call: RequestId,
    result: ApiResult<Image>,
) -> Task<Message> {
    let detail = ctx.tracker.finish(call, &result);
    match result {
        Ok(image) => {
            tracing::info!(image_id = %image.id, "image uploaded");
            ctx.upload.succeed();
            ctx.notifications
                .push(Notification::success("notification-upload-success"));
            focus(ctx, Screen::Images)
        }
        Err(err) => {
            ctx.upload
                .fail(detail.unwrap_or_else(|| err.user_message()));
            ctx.notifications
                .push(Notification::error("notification-upload-error"));
            Task::none()
        }
    }
}
