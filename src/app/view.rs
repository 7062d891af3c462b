// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! This module handles the `view()` function that renders the tab bar, the
//! current screen and the toast overlay.

use super::config::Config;
use super::{Message, Screen};
use crate::api::RequestTracker;
use crate::gallery::{FavouritesState, GalleryState, TopState, UploadState};
use crate::i18n::fluent::I18n;
use crate::ui::navbar::{self, ViewContext as NavbarViewContext};
use crate::ui::notifications::{self, Toast};
use crate::ui::screens::{favourites, images, top, upload};
use crate::ui::thumbnails::ThumbnailCache;
use iced::{
    widget::{Column, Container, Stack},
    Element, Length,
};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: Screen,
    pub config: &'a Config,
    pub api_ready: bool,
    pub tracker: &'a RequestTracker<Screen>,
    pub gallery: &'a GalleryState,
    pub top: &'a TopState,
    pub favourites: &'a FavouritesState,
    pub upload: &'a UploadState,
    pub thumbnails: &'a ThumbnailCache,
    pub notifications: &'a notifications::Manager,
}

/// Renders the current application view based on the active screen.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let columns = ctx.config.gallery.clamped_columns();
    let tracker = ctx.tracker;

    let current_view: Element<'_, Message> = match ctx.screen {
        Screen::Images => images::view(images::ViewContext {
            i18n: ctx.i18n,
            gallery: ctx.gallery,
            thumbnails: ctx.thumbnails,
            columns,
            loading: tracker.is_loading_in(Screen::Images),
            error: tracker.error_for(Screen::Images),
            api_ready: ctx.api_ready,
        })
        .map(Message::Images),
        Screen::Upload => upload::view(upload::ViewContext {
            i18n: ctx.i18n,
            upload: ctx.upload,
            api_ready: ctx.api_ready,
        })
        .map(Message::Upload),
        Screen::Favourites => favourites::view(favourites::ViewContext {
            i18n: ctx.i18n,
            favourites: ctx.favourites,
            thumbnails: ctx.thumbnails,
            columns,
            loading: tracker.is_loading_in(Screen::Favourites),
            error: tracker.error_for(Screen::Favourites),
            api_ready: ctx.api_ready,
        })
        .map(Message::Favourites),
        Screen::Top => top::view(top::ViewContext {
            i18n: ctx.i18n,
            top: ctx.top,
            thumbnails: ctx.thumbnails,
            loading: tracker.is_loading_in(Screen::Top),
            error: tracker.error_for(Screen::Top),
            api_ready: ctx.api_ready,
        })
        .map(Message::Top),
    };

    let navbar_view = navbar::view(NavbarViewContext {
        i18n: ctx.i18n,
        active: ctx.screen,
        busy: tracker.is_loading(),
    })
    .map(Message::Navbar);

    let column = Column::new().push(navbar_view).push(
        Container::new(current_view)
            .width(Length::Fill)
            .height(Length::Fill),
    );

    let toasts = Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification);

    Stack::new()
        .push(column.width(Length::Fill).height(Length::Fill))
        .push(toasts)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
