// SPDX-License-Identifier: MPL-2.0
//! "My images" tab: the uploaded images with their score, vote buttons,
//! favourite toggle and delete action.

use super::{error_banner, grid, status, title};
use crate::api::Image;
use crate::gallery::{GalleryState, VoteDirection};
use crate::i18n::fluent::I18n;
use crate::ui::confirm_dialog::Dialog;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::thumbnails::ThumbnailCache;
use iced::{
    alignment::Vertical,
    widget::{button, scrollable, Column, Container, Row, Text},
    Element, Length,
};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub gallery: &'a GalleryState,
    pub thumbnails: &'a ThumbnailCache,
    pub columns: u16,
    /// A gallery load is in flight.
    pub loading: bool,
    /// Latest failure among the calls issued by this screen.
    pub error: Option<&'a str>,
    /// False when no credential is configured.
    pub api_ready: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Refresh,
    LoadMore,
    Vote(String, VoteDirection),
    ToggleFavourite(String),
    RequestDelete(String),
    CancelDelete,
    ConfirmDelete,
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;

    let refresh_label = if ctx.gallery.is_refreshing() {
        i18n.tr("loading")
    } else {
        i18n.tr("refresh-button")
    };
    let mut refresh = button(Text::new(refresh_label)).style(styles::button::unselected);
    let mut load_more = button(Text::new(i18n.tr("load-more-button"))).style(styles::button::unselected);
    if ctx.api_ready && !ctx.loading {
        refresh = refresh.on_press(Message::Refresh);
        load_more = load_more.on_press(Message::LoadMore);
    }

    let header = Row::new()
        .spacing(spacing::SM)
        .align_y(Vertical::Center)
        .push(title(i18n.tr("tab-images")))
        .push(iced::widget::Space::new().width(Length::Fill))
        .push(refresh)
        .push(load_more);

    let mut content = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::MD)
        .width(Length::Fill)
        .push(header);

    if !ctx.api_ready {
        content = content.push(error_banner(i18n, &i18n.tr("missing-api-key")));
    } else if let Some(message) = ctx.error {
        content = content.push(error_banner(i18n, message));
    }

    let images = ctx.gallery.images();
    if images.is_empty() {
        let text = if ctx.loading {
            i18n.tr("loading")
        } else {
            i18n.tr("images-empty")
        };
        content = content.push(status(text));
    } else {
        let cards = images.iter().map(|image| card(&ctx, image)).collect();
        content = content.push(grid(cards, ctx.columns));
    }

    let base: Element<'a, Message> = scrollable(content).height(Length::Fill).into();

    if ctx.gallery.pending_delete().is_some() {
        Dialog {
            i18n,
            title_key: "delete-dialog-title",
            message_key: "delete-dialog-message",
            cancel_key: "delete-dialog-cancel",
            confirm_key: "delete-dialog-confirm",
            on_cancel: Message::CancelDelete,
            on_confirm: Message::ConfirmDelete,
        }
        .overlay(base)
    } else {
        base
    }
}

fn card<'a>(ctx: &ViewContext<'a>, image: &Image) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let score = ctx.gallery.score_of(&image.id).to_string();
    let favourite = ctx.gallery.favorite_of(&image.id);

    let vote_up = button(Text::new(i18n.tr("vote-up-button")))
        .style(styles::button::primary)
        .on_press(Message::Vote(image.id.clone(), VoteDirection::Up));
    let vote_down = button(Text::new(i18n.tr("vote-down-button")))
        .style(styles::button::unselected)
        .on_press(Message::Vote(image.id.clone(), VoteDirection::Down));

    let favourite_button = if favourite.is_favorite {
        button(Text::new(i18n.tr("favourite-remove-button"))).style(styles::button::selected)
    } else {
        button(Text::new(i18n.tr("favourite-add-button"))).style(styles::button::unselected)
    }
    .on_press(Message::ToggleFavourite(image.id.clone()));

    let delete = button(Text::new(i18n.tr("delete-button")))
        .style(styles::button::danger)
        .on_press(Message::RequestDelete(image.id.clone()));

    let actions = Row::new()
        .spacing(spacing::XXS)
        .push(vote_up)
        .push(vote_down)
        .push(favourite_button)
        .push(delete)
        .wrap();

    Container::new(
        Column::new()
            .spacing(spacing::XS)
            .push(
                ctx.thumbnails
                    .view(i18n, Some(image.url.as_str()), sizing::THUMBNAIL_HEIGHT),
            )
            .push(
                Text::new(i18n.tr_with_args("score-label", &[("score", score.as_str())]))
                    .size(typography::BODY),
            )
            .push(actions),
    )
    .padding(spacing::XS)
    .style(styles::container::card)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::GalleryData;

    fn image(id: &str) -> Image {
        Image {
            id: id.to_string(),
            url: format!("https://cdn.example/{id}.jpg"),
            width: 10,
            height: 10,
            sub_id: None,
            created_at: None,
            original_filename: None,
        }
    }

    #[test]
    fn view_renders_grid_and_dialog() {
        let i18n = I18n::default();
        let thumbnails = ThumbnailCache::new(8);
        let mut gallery = GalleryState::new();
        let request = gallery.begin_load(true);
        gallery.apply_loaded(
            request,
            GalleryData {
                images: vec![image("a"), image("b"), image("c")],
                ..GalleryData::default()
            },
        );
        gallery.request_delete("b");

        let _element = view(ViewContext {
            i18n: &i18n,
            gallery: &gallery,
            thumbnails: &thumbnails,
            columns: 2,
            loading: false,
            error: Some("Failed to create vote: boom"),
            api_ready: true,
        });
    }

    #[test]
    fn view_renders_missing_key_state() {
        let i18n = I18n::default();
        let thumbnails = ThumbnailCache::new(8);
        let gallery = GalleryState::new();

        let _element = view(ViewContext {
            i18n: &i18n,
            gallery: &gallery,
            thumbnails: &thumbnails,
            columns: 3,
            loading: false,
            error: None,
            api_ready: false,
        });
    }
}
