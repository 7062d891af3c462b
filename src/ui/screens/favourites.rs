// SPDX-License-Identifier: MPL-2.0
//! Favourites tab: images the user bookmarked and that still exist.

use super::{error_banner, grid, status, title};
use crate::gallery::FavouritesState;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing};
use crate::ui::styles;
use crate::ui::thumbnails::ThumbnailCache;
use iced::{
    alignment::Vertical,
    widget::{button, scrollable, Column, Container, Row, Text},
    Element, Length,
};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub favourites: &'a FavouritesState,
    pub thumbnails: &'a ThumbnailCache,
    pub columns: u16,
    pub loading: bool,
    pub error: Option<&'a str>,
    pub api_ready: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Refresh,
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;

    let mut refresh = button(Text::new(i18n.tr("refresh-button"))).style(styles::button::unselected);
    if ctx.api_ready && !ctx.loading {
        refresh = refresh.on_press(Message::Refresh);
    }

    let mut content = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::MD)
        .width(Length::Fill)
        .push(
            Row::new()
                .align_y(Vertical::Center)
                .push(title(i18n.tr("favourites-title")))
                .push(iced::widget::Space::new().width(Length::Fill))
                .push(refresh),
        );

    if !ctx.api_ready {
        content = content.push(error_banner(i18n, &i18n.tr("missing-api-key")));
    } else if let Some(message) = ctx.error {
        content = content.push(error_banner(i18n, message));
    }

    let entries = ctx.favourites.entries();
    if entries.is_empty() {
        let text = if ctx.loading {
            i18n.tr("loading")
        } else {
            i18n.tr("favourites-empty")
        };
        content = content.push(status(text));
    } else {
        let cells = entries
            .iter()
            .map(|favourite| {
                Container::new(ctx.thumbnails.view(
                    i18n,
                    favourite.image.url.as_deref(),
                    sizing::THUMBNAIL_HEIGHT,
                ))
                .padding(spacing::XS)
                .style(styles::container::card)
                .into()
            })
            .collect();
        content = content.push(grid(cells, ctx.columns));
    }

    scrollable(content).height(Length::Fill).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_renders_empty_state() {
        let i18n = I18n::default();
        let thumbnails = ThumbnailCache::new(4);
        let favourites = FavouritesState::new();

        let _element = view(ViewContext {
            i18n: &i18n,
            favourites: &favourites,
            thumbnails: &thumbnails,
            columns: 3,
            loading: true,
            error: None,
            api_ready: true,
        });
    }
}
