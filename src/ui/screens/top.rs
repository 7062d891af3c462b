// SPDX-License-Identifier: MPL-2.0
//! Top tab: the best-voted images with their rank and score.

use super::{error_banner, status, title};
use crate::gallery::TopState;
use crate::i18n::fluent::I18n;
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
    pub top: &'a TopState,
    pub thumbnails: &'a ThumbnailCache,
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
                .push(title(i18n.tr("top-title")))
                .push(iced::widget::Space::new().width(Length::Fill))
                .push(refresh),
        );

    if !ctx.api_ready {
        content = content.push(error_banner(i18n, &i18n.tr("missing-api-key")));
    } else if let Some(message) = ctx.error {
        content = content.push(error_banner(i18n, message));
    }

    let entries = ctx.top.entries();
    if entries.is_empty() {
        let text = if ctx.loading {
            i18n.tr("loading")
        } else {
            i18n.tr("top-empty")
        };
        content = content.push(status(text));
    }

    for (index, vote) in entries.iter().enumerate() {
        let rank = (index + 1).to_string();
        let score = vote.value.to_string();
        let url = vote.image.as_ref().and_then(|image| image.url.as_deref());

        let entry = Column::new()
            .spacing(spacing::XS)
            .push(
                Row::new()
                    .spacing(spacing::MD)
                    .push(
                        Text::new(i18n.tr_with_args("top-rank", &[("rank", rank.as_str())]))
                            .size(typography::TITLE_SM),
                    )
                    .push(
                        Text::new(i18n.tr_with_args("score-label", &[("score", score.as_str())]))
                            .size(typography::BODY_LG),
                    ),
            )
            .push(ctx.thumbnails.view(i18n, url, sizing::TOP_IMAGE_HEIGHT));

        content = content.push(
            Container::new(entry)
                .padding(spacing::SM)
                .width(Length::Fill)
                .style(styles::container::card),
        );
    }

    scrollable(content).height(Length::Fill).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ImageSnapshot, Vote};

    #[test]
    fn view_renders_ranked_entries() {
        let i18n = I18n::default();
        let thumbnails = ThumbnailCache::new(4);
        let mut top = TopState::new();
        let ticket = top.begin_load();
        top.apply_loaded(
            ticket,
            vec![Vote {
                id: 1,
                image_id: "a".to_string(),
                sub_id: None,
                value: 4,
                created_at: None,
                country_code: None,
                image: Some(ImageSnapshot {
                    id: Some("a".to_string()),
                    url: Some("https://cdn.example/a.jpg".to_string()),
                }),
            }],
        );

        let _element = view(ViewContext {
            i18n: &i18n,
            top: &top,
            thumbnails: &thumbnails,
            loading: false,
            error: None,
            api_ready: true,
        });
    }
}
