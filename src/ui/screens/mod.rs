// SPDX-License-Identifier: MPL-2.0
//! Views of the four tabs.
//!
//! Each screen exposes a `ViewContext`, a `Message` enum and a `view`
//! function. State lives in [`crate::gallery`]; the application forwards
//! messages to it.

pub mod favourites;
pub mod images;
pub mod top;
pub mod upload;

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::widget::{Column, Container, Row, Text};
use iced::{Element, Length};

/// Inline error banner.
pub(crate) fn error_banner<'a, M: 'a>(i18n: &I18n, message: &str) -> Element<'a, M> {
    Container::new(
        Text::new(i18n.tr_with_args("error-prefix", &[("message", message)])).size(typography::BODY),
    )
    .width(Length::Fill)
    .padding(spacing::SM)
    .style(styles::container::error_banner)
    .into()
}

/// Centered one-line status such as an empty state or "Loading...".
pub(crate) fn status<'a, M: 'a>(text: String) -> Element<'a, M> {
    Container::new(Text::new(text).size(typography::BODY_LG))
        .center_x(Length::Fill)
        .padding(spacing::XL)
        .into()
}

/// Screen title.
pub(crate) fn title<'a, M: 'a>(text: String) -> Element<'a, M> {
    Text::new(text).size(typography::TITLE_MD).into()
}

/// Lays `cells` out in rows of `columns`, padding the last row so every
/// cell keeps the same width.
pub(crate) fn grid<'a, M: 'a>(cells: Vec<Element<'a, M>>, columns: u16) -> Element<'a, M> {
    let columns = usize::from(columns.max(1));
    let mut grid = Column::new().spacing(spacing::MD).width(Length::Fill);
    let mut row = Row::new().spacing(spacing::MD).width(Length::Fill);
    let mut in_row = 0;

    for cell in cells {
        row = row.push(Container::new(cell).width(Length::FillPortion(1)));
        in_row += 1;
        if in_row == columns {
            grid = grid.push(row);
            row = Row::new().spacing(spacing::MD).width(Length::Fill);
            in_row = 0;
        }
    }

    if in_row > 0 {
        for _ in in_row..columns {
            row = row.push(iced::widget::Space::new().width(Length::FillPortion(1)));
        }
        grid = grid.push(row);
    }

    grid.into()
}
