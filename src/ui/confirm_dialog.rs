// SPDX-License-Identifier: MPL-2.0
//! Modal two-choice confirmation layered over a screen.
//!
//! The backdrop swallows every click; clicking it counts as cancel.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::{
    alignment::{Horizontal, Vertical},
    widget::{button, mouse_area, opaque, Column, Container, Row, Stack, Text},
    Element, Length,
};

/// Text keys and messages of one dialog.
pub struct Dialog<'a, M> {
    pub i18n: &'a I18n,
    pub title_key: &'a str,
    pub message_key: &'a str,
    pub cancel_key: &'a str,
    pub confirm_key: &'a str,
    pub on_cancel: M,
    pub on_confirm: M,
}

impl<'a, M: Clone + 'a> Dialog<'a, M> {
    /// Draws the dialog centered over `base`.
    pub fn overlay(self, base: Element<'a, M>) -> Element<'a, M> {
        let title = Text::new(self.i18n.tr(self.title_key)).size(typography::TITLE_SM);
        let message = Text::new(self.i18n.tr(self.message_key)).size(typography::BODY);

        let cancel = button(Text::new(self.i18n.tr(self.cancel_key)))
            .padding([spacing::XS, spacing::MD])
            .style(styles::button::unselected)
            .on_press(self.on_cancel.clone());
        let confirm = button(Text::new(self.i18n.tr(self.confirm_key)))
            .padding([spacing::XS, spacing::MD])
            .style(styles::button::danger)
            .on_press(self.on_confirm);

        let actions = Row::new()
            .spacing(spacing::SM)
            .push(iced::widget::Space::new().width(Length::Fill))
            .push(cancel)
            .push(confirm);

        let card = Container::new(
            Column::new()
                .spacing(spacing::MD)
                .push(title)
                .push(message)
                .push(actions),
        )
        .width(Length::Fixed(sizing::DIALOG_WIDTH))
        .padding(spacing::LG)
        .style(styles::container::panel);

        let backdrop = Container::new(opaque(card))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .style(styles::container::backdrop);

        Stack::new()
            .push(base)
            .push(opaque(mouse_area(backdrop).on_press(self.on_cancel)))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
