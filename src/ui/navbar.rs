// SPDX-License-Identifier: MPL-2.0
//! Tab bar shown above every screen.
//!
//! Selecting a tab, including the active one, is reported to the parent as a
//! focus event so the screen can refresh its data.

use crate::app::Screen;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::{
    alignment::Vertical,
    widget::{button, Container, Row, Text},
    Element, Length,
};

/// Tabs in display order.
pub const TABS: [Screen; 4] = [
    Screen::Images,
    Screen::Upload,
    Screen::Favourites,
    Screen::Top,
];

/// Contextual data needed to render the tab bar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub active: Screen,
    /// Whether any remote call is in flight.
    pub busy: bool,
}

/// Messages emitted by the tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Select(Screen),
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Focus(Screen),
}

pub fn update(message: Message) -> Event {
    match message {
        Message::Select(screen) => Event::Focus(screen),
    }
}

/// Translation key of a tab label.
#[must_use]
pub fn label_key(screen: Screen) -> &'static str {
    match screen {
        Screen::Images => "tab-images",
        Screen::Upload => "tab-upload",
        Screen::Favourites => "tab-favourites",
        Screen::Top => "tab-top",
    }
}

/// Render the tab bar.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let mut row = Row::new()
        .spacing(spacing::XS)
        .padding(spacing::XS)
        .align_y(Vertical::Center);

    for screen in TABS {
        let label = Text::new(ctx.i18n.tr(label_key(screen))).size(typography::BODY_LG);
        let tab = button(label)
            .padding([spacing::XS, spacing::MD])
            .on_press(Message::Select(screen));
        let tab = if screen == ctx.active {
            tab.style(styles::button::selected)
        } else {
            tab.style(styles::button::tab)
        };
        row = row.push(tab);
    }

    if ctx.busy {
        row = row
            .push(iced::widget::Space::new().width(Length::Fill))
            .push(Text::new(ctx.i18n.tr("loading")).size(typography::CAPTION));
    }

    Container::new(row)
        .width(Length::Fill)
        .style(styles::container::tab_bar)
        .into()
}
