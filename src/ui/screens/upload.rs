// SPDX-License-Identifier: MPL-2.0
//! Upload tab: pick a file, drop one on the window or type a URL.

use super::{error_banner, title};
use crate::gallery::UploadState;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::{
    widget::{button, text_input, Column, Container, Text},
    Element, Length,
};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub upload: &'a UploadState,
    pub api_ready: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    InputChanged(String),
    Browse,
    Submit,
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let uploading = ctx.upload.is_uploading();

    let mut browse =
        button(Text::new(i18n.tr("upload-select-button"))).style(styles::button::unselected);
    let mut input = text_input(&i18n.tr("upload-input-placeholder"), ctx.upload.input())
        .padding(spacing::XS)
        .size(typography::BODY_LG);
    let submit_label = if uploading {
        i18n.tr("upload-button-busy")
    } else {
        i18n.tr("upload-button")
    };
    let mut submit = button(Text::new(submit_label)).style(styles::button::primary);

    if uploading || !ctx.api_ready {
        submit = submit.style(styles::button::disabled());
    } else {
        browse = browse.on_press(Message::Browse);
        input = input
            .on_input(Message::InputChanged)
            .on_submit(Message::Submit);
        submit = submit.on_press(Message::Submit);
    }

    let mut form = Column::new()
        .spacing(spacing::MD)
        .width(Length::Fixed(sizing::FORM_WIDTH))
        .push(title(i18n.tr("upload-title")))
        .push(browse)
        .push(input)
        .push(Text::new(i18n.tr("upload-drop-hint")).size(typography::BODY_SM))
        .push(submit);

    if !ctx.api_ready {
        form = form.push(error_banner(i18n, &i18n.tr("missing-api-key")));
    } else if let Some(message) = ctx.upload.last_error() {
        form = form.push(error_banner(i18n, message));
    }

    Container::new(
        Container::new(form)
            .padding(spacing::LG)
            .style(styles::container::panel),
    )
    .center_x(Length::Fill)
    .padding(spacing::LG)
    .into()
}
