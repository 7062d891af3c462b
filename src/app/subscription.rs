// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! File drops are only listened to while the Upload tab is shown; the tick
//! only runs while toasts are visible.

use super::{Message, Screen};
use iced::{event, time, Subscription};
use std::time::Duration;

/// Interval of the notification auto-dismiss tick.
const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Creates the event subscription for the current screen.
pub fn create_event_subscription(screen: Screen) -> Subscription<Message> {
    match screen {
        Screen::Upload => event::listen_with(|event, _status, _window_id| {
            if let event::Event::Window(iced::window::Event::FileDropped(path)) = event {
                return Some(Message::FileDropped(path));
            }
            None
        }),
        Screen::Images | Screen::Favourites | Screen::Top => Subscription::none(),
    }
}

/// Creates a periodic tick subscription for notification auto-dismiss.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
