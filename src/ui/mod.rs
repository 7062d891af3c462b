// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Views follow the Elm-style "state down, messages up" pattern: each screen
//! renders from borrowed state and emits messages that the application
//! forwards to the screen models in [`crate::gallery`].
//!
//! # Screens
//!
//! - [`screens`] - "My images", Upload, Favourites and Top tabs
//!
//! # Shared Infrastructure
//!
//! - [`navbar`] - Tab bar
//! - [`confirm_dialog`] - Modal two-choice confirmation
//! - [`thumbnails`] - LRU cache of downloaded images
//! - [`notifications`] - Toast notification system for user feedback
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod confirm_dialog;
pub mod design_tokens;
pub mod navbar;
pub mod notifications;
pub mod screens;
pub mod styles;
pub mod theming;
pub mod thumbnails;
