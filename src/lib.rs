// SPDX-License-Identifier: MPL-2.0
//! `cat_gallery` is a tabbed desktop client for TheCatAPI built with the
//! Iced GUI framework.
//!
//! It lists the images uploaded under an API key, lets the user vote on and
//! favourite them, ranks the most upvoted images, and uploads new pictures.
//! Interface text is localized with Fluent and preferences are stored in a
//! TOML settings file.

pub mod api;
pub mod app;
pub mod error;
pub mod gallery;
pub mod i18n;
pub mod ui;
