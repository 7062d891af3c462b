// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the four tabs.
//!
//! The `App` struct wires together the screen models, the remote client,
//! localization and notifications, and translates messages into remote calls
//! run as Iced tasks.

pub mod config;
mod message;
pub mod paths;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::api::{HttpClient, RequestTracker};
use crate::gallery::{FavouritesState, GalleryState, TopState, UploadState};
use crate::i18n::fluent::I18n;
use crate::ui::notifications::{self, Notification};
use crate::ui::theming::ThemeMode;
use crate::ui::thumbnails::ThumbnailCache;
use config::Config;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    screen: Screen,
    config: Config,
    /// Remote client; `None` when no credential is configured.
    api: Option<HttpClient>,
    tracker: RequestTracker<Screen>,
    gallery: GalleryState,
    top: TopState,
    favourites: FavouritesState,
    upload: UploadState,
    thumbnails: ThumbnailCache,
    theme_mode: ThemeMode,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("api_ready", &self.api.is_some())
            .field("in_flight", &self.tracker.in_flight_count())
            .field("images", &self.gallery.images().len())
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 760;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1024;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 560;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Picks the credential: the runtime value (CLI or environment) first, then
/// the settings file. Blank values are skipped at every step.
fn resolve_api_key(runtime: Option<String>, config: &Config) -> Option<String> {
    let non_blank = |key: &String| !key.trim().is_empty();
    runtime
        .filter(non_blank)
        .or_else(|| config.api.api_key.clone().filter(non_blank))
}

/// Builds the remote client when a non-blank credential is available.
fn build_client(config: &Config, api_key: Option<String>) -> Option<HttpClient> {
    let api_key = api_key.filter(|key| !key.trim().is_empty())?;
    match HttpClient::new(&config.api.client_config(Some(api_key))) {
        Ok(client) => Some(client),
        Err(err) => {
            tracing::error!(error = %err, "could not build the HTTP client");
            None
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::with_config(I18n::default(), Config::default(), None)
    }
}

impl App {
    fn with_config(i18n: I18n, config: Config, api: Option<HttpClient>) -> Self {
        Self {
            i18n,
            screen: Screen::default(),
            thumbnails: ThumbnailCache::new(config.gallery.thumbnail_cache_size),
            theme_mode: config.general.theme_mode,
            config,
            api,
            tracker: RequestTracker::new(),
            gallery: GalleryState::new(),
            top: TopState::new(),
            favourites: FavouritesState::new(),
            upload: UploadState::new(),
            notifications: notifications::Manager::new(),
        }
    }

    /// Loads the settings, builds the client and focuses the Images tab,
    /// which issues the first gallery load.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);
        let api_key = resolve_api_key(flags.api_key, &config);
        let api = build_client(&config, api_key);

        let mut app = Self::with_config(i18n, config, api);

        if let Some(key) = config_warning {
            app.notifications.push(Notification::warning(key));
        }
        if app.api.is_none() {
            tracing::warn!("no API key configured, remote calls are disabled");
            app.notifications
                .push(Notification::warning("notification-missing-api-key"));
        } else {
            tracing::info!(base_url = %app.config.api.base_url, "starting");
        }

        let task = app.update(Message::Navbar(crate::ui::navbar::Message::Select(
            Screen::Images,
        )));
        (app, task)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        let tab = self.i18n.tr(crate::ui::navbar::label_key(self.screen));
        format!("{tab} - {app_name}")
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription(self.screen);
        let tick_sub =
            subscription::create_tick_subscription(self.notifications.has_notifications());
        Subscription::batch([event_sub, tick_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            screen: &mut self.screen,
            config: &self.config,
            api: self.api.as_ref(),
            tracker: &mut self.tracker,
            gallery: &mut self.gallery,
            top: &mut self.top,
            favourites: &mut self.favourites,
            upload: &mut self.upload,
            thumbnails: &mut self.thumbnails,
            notifications: &mut self.notifications,
        };

        match message {
            Message::Navbar(navbar_message) => {
                update::handle_navbar_message(&mut ctx, navbar_message)
            }
            Message::Images(images_message) => {
                update::handle_images_message(&mut ctx, images_message)
            }
            Message::Upload(upload_message) => {
                update::handle_upload_message(&mut ctx, upload_message, &self.i18n)
            }
            Message::Top(crate::ui::screens::top::Message::Refresh) => update::load_top(&mut ctx),
            Message::Favourites(crate::ui::screens::favourites::Message::Refresh) => {
                update::load_favourites(&mut ctx)
            }
            Message::Notification(notification_message) => {
                self.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::GalleryLoaded {
                request,
                calls,
                result,
            } => update::handle_gallery_loaded(&mut ctx, request, calls, result),
            Message::VoteSubmitted {
                call,
                pending,
                result,
            } => update::handle_vote_submitted(&mut ctx, call, pending, result),
            Message::FavouriteToggled {
                call,
                image_id,
                result,
            } => update::handle_favourite_toggled(&mut ctx, call, image_id, result),
            Message::ImageDeleted { call, result } => {
                update::handle_image_deleted(&mut ctx, call, result)
            }
            Message::TopLoaded {
                call,
                ticket,
                result,
            } => update::handle_top_loaded(&mut ctx, call, ticket, result),
            Message::FavouritesLoaded {
                call,
                ticket,
                result,
            } => update::handle_favourites_loaded(&mut ctx, call, ticket, result),
            Message::UploadFinished { call, result } => {
                update::handle_upload_finished(&mut ctx, call, result)
            }
            Message::UploadFilePicked(path) => update::handle_file_picked(&mut ctx, path),
            Message::FileDropped(path) => update::handle_file_dropped(&mut ctx, path),
            Message::ThumbnailLoaded { url, result } => {
                update::handle_thumbnail_loaded(&mut ctx, url, result);
                Task::none()
            }
            Message::Tick(_instant) => {
                // Tick notification manager to handle auto-dismiss
                self.notifications.tick();
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            screen: self.screen,
            config: &self.config,
            api_ready: self.api.is_some(),
            tracker: &self.tracker,
            gallery: &self.gallery,
            top: &self.top,
            favourites: &self.favourites,
            upload: &self.upload,
            thumbnails: &self.thumbnails,
            notifications: &self.notifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, Favourite, Image, ImageSnapshot, Operation, Vote};
    use crate::gallery::{GalleryData, LoadFailure, VoteDirection};
    use crate::ui::navbar;
    use crate::ui::screens::{images, upload};
    use std::path::PathBuf;

    fn image(id: &str) -> Image {
        Image {
            id: id.to_string(),
            url: format!("https://cdn.example.test/{id}.jpg"),
            width: 1,
            height: 1,
            sub_id: None,
            created_at: None,
            original_filename: None,
        }
    }

    fn vote(image_id: &str, value: i32) -> Vote {
        Vote {
            id: 1,
            image_id: image_id.to_string(),
            sub_id: None,
            value,
            created_at: None,
            country_code: None,
            image: Some(ImageSnapshot {
                id: Some(image_id.to_string()),
                url: Some(format!("https://cdn.example.test/{image_id}.jpg")),
            }),
        }
    }

    fn english() -> I18n {
        I18n::new(Some("en-US".to_string()), &Config::default())
    }

    fn offline_app() -> App {
        App::with_config(english(), Config::default(), None)
    }

    /// App with a configured client. Tasks are never executed by these
    /// tests, only the state transitions are checked.
    fn online_app() -> App {
        let config = Config::default();
        let api = build_client(&config, Some("test-key".to_string()));
        assert!(api.is_some());
        App::with_config(english(), config, api)
    }

    /// Focuses the Images tab and returns the ids the load registered.
    fn start_gallery_load(app: &mut App) -> (crate::gallery::LoadRequest, [crate::api::RequestId; 3]) {
        let request = app.gallery.begin_load(true);
        let calls = Operation::GALLERY_LOAD.map(|op| app.tracker.begin(Screen::Images, op));
        (request, calls)
    }

    #[test]
    fn missing_key_disables_remote_calls() {
        let mut app = offline_app();
        let _ = app.update(Message::Navbar(navbar::Message::Select(Screen::Top)));

        assert_eq!(app.screen, Screen::Top);
        assert!(!app.tracker.is_loading());
    }

    #[test]
    fn blank_runtime_key_falls_back_to_settings() {
        let mut config = Config::default();
        config.api.api_key = Some("from-settings".to_string());

        assert_eq!(
            resolve_api_key(Some("  ".to_string()), &config).as_deref(),
            Some("from-settings")
        );
        assert_eq!(
            resolve_api_key(Some("from-env".to_string()), &config).as_deref(),
            Some("from-env")
        );

        config.api.api_key = Some(String::new());
        assert!(resolve_api_key(Some(String::new()), &config).is_none());
    }

    #[test]
    fn blank_api_key_is_ignored() {
        assert!(build_client(&Config::default(), Some("   ".to_string())).is_none());
        assert!(build_client(&Config::default(), None).is_none());
    }

    #[test]
    fn focusing_images_tab_starts_all_three_calls() {
        let mut app = online_app();
        let _ = app.update(Message::Navbar(navbar::Message::Select(Screen::Images)));

        assert!(app.tracker.is_loading_in(Screen::Images));
        assert!(!app.tracker.is_loading_in(Screen::Top));
        assert_eq!(app.tracker.in_flight_count(), 3);
        assert!(app.gallery.is_refreshing());
    }

    #[test]
    fn gallery_loaded_applies_data_and_clears_loading() {
        let mut app = online_app();
        let (request, calls) = start_gallery_load(&mut app);

        let _ = app.update(Message::GalleryLoaded {
            request,
            calls,
            result: Ok(GalleryData {
                images: vec![image("a"), image("b")],
                votes: vec![vote("a", 3)],
                favourites: Vec::new(),
            }),
        });

        assert_eq!(app.gallery.images().len(), 2);
        assert_eq!(app.gallery.score_of("a"), 3);
        assert!(!app.tracker.is_loading());
        // Both thumbnails were requested.
        assert!(app.thumbnails.is_pending("https://cdn.example.test/a.jpg"));
        assert!(app.thumbnails.is_pending("https://cdn.example.test/b.jpg"));
    }

    #[test]
    fn gallery_failure_is_reported_against_the_failing_call() {
        let mut app = online_app();
        let (request, calls) = start_gallery_load(&mut app);

        let _ = app.update(Message::GalleryLoaded {
            request,
            calls,
            result: Err(LoadFailure {
                operation: Operation::ListVotes,
                error: ApiError::Transport("offline".to_string()),
            }),
        });

        assert_eq!(
            app.tracker.error_for(Screen::Images),
            Some("Failed to get votes: offline")
        );
        assert!(app.tracker.error_for(Screen::Top).is_none());
        assert!(!app.gallery.is_refreshing());
        assert_eq!(app.notifications.visible_count(), 1);
    }

    #[test]
    fn stale_gallery_load_is_ignored() {
        let mut app = online_app();
        let (old_request, old_calls) = start_gallery_load(&mut app);
        let (new_request, new_calls) = start_gallery_load(&mut app);

        let _ = app.update(Message::GalleryLoaded {
            request: new_request,
            calls: new_calls,
            result: Ok(GalleryData {
                images: vec![image("new")],
                ..GalleryData::default()
            }),
        });
        let _ = app.update(Message::GalleryLoaded {
            request: old_request,
            calls: old_calls,
            result: Ok(GalleryData {
                images: vec![image("old")],
                ..GalleryData::default()
            }),
        });

        let ids: Vec<&str> = app.gallery.images().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["new"]);
        assert!(!app.tracker.is_loading());
    }

    #[test]
    fn late_failure_of_superseded_gallery_load_is_not_shown() {
        let mut app = online_app();
        let (old_request, old_calls) = start_gallery_load(&mut app);
        let (new_request, new_calls) = start_gallery_load(&mut app);

        let _ = app.update(Message::GalleryLoaded {
            request: new_request,
            calls: new_calls,
            result: Ok(GalleryData {
                images: vec![image("new")],
                ..GalleryData::default()
            }),
        });
        let _ = app.update(Message::GalleryLoaded {
            request: old_request,
            calls: old_calls,
            result: Err(LoadFailure {
                operation: Operation::ListImages,
                error: ApiError::Transport("timed out".to_string()),
            }),
        });

        assert!(app.tracker.error_for(Screen::Images).is_none());
        assert_eq!(app.notifications.visible_count(), 0);
        assert!(!app.tracker.is_loading());
        assert_eq!(app.gallery.images().len(), 1);
    }

    #[test]
    fn gallery_votes_failure_stays_on_images_screen() {
        let mut app = online_app();
        let (request, calls) = start_gallery_load(&mut app);
        let _ = app.update(Message::GalleryLoaded {
            request,
            calls,
            result: Err(LoadFailure {
                operation: Operation::ListVotes,
                error: ApiError::Transport("offline".to_string()),
            }),
        });

        let _ = app.update(Message::Navbar(navbar::Message::Select(Screen::Top)));

        assert!(app.tracker.is_loading_in(Screen::Top));
        assert!(!app.tracker.is_loading_in(Screen::Images));
        assert!(app.tracker.error_for(Screen::Top).is_none());
        assert_eq!(
            app.tracker.error_for(Screen::Images),
            Some("Failed to get votes: offline")
        );
    }

    #[test]
    fn late_failure_of_superseded_top_load_is_discarded() {
        let mut app = online_app();
        let old_ticket = app.top.begin_load();
        let old_call = app.tracker.begin(Screen::Top, Operation::ListVotes);
        let new_ticket = app.top.begin_load();
        let new_call = app.tracker.begin(Screen::Top, Operation::ListVotes);

        let _ = app.update(Message::TopLoaded {
            call: new_call,
            ticket: new_ticket,
            result: Ok(vec![vote("a", 4)]),
        });
        let _ = app.update(Message::TopLoaded {
            call: old_call,
            ticket: old_ticket,
            result: Err(ApiError::Transport("timed out".to_string())),
        });

        assert_eq!(app.top.entries().len(), 1);
        assert!(app.tracker.error_for(Screen::Top).is_none());
        assert_eq!(app.notifications.visible_count(), 0);
        assert!(!app.tracker.is_loading());
    }

    #[test]
    fn late_failure_of_superseded_favourites_load_is_discarded() {
        let mut app = online_app();
        let old_ticket = app.favourites.begin_load();
        let old_call = app
            .tracker
            .begin(Screen::Favourites, Operation::ListFavourites);
        let _ = app.favourites.begin_load();

        let _ = app.update(Message::FavouritesLoaded {
            call: old_call,
            ticket: old_ticket,
            result: Err(ApiError::Transport("timed out".to_string())),
        });

        assert!(app.tracker.error_for(Screen::Favourites).is_none());
        assert_eq!(app.notifications.visible_count(), 0);
        assert!(!app.tracker.is_loading());
    }

    #[test]
    fn failed_vote_is_rolled_back_with_toast() {
        let mut app = online_app();
        let _ = app.update(Message::Images(images::Message::Vote(
            "a".to_string(),
            VoteDirection::Up,
        )));
        assert_eq!(app.gallery.score_of("a"), 1);
        assert!(app.tracker.is_loading_in(Screen::Images));

        let pending = crate::gallery::PendingVote {
            image_id: "a".to_string(),
            previous: None,
            value: 1,
            direction: VoteDirection::Up,
        };
        let call = app.tracker.begin(Screen::Images, Operation::CreateVote);
        let _ = app.update(Message::VoteSubmitted {
            call,
            pending,
            result: Err(ApiError::Api {
                status: 400,
                message: "INVALID_ACCOUNT".to_string(),
            }),
        });

        assert!(app.gallery.scores().get("a").is_none());
        assert_eq!(app.notifications.visible_count(), 1);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut app = online_app();
        let _ = app.update(Message::Images(images::Message::RequestDelete(
            "a".to_string(),
        )));
        assert_eq!(app.gallery.pending_delete(), Some("a"));
        assert!(!app.tracker.is_loading());

        let _ = app.update(Message::Images(images::Message::CancelDelete));
        assert_eq!(app.gallery.pending_delete(), None);

        let _ = app.update(Message::Images(images::Message::RequestDelete(
            "a".to_string(),
        )));
        let _ = app.update(Message::Images(images::Message::ConfirmDelete));
        assert_eq!(app.gallery.pending_delete(), None);
        assert!(app.tracker.is_loading_in(Screen::Images));
    }

    #[test]
    fn failed_delete_leaves_images_and_scores_unchanged() {
        let mut app = online_app();
        let (request, calls) = start_gallery_load(&mut app);
        let _ = app.update(Message::GalleryLoaded {
            request,
            calls,
            result: Ok(GalleryData {
                images: vec![image("a"), image("b")],
                votes: vec![vote("a", 2)],
                favourites: Vec::new(),
            }),
        });
        let images_before = app.gallery.images().to_vec();
        let scores_before = app.gallery.scores().clone();

        let _ = app.update(Message::Images(images::Message::RequestDelete(
            "a".to_string(),
        )));
        let _ = app.update(Message::Images(images::Message::ConfirmDelete));
        let call = app.tracker.begin(Screen::Images, Operation::DeleteImage);
        let _ = app.update(Message::ImageDeleted {
            call,
            result: Err(ApiError::Api {
                status: 500,
                message: "boom".to_string(),
            }),
        });

        assert_eq!(app.gallery.images(), images_before.as_slice());
        assert_eq!(app.gallery.scores(), &scores_before);
        assert_eq!(app.notifications.visible_count(), 1);
        assert_eq!(
            app.notifications.visible().next().map(Notification::message_key),
            Some("notification-delete-error")
        );
    }

    #[test]
    fn upload_without_selection_alerts() {
        let mut app = online_app();
        let _ = app.update(Message::Upload(upload::Message::Submit));

        assert!(!app.upload.is_uploading());
        assert_eq!(
            app.notifications.visible().next().map(Notification::message_key),
            Some("notification-upload-none")
        );
    }

    #[test]
    fn successful_upload_returns_to_images() {
        let mut app = online_app();
        app.screen = Screen::Upload;
        let _ = app.update(Message::UploadFilePicked(Some(PathBuf::from("/tmp/cat.png"))));
        let _ = app.update(Message::Upload(upload::Message::Submit));
        assert!(app.upload.is_uploading());

        let call = app.tracker.begin(Screen::Upload, Operation::UploadImage);
        let _ = app.update(Message::UploadFinished {
            call,
            result: Ok(image("new")),
        });

        assert_eq!(app.screen, Screen::Images);
        assert!(!app.upload.is_uploading());
        assert_eq!(app.upload.input(), "");
        assert!(app.tracker.is_loading_in(Screen::Images));
    }

    #[test]
    fn dropped_file_is_only_taken_on_upload_tab() {
        let mut app = online_app();
        let _ = app.update(Message::FileDropped(PathBuf::from("/tmp/cat.png")));
        assert_eq!(app.upload.input(), "");

        app.screen = Screen::Upload;
        let _ = app.update(Message::FileDropped(PathBuf::from("/tmp/cat.png")));
        assert_eq!(app.upload.input(), "/tmp/cat.png");
    }

    #[test]
    fn focusing_favourites_clears_and_reloads() {
        let mut app = online_app();
        let ticket = app.favourites.begin_load();
        app.favourites.apply_loaded(
            ticket,
            vec![Favourite {
                id: 7,
                image_id: "a".to_string(),
                sub_id: None,
                user_id: None,
                created_at: None,
                image: ImageSnapshot {
                    id: Some("a".to_string()),
                    url: None,
                },
            }],
        );
        assert_eq!(app.favourites.entries().len(), 1);

        let _ = app.update(Message::Navbar(navbar::Message::Select(Screen::Favourites)));
        assert!(app.favourites.entries().is_empty());
        assert!(app.tracker.is_loading_in(Screen::Favourites));
    }

    #[test]
    fn title_names_the_active_tab() {
        let app = offline_app();
        assert_eq!(app.title(), "My images - Cat Gallery");
    }
}
