// SPDX-License-Identifier: MPL-2.0
//! Downloaded image thumbnails keyed by URL.
//!
//! Bytes are fetched on demand and kept as Iced image handles in an LRU cache.
//! A URL is never requested twice while a download is in flight, and URLs that
//! failed are not retried until the next explicit refresh.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::typography;
use iced::widget::image::{Handle, Image};
use iced::widget::{Container, Text};
use iced::{ContentFit, Element, Length};
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;

/// Counters exposed for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThumbnailStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

pub struct ThumbnailCache {
    cache: LruCache<String, Handle>,
    pending: HashSet<String>,
    failed: HashSet<String>,
    stats: ThumbnailStats,
}

impl std::fmt::Debug for ThumbnailCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThumbnailCache")
            .field("cached", &self.cache.len())
            .field("pending", &self.pending.len())
            .field("failed", &self.failed.len())
            .finish()
    }
}

impl ThumbnailCache {
    /// Creates a cache holding at most `capacity` handles (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            pending: HashSet::new(),
            failed: HashSet::new(),
            stats: ThumbnailStats::default(),
        }
    }

    /// Handle for a downloaded URL. Does not touch the LRU order, views call
    /// this on every frame.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<&Handle> {
        self.cache.peek(url)
    }

    #[must_use]
    pub fn is_pending(&self, url: &str) -> bool {
        self.pending.contains(url)
    }

    #[must_use]
    pub fn has_failed(&self, url: &str) -> bool {
        self.failed.contains(url)
    }

    /// Selects the URLs that need a download and marks them pending.
    ///
    /// Cached URLs are promoted in the LRU order so the visible page is the
    /// last to be evicted.
    pub fn claim<'a, I>(&mut self, urls: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut claimed = Vec::new();
        for url in urls {
            if url.is_empty() || self.failed.contains(url) || self.pending.contains(url) {
                continue;
            }
            if self.cache.get(url).is_some() {
                self.stats.hits += 1;
                continue;
            }
            self.stats.misses += 1;
            self.pending.insert(url.to_string());
            claimed.push(url.to_string());
        }
        claimed
    }

    /// Stores downloaded bytes for a URL.
    pub fn insert(&mut self, url: String, bytes: Vec<u8>) {
        self.pending.remove(&url);
        // `push` returns either the replaced entry of the same key or the evicted one.
        if let Some((previous, _)) = self.cache.push(url, Handle::from_bytes(bytes)) {
            if !self.cache.contains(&previous) {
                self.stats.evictions += 1;
            }
        }
    }

    /// Records a failed download.
    pub fn fail(&mut self, url: String) {
        self.pending.remove(&url);
        self.failed.insert(url);
    }

    /// Allows failed URLs to be requested again.
    pub fn forget_failures(&mut self) {
        self.failed.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> ThumbnailStats {
        self.stats
    }

    /// Renders the image behind `url` at a fixed height, or a placeholder
    /// while it downloads.
    pub fn view<'a, M: 'a>(&self, i18n: &I18n, url: Option<&str>, height: f32) -> Element<'a, M> {
        let url = url.unwrap_or_default();
        let content: Element<'a, M> = match self.get(url) {
            Some(handle) => Image::new(handle.clone())
                .content_fit(ContentFit::Cover)
                .width(Length::Fill)
                .height(Length::Fixed(height))
                .into(),
            None => {
                let key = if url.is_empty() || self.has_failed(url) {
                    "thumbnail-unavailable"
                } else {
                    "loading"
                };
                Text::new(i18n.tr(key)).size(typography::CAPTION).into()
            }
        };

        Container::new(content)
            .center_x(Length::Fill)
            .center_y(Length::Fixed(height))
            .into()
    }
}
