// SPDX-License-Identifier: MPL-2.0
//! Default values for configuration settings.

// ==========================================================================
// API Defaults
// ==========================================================================

/// Base URL of TheCatAPI.
pub const DEFAULT_API_BASE_URL: &str = "https://api.thecatapi.com/v1";

/// Request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Minimum request timeout in seconds.
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 300;

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Number of thumbnail columns on the Images screen.
pub const DEFAULT_COLUMNS: u16 = 3;

pub const MIN_COLUMNS: u16 = 1;

pub const MAX_COLUMNS: u16 = 6;

/// Number of decoded thumbnails kept in memory.
pub const DEFAULT_THUMBNAIL_CACHE_SIZE: usize = 200;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_TIMEOUT_SECS <= DEFAULT_TIMEOUT_SECS);
    assert!(DEFAULT_TIMEOUT_SECS <= MAX_TIMEOUT_SECS);
    assert!(MIN_COLUMNS <= DEFAULT_COLUMNS);
    assert!(DEFAULT_COLUMNS <= MAX_COLUMNS);
    assert!(DEFAULT_THUMBNAIL_CACHE_SIZE > 0);
};
