// SPDX-License-Identifier: MPL-2.0
//! Screen enumeration for application navigation.

/// Tabs the user can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Images,
    Upload,
    Favourites,
    Top,
}
