//! Embedded assets for Mosaic
//!
//! This module provides compile-time embedded assets using rust-embed.
//! All assets are loaded from the assets directory and embedded into the binary.

use rust_embed::RustEmbed;
use std::borrow::Cow;

/// Embedded assets from the assets directory
///
/// This includes the palette icons and the placeholder image new image
/// widgets point at.
#[derive(RustEmbed)]
#[folder = "assets"]
#[prefix = ""]
pub struct Assets;

impl Assets {
    /// Get an asset by its path
    ///
    /// Returns None if the asset doesn't exist.
    pub fn get_asset(path: &str) -> Option<Cow<'static, [u8]>> {
        Self::get(path).map(|file| file.data)
    }

    /// Get an asset as a string
    ///
    /// Returns None if the asset doesn't exist or isn't valid UTF-8.
    pub fn get_text(path: &str) -> Option<String> {
        Self::get_asset(path).and_then(|data| String::from_utf8(data.to_vec()).ok())
    }

    /// Path of the palette icon for a widget type name, e.g. `"Table"`.
    pub fn icon_path(name: &str) -> String {
        format!("svg/{}.svg", name.to_lowercase())
    }

    /// List all available assets
    pub fn list() -> impl Iterator<Item = Cow<'static, str>> {
        Self::iter()
    }

    /// List all SVG icons
    ///
    /// Returns an iterator over all SVG icon names (without extension).
    pub fn list_icons() -> impl Iterator<Item = String> {
        Self::iter()
            .filter(|path| path.starts_with("svg/") && path.ends_with(".svg"))
            .map(|path| {
                path.strip_prefix("svg/")
                    .and_then(|p| p.strip_suffix(".svg"))
                    .unwrap_or("")
                    .to_string()
            })
    }
}
