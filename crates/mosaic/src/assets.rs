//! Serves the embedded assets to gpui.

use anyhow::Result;
use gpui::{AssetSource, SharedString};
use std::borrow::Cow;

/// Bridges gpui's [`AssetSource`] to the embedded assets crate.
pub struct Assets;

impl AssetSource for Assets {
    fn load(&self, path: &str) -> Result<Option<Cow<'static, [u8]>>> {
        Ok(::assets::Assets::get_asset(path))
    }

    fn list(&self, path: &str) -> Result<Vec<SharedString>> {
        let prefix = if path.is_empty() || path.ends_with('/') {
            path.to_string()
        } else {
            format!("{}/", path)
        };

        // Immediate children only
        let mut items: Vec<SharedString> = ::assets::Assets::list()
            .filter_map(|asset_path| {
                let rest = asset_path.strip_prefix(prefix.as_str())?;
                let name = rest.split('/').next().unwrap_or_default();
                (!name.is_empty()).then(|| SharedString::from(name.to_string()))
            })
            .collect();
        items.sort();
        items.dedup();
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_embedded_placeholder() {
        let bytes = Assets.load(canvas::DEFAULT_IMAGE_SRC).unwrap();
        assert!(bytes.is_some());
        assert!(Assets.load("missing.svg").unwrap().is_none());
    }

    #[test]
    fn lists_immediate_children() {
        let root = Assets.list("").unwrap();
        assert!(root.iter().any(|name| name.to_string() == "svg"));
        assert!(root.iter().any(|name| name.to_string() == "images"));

        let icons = Assets.list("svg").unwrap();
        assert_eq!(icons.len(), 4);
        assert!(icons.iter().any(|name| name.to_string() == "table.svg"));
    }
}
