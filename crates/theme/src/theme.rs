//! Minimal theming for Mosaic.
//!
//! Provides colors for the palette, the canvas and placed widgets.

use gpui::Hsla;
use serde::{Deserialize, Serialize};

/// Which built-in theme to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Theme colors for the builder.
#[derive(Clone, Debug)]
pub struct Theme {
    /// Canvas background
    pub canvas_background: Hsla,

    /// Canvas tint while something droppable hovers it
    pub drop_target: Hsla,

    /// Accent for focus and active drags
    pub selection: Hsla,

    /// Hover indicator color
    pub hover: Hsla,

    /// Placed widget background
    pub widget_background: Hsla,

    /// Placed widget border
    pub widget_border: Hsla,

    /// Button widget fill
    pub button_background: Hsla,

    /// Button widget label
    pub button_text: Hsla,

    /// Notice bar background
    pub notice_background: Hsla,

    /// UI background
    pub ui_background: Hsla,

    /// UI border
    pub ui_border: Hsla,

    /// UI text
    pub ui_text: Hsla,

    /// UI text muted
    pub ui_text_muted: Hsla,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            canvas_background: gpui::white(),
            drop_target: hsla(0.58, 0.9, 0.5, 0.08),
            selection: hsla(0.58, 0.9, 0.5, 1.0), // Blue
            hover: hsla(0.58, 0.9, 0.5, 0.3),     // Blue transparent
            widget_background: hsla(0.0, 0.0, 0.99, 1.0),
            widget_border: hsla(0.0, 0.0, 0.85, 1.0),
            button_background: hsla(0.58, 0.8, 0.5, 1.0),
            button_text: gpui::white(),
            notice_background: hsla(0.13, 0.9, 0.85, 1.0),
            ui_background: hsla(0.0, 0.0, 0.98, 1.0),
            ui_border: hsla(0.0, 0.0, 0.9, 1.0),
            ui_text: hsla(0.0, 0.0, 0.1, 1.0),
            ui_text_muted: hsla(0.0, 0.0, 0.5, 1.0),
        }
    }

    pub fn dark() -> Self {
        Self {
            canvas_background: hsla(0.0, 0.0, 0.1, 1.0),
            drop_target: hsla(0.58, 0.9, 0.5, 0.12),
            selection: hsla(0.58, 0.9, 0.5, 1.0),
            hover: hsla(0.58, 0.9, 0.5, 0.3),
            widget_background: hsla(0.0, 0.0, 0.14, 1.0),
            widget_border: hsla(0.0, 0.0, 0.25, 1.0),
            button_background: hsla(0.58, 0.7, 0.45, 1.0),
            button_text: gpui::white(),
            notice_background: hsla(0.13, 0.5, 0.25, 1.0),
            ui_background: hsla(0.0, 0.0, 0.12, 1.0),
            ui_border: hsla(0.0, 0.0, 0.2, 1.0),
            ui_text: hsla(0.0, 0.0, 0.9, 1.0),
            ui_text_muted: hsla(0.0, 0.0, 0.5, 1.0),
        }
    }
}

/// Helper to create Hsla from h, s, l, a values.
pub fn hsla(h: f32, s: f32, l: f32, a: f32) -> Hsla {
    Hsla { h, s, l, a }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_from_snake_case() {
        let mode: ThemeMode = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(mode, ThemeMode::Dark);
        assert_eq!(ThemeMode::default(), ThemeMode::Light);
    }

    #[test]
    fn modes_pick_distinct_backgrounds() {
        assert_ne!(
            Theme::for_mode(ThemeMode::Light).canvas_background,
            Theme::for_mode(ThemeMode::Dark).canvas_background
        );
    }
}
