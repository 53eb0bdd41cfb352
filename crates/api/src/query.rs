//! Mosaic queries - read-only access to canvas state.

use canvas::{CanvasState, WidgetContent, WidgetId, WidgetKind};
use serde::{Deserialize, Serialize};

/// A query for canvas state (read-only).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// Get all widgets in display order.
    GetWidgets,

    /// Get the widget at an index.
    GetWidget { index: usize },

    /// Get widget count.
    GetWidgetCount,

    /// Get the widget kinds offered by the palette.
    GetPalette,
}

/// Response to a query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryResult {
    /// Widgets result.
    Widgets { widgets: Vec<WidgetInfo> },

    /// Single widget result.
    Widget { widget: Option<WidgetInfo> },

    /// Count result.
    Count { count: usize },

    /// Palette result.
    Palette { kinds: Vec<WidgetKind> },
}

/// Serializable widget information.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WidgetInfo {
    pub id: WidgetId,
    pub index: usize,
    pub content: WidgetContent,
}

impl WidgetInfo {
    pub fn collect(state: &CanvasState) -> Vec<Self> {
        state
            .widgets()
            .iter()
            .enumerate()
            .map(|(index, widget)| Self {
                id: widget.id,
                index,
                content: widget.content.clone(),
            })
            .collect()
    }
}
