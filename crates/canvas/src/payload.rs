use serde::{Deserialize, Serialize};
use widget::WidgetKind;

/// Data attached to a drag gesture that ends on the canvas.
///
/// The origin is told apart by the presence of an index: palette tokens
/// carry only a widget type, canvas widgets carry the index they were
/// dragged from. A record carrying both is a reorder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DragPayload {
    /// An existing widget being reordered.
    Reorder { index: usize },
    /// A palette token creating a new widget.
    Palette {
        #[serde(rename = "type")]
        kind: WidgetKind,
    },
}

impl DragPayload {
    /// Index of the dragged widget, for reorder payloads.
    pub fn origin_index(&self) -> Option<usize> {
        match self {
            Self::Reorder { index } => Some(*index),
            Self::Palette { .. } => None,
        }
    }
}

impl From<WidgetKind> for DragPayload {
    fn from(kind: WidgetKind) -> Self {
        Self::Palette { kind }
    }
}
