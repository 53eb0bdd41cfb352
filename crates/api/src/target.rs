//! Target specification for commands.
//!
//! Commands name the widget they operate on either by its position or by
//! its runtime id. Both are resolved against the canvas when the command
//! executes, never earlier.

use canvas::{CanvasError, CanvasState, WidgetId};
use serde::{Deserialize, Serialize};

/// Specifies which widget a command targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// The widget currently at this index.
    Index(usize),

    /// A specific widget by ID, wherever it is now.
    Widget(WidgetId),
}

impl Target {
    /// Resolve to a current index.
    pub fn resolve(&self, state: &CanvasState) -> Result<usize, CanvasError> {
        match *self {
            Target::Index(index) if index < state.len() => Ok(index),
            Target::Index(index) => Err(CanvasError::IndexOutOfBounds {
                index,
                len: state.len(),
            }),
            Target::Widget(id) => state.index_of(id).ok_or(CanvasError::UnknownWidget(id)),
        }
    }
}

impl From<usize> for Target {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<WidgetId> for Target {
    fn from(id: WidgetId) -> Self {
        Self::Widget(id)
    }
}
