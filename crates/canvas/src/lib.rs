//! Canvas model for Mosaic.
//!
//! Provides the ordered widget sequence, drop dispatch, persistence and the
//! gpui entity that ties them together.

mod canvas;
mod payload;
mod state;
pub mod store;

pub use canvas::{Canvas, CanvasEvent, TextEdit};
pub use payload::DragPayload;
pub use state::{CanvasError, CanvasState, DropOutcome};
pub use store::{CanvasStore, FileStore, MemoryStore, STORAGE_KEY};
// Re-export widget types for convenience
pub use widget::{Grid, Widget, WidgetContent, WidgetId, WidgetKind, DEFAULT_IMAGE_SRC};
