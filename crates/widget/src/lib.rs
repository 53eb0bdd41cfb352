//! Widget types for Mosaic.
//!
//! This crate provides the flat widget model placed on the canvas.
//! Widgets are displayed in order (index in the list).

mod widget;
mod widget_id;

pub use widget::{Grid, Widget, WidgetContent, WidgetKind, DEFAULT_IMAGE_SRC};
pub use widget_id::WidgetId;
