//! Views for the Mosaic builder: the widget palette and the drop canvas.

mod canvas_view;
mod components;
mod drag;
mod palette;
mod text_input;
mod widget_view;

pub use canvas_view::{CanvasView, HoverHalf, KeyAction};
pub use components::{h_stack, panel, v_stack};
pub use drag::{DragPreview, PaletteDrag, WidgetDrag};
pub use palette::PaletteView;
