//! Values carried by in-flight drags and the view that follows the cursor.

use canvas::{DragPayload, WidgetId, WidgetKind};
use gpui::{div, prelude::*, px, Context, SharedString, Window};
use theme::Theme;

/// A palette token being dragged onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteDrag {
    pub kind: WidgetKind,
}

impl From<PaletteDrag> for DragPayload {
    fn from(drag: PaletteDrag) -> Self {
        DragPayload::Palette { kind: drag.kind }
    }
}

/// A placed widget being dragged to a new position.
///
/// Carries the widget's identity rather than its index, since hover reorders
/// shift indices while the drag is still in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetDrag {
    pub id: WidgetId,
    pub label: SharedString,
}

/// Floating label rendered under the cursor while dragging.
pub struct DragPreview {
    label: SharedString,
    theme: Theme,
}

impl DragPreview {
    pub fn new(label: impl Into<SharedString>, theme: Theme) -> Self {
        Self {
            label: label.into(),
            theme,
        }
    }
}

impl Render for DragPreview {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .px(px(10.0))
            .py(px(4.0))
            .bg(self.theme.ui_background)
            .border_1()
            .border_color(self.theme.selection)
            .rounded(px(4.0))
            .text_sm()
            .text_color(self.theme.ui_text)
            .opacity(0.85)
            .child(self.label.clone())
    }
}
