//! Basic UI components.

use gpui::{div, prelude::*, px, Div};
use theme::Theme;

/// Horizontal stack layout.
pub fn h_stack() -> Div {
    div().flex().flex_row().items_center()
}

/// Vertical stack layout.
pub fn v_stack() -> Div {
    div().flex().flex_col()
}

/// A panel container with background and border.
pub fn panel(theme: &Theme) -> Div {
    div()
        .bg(theme.ui_background)
        .border_1()
        .border_color(theme.ui_border)
        .rounded(px(8.0))
        .p(px(8.0))
}
