//! Rendering for each widget kind.

use crate::components::{h_stack, v_stack};
use canvas::{Grid, WidgetContent};
use gpui::{div, img, prelude::*, px, AnyElement, Div, ImageSource, SharedString};
use std::path::{Path, PathBuf};
use theme::Theme;

/// Absolute paths load from disk. Anything else is a URI or an embedded
/// asset path.
pub(crate) fn image_source(src: &str) -> ImageSource {
    if Path::new(src).is_absolute() {
        ImageSource::from(PathBuf::from(src))
    } else {
        ImageSource::from(SharedString::from(src.to_string()))
    }
}

/// The editable text block. Shows a caret while `editing`.
pub(crate) fn text_body(text: &str, editing: bool, theme: &Theme) -> Div {
    let border = if editing {
        theme.selection
    } else {
        theme.widget_border
    };

    h_stack()
        .min_w(px(160.0))
        .min_h(px(24.0))
        .px(px(6.0))
        .py(px(4.0))
        .border_1()
        .border_color(border)
        .rounded(px(3.0))
        .text_color(theme.ui_text)
        .cursor_text()
        .child(text.to_string())
        .when(editing, |d| {
            d.child(div().w(px(1.0)).h(px(16.0)).bg(theme.selection))
        })
}

pub(crate) fn image_body(src: &str, theme: &Theme) -> Div {
    div()
        .border_1()
        .border_color(theme.widget_border)
        .rounded(px(3.0))
        .child(img(image_source(src)).w(px(100.0)).h(px(75.0)))
}

pub(crate) fn button_body(label: &str, theme: &Theme) -> Div {
    div()
        .px(px(12.0))
        .py(px(6.0))
        .bg(theme.button_background)
        .text_color(theme.button_text)
        .rounded(px(4.0))
        .text_sm()
        .cursor_pointer()
        .child(label.to_string())
}

pub(crate) fn table_body(grid: &Grid, theme: &Theme) -> Div {
    let border = theme.widget_border;
    let text = theme.ui_text;

    v_stack()
        .border_1()
        .border_color(border)
        .children(grid.rows().iter().map(|row| {
            h_stack().children(row.iter().map(|cell| {
                div()
                    .min_w(px(80.0))
                    .px(px(8.0))
                    .py(px(4.0))
                    .border_1()
                    .border_color(border)
                    .text_sm()
                    .text_color(text)
                    .child(cell.clone())
            }))
        }))
}

/// Non-interactive rendering, used for kinds that have no click behavior.
pub(crate) fn static_body(content: &WidgetContent, theme: &Theme) -> AnyElement {
    match content {
        WidgetContent::Text(text) => text_body(text, false, theme).into_any_element(),
        WidgetContent::Image(src) => image_body(src, theme).into_any_element(),
        WidgetContent::Button(label) => button_body(label, theme).into_any_element(),
        WidgetContent::Table(grid) => table_body(grid, theme).into_any_element(),
    }
}

/// Short label for the drag preview.
pub(crate) fn drag_label(content: &WidgetContent) -> SharedString {
    match content {
        WidgetContent::Text(text) | WidgetContent::Button(text) if !text.is_empty() => {
            let short: String = text.chars().take(24).collect();
            format!("{}: {}", content.kind(), short).into()
        }
        _ => content.kind().to_string().into(),
    }
}
