//! Palette of widget types that can be dragged onto the canvas.

use crate::components::{h_stack, panel, v_stack};
use crate::drag::{DragPreview, PaletteDrag};
use assets::Assets;
use canvas::WidgetKind;
use gpui::{
    div, prelude::*, px, svg, AppContext, Context, Div, ElementId, IntoElement, SharedString,
    Window,
};
use strum::IntoEnumIterator;
use theme::Theme;

/// Sidebar listing every [`WidgetKind`].
pub struct PaletteView {
    theme: Theme,
}

impl PaletteView {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Render for PaletteView {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        let theme = &self.theme;
        let items: Vec<_> = WidgetKind::iter()
            .map(|kind| PaletteItem {
                id: ElementId::Name(format!("palette-{}", kind).into()),
                kind,
                theme: theme.clone(),
            })
            .collect();

        panel(theme)
            .w(px(180.0))
            .h_full()
            .child(
                div()
                    .text_xs()
                    .text_color(theme.ui_text_muted)
                    .pb(px(8.0))
                    .child("Widgets"),
            )
            .child(v_stack().gap(px(4.0)).children(items))
    }
}

/// A draggable palette token.
struct PaletteItem {
    id: ElementId,
    kind: WidgetKind,
    theme: Theme,
}

impl IntoElement for PaletteItem {
    type Element = gpui::Stateful<Div>;

    fn into_element(self) -> Self::Element {
        let hover_bg = self.theme.hover;
        let muted = self.theme.ui_text_muted;
        let label: SharedString = self.kind.to_string().into();
        let icon: SharedString = Assets::icon_path(&label).into();
        let preview_theme = self.theme.clone();

        h_stack()
            .id(self.id)
            .w_full()
            .gap(px(8.0))
            .px(px(8.0))
            .py(px(6.0))
            .bg(self.theme.widget_background)
            .border_1()
            .border_color(self.theme.widget_border)
            .rounded(px(4.0))
            .text_sm()
            .text_color(self.theme.ui_text)
            .cursor_grab()
            .hover(move |d| d.bg(hover_bg))
            .on_drag(
                PaletteDrag { kind: self.kind },
                move |drag, _offset, _window, cx| {
                    let label = drag.kind.to_string();
                    let theme = preview_theme.clone();
                    cx.new(|_| DragPreview::new(label, theme))
                },
            )
            .child(svg().path(icon).size(px(14.0)).text_color(muted))
            .child(label)
    }
}
