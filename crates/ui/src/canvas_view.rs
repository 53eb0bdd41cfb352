//! The drop canvas: renders placed widgets and turns gestures into commands.

use crate::components::{h_stack, v_stack};
use crate::drag::{DragPreview, PaletteDrag, WidgetDrag};
use crate::widget_view::{button_body, drag_label, static_body, text_body};
use api::{execute_command_in_context, Command, CommandResult, Target};
use canvas::{Canvas, CanvasEvent, DragPayload, TextEdit, WidgetContent, WidgetId};
use gpui::{
    div, prelude::*, px, AnyElement, App, AppContext, Bounds, ClickEvent, Context, DragMoveEvent,
    ElementId, ElementInputHandler, Entity, FocusHandle, Focusable, KeyDownEvent, Pixels, Point,
    SharedString, Subscription, Window,
};
use std::ops::Range;
use theme::Theme;

/// What a keystroke does to the text widget being edited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Edit(TextEdit),
    Finish,
    Ignore,
}

impl KeyAction {
    /// Printable keys are left to the platform input handler.
    pub fn for_key(key: &str) -> Self {
        match key {
            "enter" | "escape" => KeyAction::Finish,
            "backspace" => KeyAction::Edit(TextEdit::Backspace),
            _ => KeyAction::Ignore,
        }
    }
}

/// Which half of a row the pointer is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverHalf {
    Upper,
    Lower,
}

impl HoverHalf {
    pub fn of(position: Point<Pixels>, bounds: &Bounds<Pixels>) -> Self {
        if position.y < bounds.center().y {
            HoverHalf::Upper
        } else {
            HoverHalf::Lower
        }
    }
}

/// Canvas area that accepts palette drops and hosts the placed widgets.
pub struct CanvasView {
    canvas: Entity<Canvas>,
    theme: Theme,
    focus_handle: FocusHandle,
    /// Text widget receiving keystrokes.
    editing: Option<WidgetId>,
    /// Byte range of an in-progress IME composition in the edited text.
    marked_range: Option<Range<usize>>,
    /// Placed widget currently picked up.
    dragging: Option<WidgetId>,
    notice: Option<SharedString>,
    _subscriptions: Vec<Subscription>,
}

impl CanvasView {
    pub fn new(canvas: Entity<Canvas>, theme: Theme, cx: &mut Context<Self>) -> Self {
        let subscription = cx.subscribe(&canvas, Self::handle_canvas_event);
        Self {
            canvas,
            theme,
            focus_handle: cx.focus_handle(),
            editing: None,
            marked_range: None,
            dragging: None,
            notice: None,
            _subscriptions: vec![subscription],
        }
    }

    pub fn canvas(&self) -> &Entity<Canvas> {
        &self.canvas
    }

    pub fn editing(&self) -> Option<WidgetId> {
        self.editing
    }

    pub fn notice(&self) -> Option<&SharedString> {
        self.notice.as_ref()
    }

    fn handle_canvas_event(
        &mut self,
        _canvas: Entity<Canvas>,
        event: &CanvasEvent,
        cx: &mut Context<Self>,
    ) {
        match event {
            CanvasEvent::WidgetRemoved(id) if self.editing == Some(*id) => {
                self.editing = None;
                self.marked_range = None;
            }
            CanvasEvent::Cleared => {
                self.editing = None;
                self.marked_range = None;
                self.dragging = None;
            }
            _ => {}
        }
        cx.notify();
    }

    /// Run a command against the canvas.
    pub fn dispatch(&mut self, command: Command, cx: &mut Context<Self>) -> CommandResult {
        execute_command_in_context(&self.canvas, command, cx)
    }

    /// A palette token was released over the canvas. Always appends.
    pub fn drop_palette(&mut self, drag: PaletteDrag, cx: &mut Context<Self>) -> CommandResult {
        self.dragging = None;
        self.dispatch(
            Command::Drop {
                payload: drag.into(),
                target: None,
            },
            cx,
        )
    }

    /// A placed widget was released over `onto`, or over empty canvas.
    pub fn drop_widget(
        &mut self,
        dragged: WidgetId,
        onto: Option<WidgetId>,
        cx: &mut Context<Self>,
    ) -> CommandResult {
        self.dragging = None;
        let state = self.canvas.read(cx).state();
        let Some(from) = state.index_of(dragged) else {
            log::warn!("Dropped widget {} is no longer on the canvas", dragged);
            return CommandResult::error(format!("Widget {} is not on the canvas", dragged));
        };
        let target = match onto {
            Some(onto) => match state.index_of(onto) {
                Some(index) => Some(index),
                None => {
                    log::warn!("Drop target {} is no longer on the canvas", onto);
                    return CommandResult::error(format!("Widget {} is not on the canvas", onto));
                }
            },
            None => None,
        };

        self.dispatch(
            Command::Drop {
                payload: DragPayload::Reorder { index: from },
                target,
            },
            cx,
        )
    }

    /// Live reorder while a dragged widget passes over another one.
    ///
    /// The swap waits until the pointer is past the middle of `over` in the
    /// direction of travel, so a tall row swapped under the pointer does not
    /// swap straight back.
    pub fn hover_widget(
        &mut self,
        dragged: WidgetId,
        over: WidgetId,
        half: HoverHalf,
        cx: &mut Context<Self>,
    ) {
        if dragged == over {
            return;
        }
        let state = self.canvas.read(cx).state();
        let (Some(from), Some(to)) = (state.index_of(dragged), state.index_of(over)) else {
            return;
        };
        let crossed = match half {
            HoverHalf::Upper => to < from,
            HoverHalf::Lower => to > from,
        };
        if !crossed {
            return;
        }
        self.dispatch(
            Command::MoveWidget {
                from: Target::Index(from),
                to,
            },
            cx,
        );
    }

    pub fn start_editing(&mut self, id: WidgetId, cx: &mut Context<Self>) {
        self.editing = Some(id);
        self.marked_range = None;
        cx.notify();
    }

    pub fn stop_editing(&mut self, cx: &mut Context<Self>) {
        self.marked_range = None;
        if self.editing.take().is_some() {
            cx.notify();
        }
    }

    /// Current text of the widget being edited.
    pub fn editing_text(&self, cx: &App) -> Option<String> {
        let state = self.canvas.read(cx).state();
        let widget = state.get(state.index_of(self.editing?)?)?;
        match &widget.content {
            WidgetContent::Text(text) => Some(text.clone()),
            _ => None,
        }
    }

    pub fn marked_range(&self) -> Option<Range<usize>> {
        self.marked_range.clone()
    }

    pub fn unmark(&mut self, cx: &mut Context<Self>) {
        if self.marked_range.take().is_some() {
            cx.notify();
        }
    }

    /// Replace a byte range of the edited text with `new_text`.
    ///
    /// Without a range the marked composition is replaced, or the text is
    /// appended when nothing is marked. With `mark` the inserted text stays
    /// marked as the new composition.
    pub fn replace_editing_text(
        &mut self,
        range: Option<Range<usize>>,
        new_text: &str,
        mark: bool,
        cx: &mut Context<Self>,
    ) {
        let (Some(id), Some(text)) = (self.editing, self.editing_text(cx)) else {
            return;
        };
        let end = text.len()..text.len();
        let range = range
            .or_else(|| self.marked_range.clone())
            .filter(|range| text.get(range.clone()).is_some())
            .unwrap_or(end);

        let command = if range.start == text.len() {
            if new_text.is_empty() {
                self.unmark(cx);
                return;
            }
            Command::EditText {
                target: id,
                edit: TextEdit::Insert(new_text.to_string()),
            }
        } else {
            let mut replaced = text;
            replaced.replace_range(range.clone(), new_text);
            Command::UpdateContent {
                target: Target::Widget(id),
                content: WidgetContent::Text(replaced),
            }
        };

        if self.dispatch(command, cx).is_success() {
            self.marked_range = (mark && !new_text.is_empty())
                .then(|| range.start..range.start + new_text.len());
            cx.notify();
        }
    }

    /// Apply a keystroke to the widget being edited, if any.
    pub fn apply_key(&mut self, action: KeyAction, cx: &mut Context<Self>) {
        let Some(id) = self.editing else {
            return;
        };
        match action {
            KeyAction::Edit(edit) => {
                self.dispatch(Command::EditText { target: id, edit }, cx);
            }
            KeyAction::Finish => self.stop_editing(cx),
            KeyAction::Ignore => {}
        }
    }

    /// Show a button's label in the notice bar.
    pub fn press_button(&mut self, label: impl Into<SharedString>, cx: &mut Context<Self>) {
        self.notice = Some(label.into());
        cx.notify();
    }

    pub fn dismiss_notice(&mut self, cx: &mut Context<Self>) {
        if self.notice.take().is_some() {
            cx.notify();
        }
    }

    /// Remove every widget.
    pub fn clear(&mut self, cx: &mut Context<Self>) {
        self.dispatch(Command::Clear, cx);
    }

    fn handle_key_down(
        &mut self,
        event: &KeyDownEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        // Keys during an IME composition belong to the input method
        if self.editing.is_none() || self.marked_range.is_some() {
            return;
        }
        let action = KeyAction::for_key(&event.keystroke.key);
        if action != KeyAction::Ignore {
            cx.stop_propagation();
        }
        self.apply_key(action, cx);
    }

    /// The drag constructor runs outside of render, so the picked-up widget is
    /// recorded through a weak handle.
    fn widget_drag_handler(
        &self,
        cx: &mut Context<Self>,
    ) -> impl Fn(&WidgetDrag, Point<Pixels>, &mut Window, &mut App) -> Entity<DragPreview> + 'static
    {
        let this = cx.weak_entity();
        let theme = self.theme.clone();
        move |drag, _offset, _window, cx| {
            let id = drag.id;
            this.update(cx, |view, cx| {
                view.dragging = Some(id);
                cx.notify();
            })
            .ok();
            let label = drag.label.clone();
            let theme = theme.clone();
            cx.new(|_| DragPreview::new(label, theme))
        }
    }

    fn render_body(
        &self,
        id: WidgetId,
        content: &WidgetContent,
        cx: &mut Context<Self>,
    ) -> AnyElement {
        let theme = &self.theme;
        match content {
            WidgetContent::Text(text) => {
                let editing = self.editing == Some(id);
                text_body(text, editing, theme)
                    .id(ElementId::Name(format!("text-{}", id.to_uuid_string()).into()))
                    .relative()
                    .when(editing, |d| d.child(self.input_target(cx)))
                    .on_click(cx.listener(move |this, _: &ClickEvent, window, cx| {
                        window.focus(&this.focus_handle);
                        this.start_editing(id, cx);
                    }))
                    .into_any_element()
            }
            WidgetContent::Button(label) => {
                let notice: SharedString = label.clone().into();
                button_body(label, theme)
                    .id(ElementId::Name(format!("button-{}", id.to_uuid_string()).into()))
                    .on_click(cx.listener(move |this, _: &ClickEvent, _window, cx| {
                        this.press_button(notice.clone(), cx);
                    }))
                    .into_any_element()
            }
            WidgetContent::Image(_) | WidgetContent::Table(_) => static_body(content, theme),
        }
    }

    /// Registers the view as the platform input handler over the edited
    /// widget while the canvas has focus.
    fn input_target(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let focus_handle = self.focus_handle.clone();
        let view = cx.entity();
        gpui::canvas(
            |_, _, _| {},
            move |bounds, _, window, cx| {
                window.handle_input(&focus_handle, ElementInputHandler::new(bounds, view), cx);
            },
        )
        .absolute()
        .size_full()
    }

    fn render_row(
        &self,
        id: WidgetId,
        content: &WidgetContent,
        dragging: bool,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let theme = &self.theme;
        let hover_border = theme.selection;
        let drop_bg = theme.drop_target;
        let muted = theme.ui_text_muted;
        let key = id.to_uuid_string();

        h_stack()
            .id(ElementId::Name(format!("widget-{}", key).into()))
            .w_full()
            .gap(px(8.0))
            .p(px(8.0))
            .bg(theme.widget_background)
            .border_1()
            .border_color(theme.widget_border)
            .rounded(px(4.0))
            .when(dragging, |d| d.opacity(0.4))
            .hover(move |d| d.border_color(hover_border))
            .drag_over::<WidgetDrag>(move |style, _, _, _| style.bg(drop_bg))
            .on_drag(
                WidgetDrag {
                    id,
                    label: drag_label(content),
                },
                self.widget_drag_handler(cx),
            )
            .on_drag_move(cx.listener(
                move |this, event: &DragMoveEvent<WidgetDrag>, _window, cx| {
                    if !event.bounds.contains(&event.event.position) {
                        return;
                    }
                    let dragged = event.drag(cx).id;
                    let half = HoverHalf::of(event.event.position, &event.bounds);
                    this.hover_widget(dragged, id, half, cx);
                },
            ))
            .on_drop(cx.listener(move |this, drag: &WidgetDrag, _window, cx| {
                this.drop_widget(drag.id, Some(id), cx);
            }))
            .child(div().flex_1().child(self.render_body(id, content, cx)))
            .child(
                div()
                    .id(ElementId::Name(format!("remove-{}", key).into()))
                    .px(px(4.0))
                    .text_sm()
                    .text_color(muted)
                    .cursor_pointer()
                    .child("×")
                    .on_click(cx.listener(move |this, _: &ClickEvent, _window, cx| {
                        this.dispatch(
                            Command::RemoveWidget {
                                target: Target::Widget(id),
                            },
                            cx,
                        );
                    })),
            )
    }

    fn render_notice(&self, notice: SharedString, cx: &mut Context<Self>) -> impl IntoElement {
        h_stack()
            .id("notice")
            .w_full()
            .justify_between()
            .px(px(12.0))
            .py(px(6.0))
            .bg(self.theme.notice_background)
            .rounded(px(4.0))
            .text_sm()
            .text_color(self.theme.ui_text)
            .child(notice)
            .child(
                div()
                    .id("dismiss-notice")
                    .text_color(self.theme.ui_text_muted)
                    .cursor_pointer()
                    .child("Dismiss")
                    .on_click(cx.listener(|this, _: &ClickEvent, _window, cx| {
                        this.dismiss_notice(cx);
                    })),
            )
    }
}

impl Focusable for CanvasView {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for CanvasView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        // A drag released outside any drop target ends without a callback
        if !cx.has_active_drag() {
            self.dragging = None;
        }

        let widgets: Vec<(WidgetId, WidgetContent)> = self
            .canvas
            .read(cx)
            .state()
            .widgets()
            .iter()
            .map(|widget| (widget.id, widget.content.clone()))
            .collect();

        let rows: Vec<_> = widgets
            .iter()
            .map(|(id, content)| {
                let dragging = self.dragging == Some(*id);
                self.render_row(*id, content, dragging, cx).into_any_element()
            })
            .collect();

        let theme = &self.theme;
        let drop_bg = theme.drop_target;
        let notice = self.notice.clone();

        v_stack()
            .id("canvas")
            .key_context("Canvas")
            .track_focus(&self.focus_handle)
            .on_key_down(cx.listener(Self::handle_key_down))
            .flex_1()
            .h_full()
            .gap(px(8.0))
            .p(px(16.0))
            .bg(theme.canvas_background)
            .overflow_y_scroll()
            .drag_over::<PaletteDrag>(move |style, _, _, _| style.bg(drop_bg))
            .on_drop(cx.listener(|this, drag: &PaletteDrag, _window, cx| {
                this.drop_palette(*drag, cx);
            }))
            .on_drop(cx.listener(|this, drag: &WidgetDrag, _window, cx| {
                this.drop_widget(drag.id, None, cx);
            }))
            .when_some(notice, |d, notice| d.child(self.render_notice(notice, cx)))
            .when(rows.is_empty(), |d| {
                d.child(
                    div()
                        .m_auto()
                        .text_sm()
                        .text_color(theme.ui_text_muted)
                        .child("Drag widgets here"),
                )
            })
            .children(rows)
    }
}
