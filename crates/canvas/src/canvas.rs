use crate::{CanvasError, CanvasState, CanvasStore, DragPayload, DropOutcome};
use gpui::{Context, EventEmitter};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;
use widget::{WidgetContent, WidgetId, WidgetKind};

/// Events emitted by the canvas after a successful mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasEvent {
    WidgetAdded(WidgetId),
    WidgetMoved { from: usize, to: usize },
    WidgetRemoved(WidgetId),
    ContentChanged(WidgetId),
    Cleared,
}

/// A keyboard edit applied to a text widget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEdit {
    /// Append typed characters.
    Insert(String),
    /// Delete the last grapheme cluster.
    Backspace,
}

/// The canvas entity.
///
/// Owns the widget sequence and writes it through to the store after every
/// mutation. Failed mutations change nothing and write nothing.
pub struct Canvas {
    state: CanvasState,
    store: Box<dyn CanvasStore>,
}

impl Canvas {
    /// Create a canvas restored from `store`, or empty when the store holds
    /// nothing usable.
    pub fn new(store: Box<dyn CanvasStore>, _cx: &mut Context<Self>) -> Self {
        let state = store.load().unwrap_or_default();
        log::info!("Canvas restored with {} widgets", state.len());
        Self { state, store }
    }

    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    /// Current index of a widget.
    pub fn index_of(&self, id: WidgetId) -> Option<usize> {
        self.state.index_of(id)
    }

    /// Append a widget of `kind` with default content.
    pub fn add_widget(&mut self, kind: WidgetKind, cx: &mut Context<Self>) -> WidgetId {
        let id = self.state.add_widget(kind);
        log::debug!("Added {} widget {}", kind, id);
        self.changed(CanvasEvent::WidgetAdded(id), cx);
        id
    }

    pub fn move_widget(
        &mut self,
        from: usize,
        to: usize,
        cx: &mut Context<Self>,
    ) -> Result<(), CanvasError> {
        self.state.move_widget(from, to)?;
        self.changed(CanvasEvent::WidgetMoved { from, to }, cx);
        Ok(())
    }

    /// Move a widget to `to`, resolving its current index first.
    pub fn move_widget_by_id(
        &mut self,
        id: WidgetId,
        to: usize,
        cx: &mut Context<Self>,
    ) -> Result<(), CanvasError> {
        let from = self.index_of(id).ok_or(CanvasError::UnknownWidget(id))?;
        self.move_widget(from, to, cx)
    }

    pub fn update_content(
        &mut self,
        index: usize,
        content: WidgetContent,
        cx: &mut Context<Self>,
    ) -> Result<(), CanvasError> {
        self.state.update_content(index, content)?;
        let id = self.state.widgets()[index].id;
        self.changed(CanvasEvent::ContentChanged(id), cx);
        Ok(())
    }

    /// Apply a keyboard edit to a text widget.
    pub fn edit_text(
        &mut self,
        id: WidgetId,
        edit: TextEdit,
        cx: &mut Context<Self>,
    ) -> Result<(), CanvasError> {
        let index = self.index_of(id).ok_or(CanvasError::UnknownWidget(id))?;
        let WidgetContent::Text(text) = &self.state.widgets()[index].content else {
            return Err(CanvasError::KindMismatch {
                expected: self.state.widgets()[index].kind(),
                found: WidgetKind::Text,
            });
        };

        let mut text = text.clone();
        match edit {
            TextEdit::Insert(s) => text.push_str(&s),
            TextEdit::Backspace => text.truncate(last_grapheme_start(&text)),
        }
        self.update_content(index, WidgetContent::Text(text), cx)
    }

    pub fn remove_widget(
        &mut self,
        index: usize,
        cx: &mut Context<Self>,
    ) -> Result<WidgetId, CanvasError> {
        let widget = self.state.remove_widget(index)?;
        self.changed(CanvasEvent::WidgetRemoved(widget.id), cx);
        Ok(widget.id)
    }

    pub fn clear(&mut self, cx: &mut Context<Self>) {
        self.state.clear();
        self.changed(CanvasEvent::Cleared, cx);
    }

    /// Apply a drop, see [`CanvasState::handle_drop`].
    pub fn handle_drop(
        &mut self,
        payload: DragPayload,
        target: Option<usize>,
        cx: &mut Context<Self>,
    ) -> Result<DropOutcome, CanvasError> {
        let outcome = self.state.handle_drop(payload, target)?;
        let event = match outcome {
            DropOutcome::Added { id, .. } => CanvasEvent::WidgetAdded(id),
            DropOutcome::Moved { from, to } => CanvasEvent::WidgetMoved { from, to },
        };
        self.changed(event, cx);
        Ok(outcome)
    }

    /// Write through, then tell observers.
    fn changed(&mut self, event: CanvasEvent, cx: &mut Context<Self>) {
        self.store.save(&self.state);
        cx.emit(event);
        cx.notify();
    }
}

impl EventEmitter<CanvasEvent> for Canvas {}

fn last_grapheme_start(text: &str) -> usize {
    text.grapheme_indices(true)
        .map(|(i, _)| i)
        .next_back()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FileStore, MemoryStore};
    use gpui::{AppContext, Entity, TestAppContext};

    fn new_canvas(store: &MemoryStore, cx: &mut TestAppContext) -> Entity<Canvas> {
        let store = store.clone();
        cx.new(|cx| Canvas::new(Box::new(store), cx))
    }

    #[gpui::test]
    fn restores_from_store(cx: &mut TestAppContext) {
        let store = MemoryStore::with_raw(
            r#"[{"type":"Button","content":"Go"},{"type":"Text","content":"hi"}]"#,
        );
        let canvas = new_canvas(&store, cx);
        canvas.read_with(cx, |canvas, _| {
            assert_eq!(canvas.state().len(), 2);
            assert_eq!(
                canvas.state().get(0).unwrap().content,
                WidgetContent::Button("Go".into())
            );
        });
    }

    #[gpui::test]
    fn corrupt_store_starts_empty(cx: &mut TestAppContext) {
        let store = MemoryStore::with_raw("definitely not json");
        let canvas = new_canvas(&store, cx);
        canvas.read_with(cx, |canvas, _| assert!(canvas.state().is_empty()));
    }

    #[gpui::test]
    fn every_mutation_writes_through(cx: &mut TestAppContext) {
        let store = MemoryStore::new();
        let canvas = new_canvas(&store, cx);

        canvas.update(cx, |canvas, cx| {
            canvas.add_widget(WidgetKind::Text, cx);
            canvas.add_widget(WidgetKind::Button, cx);
        });
        assert_eq!(store.save_count(), 2);
        assert_eq!(
            store.raw().as_deref(),
            Some(r#"[{"type":"Text","content":"Editable Text"},{"type":"Button","content":"Click Me"}]"#)
        );

        canvas.update(cx, |canvas, cx| canvas.move_widget(0, 1, cx)).unwrap();
        assert_eq!(store.save_count(), 3);
        assert!(store.raw().unwrap().starts_with(r#"[{"type":"Button""#));
    }

    #[gpui::test]
    fn failed_mutation_does_not_write(cx: &mut TestAppContext) {
        let store = MemoryStore::new();
        let canvas = new_canvas(&store, cx);

        let result = canvas.update(cx, |canvas, cx| canvas.move_widget(0, 1, cx));
        assert!(result.is_err());
        let result = canvas.update(cx, |canvas, cx| {
            canvas.update_content(3, WidgetContent::Text("x".into()), cx)
        });
        assert!(result.is_err());
        assert_eq!(store.save_count(), 0);
        assert!(store.raw().is_none());
    }

    #[gpui::test]
    fn emits_events(cx: &mut TestAppContext) {
        let store = MemoryStore::new();
        let canvas = new_canvas(&store, cx);
        let events = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));

        cx.update(|cx| {
            let events = events.clone();
            cx.subscribe(&canvas, move |_, event: &CanvasEvent, _| {
                events.borrow_mut().push(event.clone());
            })
            .detach();
        });

        let id = canvas.update(cx, |canvas, cx| canvas.add_widget(WidgetKind::Image, cx));
        canvas.update(cx, |canvas, cx| {
            canvas.add_widget(WidgetKind::Text, cx);
            canvas.move_widget(1, 0, cx).unwrap();
            canvas.remove_widget(1, cx).unwrap();
            canvas.clear(cx);
        });
        cx.run_until_parked();

        let events = events.borrow();
        assert_eq!(events[0], CanvasEvent::WidgetAdded(id));
        assert_eq!(events[2], CanvasEvent::WidgetMoved { from: 1, to: 0 });
        assert_eq!(events[3], CanvasEvent::WidgetRemoved(id));
        assert_eq!(events[4], CanvasEvent::Cleared);
    }

    #[gpui::test]
    fn edit_text_resolves_index_at_call_time(cx: &mut TestAppContext) {
        let store = MemoryStore::new();
        let canvas = new_canvas(&store, cx);

        canvas.update(cx, |canvas, cx| {
            canvas.add_widget(WidgetKind::Button, cx);
            let text = canvas.add_widget(WidgetKind::Text, cx);
            canvas.move_widget_by_id(text, 0, cx).unwrap();

            canvas.edit_text(text, TextEdit::Backspace, cx).unwrap();
            canvas
                .edit_text(text, TextEdit::Insert("!?".into()), cx)
                .unwrap();

            assert_eq!(canvas.index_of(text), Some(0));
            assert_eq!(
                canvas.state().get(0).unwrap().content,
                WidgetContent::Text("Editable Tex!?".into())
            );
        });

        let restored = store.load().unwrap();
        assert_eq!(
            restored.get(0).unwrap().content,
            WidgetContent::Text("Editable Tex!?".into())
        );
    }

    #[gpui::test]
    fn backspace_deletes_whole_graphemes(cx: &mut TestAppContext) {
        let store = MemoryStore::new();
        let canvas = new_canvas(&store, cx);
        canvas.update(cx, |canvas, cx| {
            let id = canvas.add_widget(WidgetKind::Text, cx);
            // Thumbs up with a skin tone modifier, then e with a combining acute
            canvas
                .update_content(0, WidgetContent::Text("ok \u{1F44D}\u{1F3FD}".into()), cx)
                .unwrap();
            canvas.edit_text(id, TextEdit::Backspace, cx).unwrap();
            assert_eq!(
                canvas.state().get(0).unwrap().content,
                WidgetContent::Text("ok ".into())
            );

            canvas
                .edit_text(id, TextEdit::Insert("cafe\u{301}".into()), cx)
                .unwrap();
            canvas.edit_text(id, TextEdit::Backspace, cx).unwrap();
            assert_eq!(
                canvas.state().get(0).unwrap().content,
                WidgetContent::Text("ok caf".into())
            );

            canvas
                .update_content(0, WidgetContent::Text(String::new()), cx)
                .unwrap();
            canvas.edit_text(id, TextEdit::Backspace, cx).unwrap();
            assert_eq!(
                canvas.state().get(0).unwrap().content,
                WidgetContent::Text(String::new())
            );
        });
    }

    #[gpui::test]
    fn store_failure_keeps_state_in_memory(cx: &mut TestAppContext) {
        // The store directory is a regular file, so every write fails
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let store = FileStore::in_dir(blocker.path());
        let path = store.path().to_path_buf();
        let canvas = cx.new(|cx| Canvas::new(Box::new(store), cx));

        let id = canvas.update(cx, |canvas, cx| canvas.add_widget(WidgetKind::Text, cx));

        canvas.read_with(cx, |canvas, _| {
            assert_eq!(canvas.state().len(), 1);
            assert_eq!(canvas.index_of(id), Some(0));
        });
        assert!(!path.exists());
        assert!(blocker.path().is_file());
    }

    #[gpui::test]
    fn edit_text_rejects_other_kinds(cx: &mut TestAppContext) {
        let store = MemoryStore::new();
        let canvas = new_canvas(&store, cx);
        canvas.update(cx, |canvas, cx| {
            let button = canvas.add_widget(WidgetKind::Button, cx);
            let err = canvas
                .edit_text(button, TextEdit::Insert("x".into()), cx)
                .unwrap_err();
            assert!(matches!(err, CanvasError::KindMismatch { .. }));
            assert!(matches!(
                canvas.edit_text(WidgetId::new(), TextEdit::Backspace, cx),
                Err(CanvasError::UnknownWidget(_))
            ));
        });
        assert_eq!(store.save_count(), 1);
    }

    #[gpui::test]
    fn drop_dispatches_on_payload(cx: &mut TestAppContext) {
        let store = MemoryStore::new();
        let canvas = new_canvas(&store, cx);
        canvas.update(cx, |canvas, cx| {
            canvas
                .handle_drop(DragPayload::from(WidgetKind::Text), None, cx)
                .unwrap();
            canvas
                .handle_drop(DragPayload::from(WidgetKind::Button), None, cx)
                .unwrap();
            let outcome = canvas
                .handle_drop(DragPayload::Reorder { index: 1 }, Some(0), cx)
                .unwrap();
            assert_eq!(outcome, DropOutcome::Moved { from: 1, to: 0 });
            assert_eq!(canvas.state().len(), 2);
            assert_eq!(canvas.state().get(0).unwrap().kind(), WidgetKind::Button);
        });
    }
}
