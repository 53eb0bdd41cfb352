use crate::DragPayload;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use widget::{Widget, WidgetContent, WidgetId, WidgetKind};

/// Errors from canvas mutations. State is left untouched on error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    #[error("index {index} is out of bounds for a canvas of {len} widgets")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("cannot put {found} content into a {expected} widget")]
    KindMismatch {
        expected: WidgetKind,
        found: WidgetKind,
    },

    #[error("widget {0} is not on the canvas")]
    UnknownWidget(WidgetId),
}

/// What a drop did to the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// A palette token created a widget at `index`.
    Added { index: usize, id: WidgetId },
    /// A canvas widget was reordered.
    Moved { from: usize, to: usize },
}

/// The ordered widgets on a canvas, in display order.
///
/// Serializes as a bare array of widget contents. Widget ids are runtime
/// only: deserializing assigns fresh ids, and equality compares contents in
/// order.
#[derive(Clone, Debug, Default)]
pub struct CanvasState {
    widgets: Vec<Widget>,
}

impl CanvasState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_widgets(widgets: Vec<Widget>) -> Self {
        Self { widgets }
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn contents(&self) -> impl Iterator<Item = &WidgetContent> {
        self.widgets.iter().map(|w| &w.content)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Widget> {
        self.widgets.get(index)
    }

    /// Current index of a widget. Indices shift on every mutation, so
    /// resolve them when they are needed rather than holding on to them.
    pub fn index_of(&self, id: WidgetId) -> Option<usize> {
        self.widgets.iter().position(|w| w.id == id)
    }

    /// Append a widget of `kind` with its default content.
    pub fn add_widget(&mut self, kind: WidgetKind) -> WidgetId {
        self.push(Widget::from_kind(kind))
    }

    /// Append an already built widget.
    pub fn push(&mut self, widget: Widget) -> WidgetId {
        let id = widget.id;
        self.widgets.push(widget);
        id
    }

    /// Remove the widget at `from` and reinsert it at `to`, shifting the
    /// widgets in between.
    pub fn move_widget(&mut self, from: usize, to: usize) -> Result<(), CanvasError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from != to {
            let widget = self.widgets.remove(from);
            self.widgets.insert(to, widget);
        }
        Ok(())
    }

    /// Replace the content of the widget at `index`. The widget keeps its
    /// kind, so content of another kind is rejected.
    pub fn update_content(
        &mut self,
        index: usize,
        content: WidgetContent,
    ) -> Result<(), CanvasError> {
        self.check_index(index)?;
        let widget = &mut self.widgets[index];
        if widget.kind() != content.kind() {
            return Err(CanvasError::KindMismatch {
                expected: widget.kind(),
                found: content.kind(),
            });
        }
        widget.content = content;
        Ok(())
    }

    pub fn remove_widget(&mut self, index: usize) -> Result<Widget, CanvasError> {
        self.check_index(index)?;
        Ok(self.widgets.remove(index))
    }

    pub fn clear(&mut self) {
        self.widgets.clear();
    }

    /// Apply a drop onto the canvas.
    ///
    /// Palette payloads append a new widget. Reorder payloads move the
    /// dragged widget to `target`, or to the end when dropped on empty
    /// canvas space.
    pub fn handle_drop(
        &mut self,
        payload: DragPayload,
        target: Option<usize>,
    ) -> Result<DropOutcome, CanvasError> {
        match payload {
            DragPayload::Palette { kind } => {
                let id = self.add_widget(kind);
                Ok(DropOutcome::Added {
                    index: self.widgets.len() - 1,
                    id,
                })
            }
            DragPayload::Reorder { index: from } => {
                self.check_index(from)?;
                let to = target.unwrap_or(self.widgets.len() - 1);
                self.move_widget(from, to)?;
                Ok(DropOutcome::Moved { from, to })
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a persisted canvas. Returns `None` for anything that is not a
    /// well-formed widget array.
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }

    fn check_index(&self, index: usize) -> Result<(), CanvasError> {
        if index < self.widgets.len() {
            Ok(())
        } else {
            Err(CanvasError::IndexOutOfBounds {
                index,
                len: self.widgets.len(),
            })
        }
    }
}

impl PartialEq for CanvasState {
    fn eq(&self, other: &Self) -> bool {
        self.contents().eq(other.contents())
    }
}

impl Eq for CanvasState {}

impl Serialize for CanvasState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.contents())
    }
}

impl<'de> Deserialize<'de> for CanvasState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let contents = Vec::<WidgetContent>::deserialize(deserializer)?;
        Ok(Self::from_widgets(
            contents.into_iter().map(Widget::new).collect(),
        ))
    }
}

impl FromIterator<WidgetContent> for CanvasState {
    fn from_iter<I: IntoIterator<Item = WidgetContent>>(iter: I) -> Self {
        Self::from_widgets(iter.into_iter().map(Widget::new).collect())
    }
}
