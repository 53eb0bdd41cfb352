use crate::WidgetId;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Embedded image shown by newly created image widgets.
pub const DEFAULT_IMAGE_SRC: &str = "images/placeholder.svg";

const DEFAULT_TEXT: &str = "Editable Text";
const DEFAULT_BUTTON_LABEL: &str = "Click Me";

/// The kind of widget.
///
/// Iteration order is palette order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum WidgetKind {
    Text,
    Image,
    Button,
    Table,
}

/// A table's cells, row by row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid(Vec<Vec<String>>);

impl Grid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self(rows)
    }

    /// The 2x2 grid new tables start with.
    pub fn seed() -> Self {
        Self::new(vec![
            vec!["Row 1".to_string(), "Row 2".to_string()],
            vec!["Row 3".to_string(), "Row 4".to_string()],
        ])
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.0
    }

    pub fn row_count(&self) -> usize {
        self.0.len()
    }

    /// Width of the widest row. Rows may be ragged.
    pub fn column_count(&self) -> usize {
        self.0.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.0.get(row)?.get(column).map(String::as_str)
    }
}

impl From<Vec<Vec<String>>> for Grid {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::new(rows)
    }
}

/// A widget's content, tagged by its kind.
///
/// Serializes as `{"type": "Text", "content": "..."}`, with the table
/// content as an array of string arrays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum WidgetContent {
    Text(String),
    /// Image reference: an embedded asset path, a file path or a URI.
    Image(String),
    Button(String),
    Table(Grid),
}

impl WidgetContent {
    /// The content a freshly dropped widget of `kind` starts with.
    pub fn default_for(kind: WidgetKind) -> Self {
        match kind {
            WidgetKind::Text => Self::Text(DEFAULT_TEXT.to_string()),
            WidgetKind::Image => Self::Image(DEFAULT_IMAGE_SRC.to_string()),
            WidgetKind::Button => Self::Button(DEFAULT_BUTTON_LABEL.to_string()),
            WidgetKind::Table => Self::Table(Grid::seed()),
        }
    }

    pub fn kind(&self) -> WidgetKind {
        match self {
            Self::Text(_) => WidgetKind::Text,
            Self::Image(_) => WidgetKind::Image,
            Self::Button(_) => WidgetKind::Button,
            Self::Table(_) => WidgetKind::Table,
        }
    }

    /// String content, for every kind except tables.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Image(s) | Self::Button(s) => Some(s),
            Self::Table(_) => None,
        }
    }

    pub fn as_grid(&self) -> Option<&Grid> {
        match self {
            Self::Table(grid) => Some(grid),
            _ => None,
        }
    }
}

/// A widget placed on the canvas.
#[derive(Clone, Debug)]
pub struct Widget {
    pub id: WidgetId,
    pub content: WidgetContent,
}

impl Widget {
    pub fn new(content: WidgetContent) -> Self {
        Self {
            id: WidgetId::new(),
            content,
        }
    }

    pub fn from_kind(kind: WidgetKind) -> Self {
        Self::new(WidgetContent::default_for(kind))
    }

    pub fn kind(&self) -> WidgetKind {
        self.content.kind()
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(WidgetContent::Text(content.into()))
    }

    pub fn image(src: impl Into<String>) -> Self {
        Self::new(WidgetContent::Image(src.into()))
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self::new(WidgetContent::Button(label.into()))
    }

    pub fn table(grid: impl Into<Grid>) -> Self {
        Self::new(WidgetContent::Table(grid.into()))
    }
}
