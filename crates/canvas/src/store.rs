//! Persistence for canvas state.
//!
//! The canvas is stored wholesale under a single key as a JSON array of
//! widgets. Stores are injected into the [`Canvas`](crate::Canvas) so tests
//! can substitute [`MemoryStore`] for the on-disk [`FileStore`].

use crate::CanvasState;
use anyhow::{Context, Result};
use std::cell::{Cell, RefCell};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Key the canvas is stored under.
pub const STORAGE_KEY: &str = "canvasWidgets";

/// Load/save access to the persisted canvas.
pub trait CanvasStore {
    /// The stored canvas, or `None` when nothing usable is stored.
    fn load(&self) -> Option<CanvasState>;

    /// Replace the stored canvas. Failures are logged; the caller's state
    /// stays authoritative.
    fn save(&self, state: &CanvasState);
}

/// In-memory store holding the serialized canvas.
///
/// Clones share the same slot, so a test can keep a handle while the
/// canvas owns another.
#[derive(Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with raw stored text, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let store = Self::default();
        *store.slot.borrow_mut() = Some(raw.into());
        store
    }

    /// The raw stored text.
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    /// Number of times the canvas has been written.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl CanvasStore for MemoryStore {
    fn load(&self) -> Option<CanvasState> {
        let raw = self.slot.borrow();
        let state = CanvasState::from_json(raw.as_deref()?);
        if state.is_none() {
            log::warn!("Stored canvas is malformed, starting empty");
        }
        state
    }

    fn save(&self, state: &CanvasState) {
        match state.to_json() {
            Ok(json) => {
                *self.slot.borrow_mut() = Some(json);
                self.saves.set(self.saves.get() + 1);
            }
            Err(e) => log::error!("Failed to serialize canvas: {}", e),
        }
    }
}

/// Store backed by a JSON file named after [`STORAGE_KEY`].
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// A store keeping its file in `dir`. The directory is created on the
    /// first save.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", STORAGE_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read {}", self.path.display())),
        }
    }

    fn write(&self, state: &CanvasState) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let json = state.to_json()?;

        // Write beside the target and rename so a crash never leaves half a file
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

impl CanvasStore for FileStore {
    fn load(&self) -> Option<CanvasState> {
        let contents = match self.read() {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                log::debug!("No stored canvas at {}", self.path.display());
                return None;
            }
            Err(e) => {
                log::warn!("{:#}", e);
                return None;
            }
        };

        let state = CanvasState::from_json(&contents);
        match &state {
            Some(state) => log::info!(
                "Loaded {} widgets from {}",
                state.len(),
                self.path.display()
            ),
            None => log::warn!(
                "Stored canvas at {} is malformed, starting empty",
                self.path.display()
            ),
        }
        state
    }

    fn save(&self, state: &CanvasState) {
        if let Err(e) = self.write(state) {
            log::error!("Failed to save canvas: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use widget::{WidgetContent, WidgetKind};

    fn sample() -> CanvasState {
        let mut state = CanvasState::new();
        state.add_widget(WidgetKind::Text);
        state.add_widget(WidgetKind::Table);
        state
    }

    #[test]
    fn empty_memory_store_loads_nothing() {
        assert!(MemoryStore::new().load().is_none());
    }

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        let state = sample();
        store.save(&state);
        assert_eq!(store.load(), Some(state));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn memory_store_clones_share_contents() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.save(&sample());
        assert!(handle.raw().unwrap().starts_with(r#"[{"type":"Text""#));
    }

    #[test]
    fn corrupt_memory_store_loads_nothing() {
        assert!(MemoryStore::with_raw("{not json").load().is_none());
        assert!(MemoryStore::with_raw("null").load().is_none());
    }

    #[test]
    fn file_store_missing_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_dir(dir.path());
        assert!(store.load().is_none());
    }

    #[test]
    fn file_store_roundtrip_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_dir(dir.path().join("nested").join("storage"));
        let mut state = sample();
        state
            .update_content(0, WidgetContent::Text("saved".into()))
            .unwrap();

        store.save(&state);

        assert!(store.path().ends_with("canvasWidgets.json"));
        assert_eq!(store.load(), Some(state));
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn file_store_corrupt_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_dir(dir.path());
        std::fs::write(store.path(), "[{\"type\": \"Text\"").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn file_store_writes_bare_widget_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_dir(dir.path());
        let mut state = CanvasState::new();
        state.add_widget(WidgetKind::Button);
        store.save(&state);

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"type": "Button", "content": "Click Me"}])
        );
    }
}
