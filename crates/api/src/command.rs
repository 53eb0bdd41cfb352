//! Mosaic commands - all operations that modify canvas state.
//!
//! Commands are intent-based: they describe what the user wants,
//! not how to achieve it. The execution layer handles index
//! resolution, persistence and change notification.

use crate::Target;
use canvas::{DragPayload, TextEdit, WidgetContent, WidgetId, WidgetKind};
use serde::{Deserialize, Serialize};

/// A command that modifies the canvas.
///
/// Commands are serializable for:
/// - Recording user actions
/// - Scripting
/// - Logging what the UI did
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    // === Creation ===
    /// Append a widget with default content.
    AddWidget { kind: WidgetKind },

    // === Ordering ===
    /// Move a widget to a new index, shifting the widgets in between.
    MoveWidget { from: Target, to: usize },

    // === Content ===
    /// Replace a widget's content. The content must be of the widget's kind.
    UpdateContent {
        target: Target,
        content: WidgetContent,
    },

    /// Apply a keystroke-level edit to a text widget.
    EditText { target: WidgetId, edit: TextEdit },

    // === Drag and drop ===
    /// A drag gesture ended on the canvas.
    Drop {
        payload: DragPayload,
        /// Index of the widget under the pointer, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<usize>,
    },

    // === Removal ===
    /// Remove a widget.
    RemoveWidget { target: Target },

    /// Remove every widget.
    Clear,

    // === Batch ===
    /// Execute multiple commands in sequence.
    Batch { commands: Vec<Command> },
}

/// Result of executing a command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandResult {
    /// Command succeeded.
    Success {
        /// IDs of widgets created, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        created: Vec<WidgetId>,
        /// IDs of widgets modified or moved, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        modified: Vec<WidgetId>,
        /// IDs of widgets deleted, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        deleted: Vec<WidgetId>,
    },
    /// Command failed.
    Error { message: String },
}

impl CommandResult {
    pub fn success() -> Self {
        Self::Success {
            created: vec![],
            modified: vec![],
            deleted: vec![],
        }
    }

    pub fn created(ids: Vec<WidgetId>) -> Self {
        Self::Success {
            created: ids,
            modified: vec![],
            deleted: vec![],
        }
    }

    pub fn modified(ids: Vec<WidgetId>) -> Self {
        Self::Success {
            created: vec![],
            modified: ids,
            deleted: vec![],
        }
    }

    pub fn deleted(ids: Vec<WidgetId>) -> Self {
        Self::Success {
            created: vec![],
            modified: vec![],
            deleted: ids,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_widget_serializes_with_type_field() {
        let cmd = Command::AddWidget {
            kind: WidgetKind::Table,
        };
        let json: serde_json::Value = serde_json::to_value(&cmd).unwrap();

        assert_eq!(json["type"], "add_widget");
        // Widget kinds keep their PascalCase names, as in the stored canvas
        assert_eq!(json["kind"], "Table");
    }

    #[test]
    fn drop_omits_missing_target() {
        let cmd = Command::Drop {
            payload: DragPayload::Palette {
                kind: WidgetKind::Button,
            },
            target: None,
        };
        let json: serde_json::Value = serde_json::to_value(&cmd).unwrap();

        assert_eq!(json["type"], "drop");
        assert_eq!(json["payload"], serde_json::json!({"type": "Button"}));
        assert!(json.get("target").is_none());
    }

    #[test]
    fn update_content_nests_tagged_content() {
        let cmd = Command::UpdateContent {
            target: Target::Index(0),
            content: WidgetContent::Text("hello".into()),
        };
        let json: serde_json::Value = serde_json::to_value(&cmd).unwrap();

        assert_eq!(json["type"], "update_content");
        assert_eq!(json["target"], serde_json::json!({"index": 0}));
        assert_eq!(
            json["content"],
            serde_json::json!({"type": "Text", "content": "hello"})
        );
    }

    #[test]
    fn move_widget_deserializes_from_script_json() {
        let json = r#"{"type": "move_widget", "from": {"index": 0}, "to": 2}"#;
        let cmd: Command = serde_json::from_str(json).unwrap();

        match cmd {
            Command::MoveWidget { from, to } => {
                assert!(matches!(from, Target::Index(0)));
                assert_eq!(to, 2);
            }
            _ => panic!("Expected MoveWidget command"),
        }
    }

    #[test]
    fn edit_text_carries_the_edit() {
        let json = r#"{"type": "edit_text", "target": "00000000-0000-0000-0000-000000000007", "edit": {"insert": "a"}}"#;
        let cmd: Command = serde_json::from_str(json).unwrap();

        match cmd {
            Command::EditText { target, edit } => {
                assert_eq!(target, WidgetId::from_u128(7));
                assert_eq!(edit, TextEdit::Insert("a".into()));
            }
            _ => panic!("Expected EditText command"),
        }

        let json = serde_json::to_value(Command::EditText {
            target: WidgetId::from_u128(7),
            edit: TextEdit::Backspace,
        })
        .unwrap();
        assert_eq!(json["edit"], "backspace");
    }

    #[test]
    fn batch_command_contains_nested_commands() {
        let cmd = Command::Batch {
            commands: vec![
                Command::Clear,
                Command::AddWidget {
                    kind: WidgetKind::Text,
                },
            ],
        };
        let json: serde_json::Value = serde_json::to_value(&cmd).unwrap();

        assert_eq!(json["type"], "batch");
        let commands = json["commands"].as_array().unwrap();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0]["type"], "clear");
        assert_eq!(commands[1]["type"], "add_widget");
    }

    #[test]
    fn success_omits_empty_id_lists() {
        let json = serde_json::to_value(CommandResult::success()).unwrap();
        assert_eq!(json, serde_json::json!({"status": "success"}));

        let json = serde_json::to_value(CommandResult::error("nope")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "error", "message": "nope"})
        );
    }
}
