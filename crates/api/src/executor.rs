//! Command and query execution against a Canvas.
//!
//! This module connects the abstract Command/Query types to the actual
//! Canvas entity, executing operations and returning results.

use crate::{Command, CommandResult, Query, QueryResult, WidgetInfo};
use canvas::{Canvas, CanvasError, DropOutcome, WidgetKind};
use gpui::{Context, Entity};
use strum::IntoEnumIterator;

/// Execute a command against a canvas.
pub fn execute_command(
    canvas: &Entity<Canvas>,
    command: Command,
    cx: &mut gpui::App,
) -> CommandResult {
    canvas.update(cx, |canvas, cx| execute_command_inner(canvas, command, cx))
}

/// Execute a command against a canvas from within a view context.
/// Use this when you have access to &mut Context<T> rather than &mut App.
pub fn execute_command_in_context<T: 'static>(
    canvas: &Entity<Canvas>,
    command: Command,
    cx: &mut Context<T>,
) -> CommandResult {
    canvas.update(cx, |canvas, cx| execute_command_inner(canvas, command, cx))
}

fn execute_command_inner(
    canvas: &mut Canvas,
    command: Command,
    cx: &mut Context<Canvas>,
) -> CommandResult {
    log::debug!("Executing {:?}", command);
    match apply(canvas, command, cx) {
        Ok(result) => result,
        Err(e) => {
            log::warn!("Command failed: {}", e);
            CommandResult::error(e.to_string())
        }
    }
}

fn apply(
    canvas: &mut Canvas,
    command: Command,
    cx: &mut Context<Canvas>,
) -> Result<CommandResult, CanvasError> {
    match command {
        Command::AddWidget { kind } => {
            let id = canvas.add_widget(kind, cx);
            Ok(CommandResult::created(vec![id]))
        }

        Command::MoveWidget { from, to } => {
            let from = from.resolve(canvas.state())?;
            let id = canvas.state().widgets()[from].id;
            canvas.move_widget(from, to, cx)?;
            Ok(CommandResult::modified(vec![id]))
        }

        Command::UpdateContent { target, content } => {
            let index = target.resolve(canvas.state())?;
            let id = canvas.state().widgets()[index].id;
            canvas.update_content(index, content, cx)?;
            Ok(CommandResult::modified(vec![id]))
        }

        Command::EditText { target, edit } => {
            canvas.edit_text(target, edit, cx)?;
            Ok(CommandResult::modified(vec![target]))
        }

        Command::Drop { payload, target } => match canvas.handle_drop(payload, target, cx)? {
            DropOutcome::Added { id, .. } => Ok(CommandResult::created(vec![id])),
            DropOutcome::Moved { to, .. } => {
                let id = canvas.state().widgets()[to].id;
                Ok(CommandResult::modified(vec![id]))
            }
        },

        Command::RemoveWidget { target } => {
            let index = target.resolve(canvas.state())?;
            let id = canvas.remove_widget(index, cx)?;
            Ok(CommandResult::deleted(vec![id]))
        }

        Command::Clear => {
            let deleted = canvas.state().widgets().iter().map(|w| w.id).collect();
            canvas.clear(cx);
            Ok(CommandResult::deleted(deleted))
        }

        Command::Batch { commands } => {
            let mut all_created = Vec::new();
            let mut all_modified = Vec::new();
            let mut all_deleted = Vec::new();

            for cmd in commands {
                match execute_command_inner(canvas, cmd, cx) {
                    CommandResult::Success {
                        created,
                        modified,
                        deleted,
                    } => {
                        all_created.extend(created);
                        all_modified.extend(modified);
                        all_deleted.extend(deleted);
                    }
                    CommandResult::Error { message } => {
                        return Ok(CommandResult::error(format!("Batch failed: {}", message)));
                    }
                }
            }

            Ok(CommandResult::Success {
                created: all_created,
                modified: all_modified,
                deleted: all_deleted,
            })
        }
    }
}

/// Execute a query against a canvas.
pub fn execute_query(canvas: &Entity<Canvas>, query: Query, cx: &gpui::App) -> QueryResult {
    let canvas = canvas.read(cx);
    execute_query_inner(canvas, query)
}

/// Execute a query against a canvas from within a view context.
pub fn execute_query_in_context<T: 'static>(
    canvas: &Entity<Canvas>,
    query: Query,
    cx: &Context<T>,
) -> QueryResult {
    let canvas = canvas.read(cx);
    execute_query_inner(canvas, query)
}

fn execute_query_inner(canvas: &Canvas, query: Query) -> QueryResult {
    let state = canvas.state();
    match query {
        Query::GetWidgets => QueryResult::Widgets {
            widgets: WidgetInfo::collect(state),
        },

        Query::GetWidget { index } => QueryResult::Widget {
            widget: WidgetInfo::collect(state).into_iter().nth(index),
        },

        Query::GetWidgetCount => QueryResult::Count { count: state.len() },

        Query::GetPalette => QueryResult::Palette {
            kinds: WidgetKind::iter().collect(),
        },
    }
}
