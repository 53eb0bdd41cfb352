//! Mosaic API - command and query interface for canvas operations.
//!
//! This crate defines the typed command language for every canvas
//! mutation. Commands represent user intent and are:
//! - Serializable (for recording and scripting)
//! - Intent-based (what to do, not how to do it)
//! - Positional or id-addressed, resolved at execution time
//!
//! # Example
//! ```ignore
//! use api::{Command, execute_command};
//!
//! let cmd = Command::AddWidget { kind: WidgetKind::Text };
//! let result = execute_command(&canvas, cmd, cx);
//! ```

mod command;
mod executor;
mod query;
mod target;

pub use command::*;
pub use executor::{
    execute_command, execute_command_in_context, execute_query, execute_query_in_context,
};
pub use query::*;
pub use target::*;
