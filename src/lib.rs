//! Command surface for ctxpath queries.
//!
//! Wires the path query engine from `ctxpath-query` to a [`ContextHost`] that
//! supplies root objects, and exposes the `context`, `context-window` and
//! `context-help` commands.

pub mod commands;
pub mod error;
pub mod help;
pub mod host;

pub use commands::{
    CommandInvocation, CommandKind, CommandRegistry, ContextCommands, is_true_boolean,
};
pub use error::{CliError, CommandError};
pub use help::HELP;
pub use host::{ContextHost, StaticHost, process_window};

pub use ctxpath_query::{LogNotifier, Notifier, QueryError, QueryOptions};
pub use ctxpath_value::{CallError, Callable, Map, Value};
