// src/error.rs
use ctxpath_query::QueryError;
use thiserror::Error;

/// Failures of a context command.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    #[error("Command '{0}' needs a path, e.g. `{0} key::subkey`")]
    MissingPath(String),

    #[error("Query failed: {0}")]
    Query(#[from] QueryError),
}

/// A comprehensive error type for the command-line tool.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Context is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
