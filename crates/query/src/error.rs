use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Malformed segment {index} in '{path}': {reason}")]
    MalformedSegment {
        path: String,
        index: usize,
        reason: String,
    },

    #[error("Type error: cannot apply '{operation}' to {found}, expected a list")]
    TypeMismatch {
        operation: String,
        found: &'static str,
    },
}
