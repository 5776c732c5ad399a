//! A small path language for reading values out of a dynamic object graph.
//!
//! A path is a `::`-separated list of keys, each optionally followed by a filter
//! (`(find name eq Alice)`, `(filter fav eq true)`, `(findIndex id gt 3)`) and a
//! projection (`(map name)`). Evaluation walks the keys, stops early on null or
//! undefined values, optionally calls the result, and serializes it as JSON text.

pub mod ast;
pub mod engine;
pub mod error;
mod parser;
pub mod predicate;

// --- Public API ---
pub use ast::{
    ComparisonRule, FilterClause, FindOp, Literal, Path, ProjectionClause, Segment, parse_literal,
};
pub use engine::{LogNotifier, Notifier, QueryOptions, evaluate, query, resolve};
pub use error::QueryError;
pub use parser::{DELIMITER, parse_path, parse_segment};
pub use predicate::{RuleError, apply_rule, try_apply_rule};
