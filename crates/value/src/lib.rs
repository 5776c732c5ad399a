//! The dynamic value model that ctxpath queries walk over.
//!
//! A [`Value`] is a tagged variant over everything a host object graph can hold:
//! primitives, ordered lists, insertion-ordered maps and zero-argument callables.
//! Coercion helpers in [`coerce`] reproduce the loose comparison rules of a
//! dynamically typed host, and [`json`] converts to and from `serde_json`.

pub mod callable;
pub mod coerce;
pub mod json;
pub mod value;

pub use callable::{CallError, Callable};
pub use value::{Map, Value};
