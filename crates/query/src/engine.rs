//! The traversal engine: walks a parsed [`Path`] over a root [`Value`].
use crate::ast::{FilterClause, FindOp, Path, ProjectionClause, Segment};
use crate::error::QueryError;
use crate::parser::parse_path;
use crate::predicate::apply_rule;
use ctxpath_value::Value;
use std::borrow::Cow;

/// The user-facing channel that receives messages about failures which do not
/// abort an evaluation.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Sends notifications to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        log::error!("{}", message);
    }
}

/// Options for a single evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Call the resolved value if it is a callable and use its result.
    pub invoke: bool,
}

impl QueryOptions {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_invoke(mut self, invoke: bool) -> Self {
        self.invoke = invoke;
        self
    }
}

/// Parses `path` and evaluates it against `root`, returning the serialized result.
pub async fn query(
    root: &Value,
    path: &str,
    options: &QueryOptions,
    notifier: &dyn Notifier,
) -> Result<String, QueryError> {
    let path = parse_path(path)?;
    evaluate(root, &path, options, notifier).await
}

/// Evaluates a parsed path and serializes the result.
///
/// Invocation failures are reported to `notifier` and serialize as `undefined`.
pub async fn evaluate(
    root: &Value,
    path: &Path,
    options: &QueryOptions,
    notifier: &dyn Notifier,
) -> Result<String, QueryError> {
    let current = resolve(root, path)?;
    if !options.invoke {
        return Ok(current.serialize());
    }

    let result = match &*current {
        Value::Callable(callable) => match callable.call().await {
            Ok(result) => result,
            Err(e) => {
                notifier.error(&e.message);
                Value::Undefined
            }
        },
        other => {
            log::warn!("Requested a call on a {} value", other.type_name());
            notifier.error(&format!("{} is not callable", other.type_name()));
            return Ok(other.serialize());
        }
    };
    Ok(result.serialize())
}

/// Walks the segments of `path`, stopping at the first null or undefined value.
///
/// Plain lookups borrow from `root`; only filter and map results are built anew.
pub fn resolve<'a>(root: &'a Value, path: &Path) -> Result<Cow<'a, Value>, QueryError> {
    let mut current = Cow::Borrowed(root);
    for (index, segment) in path.segments.iter().enumerate() {
        current = apply_segment(current, segment)?;
        if current.is_nullish() {
            log::debug!(
                "Traversal stopped at segment {} ('{}'): {}",
                index,
                segment.key,
                current.type_name()
            );
            break;
        }
    }
    Ok(current)
}

fn apply_segment<'a>(
    current: Cow<'a, Value>,
    segment: &Segment,
) -> Result<Cow<'a, Value>, QueryError> {
    let current = match current {
        Cow::Borrowed(value) => value.get(&segment.key),
        Cow::Owned(value) => Cow::Owned(value.lookup(&segment.key)),
    };
    let mut current = match &segment.filter {
        Some(filter) => Cow::Owned(apply_filter(&current, filter)?),
        None => current,
    };
    if let Some(projection) = &segment.projection {
        current = Cow::Owned(apply_projection(&current, projection)?);
    }
    Ok(current)
}

fn apply_filter(current: &Value, filter: &FilterClause) -> Result<Value, QueryError> {
    let Value::List(items) = current else {
        return Err(QueryError::TypeMismatch {
            operation: filter.operation.to_string(),
            found: current.type_name(),
        });
    };
    let literal = filter.literal.value();
    let is_match =
        |item: &&Value| apply_rule(&item.get(&filter.property_key), &literal, filter.rule);

    Ok(match filter.operation {
        FindOp::Find => items.iter().find(is_match).cloned().unwrap_or_default(),
        FindOp::Filter => Value::List(items.iter().filter(is_match).cloned().collect()),
        FindOp::FindIndex => {
            let position = items.iter().position(|item| is_match(&item));
            Value::Number(position.map(|i| i as f64).unwrap_or(-1.0))
        }
    })
}

fn apply_projection(current: &Value, projection: &ProjectionClause) -> Result<Value, QueryError> {
    match current {
        Value::List(items) => Ok(Value::List(
            items.iter().map(|item| item.lookup(&projection.key)).collect(),
        )),
        other => Err(QueryError::TypeMismatch {
            operation: "map".to_string(),
            found: other.type_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolve_str(root: serde_json::Value, path: &str) -> Result<Value, QueryError> {
        resolve(&Value::from(root), &parse_path(path)?).map(Cow::into_owned)
    }

    #[test]
    fn test_plain_path_is_nested_lookup() {
        let v = resolve_str(json!({ "a": { "b": { "c": "deep" } } }), "a::b::c").unwrap();
        assert_eq!(v.as_str(), Some("deep"));
    }

    #[test]
    fn test_short_circuit_skips_remaining_segments() {
        // `items` is missing, so the filter on the second segment is never applied.
        let v = resolve_str(json!({ "a": null }), "a::items(find id eq 1)").unwrap();
        assert!(matches!(v, Value::Null));
        let v = resolve_str(json!({}), "a::b").unwrap();
        assert!(v.is_undefined());
    }

    #[test]
    fn test_filter_on_non_list_is_type_mismatch() {
        let err = resolve_str(json!({ "a": { "id": 1 } }), "a(find id eq 1)").unwrap_err();
        assert_eq!(
            err,
            QueryError::TypeMismatch {
                operation: "find".to_string(),
                found: "map",
            }
        );
        let err = resolve_str(json!({}), "missing(filter id eq 1)").unwrap_err();
        assert!(matches!(err, QueryError::TypeMismatch { found: "undefined", .. }));
    }

    #[test]
    fn test_projection_on_non_list_is_type_mismatch() {
        let err = resolve_str(json!({ "a": "text" }), "a(map length)").unwrap_err();
        assert!(matches!(err, QueryError::TypeMismatch { found: "string", .. }));
    }

    #[test]
    fn test_projection_of_missing_key_gives_undefined_members() {
        let v = resolve_str(json!({ "items": [{ "n": 1 }, {}] }), "items(map n)").unwrap();
        assert_eq!(v.serialize(), "[1,null]");
    }

    #[test]
    fn test_plain_lookups_borrow_from_root() {
        let root = Value::from(json!({ "a": { "list": [{ "id": 1 }, { "id": 2 }] } }));
        let v = resolve(&root, &parse_path("a::list::1").unwrap()).unwrap();
        assert!(matches!(v, Cow::Borrowed(_)));
        let v = resolve(&root, &parse_path("a::list(find id eq 2)::id").unwrap()).unwrap();
        assert!(matches!(v, Cow::Owned(Value::Number(n)) if n == 2.0));
    }

    #[test]
    fn test_empty_path_resolves_to_root() {
        let v = resolve_str(json!({ "a": 1 }), "").unwrap();
        assert_eq!(v.serialize(), r#"{"a":1}"#);
    }
}
