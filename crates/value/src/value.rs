//! The `Value` sum type and property access.
use crate::callable::Callable;
use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt;

/// An insertion-ordered property map.
pub type Map = IndexMap<String, Value>;

/// A node of the object graph being queried.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// The absence of a value, distinct from an explicit `Null`.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Map(Map),
    /// A zero-argument operation, possibly asynchronous.
    Callable(Callable),
}

impl Value {
    /// Returns `true` for `Null` and `Undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Lists, maps and callables are compared by identity rather than by content.
    pub fn is_compound(&self) -> bool {
        matches!(self, Value::List(_) | Value::Map(_) | Value::Callable(_))
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Value::Callable(c) => Some(c),
            _ => None,
        }
    }

    /// A short name for the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Callable(_) => "callable",
        }
    }

    /// Property access, `value[key]`.
    ///
    /// Maps resolve their entries. Lists and strings resolve canonical decimal
    /// indexes and `length`. Every other combination, including a lookup on
    /// `Null` or `Undefined`, resolves to `Undefined`.
    pub fn lookup(&self, key: &str) -> Value {
        self.get(key).into_owned()
    }

    /// Like [`Value::lookup`], but borrows existing entries instead of cloning them.
    pub fn get(&self, key: &str) -> Cow<'_, Value> {
        match self {
            Value::Map(map) => map.get(key).map_or(Cow::Owned(Value::Undefined), Cow::Borrowed),
            Value::List(items) => {
                if key == "length" {
                    return Cow::Owned(Value::Number(items.len() as f64));
                }
                parse_index(key)
                    .and_then(|i| items.get(i))
                    .map_or(Cow::Owned(Value::Undefined), Cow::Borrowed)
            }
            Value::String(s) => Cow::Owned(if key == "length" {
                Value::Number(s.chars().count() as f64)
            } else {
                parse_index(key)
                    .and_then(|i| s.chars().nth(i))
                    .map(|c| Value::String(c.to_string()))
                    .unwrap_or_default()
            }),
            Value::Undefined
            | Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::Callable(_) => Cow::Owned(Value::Undefined),
        }
    }
}

/// Accepts only canonical indexes: `"0"`, `"12"`, never `"01"` or `"+1"`.
fn parse_index(key: &str) -> Option<usize> {
    let canonical = key == "0"
        || (!key.is_empty() && !key.starts_with('0') && key.bytes().all(|b| b.is_ascii_digit()));
    if canonical { key.parse().ok() } else { None }
}

impl fmt::Display for Value {
    /// Writes the serialized text form, see [`Value::serialize`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.serialize())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<Callable> for Value {
    fn from(c: Callable) -> Self {
        Value::Callable(c)
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().collect())
    }
}
