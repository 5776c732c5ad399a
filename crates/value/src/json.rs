//! Conversion between [`Value`] and `serde_json`, and result serialization.
use crate::coerce::number_to_string;
use crate::value::{Map, Value};
use serde::Serialize;
use serde_json::Value as JsonValue;
use serde_json::ser::{Formatter, Serializer};
use std::io;

/// Largest integer that survives a round trip through `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<Map>(),
            ),
        }
    }
}

impl Value {
    /// Converts to JSON with the host's stringify rules.
    ///
    /// `Undefined` and callables have no JSON form: at the top level this returns
    /// `None`, inside a list they become `null`, and inside a map the entry is
    /// dropped. Non-finite numbers become `null`.
    pub fn to_json(&self) -> Option<JsonValue> {
        match self {
            Value::Undefined | Value::Callable(_) => None,
            Value::Null => Some(JsonValue::Null),
            Value::Bool(b) => Some(JsonValue::Bool(*b)),
            Value::Number(n) => Some(number_to_json(*n)),
            Value::String(s) => Some(JsonValue::String(s.clone())),
            Value::List(items) => Some(JsonValue::Array(
                items
                    .iter()
                    .map(|item| item.to_json().unwrap_or(JsonValue::Null))
                    .collect(),
            )),
            Value::Map(map) => Some(JsonValue::Object(
                map.iter()
                    .filter_map(|(k, v)| v.to_json().map(|json| (k.clone(), json)))
                    .collect(),
            )),
        }
    }

    /// Serializes to compact JSON text, or the literal `undefined` when the value
    /// has no JSON form.
    pub fn serialize(&self) -> String {
        match self.to_json() {
            Some(json) => to_host_text(&json),
            None => "undefined".to_string(),
        }
    }
}

/// Compact JSON whose floats are printed the way the host prints numbers.
struct HostFormatter;

impl Formatter for HostFormatter {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(number_to_string(value).as_bytes())
    }
}

fn to_host_text(json: &JsonValue) -> String {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, HostFormatter);
    match json.serialize(&mut serializer) {
        Ok(()) => String::from_utf8(out).unwrap_or_else(|_| json.to_string()),
        Err(_) => json.to_string(),
    }
}

fn number_to_json(n: f64) -> JsonValue {
    if !n.is_finite() {
        return JsonValue::Null;
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return JsonValue::from(n as i64);
    }
    serde_json::Number::from_f64(n)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Callable;
    use serde_json::json;

    #[test]
    fn test_serialize_primitives() {
        assert_eq!(Value::Number(5.0).serialize(), "5");
        assert_eq!(Value::Number(-0.0).serialize(), "0");
        assert_eq!(Value::Number(2.5).serialize(), "2.5");
        assert_eq!(Value::Number(f64::INFINITY).serialize(), "null");
        assert_eq!(Value::Number(1e-7).serialize(), "1e-7");
        assert_eq!(Value::from("Alice").serialize(), "\"Alice\"");
        assert_eq!(Value::Null.serialize(), "null");
        assert_eq!(Value::Undefined.serialize(), "undefined");
    }

    #[test]
    fn test_serialize_large_whole_numbers_without_exponent() {
        assert_eq!(Value::Number(1e16).serialize(), "10000000000000000");
        assert_eq!(Value::Number(9007199254740992.0).serialize(), "9007199254740992");
        assert_eq!(Value::Number(-1e20).serialize(), "-100000000000000000000");
        assert_eq!(Value::Number(1e21).serialize(), "1e+21");
        let list = Value::List(vec![Value::Number(2e17), Value::Number(0.5)]);
        assert_eq!(list.serialize(), "[200000000000000000,0.5]");
    }

    #[test]
    fn test_serialize_drops_unrepresentable_members() {
        let mut map = Map::new();
        map.insert("keep".to_string(), Value::Number(1.0));
        map.insert("gone".to_string(), Value::Undefined);
        map.insert(
            "fn".to_string(),
            Value::Callable(Callable::new("f", || Ok(Value::Null))),
        );
        map.insert(
            "list".to_string(),
            Value::List(vec![Value::Undefined, Value::from("x")]),
        );
        assert_eq!(
            Value::Map(map).serialize(),
            r#"{"keep":1,"list":[null,"x"]}"#
        );
    }

    #[test]
    fn test_json_conversion_preserves_order() {
        let v = Value::from(json!({ "z": 1, "a": [true, null], "m": { "k": "v" } }));
        assert_eq!(v.serialize(), r#"{"z":1,"a":[true,null],"m":{"k":"v"}}"#);
    }

    #[test]
    fn test_top_level_callable_is_undefined() {
        let v = Value::Callable(Callable::new("f", || Ok(Value::Null)));
        assert_eq!(v.serialize(), "undefined");
    }
}
