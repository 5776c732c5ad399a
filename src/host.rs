//! Root objects that context commands evaluate against.
use ctxpath_value::{Callable, Map, Value};
use std::borrow::Cow;
use std::env;

/// Supplies the two root objects a command can query.
pub trait ContextHost: Send + Sync {
    /// The application context, queried by `context`.
    fn context(&self) -> Cow<'_, Value>;

    /// The ambient global object, queried by `context-window`.
    fn window(&self) -> Cow<'_, Value>;
}

/// A host with two fixed root objects.
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    context: Value,
    window: Value,
}

impl StaticHost {
    pub fn new(context: Value, window: Value) -> Self {
        Self { context, window }
    }

    /// A host whose ambient object describes the running process.
    pub fn with_process_window(context: Value) -> Self {
        Self::new(context, process_window())
    }
}

impl ContextHost for StaticHost {
    fn context(&self) -> Cow<'_, Value> {
        Cow::Borrowed(&self.context)
    }

    fn window(&self) -> Cow<'_, Value> {
        Cow::Borrowed(&self.window)
    }
}

/// Builds the ambient object for a command-line process.
///
/// Holds `env`, `args`, `cwd`, `pid`, `platform` and `version`, plus the
/// callables `now` (RFC 3339, UTC) and `timestamp` (Unix seconds).
pub fn process_window() -> Value {
    let mut window = Map::new();
    window.insert(
        "env".to_string(),
        env::vars_os()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    Value::String(v.to_string_lossy().into_owned()),
                )
            })
            .collect(),
    );
    window.insert(
        "args".to_string(),
        Value::List(
            env::args_os()
                .map(|a| Value::String(a.to_string_lossy().into_owned()))
                .collect(),
        ),
    );
    window.insert(
        "cwd".to_string(),
        env::current_dir()
            .map(|p| Value::String(p.display().to_string()))
            .unwrap_or(Value::Null),
    );
    window.insert("pid".to_string(), Value::Number(std::process::id() as f64));
    window.insert(
        "platform".to_string(),
        [
            ("os", env::consts::OS),
            ("arch", env::consts::ARCH),
            ("family", env::consts::FAMILY),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::from(v)))
        .collect(),
    );
    window.insert("version".to_string(), Value::from(env!("CARGO_PKG_VERSION")));
    window.insert(
        "now".to_string(),
        Value::Callable(Callable::from_async("now", || async {
            Ok(Value::String(chrono::Utc::now().to_rfc3339()))
        })),
    );
    window.insert(
        "timestamp".to_string(),
        Value::Callable(Callable::new("timestamp", || {
            Ok(Value::Number(chrono::Utc::now().timestamp() as f64))
        })),
    );
    Value::Map(window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_window_shape() {
        let window = process_window();
        assert_eq!(
            window.lookup("platform").lookup("os").as_str(),
            Some(env::consts::OS)
        );
        assert!(matches!(window.lookup("env"), Value::Map(_)));
        assert!(window.lookup("now").as_callable().is_some());
    }
}
