use ctxpath::{CallError, Callable, Value};
use serde_json::json;

/// A chat application context with characters and groups.
pub fn app_context() -> Value {
    Value::from(json!({
        "chatId": "2024-05-01@12h00m",
        "groupId": "g7",
        "characters": [
            { "name": "Seraphina", "avatar": "seraphina.png", "fav": true },
            { "name": "Coding Sensei", "avatar": "sensei.png", "fav": false },
            { "name": "Alice", "avatar": "alice.png", "fav": true }
        ],
        "groups": [
            { "id": "g7", "members": ["seraphina.png", "alice.png"] }
        ]
    }))
}

/// An ambient object with a couple of callables.
pub fn window() -> Value {
    [
        ("innerWidth".to_string(), Value::Number(1280.0)),
        (
            "getTitle".to_string(),
            Value::Callable(Callable::from_async("getTitle", || async {
                Ok(Value::from("Chat"))
            })),
        ),
        (
            "reload".to_string(),
            Value::Callable(Callable::new("reload", || {
                Err(CallError::new("reload is disabled"))
            })),
        ),
    ]
    .into_iter()
    .collect()
}
