//! Zero-argument operations stored inside the object graph.
use crate::value::Value;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

/// The failure raised by a callable when it is invoked.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct CallError {
    pub message: String,
}

impl CallError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

type CallFn = dyn Fn() -> BoxFuture<'static, Result<Value, CallError>> + Send + Sync;

/// A named zero-argument operation.
///
/// Synchronous and asynchronous operations share one representation: both are
/// driven through a boxed future, so the evaluator always awaits the call.
#[derive(Clone)]
pub struct Callable {
    name: Arc<str>,
    func: Arc<CallFn>,
}

impl Callable {
    /// Wraps a synchronous operation.
    pub fn new<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn() -> Result<Value, CallError> + Send + Sync + 'static,
    {
        let func = Arc::new(func);
        Self {
            name: name.into(),
            func: Arc::new(move || {
                let func = Arc::clone(&func);
                async move { func() }.boxed()
            }),
        }
    }

    /// Wraps an asynchronous operation.
    pub fn from_async<F, Fut>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, CallError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(move || func().boxed()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the operation to completion.
    pub async fn call(&self) -> Result<Value, CallError> {
        (self.func)().await
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function {}()", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sync_callable() {
        let c = Callable::new("answer", || Ok(Value::Number(42.0)));
        let result = c.call().await.unwrap();
        assert!(matches!(result, Value::Number(n) if n == 42.0));
        assert_eq!(c.name(), "answer");
    }

    #[tokio::test]
    async fn test_async_callable_error() {
        let c = Callable::from_async("boom", || async { Err(CallError::new("it broke")) });
        let err = c.call().await.unwrap_err();
        assert_eq!(err.to_string(), "it broke");
    }
}
