//! Call instrumentation composed around cache operations.
//!
//! An [`Instrumented`] runner executes an operation and, once it succeeds,
//! asks each registered [`CallInterceptor`] which store writes describe the
//! call. The writes from every interceptor are submitted as one atomic batch,
//! so the counter and both history lists always move together.
//!
//! ```rust,ignore
//! let instrumented = Instrumented::new(store.clone())
//!     .with(CallCounter)
//!     .with(CallHistory);
//!
//! let key = instrumented
//!     .call("Cache.store", "(\"first\",)".to_string(), async { write().await })
//!     .await?;
//! ```

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use crate::application::error::{CacheError, CacheResult};
use crate::domain::keys::{inputs_key, outputs_key};
use crate::infrastructure::store::{KeyValueStore, StoreCommand};

/// A completed invocation of an instrumented operation.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    /// Qualified operation name, used as the key prefix.
    pub operation: &'a str,
    /// Serialized argument tuple.
    pub input: &'a str,
    /// Serialized return value.
    pub output: &'a str,
}

/// Turns a completed invocation into store writes.
pub trait CallInterceptor: Send + Sync {
    fn commands(&self, call: &Invocation<'_>) -> Vec<StoreCommand>;
}

/// Increments the counter stored under the operation name.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallCounter;

impl CallInterceptor for CallCounter {
    fn commands(&self, call: &Invocation<'_>) -> Vec<StoreCommand> {
        vec![StoreCommand::Incr(call.operation.to_string())]
    }
}

/// Appends the input to `<operation>:inputs` and the output to `<operation>:outputs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallHistory;

impl CallInterceptor for CallHistory {
    fn commands(&self, call: &Invocation<'_>) -> Vec<StoreCommand> {
        vec![
            StoreCommand::RPush {
                key: inputs_key(call.operation),
                value: call.input.to_string(),
            },
            StoreCommand::RPush {
                key: outputs_key(call.operation),
                value: call.output.to_string(),
            },
        ]
    }
}

/// Runs operations through an ordered list of interceptors.
pub struct Instrumented {
    store: Arc<dyn KeyValueStore>,
    interceptors: Vec<Box<dyn CallInterceptor>>,
}

impl Instrumented {
    /// Creates a runner with no interceptors.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            interceptors: Vec::new(),
        }
    }

    /// Appends an interceptor. Interceptors contribute writes in registration order.
    pub fn with(mut self, interceptor: impl CallInterceptor + 'static) -> Self {
        self.interceptors.push(Box::new(interceptor));
        self
    }

    /// Runs `operation` and records it.
    ///
    /// Bookkeeping happens only after `operation` succeeds; a failed
    /// operation leaves counters and history untouched and its error is
    /// returned as-is.
    ///
    /// # Errors
    ///
    /// Returns the operation's error converted into [`CacheError`], or
    /// [`CacheError::StoreUnavailable`] if the bookkeeping batch fails.
    pub async fn call<T, E, F>(&self, name: &str, input: String, operation: F) -> CacheResult<T>
    where
        F: Future<Output = Result<T, E>>,
        T: Display,
        CacheError: From<E>,
    {
        let result = operation.await?;
        let output = result.to_string();

        let call = Invocation {
            operation: name,
            input: &input,
            output: &output,
        };

        let commands: Vec<StoreCommand> = self
            .interceptors
            .iter()
            .flat_map(|interceptor| interceptor.commands(&call))
            .collect();

        if !commands.is_empty() {
            self.store.exec_atomic(commands).await?;
        }

        debug!("Recorded {}({}) -> {}", name, input, output);

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::{MockKeyValueStore, StoreError};

    fn invocation() -> Invocation<'static> {
        Invocation {
            operation: "Cache.store",
            input: "(1,)",
            output: "k",
        }
    }

    #[test]
    fn test_call_counter_commands() {
        assert_eq!(
            CallCounter.commands(&invocation()),
            vec![StoreCommand::Incr("Cache.store".to_string())]
        );
    }

    #[test]
    fn test_call_history_commands() {
        assert_eq!(
            CallHistory.commands(&invocation()),
            vec![
                StoreCommand::RPush {
                    key: "Cache.store:inputs".to_string(),
                    value: "(1,)".to_string(),
                },
                StoreCommand::RPush {
                    key: "Cache.store:outputs".to_string(),
                    value: "k".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_call_submits_one_batch_in_order() {
        let mut mock_store = MockKeyValueStore::new();
        mock_store
            .expect_exec_atomic()
            .withf(|commands| {
                commands
                    == &vec![
                        StoreCommand::Incr("op".to_string()),
                        StoreCommand::RPush {
                            key: "op:inputs".to_string(),
                            value: "(2,)".to_string(),
                        },
                        StoreCommand::RPush {
                            key: "op:outputs".to_string(),
                            value: "4".to_string(),
                        },
                    ]
            })
            .times(1)
            .returning(|_| Ok(()));

        let instrumented = Instrumented::new(Arc::new(mock_store))
            .with(CallCounter)
            .with(CallHistory);

        let result = instrumented
            .call("op", "(2,)".to_string(), async { Ok::<_, StoreError>(4) })
            .await;

        assert_eq!(result.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_failed_operation_records_nothing() {
        let mut mock_store = MockKeyValueStore::new();
        mock_store.expect_exec_atomic().times(0);

        let instrumented = Instrumented::new(Arc::new(mock_store))
            .with(CallCounter)
            .with(CallHistory);

        let result = instrumented
            .call("op", "()".to_string(), async {
                Err::<String, _>(StoreError::ConnectionError("down".to_string()))
            })
            .await;

        assert!(matches!(result, Err(CacheError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_no_interceptors_skips_store() {
        let mut mock_store = MockKeyValueStore::new();
        mock_store.expect_exec_atomic().times(0);

        let instrumented = Instrumented::new(Arc::new(mock_store));

        let result = instrumented
            .call("op", "()".to_string(), async {
                Ok::<_, StoreError>("done".to_string())
            })
            .await;

        assert_eq!(result.unwrap(), "done");
    }

    #[tokio::test]
    async fn test_bookkeeping_failure_is_store_unavailable() {
        let mut mock_store = MockKeyValueStore::new();
        mock_store
            .expect_exec_atomic()
            .times(1)
            .returning(|_| Err(StoreError::OperationError("EXECABORT".to_string())));

        let instrumented = Instrumented::new(Arc::new(mock_store)).with(CallCounter);

        let result = instrumented
            .call("op", "()".to_string(), async { Ok::<_, StoreError>(1) })
            .await;

        assert!(matches!(result, Err(CacheError::StoreUnavailable(_))));
    }
}
