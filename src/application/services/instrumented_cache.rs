//! Object cache with call counting and call history.

use std::sync::Arc;

use tracing::{debug, info};

use super::instrumentation::{CallCounter, CallHistory, Instrumented};
use crate::application::error::{CacheError, CacheResult};
use crate::domain::entities::{Replay, StoredValue, decode_float, decode_int, decode_str};
use crate::domain::keys::{STORE_OPERATION, inputs_key, outputs_key};
use crate::infrastructure::store::{KeyValueStore, StoreError};
use crate::utils::key_generator::generate_key;

/// Stores values under fresh random keys and reads them back.
///
/// Every `store` call runs through an [`Instrumented`] runner carrying a
/// [`CallCounter`] and a [`CallHistory`], so the store holds a counter and
/// an input/output log for [`STORE_OPERATION`]. Reads are not instrumented.
pub struct InstrumentedCache {
    store: Arc<dyn KeyValueStore>,
    instrumented: Instrumented,
}

impl InstrumentedCache {
    /// Creates a cache over `store` with counting and history enabled.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let instrumented = Instrumented::new(store.clone())
            .with(CallCounter)
            .with(CallHistory);

        Self {
            store,
            instrumented,
        }
    }

    /// Writes `data` under a new random key and returns the key.
    ///
    /// The write is unconditional; uniqueness relies on the key's 122 random bits.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::StoreUnavailable`] if the write or the bookkeeping fails.
    pub async fn store(&self, data: impl Into<StoredValue>) -> CacheResult<String> {
        let data = data.into();
        let input = format!("({},)", data.repr());

        self.instrumented
            .call(STORE_OPERATION, input, async {
                let key = generate_key();
                self.store.set(&key, &data.to_bytes()).await?;
                debug!("Stored {} value under {}", data.kind(), key);
                Ok::<_, StoreError>(key)
            })
            .await
    }

    /// Returns the raw bytes stored under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::StoreUnavailable`] on store errors.
    pub async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        Ok(self.store.get(key).await?)
    }

    /// Reads `key` and applies `transform` to the bytes if the key is present.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::StoreUnavailable`] on store errors and propagates
    /// any error produced by `transform`.
    pub async fn get_with<T, E, F>(&self, key: &str, transform: F) -> CacheResult<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> Result<T, E>,
        CacheError: From<E>,
    {
        match self.store.get(key).await? {
            Some(bytes) => Ok(Some(transform(bytes)?)),
            None => Ok(None),
        }
    }

    /// Reads `key` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::DecodeFailure`] if the bytes are not valid UTF-8.
    pub async fn get_str(&self, key: &str) -> CacheResult<Option<String>> {
        self.get_with(key, decode_str).await
    }

    /// Reads `key` as a decimal integer.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::DecodeFailure`] if the bytes are not an integer.
    pub async fn get_int(&self, key: &str) -> CacheResult<Option<i64>> {
        self.get_with(key, decode_int).await
    }

    /// Reads `key` as a floating-point number.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::DecodeFailure`] if the bytes are not a number.
    pub async fn get_float(&self, key: &str) -> CacheResult<Option<f64>> {
        self.get_with(key, decode_float).await
    }

    /// Reads the full call history of `operation`. Does not modify the store.
    pub async fn replay(&self, operation: &str) -> CacheResult<Replay> {
        let inputs = self.store.lrange(&inputs_key(operation), 0, -1).await?;
        let outputs = self.store.lrange(&outputs_key(operation), 0, -1).await?;

        Ok(Replay::from_logs(operation, inputs, outputs))
    }

    /// Returns how many times `operation` has been called (0 if never).
    pub async fn call_count(&self, operation: &str) -> CacheResult<i64> {
        Ok(self.get_int(operation).await?.unwrap_or(0))
    }

    /// Removes every key from the store, including counters and history.
    pub async fn flush(&self) -> CacheResult<()> {
        self.store.flush_db().await?;
        info!("Store flushed");
        Ok(())
    }
}
