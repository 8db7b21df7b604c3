//! In-process key-value store.

use super::service::{KeyValueStore, StoreCommand, StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::time::{Duration, Instant};
use tracing::debug;

/// A stored value: either a plain string or a list.
#[derive(Debug, Clone)]
enum Value {
    Bytes(Vec<u8>),
    List(Vec<String>),
}

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

#[derive(Debug, Default)]
struct State {
    entries: HashMap<String, Entry>,
    /// Keys written with a TTL, swept on every `set_ex`.
    expiring: HashSet<String>,
}

impl State {
    /// Drops every expired entry among the keys that were given a TTL.
    fn purge_expired(&mut self, now: Instant) {
        let entries = &mut self.entries;
        self.expiring.retain(|key| match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                false
            }
            Some(entry) => entry.expires_at.is_some(),
            None => false,
        });
    }
}

/// A [`KeyValueStore`] kept in process memory.
///
/// Used for tests and for running the service without Redis
/// (`STORE_BACKEND=memory`). All operations go through one mutex, so every
/// command and every batch is atomic. Expiry is measured with
/// `tokio::time::Instant`, which lets tests advance time with
/// `tokio::time::pause`/`advance`. Expired entries are removed when read and
/// swept whenever a new TTL entry is written.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using MemoryStore");
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the live entry for `key`, dropping it first if it has expired.
fn live<'a>(entries: &'a mut HashMap<String, Entry>, key: &str) -> Option<&'a mut Entry> {
    let now = Instant::now();
    if entries.get(key).is_some_and(|e| e.is_expired(now)) {
        entries.remove(key);
    }
    entries.get_mut(key)
}

fn wrong_type(key: &str) -> StoreError {
    StoreError::OperationError(format!(
        "WRONGTYPE Operation against a key holding the wrong kind of value: {}",
        key
    ))
}

fn not_an_integer(key: &str) -> StoreError {
    StoreError::OperationError(format!(
        "ERR value is not an integer or out of range: {}",
        key
    ))
}

fn overflow(key: &str) -> StoreError {
    StoreError::OperationError(format!("ERR increment would overflow: {}", key))
}

fn parse_counter(key: &str, bytes: &[u8]) -> StoreResult<i64> {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| not_an_integer(key))
}

fn incr_locked(entries: &mut HashMap<String, Entry>, key: &str) -> StoreResult<i64> {
    let current = match live(entries, key) {
        None => 0,
        Some(Entry {
            value: Value::Bytes(bytes),
            ..
        }) => parse_counter(key, bytes)?,
        Some(_) => return Err(wrong_type(key)),
    };

    let next = current.checked_add(1).ok_or_else(|| overflow(key))?;

    let expires_at = entries.get(key).and_then(|e| e.expires_at);
    entries.insert(
        key.to_string(),
        Entry {
            value: Value::Bytes(next.to_string().into_bytes()),
            expires_at,
        },
    );
    Ok(next)
}

fn rpush_locked(entries: &mut HashMap<String, Entry>, key: &str, value: &str) -> StoreResult<i64> {
    match live(entries, key) {
        Some(Entry {
            value: Value::List(list),
            ..
        }) => {
            list.push(value.to_string());
            Ok(list.len() as i64)
        }
        Some(_) => Err(wrong_type(key)),
        None => {
            entries.insert(
                key.to_string(),
                Entry {
                    value: Value::List(vec![value.to_string()]),
                    expires_at: None,
                },
            );
            Ok(1)
        }
    }
}

/// What a key will hold at a given point of a batch.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Counter(i64),
    List,
}

/// Dry-runs `commands` against `entries` without mutating anything.
///
/// Only the keys named by the batch are inspected, and each key's type is
/// tracked across the batch, so `INCR k` followed by `RPUSH k` is rejected
/// just as it would be when applied.
fn check_batch(entries: &HashMap<String, Entry>, commands: &[StoreCommand]) -> StoreResult<()> {
    let now = Instant::now();
    let mut slots: HashMap<&str, Option<Slot>> = HashMap::new();

    let current = |key: &str| -> StoreResult<Option<Slot>> {
        match entries.get(key).filter(|e| !e.is_expired(now)) {
            None => Ok(None),
            Some(Entry {
                value: Value::List(_),
                ..
            }) => Ok(Some(Slot::List)),
            Some(Entry {
                value: Value::Bytes(bytes),
                ..
            }) => parse_counter(key, bytes)
                .map(|n| Some(Slot::Counter(n)))
                .map_err(|_| wrong_type(key)),
        }
    };

    for command in commands {
        match command {
            StoreCommand::Incr(key) => {
                let slot = match slots.get(key.as_str()) {
                    Some(slot) => *slot,
                    None => current(key).map_err(|_| not_an_integer(key))?,
                };
                let next = match slot {
                    None => 1,
                    Some(Slot::Counter(n)) => n.checked_add(1).ok_or_else(|| overflow(key))?,
                    Some(Slot::List) => return Err(wrong_type(key)),
                };
                slots.insert(key.as_str(), Some(Slot::Counter(next)));
            }
            StoreCommand::RPush { key, .. } => {
                let slot = match slots.get(key.as_str()) {
                    Some(slot) => *slot,
                    None => current(key)?,
                };
                if matches!(slot, Some(Slot::Counter(_))) {
                    return Err(wrong_type(key));
                }
                slots.insert(key.as_str(), Some(Slot::List));
            }
        }
    }

    Ok(())
}

/// Resolves Redis-style inclusive `start..=stop` indexes against `len`.
fn resolve_range(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    let len = len as isize;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if len == 0 || start > stop || start >= len {
        None
    } else {
        Some((start as usize, stop as usize))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.lock().entries.insert(
            key.to_string(),
            Entry {
                value: Value::Bytes(value.to_vec()),
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let mut state = self.lock();
        match live(&mut state.entries, key) {
            None => Ok(None),
            Some(Entry {
                value: Value::Bytes(bytes),
                ..
            }) => Ok(Some(bytes.clone())),
            Some(_) => Err(wrong_type(key)),
        }
    }

    async fn set_ex(&self, key: &str, value: &[u8], ttl_seconds: u64) -> StoreResult<()> {
        if ttl_seconds == 0 {
            return Err(StoreError::OperationError(
                "ERR invalid expire time in 'setex' command".to_string(),
            ));
        }

        let now = Instant::now();
        let mut state = self.lock();
        state.purge_expired(now);

        state.entries.insert(
            key.to_string(),
            Entry {
                value: Value::Bytes(value.to_vec()),
                expires_at: Some(now + Duration::from_secs(ttl_seconds)),
            },
        );
        state.expiring.insert(key.to_string());
        Ok(())
    }

    async fn incr(&self, key: &str) -> StoreResult<i64> {
        incr_locked(&mut self.lock().entries, key)
    }

    async fn rpush(&self, key: &str, value: &str) -> StoreResult<i64> {
        rpush_locked(&mut self.lock().entries, key, value)
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> StoreResult<Vec<String>> {
        let mut state = self.lock();
        match live(&mut state.entries, key) {
            None => Ok(Vec::new()),
            Some(Entry {
                value: Value::List(list),
                ..
            }) => Ok(match resolve_range(list.len(), start, stop) {
                Some((from, to)) => list[from..=to].to_vec(),
                None => Vec::new(),
            }),
            Some(_) => Err(wrong_type(key)),
        }
    }

    /// Checks the whole batch first, then applies it in place, so a batch
    /// that would fail leaves nothing applied.
    async fn exec_atomic(&self, commands: Vec<StoreCommand>) -> StoreResult<()> {
        let mut state = self.lock();
        check_batch(&state.entries, &commands)?;

        for command in &commands {
            match command {
                StoreCommand::Incr(key) => {
                    incr_locked(&mut state.entries, key)?;
                }
                StoreCommand::RPush { key, value } => {
                    rpush_locked(&mut state.entries, key, value)?;
                }
            }
        }

        Ok(())
    }

    async fn flush_db(&self) -> StoreResult<()> {
        let mut state = self.lock();
        state.entries.clear();
        state.expiring.clear();
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
