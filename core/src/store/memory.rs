// cart_core/src/store/memory.rs

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

use super::KeyValueCache;
use crate::error::StoreResult;

#[derive(Debug)]
struct Entry {
  value: String,
  expires_at: Instant,
}

impl Entry {
  fn is_expired(&self, now: Instant) -> bool {
    now >= self.expires_at
  }
}

/// In-process cache with per-entry expiry, for tests and local runs.
///
/// Expiry reads the tokio clock, so paused-time tests can advance past a TTL.
#[derive(Debug, Default)]
pub struct MemoryCache {
  entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// Remaining time to live of a live key.
  pub fn ttl(&self, key: &str) -> Option<Duration> {
    let now = Instant::now();
    let entries = self.entries.lock();
    entries
      .get(key)
      .filter(|entry| !entry.is_expired(now))
      .map(|entry| entry.expires_at - now)
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.ttl(key).is_some()
  }

  /// Number of live entries.
  pub fn len(&self) -> usize {
    let now = Instant::now();
    self.entries.lock().values().filter(|entry| !entry.is_expired(now)).count()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

#[async_trait]
impl KeyValueCache for MemoryCache {
  async fn get(&self, key: &str) -> StoreResult<Option<String>> {
    let now = Instant::now();
    let mut entries = self.entries.lock();
    let expired = match entries.get(key) {
      Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
      Some(_) => true,
      None => false,
    };
    if expired {
      entries.remove(key);
    }
    Ok(None)
  }

  async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()> {
    let entry = Entry {
      value: value.to_string(),
      expires_at: Instant::now() + ttl,
    };
    self.entries.lock().insert(key.to_string(), entry);
    Ok(())
  }

  async fn delete(&self, key: &str) -> StoreResult<bool> {
    let now = Instant::now();
    Ok(
      self
        .entries
        .lock()
        .remove(key)
        .is_some_and(|entry| !entry.is_expired(now)),
    )
  }
}
