// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use cart_core::{
  Cart, CartService, InMemoryCatalog, KeyValueCache, MemoryCache, ProductDetails, StoreError, StoreResult,
};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use std::time::Duration;
use tokio::sync::Barrier;
use tracing::Level;

pub const USER: &str = "user-42";

// --- Catalog fixtures ---
pub fn widget() -> ProductDetails {
  ProductDetails::new(7, "Widget", Decimal::new(999, 2))
}

pub fn gadget() -> ProductDetails {
  ProductDetails::new(8, "Gadget", Decimal::new(2500, 2))
}

pub fn gizmo() -> ProductDetails {
  ProductDetails::new(9, "Gizmo", Decimal::new(125, 2))
}

pub fn catalog() -> Arc<InMemoryCatalog> {
  Arc::new(InMemoryCatalog::with_products([widget(), gadget(), gizmo()]))
}

pub fn service_over(cache: Arc<dyn KeyValueCache>) -> CartService {
  CartService::new(cache, catalog())
}

/// A service over a fresh counting memory cache; the cache handle is returned for inspection.
pub fn memory_service() -> (CartService, Arc<CountingCache>) {
  let cache = Arc::new(CountingCache::new());
  (service_over(cache.clone()), cache)
}

pub fn assert_totals_consistent(cart: &Cart) {
  let quantity: u64 = cart.items.iter().map(|item| u64::from(item.quantity)).sum();
  let price: Decimal = cart.items.iter().map(|item| item.subtotal).sum();
  assert_eq!(cart.total_items, quantity, "total_items drifted from item quantities");
  assert_eq!(cart.total_price, price, "total_price drifted from item subtotals");
  for item in &cart.items {
    assert_eq!(
      item.subtotal,
      item.unit_price * Decimal::from(item.quantity),
      "subtotal drifted for product {}",
      item.product_id
    );
  }
}

// --- Cache doubles ---

/// Memory cache that counts writes and deletes.
#[derive(Debug, Default)]
pub struct CountingCache {
  pub inner: MemoryCache,
  pub writes: AtomicUsize,
  pub deletes: AtomicUsize,
}

impl CountingCache {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn write_count(&self) -> usize {
    self.writes.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl KeyValueCache for CountingCache {
  async fn get(&self, key: &str) -> StoreResult<Option<String>> {
    self.inner.get(key).await
  }

  async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()> {
    self.writes.fetch_add(1, Ordering::SeqCst);
    self.inner.set_with_ttl(key, value, ttl).await
  }

  async fn delete(&self, key: &str) -> StoreResult<bool> {
    self.deletes.fetch_add(1, Ordering::SeqCst);
    self.inner.delete(key).await
  }
}

/// Cache whose every command fails as if the server were down.
#[derive(Debug, Default)]
pub struct UnreachableCache;

#[async_trait]
impl KeyValueCache for UnreachableCache {
  async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
    Err(StoreError::Unavailable {
      reason: "connection refused".to_string(),
    })
  }

  async fn set_with_ttl(&self, _key: &str, _value: &str, _ttl: Duration) -> StoreResult<()> {
    Err(StoreError::Timeout {
      command: "SETEX",
      timeout: Duration::from_secs(1),
    })
  }

  async fn delete(&self, _key: &str) -> StoreResult<bool> {
    Err(StoreError::Unavailable {
      reason: "connection refused".to_string(),
    })
  }
}

/// Memory cache whose reads wait until `parties` readers have read.
///
/// Forces concurrent read-modify-write cycles to interleave: every request
/// reads the same snapshot before any of them writes.
#[derive(Debug)]
pub struct LockstepReadCache {
  pub inner: Arc<MemoryCache>,
  barrier: Barrier,
}

impl LockstepReadCache {
  pub fn new(parties: usize) -> Self {
    Self {
      inner: Arc::new(MemoryCache::new()),
      barrier: Barrier::new(parties),
    }
  }

  /// A service over the backing cache that does not wait on the barrier.
  pub fn unsynchronized_service(&self) -> CartService {
    service_over(self.inner.clone())
  }
}

#[async_trait]
impl KeyValueCache for LockstepReadCache {
  async fn get(&self, key: &str) -> StoreResult<Option<String>> {
    let value = self.inner.get(key).await?;
    self.barrier.wait().await;
    Ok(value)
  }

  async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()> {
    self.inner.set_with_ttl(key, value, ttl).await
  }

  async fn delete(&self, key: &str) -> StoreResult<bool> {
    self.inner.delete(key).await
  }
}

// --- Helper for Tracing Setup ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
