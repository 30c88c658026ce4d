// cart_core/src/store/mod.rs

//! Cart persistence on top of a key-value cache.
//!
//! One JSON document per user lives at `cart:<user_id>`. Every write sets the
//! expiration to [`CART_TTL`]; reads never touch it.

pub mod memory;
pub mod redis;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::error::{CartError, CartResult, StoreResult};
use crate::model::Cart;

pub use memory::MemoryCache;
pub use self::redis::{RedisCache, RedisSettings};

pub const CART_KEY_PREFIX: &str = "cart:";

/// Expiration applied on every cart write.
pub const CART_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Minimal string key-value cache with expiring writes.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
  async fn get(&self, key: &str) -> StoreResult<Option<String>>;

  async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()>;

  /// Returns whether a key was removed.
  async fn delete(&self, key: &str) -> StoreResult<bool>;
}

pub fn cart_key(user_id: &str) -> String {
  format!("{CART_KEY_PREFIX}{user_id}")
}

/// Serializes carts into the cache and back.
#[derive(Clone)]
pub struct CartRepository {
  cache: Arc<dyn KeyValueCache>,
  ttl: Duration,
}

impl std::fmt::Debug for CartRepository {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartRepository").field("ttl", &self.ttl).finish_non_exhaustive()
  }
}

impl CartRepository {
  pub fn new(cache: Arc<dyn KeyValueCache>) -> Self {
    Self { cache, ttl: CART_TTL }
  }

  pub fn ttl(&self) -> Duration {
    self.ttl
  }

  /// Loads the stored cart, `None` when the user has none.
  ///
  /// A value that does not decode, or that belongs to another user, is
  /// reported as `CorruptCartData` rather than treated as absent.
  #[instrument(name = "cart_repository::load", skip(self), err(Display))]
  pub async fn load(&self, user_id: &str) -> CartResult<Option<Cart>> {
    let key = cart_key(user_id);
    let Some(raw) = self.cache.get(&key).await? else {
      debug!("No stored cart.");
      return Ok(None);
    };

    let cart: Cart = serde_json::from_str(&raw).map_err(|e| {
      warn!(error = %e, "Stored cart failed to decode.");
      CartError::CorruptCartData {
        user_id: user_id.to_string(),
        reason: e.to_string(),
      }
    })?;

    if cart.user_id != user_id {
      warn!(stored_user_id = %cart.user_id, "Stored cart belongs to a different user.");
      return Err(CartError::CorruptCartData {
        user_id: user_id.to_string(),
        reason: format!("document belongs to user '{}'", cart.user_id),
      });
    }

    debug!(items = cart.items.len(), "Loaded stored cart.");
    Ok(Some(cart))
  }

  /// Writes the cart and resets its expiration.
  #[instrument(name = "cart_repository::save", skip(self, cart), fields(user_id = %cart.user_id), err(Display))]
  pub async fn save(&self, cart: &Cart) -> CartResult<()> {
    let encoded = serde_json::to_string(cart).map_err(|source| CartError::Encoding {
      user_id: cart.user_id.clone(),
      source,
    })?;
    self.cache.set_with_ttl(&cart_key(&cart.user_id), &encoded, self.ttl).await?;
    debug!(bytes = encoded.len(), "Stored cart.");
    Ok(())
  }

  #[instrument(name = "cart_repository::delete", skip(self), err(Display))]
  pub async fn delete(&self, user_id: &str) -> CartResult<bool> {
    Ok(self.cache.delete(&cart_key(user_id)).await?)
  }
}
