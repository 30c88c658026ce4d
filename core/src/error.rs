// cart_core/src/error.rs
use std::time::Duration;
use thiserror::Error;

use crate::model::ProductId;

/// Failures talking to the key-value cache.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("cache unavailable: {reason}")]
  Unavailable { reason: String },

  #[error("cache command {command} timed out after {timeout:?}")]
  Timeout { command: &'static str, timeout: Duration },
}

#[derive(Debug, Error)]
pub enum CartError {
  #[error("Quantity {quantity} is not valid for this operation")]
  InvalidQuantity { quantity: i64 },

  #[error("Product {product_id} is not in the cart")]
  ItemNotFound { product_id: ProductId },

  #[error("Product {product_id} was not found in the catalog")]
  ProductNotFound { product_id: ProductId },

  /// The cache returned a value that is not a cart for this user.
  /// Distinct from an absent cart, which is a valid empty state.
  #[error("Stored cart for user '{user_id}' is corrupt: {reason}")]
  CorruptCartData { user_id: String, reason: String },

  #[error("Cart store unavailable: {0}")]
  StoreUnavailable(#[from] StoreError),

  #[error("Product catalog unavailable: {reason}")]
  CatalogUnavailable { reason: String },

  #[error("Failed to encode cart for user '{user_id}': {source}")]
  Encoding {
    user_id: String,
    #[source]
    source: serde_json::Error,
  },
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
