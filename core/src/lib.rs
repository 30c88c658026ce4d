// src/lib.rs

//! cart_core: the shopping-cart aggregate and its cache-backed persistence.
//!
//! A cart is one JSON document per user in a key-value cache:
//!  - [`Cart`] holds the items and derived totals, and owns the mutation rules.
//!  - [`CartRepository`] stores it at `cart:<user_id>` with a 24 hour TTL.
//!  - [`ProductCatalog`] resolves a product's name and price before an add.
//!  - [`CartService`] runs one read-modify-write per request.

pub mod catalog;
pub mod error;
pub mod model;
pub mod service;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::catalog::{InMemoryCatalog, ProductCatalog};
pub use crate::error::{CartError, CartResult, StoreError, StoreResult};
pub use crate::model::{Cart, CartItem, ProductDetails, ProductId};
pub use crate::service::CartService;
pub use crate::store::{
  cart_key, CartRepository, KeyValueCache, MemoryCache, RedisCache, RedisSettings, CART_KEY_PREFIX, CART_TTL,
};
