// cart_core/src/catalog/mod.rs

//! Product lookup used when an item is added to a cart.

pub mod memory;

use async_trait::async_trait;

use crate::error::CartResult;
use crate::model::{ProductDetails, ProductId};

pub use memory::InMemoryCatalog;

/// Resolves a product id to its current name and price.
///
/// Implementations return `ProductNotFound` for unknown ids and
/// `CatalogUnavailable` when the lookup itself fails. They never invent a
/// placeholder product.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
  async fn resolve(&self, product_id: ProductId) -> CartResult<ProductDetails>;
}
