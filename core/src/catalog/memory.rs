// cart_core/src/catalog/memory.rs

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use super::ProductCatalog;
use crate::error::{CartError, CartResult};
use crate::model::{ProductDetails, ProductId};

/// A fixed set of products held in memory.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
  products: RwLock<HashMap<ProductId, ProductDetails>>,
}

impl InMemoryCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_products(products: impl IntoIterator<Item = ProductDetails>) -> Self {
    let catalog = Self::new();
    for product in products {
      catalog.upsert(product);
    }
    catalog
  }

  /// Adds a product or replaces its name and price.
  pub fn upsert(&self, product: ProductDetails) {
    self.products.write().insert(product.product_id, product);
  }

  pub fn remove(&self, product_id: ProductId) -> Option<ProductDetails> {
    self.products.write().remove(&product_id)
  }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
  async fn resolve(&self, product_id: ProductId) -> CartResult<ProductDetails> {
    self
      .products
      .read()
      .get(&product_id)
      .cloned()
      .ok_or(CartError::ProductNotFound { product_id })
  }
}
