// cart_core/src/service.rs

//! Request-level cart operations: read, resolve, mutate, write.
//!
//! Each call is an independent read-modify-write against the cache. Two
//! concurrent writers for the same user race and the last write wins.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::catalog::ProductCatalog;
use crate::error::{CartError, CartResult};
use crate::model::{Cart, ProductId};
use crate::store::{CartRepository, KeyValueCache};

#[derive(Clone)]
pub struct CartService {
  repository: CartRepository,
  catalog: Arc<dyn ProductCatalog>,
}

impl std::fmt::Debug for CartService {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartService")
      .field("repository", &self.repository)
      .finish_non_exhaustive()
  }
}

impl CartService {
  pub fn new(cache: Arc<dyn KeyValueCache>, catalog: Arc<dyn ProductCatalog>) -> Self {
    Self {
      repository: CartRepository::new(cache),
      catalog,
    }
  }

  pub fn repository(&self) -> &CartRepository {
    &self.repository
  }

  /// The stored cart, or an unsaved empty one.
  #[instrument(name = "cart_service::get_cart", skip(self), err(Display))]
  pub async fn get_cart(&self, user_id: &str) -> CartResult<Cart> {
    self.load_or_empty(user_id).await
  }

  #[instrument(name = "cart_service::add_item", skip(self), err(Display))]
  pub async fn add_item(&self, user_id: &str, product_id: ProductId, quantity: i64) -> CartResult<Cart> {
    if quantity < 1 {
      warn!("Rejected add with non-positive quantity.");
      return Err(CartError::InvalidQuantity { quantity });
    }

    let mut cart = self.load_or_empty(user_id).await?;
    let product = self.catalog.resolve(product_id).await?;
    cart.add_item(&product, quantity)?;
    self.repository.save(&cart).await?;

    info!(total_items = cart.total_items, total_price = %cart.total_price, "Item added to cart.");
    Ok(cart)
  }

  #[instrument(name = "cart_service::update_item", skip(self), err(Display))]
  pub async fn update_item(&self, user_id: &str, product_id: ProductId, quantity: i64) -> CartResult<Cart> {
    if quantity < 0 {
      warn!("Rejected update with negative quantity.");
      return Err(CartError::InvalidQuantity { quantity });
    }

    let mut cart = self.load_or_empty(user_id).await?;
    cart.update_item_quantity(product_id, quantity)?;
    self.repository.save(&cart).await?;

    info!(total_items = cart.total_items, total_price = %cart.total_price, "Cart item updated.");
    Ok(cart)
  }

  #[instrument(name = "cart_service::remove_item", skip(self), err(Display))]
  pub async fn remove_item(&self, user_id: &str, product_id: ProductId) -> CartResult<Cart> {
    let mut cart = self.load_or_empty(user_id).await?;
    cart.remove_item(product_id)?;
    self.repository.save(&cart).await?;

    info!(total_items = cart.total_items, total_price = %cart.total_price, "Item removed from cart.");
    Ok(cart)
  }

  /// Deletes the stored cart. Clearing an absent cart is not an error.
  #[instrument(name = "cart_service::clear_cart", skip(self), err(Display))]
  pub async fn clear_cart(&self, user_id: &str) -> CartResult<()> {
    let removed = self.repository.delete(user_id).await?;
    info!(removed, "Cart cleared.");
    Ok(())
  }

  async fn load_or_empty(&self, user_id: &str) -> CartResult<Cart> {
    Ok(
      self
        .repository
        .load(user_id)
        .await?
        .unwrap_or_else(|| Cart::empty(user_id)),
    )
  }
}
