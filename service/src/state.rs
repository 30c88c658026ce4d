// cart_service/src/state.rs
use crate::services::Authenticator;
use cart_core::CartService;
use std::sync::Arc;

/// Shared by every handler. Holds no cart state of its own; carts live in the cache.
#[derive(Clone)]
pub struct AppState {
  pub carts: Arc<CartService>,
  pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
  pub fn new(carts: CartService, authenticator: Arc<dyn Authenticator>) -> Self {
    Self {
      carts: Arc::new(carts),
      authenticator,
    }
  }
}
