// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, Error};
use async_trait::async_trait;
use cart_core::{CartService, InMemoryCatalog, KeyValueCache, MemoryCache, ProductDetails, StoreError, StoreResult};
use cart_service::services::{Authenticator, TrustedHeaderAuthenticator};
use cart_service::web::configure_app_routes;
use cart_service::AppState;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

pub const USER_HEADER: &str = "X-User-ID";
pub const USER: &str = "user-42";

pub fn catalog() -> Arc<InMemoryCatalog> {
  Arc::new(InMemoryCatalog::with_products([
    ProductDetails::new(7, "Widget", Decimal::new(999, 2)),
    ProductDetails::new(8, "Gadget", Decimal::new(2500, 2)),
  ]))
}

pub fn header_auth() -> Arc<dyn Authenticator> {
  Arc::new(TrustedHeaderAuthenticator::new(USER_HEADER).unwrap())
}

pub fn state_over(cache: Arc<dyn KeyValueCache>) -> AppState {
  AppState::new(CartService::new(cache, catalog()), header_auth())
}

pub fn app(
  state: AppState,
) -> App<
  impl ServiceFactory<ServiceRequest, Config = (), Response = ServiceResponse<impl MessageBody>, Error = Error, InitError = ()>,
> {
  App::new().app_data(web::Data::new(state)).configure(configure_app_routes)
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
    Err(StoreError::Unavailable {
      reason: "connection refused".to_string(),
    })
  }

  async fn delete(&self, _key: &str) -> StoreResult<bool> {
    Err(StoreError::Unavailable {
      reason: "connection refused".to_string(),
    })
  }
}

pub fn memory_cache() -> Arc<MemoryCache> {
  Arc::new(MemoryCache::new())
}
