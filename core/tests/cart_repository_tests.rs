// tests/cart_repository_tests.rs
mod common;
use cart_core::{cart_key, Cart, CartError, CartRepository, KeyValueCache, MemoryCache, CART_TTL};
use common::*;
use std::sync::Arc;
use std::time::Duration;

fn repository() -> (CartRepository, Arc<MemoryCache>) {
  let cache = Arc::new(MemoryCache::new());
  (CartRepository::new(cache.clone()), cache)
}

#[test]
fn keys_are_prefixed_with_cart() {
  assert_eq!(cart_key("user-42"), "cart:user-42");
  assert_eq!(cart_key("17"), "cart:17");
}

#[tokio::test]
async fn load_of_absent_cart_is_none() {
  setup_tracing();
  let (repository, _) = repository();
  assert!(repository.load(USER).await.unwrap().is_none());
}

#[tokio::test]
async fn save_then_load_returns_identical_cart() {
  setup_tracing();
  let (repository, cache) = repository();
  let mut cart = Cart::empty(USER);
  cart.add_item(&widget(), 2).unwrap();
  cart.add_item(&gizmo(), 4).unwrap();

  repository.save(&cart).await.unwrap();

  assert!(cache.contains_key("cart:user-42"));
  let loaded = repository.load(USER).await.unwrap().unwrap();
  assert_eq!(loaded, cart);
}

#[tokio::test(start_paused = true)]
async fn writes_set_a_day_long_ttl_and_reads_do_not_extend_it() {
  let (repository, cache) = repository();
  let mut cart = Cart::empty(USER);
  cart.add_item(&widget(), 1).unwrap();
  repository.save(&cart).await.unwrap();
  assert_eq!(repository.ttl(), CART_TTL);
  assert_eq!(cache.ttl("cart:user-42"), Some(Duration::from_secs(24 * 60 * 60)));

  tokio::time::advance(Duration::from_secs(60 * 60)).await;
  repository.load(USER).await.unwrap().unwrap();
  assert_eq!(cache.ttl("cart:user-42"), Some(Duration::from_secs(23 * 60 * 60)));

  repository.save(&cart).await.unwrap();
  assert_eq!(cache.ttl("cart:user-42"), Some(CART_TTL));
}

#[tokio::test(start_paused = true)]
async fn expired_cart_reads_as_absent() {
  let (repository, cache) = repository();
  repository.save(&Cart::empty(USER)).await.unwrap();

  tokio::time::advance(CART_TTL + Duration::from_secs(1)).await;

  assert!(repository.load(USER).await.unwrap().is_none());
  assert!(cache.is_empty());
}

#[tokio::test]
async fn undecodable_value_is_corrupt_not_absent() {
  setup_tracing();
  let (repository, cache) = repository();
  cache.set_with_ttl("cart:user-42", "{not json", CART_TTL).await.unwrap();

  let err = repository.load(USER).await.unwrap_err();
  match err {
    CartError::CorruptCartData { user_id, .. } => assert_eq!(user_id, USER),
    other => panic!("Expected CorruptCartData, got {:?}", other),
  }
}

#[tokio::test]
async fn document_of_another_user_is_corrupt() {
  setup_tracing();
  let (repository, cache) = repository();
  let foreign = serde_json::to_string(&Cart::empty("someone-else")).unwrap();
  cache.set_with_ttl("cart:user-42", &foreign, CART_TTL).await.unwrap();

  let err = repository.load(USER).await.unwrap_err();
  assert!(matches!(err, CartError::CorruptCartData { ref reason, .. } if reason.contains("someone-else")));
}

#[tokio::test]
async fn delete_reports_whether_a_cart_existed() {
  let (repository, cache) = repository();
  repository.save(&Cart::empty(USER)).await.unwrap();

  assert!(repository.delete(USER).await.unwrap());
  assert!(!cache.contains_key("cart:user-42"));
  assert!(!repository.delete(USER).await.unwrap());
}

#[tokio::test]
async fn cache_failures_surface_as_store_unavailable() {
  let repository = CartRepository::new(Arc::new(UnreachableCache));

  let err = repository.load(USER).await.unwrap_err();
  assert!(matches!(err, CartError::StoreUnavailable(_)));
  let err = repository.save(&Cart::empty(USER)).await.unwrap_err();
  assert!(matches!(err, CartError::StoreUnavailable(_)));
  let err = repository.delete(USER).await.unwrap_err();
  assert!(matches!(err, CartError::StoreUnavailable(_)));
}
