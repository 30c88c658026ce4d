// cart_service/src/web/handlers/cart_handlers.rs

use actix_web::{dev::Payload, web, FromRequest, HttpRequest, HttpResponse};
use cart_core::ProductId;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;

// --- Custom Extractor for Authenticated User ---
// Runs before the handler body, so an unauthenticated request never reaches the store.
#[derive(Debug)]
pub struct AuthenticatedUser {
  pub user_id: String,
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let result = match req.app_data::<web::Data<AppState>>() {
      Some(app_state) => app_state
        .authenticator
        .authenticate(req)
        .map(|user_id| AuthenticatedUser { user_id }),
      None => Err(AppError::Internal("Application state is not configured.".to_string())),
    };
    if let Err(e) = &result {
      warn!(error = %e, path = req.path(), "AuthenticatedUser extractor rejected request.");
    }
    futures_util::future::ready(result)
  }
}

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct AddItemRequest {
  pub product_id: ProductId,
  pub quantity: i64,
}

#[derive(Deserialize, Debug)]
pub struct UpdateItemRequest {
  pub quantity: i64,
}

// --- Handler Implementations ---

#[instrument(name = "handler::get_cart", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn get_cart_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
  let cart = app_state.carts.get_cart(&auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(json!({ "cart": cart })))
}

#[instrument(
    name = "handler::add_item",
    skip(app_state, req_payload, auth_user),
    fields(user_id = %auth_user.user_id, product_id = req_payload.product_id, quantity = req_payload.quantity)
)]
pub async fn add_item_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddItemRequest>,
) -> Result<HttpResponse, AppError> {
  let AddItemRequest { product_id, quantity } = req_payload.into_inner();
  let cart = app_state
    .carts
    .add_item(&auth_user.user_id, product_id, quantity)
    .await?;

  info!(
    "Add to cart successful for user: {}. Product ID: {}, Cart total: {}",
    auth_user.user_id, product_id, cart.total_price
  );
  Ok(HttpResponse::Ok().json(json!({
      "message": "Item added to cart",
      "cart": cart
  })))
}

#[instrument(
    name = "handler::update_item",
    skip(app_state, path, req_payload, auth_user),
    fields(user_id = %auth_user.user_id, product_id = *path.as_ref(), quantity = req_payload.quantity)
)]
pub async fn update_item_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  path: web::Path<ProductId>,
  req_payload: web::Json<UpdateItemRequest>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  let cart = app_state
    .carts
    .update_item(&auth_user.user_id, product_id, req_payload.quantity)
    .await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Cart updated",
      "cart": cart
  })))
}

#[instrument(
    name = "handler::remove_item",
    skip(app_state, path, auth_user),
    fields(user_id = %auth_user.user_id, product_id = *path.as_ref())
)]
pub async fn remove_item_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  path: web::Path<ProductId>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  let cart = app_state.carts.remove_item(&auth_user.user_id, product_id).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Item removed from cart",
      "cart": cart
  })))
}

#[instrument(name = "handler::clear_cart", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn clear_cart_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
  app_state.carts.clear_cart(&auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(json!({
      "message": "Cart cleared successfully"
  })))
}
