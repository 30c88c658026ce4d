// cart_service/src/web/routes.rs

use actix_web::{error::InternalError, web, HttpResponse, ResponseError};

use crate::errors::AppError;
use crate::web::handlers::cart_handlers;

// Static liveness probe; it does not touch the cache.
async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "healthy", "service": "cart-service" }))
}

/// Renders a rejected body or path parameter in the same shape as every other error.
fn rejected(err: impl std::fmt::Display + std::fmt::Debug + 'static) -> actix_web::Error {
  let app_error = AppError::Validation(err.to_string());
  let response = app_error.error_response();
  InternalError::from_response(err, response).into()
}

// Called by `main.rs` (and the HTTP tests) to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(|err, _req| rejected(err)))
    .app_data(web::PathConfig::default().error_handler(|err, _req| rejected(err)))
    .route("/health", web::get().to(health_check_handler))
    .service(
      web::scope("/cart")
        .route("", web::get().to(cart_handlers::get_cart_handler))
        .route("", web::delete().to(cart_handlers::clear_cart_handler))
        .route("/items", web::post().to(cart_handlers::add_item_handler))
        .route("/items/{product_id}", web::put().to(cart_handlers::update_item_handler))
        .route("/items/{product_id}", web::delete().to(cart_handlers::remove_item_handler)),
    );
}
