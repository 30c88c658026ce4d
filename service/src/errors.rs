// cart_service/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use cart_core::CartError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Authentication Failed: {0}")]
  Unauthenticated(String),

  /// Malformed request body or path, rejected before any cart logic runs.
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error(transparent)]
  Cart(#[from] CartError),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  /// Machine-stable code returned in the `error` field.
  pub fn code(&self) -> &'static str {
    match self {
      AppError::Unauthenticated(_) => "UNAUTHENTICATED",
      AppError::Validation(_) => "VALIDATION_ERROR",
      AppError::Cart(cart_error) => match cart_error {
        CartError::InvalidQuantity { .. } => "INVALID_QUANTITY",
        CartError::ItemNotFound { .. } => "ITEM_NOT_FOUND",
        CartError::ProductNotFound { .. } => "PRODUCT_NOT_FOUND",
        CartError::CorruptCartData { .. } => "CORRUPT_CART_DATA",
        CartError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        CartError::CatalogUnavailable { .. } => "CATALOG_UNAVAILABLE",
        CartError::Encoding { .. } => "INTERNAL_ERROR",
      },
      AppError::Config(_) | AppError::Internal(_) => "INTERNAL_ERROR",
    }
  }

  /// Message safe to show to the caller.
  fn public_message(&self) -> String {
    match self {
      AppError::Cart(CartError::CorruptCartData { .. }) => "Stored cart data could not be read.".to_string(),
      AppError::Cart(CartError::StoreUnavailable(_)) => "Cart storage is temporarily unavailable.".to_string(),
      AppError::Cart(CartError::CatalogUnavailable { .. }) => {
        "Product catalog is temporarily unavailable.".to_string()
      }
      AppError::Cart(CartError::Encoding { .. }) | AppError::Config(_) | AppError::Internal(_) => {
        "An internal error occurred.".to_string()
      }
      other => other.to_string(),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Cart(cart_error) => match cart_error {
        CartError::InvalidQuantity { .. } => StatusCode::BAD_REQUEST,
        CartError::ItemNotFound { .. } | CartError::ProductNotFound { .. } => StatusCode::NOT_FOUND,
        CartError::CorruptCartData { .. } | CartError::Encoding { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        CartError::StoreUnavailable(_) | CartError::CatalogUnavailable { .. } => StatusCode::BAD_GATEWAY,
      },
      AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    // Log the full error when it's turned into a response
    if status.is_server_error() {
      tracing::error!(application_error = %self, code = self.code(), "Responding with error");
    } else {
      tracing::warn!(application_error = %self, code = self.code(), "Responding with error");
    }
    HttpResponse::build(status).json(json!({
      "error": self.code(),
      "message": self.public_message(),
    }))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
