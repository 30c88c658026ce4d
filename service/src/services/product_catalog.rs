// cart_service/src/services/product_catalog.rs

//! Product lookup against the catalog service's Postgres database.

use async_trait::async_trait;
use cart_core::{CartError, CartResult, ProductCatalog, ProductDetails, ProductId};
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

use crate::errors::AppError;

#[derive(Debug, FromRow)]
struct ProductRow {
  id: i64,
  name: String,
  price: Decimal,
}

/// Reads `products(id, name, price)` from the catalog's relational store.
#[derive(Debug, Clone)]
pub struct PgProductCatalog {
  pool: PgPool,
}

impl PgProductCatalog {
  /// Creates a pool that connects on first use, so the cart service can start
  /// while the catalog database is still coming up.
  pub fn connect_lazy(database_url: &str, acquire_timeout: Duration) -> Result<Self, AppError> {
    let pool = PgPoolOptions::new()
      .max_connections(5)
      .acquire_timeout(acquire_timeout)
      .connect_lazy(database_url)
      .map_err(|e| AppError::Config(format!("Invalid CATALOG_DATABASE_URL: {}", e)))?;
    info!("Catalog database pool configured.");
    Ok(Self { pool })
  }
}

#[async_trait]
impl ProductCatalog for PgProductCatalog {
  #[instrument(name = "catalog::resolve", skip(self), err(Display))]
  async fn resolve(&self, product_id: ProductId) -> CartResult<ProductDetails> {
    let row: Option<ProductRow> = sqlx::query_as(
      "SELECT id::BIGINT AS id, name, price::NUMERIC AS price FROM products WHERE id = $1",
    )
    .bind(product_id)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      error!("Catalog lookup failed for product {}: {}", product_id, e);
      CartError::CatalogUnavailable { reason: e.to_string() }
    })?;

    match row {
      Some(row) => Ok(ProductDetails::new(row.id, row.name, row.price)),
      None => {
        warn!("Product with ID {} not found in catalog.", product_id);
        Err(CartError::ProductNotFound { product_id })
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn malformed_database_url_is_a_config_error() {
    let err = PgProductCatalog::connect_lazy("not a database url", Duration::from_secs(1)).unwrap_err();
    assert!(matches!(err, AppError::Config(ref m) if m.contains("CATALOG_DATABASE_URL")));
  }

  #[actix_rt::test]
  async fn lazy_pool_does_not_need_a_reachable_database() {
    let catalog = PgProductCatalog::connect_lazy("postgres://cart@127.0.0.1:1/catalog", Duration::from_secs(1));
    assert!(catalog.is_ok());
  }
}
