// cart_service/src/main.rs

use anyhow::Context;
use cart_core::{CartService, RedisCache};
use cart_service::config::AppConfig;
use cart_service::services::{authenticator_for, PgProductCatalog};
use cart_service::state::AppState;
use cart_service::web::configure_app_routes;

use actix_web::{web as actix_data, App, HttpServer};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Load application configuration
  let app_config = AppConfig::from_env().context("Failed to load application configuration")?;
  cart_service::observability::init_tracing(app_config.log_format);

  tracing::info!("Starting cart service...");
  tracing::info!(
    redis_host = %app_config.redis.host,
    redis_port = app_config.redis.port,
    redis_db = app_config.redis.db,
    "Application configuration loaded successfully."
  );

  // The cart store is required; refuse to start without it.
  let cache = RedisCache::connect(&app_config.redis)
    .await
    .context("Failed to connect to Redis")?;

  let catalog = PgProductCatalog::connect_lazy(&app_config.catalog_database_url, app_config.catalog_acquire_timeout)
    .context("Failed to configure the product catalog")?;

  let authenticator = authenticator_for(&app_config.auth).context("Failed to configure authentication")?;

  let app_state = AppState::new(CartService::new(Arc::new(cache), Arc::new(catalog)), authenticator);

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await
  .context("HTTP server terminated with an error")?;

  tracing::info!("Cart service stopped.");
  Ok(())
}
