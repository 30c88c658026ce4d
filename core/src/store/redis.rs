// cart_core/src/store/redis.rs

use ::redis::aio::MultiplexedConnection;
use ::redis::{AsyncCommands, Client, ConnectionAddr, ConnectionInfo, RedisConnectionInfo, RedisResult};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::{error, info, instrument};

use super::KeyValueCache;
use crate::error::{StoreError, StoreResult};

/// Connection settings for the Redis cart cache.
#[derive(Debug, Clone)]
pub struct RedisSettings {
  pub host: String,
  pub port: u16,
  pub password: Option<String>,
  pub db: i64,
  /// Bound on establishing the connection.
  pub connect_timeout: Duration,
  /// Bound on each command round trip.
  pub operation_timeout: Duration,
}

impl Default for RedisSettings {
  fn default() -> Self {
    Self {
      host: "localhost".to_string(),
      port: 6379,
      password: None,
      db: 0,
      connect_timeout: Duration::from_secs(10),
      operation_timeout: Duration::from_secs(30),
    }
  }
}

impl RedisSettings {
  fn connection_info(&self) -> ConnectionInfo {
    ConnectionInfo {
      addr: ConnectionAddr::Tcp(self.host.clone(), self.port),
      redis: RedisConnectionInfo {
        db: self.db,
        password: self.password.clone(),
        ..Default::default()
      },
    }
  }
}

/// Redis-backed cache over a multiplexed connection.
#[derive(Clone)]
pub struct RedisCache {
  conn: MultiplexedConnection,
  operation_timeout: Duration,
}

impl std::fmt::Debug for RedisCache {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RedisCache")
      .field("operation_timeout", &self.operation_timeout)
      .finish_non_exhaustive()
  }
}

impl RedisCache {
  /// Connects and verifies the server answers `PING`.
  #[instrument(name = "redis_cache::connect", skip(settings), fields(host = %settings.host, port = settings.port, db = settings.db), err(Display))]
  pub async fn connect(settings: &RedisSettings) -> StoreResult<Self> {
    let client = Client::open(settings.connection_info()).map_err(|e| unavailable("open client", &e))?;

    let conn = tokio::time::timeout(
      settings.connect_timeout,
      client.get_multiplexed_async_connection_with_timeouts(settings.operation_timeout, settings.connect_timeout),
    )
    .await
    .map_err(|_| StoreError::Timeout {
      command: "CONNECT",
      timeout: settings.connect_timeout,
    })?
    .map_err(|e| unavailable("connect", &e))?;

    let cache = Self {
      conn,
      operation_timeout: settings.operation_timeout,
    };
    cache.ping().await?;
    info!("Connected to Redis.");
    Ok(cache)
  }

  pub async fn ping(&self) -> StoreResult<()> {
    let mut conn = self.conn.clone();
    self
      .bounded("PING", async move {
        let _: String = ::redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
      })
      .await
  }

  async fn bounded<T, F>(&self, command: &'static str, op: F) -> StoreResult<T>
  where
    F: Future<Output = RedisResult<T>> + Send,
  {
    match tokio::time::timeout(self.operation_timeout, op).await {
      Ok(Ok(value)) => Ok(value),
      Ok(Err(e)) => Err(unavailable(command, &e)),
      Err(_) => {
        error!(command, timeout = ?self.operation_timeout, "Redis command timed out.");
        Err(StoreError::Timeout {
          command,
          timeout: self.operation_timeout,
        })
      }
    }
  }
}

fn unavailable(command: &str, err: &::redis::RedisError) -> StoreError {
  error!(command, error = %err, "Redis command failed.");
  StoreError::Unavailable {
    reason: format!("{command}: {err}"),
  }
}

#[async_trait]
impl KeyValueCache for RedisCache {
  async fn get(&self, key: &str) -> StoreResult<Option<String>> {
    let mut conn = self.conn.clone();
    self.bounded("GET", async move { conn.get(key).await }).await
  }

  async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()> {
    let mut conn = self.conn.clone();
    let seconds = ttl.as_secs().max(1);
    self.bounded("SETEX", async move { conn.set_ex(key, value, seconds).await }).await
  }

  async fn delete(&self, key: &str) -> StoreResult<bool> {
    let mut conn = self.conn.clone();
    let removed: i64 = self.bounded("DEL", async move { conn.del(key).await }).await?;
    Ok(removed > 0)
  }
}
