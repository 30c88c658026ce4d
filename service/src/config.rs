// cart_service/src/config.rs

use crate::errors::{AppError, Result};
use cart_core::RedisSettings;
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// How the caller's identity is established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
  /// HS256 bearer tokens issued by the user service.
  Jwt { secret: String },
  /// A user id header set by a trusted gateway in front of this service.
  TrustedHeader { header: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Text,
  Json,
}

impl FromStr for LogFormat {
  type Err = AppError;

  fn from_str(value: &str) -> Result<Self> {
    match value.to_ascii_lowercase().as_str() {
      "text" | "pretty" => Ok(LogFormat::Text),
      "json" => Ok(LogFormat::Json),
      other => Err(AppError::Config(format!("Invalid LOG_FORMAT '{}'", other))),
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub redis: RedisSettings,
  pub auth: AuthMode,
  pub catalog_database_url: String,
  pub catalog_acquire_timeout: Duration,
  pub log_format: LogFormat,
}

impl AppConfig {
  /// Reads the process environment, after loading `.env` if present.
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    // Empty values count as unset.
    let get_env = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
    let require = |name: &str| {
      get_env(name).ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", name)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
    let server_port = parse_or("SERVER_PORT", get_env("SERVER_PORT"), 5003u16)?;

    let redis = RedisSettings {
      host: get_env("REDIS_HOST").unwrap_or_else(|| "localhost".to_string()),
      port: parse_or("REDIS_PORT", get_env("REDIS_PORT"), 6379u16)?,
      password: get_env("REDIS_PASSWORD"),
      db: parse_or("REDIS_DB", get_env("REDIS_DB"), 0i64)?,
      connect_timeout: positive_secs("REDIS_CONNECT_TIMEOUT_SECS", get_env("REDIS_CONNECT_TIMEOUT_SECS"), 10)?,
      operation_timeout: positive_secs(
        "REDIS_OPERATION_TIMEOUT_SECS",
        get_env("REDIS_OPERATION_TIMEOUT_SECS"),
        30,
      )?,
    };

    let auth_mode = get_env("AUTH_MODE").map(|mode| mode.to_ascii_lowercase());
    let auth = match auth_mode.as_deref() {
      None | Some("jwt") => AuthMode::Jwt {
        secret: require("JWT_SECRET_KEY")?,
      },
      Some("header") => AuthMode::TrustedHeader {
        header: get_env("AUTH_USER_HEADER").unwrap_or_else(|| "X-User-ID".to_string()),
      },
      Some(other) => {
        return Err(AppError::Config(format!(
          "Invalid AUTH_MODE '{}': expected 'jwt' or 'header'",
          other
        )))
      }
    };

    let catalog_database_url = require("CATALOG_DATABASE_URL")?;
    let catalog_acquire_timeout = positive_secs(
      "CATALOG_ACQUIRE_TIMEOUT_SECS",
      get_env("CATALOG_ACQUIRE_TIMEOUT_SECS"),
      5,
    )?;

    let log_format = match get_env("LOG_FORMAT") {
      Some(value) => value.parse()?,
      None => LogFormat::Text,
    };

    Ok(Self {
      server_host,
      server_port,
      redis,
      auth,
      catalog_database_url,
      catalog_acquire_timeout,
      log_format,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

fn parse_or<T>(name: &str, value: Option<String>, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match value {
    Some(raw) => raw
      .trim()
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {}: {}", name, e))),
    None => Ok(default),
  }
}

/// Timeouts must be finite and non-zero.
fn positive_secs(name: &str, value: Option<String>, default: u64) -> Result<Duration> {
  let secs = parse_or(name, value, default)?;
  if secs == 0 {
    return Err(AppError::Config(format!("Invalid {}: must be at least 1 second", name)));
  }
  Ok(Duration::from_secs(secs))
}
