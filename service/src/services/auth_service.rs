// cart_service/src/services/auth_service.rs

//! Resolves the caller's user id from a request.
//!
//! Identity is issued elsewhere (the user service signs tokens, or a gateway
//! injects a header). This module only verifies it and hands the cart a user id.

use crate::config::AuthMode;
use crate::errors::AppError;
use actix_web::http::header::{HeaderName, AUTHORIZATION};
use actix_web::HttpRequest;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

pub trait Authenticator: Send + Sync {
  /// The verified user id of the caller.
  fn authenticate(&self, req: &HttpRequest) -> Result<String, AppError>;
}

/// Builds the authenticator selected by configuration.
pub fn authenticator_for(mode: &AuthMode) -> Result<Arc<dyn Authenticator>, AppError> {
  match mode {
    AuthMode::Jwt { secret } => Ok(Arc::new(JwtAuthenticator::new(secret.as_bytes()))),
    AuthMode::TrustedHeader { header } => Ok(Arc::new(TrustedHeaderAuthenticator::new(header)?)),
  }
}

#[derive(Debug, Deserialize)]
struct AccessClaims {
  /// Identity claim; the user service writes integer ids, other issuers strings.
  sub: serde_json::Value,
  #[serde(rename = "type", default)]
  token_type: Option<String>,
}

/// Verifies HS256 bearer tokens signed with the user service's secret.
pub struct JwtAuthenticator {
  decoding_key: DecodingKey,
  validation: Validation,
}

impl JwtAuthenticator {
  pub fn new(secret: &[u8]) -> Self {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    Self {
      decoding_key: DecodingKey::from_secret(secret),
      validation,
    }
  }
}

impl Authenticator for JwtAuthenticator {
  #[instrument(name = "auth_service::jwt", skip_all, err(Display))]
  fn authenticate(&self, req: &HttpRequest) -> Result<String, AppError> {
    let header = req
      .headers()
      .get(AUTHORIZATION)
      .ok_or_else(|| AppError::Unauthenticated("Missing Authorization header.".to_string()))?;
    let token = header
      .to_str()
      .ok()
      .and_then(|value| value.strip_prefix("Bearer "))
      .map(str::trim)
      .filter(|token| !token.is_empty())
      .ok_or_else(|| AppError::Unauthenticated("Authorization header must be 'Bearer <token>'.".to_string()))?;

    let claims = jsonwebtoken::decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
      .map_err(|e| {
        warn!(error = %e, "Rejected bearer token.");
        AppError::Unauthenticated("Invalid or expired token.".to_string())
      })?
      .claims;

    if claims.token_type.as_deref().is_some_and(|kind| kind != "access") {
      warn!(token_type = ?claims.token_type, "Rejected non-access token.");
      return Err(AppError::Unauthenticated("An access token is required.".to_string()));
    }

    let user_id = match claims.sub {
      serde_json::Value::String(id) => id,
      serde_json::Value::Number(id) => id.to_string(),
      _ => String::new(),
    };
    if user_id.trim().is_empty() {
      return Err(AppError::Unauthenticated("Token carries no user identity.".to_string()));
    }

    debug!(%user_id, "Authenticated bearer token.");
    Ok(user_id)
  }
}

/// Trusts a user id header injected by an upstream gateway.
#[derive(Debug)]
pub struct TrustedHeaderAuthenticator {
  header: HeaderName,
}

impl TrustedHeaderAuthenticator {
  pub fn new(header: &str) -> Result<Self, AppError> {
    let header = HeaderName::from_bytes(header.as_bytes())
      .map_err(|e| AppError::Config(format!("Invalid AUTH_USER_HEADER '{}': {}", header, e)))?;
    Ok(Self { header })
  }
}

impl Authenticator for TrustedHeaderAuthenticator {
  fn authenticate(&self, req: &HttpRequest) -> Result<String, AppError> {
    req
      .headers()
      .get(&self.header)
      .and_then(|value| value.to_str().ok())
      .map(str::trim)
      .filter(|user_id| !user_id.is_empty())
      .map(str::to_string)
      .ok_or_else(|| AppError::Unauthenticated(format!("Missing or invalid {} header.", self.header)))
  }
}
