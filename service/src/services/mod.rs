// cart_service/src/services/mod.rs

//! Adapters for the collaborators the cart trusts: identity and product lookup.

pub mod auth_service;
pub mod product_catalog;

pub use auth_service::{authenticator_for, Authenticator, JwtAuthenticator, TrustedHeaderAuthenticator};
pub use product_catalog::PgProductCatalog;
