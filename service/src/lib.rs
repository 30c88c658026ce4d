// cart_service/src/lib.rs

//! HTTP front end for the shopping-cart service.
//!
//! Handlers authenticate the caller, run one `cart_core::CartService`
//! operation, and return the full cart as JSON.

pub mod config;
pub mod errors;
pub mod observability;
pub mod services;
pub mod state;
pub mod web;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
