// cart_service/src/web/handlers/mod.rs

// Declare handler modules
pub mod cart_handlers;

pub use cart_handlers::AuthenticatedUser;
