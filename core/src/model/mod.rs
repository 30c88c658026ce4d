// cart_core/src/model/mod.rs

//! The cart document and the product details it captures.

pub mod cart;
pub mod product;

pub use cart::{Cart, CartItem};
pub use product::{ProductDetails, ProductId};
