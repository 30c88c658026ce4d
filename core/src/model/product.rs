// cart_core/src/model/product.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type ProductId = i64;

/// Name and current price of a catalog product, as resolved at add time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
  pub product_id: ProductId,
  pub name: String,
  pub price: Decimal,
}

impl ProductDetails {
  pub fn new(product_id: ProductId, name: impl Into<String>, price: Decimal) -> Self {
    Self {
      product_id,
      name: name.into(),
      price,
    }
  }
}
