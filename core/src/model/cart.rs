// cart_core/src/model/cart.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::{ProductDetails, ProductId};
use crate::error::{CartError, CartResult};

/// One product line in a cart.
///
/// `subtotal` always equals `unit_price * quantity` once a mutation completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
  pub product_id: ProductId,
  pub product_name: String,
  #[serde(alias = "price")] // documents written before the rename
  pub unit_price: Decimal,
  pub quantity: u32,
  pub subtotal: Decimal,
  pub added_at: DateTime<Utc>,
}

/// A user's cart: the aggregate persisted as one cache document.
///
/// Items keep insertion order and never share a `product_id`. The derived
/// totals are rebuilt from the item list after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
  pub user_id: String,
  pub items: Vec<CartItem>,
  pub total_items: u64,
  pub total_price: Decimal,
  pub updated_at: DateTime<Utc>,
}

impl Cart {
  /// A cart with no items and zero totals.
  pub fn empty(user_id: impl Into<String>) -> Self {
    Self {
      user_id: user_id.into(),
      items: Vec::new(),
      total_items: 0,
      total_price: Decimal::ZERO,
      updated_at: Utc::now(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn item(&self, product_id: ProductId) -> Option<&CartItem> {
    self.items.iter().find(|item| item.product_id == product_id)
  }

  /// Adds `quantity` units of `product`.
  ///
  /// An existing line for the same product is incremented and keeps the unit
  /// price it was first added with; otherwise a new line is appended at the
  /// resolved catalog price.
  ///
  /// # Errors
  /// `InvalidQuantity` if `quantity < 1`, or if the resulting line or cart
  /// total does not fit. The cart is unchanged on error.
  pub fn add_item(&mut self, product: &ProductDetails, quantity: i64) -> CartResult<()> {
    let added = quantity_to_add(quantity)?;
    let mut staged = self.items.clone();

    if let Some(item) = staged.iter_mut().find(|item| item.product_id == product.product_id) {
      item.quantity = item
        .quantity
        .checked_add(added)
        .ok_or(CartError::InvalidQuantity { quantity })?;
    } else {
      staged.push(CartItem {
        product_id: product.product_id,
        product_name: product.name.clone(),
        unit_price: product.price,
        quantity: added,
        subtotal: Decimal::ZERO,
        added_at: Utc::now(),
      });
    }

    self.commit(staged, quantity)
  }

  /// Sets the quantity of an existing line. Zero removes the line.
  ///
  /// # Errors
  /// `InvalidQuantity` if `quantity < 0` or the resulting total does not fit,
  /// `ItemNotFound` if the product is not in the cart. The cart is unchanged
  /// on error.
  pub fn update_item_quantity(&mut self, product_id: ProductId, quantity: i64) -> CartResult<()> {
    let new_quantity = quantity_to_set(quantity)?;
    if new_quantity == 0 {
      return self.remove_item(product_id).map(|_| ());
    }

    let mut staged = self.items.clone();
    let item = staged
      .iter_mut()
      .find(|item| item.product_id == product_id)
      .ok_or(CartError::ItemNotFound { product_id })?;
    item.quantity = new_quantity;

    self.commit(staged, quantity)
  }

  /// Removes a line and returns it.
  ///
  /// # Errors
  /// `ItemNotFound` if the product is not in the cart.
  pub fn remove_item(&mut self, product_id: ProductId) -> CartResult<CartItem> {
    let index = self
      .items
      .iter()
      .position(|item| item.product_id == product_id)
      .ok_or(CartError::ItemNotFound { product_id })?;

    let mut staged = self.items.clone();
    let removed = staged.remove(index);
    let quantity = i64::from(removed.quantity);
    self.commit(staged, quantity)?;
    Ok(removed)
  }

  /// Rebuilds every subtotal, then both totals, in a single pass.
  ///
  /// # Errors
  /// `InvalidQuantity` if a subtotal or the cart total exceeds the decimal
  /// range. Nothing is written in that case.
  pub fn recompute_totals(&mut self) -> CartResult<()> {
    let mut subtotals = Vec::with_capacity(self.items.len());
    let mut total_items: u64 = 0;
    let mut total_price = Decimal::ZERO;

    for item in &self.items {
      let overflow = || CartError::InvalidQuantity {
        quantity: i64::from(item.quantity),
      };
      let subtotal = line_total(item.unit_price, item.quantity).ok_or_else(overflow)?;
      total_price = total_price.checked_add(subtotal).ok_or_else(overflow)?;
      total_items += u64::from(item.quantity);
      subtotals.push(subtotal);
    }

    for (item, subtotal) in self.items.iter_mut().zip(subtotals) {
      item.subtotal = subtotal;
    }
    self.total_items = total_items;
    self.total_price = total_price;
    self.updated_at = Utc::now();
    Ok(())
  }

  /// Swaps in `items` only if their totals can be computed.
  fn commit(&mut self, items: Vec<CartItem>, requested: i64) -> CartResult<()> {
    let mut staged = Cart {
      user_id: self.user_id.clone(),
      items,
      ..*self
    };
    staged
      .recompute_totals()
      .map_err(|_| CartError::InvalidQuantity { quantity: requested })?;
    *self = staged;
    Ok(())
  }
}

fn quantity_to_add(quantity: i64) -> CartResult<u32> {
  if quantity < 1 {
    return Err(CartError::InvalidQuantity { quantity });
  }
  u32::try_from(quantity).map_err(|_| CartError::InvalidQuantity { quantity })
}

fn quantity_to_set(quantity: i64) -> CartResult<u32> {
  u32::try_from(quantity).map_err(|_| CartError::InvalidQuantity { quantity })
}

fn line_total(unit_price: Decimal, quantity: u32) -> Option<Decimal> {
  unit_price.checked_mul(Decimal::from(quantity))
}
