//! The canonical order record.

use chrono::{DateTime, Utc};
use common::{Category, Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::form::PaymentMethod;

/// A single line of a composed order.
///
/// Snapshotted by value from the cart at composition time; later cart
/// mutations never reach a composed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// The product identifier.
    pub id: ProductId,

    /// Human-readable product name.
    pub name: String,

    /// Price per unit at composition time.
    pub unit_price: Money,

    /// Quantity ordered.
    pub quantity: u32,

    /// Storefront section the product belongs to.
    pub category: Category,
}

impl OrderLine {
    /// Returns the total price for this line (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// A canonical order, composed once at submission time.
///
/// Immutable by construction: there are no mutating methods, and a new
/// order is always a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Shopper's full name.
    pub customer_name: String,

    /// Shopper's phone number.
    pub customer_phone: String,

    /// Snapshotted cart lines.
    pub lines: Vec<OrderLine>,

    /// Order total, recomputed from the lines at composition time.
    pub total: Money,

    /// Delivery address.
    pub address: String,

    /// Special instructions; empty means none.
    pub instructions: String,

    /// Selected payment method.
    pub payment_method: PaymentMethod,

    /// Composition timestamp.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns true if the shopper left special instructions.
    pub fn has_instructions(&self) -> bool {
        !self.instructions.trim().is_empty()
    }
}
