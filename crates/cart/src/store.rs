//! The cart store and its mutation operations.

use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::item::{CartItem, CatalogItem};

/// The set of lines the shopper intends to purchase.
///
/// Lines are kept in insertion order, which is the display order.
/// Every mutation goes through one of the methods below; the total and
/// the badge count are derived on read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a catalog item to the cart.
    ///
    /// If a line with the same product ID already exists, its quantity
    /// is incremented by 1 and the candidate's other fields are
    /// ignored. Otherwise a new line with quantity 1 is appended.
    pub fn add_item(&mut self, candidate: CatalogItem) {
        if let Some(existing) = self.items.iter_mut().find(|item| item.id == candidate.id) {
            existing.quantity += 1;
        } else {
            self.items.push(CartItem::from_catalog(candidate));
        }
    }

    /// Removes the line with the given product ID.
    ///
    /// A no-op if no such line exists.
    pub fn remove_item(&mut self, id: &ProductId) {
        self.items.retain(|item| &item.id != id);
    }

    /// Sets the quantity of the line with the given product ID.
    ///
    /// A quantity of 0 removes the line, same as [`Cart::remove_item`].
    /// A no-op if no such line exists; this never creates a line.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_item(id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|item| &item.id == id) {
            item.quantity = quantity;
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the cart total, recomputed from the current lines.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Returns the lines in display order.
    pub fn items(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Returns the line with the given product ID.
    pub fn get_item(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Returns the number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total quantity across all lines (the badge count).
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
