//! Cart line items and catalog candidates.

use common::{Category, Money, ProductId};
use serde::{Deserialize, Serialize};

/// A product as listed in a storefront catalog, before it carries a
/// quantity. Adding one of these to the cart produces a [`CartItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// The product identifier.
    pub id: ProductId,

    /// Human-readable product name.
    pub name: String,

    /// Price per unit.
    pub unit_price: Money,

    /// Storefront section the product belongs to.
    pub category: Category,

    /// Optional image reference for display.
    pub image: Option<String>,
}

impl CatalogItem {
    /// Creates a new catalog item without an image reference.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            category,
            image: None,
        }
    }
}

/// A line in the shopper's cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product identifier. At most one cart line exists per ID.
    pub id: ProductId,

    /// Human-readable product name.
    pub name: String,

    /// Price per unit.
    pub unit_price: Money,

    /// Quantity in the cart, always at least 1.
    pub quantity: u32,

    /// Storefront section the product belongs to.
    pub category: Category,

    /// Optional image reference for display.
    pub image: Option<String>,
}

impl CartItem {
    /// Creates a cart line from a catalog candidate with quantity 1.
    pub fn from_catalog(candidate: CatalogItem) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
            unit_price: candidate.unit_price,
            quantity: 1,
            category: candidate.category,
            image: candidate.image,
        }
    }

    /// Returns the total price for this line (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campagne() -> CatalogItem {
        CatalogItem::new(
            "b2",
            "Pain de Campagne",
            Money::from_francs(1200),
            Category::Boulangerie,
        )
    }

    #[test]
    fn test_from_catalog_starts_at_quantity_one() {
        let item = CartItem::from_catalog(campagne());
        assert_eq!(item.quantity, 1);
        assert_eq!(item.id.as_str(), "b2");
    }

    #[test]
    fn test_line_total() {
        let mut item = CartItem::from_catalog(campagne());
        item.quantity = 3;
        assert_eq!(item.line_total(), Money::from_francs(3600));
    }

    #[test]
    fn test_cart_item_serialization() {
        let item = CartItem::from_catalog(campagne());
        let json = serde_json::to_string(&item).unwrap();
        let back: CartItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, back);
    }
}
