//! Static product catalogs, one per storefront section.

use cart::CatalogItem;
use common::{Category, Money};

/// Returns the boulangerie catalog.
pub fn boulangerie() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new(
            "b2",
            "Pain de Campagne",
            Money::from_francs(1200),
            Category::Boulangerie,
        ),
        CatalogItem::new(
            "b3",
            "Croissant au Beurre",
            Money::from_francs(1000),
            Category::Boulangerie,
        ),
        CatalogItem::new(
            "b4",
            "Brioche Tressée",
            Money::from_francs(1500),
            Category::Boulangerie,
        ),
        CatalogItem::new(
            "s1",
            "Beignet Sucré Traditionnel",
            Money::from_francs(500),
            Category::Boulangerie,
        ),
    ]
}

/// Returns the patisserie catalog.
pub fn patisserie() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new(
            "c1",
            "Couronne Fleur d'Oranger",
            Money::from_francs(1800),
            Category::Patisserie,
        ),
        CatalogItem::new(
            "c3",
            "Couronne Pépites de Chocolat",
            Money::from_francs(2000),
            Category::Patisserie,
        ),
        CatalogItem::new(
            "p-b1",
            "Brioche Festival",
            Money::from_francs(2500),
            Category::Patisserie,
        ),
        CatalogItem::new(
            "m1",
            "Brioche Façon Crêpe Mini",
            Money::from_francs(600),
            Category::Patisserie,
        ),
    ]
}

/// Returns the restaurant catalog.
pub fn restaurant() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new(
            "r1",
            "Thiébou Djeune",
            Money::from_francs(6500),
            Category::Restaurant,
        ),
        CatalogItem::new(
            "r3",
            "Thiou",
            Money::from_francs(5200),
            Category::Restaurant,
        ),
        CatalogItem::new(
            "e1",
            "Accras de Morue",
            Money::from_francs(2200),
            Category::Restaurant,
        ),
        CatalogItem::new(
            "a1",
            "Tapalapa",
            Money::from_francs(800),
            Category::Restaurant,
        ),
    ]
}

/// Looks up a product by ID across all sections.
pub fn find(id: &str) -> Option<CatalogItem> {
    boulangerie()
        .into_iter()
        .chain(patisserie())
        .chain(restaurant())
        .find(|item| item.id.as_str() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_across_sections() {
        let all: Vec<_> = boulangerie()
            .into_iter()
            .chain(patisserie())
            .chain(restaurant())
            .collect();

        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.id, b.id, "duplicate catalog id {}", a.id);
            }
        }
    }

    #[test]
    fn test_every_section_item_carries_its_category() {
        assert!(boulangerie().iter().all(|i| i.category == Category::Boulangerie));
        assert!(patisserie().iter().all(|i| i.category == Category::Patisserie));
        assert!(restaurant().iter().all(|i| i.category == Category::Restaurant));
    }

    #[test]
    fn test_find() {
        let bread = find("b2").unwrap();
        assert_eq!(bread.name, "Pain de Campagne");
        assert_eq!(bread.unit_price, Money::from_francs(1200));

        assert!(find("zz").is_none());
    }
}
