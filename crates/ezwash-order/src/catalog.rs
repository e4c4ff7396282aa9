//! The embedded laundry service catalog.
//!
//! Prices are whole Ghanaian cedi per piece and ship with the client;
//! the backend stores whatever the submitting client computed.

use bigdecimal::BigDecimal;
use bigdecimal::rounding::RoundingMode;

/// One washable item offered by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogItem {
    /// Stable catalog identifier.
    pub id: u32,
    /// Display name, sent verbatim on order lines.
    pub name: &'static str,
    /// Price per piece in whole cedi.
    pub price_cedis: u32,
}

impl CatalogItem {
    /// Returns the unit price as a decimal amount.
    pub fn unit_price(&self) -> BigDecimal {
        BigDecimal::from(self.price_cedis)
    }
}

/// Every item the service washes, in display order.
pub const CATALOG: [CatalogItem; 16] = [
    CatalogItem { id: 1, name: "T-Shirt", price_cedis: 3 },
    CatalogItem { id: 2, name: "Shirt (Formal)", price_cedis: 5 },
    CatalogItem { id: 3, name: "Pants", price_cedis: 6 },
    CatalogItem { id: 4, name: "Jeans", price_cedis: 7 },
    CatalogItem { id: 5, name: "Dress", price_cedis: 10 },
    CatalogItem { id: 6, name: "Suit (2-piece)", price_cedis: 20 },
    CatalogItem { id: 7, name: "Jacket", price_cedis: 12 },
    CatalogItem { id: 8, name: "Sweater", price_cedis: 8 },
    CatalogItem { id: 9, name: "Hoodie", price_cedis: 8 },
    CatalogItem { id: 10, name: "Bedsheet (Single)", price_cedis: 10 },
    CatalogItem { id: 11, name: "Bedsheet (Double)", price_cedis: 15 },
    CatalogItem { id: 12, name: "Duvet Cover", price_cedis: 18 },
    CatalogItem { id: 13, name: "Towel (Large)", price_cedis: 6 },
    CatalogItem { id: 14, name: "Towel (Small)", price_cedis: 4 },
    CatalogItem { id: 15, name: "Curtain Panel", price_cedis: 12 },
    CatalogItem { id: 16, name: "Blanket", price_cedis: 20 },
];

/// Looks up a catalog item by its identifier.
pub fn catalog_item(id: u32) -> Option<&'static CatalogItem> {
    CATALOG.iter().find(|item| item.id == id)
}

/// Formats an amount for display, e.g. `GH₵9.00`.
pub fn format_money(amount: &BigDecimal) -> String {
    format!("GH₵{}", amount.with_scale_round(2, RoundingMode::HalfUp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique_and_sequential() {
        for (index, item) in CATALOG.iter().enumerate() {
            assert_eq!(item.id as usize, index + 1);
        }
    }

    #[test]
    fn test_catalog_lookup() {
        assert_eq!(catalog_item(1).map(|item| item.name), Some("T-Shirt"));
        assert_eq!(catalog_item(16).map(|item| item.price_cedis), Some(20));
        assert!(catalog_item(17).is_none());
    }

    #[test]
    fn test_format_money_two_decimals() {
        assert_eq!(format_money(&BigDecimal::from(9)), "GH₵9.00");
        assert_eq!(format_money(&"7.5".parse().unwrap()), "GH₵7.50");
    }
}
