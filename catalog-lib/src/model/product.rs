//! Product records as served by the catalog endpoint

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ApiError;

/// Identifier of a product.
///
/// Identifiers are unique within one catalog response. That is trusted, not
/// checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl ProductId {
    /// Returns the raw identifier.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Customer rating attached to a product by some catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating.
    pub rate: Decimal,
    /// Number of ratings.
    pub count: u32,
}

/// A product in the catalog.
///
/// `price` accepts both JSON numbers and numeric strings. Unknown fields are
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub description: String,
    pub category: String,
    /// Image URI.
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

impl Product {
    /// Returns the price with exactly two decimals and no currency symbol.
    ///
    /// Midpoints round away from zero, so `2.005` becomes `"2.01"`.
    pub fn formatted_price(&self) -> String {
        let mut rounded = self
            .price
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        rounded.to_string()
    }
}

/// Decodes a catalog response body.
///
/// The body must be a JSON array. Each element is decoded on its own. An
/// element that does not decode as a [`Product`] is logged and skipped, and
/// the remaining products keep their response order.
pub fn parse_products(body: &str) -> Result<Vec<Product>, ApiError> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(body).map_err(|e| {
        ApiError::parse_with_body(format!("expected a JSON array of products: {}", e), body)
    })?;

    let mut products = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<Product>(entry) {
            Ok(product) => products.push(product),
            Err(e) => log::warn!("Skipping malformed product at index {}: {}", index, e),
        }
    }

    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_with_price(price: Decimal) -> Product {
        Product {
            id: ProductId(1),
            title: "Backpack".to_string(),
            price,
            description: String::new(),
            category: "bags".to_string(),
            image: "https://example.com/1.jpg".to_string(),
            rating: None,
        }
    }

    #[test]
    fn test_formatted_price_pads_to_two_decimals() {
        assert_eq!(product_with_price(Decimal::new(7, 0)).formatted_price(), "7.00");
        assert_eq!(product_with_price(Decimal::new(223, 1)).formatted_price(), "22.30");
        assert_eq!(product_with_price(Decimal::new(10995, 2)).formatted_price(), "109.95");
    }

    #[test]
    fn test_formatted_price_rounds_extra_digits() {
        assert_eq!(product_with_price(Decimal::new(2005, 3)).formatted_price(), "2.01");
        assert_eq!(product_with_price(Decimal::new(9999, 3)).formatted_price(), "10.00");
    }

    #[test]
    fn test_deserialize_fakestore_entry() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": {"rate": 3.9, "count": 120}
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, ProductId(1));
        assert_eq!(product.price, Decimal::new(10995, 2));
        assert_eq!(product.category, "men's clothing");
        assert_eq!(
            product.rating,
            Some(Rating {
                rate: Decimal::new(39, 1),
                count: 120
            })
        );
    }

    #[test]
    fn test_deserialize_string_price_and_missing_rating() {
        let json = r#"{"id": 2, "title": "Mug", "price": "4.5", "description": "",
                       "category": "kitchen", "image": "https://example.com/2.png", "sku": "X"}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.formatted_price(), "4.50");
        assert!(product.rating.is_none());
    }

    #[test]
    fn test_parse_products_skips_malformed_entries() {
        let body = r#"[
            {"id": 1, "title": "A", "price": 1, "description": "", "category": "c", "image": "i"},
            {"id": "two", "title": "B"},
            {"id": 3, "title": "C", "price": 3, "description": "", "category": "c", "image": "i"}
        ]"#;
        let products = parse_products(body).unwrap();

        let ids: Vec<_> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ProductId(1), ProductId(3)]);
    }

    #[test]
    fn test_parse_products_rejects_non_array() {
        let err = parse_products(r#"{"error": "nope"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
        assert_eq!(err.body(), Some(r#"{"error": "nope"}"#));
    }

    #[test]
    fn test_parse_products_empty_array() {
        assert!(parse_products("[]").unwrap().is_empty());
    }
}
