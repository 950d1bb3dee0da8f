//! Product and rating types.

use crate::ids::ProductId;
use crate::money::{self, Money};
use serde::{Deserialize, Serialize};

/// Customer rating summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rating {
    /// Average score, 0 to 5.
    pub rate: f64,
    /// Number of ratings.
    pub count: u64,
}

/// A product in the catalog.
///
/// Field names and shapes follow the catalog's JSON, so a product can be
/// decoded straight from an API response and persisted as-is inside cart and
/// wishlist state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price, non-negative.
    #[serde(with = "money::usd_decimal")]
    pub price: Money,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Category name (e.g. "men's clothing").
    pub category: String,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Rating summary.
    #[serde(default)]
    pub rating: Rating,
}

impl Product {
    /// Whether this product belongs to `category`, ignoring case.
    pub fn in_category(&self, category: &str) -> bool {
        same_category(&self.category, category.trim())
    }

    /// Title cut to at most `max_chars` characters, with `...` appended when cut.
    pub fn short_title(&self, max_chars: usize) -> String {
        if self.title.chars().count() <= max_chars {
            return self.title.clone();
        }
        let mut short: String = self.title.chars().take(max_chars).collect();
        short.push_str("...");
        short
    }
}

/// Case-insensitive category match, Unicode-aware.
pub(crate) fn same_category(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::money::Currency;

    /// A product with the given id, price in cents, category and rating.
    pub fn product(id: u64, price_cents: i64, category: &str, rate: f64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Money::new(price_cents, Currency::USD),
            description: String::new(),
            category: category.to_string(),
            image: format!("https://fakestoreapi.com/img/{id}.jpg"),
            rating: Rating { rate, count: 10 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    const CATALOG_JSON: &str = r#"{
        "id": 1,
        "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
        "price": 109.95,
        "description": "Your perfect pack for everyday use",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
        "rating": { "rate": 3.9, "count": 120 }
    }"#;

    #[test]
    fn test_decode_catalog_product() {
        let product: Product = serde_json::from_str(CATALOG_JSON).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Money::new(10995, Currency::USD));
        assert_eq!(product.rating, Rating { rate: 3.9, count: 120 });
    }

    #[test]
    fn test_missing_rating_defaults() {
        let product: Product = serde_json::from_str(
            r#"{"id": 2, "title": "Mug", "price": 5, "category": "kitchen"}"#,
        )
        .unwrap();
        assert_eq!(product.rating, Rating::default());
        assert!(product.image.is_empty());
    }

    #[test]
    fn test_in_category_ignores_case() {
        let product: Product = serde_json::from_str(CATALOG_JSON).unwrap();
        assert!(product.in_category("Men's Clothing"));
        assert!(product.in_category(" men's clothing "));
        assert!(!product.in_category("jewelery"));
    }

    #[test]
    fn test_in_category_folds_non_ascii() {
        let product = fixtures::product(9, 4500, "Ürünler", 4.0);
        assert!(product.in_category("ürünler"));
        assert!(product.in_category("ÜRÜNLER"));
        assert!(!product.in_category("urunler"));
    }

    #[test]
    fn test_short_title() {
        let product: Product = serde_json::from_str(CATALOG_JSON).unwrap();
        assert_eq!(product.short_title(30), "Fjallraven - Foldsack No. 1 Ba...");
        assert_eq!(product.short_title(200), product.title);
    }
}
