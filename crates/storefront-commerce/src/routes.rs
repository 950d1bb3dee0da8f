//! Locale-prefixed storefront links.

use crate::catalog::Product;
use crate::search::FilterCriteria;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Storefront locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Tr,
}

impl Locale {
    /// Every supported locale.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Tr];

    /// Two-letter code used as the path prefix.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Tr => "tr",
        }
    }

    /// Parse a locale code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// `/{locale}/products` plus the criteria's query string, if any.
pub fn listing_path(locale: Locale, criteria: &FilterCriteria) -> String {
    let path = encode_segments(&[locale.code(), "products"]);
    let query = criteria.to_query();
    if query.is_empty() {
        path
    } else {
        format!("{path}?{query}")
    }
}

/// `/{locale}/products/{id}/{title}` with the title percent-encoded.
pub fn product_path(locale: Locale, product: &Product) -> String {
    let id = product.id.to_string();
    encode_segments(&[locale.code(), "products", &id, &product.title])
}

fn encode_segments(segments: &[&str]) -> String {
    let mut url = match Url::parse("http://storefront.invalid/") {
        Ok(url) => url,
        Err(_) => return format!("/{}", segments.join("/")),
    };
    if let Ok(mut path) = url.path_segments_mut() {
        path.clear().extend(segments);
    }
    url.path().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;
    use crate::search::SortKey;

    #[test]
    fn test_locale_codes() {
        assert_eq!(Locale::from_code("TR"), Some(Locale::Tr));
        assert_eq!(Locale::from_code("de"), None);
        assert_eq!(Locale::default().to_string(), "en");
    }

    #[test]
    fn test_listing_path() {
        assert_eq!(listing_path(Locale::En, &FilterCriteria::new()), "/en/products");

        let criteria = FilterCriteria::new()
            .with_category("jewelery")
            .with_sort(SortKey::RatingDesc);
        assert_eq!(
            listing_path(Locale::Tr, &criteria),
            "/tr/products?category=jewelery&sort=rating"
        );
    }

    #[test]
    fn test_product_path_encodes_title() {
        let mut p = product(3, 5599, "men's clothing", 4.7);
        p.title = "Mens Cotton Jacket / Blue".to_string();
        assert_eq!(
            product_path(Locale::En, &p),
            "/en/products/3/Mens%20Cotton%20Jacket%20%2F%20Blue"
        );
    }
}
