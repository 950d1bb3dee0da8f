//! Listing filter criteria.

use crate::catalog::Product;
use crate::money::Money;
use crate::search::SortKey;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The user's category, price bounds and sort choice for a listing.
///
/// Every field is optional; an unset field leaves the corresponding stage of
/// [`apply`](FilterCriteria::apply) as a pass-through.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Category to keep, matched ignoring case.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Money>,
    /// Inclusive upper price bound.
    pub max_price: Option<Money>,
    /// Ordering of the result.
    pub sort: SortKey,
}

impl FilterCriteria {
    /// Create criteria that keep everything in source order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the category. Blank input and `"all"` mean no constraint.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = normalize_category(category.into());
        self
    }

    /// Set the lower price bound. Negative amounts mean no constraint.
    pub fn with_min_price(mut self, min: Option<Money>) -> Self {
        self.min_price = min.filter(|m| !m.is_negative());
        self
    }

    /// Set the upper price bound. Negative amounts mean no constraint.
    pub fn with_max_price(mut self, max: Option<Money>) -> Self {
        self.max_price = max.filter(|m| !m.is_negative());
        self
    }

    /// Set sort key.
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Whether no criterion is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Derive the filtered, sorted view of `products`.
    ///
    /// Stages run in a fixed order: category, minimum price, maximum price,
    /// then a stable sort. The source slice is not modified. Products that
    /// compare equal under the sort key keep their source order.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut result: Vec<Product> = products
            .iter()
            .filter(|p| self.category.as_deref().map_or(true, |c| p.in_category(c)))
            .filter(|p| self.min_price.map_or(true, |min| p.price.amount_cents >= min.amount_cents))
            .filter(|p| self.max_price.map_or(true, |max| p.price.amount_cents <= max.amount_cents))
            .cloned()
            .collect();

        match self.sort {
            SortKey::None => {}
            SortKey::PriceAsc => result.sort_by_key(|p| p.price.amount_cents),
            SortKey::PriceDesc => result.sort_by_key(|p| std::cmp::Reverse(p.price.amount_cents)),
            SortKey::RatingDesc => result.sort_by(by_rate_desc),
        }
        result
    }
}

fn by_rate_desc(a: &Product, b: &Product) -> Ordering {
    b.rating.rate.total_cmp(&a.rating.rate)
}

pub(crate) fn normalize_category(category: String) -> Option<String> {
    let trimmed = category.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(trimmed.to_string())
    }
}
