//! Listing view-state over an already-loaded product list.

use crate::catalog::{same_category, Product};
use crate::money::Money;
use crate::search::{FilterCriteria, SortKey};

/// A fixed product list plus the criteria that shape what is shown.
///
/// Setters return the query string to push into the page URL. When the URL
/// changes from outside (back/forward), [`sync_from_query`] re-derives the
/// criteria from it.
///
/// [`sync_from_query`]: ViewState::sync_from_query
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    products: Vec<Product>,
    criteria: FilterCriteria,
}

impl ViewState {
    /// Seed a view from the loaded products and the current URL query.
    pub fn new(products: Vec<Product>, query: &str) -> Self {
        Self {
            products,
            criteria: FilterCriteria::from_query(query),
        }
    }

    /// The active criteria.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// The loaded list, in source order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Distinct categories present in the loaded list, first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            if !seen.iter().any(|c| same_category(c, &product.category)) {
                seen.push(&product.category);
            }
        }
        seen
    }

    /// The derived list to display.
    pub fn visible(&self) -> Vec<Product> {
        self.criteria.apply(&self.products)
    }

    /// Select a category (blank or `"all"` clears it).
    pub fn set_category(&mut self, category: impl Into<String>) -> String {
        self.criteria = std::mem::take(&mut self.criteria).with_category(category);
        self.criteria.to_query()
    }

    /// Set both price bounds.
    pub fn set_price_range(&mut self, min: Option<Money>, max: Option<Money>) -> String {
        self.criteria = std::mem::take(&mut self.criteria)
            .with_min_price(min)
            .with_max_price(max);
        self.criteria.to_query()
    }

    /// Pick the sort key.
    pub fn set_sort(&mut self, sort: SortKey) -> String {
        self.criteria.sort = sort;
        self.criteria.to_query()
    }

    /// Drop every criterion.
    pub fn reset(&mut self) -> String {
        self.criteria = FilterCriteria::default();
        self.criteria.to_query()
    }

    /// Re-derive the criteria from a URL that changed externally.
    ///
    /// Returns whether the criteria changed.
    pub fn sync_from_query(&mut self, query: &str) -> bool {
        let next = FilterCriteria::from_query(query);
        if next == self.criteria {
            return false;
        }
        tracing::debug!(query, "filter criteria re-derived from URL");
        self.criteria = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;
    use crate::money::Currency;

    fn view(query: &str) -> ViewState {
        ViewState::new(
            vec![
                product(1, 1000, "electronics", 4.1),
                product(2, 3000, "jewelery", 3.9),
                product(3, 2000, "electronics", 4.7),
            ],
            query,
        )
    }

    #[test]
    fn test_seeded_from_query() {
        let view = view("?category=electronics&sort=price-desc");
        let ids: Vec<u64> = view.visible().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_setters_mirror_into_query() {
        let mut view = view("");
        assert_eq!(view.set_category("jewelery"), "category=jewelery");
        assert_eq!(view.set_sort(SortKey::RatingDesc), "category=jewelery&sort=rating");
        assert_eq!(
            view.set_price_range(Some(Money::new(100, Currency::USD)), None),
            "category=jewelery&sort=rating&minPrice=1.00"
        );
        assert_eq!(view.reset(), "");
        assert_eq!(view.visible().len(), 3);
    }

    #[test]
    fn test_sync_from_external_change() {
        let mut view = view("category=electronics");
        assert!(!view.sync_from_query("category=electronics"));
        assert!(view.sync_from_query("sort=price-asc"));
        assert_eq!(view.criteria().category, None);
        assert_eq!(view.criteria().sort, SortKey::PriceAsc);
    }

    #[test]
    fn test_categories_first_seen() {
        assert_eq!(view("").categories(), vec!["electronics", "jewelery"]);
    }

    #[test]
    fn test_categories_fold_non_ascii_case() {
        let view = ViewState::new(
            vec![
                product(1, 1000, "ÇANTA", 4.0),
                product(2, 2000, "çanta", 4.0),
                product(3, 3000, "Ürünler", 4.0),
            ],
            "?category=%C3%A7anta",
        );
        assert_eq!(view.categories(), vec!["ÇANTA", "Ürünler"]);
        let ids: Vec<u64> = view.visible().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_products_kept_in_source_order() {
        let mut view = view("");
        view.set_sort(SortKey::PriceDesc);
        let ids: Vec<u64> = view.products().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
