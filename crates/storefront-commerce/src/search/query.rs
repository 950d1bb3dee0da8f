//! URL query mirror of the listing criteria.

use crate::money::{Currency, Money};
use crate::search::filter::normalize_category;
use crate::search::FilterCriteria;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Query parameter names.
pub mod params {
    pub const CATEGORY: &str = "category";
    pub const SORT: &str = "sort";
    pub const MIN_PRICE: &str = "minPrice";
    pub const MAX_PRICE: &str = "maxPrice";
}

/// Sort options for a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortKey {
    /// Keep source order.
    #[default]
    None,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by rating, highest first.
    RatingDesc,
}

impl SortKey {
    /// Value of the `sort` query parameter, `None` when the parameter is absent.
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            SortKey::None => None,
            SortKey::PriceAsc => Some("price-asc"),
            SortKey::PriceDesc => Some("price-desc"),
            SortKey::RatingDesc => Some("rating"),
        }
    }

    /// Parse a `sort` query value. Unknown values (including `default`) mean no sort.
    pub fn from_param(value: &str) -> Self {
        match value.trim() {
            "price-asc" => SortKey::PriceAsc,
            "price-desc" => SortKey::PriceDesc,
            "rating" => SortKey::RatingDesc,
            _ => SortKey::None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::None => "Default",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::RatingDesc => "Rating",
        }
    }
}

impl FilterCriteria {
    /// Encode the set criteria as a query string (no leading `?`).
    ///
    /// Parameters appear in the order `category`, `sort`, `minPrice`,
    /// `maxPrice`; unset ones are omitted. Prices carry two decimals.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(category) = &self.category {
            serializer.append_pair(params::CATEGORY, category);
        }
        if let Some(sort) = self.sort.as_param() {
            serializer.append_pair(params::SORT, sort);
        }
        if let Some(min) = &self.min_price {
            serializer.append_pair(params::MIN_PRICE, &min.display_amount());
        }
        if let Some(max) = &self.max_price {
            serializer.append_pair(params::MAX_PRICE, &max.display_amount());
        }
        serializer.finish()
    }

    /// Decode criteria from a query string, a `?`-prefixed query, or a full URL.
    ///
    /// Missing, blank or unparsable values leave the criterion unset; this
    /// never fails. When a parameter repeats, the last occurrence wins.
    pub fn from_query(input: &str) -> Self {
        let query = match input.split_once('?') {
            Some((_, query)) => query,
            None => input,
        };
        let query = query.split('#').next().unwrap_or_default();

        let mut criteria = FilterCriteria::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                params::CATEGORY => criteria.category = normalize_category(value.into_owned()),
                params::SORT => criteria.sort = SortKey::from_param(&value),
                params::MIN_PRICE => criteria.min_price = Money::parse_lower_bound(&value, Currency::USD),
                params::MAX_PRICE => criteria.max_price = Money::parse_upper_bound(&value, Currency::USD),
                _ => {}
            }
        }
        criteria
    }
}
