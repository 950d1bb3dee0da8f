//! Wishlist state: a membership set of liked products.

use crate::catalog::Product;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Liked products, unique by id, in the order they were liked.
///
/// `total_items` always equals the number of products held.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "StoredWishlist")]
pub struct WishlistState {
    items: Vec<Product>,
    total_items: usize,
}

impl WishlistState {
    /// Create an empty wishlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `product` unless already present. Returns whether it was inserted.
    pub fn add(&mut self, product: &Product) -> bool {
        let inserted = !self.is_member(product.id);
        if inserted {
            self.items.push(product.clone());
        }
        self.sync_count();
        inserted
    }

    /// Remove the product with `id`. Returns whether it was present.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|p| p.id != id);
        self.sync_count();
        self.items.len() < len_before
    }

    /// Remove `product` if present, add it otherwise.
    ///
    /// Returns whether the product is a member afterwards.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.remove(product.id) {
            false
        } else {
            self.add(product)
        }
    }

    /// Remove every product.
    pub fn clear(&mut self) {
        self.items.clear();
        self.sync_count();
    }

    /// Whether the product with `id` is in the wishlist.
    pub fn is_member(&self, id: ProductId) -> bool {
        self.items.iter().any(|p| p.id == id)
    }

    /// Products in the order they were liked.
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Number of products held.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Whether the wishlist is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn sync_count(&mut self) {
        self.total_items = self.items.len();
    }
}

#[derive(Deserialize)]
struct StoredWishlist {
    #[serde(default)]
    items: Vec<Product>,
}

impl From<StoredWishlist> for WishlistState {
    fn from(stored: StoredWishlist) -> Self {
        let mut wishlist = WishlistState::new();
        for product in &stored.items {
            wishlist.add(product);
        }
        wishlist
    }
}
