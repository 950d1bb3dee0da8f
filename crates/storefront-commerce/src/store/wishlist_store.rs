//! The persisted wishlist.

use super::persistent::{Mutation, Persistent};
use super::WISHLIST_KEY;
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::wishlist::WishlistState;
use storefront_cache::KvStore;

/// Wishlist state saved under [`WISHLIST_KEY`] after every change.
#[derive(Debug)]
pub struct WishlistStore<S> {
    inner: Persistent<WishlistState, S>,
}

impl<S: KvStore> WishlistStore<S> {
    /// Open the wishlist, rehydrating whatever was saved last.
    pub fn open(store: S) -> Result<Self, CommerceError> {
        Ok(Self {
            inner: Persistent::open(store, WISHLIST_KEY)?,
        })
    }

    pub fn state(&self) -> &WishlistState {
        self.inner.state()
    }

    pub fn saved_at(&self) -> Option<i64> {
        self.inner.saved_at()
    }

    pub fn is_member(&self, id: ProductId) -> bool {
        self.inner.state().is_member(id)
    }

    /// Add a product; the outcome is false if it was already present.
    pub fn add(&mut self, product: &Product) -> Mutation<bool> {
        self.inner.mutate(|list| list.add(product))
    }

    pub fn remove(&mut self, id: ProductId) -> Mutation<bool> {
        self.inner.mutate(|list| list.remove(id))
    }

    /// Flip membership; the outcome is whether the product is now a member.
    pub fn toggle(&mut self, product: &Product) -> Mutation<bool> {
        self.inner.mutate(|list| list.toggle(product))
    }

    pub fn clear(&mut self) -> Mutation<()> {
        self.inner.mutate(WishlistState::clear)
    }
}
