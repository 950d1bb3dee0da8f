//! Persisted stores.
//!
//! Each store owns one piece of client state, applies the pure transitions
//! from [`crate::cart`] and [`crate::wishlist`], and writes the result to a
//! [`KvStore`](storefront_cache::KvStore) before returning. Stores are
//! rehydrated once, when opened.

mod cart_store;
mod persistent;
mod wishlist_store;

pub use cart_store::CartStore;
pub use persistent::{Mutation, SaveStatus};
pub use wishlist_store::WishlistStore;

/// Storage key for the cart.
pub const CART_KEY: &str = "persist:cart";

/// Storage key for the wishlist.
pub const WISHLIST_KEY: &str = "persist:wishlist";
