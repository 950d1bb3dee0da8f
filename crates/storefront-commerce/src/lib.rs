//! Storefront domain types and logic.
//!
//! - **Catalog**: the product record returned by the catalog API
//! - **Cart**: line items with quantity limits and derived totals
//! - **Wishlist**: a deduplicated set of saved products
//! - **Search**: filter criteria, sort keys and their URL query form
//! - **Store**: cart and wishlist persisted through a key-value backend
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_cache::MemoryStore;
//! use storefront_commerce::prelude::*;
//!
//! let mut cart = CartStore::open(MemoryStore::new())?;
//! let added = cart.add_item(&product);
//! if let Some(e) = added.save.warning() {
//!     eprintln!("cart not saved: {e}");
//! }
//! println!("Total: {}", cart.state().total_amount().display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod routes;
pub mod search;
pub mod store;
pub mod wishlist;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    pub use crate::cart::{AddOutcome, CartLine, CartState, StepOutcome, MAX_QUANTITY_PER_LINE};
    pub use crate::catalog::{Product, Rating};
    pub use crate::routes::{listing_path, product_path, Locale};
    pub use crate::search::{FilterCriteria, SortKey, ViewState};
    pub use crate::store::{CartStore, Mutation, SaveStatus, WishlistStore};
    pub use crate::wishlist::WishlistState;
}
