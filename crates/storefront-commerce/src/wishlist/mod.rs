//! Wishlist module.

mod wishlist;

pub use wishlist::WishlistState;
