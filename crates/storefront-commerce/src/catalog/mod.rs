//! Product catalog module.
//!
//! Contains the read-only product record served by the catalog API.

mod product;

pub use product::{Product, Rating};
pub(crate) use product::same_category;

#[cfg(test)]
pub(crate) use product::fixtures;
