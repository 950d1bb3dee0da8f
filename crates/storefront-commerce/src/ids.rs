//! Newtype IDs for type-safe identifiers.
//!
//! The catalog keys products by integer. Wrapping it keeps a product id from
//! being confused with a quantity or a rating count.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Create a new ID.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw integer.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}
