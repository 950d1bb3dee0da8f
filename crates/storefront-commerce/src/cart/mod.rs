//! Shopping cart module.
//!
//! Contains the pure cart state: line items, derived totals and the
//! transitions over them. Persistence lives in [`crate::store`].

mod cart;

pub use cart::{AddOutcome, CartLine, CartState, StepOutcome, MAX_QUANTITY_PER_LINE};
