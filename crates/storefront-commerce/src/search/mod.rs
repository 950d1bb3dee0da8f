//! Search module.
//!
//! Contains the listing filter criteria, their URL query mirror, and the
//! view-state that derives a filtered, sorted product list.

mod filter;
mod query;
mod view;

pub use filter::FilterCriteria;
pub use query::{params, SortKey};
pub use view::ViewState;
