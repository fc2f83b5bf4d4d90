//! Value equivalence.
//!
//! Numeric-aware structural equality over `serde_json::Value`.

mod equivalent;
mod number;

pub use equivalent::{equivalent, is_nonempty_container};
pub use number::{numbers_equivalent, NumericValue};
