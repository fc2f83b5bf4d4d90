//! json-splice-util - Value helpers shared by the json-splice crates
//!
//! Numeric-aware value equivalence, a canonical total order over JSON values
//! and a seeded document fuzzer for tests.

pub mod fuzzer;
pub mod json_cmp;
pub mod json_equal;

// Re-exports for convenience
pub use fuzzer::Fuzzer;
pub use json_cmp::{canonical_cmp, obj_key_cmp};
pub use json_equal::{equivalent, is_nonempty_container, numbers_equivalent, NumericValue};
