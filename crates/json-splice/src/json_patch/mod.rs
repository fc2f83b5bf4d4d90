//! JSON Patch implementation (RFC 6902).
//!
//! # Operations
//!
//! The six RFC 6902 operations are supported:
//! `add`, `remove`, `replace`, `move`, `copy`, `test`.
//!
//! Application is pure: every entry point works on a copy of the input
//! document. A [`Patch`] stops at its first failing operation.
//!
//! `test` compares with numeric-aware value equivalence, so a stored `1.0`
//! passes a test for `1`.

pub mod types;
pub mod apply;
pub mod codec;
pub mod messages;
pub mod patch;
pub mod validate;

pub use types::{ErrorKind, Op, PatchError, Pointer};
pub use apply::{apply_op, apply_ops};
pub use codec::json::{from_json, from_json_patch, to_json, to_json_patch};
pub use messages::Locale;
pub use patch::Patch;
pub use validate::{validate_operation, validate_operations};
