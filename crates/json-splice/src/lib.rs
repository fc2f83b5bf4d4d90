//! json-splice: apply, generate and merge JSON patches.
//!
//! - [`json_patch`] applies RFC 6902 patches and converts them to and from
//!   their JSON wire format.
//! - [`json_patch_diff`] computes the patch between two documents, detecting
//!   moved and repeated values.
//! - [`json_merge_patch`] applies RFC 7396 merge patches.
//! - [`json_cli`] holds the logic behind the command-line tools.
//!
//! Pointers come from `json-splice-pointer` and value equivalence from
//! `json-splice-util`; both are re-exported where the API needs them.

pub mod json_patch;
pub mod json_patch_diff;
pub mod json_merge_patch;
pub mod json_cli;
