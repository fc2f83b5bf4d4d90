//! `json-cli`: the logic behind the command-line tools.
//!
//! Every function takes its inputs as JSON text and returns the output as JSON
//! text, so the binaries only deal with argument parsing and I/O:
//! - `json-patch`       apply a JSON Patch to a document
//! - `json-diff`        print the JSON Patch between two documents
//! - `json-pointer`     look up a JSON Pointer in a document
//! - `json-merge-patch` apply a JSON Merge Patch to a document

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::json_merge_patch;
use crate::json_patch::{Patch, PatchError, Pointer};
use crate::json_patch_diff::{diff_with, DiffOptions};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Patch(#[from] PatchError),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

fn render(value: &Value, pretty: bool) -> Result<String, CliError> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}

// ── json-patch ────────────────────────────────────────────────────────────

/// Apply a JSON Patch (RFC 6902) to a document.
///
/// `doc_json` is the document, `patch_json` the operation array.
pub fn apply_json_patch(doc_json: &str, patch_json: &str, pretty: bool) -> Result<String, CliError> {
    let doc: Value = serde_json::from_str(doc_json)?;
    let patch = Patch::from_json_str(patch_json)?;
    debug!(ops = patch.len(), "applying patch");
    let result = patch.apply(&doc)?;
    render(&result, pretty)
}

// ── json-diff ─────────────────────────────────────────────────────────────

/// The JSON Patch that turns `src_json` into `dst_json`.
pub fn diff_documents(
    src_json: &str,
    dst_json: &str,
    options: &DiffOptions,
    pretty: bool,
) -> Result<String, CliError> {
    let src: Value = serde_json::from_str(src_json)?;
    let dst: Value = serde_json::from_str(dst_json)?;
    let patch = diff_with(&src, &dst, options);
    render(&patch.to_json(), pretty)
}

// ── json-pointer ──────────────────────────────────────────────────────────

/// Look up a JSON Pointer (RFC 6901) in a document.
///
/// An unresolvable pointer is reported as [`PatchError::NoSuchPath`].
pub fn lookup_pointer(doc_json: &str, pointer: &str, pretty: bool) -> Result<String, CliError> {
    let doc: Value = serde_json::from_str(doc_json)?;
    let ptr = Pointer::parse(pointer).map_err(PatchError::from)?;
    match ptr.get(&doc) {
        Some(found) => render(found, pretty),
        None => Err(PatchError::NoSuchPath { path: ptr }.into()),
    }
}

// ── json-merge-patch ──────────────────────────────────────────────────────

/// Apply a JSON Merge Patch (RFC 7396) to a document.
pub fn merge_patch(doc_json: &str, patch_json: &str, pretty: bool) -> Result<String, CliError> {
    let doc: Value = serde_json::from_str(doc_json)?;
    let patch: Value = serde_json::from_str(patch_json)?;
    render(&json_merge_patch::apply(&doc, &patch), pretty)
}

// ── Tests ─────────────────────────────────────────────────────────────────
