//! JSON Patch operation validator.
//!
//! Validates raw JSON Patch operations (as `serde_json::Value` maps) before
//! decoding, so callers can check untrusted input early. Members other than
//! `op`, `path`, `from` and `value` are ignored.

use json_splice_pointer::Pointer;
use serde_json::{Map, Value};

use super::types::PatchError;

/// The six RFC 6902 operation names.
pub const OP_NAMES: [&str; 6] = ["add", "remove", "replace", "move", "copy", "test"];

/// Validate a whole patch document.
///
/// Errors identify the first offending element.
pub fn validate_operations(ops: &Value) -> Result<(), PatchError> {
    let arr = ops.as_array().ok_or_else(|| PatchError::InvalidPatch {
        index: None,
        reason: "patch must be a JSON array".to_string(),
    })?;
    for (i, op) in arr.iter().enumerate() {
        validate_operation(op).map_err(|reason| PatchError::invalid(i, reason))?;
    }
    Ok(())
}

fn pointer_member(map: &Map<String, Value>, key: &str) -> Result<(), String> {
    let raw = map
        .get(key)
        .ok_or_else(|| format!("missing \"{key}\""))?
        .as_str()
        .ok_or_else(|| format!("\"{key}\" must be a string"))?;
    Pointer::parse(raw)
        .map(|_| ())
        .map_err(|e| format!("\"{key}\" is not a valid pointer: {e}"))
}

/// Validate a single operation object, returning the reason it is invalid.
pub fn validate_operation(op: &Value) -> Result<(), String> {
    let map = op.as_object().ok_or("operation must be a JSON object")?;

    let name = map
        .get("op")
        .ok_or("missing \"op\"")?
        .as_str()
        .ok_or("\"op\" must be a string")?;
    if !OP_NAMES.contains(&name) {
        return Err(format!("unknown op \"{name}\""));
    }

    pointer_member(map, "path")?;
    match name {
        "move" | "copy" => pointer_member(map, "from")?,
        "add" | "replace" | "test" => {
            if !map.contains_key("value") {
                return Err("missing \"value\"".to_string());
            }
        }
        _ => {}
    }
    Ok(())
}
