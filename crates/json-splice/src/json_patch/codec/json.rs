//! JSON codec for JSON Patch operations.
//!
//! Converts operations to/from `serde_json::Value` in the RFC 6902 format.
//! Decoding runs the validator first, so every decode error is an
//! `InvalidPatch` naming the element it came from.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};

use json_splice_pointer::Pointer;

use crate::json_patch::types::{Op, PatchError};
use crate::json_patch::validate::validate_operation;

// ── Path helpers ──────────────────────────────────────────────────────────

fn encode_path(path: &Pointer) -> Value {
    Value::String(path.to_string())
}

fn decode_path(index: usize, map: &Map<String, Value>, key: &str) -> Result<Pointer, PatchError> {
    let raw = map
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::invalid(index, format!("missing \"{key}\"")))?;
    Pointer::parse(raw)
        .map_err(|e| PatchError::invalid(index, format!("\"{key}\" is not a valid pointer: {e}")))
}

fn decode_value(index: usize, map: &Map<String, Value>) -> Result<Value, PatchError> {
    map.get("value")
        .cloned()
        .ok_or_else(|| PatchError::invalid(index, "missing \"value\""))
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Serialize an `Op` to a `serde_json::Value` in the JSON Patch format.
pub fn to_json(op: &Op) -> Value {
    match op {
        Op::Add { path, value } => json!({
            "op": "add",
            "path": encode_path(path),
            "value": value
        }),
        Op::Remove { path } => json!({
            "op": "remove",
            "path": encode_path(path)
        }),
        Op::Replace { path, value } => json!({
            "op": "replace",
            "path": encode_path(path),
            "value": value
        }),
        Op::Move { from, path } => json!({
            "op": "move",
            "from": encode_path(from),
            "path": encode_path(path)
        }),
        Op::Copy { from, path } => json!({
            "op": "copy",
            "from": encode_path(from),
            "path": encode_path(path)
        }),
        Op::Test { path, value } => json!({
            "op": "test",
            "path": encode_path(path),
            "value": value
        }),
    }
}

/// Serialize a list of operations to a JSON array.
pub fn to_json_patch(ops: &[Op]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

// ── Deserialization ───────────────────────────────────────────────────────

fn decode_op(index: usize, v: &Value) -> Result<Op, PatchError> {
    validate_operation(v).map_err(|reason| PatchError::invalid(index, reason))?;
    let map = v
        .as_object()
        .ok_or_else(|| PatchError::invalid(index, "operation must be a JSON object"))?;
    let name = map.get("op").and_then(Value::as_str).unwrap_or_default();
    let path = decode_path(index, map, "path")?;

    let op = match name {
        "add" => Op::Add {
            path,
            value: decode_value(index, map)?,
        },
        "remove" => Op::Remove { path },
        "replace" => Op::Replace {
            path,
            value: decode_value(index, map)?,
        },
        "move" => Op::Move {
            from: decode_path(index, map, "from")?,
            path,
        },
        "copy" => Op::Copy {
            from: decode_path(index, map, "from")?,
            path,
        },
        "test" => Op::Test {
            path,
            value: decode_value(index, map)?,
        },
        other => return Err(PatchError::invalid(index, format!("unknown op \"{other}\""))),
    };
    Ok(op)
}

/// Deserialize a single operation.
pub fn from_json(v: &Value) -> Result<Op, PatchError> {
    decode_op(0, v)
}

/// Deserialize a JSON array of operations.
///
/// Duplicate members inside one element have already collapsed to the last
/// occurrence when the text was parsed into a `Value`.
pub fn from_json_patch(v: &Value) -> Result<Vec<Op>, PatchError> {
    let arr = v.as_array().ok_or_else(|| PatchError::InvalidPatch {
        index: None,
        reason: "patch must be a JSON array".to_string(),
    })?;
    arr.iter()
        .enumerate()
        .map(|(i, op)| decode_op(i, op))
        .collect()
}

impl Serialize for Op {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_json(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Op {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        from_json(&raw).map_err(serde::de::Error::custom)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
