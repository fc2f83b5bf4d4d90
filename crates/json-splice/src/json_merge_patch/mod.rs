//! JSON Merge Patch (RFC 7396).
//!
//! A merge patch is a partial document: object members overwrite the target's
//! members of the same name, `null` members delete them, and anything that is
//! not an object replaces the target outright.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

/// Apply `patch` to `target` and return the merged document.
///
/// # Example
///
/// ```
/// use json_splice::json_merge_patch::apply;
/// use serde_json::json;
///
/// let doc = json!({"title": "Hello", "author": {"name": "x", "email": "y"}});
/// let patch = json!({"title": "Bye", "author": {"email": null}});
/// assert_eq!(apply(&doc, &patch), json!({"title": "Bye", "author": {"name": "x"}}));
/// ```
pub fn apply(target: &Value, patch: &Value) -> Value {
    let mut out = target.clone();
    merge_into(&mut out, patch);
    out
}

fn merge_into(target: &mut Value, patch: &Value) {
    let Value::Object(members) = patch else {
        *target = patch.clone();
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    let Value::Object(map) = target else {
        return;
    };
    for (key, value) in members {
        if value.is_null() {
            // shift_remove keeps the remaining members in document order.
            if map.shift_remove(key).is_some() {
                trace!(key = key.as_str(), "merge patch removed member");
            }
            continue;
        }
        match map.get_mut(key) {
            Some(existing) => merge_into(existing, value),
            None => {
                let mut fresh = Value::Null;
                merge_into(&mut fresh, value);
                map.insert(key.clone(), fresh);
            }
        }
    }
}

/// A merge patch document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergePatch(pub Value);

impl MergePatch {
    pub fn new(patch: Value) -> Self {
        Self(patch)
    }

    pub fn apply(&self, target: &Value) -> Value {
        apply(target, &self.0)
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for MergePatch {
    fn from(patch: Value) -> Self {
        Self(patch)
    }
}
