//! The ordered, immutable operation sequence.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::apply::apply_ops;
use super::codec::json::{from_json_patch, to_json_patch};
use super::types::{Op, PatchError};

/// An RFC 6902 patch. Cloning is cheap and clones share the operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    ops: Arc<[Op]>,
}

impl Patch {
    pub fn new(ops: Vec<Op>) -> Self {
        Self { ops: ops.into() }
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Op> {
        self.ops.iter()
    }

    /// Folds a copy of `doc` through every operation in order.
    ///
    /// The first failing operation aborts the run and its error is returned;
    /// later operations never run and `doc` is unchanged either way.
    ///
    /// # Example
    ///
    /// ```
    /// use json_splice::json_patch::Patch;
    /// use serde_json::json;
    ///
    /// let patch = Patch::from_json_str(r#"[{"op": "add", "path": "/b", "value": 2}]"#).unwrap();
    /// assert_eq!(patch.apply(&json!({"a": 1})).unwrap(), json!({"a": 1, "b": 2}));
    /// ```
    pub fn apply(&self, doc: &Value) -> Result<Value, PatchError> {
        apply_ops(doc, &self.ops)
    }

    /// Decodes and validates the RFC 6902 wire format.
    pub fn from_json_str(s: &str) -> Result<Self, PatchError> {
        let raw: Value = serde_json::from_str(s).map_err(|e| PatchError::InvalidPatch {
            index: None,
            reason: e.to_string(),
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &Value) -> Result<Self, PatchError> {
        from_json_patch(raw).map(Self::new)
    }

    pub fn to_json(&self) -> Value {
        to_json_patch(&self.ops)
    }
}

impl Default for Patch {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<Op>> for Patch {
    fn from(ops: Vec<Op>) -> Self {
        Self::new(ops)
    }
}

impl FromIterator<Op> for Patch {
    fn from_iter<I: IntoIterator<Item = Op>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Patch {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

impl Serialize for Patch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Patch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::from_json(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_patch::ErrorKind;
    use json_splice_pointer::Pointer;
    use serde_json::json;

    fn p(s: &str) -> Pointer {
        Pointer::parse(s).unwrap()
    }

    #[test]
    fn fails_fast() {
        let patch = Patch::new(vec![
            Op::remove(p("/missing")),
            Op::add(p("/never"), json!(1)),
        ]);
        let err = patch.apply(&json!({})).unwrap_err();
        assert_eq!(err, PatchError::NoSuchPath { path: p("/missing") });
    }

    #[test]
    fn failure_leaves_source_unchanged() {
        let doc = json!({"a": [1, 2]});
        let patch = Patch::new(vec![
            Op::remove(p("/a/0")),
            Op::test(p("/a/0"), json!(1)),
        ]);
        let err = patch.apply(&doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueMismatch);
        assert_eq!(doc, json!({"a": [1, 2]}));
    }

    #[test]
    fn empty_patch_is_identity() {
        let doc = json!({"x": [null]});
        assert_eq!(Patch::default().apply(&doc).unwrap(), doc);
        assert!(Patch::default().is_empty());
    }

    #[test]
    fn collects_and_iterates() {
        let patch: Patch = vec![Op::add(p("/a"), json!(1)), Op::remove(p("/a"))]
            .into_iter()
            .collect();
        assert_eq!(patch.len(), 2);
        let names: Vec<&str> = patch.iter().map(Op::name).collect();
        assert_eq!(names, ["add", "remove"]);
        let names: Vec<&str> = (&patch).into_iter().map(Op::name).collect();
        assert_eq!(names, ["add", "remove"]);
    }

    #[test]
    fn serde_round_trip() {
        let text = r#"[{"op":"copy","from":"/a","path":"/b"},{"op":"test","path":"/b","value":1}]"#;
        let patch: Patch = serde_json::from_str(text).unwrap();
        assert_eq!(patch.ops()[0], Op::copy(p("/a"), p("/b")));
        let back = serde_json::to_value(&patch).unwrap();
        assert_eq!(back, serde_json::from_str::<Value>(text).unwrap());
    }

    #[test]
    fn serde_rejects_invalid_documents() {
        assert!(serde_json::from_str::<Patch>(r#"[{"op":"add","path":"/a"}]"#).is_err());
        assert!(serde_json::from_str::<Patch>(r#"{"op":"add"}"#).is_err());
    }

    #[test]
    fn shared_clones() {
        let patch = Patch::new(vec![Op::add(p("/a"), json!(1))]);
        let other = patch.clone();
        let handle = std::thread::spawn(move || other.apply(&json!({})).unwrap());
        assert_eq!(handle.join().unwrap(), json!({"a": 1}));
        assert_eq!(patch.len(), 1);
    }
}
