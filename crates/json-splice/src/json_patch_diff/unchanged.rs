//! Subtrees that are identical between source and target.

use indexmap::IndexMap;
use json_splice_pointer::Pointer;
use json_splice_util::json_equal::equivalent;
use serde_json::Value;

/// Maximal subtrees equivalent between source and target, keyed by their
/// pointer in the source, in walk order.
///
/// Objects are walked through their shared keys, arrays position by position
/// up to the shorter length. An equivalent pair is recorded once and not
/// descended into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnchangedMap {
    entries: IndexMap<Pointer, Value>,
}

impl UnchangedMap {
    pub fn collect(src: &Value, dst: &Value) -> Self {
        let mut map = Self::default();
        map.walk(Pointer::root(), src, dst);
        map
    }

    fn walk(&mut self, at: Pointer, src: &Value, dst: &Value) {
        if equivalent(src, dst) {
            self.entries.insert(at, src.clone());
            return;
        }
        match (src, dst) {
            (Value::Object(s), Value::Object(d)) => {
                for (key, src_val) in s {
                    if let Some(dst_val) = d.get(key) {
                        self.walk(at.append(key.as_str()), src_val, dst_val);
                    }
                }
            }
            (Value::Array(s), Value::Array(d)) => {
                for (idx, (src_val, dst_val)) in s.iter().zip(d).enumerate() {
                    self.walk(at.append_index(idx), src_val, dst_val);
                }
            }
            _ => {}
        }
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Pointer, Value> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
