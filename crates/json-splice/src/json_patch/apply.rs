//! JSON Patch apply logic.
//!
//! The applicators work in place on a document the caller owns; the public
//! entry points ([`Op::apply`], [`apply_ops`], [`Patch::apply`](super::Patch::apply))
//! clone first, so the caller's document is never mutated.

use json_splice_pointer::{find, find_mut, LookupError, Pointer, ReferenceToken};
use json_splice_util::json_equal::equivalent;
use serde_json::Value;
use tracing::{debug, trace};

use super::types::{Op, PatchError};

// ── Path navigation ───────────────────────────────────────────────────────

fn lookup_error(path: &Pointer, tokens: &[ReferenceToken], err: LookupError, missing: PatchError) -> PatchError {
    match err {
        LookupError::NotFound { .. } => missing,
        LookupError::NotAnIndex { depth } => PatchError::NotAnIndex {
            path: path.clone(),
            token: tokens[depth].as_str().to_string(),
        },
    }
}

/// Immutable navigation to the value at `path` (must exist).
fn get_at<'a>(doc: &'a Value, path: &Pointer) -> Result<&'a Value, PatchError> {
    find(doc, path.tokens()).map_err(|e| {
        lookup_error(path, path.tokens(), e, PatchError::NoSuchPath { path: path.clone() })
    })
}

/// Mutable navigation to the value at `path` (must exist).
fn get_mut_at<'a>(doc: &'a mut Value, path: &Pointer) -> Result<&'a mut Value, PatchError> {
    find_mut(doc, path.tokens()).map_err(|e| {
        lookup_error(path, path.tokens(), e, PatchError::NoSuchPath { path: path.clone() })
    })
}

/// Splits `path` into its parent container and last token. `path` must not be
/// the root. A missing parent is reported as `missing`.
fn parent_mut<'a, 'p>(
    doc: &'a mut Value,
    path: &'p Pointer,
    missing: PatchError,
) -> Result<(&'a mut Value, &'p ReferenceToken), PatchError> {
    let (last, init) = match path.tokens().split_last() {
        Some(split) => split,
        None => return Err(missing),
    };
    let parent = find_mut(doc, init).map_err(|e| lookup_error(path, init, e, missing))?;
    Ok((parent, last))
}

fn array_index(path: &Pointer, token: &ReferenceToken) -> Result<usize, PatchError> {
    token.as_index().ok_or_else(|| PatchError::NotAnIndex {
        path: path.clone(),
        token: token.as_str().to_string(),
    })
}

// ── Individual operation applicators ─────────────────────────────────────

fn apply_add(doc: &mut Value, path: &Pointer, value: Value) -> Result<Option<Value>, PatchError> {
    if path.is_root() {
        let old = std::mem::replace(doc, value);
        return Ok(Some(old));
    }
    let (parent, key) = parent_mut(doc, path, PatchError::NoSuchParent { path: path.clone() })?;
    match parent {
        Value::Object(map) => Ok(map.insert(key.as_str().to_string(), value)),
        Value::Array(arr) => {
            if key.is_append() {
                arr.push(value);
                return Ok(None);
            }
            let idx = array_index(path, key)?;
            if idx > arr.len() {
                return Err(PatchError::NoSuchIndex {
                    path: path.clone(),
                    index: idx,
                });
            }
            arr.insert(idx, value);
            Ok(None)
        }
        _ => Err(PatchError::ParentNotContainer { path: path.clone() }),
    }
}

fn apply_remove(doc: &mut Value, path: &Pointer) -> Result<Value, PatchError> {
    if path.is_root() {
        return Ok(std::mem::replace(doc, Value::Null));
    }
    let missing = || PatchError::NoSuchPath { path: path.clone() };
    let (parent, key) = parent_mut(doc, path, missing())?;
    match parent {
        Value::Object(map) => map.shift_remove(key.as_str()).ok_or_else(missing),
        Value::Array(arr) => {
            let idx = array_index(path, key)?;
            if idx >= arr.len() {
                return Err(missing());
            }
            Ok(arr.remove(idx))
        }
        _ => Err(missing()),
    }
}

fn apply_replace(doc: &mut Value, path: &Pointer, value: Value) -> Result<Value, PatchError> {
    let target = get_mut_at(doc, path)?;
    Ok(std::mem::replace(target, value))
}

fn apply_copy(doc: &mut Value, path: &Pointer, from: &Pointer) -> Result<Option<Value>, PatchError> {
    let src = get_at(doc, from)?.clone();
    apply_add(doc, path, src)
}

fn apply_move(doc: &mut Value, path: &Pointer, from: &Pointer) -> Result<Option<Value>, PatchError> {
    if from == path {
        get_at(doc, from)?;
        return Ok(None);
    }
    let value = apply_remove(doc, from)?;
    apply_add(doc, path, value)
}

fn apply_test_op(doc: &Value, path: &Pointer, value: &Value) -> Result<(), PatchError> {
    let actual = get_at(doc, path)?;
    if equivalent(actual, value) {
        Ok(())
    } else {
        Err(PatchError::ValueMismatch {
            path: path.clone(),
            expected: value.clone(),
            actual: actual.clone(),
        })
    }
}

// ── Public API ────────────────────────────────────────────────────────────

/// Apply a single operation in place.
///
/// Returns the value the operation displaced, if any: the removed value for
/// `remove`, the previous value for `replace`, an overwritten object member
/// for `add`/`copy`/`move`. On error `doc` may be partially modified only by
/// `move` (removal done, insertion failed); callers needing atomicity work on
/// a copy.
pub fn apply_op(doc: &mut Value, op: &Op) -> Result<Option<Value>, PatchError> {
    match op {
        Op::Add { path, value } => apply_add(doc, path, value.clone()),
        Op::Remove { path } => apply_remove(doc, path).map(Some),
        Op::Replace { path, value } => apply_replace(doc, path, value.clone()).map(Some),
        Op::Copy { from, path } => apply_copy(doc, path, from),
        Op::Move { from, path } => apply_move(doc, path, from),
        Op::Test { path, value } => {
            apply_test_op(doc, path, value)?;
            Ok(None)
        }
    }
}

/// Apply a sequence of operations to a copy of `doc`, stopping at the first
/// failure. Operations after a failing one are never run.
pub fn apply_ops(doc: &Value, ops: &[Op]) -> Result<Value, PatchError> {
    let mut working = doc.clone();
    for (index, op) in ops.iter().enumerate() {
        trace!(index, op = op.name(), path = %op.path(), "applying operation");
        if let Err(err) = apply_op(&mut working, op) {
            debug!(index, op = op.name(), error = %err, "patch application failed");
            return Err(err);
        }
    }
    Ok(working)
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(s: &str) -> Pointer {
        Pointer::parse(s).unwrap()
    }

    fn run(doc: Value, op: Op) -> Result<Value, PatchError> {
        op.apply(&doc)
    }

    #[test]
    fn add_to_object() {
        let out = run(json!({"a": 1}), Op::add(path("/b"), json!(2))).unwrap();
        assert_eq!(out, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn add_overwrites_member() {
        let out = run(json!({"a": 1}), Op::add(path("/a"), json!([]))).unwrap();
        assert_eq!(out, json!({"a": []}));
    }

    #[test]
    fn add_to_array() {
        let out = run(json!([1, 2, 3]), Op::add(path("/1"), json!(99))).unwrap();
        assert_eq!(out, json!([1, 99, 2, 3]));
    }

    #[test]
    fn add_append_array() {
        let out = run(json!({"arr": [1, 2]}), Op::add(path("/arr/-"), json!(3))).unwrap();
        assert_eq!(out, json!({"arr": [1, 2, 3]}));
    }

    #[test]
    fn add_at_end_index() {
        let out = run(json!([1, 2]), Op::add(path("/2"), json!(3))).unwrap();
        assert_eq!(out, json!([1, 2, 3]));
    }

    #[test]
    fn add_past_end_is_no_such_index() {
        let err = run(json!({"arr": [1, 2]}), Op::add(path("/arr/5"), json!(9))).unwrap_err();
        assert_eq!(err, PatchError::NoSuchIndex { path: path("/arr/5"), index: 5 });
    }

    #[test]
    fn add_oversized_index_is_no_such_index() {
        let huge = "/arr/99999999999999999999999";
        let err = run(json!({"arr": [1, 2]}), Op::add(path(huge), json!(9))).unwrap_err();
        assert_eq!(err.kind(), crate::json_patch::ErrorKind::NoSuchIndex);
        let err = run(json!({"arr": [1, 2]}), Op::remove(path(huge))).unwrap_err();
        assert_eq!(err, PatchError::NoSuchPath { path: path(huge) });
        let err = run(json!({"arr": [1, 2]}), Op::replace(path(huge), json!(0))).unwrap_err();
        assert_eq!(err, PatchError::NoSuchPath { path: path(huge) });
    }

    #[test]
    fn add_root_replaces_document() {
        let out = run(json!({"a": 1}), Op::add(Pointer::root(), json!([true]))).unwrap();
        assert_eq!(out, json!([true]));
    }

    #[test]
    fn add_missing_parent() {
        let err = run(json!({"a": 1}), Op::add(path("/x/y"), json!(1))).unwrap_err();
        assert_eq!(err, PatchError::NoSuchParent { path: path("/x/y") });
    }

    #[test]
    fn add_into_scalar_parent() {
        let err = run(json!({"a": 1}), Op::add(path("/a/b"), json!(1))).unwrap_err();
        assert_eq!(err, PatchError::ParentNotContainer { path: path("/a/b") });
    }

    #[test]
    fn add_with_bad_index_token() {
        let err = run(json!([1]), Op::add(path("/01"), json!(1))).unwrap_err();
        assert_eq!(err, PatchError::NotAnIndex { path: path("/01"), token: "01".into() });
    }

    #[test]
    fn append_token_as_intermediate_step() {
        let err = run(json!({"a": [{}]}), Op::add(path("/a/-/x"), json!(1))).unwrap_err();
        assert_eq!(err, PatchError::NotAnIndex { path: path("/a/-/x"), token: "-".into() });
    }

    #[test]
    fn remove_from_object_keeps_order() {
        let out = run(json!({"a": 1, "b": 2, "c": 3}), Op::remove(path("/a"))).unwrap();
        let keys: Vec<&String> = out.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["b", "c"]);
    }

    #[test]
    fn remove_from_array_shifts_tail() {
        let out = run(json!([1, 2, 3]), Op::remove(path("/0"))).unwrap();
        assert_eq!(out, json!([2, 3]));
    }

    #[test]
    fn remove_root_yields_null() {
        let out = run(json!({"a": 1}), Op::remove(Pointer::root())).unwrap();
        assert_eq!(out, Value::Null);
    }

    #[test]
    fn remove_missing() {
        let err = run(json!({"a": 1}), Op::remove(path("/b"))).unwrap_err();
        assert_eq!(err, PatchError::NoSuchPath { path: path("/b") });
        let err = run(json!([1]), Op::remove(path("/1"))).unwrap_err();
        assert_eq!(err, PatchError::NoSuchPath { path: path("/1") });
    }

    #[test]
    fn remove_append_token() {
        let err = run(json!([1]), Op::remove(path("/-"))).unwrap_err();
        assert_eq!(err.kind(), crate::json_patch::ErrorKind::NotAnIndex);
    }

    #[test]
    fn replace_value() {
        let out = run(json!({"a": 1}), Op::replace(path("/a"), json!(99))).unwrap();
        assert_eq!(out, json!({"a": 99}));
    }

    #[test]
    fn replace_root() {
        let out = run(json!({"a": 1}), Op::replace(Pointer::root(), json!("x"))).unwrap();
        assert_eq!(out, json!("x"));
    }

    #[test]
    fn replace_missing() {
        let err = run(json!({"a": 1}), Op::replace(path("/b"), json!(1))).unwrap_err();
        assert_eq!(err, PatchError::NoSuchPath { path: path("/b") });
    }

    #[test]
    fn copy_op() {
        let out = run(json!({"a": {"x": 1}, "b": {}}), Op::copy(path("/a/x"), path("/b/x"))).unwrap();
        assert_eq!(out, json!({"a": {"x": 1}, "b": {"x": 1}}));
    }

    #[test]
    fn copy_missing_source() {
        let err = run(json!({}), Op::copy(path("/a"), path("/b"))).unwrap_err();
        assert_eq!(err, PatchError::NoSuchPath { path: path("/a") });
    }

    #[test]
    fn move_op() {
        let out = run(json!({"a": 1, "b": 2}), Op::move_(path("/a"), path("/c"))).unwrap();
        assert_eq!(out, json!({"b": 2, "c": 1}));
    }

    #[test]
    fn move_to_itself_is_a_copy() {
        let doc = json!({"a": [1, 2]});
        let out = run(doc.clone(), Op::move_(path("/a"), path("/a"))).unwrap();
        assert_eq!(out, doc);
    }

    #[test]
    fn move_into_former_parent_slot() {
        let out = run(json!(["victim", {}]), Op::move_(path("/0"), path("/0/x"))).unwrap();
        assert_eq!(out, json!([{"x": "victim"}]));
    }

    #[test]
    fn move_within_array() {
        let out = run(json!([1, 2, 3, 4]), Op::move_(path("/0"), path("/3"))).unwrap();
        assert_eq!(out, json!([2, 3, 4, 1]));
    }

    #[test]
    fn test_pass_with_numeric_equivalence() {
        let doc = json!({"a": 1.0});
        run(doc, Op::test(path("/a"), json!(1))).unwrap();
    }

    #[test]
    fn test_fail() {
        let err = run(json!({"a": 42}), Op::test(path("/a"), json!(99))).unwrap_err();
        assert_eq!(
            err,
            PatchError::ValueMismatch { path: path("/a"), expected: json!(99), actual: json!(42) }
        );
    }

    #[test]
    fn test_missing() {
        let err = run(json!({}), Op::test(path("/a"), json!(null))).unwrap_err();
        assert_eq!(err, PatchError::NoSuchPath { path: path("/a") });
    }

    #[test]
    fn apply_ops_sequence() {
        let doc = json!({"a": 1});
        let ops = vec![
            Op::add(path("/b"), json!(2)),
            Op::replace(path("/a"), json!(10)),
        ];
        let out = apply_ops(&doc, &ops).unwrap();
        assert_eq!(out, json!({"a": 10, "b": 2}));
        assert_eq!(doc, json!({"a": 1}));
    }

    #[test]
    fn apply_op_reports_displaced_values() {
        let mut doc = json!({"a": 1, "l": [5]});
        assert_eq!(apply_op(&mut doc, &Op::remove(path("/a"))).unwrap(), Some(json!(1)));
        assert_eq!(apply_op(&mut doc, &Op::replace(path("/l/0"), json!(6))).unwrap(), Some(json!(5)));
        assert_eq!(apply_op(&mut doc, &Op::add(path("/l/-"), json!(7))).unwrap(), None);
    }
}
