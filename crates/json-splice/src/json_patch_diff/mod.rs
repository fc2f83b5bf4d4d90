//! JSON Patch diff: generate a JSON Patch from two document values.
//!
//! The diff is computed in two phases. A recursive structural walk produces a
//! raw list of additions, removals and replacements, aligning arrays on their
//! LCS. The factorizer then folds matching addition/removal pairs into `move`
//! operations and repeated values into `copy` operations.
//!
//! For any documents `a` and `b`, applying `diff(a, b)` to `a` yields a
//! document equivalent to `b`, and the same inputs always give the same patch.

mod factorize;
mod generate;
mod lcs;
mod path;
mod unchanged;

use serde_json::Value;
use tracing::debug;

use crate::json_patch::{Op, Patch};

pub use lcs::{lcs, lcs_pairs};
pub use unchanged::UnchangedMap;

use path::{to_pointer, Diff};

/// Knobs for [`diff_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Fold add/remove pairs into moves and repeated values into copies.
    /// When off, the patch holds only `add`, `remove` and `replace`.
    pub factorize: bool,
    /// Copy values that exist unchanged in the source instead of adding them.
    pub copy_from_unchanged: bool,
    /// Copy non-empty containers already inserted earlier in the patch.
    pub copy_from_earlier_adds: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            factorize: true,
            copy_from_unchanged: true,
            copy_from_earlier_adds: true,
        }
    }
}

impl DiffOptions {
    pub fn with_factorize(mut self, on: bool) -> Self {
        self.factorize = on;
        self
    }

    pub fn with_copy_from_unchanged(mut self, on: bool) -> Self {
        self.copy_from_unchanged = on;
        self
    }

    pub fn with_copy_from_earlier_adds(mut self, on: bool) -> Self {
        self.copy_from_earlier_adds = on;
        self
    }
}

// ── Public API ────────────────────────────────────────────────────────────

/// Generate a JSON Patch that transforms `src` into `dst`.
///
/// # Example
///
/// ```
/// use json_splice::json_patch::Op;
/// use json_splice::json_patch_diff::diff;
/// use serde_json::json;
///
/// let patch = diff(&json!({"a": 1}), &json!({"a": 1, "b": 2}));
/// assert_eq!(patch.len(), 1);
/// assert_eq!(patch.ops()[0], Op::add("/b".parse().unwrap(), json!(2)));
/// ```
pub fn diff(src: &Value, dst: &Value) -> Patch {
    diff_with(src, dst, &DiffOptions::default())
}

/// [`diff`] with explicit options.
pub fn diff_with(src: &Value, dst: &Value, options: &DiffOptions) -> Patch {
    let raw = generate::generate(src, dst);
    let raw_len = raw.len();
    if !options.factorize {
        debug!(raw = raw_len, "generated diff");
        return raw.into_iter().map(into_op).collect();
    }

    let unchanged = options
        .copy_from_unchanged
        .then(|| UnchangedMap::collect(src, dst));
    let (list, stats) = factorize::factorize(raw, src, unchanged.as_ref(), options);
    debug!(
        raw = raw_len,
        unchanged = unchanged.as_ref().map_or(0, UnchangedMap::len),
        ops = list.len(),
        moves = stats.moves,
        copies = stats.copies,
        "generated diff"
    );
    list.into_iter().map(into_op).collect()
}

fn into_op(diff: Diff) -> Op {
    match diff {
        Diff::Add { path, value } => Op::Add {
            path: to_pointer(&path),
            value,
        },
        Diff::Remove { path, .. } => Op::Remove {
            path: to_pointer(&path),
        },
        Diff::Replace { path, value } => Op::Replace {
            path: to_pointer(&path),
            value,
        },
        Diff::Move { from, path } => Op::Move {
            from: to_pointer(&from),
            path: to_pointer(&path),
        },
        Diff::Copy { from, path, .. } => Op::Copy {
            from: to_pointer(&from),
            path: to_pointer(&path),
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use json_splice_util::json_equal::equivalent;
    use json_splice_util::Fuzzer;
    use serde_json::json;

    fn assert_diff(src: Value, dst: Value) -> Patch {
        let patch = diff(&src, &dst);
        let result = patch.apply(&src).unwrap_or_else(|e| {
            panic!("patch {} failed on {src}: {e}", patch.to_json())
        });
        assert!(
            equivalent(&result, &dst),
            "src={src} dst={dst} patch={} got={result}",
            patch.to_json()
        );
        let raw = diff_with(&src, &dst, &DiffOptions::default().with_factorize(false));
        assert!(equivalent(&raw.apply(&src).unwrap(), &dst));
        patch
    }

    #[test]
    fn identical() {
        assert!(assert_diff(json!({"a": [1, {"b": null}]}), json!({"a": [1, {"b": null}]})).is_empty());
    }

    #[test]
    fn numeric_representation_is_not_a_change() {
        assert!(assert_diff(json!({"a": 1}), json!({"a": 1.0})).is_empty());
    }

    #[test]
    fn add_key() {
        let patch = assert_diff(json!({"a": 1}), json!({"a": 1, "b": 2}));
        assert_eq!(patch.to_json(), json!([{"op": "add", "path": "/b", "value": 2}]));
    }

    #[test]
    fn remove_key() {
        assert_diff(json!({"a": 1, "b": 2}), json!({"a": 1}));
    }

    #[test]
    fn replace_scalar() {
        let patch = assert_diff(json!({"a": 1}), json!({"a": "x"}));
        assert_eq!(patch.to_json(), json!([{"op": "replace", "path": "/a", "value": "x"}]));
    }

    #[test]
    fn replace_root() {
        assert_diff(json!([1]), json!({"a": 1}));
        assert_diff(json!(null), json!(true));
    }

    #[test]
    fn arrays() {
        assert_diff(json!([]), json!([1, 2, 3]));
        assert_diff(json!([1, 2, 3]), json!([]));
        assert_diff(json!([1, 2, 3]), json!([3, 2, 1]));
        assert_diff(json!([1, 2, 3, 4, 5]), json!([1, 3, 5, 7]));
        assert_diff(json!(["a", "b", "c"]), json!(["c", "a", "x", "b"]));
        assert_diff(json!([[1, 2], [3]]), json!([[3], [1, 2], [1, 2]]));
    }

    #[test]
    fn moved_element_is_a_single_move() {
        let patch = assert_diff(json!([1, 2, 3, 4]), json!([2, 3, 4, 1]));
        assert_eq!(patch.to_json(), json!([{"op": "move", "from": "/0", "path": "/-"}]));

        let patch = assert_diff(json!(["x", "a", "b", "c"]), json!(["a", "b", "x", "c"]));
        assert_eq!(patch.len(), 1);
        assert_eq!(patch.ops()[0].name(), "move");
    }

    #[test]
    fn moved_between_containers() {
        let patch = assert_diff(
            json!({"from": [{"id": 1}, {"id": 2}], "to": []}),
            json!({"from": [{"id": 2}], "to": [{"id": 1}]}),
        );
        assert_eq!(patch.len(), 1);
        assert_eq!(patch.ops()[0].name(), "move");
    }

    #[test]
    fn nested() {
        assert_diff(
            json!({"a": {"b": [1, {"c": 2}], "d": "x"}, "e": [null]}),
            json!({"a": {"b": [{"c": 3}, 1], "f": "x"}, "e": [null, null]}),
        );
    }

    #[test]
    fn raw_mode_has_no_moves_or_copies() {
        let options = DiffOptions::default().with_factorize(false);
        let patch = diff_with(&json!([1, 2, 3, 4]), &json!([2, 3, 4, 1]), &options);
        assert!(patch.iter().all(|op| matches!(op, Op::Add { .. } | Op::Remove { .. } | Op::Replace { .. })));
    }

    #[test]
    fn deterministic() {
        let src = json!({"a": [1, 2, {"x": [3]}], "b": "y"});
        let dst = json!({"a": [{"x": [3]}, 2, 1], "c": "y"});
        assert_eq!(diff(&src, &dst), diff(&src, &dst));
    }

    #[test]
    fn seeded_round_trip() {
        for seed in 0..300 {
            let mut fuzzer = Fuzzer::from_seed(seed);
            let src = fuzzer.random_value(4);
            let dst = if fuzzer.random_bool(0.7) {
                fuzzer.mutate(&src)
            } else {
                fuzzer.random_value(4)
            };
            assert_diff(src, dst);
        }
    }
}
