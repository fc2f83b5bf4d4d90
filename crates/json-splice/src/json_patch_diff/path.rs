//! Typed diff paths and position tracking.
//!
//! While diffing we know, for every step, whether it addresses an object
//! member or an array slot. Keeping that around lets the factorizer follow a
//! value's position through a run of edits, and rewrite edits for a document
//! that has one more or one fewer element than they were computed for.
//!
//! All tracking functions return `None` when the edit touches the tracked
//! value itself, one of its ancestors, or something inside it.

use json_splice_pointer::{Pointer, ReferenceToken};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    Key(String),
    Index(usize),
    /// The `-` slot past the end of an array; only ever the last step of an
    /// insertion.
    Append,
}

pub(crate) type Path = Vec<Step>;

pub(crate) fn child(path: &[Step], step: Step) -> Path {
    let mut out = Vec::with_capacity(path.len() + 1);
    out.extend_from_slice(path);
    out.push(step);
    out
}

pub(crate) fn to_pointer(path: &[Step]) -> Pointer {
    Pointer::from_tokens(path.iter().map(|step| match step {
        Step::Key(k) => ReferenceToken::new(k.as_str()),
        Step::Index(i) => ReferenceToken::from(*i),
        Step::Append => ReferenceToken::new("-"),
    }))
}

/// Types the tokens of `ptr` by walking `doc`. `None` if `ptr` does not
/// resolve.
pub(crate) fn typed(doc: &Value, ptr: &Pointer) -> Option<Path> {
    let mut current = doc;
    let mut out = Vec::with_capacity(ptr.len());
    for token in ptr {
        match current {
            Value::Object(map) => {
                current = map.get(token.as_str())?;
                out.push(Step::Key(token.as_str().to_string()));
            }
            Value::Array(arr) => {
                let idx = token.as_index()?;
                current = arr.get(idx)?;
                out.push(Step::Index(idx));
            }
            _ => return None,
        }
    }
    Some(out)
}

/// One edit of the raw diff list, in the coordinates of the document it is
/// applied to.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Diff {
    Add {
        path: Path,
        value: Value,
    },
    /// `origin` is where the removed value sits in the source document.
    Remove {
        path: Path,
        old: Value,
        origin: Path,
    },
    Replace {
        path: Path,
        value: Value,
    },
    Move {
        from: Path,
        path: Path,
    },
    /// `value` is what the copy inserts, kept so later copies can source it.
    Copy {
        from: Path,
        path: Path,
        value: Value,
    },
}

fn with_index(p: &[Step], level: usize, index: usize) -> Path {
    let mut out = p.to_vec();
    out[level] = Step::Index(index);
    out
}

// ── Forward tracking ──────────────────────────────────────────────────────

/// Position of the value at `p` after inserting at `a`.
pub(crate) fn after_add(p: &[Step], a: &[Step]) -> Option<Path> {
    let (last, parent) = a.split_last()?;
    let level = parent.len();
    if p.len() > level && p.starts_with(parent) {
        return match (last, &p[level]) {
            (Step::Key(k), Step::Key(pk)) if k == pk => None,
            (Step::Index(t), Step::Index(s)) if t <= s => Some(with_index(p, level, s + 1)),
            _ => Some(p.to_vec()),
        };
    }
    if parent.starts_with(p) {
        return None;
    }
    Some(p.to_vec())
}

/// Position of the value at `p` after removing `r`.
pub(crate) fn after_remove(p: &[Step], r: &[Step]) -> Option<Path> {
    if p.starts_with(r) || r.starts_with(p) {
        return None;
    }
    let (last, parent) = r.split_last()?;
    let level = parent.len();
    if p.len() > level && p.starts_with(parent) {
        if let (Step::Index(t), Step::Index(s)) = (last, &p[level]) {
            if t < s {
                return Some(with_index(p, level, s - 1));
            }
        }
    }
    Some(p.to_vec())
}

fn after_replace(p: &[Step], r: &[Step]) -> Option<Path> {
    if p.starts_with(r) || r.starts_with(p) {
        None
    } else {
        Some(p.to_vec())
    }
}

/// Position of the value at `p` after `diff` runs, or `None` if `diff`
/// rewrites or moves it.
pub(crate) fn forward(p: &[Step], diff: &Diff) -> Option<Path> {
    match diff {
        Diff::Add { path, .. } | Diff::Copy { path, .. } => after_add(p, path),
        Diff::Remove { path, .. } => after_remove(p, path),
        Diff::Replace { path, .. } => after_replace(p, path),
        Diff::Move { from, path } if from == path => Some(p.to_vec()),
        Diff::Move { from, path } => after_add(&after_remove(p, from)?, path),
    }
}

/// Tracks `p` through every diff in `diffs`.
pub(crate) fn forward_all(p: &[Step], diffs: &[Diff]) -> Option<Path> {
    let mut current = p.to_vec();
    for diff in diffs {
        current = forward(&current, diff)?;
    }
    Some(current)
}

// ── Coordinate rewriting ──────────────────────────────────────────────────

/// Rewrites `b`, computed for a document without the element at `p`, for the
/// same document with that element present.
fn shift_for_insertion(b: &[Step], p: &[Step]) -> Path {
    let Some((Step::Index(s), parent)) = p.split_last() else {
        return b.to_vec();
    };
    let level = parent.len();
    if b.len() > level && b.starts_with(parent) {
        if let Step::Index(t) = b[level] {
            if t >= *s {
                return with_index(b, level, t + 1);
            }
        }
    }
    b.to_vec()
}

/// Rewrites `b`, computed for a document holding an element at `p`, for the
/// same document with that element gone. `insertion` marks `b` as the target
/// of an insertion, which may keep the vacated slot.
fn shift_for_removal(b: &[Step], p: &[Step], insertion: bool) -> Option<Path> {
    let (last, parent) = p.split_last()?;
    let level = parent.len();
    if b.len() > level && b.starts_with(parent) {
        match (&b[level], last) {
            (Step::Index(t), Step::Index(s)) if t > s => {
                return Some(with_index(b, level, t - 1));
            }
            (Step::Index(t), Step::Index(s)) if t == s => {
                return if insertion && b.len() == level + 1 {
                    Some(b.to_vec())
                } else {
                    None
                };
            }
            (Step::Key(k), Step::Key(pk)) if k == pk => return None,
            _ => {}
        }
    }
    Some(b.to_vec())
}

/// Rewrites `diff` for a document that additionally holds the element at `p`.
pub(crate) fn with_element(diff: &Diff, p: &[Step]) -> Option<Diff> {
    let ins = |b: &[Step]| shift_for_insertion(b, p);
    Some(match diff {
        Diff::Add { path, value } => Diff::Add {
            path: ins(path),
            value: value.clone(),
        },
        Diff::Remove { path, old, origin } => Diff::Remove {
            path: ins(path),
            old: old.clone(),
            origin: origin.clone(),
        },
        Diff::Replace { path, value } => Diff::Replace {
            path: ins(path),
            value: value.clone(),
        },
        Diff::Copy { from, path, value } => Diff::Copy {
            from: ins(from),
            path: ins(path),
            value: value.clone(),
        },
        Diff::Move { from, path } if from == path => Diff::Move {
            from: ins(from),
            path: ins(path),
        },
        Diff::Move { from, path } => {
            let from = ins(from);
            let mid = after_remove(p, &from)?;
            Diff::Move {
                path: shift_for_insertion(path, &mid),
                from,
            }
        }
    })
}

/// Rewrites `diff` for a document missing the element at `p`. `None` when
/// `diff` addresses that element or something inside it.
pub(crate) fn without_element(diff: &Diff, p: &[Step]) -> Option<Diff> {
    Some(match diff {
        Diff::Add { path, value } => Diff::Add {
            path: shift_for_removal(path, p, true)?,
            value: value.clone(),
        },
        Diff::Remove { path, old, origin } => Diff::Remove {
            path: shift_for_removal(path, p, false)?,
            old: old.clone(),
            origin: origin.clone(),
        },
        Diff::Replace { path, value } => Diff::Replace {
            path: shift_for_removal(path, p, false)?,
            value: value.clone(),
        },
        Diff::Copy { from, path, value } => Diff::Copy {
            from: shift_for_removal(from, p, false)?,
            path: shift_for_removal(path, p, true)?,
            value: value.clone(),
        },
        Diff::Move { from, path } if from == path => Diff::Move {
            from: shift_for_removal(from, p, false)?,
            path: shift_for_removal(path, p, false)?,
        },
        Diff::Move { from, path } => {
            let mid = after_remove(p, from)?;
            Diff::Move {
                from: shift_for_removal(from, p, false)?,
                path: shift_for_removal(path, &mid, true)?,
            }
        }
    })
}
