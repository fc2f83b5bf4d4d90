//! Turns the raw edit list into moves and copies.
//!
//! 1. Every insertion is paired with the first removal of an equivalent value
//!    and the two collapse into a `move`. The edits between them are rewritten
//!    so the list still applies in order.
//! 2. An insertion of a non-empty container equal to an earlier insertion
//!    becomes a `copy` of that earlier one.
//! 3. An insertion of a value that also exists untouched in the source becomes
//!    a `copy` of it.
//!
//! Source positions are followed through the list with the tracking functions
//! in [`super::path`]. A candidate whose value would be disturbed on the way is
//! skipped and the plain insertion is kept.

use json_splice_util::json_equal::{equivalent, is_nonempty_container};
use serde_json::Value;

use super::path::{after_add, forward, forward_all, typed, with_element, without_element, Diff, Step};
use super::unchanged::UnchangedMap;
use super::DiffOptions;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Stats {
    pub moves: usize,
    pub copies: usize,
}

pub(crate) fn factorize(
    list: Vec<Diff>,
    src: &Value,
    unchanged: Option<&UnchangedMap>,
    options: &DiffOptions,
) -> (Vec<Diff>, Stats) {
    let mut stats = Stats::default();
    let mut list = pair_moves(list, &mut stats);

    for pos in 0..list.len() {
        let Diff::Add { path, value } = &list[pos] else {
            continue;
        };
        let mut from = None;
        if options.copy_from_earlier_adds && is_nonempty_container(value) {
            from = copy_from_earlier(&list, pos, value);
        }
        if from.is_none() && options.copy_from_unchanged {
            if let Some(unchanged) = unchanged.filter(|map| !map.is_empty()) {
                from = copy_from_unchanged(&list, pos, value, src, unchanged);
            }
        }
        if let Some(from) = from {
            let copy = Diff::Copy {
                from,
                path: path.clone(),
                value: value.clone(),
            };
            list[pos] = copy;
            stats.copies += 1;
        }
    }
    (list, stats)
}

// ── Moves ─────────────────────────────────────────────────────────────────

fn pair_moves(mut list: Vec<Diff>, stats: &mut Stats) -> Vec<Diff> {
    let mut pos = 0;
    while pos < list.len() {
        if let Diff::Add { value, .. } = &list[pos] {
            let candidates: Vec<usize> = list
                .iter()
                .enumerate()
                .filter(|(_, d)| matches!(d, Diff::Remove { old, .. } if equivalent(old, value)))
                .map(|(i, _)| i)
                .collect();
            for i in candidates {
                let merged = if i < pos {
                    move_forward(&list, i, pos)
                } else {
                    move_backward(&list, pos, i)
                };
                if let Some(merged) = merged {
                    list = merged;
                    stats.moves += 1;
                    if i < pos {
                        // The removal before us is gone; the move sits at pos - 1.
                        pos -= 1;
                    }
                    break;
                }
            }
        }
        pos += 1;
    }
    list
}

/// Removal at `i` precedes insertion at `j`: keep the element in place until
/// `j` and move it from there.
fn move_forward(list: &[Diff], i: usize, j: usize) -> Option<Vec<Diff>> {
    let Diff::Remove { path: removed, .. } = &list[i] else {
        return None;
    };
    let Diff::Add { path: target, .. } = &list[j] else {
        return None;
    };

    let mut at = removed.clone();
    let mut between = Vec::with_capacity(j - i - 1);
    for diff in &list[i + 1..j] {
        let rewritten = with_element(diff, &at)?;
        at = forward(&at, &rewritten)?;
        between.push(rewritten);
    }

    let mut out = Vec::with_capacity(list.len() - 1);
    out.extend_from_slice(&list[..i]);
    out.extend(between);
    out.push(Diff::Move {
        from: at,
        path: target.clone(),
    });
    out.extend_from_slice(&list[j + 1..]);
    Some(out)
}

/// Insertion at `j` precedes removal at `i`: take the element out at `j` and
/// run the edits up to `i` without it.
fn move_backward(list: &[Diff], j: usize, i: usize) -> Option<Vec<Diff>> {
    let Diff::Remove { path: removed, origin, .. } = &list[i] else {
        return None;
    };
    let insertion = &list[j];
    let Diff::Add { path: target, .. } = insertion else {
        return None;
    };

    let from = forward_all(origin, &list[..j])?;
    let Diff::Add { path: moved_to, .. } = without_element(insertion, &from)? else {
        return None;
    };

    let mut at = after_add(&from, target)?;
    let mut between = Vec::with_capacity(i - j - 1);
    for diff in &list[j + 1..i] {
        between.push(without_element(diff, &at)?);
        at = forward(&at, diff)?;
    }
    if &at != removed {
        return None;
    }

    let mut out = Vec::with_capacity(list.len() - 1);
    out.extend_from_slice(&list[..j]);
    out.push(Diff::Move {
        from,
        path: moved_to,
    });
    out.extend(between);
    out.extend_from_slice(&list[i + 1..]);
    Some(out)
}

// ── Copies ────────────────────────────────────────────────────────────────

fn copy_from_earlier(list: &[Diff], pos: usize, value: &Value) -> Option<Vec<Step>> {
    list[..pos].iter().enumerate().find_map(|(k, diff)| {
        let (path, inserted) = match diff {
            Diff::Add { path, value } | Diff::Copy { path, value, .. } => (path, value),
            _ => return None,
        };
        if matches!(path.last(), Some(Step::Append)) || !equivalent(inserted, value) {
            return None;
        }
        forward_all(path, &list[k + 1..pos])
    })
}

fn copy_from_unchanged(
    list: &[Diff],
    pos: usize,
    value: &Value,
    src: &Value,
    unchanged: &UnchangedMap,
) -> Option<Vec<Step>> {
    unchanged
        .iter()
        .filter(|(_, v)| equivalent(v, value))
        .find_map(|(ptr, _)| forward_all(&typed(src, ptr)?, &list[..pos]))
}
