//! Recursive structural diff producing the raw edit list.
//!
//! Every edit is expressed in the coordinates of the document at the moment it
//! runs, so the list applies in order as is. Array edits are aligned on the
//! LCS of the two arrays.

use json_splice_util::json_equal::equivalent;
use serde_json::{Map, Value};

use super::lcs::lcs_pairs;
use super::path::{child, Diff, Step};

struct Generator {
    out: Vec<Diff>,
}

/// Raw diff from `src` to `dst`.
pub(crate) fn generate(src: &Value, dst: &Value) -> Vec<Diff> {
    let mut gen = Generator { out: Vec::new() };
    gen.diff_at_path(&[], &[], src, dst);
    gen.out
}

impl Generator {
    /// `path` addresses the value at patch time, `origin` in the source.
    fn diff_at_path(&mut self, path: &[Step], origin: &[Step], src: &Value, dst: &Value) {
        if equivalent(src, dst) {
            return;
        }
        match (src, dst) {
            (Value::Object(s), Value::Object(d)) => self.diff_obj(path, origin, s, d),
            (Value::Array(s), Value::Array(d)) => self.diff_arr(path, origin, s, d),
            _ => self.out.push(Diff::Replace {
                path: path.to_vec(),
                value: dst.clone(),
            }),
        }
    }

    fn diff_obj(
        &mut self,
        path: &[Step],
        origin: &[Step],
        src: &Map<String, Value>,
        dst: &Map<String, Value>,
    ) {
        for (key, value) in dst {
            if !src.contains_key(key) {
                self.out.push(Diff::Add {
                    path: child(path, Step::Key(key.clone())),
                    value: value.clone(),
                });
            }
        }
        for (key, old) in src {
            if !dst.contains_key(key) {
                self.out.push(Diff::Remove {
                    path: child(path, Step::Key(key.clone())),
                    old: old.clone(),
                    origin: child(origin, Step::Key(key.clone())),
                });
            }
        }
        for (key, src_val) in src {
            if let Some(dst_val) = dst.get(key) {
                let step = Step::Key(key.clone());
                self.diff_at_path(
                    &child(path, step.clone()),
                    &child(origin, step),
                    src_val,
                    dst_val,
                );
            }
        }
    }

    fn diff_arr(&mut self, path: &[Step], origin: &[Step], src: &[Value], dst: &[Value]) {
        let pairs = lcs_pairs(src, dst);
        let (mut i, mut j) = (0, 0);
        // Position in the array as it is when the next edit runs.
        let mut index = 0;

        for (si, dj) in pairs {
            while i < si || j < dj {
                if i < si && j < dj {
                    self.diff_at_path(
                        &child(path, Step::Index(index)),
                        &child(origin, Step::Index(i)),
                        &src[i],
                        &dst[j],
                    );
                    i += 1;
                    j += 1;
                    index += 1;
                } else if j < dj {
                    self.out.push(Diff::Add {
                        path: child(path, Step::Index(index)),
                        value: dst[j].clone(),
                    });
                    j += 1;
                    index += 1;
                } else {
                    self.out.push(Diff::Remove {
                        path: child(path, Step::Index(index)),
                        old: src[i].clone(),
                        origin: child(origin, Step::Index(i)),
                    });
                    i += 1;
                }
            }
            // src[si] ≡ dst[dj]
            i += 1;
            j += 1;
            index += 1;
        }

        while i < src.len() && j < dst.len() {
            self.diff_at_path(
                &child(path, Step::Index(index)),
                &child(origin, Step::Index(i)),
                &src[i],
                &dst[j],
            );
            i += 1;
            j += 1;
            index += 1;
        }
        for value in &dst[j..] {
            self.out.push(Diff::Add {
                path: child(path, Step::Append),
                value: value.clone(),
            });
        }
        // Trailing removals run back to front so earlier indices stay valid.
        for k in (i..src.len()).rev() {
            self.out.push(Diff::Remove {
                path: child(path, Step::Index(index + (k - i))),
                old: src[k].clone(),
                origin: child(origin, Step::Index(k)),
            });
        }
    }
}
