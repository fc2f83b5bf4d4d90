//! Longest common subsequence of two value sequences under value equivalence.

use std::cmp::Ordering;

use json_splice_util::json_cmp::canonical_cmp;
use json_splice_util::json_equal::equivalent;
use serde_json::Value;

/// Index pairs `(i, j)` with `a[i] ≡ b[j]`, strictly increasing in both
/// components, forming a longest common subsequence.
///
/// The common prefix and suffix are matched directly; the middle is solved
/// with a suffix length table. When skipping either side keeps the optimum,
/// the element that sorts later under [`canonical_cmp`] is skipped, so
/// swapping the arguments yields the mirrored pairs.
pub fn lcs_pairs(a: &[Value], b: &[Value]) -> Vec<(usize, usize)> {
    let prefix = a
        .iter()
        .zip(b)
        .take_while(|(x, y)| equivalent(x, y))
        .count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| equivalent(x, y))
        .count();

    let mid_a = &a[prefix..a.len() - suffix];
    let mid_b = &b[prefix..b.len() - suffix];

    let mut pairs: Vec<(usize, usize)> = (0..prefix).map(|k| (k, k)).collect();
    pairs.extend(
        middle(mid_a, mid_b)
            .into_iter()
            .map(|(i, j)| (i + prefix, j + prefix)),
    );
    let (tail_a, tail_b) = (a.len() - suffix, b.len() - suffix);
    pairs.extend((0..suffix).map(|k| (tail_a + k, tail_b + k)));
    pairs
}

fn middle(a: &[Value], b: &[Value]) -> Vec<(usize, usize)> {
    let (n, m) = (a.len(), b.len());
    if n == 0 || m == 0 {
        return Vec::new();
    }

    // table[i * (m + 1) + j] = LCS length of a[i..] and b[j..]
    let width = m + 1;
    let mut table = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i * width + j] = if equivalent(&a[i], &b[j]) {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    let mut pairs = Vec::with_capacity(table[0] as usize);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if equivalent(&a[i], &b[j]) {
            pairs.push((i, j));
            i += 1;
            j += 1;
            continue;
        }
        let skip_a = table[(i + 1) * width + j];
        let skip_b = table[i * width + j + 1];
        let advance_a = match skip_a.cmp(&skip_b) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => canonical_cmp(&a[i], &b[j]) == Ordering::Greater,
        };
        if advance_a {
            i += 1;
        } else {
            j += 1;
        }
    }
    pairs
}

/// The longest common subsequence of `a` and `b`, with elements taken from `a`.
///
/// # Example
///
/// ```
/// use json_splice::json_patch_diff::lcs;
/// use serde_json::json;
///
/// let a = [1, 2, 3, 4, 5, 6, 7, 8, 9].map(|n| json!(n));
/// let b = [1, 2, 10, 11, 5, 12, 8, 9].map(|n| json!(n));
/// assert_eq!(lcs(&a, &b), [1, 2, 5, 8, 9].map(|n| json!(n)));
/// ```
pub fn lcs(a: &[Value], b: &[Value]) -> Vec<Value> {
    lcs_pairs(a, b)
        .into_iter()
        .map(|(i, _)| a[i].clone())
        .collect()
}
