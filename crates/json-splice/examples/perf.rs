//! Throughput of diff and patch application on generated documents.
//!
//! Run:  cargo run --example perf --release -p json-splice

use std::time::Instant;

use json_splice::json_merge_patch;
use json_splice::json_patch::Patch;
use json_splice::json_patch_diff::{diff, diff_with, DiffOptions};
use json_splice_util::Fuzzer;
use serde_json::{json, Value};

// ── harness ───────────────────────────────────────────────────────────────────

fn bench<F: FnMut()>(n: u32, mut f: F) -> u64 {
    let warmup = std::cmp::max(50, n / 10);
    for _ in 0..warmup {
        f();
    }
    let start = Instant::now();
    for _ in 0..n {
        f();
    }
    (n as f64 / start.elapsed().as_secs_f64()) as u64
}

fn fmt(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.chars().rev().collect()
}

fn row(label: &str, ops: u64) {
    println!("  {:<24}  {:>16} op/s", label, fmt(ops));
}

// ── workloads ─────────────────────────────────────────────────────────────────

fn todo_list(len: usize) -> Value {
    let items: Vec<Value> = (0..len)
        .map(|i| json!({"id": i, "title": format!("item {i}"), "done": i % 3 == 0}))
        .collect();
    json!({"owner": "bench", "items": items})
}

fn main() {
    println!("\n  json-splice\n");
    println!("  {:<24}  {:>16}", "operation", "ops/sec");
    println!("  {}", "-".repeat(46));

    let mut fuzzer = Fuzzer::from_seed(42);
    let pairs: Vec<(Value, Value)> = (0..64)
        .map(|_| {
            let src = fuzzer.random_value(5);
            let dst = fuzzer.mutate(&src);
            (src, dst)
        })
        .collect();
    let mut k = 0;

    row(
        "diff (random)",
        bench(20_000, || {
            let (src, dst) = &pairs[k % pairs.len()];
            k += 1;
            std::hint::black_box(diff(src, dst));
        }),
    );

    let raw = DiffOptions::default().with_factorize(false);
    row(
        "diff raw (random)",
        bench(20_000, || {
            let (src, dst) = &pairs[k % pairs.len()];
            k += 1;
            std::hint::black_box(diff_with(src, dst, &raw));
        }),
    );

    let src = todo_list(200);
    let mut dst = src.clone();
    if let Some(items) = dst["items"].as_array_mut() {
        let first = items.remove(0);
        items.push(first);
        items[50]["done"] = json!(true);
        items.insert(100, json!({"id": 999, "title": "new", "done": false}));
    }
    row(
        "diff (200 item list)",
        bench(500, || {
            std::hint::black_box(diff(&src, &dst));
        }),
    );

    let patch: Patch = diff(&src, &dst);
    row(
        "apply (200 item list)",
        bench(20_000, || {
            std::hint::black_box(patch.apply(&src).ok());
        }),
    );

    let merge = json!({"owner": null, "meta": {"rev": 2}});
    row(
        "merge patch",
        bench(20_000, || {
            std::hint::black_box(json_merge_patch::apply(&src, &merge));
        }),
    );

    println!();
}
