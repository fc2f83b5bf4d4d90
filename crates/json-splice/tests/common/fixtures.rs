#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

pub const PATCH_APPLY_FILE: &str = "patch_apply.json";
pub const DIFF_FILE: &str = "diff.json";

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureFile<T> {
    pub scenario: String,
    pub cases: Vec<T>,
}

/// One patch application: either `expected` or `error` (an error kind name)
/// is present.
#[derive(Debug, Clone, Deserialize)]
pub struct PatchCase {
    pub name: String,
    pub doc: Value,
    pub patch: Value,
    #[serde(default, deserialize_with = "present")]
    pub expected: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One diff: `patch` pins the exact output when present.
#[derive(Debug, Clone, Deserialize)]
pub struct DiffCase {
    pub name: String,
    pub source: Value,
    pub target: Value,
    #[serde(default)]
    pub patch: Option<Value>,
}

// `"expected": null` is a real expectation, distinct from an absent member.
fn present<'de, D: serde::Deserializer<'de>>(de: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(de).map(Some)
}

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

pub fn read_json(path: &Path) -> Value {
    let data = fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {:?}: {e}", path));
    serde_json::from_str(&data).unwrap_or_else(|e| panic!("failed to parse {:?}: {e}", path))
}

pub fn load<T: for<'de> Deserialize<'de>>(file: &str) -> FixtureFile<T> {
    let path = fixtures_dir().join(file);
    serde_json::from_value(read_json(&path)).unwrap_or_else(|e| panic!("failed to decode {:?}: {e}", path))
}

pub fn patch_cases() -> Vec<PatchCase> {
    load::<PatchCase>(PATCH_APPLY_FILE).cases
}

pub fn diff_cases() -> Vec<DiffCase> {
    load::<DiffCase>(DIFF_FILE).cases
}
