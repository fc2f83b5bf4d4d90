//! Core types for the JSON Patch module.

use serde_json::Value;
use thiserror::Error;

pub use json_splice_pointer::{Pointer, PointerError};

use super::messages::{self, Locale};

// ── Error ─────────────────────────────────────────────────────────────────

/// The kind of a [`PatchError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedPointer,
    InvalidPatch,
    NoSuchParent,
    ParentNotContainer,
    NotAnIndex,
    NoSuchIndex,
    NoSuchPath,
    ValueMismatch,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 8] = [
        ErrorKind::MalformedPointer,
        ErrorKind::InvalidPatch,
        ErrorKind::NoSuchParent,
        ErrorKind::ParentNotContainer,
        ErrorKind::NotAnIndex,
        ErrorKind::NoSuchIndex,
        ErrorKind::NoSuchPath,
        ErrorKind::ValueMismatch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedPointer => "MalformedPointer",
            ErrorKind::InvalidPatch => "InvalidPatch",
            ErrorKind::NoSuchParent => "NoSuchParent",
            ErrorKind::ParentNotContainer => "ParentNotContainer",
            ErrorKind::NotAnIndex => "NotAnIndex",
            ErrorKind::NoSuchIndex => "NoSuchIndex",
            ErrorKind::NoSuchPath => "NoSuchPath",
            ErrorKind::ValueMismatch => "ValueMismatch",
        }
    }
}

pub(crate) fn at_operation(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" at operation {i}"),
        None => String::new(),
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatchError {
    #[error("malformed pointer: {0}")]
    MalformedPointer(#[from] PointerError),
    /// A wire document that does not describe a patch. `index` is the offending
    /// element, `None` when the document itself is not an array.
    #[error("invalid patch{}: {reason}", at_operation(.index))]
    InvalidPatch { index: Option<usize>, reason: String },
    #[error("no parent container for path \"{path}\"")]
    NoSuchParent { path: Pointer },
    #[error("parent of path \"{path}\" is not an array or object")]
    ParentNotContainer { path: Pointer },
    #[error("token \"{token}\" in path \"{path}\" is not an array index")]
    NotAnIndex { path: Pointer, token: String },
    #[error("index {index} is out of bounds for path \"{path}\"")]
    NoSuchIndex { path: Pointer, index: usize },
    #[error("no value at path \"{path}\"")]
    NoSuchPath { path: Pointer },
    #[error("test failed at path \"{path}\": expected {expected}, found {actual}")]
    ValueMismatch {
        path: Pointer,
        expected: Value,
        actual: Value,
    },
}

impl PatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PatchError::MalformedPointer(_) => ErrorKind::MalformedPointer,
            PatchError::InvalidPatch { .. } => ErrorKind::InvalidPatch,
            PatchError::NoSuchParent { .. } => ErrorKind::NoSuchParent,
            PatchError::ParentNotContainer { .. } => ErrorKind::ParentNotContainer,
            PatchError::NotAnIndex { .. } => ErrorKind::NotAnIndex,
            PatchError::NoSuchIndex { .. } => ErrorKind::NoSuchIndex,
            PatchError::NoSuchPath { .. } => ErrorKind::NoSuchPath,
            PatchError::ValueMismatch { .. } => ErrorKind::ValueMismatch,
        }
    }

    /// Renders the error with the message catalog for `locale`.
    pub fn render(&self, locale: Locale) -> String {
        messages::render(self, locale)
    }

    pub(crate) fn invalid(index: usize, reason: impl Into<String>) -> Self {
        PatchError::InvalidPatch {
            index: Some(index),
            reason: reason.into(),
        }
    }
}

// ── Op enum ───────────────────────────────────────────────────────────────

/// A JSON Patch (RFC 6902) operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add { path: Pointer, value: Value },
    Remove { path: Pointer },
    Replace { path: Pointer, value: Value },
    Move { from: Pointer, path: Pointer },
    Copy { from: Pointer, path: Pointer },
    Test { path: Pointer, value: Value },
}

impl Op {
    pub fn add(path: Pointer, value: Value) -> Self {
        Op::Add { path, value }
    }

    pub fn remove(path: Pointer) -> Self {
        Op::Remove { path }
    }

    pub fn replace(path: Pointer, value: Value) -> Self {
        Op::Replace { path, value }
    }

    /// `move` is a keyword, hence the trailing underscore.
    pub fn move_(from: Pointer, path: Pointer) -> Self {
        Op::Move { from, path }
    }

    pub fn copy(from: Pointer, path: Pointer) -> Self {
        Op::Copy { from, path }
    }

    pub fn test(path: Pointer, value: Value) -> Self {
        Op::Test { path, value }
    }

    /// The wire name of the operation (`"add"`, `"remove"`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Remove { .. } => "remove",
            Op::Replace { .. } => "replace",
            Op::Move { .. } => "move",
            Op::Copy { .. } => "copy",
            Op::Test { .. } => "test",
        }
    }

    pub fn path(&self) -> &Pointer {
        match self {
            Op::Add { path, .. }
            | Op::Remove { path }
            | Op::Replace { path, .. }
            | Op::Move { path, .. }
            | Op::Copy { path, .. }
            | Op::Test { path, .. } => path,
        }
    }

    /// The source pointer of `move` and `copy`.
    pub fn from(&self) -> Option<&Pointer> {
        match self {
            Op::Move { from, .. } | Op::Copy { from, .. } => Some(from),
            _ => None,
        }
    }

    /// The operand of `add`, `replace` and `test`.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Op::Add { value, .. } | Op::Replace { value, .. } | Op::Test { value, .. } => {
                Some(value)
            }
            _ => None,
        }
    }

    /// Applies this operation to a copy of `doc`; `doc` itself is untouched.
    pub fn apply(&self, doc: &Value) -> Result<Value, PatchError> {
        let mut out = doc.clone();
        super::apply::apply_op(&mut out, self)?;
        Ok(out)
    }
}
