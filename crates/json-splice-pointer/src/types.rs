//! Type definitions for JSON Pointer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::get::{get, get_mut};
use crate::util::{escape_component, is_valid_index, split_pointer};
use crate::PointerError;

/// The array "append position" token.
pub const APPEND_TOKEN: &str = "-";

/// One unescaped step of a [`Pointer`].
///
/// Whether a token is an object key or an array index depends on the value it
/// is applied to, so the raw string is kept and interpreted on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReferenceToken(String);

impl ReferenceToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the array index this token denotes, if it has strict
    /// RFC 6901 index syntax.
    ///
    /// Indices too large for `usize` saturate to `usize::MAX`; no array is
    /// that long, so they read as out of bounds rather than as keys.
    pub fn as_index(&self) -> Option<usize> {
        if !is_valid_index(&self.0) {
            return None;
        }
        Some(self.0.parse().unwrap_or(usize::MAX))
    }

    /// Returns true for the `-` append token.
    pub fn is_append(&self) -> bool {
        self.0 == APPEND_TOKEN
    }

    /// The escaped form used inside pointer strings.
    pub fn escaped(&self) -> String {
        escape_component(&self.0)
    }
}

impl From<&str> for ReferenceToken {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for ReferenceToken {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<usize> for ReferenceToken {
    fn from(index: usize) -> Self {
        Self(index.to_string())
    }
}

impl fmt::Display for ReferenceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A parsed JSON Pointer: an immutable sequence of reference tokens.
///
/// The empty pointer addresses the whole document. Every "modifying" method
/// returns a new pointer and leaves the receiver untouched.
///
/// # Example
///
/// ```
/// use json_splice_pointer::Pointer;
/// use serde_json::json;
///
/// let ptr = Pointer::parse("/foo/1").unwrap();
/// let doc = json!({"foo": ["a", "b"]});
/// assert_eq!(ptr.get(&doc), Some(&json!("b")));
/// assert_eq!(ptr.parent().to_string(), "/foo");
/// assert_eq!(ptr.append("x").to_string(), "/foo/1/x");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pointer {
    tokens: Vec<ReferenceToken>,
}

impl Pointer {
    /// The empty pointer (whole document).
    pub fn root() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Parses an RFC 6901 pointer string.
    ///
    /// # Errors
    ///
    /// Fails when a non-empty pointer does not start with `/`, or when a `~`
    /// is not followed by `0` or `1`.
    pub fn parse(pointer: &str) -> Result<Self, PointerError> {
        let tokens = split_pointer(pointer)?
            .into_iter()
            .map(ReferenceToken)
            .collect();
        Ok(Self { tokens })
    }

    /// Builds a pointer from already unescaped tokens.
    pub fn from_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ReferenceToken>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tokens(&self) -> &[ReferenceToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Same as [`Pointer::is_empty`]; reads better at call sites about documents.
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn last(&self) -> Option<&ReferenceToken> {
        self.tokens.last()
    }

    /// All tokens but the last. The parent of the root is the root.
    pub fn parent(&self) -> Pointer {
        match self.tokens.split_last() {
            Some((_, init)) => Self {
                tokens: init.to_vec(),
            },
            None => Self::root(),
        }
    }

    pub fn append(&self, token: impl Into<ReferenceToken>) -> Pointer {
        let mut tokens = Vec::with_capacity(self.tokens.len() + 1);
        tokens.extend_from_slice(&self.tokens);
        tokens.push(token.into());
        Self { tokens }
    }

    pub fn append_index(&self, index: usize) -> Pointer {
        self.append(index)
    }

    pub fn append_pointer(&self, other: &Pointer) -> Pointer {
        let mut tokens = Vec::with_capacity(self.tokens.len() + other.tokens.len());
        tokens.extend_from_slice(&self.tokens);
        tokens.extend_from_slice(&other.tokens);
        Self { tokens }
    }

    /// True when `self` is `other` or one of its ancestors.
    pub fn is_prefix_of(&self, other: &Pointer) -> bool {
        other.tokens.len() >= self.tokens.len()
            && other.tokens[..self.tokens.len()] == self.tokens[..]
    }

    /// Resolves the pointer against `doc`. `None` is the "missing" marker:
    /// an absent key, an out-of-range index, a non-index token on an array,
    /// or a read through `-`.
    pub fn get<'a>(&self, doc: &'a Value) -> Option<&'a Value> {
        get(doc, &self.tokens)
    }

    pub fn get_mut<'a>(&self, doc: &'a mut Value) -> Option<&'a mut Value> {
        get_mut(doc, &self.tokens)
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str("/")?;
            f.write_str(&token.escaped())?;
        }
        Ok(())
    }
}

impl FromStr for Pointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pointer::parse(s)
    }
}

impl TryFrom<&str> for Pointer {
    type Error = PointerError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Pointer::parse(s)
    }
}

impl<'a> IntoIterator for &'a Pointer {
    type Item = &'a ReferenceToken;
    type IntoIter = std::slice::Iter<'a, ReferenceToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl Serialize for Pointer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pointer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Pointer::parse(&raw).map_err(serde::de::Error::custom)
    }
}
