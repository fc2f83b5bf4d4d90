//! JSON Pointer (RFC 6901) utilities.
//!
//! This crate implements [JSON Pointer (RFC 6901)](https://tools.ietf.org/html/rfc6901)
//! addressing for `serde_json` documents: strict parsing, formatting,
//! resolution and the small path algebra (parent, append, prefix) used by the
//! patch and diff engines.
//!
//! # Example
//!
//! ```
//! use json_splice_pointer::Pointer;
//! use serde_json::json;
//!
//! let path = Pointer::parse("/foo/bar").unwrap();
//! assert_eq!(path.tokens().len(), 2);
//! assert_eq!(path.to_string(), "/foo/bar");
//!
//! let doc = json!({"foo": {"bar": 42}});
//! assert_eq!(path.get(&doc), Some(&json!(42)));
//!
//! // `~` must be followed by `0` or `1`.
//! assert!(Pointer::parse("/a~b").is_err());
//! ```

use thiserror::Error;

pub mod get;
pub mod types;
pub mod util;

pub use get::{find, find_mut, get, get_mut};
pub use types::{Pointer, ReferenceToken, APPEND_TOKEN};
pub use util::{escape_component, is_valid_index, unescape_component};

/// Raised while parsing a pointer string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("pointer {pointer:?} must be empty or start with '/'")]
    MissingLeadingSlash { pointer: String },
    #[error("pointer {pointer:?} has an invalid escape sequence at offset {offset}")]
    InvalidEscape { pointer: String, offset: usize },
}

/// Raised by [`find`] / [`find_mut`]; `depth` is the index of the token that
/// could not be followed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    #[error("no value at token {depth}")]
    NotFound { depth: usize },
    #[error("token {depth} is not an array index")]
    NotAnIndex { depth: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_format_roundtrip() {
        for pointer in ["", "/", "/foo", "/foo/bar", "/a~0b/c~1d", "/arr/0", "/~0/~1", "//"] {
            assert_eq!(Pointer::parse(pointer).unwrap().to_string(), pointer);
        }
    }

    #[test]
    fn parse_unescapes_tokens() {
        let ptr = Pointer::parse("/a~0b/c~1d/1").unwrap();
        let raw: Vec<&str> = ptr.tokens().iter().map(ReferenceToken::as_str).collect();
        assert_eq!(raw, vec!["a~b", "c/d", "1"]);
    }

    #[test]
    fn malformed_pointers() {
        assert!(matches!(
            Pointer::parse("foo"),
            Err(PointerError::MissingLeadingSlash { .. })
        ));
        assert!(matches!(
            Pointer::parse("/a~"),
            Err(PointerError::InvalidEscape { offset: 2, .. })
        ));
        assert!(matches!(
            Pointer::parse("/~2"),
            Err(PointerError::InvalidEscape { offset: 1, .. })
        ));
    }

    #[test]
    fn rfc6901_examples() {
        let doc = json!({
            "foo": ["bar", "baz"],
            "": 0,
            "a/b": 1,
            "c%d": 2,
            "e^f": 3,
            "g|h": 4,
            "i\\j": 5,
            "k\"l": 6,
            " ": 7,
            "m~n": 8
        });
        let cases = [
            ("", doc.clone()),
            ("/foo", json!(["bar", "baz"])),
            ("/foo/0", json!("bar")),
            ("/", json!(0)),
            ("/a~1b", json!(1)),
            ("/c%d", json!(2)),
            ("/e^f", json!(3)),
            ("/g|h", json!(4)),
            ("/i\\j", json!(5)),
            ("/k\"l", json!(6)),
            ("/ ", json!(7)),
            ("/m~0n", json!(8)),
        ];
        for (pointer, expected) in cases {
            let ptr = Pointer::parse(pointer).unwrap();
            assert_eq!(ptr.get(&doc), Some(&expected), "pointer {pointer:?}");
        }
    }
}
