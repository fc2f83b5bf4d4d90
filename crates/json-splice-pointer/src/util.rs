//! Escaping and index helpers for RFC 6901 reference tokens.

use crate::PointerError;

/// Unescapes a single reference token.
///
/// `~1` becomes `/` and `~0` becomes `~`. Any other use of `~` (including a
/// trailing `~`) is rejected. The returned offset in the error is relative to
/// the start of `component`.
///
/// # Example
///
/// ```
/// use json_splice_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b").unwrap(), "a~b");
/// assert_eq!(unescape_component("c~1d").unwrap(), "c/d");
/// assert_eq!(unescape_component("~01").unwrap(), "~1");
/// assert!(unescape_component("bad~2").is_err());
/// ```
pub fn unescape_component(component: &str) -> Result<String, usize> {
    if !component.contains('~') {
        return Ok(component.to_string());
    }
    let mut out = String::with_capacity(component.len());
    let mut chars = component.char_indices();
    while let Some((offset, c)) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some((_, '0')) => out.push('~'),
            Some((_, '1')) => out.push('/'),
            _ => return Err(offset),
        }
    }
    Ok(out)
}

/// Escapes a single reference token (`~` → `~0`, `/` → `~1`).
///
/// # Example
///
/// ```
/// use json_splice_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// assert_eq!(escape_component("plain"), "plain");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    // `~` first, otherwise the `~` produced by `~1` would be escaped again.
    component.replace('~', "~0").replace('/', "~1")
}

/// Splits a pointer string into unescaped reference tokens.
pub(crate) fn split_pointer(pointer: &str) -> Result<Vec<String>, PointerError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    let Some(rest) = pointer.strip_prefix('/') else {
        return Err(PointerError::MissingLeadingSlash {
            pointer: pointer.to_string(),
        });
    };
    let mut tokens = Vec::new();
    let mut base = 1;
    for raw in rest.split('/') {
        let token = unescape_component(raw).map_err(|offset| PointerError::InvalidEscape {
            pointer: pointer.to_string(),
            offset: base + offset,
        })?;
        tokens.push(token);
        base += raw.len() + 1;
    }
    Ok(tokens)
}

/// Checks whether a token is a valid RFC 6901 array index: `0`, or a run of
/// ASCII digits without a leading zero.
///
/// # Example
///
/// ```
/// use json_splice_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("42"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index(""));
/// ```
pub fn is_valid_index(token: &str) -> bool {
    let bytes = token.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(u8::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_rejects_bare_tilde() {
        assert_eq!(unescape_component("a~"), Err(1));
        assert_eq!(unescape_component("~x"), Err(0));
        assert_eq!(unescape_component("ok~0~"), Err(4));
    }

    #[test]
    fn unescape_is_single_pass() {
        // `~01` is `~` followed by a literal `1`, never `/`.
        assert_eq!(unescape_component("~01").unwrap(), "~1");
        assert_eq!(unescape_component("~10").unwrap(), "/0");
    }

    #[test]
    fn escape_unescape_inverse() {
        for raw in ["", "a", "~", "/", "~1", "a/b~c", "~~//"] {
            assert_eq!(unescape_component(&escape_component(raw)).unwrap(), raw);
        }
    }

    #[test]
    fn split_reports_absolute_offset() {
        let err = split_pointer("/ok/b~2").unwrap_err();
        assert_eq!(
            err,
            PointerError::InvalidEscape {
                pointer: "/ok/b~2".to_string(),
                offset: 5,
            }
        );
    }

    #[test]
    fn split_requires_leading_slash() {
        assert!(matches!(
            split_pointer("foo"),
            Err(PointerError::MissingLeadingSlash { .. })
        ));
    }

    #[test]
    fn split_keeps_empty_tokens() {
        assert_eq!(split_pointer("/").unwrap(), vec![""]);
        assert_eq!(split_pointer("/a//b/").unwrap(), vec!["a", "", "b", ""]);
    }

    #[test]
    fn huge_index_is_syntactically_valid() {
        assert!(is_valid_index("99999999999999999999999"));
    }
}
