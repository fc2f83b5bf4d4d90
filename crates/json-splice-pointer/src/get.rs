use serde_json::Value;

use crate::types::ReferenceToken;
use crate::LookupError;

/// Get a value from a JSON document by path.
///
/// Returns `None` when any step is missing, when a step into an array is not
/// a valid index (the `-` token included), or when a scalar is traversed.
pub fn get<'a>(val: &'a Value, path: &[ReferenceToken]) -> Option<&'a Value> {
    find(val, path).ok()
}

/// Get a mutable reference to a value in a JSON document by path.
pub fn get_mut<'a>(val: &'a mut Value, path: &[ReferenceToken]) -> Option<&'a mut Value> {
    find_mut(val, path).ok()
}

/// Like [`get`], but reports which step failed and why.
///
/// # Example
///
/// ```
/// use json_splice_pointer::{find, LookupError, Pointer};
/// use serde_json::json;
///
/// let doc = json!({"a": [1, 2]});
/// let bad = Pointer::parse("/a/x").unwrap();
/// assert_eq!(find(&doc, bad.tokens()), Err(LookupError::NotAnIndex { depth: 1 }));
/// let gone = Pointer::parse("/b/0").unwrap();
/// assert_eq!(find(&doc, gone.tokens()), Err(LookupError::NotFound { depth: 0 }));
/// ```
pub fn find<'a>(val: &'a Value, path: &[ReferenceToken]) -> Result<&'a Value, LookupError> {
    let mut current = val;
    for (depth, step) in path.iter().enumerate() {
        current = match current {
            Value::Object(map) => map
                .get(step.as_str())
                .ok_or(LookupError::NotFound { depth })?,
            Value::Array(arr) => {
                let idx = step.as_index().ok_or(LookupError::NotAnIndex { depth })?;
                arr.get(idx).ok_or(LookupError::NotFound { depth })?
            }
            _ => return Err(LookupError::NotFound { depth }),
        };
    }
    Ok(current)
}

/// Mutable counterpart of [`find`].
pub fn find_mut<'a>(
    val: &'a mut Value,
    path: &[ReferenceToken],
) -> Result<&'a mut Value, LookupError> {
    let mut current = val;
    for (depth, step) in path.iter().enumerate() {
        current = match current {
            Value::Object(map) => map
                .get_mut(step.as_str())
                .ok_or(LookupError::NotFound { depth })?,
            Value::Array(arr) => {
                let idx = step.as_index().ok_or(LookupError::NotAnIndex { depth })?;
                arr.get_mut(idx).ok_or(LookupError::NotFound { depth })?
            }
            _ => return Err(LookupError::NotFound { depth }),
        };
    }
    Ok(current)
}
