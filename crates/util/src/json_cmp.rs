use std::cmp::Ordering;

use serde_json::{Map, Value};

use crate::json_equal::NumericValue;

/// Compare two strings for object key ordering.
///
/// The comparison is first by length, then by lexicographic order.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use json_splice_util::json_cmp::obj_key_cmp;
///
/// assert_eq!(obj_key_cmp("a", "b"), Ordering::Less);
/// assert_eq!(obj_key_cmp("aa", "b"), Ordering::Greater); // "aa" is longer
/// assert_eq!(obj_key_cmp("a", "a"), Ordering::Equal);
/// ```
pub fn obj_key_cmp(a: &str, b: &str) -> Ordering {
    let len1 = a.len();
    let len2 = b.len();

    if len1 == len2 {
        a.cmp(b)
    } else {
        len1.cmp(&len2)
    }
}

fn kind_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn sorted_entries(map: &Map<String, Value>) -> Vec<(&String, &Value)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|(a, _), (b, _)| obj_key_cmp(a, b));
    entries
}

/// A total order over JSON values that agrees with
/// [`equivalent`](crate::json_equal::equivalent): two values compare `Equal`
/// exactly when they are equivalent.
///
/// Kinds order as null < bool < number < string < array < object. Numbers
/// compare by value, arrays lexicographically, objects by their entries
/// sorted with [`obj_key_cmp`].
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use serde_json::json;
/// use json_splice_util::json_cmp::canonical_cmp;
///
/// assert_eq!(canonical_cmp(&json!(1), &json!(1.0)), Ordering::Equal);
/// assert_eq!(canonical_cmp(&json!(null), &json!(false)), Ordering::Less);
/// assert_eq!(canonical_cmp(&json!([1, 2]), &json!([1, 3])), Ordering::Less);
/// assert_eq!(canonical_cmp(&json!({"b": 1, "a": 2}), &json!({"a": 2, "b": 1})), Ordering::Equal);
/// ```
pub fn canonical_cmp(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => NumericValue::of(x).cmp(&NumericValue::of(y)),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (p, q) in x.iter().zip(y) {
                let ord = canonical_cmp(p, q);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Object(x), Value::Object(y)) => {
            let xs = sorted_entries(x);
            let ys = sorted_entries(y);
            for ((ka, va), (kb, vb)) in xs.iter().zip(&ys) {
                let ord = obj_key_cmp(ka, kb).then_with(|| canonical_cmp(va, vb));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            xs.len().cmp(&ys.len())
        }
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}
