use serde_json::Value;

use super::number::numbers_equivalent;

/// Numeric-aware structural equality between two JSON values.
///
/// This is the only equality the patch and diff engines use:
/// - numbers compare by mathematical value (`1` ≡ `1.0`)
/// - values of different kinds are never equivalent
/// - arrays need the same length and pairwise equivalent items
/// - objects need identical key sets and keywise equivalent values; key
///   order is irrelevant
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_splice_util::json_equal::equivalent;
///
/// assert!(equivalent(&json!({"a": [1, 2.0]}), &json!({"a": [1.0, 2]})));
/// assert!(!equivalent(&json!({"a": [1, 2]}), &json!({"a": [1, 2, 3]})));
/// assert!(!equivalent(&json!(0), &json!(false)));
/// ```
pub fn equivalent(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers_equivalent(a, b),
        (Value::String(a), Value::String(b)) => a == b,

        (Value::Array(arr_a), Value::Array(arr_b)) => {
            arr_a.len() == arr_b.len()
                && arr_a.iter().zip(arr_b).all(|(x, y)| equivalent(x, y))
        }

        (Value::Object(obj_a), Value::Object(obj_b)) => {
            if obj_a.len() != obj_b.len() {
                return false;
            }
            for (key, val_a) in obj_a {
                match obj_b.get(key) {
                    Some(val_b) => {
                        if !equivalent(val_a, val_b) {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
            true
        }

        // Different kinds are never equivalent
        _ => false,
    }
}

/// True for an array or object with at least one child.
pub fn is_nonempty_container(v: &Value) -> bool {
    match v {
        Value::Array(arr) => !arr.is_empty(),
        Value::Object(map) => !map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Scalar tests
    #[test]
    fn test_equal_numbers() {
        assert!(equivalent(&json!(1), &json!(1)));
    }

    #[test]
    fn test_integral_and_decimal_numbers_equivalent() {
        assert!(equivalent(&json!(1), &json!(1.0)));
        assert!(equivalent(&json!(-7.0), &json!(-7)));
    }

    #[test]
    fn test_not_equal_numbers() {
        assert!(!equivalent(&json!(1), &json!(2)));
        assert!(!equivalent(&json!(1), &json!(1.5)));
    }

    #[test]
    fn test_number_and_array_not_equal() {
        assert!(!equivalent(&json!(1), &json!([])));
    }

    #[test]
    fn test_zero_and_null_not_equal() {
        assert!(!equivalent(&json!(0), &json!(null)));
    }

    #[test]
    fn test_strings() {
        assert!(equivalent(&json!("a"), &json!("a")));
        assert!(!equivalent(&json!("a"), &json!("b")));
        assert!(!equivalent(&json!("1"), &json!(1)));
    }

    #[test]
    fn test_empty_string_and_null_not_equal() {
        assert!(!equivalent(&json!(""), &json!(null)));
    }

    #[test]
    fn test_booleans() {
        assert!(equivalent(&json!(true), &json!(true)));
        assert!(!equivalent(&json!(true), &json!(false)));
        assert!(!equivalent(&json!(1), &json!(true)));
    }

    // Object tests
    #[test]
    fn test_equal_objects_different_order() {
        assert!(equivalent(
            &json!({"a": 1, "b": "2"}),
            &json!({"b": "2", "a": 1.0})
        ));
    }

    #[test]
    fn test_not_equal_objects_extra_property() {
        assert!(!equivalent(
            &json!({"a": 1, "b": "2"}),
            &json!({"a": 1, "b": "2", "c": []})
        ));
    }

    #[test]
    fn test_not_equal_objects_different_properties() {
        assert!(!equivalent(
            &json!({"a": 1, "b": "2", "c": 3}),
            &json!({"a": 1, "b": "2", "d": 3})
        ));
    }

    #[test]
    fn test_empty_object_and_array_not_equal() {
        assert!(!equivalent(&json!({}), &json!([])));
    }

    // Array tests
    #[test]
    fn test_arrays() {
        assert!(equivalent(&json!([]), &json!([])));
        assert!(equivalent(&json!([1, 2, 3]), &json!([1.0, 2, 3])));
        assert!(!equivalent(&json!([1, 2, 3]), &json!([1, 3, 2])));
        assert!(!equivalent(&json!([1, 2, 3]), &json!([1, 2])));
    }

    #[test]
    fn test_relation_properties() {
        let vals = [json!(1), json!(1.0), json!([1]), json!({"x": 1.0}), json!({"x": 1})];
        for a in &vals {
            assert!(equivalent(a, a));
            for b in &vals {
                assert_eq!(equivalent(a, b), equivalent(b, a));
                for c in &vals {
                    if equivalent(a, b) && equivalent(b, c) {
                        assert!(equivalent(a, c));
                    }
                }
            }
        }
    }

    #[test]
    fn test_nonempty_container() {
        assert!(is_nonempty_container(&json!([0])));
        assert!(is_nonempty_container(&json!({"a": null})));
        assert!(!is_nonempty_container(&json!([])));
        assert!(!is_nonempty_container(&json!({})));
        assert!(!is_nonempty_container(&json!("text")));
    }
}
