use std::cmp::Ordering;

use serde_json::Number;

/// Largest magnitude for which an integral `f64` is folded into `Int`.
const I128_BOUND: f64 = 1.7014118346046923e38;

/// A JSON number reduced to its mathematical value.
///
/// Integral values always land in `Int`, whatever their source representation,
/// so `1`, `1.0` and `1e0` all normalize to `Int(1)`.
#[derive(Debug, Clone, Copy)]
pub enum NumericValue {
    Int(i128),
    Float(f64),
}

impl NumericValue {
    pub fn of(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            return NumericValue::Int(i128::from(i));
        }
        if let Some(u) = n.as_u64() {
            return NumericValue::Int(i128::from(u));
        }
        match n.as_f64() {
            Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < I128_BOUND => {
                NumericValue::Int(f as i128)
            }
            Some(f) => NumericValue::Float(f),
            None => NumericValue::Float(f64::NAN),
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            NumericValue::Int(i) => i as f64,
            NumericValue::Float(f) => f,
        }
    }
}

impl PartialEq for NumericValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NumericValue {}

impl PartialOrd for NumericValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NumericValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (NumericValue::Int(a), NumericValue::Int(b)) => a.cmp(b),
            (NumericValue::Float(a), NumericValue::Float(b)) => a.total_cmp(b),
            // A normalized float is never integral inside the i128 range, so
            // mixed pairs can only tie after rounding; order Int first then.
            (NumericValue::Int(_), NumericValue::Float(b)) => {
                self.as_f64().total_cmp(b).then(Ordering::Less)
            }
            (NumericValue::Float(a), NumericValue::Int(_)) => {
                a.total_cmp(&other.as_f64()).then(Ordering::Greater)
            }
        }
    }
}

/// Numeric-aware number equality.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_splice_util::json_equal::numbers_equivalent;
///
/// let one = json!(1);
/// let one_f = json!(1.0);
/// assert!(numbers_equivalent(one.as_number().unwrap(), one_f.as_number().unwrap()));
/// ```
pub fn numbers_equivalent(a: &Number, b: &Number) -> bool {
    NumericValue::of(a) == NumericValue::of(b)
}
