use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use serde_json::{Map, Value};

const KEY_CHARS: &str = "abcxyz~/01";
const TEXT_CHARS: &str = "abcdefghij ";

/// A seeded generator of random JSON documents for diff and patch testing.
///
/// Uses the xoshiro256** PRNG for reproducible random sequences when seeded.
///
/// # Examples
///
/// ```
/// use json_splice_util::fuzzer::Fuzzer;
///
/// let mut a = Fuzzer::from_seed(7);
/// let mut b = Fuzzer::from_seed(7);
/// assert_eq!(a.random_value(3), b.random_value(3));
///
/// let n = a.random_int(1, 10);
/// assert!((1..=10).contains(&n));
/// ```
pub struct Fuzzer {
    /// The seed used to initialize the PRNG.
    pub seed: [u8; 32],
    rng: Xoshiro256StarStar,
}

impl Fuzzer {
    /// Create a new fuzzer with an optional seed.
    ///
    /// If no seed is provided, a random seed will be generated using `OsRng`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });

        Self {
            seed,
            rng: Xoshiro256StarStar::from_seed(seed),
        }
    }

    /// Create a fuzzer from a short numeric seed.
    pub fn from_seed(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        for chunk in bytes.chunks_mut(8) {
            chunk.copy_from_slice(&seed.to_le_bytes());
        }
        Self::new(Some(bytes))
    }

    /// Generate a random integer in the range [min, max] (inclusive).
    pub fn random_int(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }

    /// Pick a random element from a non-empty slice.
    pub fn pick<'a, T>(&mut self, elements: &'a [T]) -> &'a T {
        let idx = self.rng.gen_range(0..elements.len());
        &elements[idx]
    }

    /// Generate a random boolean with the given probability of being true.
    pub fn random_bool(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }

    /// Generate a random string of the specified length from the given characters.
    pub fn random_string(&mut self, len: usize, chars: &str) -> String {
        let chars: Vec<char> = chars.chars().collect();
        (0..len)
            .map(|_| chars[self.rng.gen_range(0..chars.len())])
            .collect()
    }

    fn random_key(&mut self) -> String {
        let len = self.rng.gen_range(0..=3);
        self.random_string(len, KEY_CHARS)
    }

    fn random_scalar(&mut self) -> Value {
        match self.rng.gen_range(0..6) {
            0 => Value::Null,
            1 => Value::Bool(self.rng.gen()),
            2 => Value::from(self.rng.gen_range(-5i64..=5)),
            // Integral floats exercise numeric equivalence.
            3 => Value::from(self.rng.gen_range(-3i64..=3) as f64),
            4 => Value::from(self.rng.gen_range(-40i64..=40) as f64 / 8.0),
            _ => {
                let len = self.rng.gen_range(0..=4);
                Value::String(self.random_string(len, TEXT_CHARS))
            }
        }
    }

    /// Generate a random JSON value nested at most `depth` containers deep.
    ///
    /// Values are drawn from a small domain so that independently generated
    /// documents share structure and equal subtrees.
    pub fn random_value(&mut self, depth: usize) -> Value {
        if depth == 0 || self.random_bool(0.4) {
            return self.random_scalar();
        }
        let len = self.rng.gen_range(0..=4);
        if self.random_bool(0.5) {
            Value::Array((0..len).map(|_| self.random_value(depth - 1)).collect())
        } else {
            let mut map = Map::new();
            for _ in 0..len {
                let key = self.random_key();
                let val = self.random_value(depth - 1);
                map.insert(key, val);
            }
            Value::Object(map)
        }
    }

    /// Produce a document related to `value` by a few random edits.
    ///
    /// Edits insert, delete, replace, duplicate and reorder children, so the
    /// result shares most of its structure with the input.
    pub fn mutate(&mut self, value: &Value) -> Value {
        let mut out = value.clone();
        let edits = self.rng.gen_range(1..=4);
        for _ in 0..edits {
            self.mutate_in_place(&mut out, 3);
        }
        out
    }

    fn mutate_in_place(&mut self, value: &mut Value, depth: usize) {
        let replace = match value {
            Value::Array(arr) if !arr.is_empty() && self.random_bool(0.5) => {
                let idx = self.rng.gen_range(0..arr.len());
                self.mutate_in_place(&mut arr[idx], depth.saturating_sub(1));
                false
            }
            Value::Object(map) if !map.is_empty() && self.random_bool(0.5) => {
                let idx = self.rng.gen_range(0..map.len());
                if let Some((_, child)) = map.iter_mut().nth(idx) {
                    self.mutate_in_place(child, depth.saturating_sub(1));
                }
                false
            }
            Value::Array(arr) => self.edit_array(arr, depth),
            Value::Object(map) => self.edit_object(map, depth),
            _ => true,
        };
        if replace {
            *value = self.random_value(depth);
        }
    }

    /// Returns true when the whole array should be replaced instead.
    fn edit_array(&mut self, arr: &mut Vec<Value>, depth: usize) -> bool {
        match self.rng.gen_range(0..5) {
            0 => {
                let at = self.rng.gen_range(0..=arr.len());
                let v = self.random_value(depth);
                arr.insert(at, v);
            }
            1 if !arr.is_empty() => {
                let at = self.rng.gen_range(0..arr.len());
                arr.remove(at);
            }
            2 if !arr.is_empty() => {
                let from = self.rng.gen_range(0..arr.len());
                let item = arr.remove(from);
                let to = self.rng.gen_range(0..=arr.len());
                arr.insert(to, item);
            }
            3 if !arr.is_empty() => {
                let from = self.rng.gen_range(0..arr.len());
                let item = arr[from].clone();
                let to = self.rng.gen_range(0..=arr.len());
                arr.insert(to, item);
            }
            _ => return true,
        }
        false
    }

    /// Returns true when the whole object should be replaced instead.
    fn edit_object(&mut self, map: &mut Map<String, Value>, depth: usize) -> bool {
        match self.rng.gen_range(0..4) {
            0 => {
                let key = self.random_key();
                let v = self.random_value(depth);
                map.insert(key, v);
            }
            1 if !map.is_empty() => {
                let idx = self.rng.gen_range(0..map.len());
                if let Some(key) = map.keys().nth(idx).cloned() {
                    map.shift_remove(&key);
                }
            }
            2 if !map.is_empty() => {
                let idx = self.rng.gen_range(0..map.len());
                if let Some(copy) = map.values().nth(idx).cloned() {
                    let key = self.random_key();
                    map.insert(key, copy);
                }
            }
            _ => return true,
        }
        false
    }
}
