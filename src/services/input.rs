// src/services/input.rs
//
// Lenient decoding of numeric form fields

use serde::Deserialize;

/// A numeric field as the UI may send it: `5`, `5.0` or `"5"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IntegerInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl IntegerInput {
    /// The integral value, if there is one
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            IntegerInput::Integer(n) => Some(*n),
            IntegerInput::Float(f) if f.is_finite() && f.fract() == 0.0 => {
                let n = *f as i64;
                (n as f64 == *f).then_some(n)
            }
            IntegerInput::Float(_) => None,
            IntegerInput::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<i64> for IntegerInput {
    fn from(n: i64) -> Self {
        IntegerInput::Integer(n)
    }
}

/// Integral value of an optional field; `None` when absent or not integral
pub(crate) fn integer(input: &Option<IntegerInput>) -> Option<i64> {
    input.as_ref().and_then(IntegerInput::as_integer)
}
