use serde::{Deserialize, Serialize};
use std::fmt;

/// A single value submitted for, or produced by, a conversion field.
///
/// Values arrive from form/API boundaries as JSON scalars, so deserialization is
/// untagged: `10` becomes `Integer`, `"35"` becomes `String`, `null` becomes
/// `Null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    /// A boolean flag.
    Boolean(bool),
    /// A whole number.
    Integer(i64),
    /// A floating-point number.
    Float(f64),
    /// Free text, frequently a number typed into a form.
    String(String),
    /// An explicit empty value.
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(fl) => write!(f, "{fl}"),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Null => write!(f, "null"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl FieldValue {
    /// Numeric reading of this value.
    ///
    /// Integers and floats convert directly, strings are trimmed and parsed.
    /// Non-finite results (`NaN`, `inf`) are rejected, as are booleans and `Null`.
    /// Integers beyond 2^53 round to the nearest representable `f64`; GRN
    /// quantities never approach that magnitude.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        let number = match self {
            Self::Integer(i) => *i as f64,
            Self::Float(f) => *f,
            Self::String(s) => s.trim().parse::<f64>().ok()?,
            Self::Boolean(_) | Self::Null => return None,
        };
        number.is_finite().then_some(number)
    }

    /// Returns the string slice if this is a `String`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// True for `Null` and for strings that are empty after trimming.
    ///
    /// Blank values are treated exactly like absent ones by validation.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Canonical text used when comparing against select options.
    #[must_use]
    pub fn to_canonical_text(&self) -> String {
        match self {
            Self::String(s) => s.trim().to_string(),
            other => other.to_string(),
        }
    }

    /// Loose equality between a submitted value and a configured option value.
    ///
    /// Values match when their canonical text is identical, or when both read as
    /// numbers and those numbers are equal (`35` matches `"35"` and `"35.0"`).
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn matches(&self, other: &Self) -> bool {
        if self.to_canonical_text() == other.to_canonical_text() {
            return true;
        }
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Type checking utility
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Null => "null",
        }
    }
}
