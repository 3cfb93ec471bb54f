//! Error handling for the conversion engine
//!
//! Every failure is returned to the caller as a value. Field-level validation
//! problems are collected into a [`ValidationReport`] so a client can be shown
//! every mistake in one round trip.

use egrn_types::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result alias used throughout the engine.
pub type Result<T, E = ConversionError> = std::result::Result<T, E>;

/// Error type for registry and conversion operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// No conversion is registered under this name
    #[error("Unknown conversion type: {name}")]
    UnknownConversion { name: String },

    /// A conversion with this name was already registered
    #[error("Conversion type already registered: {name}")]
    DuplicateConversion { name: String },

    /// The field schema handed to the registry is malformed
    #[error("Invalid conversion spec '{name}': {reason}")]
    InvalidSpec { name: String, reason: String },

    /// The submitted input failed schema validation
    #[error("Validation failed: {0}")]
    Validation(ValidationReport),

    /// A conversion function produced a value outside its contract
    #[error("Computation invariant violated in '{conversion}': {field} = {value}")]
    ComputationInvariant { conversion: String, field: String, value: f64 },
}

impl ConversionError {
    /// Get the error category for logging and metrics
    pub fn category(&self) -> &'static str {
        match self {
            ConversionError::UnknownConversion { .. } => "unknown_conversion",
            ConversionError::DuplicateConversion { .. } => "duplicate_conversion",
            ConversionError::InvalidSpec { .. } => "invalid_spec",
            ConversionError::Validation(_) => "validation",
            ConversionError::ComputationInvariant { .. } => "computation_invariant",
        }
    }

    /// Get the error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ConversionError::Validation(_) => ErrorSeverity::Low,
            ConversionError::UnknownConversion { .. } => ErrorSeverity::Medium,
            ConversionError::DuplicateConversion { .. } => ErrorSeverity::High,
            ConversionError::InvalidSpec { .. } => ErrorSeverity::High,
            ConversionError::ComputationInvariant { .. } => ErrorSeverity::Critical,
        }
    }

    /// Whether the caller should surface this as a client (400-class) error.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ConversionError::Validation(_) | ConversionError::UnknownConversion { .. }
        )
    }

    /// The validation report, if this is a validation failure.
    pub fn validation_report(&self) -> Option<&ValidationReport> {
        match self {
            ConversionError::Validation(report) => Some(report),
            _ => None,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Low => write!(f, "LOW"),
            ErrorSeverity::Medium => write!(f, "MEDIUM"),
            ErrorSeverity::High => write!(f, "HIGH"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// What went wrong with a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "error_kind", rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// A required field was absent or blank.
    MissingField,
    /// A number field held something that does not read as a finite number.
    TypeCoercion { raw: FieldValue },
    /// A number field was below its configured minimum.
    BelowMinimum { min: f64, actual: f64 },
    /// A select field held a value that matches none of its options.
    InvalidOption { raw: FieldValue, allowed: Vec<FieldValue> },
    /// Valid inputs whose combined magnitude produced a non-finite output.
    OutOfRange { value: f64 },
}

impl FieldErrorKind {
    /// Stable snake_case name of the kind, matching its serialized tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldErrorKind::MissingField => "missing_field",
            FieldErrorKind::TypeCoercion { .. } => "type_coercion",
            FieldErrorKind::BelowMinimum { .. } => "below_minimum",
            FieldErrorKind::InvalidOption { .. } => "invalid_option",
            FieldErrorKind::OutOfRange { .. } => "out_of_range",
        }
    }
}

/// A validation problem attached to one field.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{field}: {detail}")]
pub struct FieldError {
    pub field: String,
    #[serde(flatten)]
    pub kind: FieldErrorKind,
    pub detail: String,
}

impl FieldError {
    pub fn missing(field: &str) -> Self {
        Self {
            field: field.to_string(),
            kind: FieldErrorKind::MissingField,
            detail: format!("Field '{field}' is required"),
        }
    }

    pub fn type_coercion(field: &str, raw: &FieldValue) -> Self {
        Self {
            field: field.to_string(),
            kind: FieldErrorKind::TypeCoercion { raw: raw.clone() },
            detail: format!("Expected a number for '{field}', got {raw}"),
        }
    }

    pub fn below_minimum(field: &str, min: f64, actual: f64) -> Self {
        Self {
            field: field.to_string(),
            kind: FieldErrorKind::BelowMinimum { min, actual },
            detail: format!("Value {actual} for '{field}' is below the minimum of {min}"),
        }
    }

    pub fn invalid_option(field: &str, raw: &FieldValue, allowed: Vec<FieldValue>) -> Self {
        let listed: Vec<String> = allowed.iter().map(|v| v.to_string()).collect();
        Self {
            field: field.to_string(),
            detail: format!(
                "Value {raw} for '{field}' is not one of [{}]",
                listed.join(", ")
            ),
            kind: FieldErrorKind::InvalidOption { raw: raw.clone(), allowed },
        }
    }

    /// Reported against a conversion output rather than an input field.
    pub fn out_of_range(field: &str, value: f64) -> Self {
        Self {
            field: field.to_string(),
            kind: FieldErrorKind::OutOfRange { value },
            detail: format!("Computed '{field}' is too large to represent ({value})"),
        }
    }
}

/// Every field error found in one validation pass, in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Errors reported against a single field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |e| e.field == field)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl IntoIterator for ValidationReport {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
