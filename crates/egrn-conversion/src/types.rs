use crate::error::{ConversionError, FieldError, Result, ValidationReport};
use egrn_types::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Raw field values submitted for one GRN line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversionInput {
    fields: HashMap<String, FieldValue>,
}

impl ConversionInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    /// Merges `other` into `self`; values in `other` win.
    pub fn extend(&mut self, other: ConversionInput) {
        self.fields.extend(other.fields);
    }
}

impl From<HashMap<String, FieldValue>> for ConversionInput {
    fn from(fields: HashMap<String, FieldValue>) -> Self {
        Self { fields }
    }
}

impl<K, V> FromIterator<(K, V)> for ConversionInput
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// Input that passed schema validation.
///
/// Number fields hold `FieldValue::Float`, select fields hold the matched
/// option's value. Optional fields that were not supplied are simply absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedInput {
    values: HashMap<String, FieldValue>,
}

impl ValidatedInput {
    pub(crate) fn new(values: HashMap<String, FieldValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Numeric reading of a field; select values such as `"35"` read as numbers too.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.values.get(name).and_then(FieldValue::as_number)
    }

    /// Numeric reading of a field, or `default` when it was not supplied.
    pub fn number_or(&self, name: &str, default: f64) -> f64 {
        self.number(name).unwrap_or(default)
    }
}

/// Normalized outcome of a conversion.
///
/// `quantity_received` is the only key downstream components rely on; extras
/// are serialized beside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub quantity_received: f64,
    #[serde(flatten)]
    pub extras: BTreeMap<String, f64>,
}

impl ConversionResult {
    pub fn new(quantity_received: f64) -> Self {
        Self { quantity_received, extras: BTreeMap::new() }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: f64) -> Self {
        self.extras.insert(key.into(), value);
        self
    }

    /// Reads `quantity_received` or any extra by key.
    pub fn get(&self, key: &str) -> Option<f64> {
        if key == QUANTITY_RECEIVED {
            Some(self.quantity_received)
        } else {
            self.extras.get(key).copied()
        }
    }

    /// Outputs that overflowed to a non-finite value.
    ///
    /// Validated inputs are always finite, so a non-finite output means the
    /// submitted magnitudes were too large rather than a faulty rule.
    pub(crate) fn out_of_range_report(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if !self.quantity_received.is_finite() {
            report.push(FieldError::out_of_range(QUANTITY_RECEIVED, self.quantity_received));
        }
        for (key, value) in self.extras.iter().filter(|(_, v)| !v.is_finite()) {
            report.push(FieldError::out_of_range(key, *value));
        }
        report
    }

    /// `quantity_received` must be finite and non-negative, extras finite.
    pub(crate) fn check_invariants(&self, conversion: &str) -> Result<()> {
        let violation = |field: &str, value: f64| ConversionError::ComputationInvariant {
            conversion: conversion.to_string(),
            field: field.to_string(),
            value,
        };

        if !self.quantity_received.is_finite() || self.quantity_received < 0.0 {
            return Err(violation(QUANTITY_RECEIVED, self.quantity_received));
        }
        if let Some((key, value)) = self.extras.iter().find(|(_, v)| !v.is_finite()) {
            return Err(violation(key, *value));
        }
        Ok(())
    }
}

/// Key of the primary output.
pub const QUANTITY_RECEIVED: &str = "quantity_received";
