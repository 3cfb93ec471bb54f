//! Schema-driven validation and coercion of raw conversion input.

use crate::error::{FieldError, ValidationReport};
use crate::schema::{ConversionSpec, FieldDefinition, FieldType};
use crate::types::{ConversionInput, ValidatedInput};
use egrn_types::FieldValue;
use std::collections::HashMap;

/// Validates `input` against `spec`, coercing every supplied field.
///
/// Fields are visited in declared order and every problem is collected; the
/// coerced input is returned only when no field failed. Keys the schema does not
/// declare are dropped.
pub fn validate(
    spec: &ConversionSpec,
    input: &ConversionInput,
) -> Result<ValidatedInput, ValidationReport> {
    let mut report = ValidationReport::new();
    let mut values = HashMap::with_capacity(spec.fields.len());

    for field in &spec.fields {
        let raw = match input.get(&field.name) {
            Some(value) if !value.is_blank() => value,
            _ => {
                if field.is_required() {
                    report.push(FieldError::missing(&field.name));
                }
                continue;
            }
        };

        match coerce_field(field, raw) {
            Ok(value) => {
                values.insert(field.name.clone(), value);
            }
            Err(error) => report.push(error),
        }
    }

    if report.is_empty() { Ok(ValidatedInput::new(values)) } else { Err(report) }
}

fn coerce_field(field: &FieldDefinition, raw: &FieldValue) -> Result<FieldValue, FieldError> {
    match field.field_type {
        FieldType::Number => {
            let actual =
                raw.as_number().ok_or_else(|| FieldError::type_coercion(&field.name, raw))?;
            if let Some(min) = field.properties.min {
                if actual < min {
                    return Err(FieldError::below_minimum(&field.name, min, actual));
                }
            }
            Ok(FieldValue::Float(actual))
        }
        FieldType::Select => field
            .properties
            .options
            .iter()
            .find(|option| raw.matches(&option.value))
            .map(|option| option.value.clone())
            .ok_or_else(|| FieldError::invalid_option(&field.name, raw, field.allowed_values())),
    }
}
