//! Field schemas describing what each conversion expects.
//!
//! A [`ConversionSpec`] is static configuration: it drives validation inside the
//! engine and is serialized as-is for form-rendering clients.

use crate::error::{ConversionError, Result};
use egrn_types::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Input widget/coercion type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Number,
    Select,
}

/// One choice of a `select` field. `value` is what feeds the computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(alias = "name")]
    pub label: String,
    pub value: FieldValue,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self { label: label.into(), value: value.into() }
    }
}

/// Per-field configuration options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldProperties {
    /// Display hint only; never consulted by validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Inclusive lower bound for `number` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub properties: FieldProperties,
}

impl FieldDefinition {
    /// An optional number field with no bound.
    pub fn number(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Number,
            properties: FieldProperties::default(),
        }
    }

    /// An optional select field offering `options`.
    pub fn select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Select,
            properties: FieldProperties { options, ..FieldProperties::default() },
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.properties.placeholder = Some(placeholder.into());
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.properties.min = Some(min);
        self
    }

    pub fn required(mut self) -> Self {
        self.properties.required = true;
        self
    }

    pub fn is_required(&self) -> bool {
        self.properties.required
    }

    /// The canonical values a `select` field accepts, in declared order.
    pub fn allowed_values(&self) -> Vec<FieldValue> {
        self.properties.options.iter().map(|o| o.value.clone()).collect()
    }
}

/// Named, ordered field schema of one conversion type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionSpec {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
}

impl ConversionSpec {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        Self { name: name.into(), fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| f.is_required())
    }

    /// Checks that the schema itself is well formed before it is registered.
    pub fn check(&self) -> Result<()> {
        let invalid = |reason: String| ConversionError::InvalidSpec {
            name: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("conversion name is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(invalid("field name is empty".to_string()));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(invalid(format!("field '{}' is declared twice", field.name)));
            }

            match field.field_type {
                FieldType::Number => {
                    if !field.properties.options.is_empty() {
                        return Err(invalid(format!(
                            "number field '{}' must not declare options",
                            field.name
                        )));
                    }
                    if let Some(min) = field.properties.min {
                        if !min.is_finite() {
                            return Err(invalid(format!(
                                "field '{}' has a non-finite minimum",
                                field.name
                            )));
                        }
                    }
                }
                FieldType::Select => {
                    if field.properties.min.is_some() {
                        return Err(invalid(format!(
                            "select field '{}' must not declare a minimum",
                            field.name
                        )));
                    }
                    if field.properties.options.is_empty() {
                        return Err(invalid(format!(
                            "select field '{}' has no options",
                            field.name
                        )));
                    }
                    let mut values: Vec<&FieldValue> = Vec::new();
                    for option in &field.properties.options {
                        if option.value.is_blank() {
                            return Err(invalid(format!(
                                "select field '{}' has a blank option value",
                                field.name
                            )));
                        }
                        if values.iter().any(|v| v.matches(&option.value)) {
                            return Err(invalid(format!(
                                "select field '{}' repeats option value {}",
                                field.name, option.value
                            )));
                        }
                        values.push(&option.value);
                    }
                }
            }
        }

        Ok(())
    }
}
