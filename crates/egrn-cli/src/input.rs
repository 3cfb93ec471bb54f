//! Assembling a `ConversionInput` from command-line arguments.

use anyhow::{Context, Result, bail};
use egrn_conversion::{ConversionInput, FieldValue};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Parses a `KEY=VALUE` argument.
///
/// The value is read as a JSON scalar when it is one (`10`, `2.5`, `"35"`,
/// `null`) and kept as plain text otherwise.
pub fn parse_field(arg: &str) -> Result<(String, FieldValue)> {
    let Some((key, raw)) = arg.split_once('=') else {
        bail!("Expected KEY=VALUE, got '{arg}'");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("Missing field name in '{arg}'");
    }

    let value = serde_json::from_str::<FieldValue>(raw)
        .unwrap_or_else(|_| FieldValue::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// Reads a JSON object of field values from `path`, or from stdin for `-`.
pub fn read_input_file(path: &Path) -> Result<ConversionInput> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).context("Failed to read input from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file '{}'", path.display()))?
    };
    parse_input_json(&content)
}

pub fn parse_input_json(content: &str) -> Result<ConversionInput> {
    serde_json::from_str(content).context("Input must be a JSON object of scalar field values")
}

/// Combines file input with `--field` arguments; arguments win on conflicts.
pub fn build_input(file: Option<&Path>, fields: &[String]) -> Result<ConversionInput> {
    let mut input = match file {
        Some(path) => read_input_file(path)?,
        None => ConversionInput::new(),
    };
    for arg in fields {
        let (key, value) = parse_field(arg)?;
        input.insert(key, value);
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_parse_as_json_scalars_or_text() {
        assert_eq!(
            parse_field("number_of_bags=10").unwrap(),
            ("number_of_bags".to_string(), FieldValue::Integer(10))
        );
        assert_eq!(parse_field("product_volume=\"35\"").unwrap().1, FieldValue::from("35"));
        assert_eq!(parse_field("note=ten bags").unwrap().1, FieldValue::from("ten bags"));
        assert_eq!(parse_field("empty=").unwrap().1, FieldValue::from(""));
        assert_eq!(parse_field("expr=a=b").unwrap().1, FieldValue::from("a=b"));
    }

    #[test]
    fn malformed_fields_are_rejected() {
        assert!(parse_field("number_of_bags").is_err());
        assert!(parse_field("=10").is_err());
    }

    #[test]
    fn arguments_override_file_values() {
        let path = std::env::temp_dir().join(format!("egrn-input-{}.json", std::process::id()));
        fs::write(&path, r#"{"number_of_bags": 2, "packets_per_bag": "3"}"#).unwrap();

        let input = build_input(Some(&path), &["number_of_bags=7".to_string()]).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(input.get("number_of_bags"), Some(&FieldValue::Integer(7)));
        assert_eq!(input.get("packets_per_bag"), Some(&FieldValue::from("3")));
    }

    #[test]
    fn non_object_json_is_rejected() {
        assert!(parse_input_json("[1, 2]").is_err());
        assert!(parse_input_json(r#"{"nested": {"a": 1}}"#).is_err());
    }
}
