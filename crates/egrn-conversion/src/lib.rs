//! The quantity conversion engine for goods received notes.
//!
//! A warehouse clerk records a receipt in physical units (bags, packets,
//! containers of a given volume). Each product is configured with a conversion
//! type; this crate maps that type to a field schema and a conversion function
//! and turns the submitted fields into a canonical `quantity_received`.
//!
//! ```
//! use egrn_conversion::ConversionInput;
//!
//! let input = ConversionInput::new().with("number_of_bags", 10).with("packets_per_bag", 5);
//! let result = egrn_conversion::convert("chicken_conversion", &input).unwrap();
//! assert_eq!(result.quantity_received, 50.0);
//! ```

use once_cell::sync::Lazy;

pub mod built_in;
pub mod error;
pub mod plugin;
pub mod registry;
pub mod schema;
pub mod types;
pub mod validator;

pub use egrn_types::FieldValue;
pub use error::{
    ConversionError, ErrorSeverity, FieldError, FieldErrorKind, Result, ValidationReport,
};
pub use plugin::{ConversionFn, ConversionPlugin, FnConversion};
pub use registry::ConversionRegistry;
pub use schema::{ConversionSpec, FieldDefinition, FieldProperties, FieldType, SelectOption};
pub use types::{ConversionInput, ConversionResult, QUANTITY_RECEIVED, ValidatedInput};

static GLOBAL_REGISTRY: Lazy<Result<ConversionRegistry>> =
    Lazy::new(ConversionRegistry::with_builtins);

/// Process-wide registry of the built-in conversions, built on first use.
pub fn global() -> Result<&'static ConversionRegistry> {
    GLOBAL_REGISTRY.as_ref().map_err(Clone::clone)
}

/// Runs a conversion against the global registry.
pub fn convert(name: &str, input: &ConversionInput) -> Result<ConversionResult> {
    global()?.convert(name, input)
}

/// Looks up a schema in the global registry.
pub fn get_spec(name: &str) -> Result<&'static ConversionSpec> {
    global()?.get_spec(name)
}
