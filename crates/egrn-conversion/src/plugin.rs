use crate::schema::ConversionSpec;
use crate::types::{ConversionResult, ValidatedInput};

/// Signature of a plain conversion function.
pub type ConversionFn = fn(&ValidatedInput) -> ConversionResult;

/// A trait for conversion plugins.
/// Conversions are stateless and thread-safe.
pub trait ConversionPlugin: Send + Sync {
    /// The conversion type key, e.g. `"cut9_conversion"`.
    fn name(&self) -> &str;

    /// The field schema. Read once, at registration.
    fn spec(&self) -> ConversionSpec;

    /// Performs the conversion on input that already passed `spec()`.
    fn convert(&self, input: &ValidatedInput) -> ConversionResult;
}

/// Adapts a bare function and its schema into a [`ConversionPlugin`].
pub struct FnConversion {
    name: String,
    spec: ConversionSpec,
    function: ConversionFn,
}

impl FnConversion {
    pub fn new(name: impl Into<String>, spec: ConversionSpec, function: ConversionFn) -> Self {
        Self { name: name.into(), spec, function }
    }
}

impl ConversionPlugin for FnConversion {
    fn name(&self) -> &str {
        &self.name
    }

    fn spec(&self) -> ConversionSpec {
        self.spec.clone()
    }

    fn convert(&self, input: &ValidatedInput) -> ConversionResult {
        (self.function)(input)
    }
}
