use crate::built_in::{
    bagged_unit::BaggedUnitConversion, packaged_unit::PackagedUnitConversion,
    volume::VolumeConversion,
};
use crate::error::{ConversionError, Result};
use crate::plugin::{ConversionFn, ConversionPlugin, FnConversion};
use crate::schema::ConversionSpec;
use crate::types::{ConversionInput, ConversionResult};
use crate::validator::validate;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

struct RegisteredConversion {
    spec: ConversionSpec,
    plugin: Box<dyn ConversionPlugin>,
}

/// Lookup table from conversion type to schema and conversion function.
///
/// Populated once at startup; every read path takes `&self`, so a built registry
/// can be shared across threads without locking.
pub struct ConversionRegistry {
    conversions: HashMap<String, RegisteredConversion>,
}

impl Default for ConversionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConversionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionRegistry").field("conversions", &self.names()).finish()
    }
}

impl ConversionRegistry {
    pub fn new() -> Self {
        Self { conversions: HashMap::new() }
    }

    /// A registry holding the built-in bagged, packaged and volume conversions.
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(Box::new(BaggedUnitConversion))?;
        registry.register(Box::new(PackagedUnitConversion))?;
        registry.register(Box::new(VolumeConversion))?;
        Ok(registry)
    }

    pub fn register(&mut self, plugin: Box<dyn ConversionPlugin>) -> Result<()> {
        let name = plugin.name().to_string();
        if self.conversions.contains_key(&name) {
            return Err(ConversionError::DuplicateConversion { name });
        }

        let spec = plugin.spec();
        if spec.name != name {
            return Err(ConversionError::InvalidSpec {
                reason: format!("spec is named '{}'", spec.name),
                name,
            });
        }
        spec.check()?;

        debug!(conversion = %name, fields = spec.fields.len(), "Registered conversion");
        self.conversions.insert(name, RegisteredConversion { spec, plugin });
        Ok(())
    }

    /// Registers a plain function under `name` with the given schema.
    pub fn register_fn(
        &mut self,
        name: &str,
        spec: ConversionSpec,
        function: ConversionFn,
    ) -> Result<()> {
        self.register(Box::new(FnConversion::new(name, spec, function)))
    }

    pub fn get_spec(&self, name: &str) -> Result<&ConversionSpec> {
        self.entry(name).map(|entry| &entry.spec)
    }

    /// Validates `input` against the named schema and runs the conversion.
    ///
    /// Either the full result is returned or nothing is: validation failures
    /// carry every field error, outputs that overflow are reported as validation
    /// failures against the output key, and any other result breaking the output
    /// invariants is a [`ConversionError::ComputationInvariant`].
    pub fn convert(&self, name: &str, input: &ConversionInput) -> Result<ConversionResult> {
        let entry = self.entry(name)?;
        let validated = validate(&entry.spec, input).map_err(ConversionError::Validation)?;
        let result = entry.plugin.convert(&validated);

        let overflow = result.out_of_range_report();
        if !overflow.is_empty() {
            return Err(ConversionError::Validation(overflow));
        }
        result.check_invariants(name)?;
        Ok(result)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.conversions.contains_key(name)
    }

    /// Registered conversion types, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.conversions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Every registered schema, sorted by name.
    pub fn specs(&self) -> Vec<&ConversionSpec> {
        self.names().into_iter().filter_map(|name| self.get_spec(name).ok()).collect()
    }

    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }

    fn entry(&self, name: &str) -> Result<&RegisteredConversion> {
        self.conversions
            .get(name)
            .ok_or_else(|| ConversionError::UnknownConversion { name: name.to_string() })
    }
}
