//! Conversion for goods counted by bag and packet
//!
//! Poultry pieces are delivered in bags of packets with no per-unit weight
//! distinction, so the received quantity is simply the packet count.

use super::{number_of_bags_field, packets_per_bag_field};
use crate::plugin::ConversionPlugin;
use crate::schema::ConversionSpec;
use crate::types::{ConversionResult, ValidatedInput};

pub const NAME: &str = "chicken_conversion";

/// Bagged-unit conversion
///
/// # Fields
/// * `packets_per_bag` - Packets in one bag, required, at least 1
/// * `number_of_bags` - Bags supplied, required, at least 1
///
/// # Returns
/// `quantity_received = number_of_bags * packets_per_bag`
#[derive(Debug, Default)]
pub struct BaggedUnitConversion;

impl ConversionPlugin for BaggedUnitConversion {
    fn name(&self) -> &str {
        NAME
    }

    fn spec(&self) -> ConversionSpec {
        ConversionSpec::new(NAME, vec![packets_per_bag_field(), number_of_bags_field()])
    }

    fn convert(&self, input: &ValidatedInput) -> ConversionResult {
        // Both fields are required, so validation guarantees they are present.
        let number_of_bags = input.number_or("number_of_bags", 0.0);
        let packets_per_bag = input.number_or("packets_per_bag", 0.0);
        ConversionResult::new(number_of_bags * packets_per_bag)
    }
}
