//! Conversion for bag → packet → piece packaging.

use super::{number_of_bags_field, packets_per_bag_field};
use crate::plugin::ConversionPlugin;
use crate::schema::{ConversionSpec, FieldDefinition};
use crate::types::{ConversionResult, ValidatedInput};

pub const NAME: &str = "cut9_conversion";

/// Three-level packaging conversion
///
/// # Fields
/// * `number_of_bags` - Bags supplied, required, at least 1
/// * `packets_per_bag` - Packets in one bag, required, at least 1
/// * `pieces_per_packet` - Pieces in one packet, required, at least 1
///
/// # Returns
/// `quantity_received = number_of_bags * packets_per_bag * pieces_per_packet`
#[derive(Debug, Default)]
pub struct PackagedUnitConversion;

impl ConversionPlugin for PackagedUnitConversion {
    fn name(&self) -> &str {
        NAME
    }

    fn spec(&self) -> ConversionSpec {
        ConversionSpec::new(
            NAME,
            vec![
                number_of_bags_field(),
                packets_per_bag_field(),
                FieldDefinition::number("pieces_per_packet")
                    .placeholder("The number of pieces in a packet.")
                    .min(1.0)
                    .required(),
            ],
        )
    }

    fn convert(&self, input: &ValidatedInput) -> ConversionResult {
        let number_of_bags = input.number_or("number_of_bags", 0.0);
        let packets_per_bag = input.number_or("packets_per_bag", 0.0);
        let pieces_per_packet = input.number_or("pieces_per_packet", 0.0);
        ConversionResult::new(number_of_bags * packets_per_bag * pieces_per_packet)
    }
}
