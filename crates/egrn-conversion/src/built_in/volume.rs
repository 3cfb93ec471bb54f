//! Conversion for containerised goods sold by nominal fill volume
//!
//! A receipt of bottled product is captured as packs received, containers per
//! pack and the container size (35cl, 50cl, 1L). Besides the container count,
//! the conversion reports the total liquid volume in litres.
//!
//! Unlike the count-based conversions every field here is optional and reads
//! as zero when absent. Existing GRN capture relies on that leniency.

use crate::plugin::ConversionPlugin;
use crate::schema::{ConversionSpec, FieldDefinition, SelectOption};
use crate::types::{ConversionResult, ValidatedInput};

pub const NAME: &str = "nbc_products_volume_conversion";

/// Key of the total-volume output, in litres.
pub const EXTENDED_VOLUME_RECEIVED: &str = "extended_volume_received";

/// Option values are in centilitres.
pub const CENTILITRES_PER_LITRE: f64 = 100.0;

/// Volume-normalized conversion
///
/// # Fields
/// * `number_of_packs_received` - Packs received, optional, at least 1 when given
/// * `number_per_pack` - Containers in one pack, optional, at least 1 when given
/// * `product_volume` - Container size in centilitres, one of `35`, `50`, `100`
///
/// # Returns
/// * `quantity_received = number_of_packs_received * number_per_pack`
/// * `extended_volume_received = product_volume / 100 * number_per_pack * number_of_packs_received`
#[derive(Debug, Default)]
pub struct VolumeConversion;

impl ConversionPlugin for VolumeConversion {
    fn name(&self) -> &str {
        NAME
    }

    fn spec(&self) -> ConversionSpec {
        ConversionSpec::new(
            NAME,
            vec![
                FieldDefinition::number("number_of_packs_received")
                    .placeholder("The total number of packs received.")
                    .min(1.0),
                FieldDefinition::number("number_per_pack")
                    .placeholder("The number products in a complete pack.")
                    .min(1.0),
                FieldDefinition::select(
                    "product_volume",
                    vec![
                        SelectOption::new("35cl", "35"),
                        SelectOption::new("50cl", "50"),
                        SelectOption::new("1L", "100"),
                    ],
                )
                .placeholder("The volume of this product, as stated on the product's container."),
            ],
        )
    }

    fn convert(&self, input: &ValidatedInput) -> ConversionResult {
        let number_of_packs_received = input.number_or("number_of_packs_received", 0.0);
        let number_per_pack = input.number_or("number_per_pack", 0.0);
        let product_volume_centilitres = input.number_or("product_volume", 0.0);

        // Scale to litres last so whole-centilitre receipts stay exact, unless the
        // centilitre product overflows where the litre product would not.
        let in_centilitres =
            product_volume_centilitres * number_per_pack * number_of_packs_received;
        let extended_volume_received = if in_centilitres.is_finite() {
            in_centilitres / CENTILITRES_PER_LITRE
        } else {
            product_volume_centilitres / CENTILITRES_PER_LITRE
                * number_per_pack
                * number_of_packs_received
        };

        ConversionResult::new(number_of_packs_received * number_per_pack)
            .with_extra(EXTENDED_VOLUME_RECEIVED, extended_volume_received)
    }
}
