//! Built-in conversions for goods received in physical packaging units.

use crate::schema::FieldDefinition;

// Count-based conversions
pub mod bagged_unit;
pub mod packaged_unit;

// Volume conversions
pub mod volume;

pub(crate) fn number_of_bags_field() -> FieldDefinition {
    FieldDefinition::number("number_of_bags")
        .placeholder("The number bags supplied.")
        .min(1.0)
        .required()
}

pub(crate) fn packets_per_bag_field() -> FieldDefinition {
    FieldDefinition::number("packets_per_bag")
        .placeholder("The number of packets in a bag.")
        .min(1.0)
        .required()
}
