use egrn_conversion::built_in::volume::EXTENDED_VOLUME_RECEIVED;
use egrn_conversion::{
    ConversionError, ConversionInput, ConversionResult, ErrorSeverity, FieldErrorKind, FieldType,
    FieldValue, ValidationReport,
};

fn convert(name: &str, fields: &[(&str, FieldValue)]) -> Result<ConversionResult, ConversionError> {
    let input: ConversionInput = fields.iter().cloned().collect();
    egrn_conversion::convert(name, &input)
}

fn report(error: ConversionError) -> ValidationReport {
    match error {
        ConversionError::Validation(report) => report,
        other => panic!("expected a validation failure, got {other:?}"),
    }
}

#[test]
fn chicken_conversion_multiplies_bags_by_packets() {
    let result = convert(
        "chicken_conversion",
        &[("number_of_bags", 10.into()), ("packets_per_bag", 5.into())],
    )
    .unwrap();
    assert_eq!(result.quantity_received, 50.0);
    assert!(result.extras.is_empty());
}

#[test]
fn chicken_conversion_accepts_form_strings() {
    let result = convert(
        "chicken_conversion",
        &[("number_of_bags", "3".into()), ("packets_per_bag", " 2.5 ".into())],
    )
    .unwrap();
    assert_eq!(result.quantity_received, 7.5);
}

#[test]
fn cut9_conversion_multiplies_three_levels() {
    let result = convert(
        "cut9_conversion",
        &[
            ("number_of_bags", 2.into()),
            ("packets_per_bag", 3.into()),
            ("pieces_per_packet", 4.into()),
        ],
    )
    .unwrap();
    assert_eq!(result.quantity_received, 24.0);
}

#[test]
fn volume_conversion_reports_count_and_litres() {
    let result = convert(
        "nbc_products_volume_conversion",
        &[
            ("number_of_packs_received", 10.into()),
            ("number_per_pack", 12.into()),
            ("product_volume", "35".into()),
        ],
    )
    .unwrap();
    assert_eq!(result.quantity_received, 120.0);
    assert_eq!(result.get(EXTENDED_VOLUME_RECEIVED), Some(42.0));
}

#[test]
fn volume_conversion_handles_every_container_size() {
    for (centilitres, litres) in [("35", 0.35), ("50", 0.5), ("100", 1.0)] {
        let result = convert(
            "nbc_products_volume_conversion",
            &[
                ("number_of_packs_received", 1.into()),
                ("number_per_pack", 1.into()),
                ("product_volume", centilitres.into()),
            ],
        )
        .unwrap();
        assert_eq!(result.get(EXTENDED_VOLUME_RECEIVED), Some(litres));
    }
}

#[test]
fn volume_conversion_tolerates_missing_inputs() {
    let result = convert("nbc_products_volume_conversion", &[]).unwrap();
    assert_eq!(result.quantity_received, 0.0);
    assert_eq!(result.get(EXTENDED_VOLUME_RECEIVED), Some(0.0));

    let without_volume = convert(
        "nbc_products_volume_conversion",
        &[("number_of_packs_received", 4.into()), ("number_per_pack", 6.into())],
    )
    .unwrap();
    assert_eq!(without_volume.quantity_received, 24.0);
    assert_eq!(without_volume.get(EXTENDED_VOLUME_RECEIVED), Some(0.0));
}

#[test]
fn volume_conversion_still_validates_supplied_values() {
    let error = convert(
        "nbc_products_volume_conversion",
        &[("number_per_pack", 0.into()), ("product_volume", "75".into())],
    )
    .unwrap_err();
    let report = report(error);

    assert_eq!(report.len(), 2);
    assert_eq!(report.errors()[0].field, "number_per_pack");
    assert_eq!(report.errors()[0].kind, FieldErrorKind::BelowMinimum { min: 1.0, actual: 0.0 });
    assert_eq!(report.errors()[1].field, "product_volume");
    assert!(matches!(report.errors()[1].kind, FieldErrorKind::InvalidOption { .. }));
}

#[test]
fn missing_required_field_is_named() {
    let error =
        convert("chicken_conversion", &[("number_of_bags", 10.into())]).unwrap_err();
    let report = report(error);

    assert_eq!(report.len(), 1);
    assert_eq!(report.errors()[0].field, "packets_per_bag");
    assert_eq!(report.errors()[0].kind, FieldErrorKind::MissingField);
}

#[test]
fn every_invalid_field_is_reported() {
    let error = convert(
        "cut9_conversion",
        &[
            ("number_of_bags", 0.into()),
            ("packets_per_bag", "many".into()),
        ],
    )
    .unwrap_err();
    let report = report(error);

    let kinds: Vec<(&str, &str)> =
        report.errors().iter().map(|e| (e.field.as_str(), e.kind.as_str())).collect();
    assert_eq!(
        kinds,
        vec![
            ("number_of_bags", "below_minimum"),
            ("packets_per_bag", "type_coercion"),
            ("pieces_per_packet", "missing_field"),
        ]
    );
}

#[test]
fn unknown_conversion_type_is_distinct() {
    let error = convert("kg_to_pieces", &[("number_of_bags", 1.into())]).unwrap_err();
    assert_eq!(error, ConversionError::UnknownConversion { name: "kg_to_pieces".to_string() });
    assert!(error.is_client_error());
}

#[test]
fn specs_describe_their_fields_for_clients() {
    let spec = egrn_conversion::get_spec("nbc_products_volume_conversion").unwrap();
    let volume = spec.field("product_volume").unwrap();
    assert_eq!(volume.field_type, FieldType::Select);
    assert_eq!(
        volume.allowed_values(),
        vec![FieldValue::from("35"), FieldValue::from("50"), FieldValue::from("100")]
    );

    let cut9 = egrn_conversion::get_spec("cut9_conversion").unwrap();
    let names: Vec<&str> = cut9.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["number_of_bags", "packets_per_bag", "pieces_per_packet"]);
    assert!(cut9.fields.iter().all(|f| f.is_required() && f.properties.min == Some(1.0)));

    let json = serde_json::to_value(cut9).unwrap();
    assert_eq!(json["fields"][2]["properties"]["placeholder"], "The number of pieces in a packet.");
}

#[test]
fn repeated_conversions_are_bit_identical() {
    let fields = [
        ("number_of_packs_received", FieldValue::from(7)),
        ("number_per_pack", FieldValue::from("24")),
        ("product_volume", FieldValue::from(50)),
    ];
    let first = convert("nbc_products_volume_conversion", &fields).unwrap();
    let second = convert("nbc_products_volume_conversion", &fields).unwrap();

    assert_eq!(first.quantity_received.to_bits(), second.quantity_received.to_bits());
    assert_eq!(
        first.get(EXTENDED_VOLUME_RECEIVED).map(f64::to_bits),
        second.get(EXTENDED_VOLUME_RECEIVED).map(f64::to_bits)
    );
}

#[test]
fn overflowing_quantities_are_client_errors() {
    let error = convert(
        "cut9_conversion",
        &[
            ("number_of_bags", 1e200.into()),
            ("packets_per_bag", 1e200.into()),
            ("pieces_per_packet", 1.into()),
        ],
    )
    .unwrap_err();
    assert!(error.is_client_error());
    assert_eq!(error.severity(), ErrorSeverity::Low);

    let report = report(error);
    assert_eq!(report.len(), 1);
    assert_eq!(report.errors()[0].field, "quantity_received");
    assert!(matches!(
        report.errors()[0].kind,
        FieldErrorKind::OutOfRange { value } if value == f64::INFINITY
    ));
}

#[test]
fn volume_conversion_falls_back_to_litre_order_near_the_limit() {
    let result = convert(
        "nbc_products_volume_conversion",
        &[
            ("number_of_packs_received", 1e307.into()),
            ("number_per_pack", 10.into()),
            ("product_volume", "100".into()),
        ],
    )
    .unwrap();

    let extended = result.get(EXTENDED_VOLUME_RECEIVED).unwrap();
    assert!(extended.is_finite());
    assert!((extended - 1e308).abs() <= 1e308 * 1e-12);
    assert_eq!(result.quantity_received, 1e307 * 10.0);
}

#[test]
fn volume_overflow_reports_every_output() {
    let error = convert(
        "nbc_products_volume_conversion",
        &[
            ("number_of_packs_received", 1e200.into()),
            ("number_per_pack", 1e200.into()),
            ("product_volume", "35".into()),
        ],
    )
    .unwrap_err();
    let report = report(error);

    let fields: Vec<&str> = report.errors().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["quantity_received", EXTENDED_VOLUME_RECEIVED]);
    assert!(report.errors().iter().all(|e| e.kind.as_str() == "out_of_range"));
}
