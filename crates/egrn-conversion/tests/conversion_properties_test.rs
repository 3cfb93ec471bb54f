//! Property tests for the built-in conversions and concurrent use of the
//! global registry.

use egrn_conversion::built_in::volume::EXTENDED_VOLUME_RECEIVED;
use egrn_conversion::{ConversionError, ConversionInput, ConversionRegistry};
use proptest::prelude::*;
use std::sync::{Arc, Barrier};
use std::thread;

proptest! {
    #[test]
    fn bagged_quantity_is_non_negative_product(bags in 1u32..10_000, packets in 1u32..10_000) {
        let input = ConversionInput::new()
            .with("number_of_bags", i64::from(bags))
            .with("packets_per_bag", i64::from(packets));
        let result = egrn_conversion::convert("chicken_conversion", &input).unwrap();

        prop_assert!(result.quantity_received >= 0.0);
        prop_assert_eq!(result.quantity_received, f64::from(bags) * f64::from(packets));
    }

    #[test]
    fn packaged_quantity_matches_hierarchy(
        bags in 1.0f64..500.0,
        packets in 1.0f64..500.0,
        pieces in 1.0f64..500.0,
    ) {
        let input = ConversionInput::new()
            .with("number_of_bags", bags)
            .with("packets_per_bag", packets)
            .with("pieces_per_packet", pieces);
        let result = egrn_conversion::convert("cut9_conversion", &input).unwrap();

        prop_assert!(result.quantity_received >= 0.0);
        prop_assert_eq!(result.quantity_received, bags * packets * pieces);
    }

    #[test]
    fn volume_outputs_stay_consistent(
        packs in proptest::option::of(1u32..1_000),
        per_pack in proptest::option::of(1u32..100),
        volume in proptest::option::of(prop_oneof![Just("35"), Just("50"), Just("100")]),
    ) {
        let mut input = ConversionInput::new();
        if let Some(packs) = packs {
            input.insert("number_of_packs_received", i64::from(packs));
        }
        if let Some(per_pack) = per_pack {
            input.insert("number_per_pack", i64::from(per_pack));
        }
        if let Some(volume) = volume {
            input.insert("product_volume", volume);
        }

        let result = egrn_conversion::convert("nbc_products_volume_conversion", &input).unwrap();
        let expected_count = f64::from(packs.unwrap_or(0)) * f64::from(per_pack.unwrap_or(0));
        let litres = volume.map_or(0.0, |v| v.parse::<f64>().unwrap() / 100.0);
        let extended = result.get(EXTENDED_VOLUME_RECEIVED).unwrap();

        prop_assert!(result.quantity_received >= 0.0);
        prop_assert_eq!(result.quantity_received, expected_count);
        prop_assert!((extended - expected_count * litres).abs() <= 1e-9 * expected_count.max(1.0));
    }

    #[test]
    fn sub_minimum_bags_always_fail(bags in -1_000.0f64..1.0) {
        let input = ConversionInput::new()
            .with("number_of_bags", bags)
            .with("packets_per_bag", 1);
        let error = egrn_conversion::convert("chicken_conversion", &input).unwrap_err();

        match error {
            ConversionError::Validation(report) => {
                prop_assert_eq!(report.len(), 1);
                prop_assert_eq!(report.errors()[0].field.as_str(), "number_of_bags");
            }
            other => prop_assert!(false, "unexpected error {:?}", other),
        }
    }
}

#[test]
fn registry_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConversionRegistry>();
}

#[test]
fn concurrent_conversions_share_the_global_registry() {
    let num_threads = 8;
    let barrier = Arc::new(Barrier::new(num_threads));
    let mut handles = Vec::new();

    for thread_id in 0..num_threads {
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            let bags = thread_id as i64 + 1;
            (0..100)
                .map(|_| {
                    let input = ConversionInput::new()
                        .with("number_of_bags", bags)
                        .with("packets_per_bag", 4)
                        .with("pieces_per_packet", 3);
                    egrn_conversion::convert("cut9_conversion", &input)
                        .unwrap()
                        .quantity_received
                })
                .all(|quantity| quantity == (bags * 12) as f64)
        }));
    }

    for handle in handles {
        assert!(handle.join().expect("conversion thread panicked"));
    }
}
