//! Property-based tests for scanner configuration reconciliation
//!
//! These tests drive `ScannerOptions` through random sequences of updates
//! and check that the live enabled set, the diffs and the full export stay
//! consistent with each other.

use crate::config::{ConfigType, ScannerOptions, SymbolOption, capabilities, dependencies};
use crate::symbol::{BarcodeType, SymbolType};
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Update {
    ScanFor(BarcodeType),
    MinLength(i32),
    MaxLength(i32),
    Uncertainty(i32),
    FullCharacterSet(bool),
    HonorCheckDigit(bool),
    IncludeCheckDigit(bool),
}

fn barcode_type() -> impl Strategy<Value = BarcodeType> {
    prop_oneof![
        4 => any::<u32>().prop_map(BarcodeType::from_bits_truncate),
        1 => Just(BarcodeType::ALL),
        1 => Just(BarcodeType::empty()),
        // Bias towards the EAN-13 dependency family
        2 => proptest::sample::subsequence(
            vec![
                SymbolType::Ean13,
                SymbolType::Upca,
                SymbolType::Isbn10,
                SymbolType::Isbn13,
                SymbolType::I25,
            ],
            0..=5
        )
        .prop_map(|types| types.into_iter().collect()),
    ]
}

fn update() -> impl Strategy<Value = Update> {
    prop_oneof![
        4 => barcode_type().prop_map(Update::ScanFor),
        1 => (-5i32..300).prop_map(Update::MinLength),
        1 => (-5i32..300).prop_map(Update::MaxLength),
        1 => (-2i32..5).prop_map(Update::Uncertainty),
        1 => any::<bool>().prop_map(Update::FullCharacterSet),
        1 => any::<bool>().prop_map(Update::HonorCheckDigit),
        1 => any::<bool>().prop_map(Update::IncludeCheckDigit),
    ]
}

fn apply(options: &mut ScannerOptions, update: &Update) -> Vec<SymbolOption> {
    match *update {
        Update::ScanFor(t) => options.update_scan_for(t),
        Update::MinLength(v) => options.update_min_value_length(v),
        Update::MaxLength(v) => options.update_max_value_length(v),
        Update::Uncertainty(v) => options.update_uncertainty(v),
        Update::FullCharacterSet(v) => options.update_enable_full_character_set(v),
        Update::HonorCheckDigit(v) => options.update_honor_check_digit(v),
        Update::IncludeCheckDigit(v) => options.update_include_check_digit(v),
    }
}

/// Replays configuration records onto a simulated decoder.
#[derive(Debug, Default, PartialEq)]
struct DecoderModel {
    enabled: BarcodeType,
    values: HashMap<(SymbolType, ConfigType), i32>,
}

impl DecoderModel {
    fn apply(&mut self, options: &[SymbolOption]) {
        for option in options {
            match option.symbology() {
                None => {
                    // Sentinel only ever carries enable=0
                    assert_eq!(option.value(ConfigType::Enable), Some(0));
                    self.enabled = BarcodeType::empty();
                }
                Some(sym) => {
                    for config in &option.config_options {
                        if config.config_type == ConfigType::Enable {
                            self.enabled.set(sym.flag(), config.value == 1);
                        } else {
                            self.values.insert((sym, config.config_type), config.value);
                        }
                    }
                }
            }
        }
    }

    /// Values of enabled symbologies only; disabled ones may hold stale state.
    fn live_values(&self) -> HashMap<(SymbolType, ConfigType), i32> {
        self.values
            .iter()
            .filter(|((sym, _), _)| self.enabled.has(*sym))
            .map(|(k, v)| (*k, *v))
            .collect()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn live_set_is_dependency_closure(
        initial in barcode_type(),
        updates in proptest::collection::vec(update(), 0..12),
    ) {
        let mut options = ScannerOptions::new(initial, 0, 0);
        for update in &updates {
            apply(&mut options, update);
            prop_assert_eq!(
                options.enabled_barcode_types(),
                dependencies::closure(options.scan_for())
            );
        }
    }

    #[test]
    fn diffs_converge_to_export(
        initial in barcode_type(),
        updates in proptest::collection::vec(update(), 0..12),
    ) {
        let mut options = ScannerOptions::new(initial, 0, 0);
        let mut incremental = DecoderModel::default();
        incremental.apply(&options.export());

        for update in &updates {
            let diffs = apply(&mut options, update);
            incremental.apply(&diffs);
        }

        let mut fresh = DecoderModel::default();
        fresh.apply(&options.export());

        prop_assert_eq!(incremental.enabled, fresh.enabled);
        prop_assert_eq!(incremental.live_values(), fresh.live_values());
    }

    #[test]
    fn diffs_never_repeat_a_symbology(
        initial in barcode_type(),
        next in barcode_type(),
    ) {
        let mut options = ScannerOptions::new(initial, 0, 0);
        prop_assume!(next != BarcodeType::ALL);
        let diffs = options.update_scan_for(next);

        let mut seen = BarcodeType::empty();
        for diff in &diffs {
            let sym = diff.symbology().expect("diffs never use the sentinel");
            prop_assert!(!seen.has(sym), "{} appears twice", sym);
            seen |= sym.flag();
        }
    }

    #[test]
    fn export_is_idempotent(
        initial in barcode_type(),
        updates in proptest::collection::vec(update(), 0..6),
    ) {
        let mut options = ScannerOptions::new(initial, 0, 0);
        for update in &updates {
            apply(&mut options, update);
        }
        prop_assert_eq!(options.export(), options.export());
    }

    #[test]
    fn export_respects_capabilities(
        scan_for in barcode_type(),
        overridden in barcode_type(),
        value in 0i32..100,
    ) {
        let mut options = ScannerOptions::new(scan_for, 1, 2);
        let ok = options.override_minimum_value_length(overridden, value);
        prop_assert_eq!(ok, capabilities::LENGTH_LIMITS.contains(overridden));

        for option in options.export().iter().skip(1) {
            let sym = option.symbology().expect("only the first entry is the sentinel");
            prop_assert_eq!(
                option.value(ConfigType::MinLength).is_some(),
                capabilities::LENGTH_LIMITS.has(sym)
            );
            prop_assert_eq!(
                option.value(ConfigType::Ascii).is_some(),
                capabilities::FULL_CHARACTER_SET.has(sym)
            );
            prop_assert_eq!(
                option.value(ConfigType::AddCheck).is_some(),
                capabilities::CHECK_DIGIT.has(sym)
            );
            prop_assert!(option.value(ConfigType::Uncertainty).is_some());
        }
    }
}
