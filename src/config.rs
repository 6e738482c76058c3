//! Scanner configuration and reconciliation
//!
//! [`ScannerOptions`] holds the declarative configuration of one scanning
//! surface: which barcode types to look for, the global defaults for every
//! tunable option and any per-symbology overrides. It answers two questions
//! in the decoder's wire format ([`SymbolOption`]):
//!
//! - what is the complete configuration ([`ScannerOptions::export`]), and
//! - what has to change to get from the decoder's live state to a new
//!   desired state (the `update_*` methods).
//!
//! Some symbologies only decode while a base symbology is enabled (UPC-A
//! needs EAN-13). The live set of enabled symbologies therefore may be a
//! superset of what was asked for; see [`ScannerOptions::enabled_barcode_types`].
//!
//! # Examples
//!
//! ```
//! use zbar_web::config::{ConfigType, ScannerOptions};
//! use zbar_web::BarcodeType;
//!
//! let mut options = ScannerOptions::new(BarcodeType::I25, 0, 0);
//!
//! // UPC-A pulls in EAN-13 even though it was never requested
//! let diffs = options.update_scan_for(BarcodeType::I25 | BarcodeType::UPC_A);
//! assert_eq!(diffs.len(), 2);
//! assert_eq!(diffs[0].symbol_type, "ZBAR_UPCA");
//! assert_eq!(diffs[1].symbol_type, "ZBAR_EAN13");
//! assert_eq!(diffs[1].value(ConfigType::Enable), Some(1));
//!
//! // Dropping UPC-A again releases EAN-13 as well
//! let diffs = options.update_scan_for(BarcodeType::I25);
//! assert_eq!(diffs.len(), 2);
//! assert!(diffs.iter().all(|d| d.value(ConfigType::Enable) == Some(0)));
//! ```

use crate::symbol::{BarcodeType, SYMBOL_ALL, SymbolType};
use serde::Serialize;

pub mod capabilities;
pub mod dependencies;
pub(crate) mod overrides;

pub use capabilities::Capability;

use dependencies::{dependents_of, requirements_of};
use overrides::Overridable;

// ============================================================================
// Wire Format
// ============================================================================

/// A decoder configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConfigType {
    #[serde(rename = "ZBAR_CFG_ENABLE")]
    Enable,
    /// Validate the check digit before reporting ("honor check digit")
    #[serde(rename = "ZBAR_CFG_ADD_CHECK")]
    AddCheck,
    /// Include the check digit in the reported value
    #[serde(rename = "ZBAR_CFG_EMIT_CHECK")]
    EmitCheck,
    /// Full ASCII character set
    #[serde(rename = "ZBAR_CFG_ASCII")]
    Ascii,
    #[serde(rename = "ZBAR_CFG_MIN_LEN")]
    MinLength,
    #[serde(rename = "ZBAR_CFG_MAX_LEN")]
    MaxLength,
    #[serde(rename = "ZBAR_CFG_UNCERTAINTY")]
    Uncertainty,
}

impl ConfigType {
    /// Wire constant naming this key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enable => "ZBAR_CFG_ENABLE",
            Self::AddCheck => "ZBAR_CFG_ADD_CHECK",
            Self::EmitCheck => "ZBAR_CFG_EMIT_CHECK",
            Self::Ascii => "ZBAR_CFG_ASCII",
            Self::MinLength => "ZBAR_CFG_MIN_LEN",
            Self::MaxLength => "ZBAR_CFG_MAX_LEN",
            Self::Uncertainty => "ZBAR_CFG_UNCERTAINTY",
        }
    }
}

impl std::fmt::Display for ConfigType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One configuration key and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOption {
    pub config_type: ConfigType,
    pub value: i32,
}

impl ConfigOption {
    pub const fn new(config_type: ConfigType, value: i32) -> Self {
        Self { config_type, value }
    }

    const fn flag(config_type: ConfigType, enabled: bool) -> Self {
        Self::new(config_type, enabled as i32)
    }
}

/// Configuration for one symbology, in the order it is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolOption {
    /// Symbology wire name, or [`SYMBOL_ALL`] for every symbology.
    pub symbol_type: &'static str,
    pub config_options: Vec<ConfigOption>,
}

impl SymbolOption {
    pub fn new(sym: SymbolType, config_options: Vec<ConfigOption>) -> Self {
        Self {
            symbol_type: sym.symbol_name(),
            config_options,
        }
    }

    /// Turns every symbology off.
    pub fn disable_all() -> Self {
        Self {
            symbol_type: SYMBOL_ALL,
            config_options: vec![ConfigOption::new(ConfigType::Enable, 0)],
        }
    }

    /// Turns `sym` off without touching its other settings.
    pub fn disable(sym: SymbolType) -> Self {
        Self::new(sym, vec![ConfigOption::new(ConfigType::Enable, 0)])
    }

    /// The symbology this option targets, if it is not the sentinel.
    pub fn symbology(&self) -> Option<SymbolType> {
        SymbolType::from_symbol_name(self.symbol_type)
    }

    /// Value of the first entry for `config_type`, if present.
    pub fn value(&self, config_type: ConfigType) -> Option<i32> {
        self.config_options
            .iter()
            .find(|opt| opt.config_type == config_type)
            .map(|opt| opt.value)
    }
}

// ============================================================================
// Scanner Options
// ============================================================================

/// Declarative scan configuration for one scanning surface.
///
/// Numeric inputs below zero are clamped to zero rather than rejected.
#[derive(Debug, Clone)]
pub struct ScannerOptions {
    /// Requested barcode types
    scan_for: BarcodeType,

    /// Barcode types currently enabled in the decoder
    enabled: BarcodeType,

    min_length: Overridable<i32>,
    max_length: Overridable<i32>,
    uncertainty: Overridable<i32>,
    full_character_set: Overridable<bool>,
    honor_check_digit: Overridable<bool>,
    include_check_digit: Overridable<bool>,
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self::new(BarcodeType::ALL, 0, 0)
    }
}

impl ScannerOptions {
    /// Create options scanning for `scan_for` with the given length limits.
    ///
    /// Uncertainty defaults to 0; full character set and both check digit
    /// settings default to on.
    pub fn new(scan_for: BarcodeType, min_value_length: i32, max_value_length: i32) -> Self {
        Self {
            scan_for,
            enabled: dependencies::closure(scan_for),
            min_length: Overridable::new(min_value_length.max(0), Capability::LengthLimits),
            max_length: Overridable::new(max_value_length.max(0), Capability::LengthLimits),
            uncertainty: Overridable::new(0, Capability::Uncertainty),
            full_character_set: Overridable::new(true, Capability::FullCharacterSet),
            honor_check_digit: Overridable::new(true, Capability::CheckDigit),
            include_check_digit: Overridable::new(true, Capability::CheckDigit),
        }
    }

    /// Set the default uncertainty
    pub fn with_uncertainty(mut self, uncertainty: i32) -> Self {
        self.uncertainty.set_default(uncertainty.max(0));
        self
    }

    /// Set the default full character set mode
    pub fn with_full_character_set(mut self, enable: bool) -> Self {
        self.full_character_set.set_default(enable);
        self
    }

    /// Set the default check digit validation
    pub fn with_honor_check_digit(mut self, honor: bool) -> Self {
        self.honor_check_digit.set_default(honor);
        self
    }

    /// Set the default check digit reporting
    pub fn with_include_check_digit(mut self, include: bool) -> Self {
        self.include_check_digit.set_default(include);
        self
    }

    pub fn scan_for(&self) -> BarcodeType {
        self.scan_for
    }

    /// Barcode types enabled in the decoder.
    ///
    /// Always a superset of [`ScannerOptions::scan_for`]: it also holds base
    /// symbologies that requested ones depend on.
    pub fn enabled_barcode_types(&self) -> BarcodeType {
        self.enabled
    }

    pub fn minimum_value_length(&self) -> i32 {
        self.min_length.default_value()
    }

    pub fn maximum_value_length(&self) -> i32 {
        self.max_length.default_value()
    }

    pub fn uncertainty(&self) -> i32 {
        self.uncertainty.default_value()
    }

    pub fn enable_full_character_set(&self) -> bool {
        self.full_character_set.default_value()
    }

    pub fn honor_check_digit(&self) -> bool {
        self.honor_check_digit.default_value()
    }

    pub fn include_check_digit(&self) -> bool {
        self.include_check_digit.default_value()
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Complete configuration, suitable for initializing a fresh decoder.
    ///
    /// Starts by disabling every symbology, then enables each requested
    /// type followed by any base types they depend on.
    pub fn export(&self) -> Vec<SymbolOption> {
        let required = dependencies::closure(self.scan_for).difference(self.scan_for);

        let mut options = Vec::with_capacity(1 + self.scan_for.bits().count_ones() as usize);
        options.push(SymbolOption::disable_all());
        options.extend(self.scan_for.symbol_types().map(|sym| self.configure(sym)));
        options.extend(required.symbol_types().map(|sym| self.configure(sym)));
        options
    }

    /// Full configuration for a single enabled symbology.
    fn configure(&self, sym: SymbolType) -> SymbolOption {
        let mut config = vec![ConfigOption::new(ConfigType::Enable, 1)];

        if self.min_length.supported().has(sym) {
            config.push(ConfigOption::new(
                ConfigType::MinLength,
                self.min_length.effective(sym),
            ));
            config.push(ConfigOption::new(
                ConfigType::MaxLength,
                self.max_length.effective(sym),
            ));
        }

        config.push(ConfigOption::new(
            ConfigType::Uncertainty,
            self.uncertainty.effective(sym),
        ));

        if self.full_character_set.supported().has(sym) {
            config.push(ConfigOption::flag(
                ConfigType::Ascii,
                self.full_character_set.effective(sym),
            ));
        }

        if self.honor_check_digit.supported().has(sym) {
            config.push(ConfigOption::flag(
                ConfigType::AddCheck,
                self.honor_check_digit.effective(sym),
            ));
            config.push(ConfigOption::flag(
                ConfigType::EmitCheck,
                self.include_check_digit.effective(sym),
            ));
        }

        SymbolOption::new(sym, config)
    }

    // ========================================================================
    // Reconciliation
    // ========================================================================

    /// Change the requested barcode types.
    ///
    /// Returns only the symbologies whose enabled state changes, including
    /// base symbologies switched on or off to satisfy dependencies.
    /// Requesting [`BarcodeType::ALL`] returns a full [`export`](Self::export).
    pub fn update_scan_for(&mut self, scan_for: BarcodeType) -> Vec<SymbolOption> {
        self.scan_for = scan_for;

        if scan_for == BarcodeType::ALL {
            self.enabled = BarcodeType::ALL;
            return self.export();
        }

        let mut diffs = Vec::new();

        for sym in scan_for.difference(self.enabled).symbol_types() {
            self.enable(sym, &mut diffs);
        }

        for sym in self.enabled.difference(scan_for).symbol_types() {
            self.disable(sym, &mut diffs);
        }

        log::debug!(
            "scan for {:?}: {} symbology change(s), live set {:?}",
            scan_for,
            diffs.len(),
            self.enabled
        );

        diffs
    }

    fn enable(&mut self, sym: SymbolType, diffs: &mut Vec<SymbolOption>) {
        if self.enabled.has(sym) {
            return;
        }

        diffs.push(self.configure(sym));
        self.enabled.insert(sym.flag());

        for base in requirements_of(sym).symbol_types() {
            self.enable(base, diffs);
        }
    }

    fn disable(&mut self, sym: SymbolType, diffs: &mut Vec<SymbolOption>) {
        if !self.enabled.has(sym) || self.scan_for.has(sym) {
            return;
        }

        // Still needed by an enabled dependent
        if dependents_of(sym).intersects(self.enabled) {
            return;
        }

        diffs.push(SymbolOption::disable(sym));
        self.enabled.remove(sym.flag());

        for base in requirements_of(sym).symbol_types() {
            self.disable(base, diffs);
        }
    }

    /// Diffs carrying `build(sym)` for every enabled symbology in `supported`.
    fn option_diffs(
        &self,
        supported: BarcodeType,
        build: impl Fn(SymbolType) -> Vec<ConfigOption>,
    ) -> Vec<SymbolOption> {
        self.enabled
            .intersection(supported)
            .symbol_types()
            .map(|sym| SymbolOption::new(sym, build(sym)))
            .collect()
    }

    /// Change the default minimum value length.
    pub fn update_min_value_length(&mut self, value: i32) -> Vec<SymbolOption> {
        self.min_length.set_default(value.max(0));
        self.option_diffs(self.min_length.supported(), |sym| {
            vec![ConfigOption::new(
                ConfigType::MinLength,
                self.min_length.effective(sym),
            )]
        })
    }

    /// Change the default maximum value length.
    pub fn update_max_value_length(&mut self, value: i32) -> Vec<SymbolOption> {
        self.max_length.set_default(value.max(0));
        self.option_diffs(self.max_length.supported(), |sym| {
            vec![ConfigOption::new(
                ConfigType::MaxLength,
                self.max_length.effective(sym),
            )]
        })
    }

    /// Change the default uncertainty.
    pub fn update_uncertainty(&mut self, value: i32) -> Vec<SymbolOption> {
        self.uncertainty.set_default(value.max(0));
        self.option_diffs(self.uncertainty.supported(), |sym| {
            vec![ConfigOption::new(
                ConfigType::Uncertainty,
                self.uncertainty.effective(sym),
            )]
        })
    }

    /// Change the default full character set mode.
    pub fn update_enable_full_character_set(&mut self, enable: bool) -> Vec<SymbolOption> {
        self.full_character_set.set_default(enable);
        self.option_diffs(self.full_character_set.supported(), |sym| {
            vec![ConfigOption::flag(
                ConfigType::Ascii,
                self.full_character_set.effective(sym),
            )]
        })
    }

    /// Change the default check digit validation.
    pub fn update_honor_check_digit(&mut self, honor: bool) -> Vec<SymbolOption> {
        self.honor_check_digit.set_default(honor);
        self.option_diffs(self.honor_check_digit.supported(), |sym| {
            vec![ConfigOption::flag(
                ConfigType::AddCheck,
                self.honor_check_digit.effective(sym),
            )]
        })
    }

    /// Change the default check digit reporting.
    pub fn update_include_check_digit(&mut self, include: bool) -> Vec<SymbolOption> {
        self.include_check_digit.set_default(include);
        self.option_diffs(self.include_check_digit.supported(), |sym| {
            vec![ConfigOption::flag(
                ConfigType::EmitCheck,
                self.include_check_digit.effective(sym),
            )]
        })
    }

    // ========================================================================
    // Per-Symbology Overrides
    // ========================================================================
    //
    // Each override applies to every symbology in `barcode_type` that
    // supports the option and returns `false` if any of them does not.
    // Overrides take effect on the next export or matching update.

    /// Override the minimum value length for specific barcode types.
    pub fn override_minimum_value_length(&mut self, barcode_type: BarcodeType, value: i32) -> bool {
        self.min_length.set_override(barcode_type, value.max(0))
    }

    /// Override the maximum value length for specific barcode types.
    pub fn override_maximum_value_length(&mut self, barcode_type: BarcodeType, value: i32) -> bool {
        self.max_length.set_override(barcode_type, value.max(0))
    }

    /// Override the uncertainty for specific barcode types. Always succeeds.
    pub fn override_uncertainty(&mut self, barcode_type: BarcodeType, value: i32) -> bool {
        self.uncertainty.set_override(barcode_type, value.max(0))
    }

    /// Override full character set mode for specific barcode types.
    pub fn override_full_character_set(&mut self, barcode_type: BarcodeType, enable: bool) -> bool {
        self.full_character_set.set_override(barcode_type, enable)
    }

    /// Override check digit validation for specific barcode types.
    pub fn override_honor_check_digit(&mut self, barcode_type: BarcodeType, honor: bool) -> bool {
        self.honor_check_digit.set_override(barcode_type, honor)
    }

    /// Override check digit reporting for specific barcode types.
    pub fn override_include_check_digit(
        &mut self,
        barcode_type: BarcodeType,
        include: bool,
    ) -> bool {
        self.include_check_digit.set_override(barcode_type, include)
    }
}
