//! Per-symbology override storage
//!
//! Each tunable option keeps a global default plus a map of symbology
//! specific values that take precedence over it.

use super::capabilities::Capability;
use crate::symbol::{BarcodeType, SymbolType};
use std::collections::HashMap;

/// A global default with per-symbology overrides.
#[derive(Debug, Clone)]
pub(crate) struct Overridable<T> {
    default: T,
    capability: Capability,
    overrides: HashMap<SymbolType, T>,
}

impl<T: Copy> Overridable<T> {
    pub(crate) fn new(default: T, capability: Capability) -> Self {
        Self {
            default,
            capability,
            overrides: HashMap::new(),
        }
    }

    pub(crate) fn default_value(&self) -> T {
        self.default
    }

    pub(crate) fn set_default(&mut self, value: T) {
        self.default = value;
    }

    /// Symbologies this option applies to.
    pub(crate) fn supported(&self) -> BarcodeType {
        self.capability.supported()
    }

    /// The value the decoder should use for `sym`.
    pub(crate) fn effective(&self, sym: SymbolType) -> T {
        self.overrides.get(&sym).copied().unwrap_or(self.default)
    }

    /// Record `value` for every supported symbology in `types`.
    ///
    /// Returns `false` if any symbology in `types` does not support this
    /// option. Supported ones keep the override regardless.
    pub(crate) fn set_override(&mut self, types: BarcodeType, value: T) -> bool {
        let mut all_supported = true;
        for sym in types.symbol_types() {
            if self.capability.supports(sym) {
                self.overrides.insert(sym, value);
            } else {
                all_supported = false;
            }
        }
        all_supported
    }

    #[cfg(test)]
    pub(crate) fn override_for(&self, sym: SymbolType) -> Option<T> {
        self.overrides.get(&sym).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_falls_back_to_default() {
        let mut lengths = Overridable::new(4, Capability::LengthLimits);
        assert_eq!(lengths.effective(SymbolType::Code39), 4);

        assert!(lengths.set_override(BarcodeType::CODE_39, 12));
        assert_eq!(lengths.effective(SymbolType::Code39), 12);
        assert_eq!(lengths.effective(SymbolType::Code93), 4);

        lengths.set_default(6);
        assert_eq!(lengths.effective(SymbolType::Code39), 12);
        assert_eq!(lengths.effective(SymbolType::Code93), 6);
    }

    #[test]
    fn test_partial_override_is_kept() {
        let mut lengths = Overridable::new(0, Capability::LengthLimits);
        assert!(!lengths.set_override(BarcodeType::I25 | BarcodeType::QR_CODE, 9));
        assert_eq!(lengths.override_for(SymbolType::I25), Some(9));
        assert_eq!(lengths.override_for(SymbolType::QrCode), None);
    }

    #[test]
    fn test_unrestricted_override_always_succeeds() {
        let mut uncertainty = Overridable::new(0, Capability::Uncertainty);
        assert!(uncertainty.set_override(BarcodeType::ALL, 2));
        for sym in SymbolType::ALL {
            assert_eq!(uncertainty.effective(sym), 2);
        }
    }

    #[test]
    fn test_empty_set_is_trivially_supported() {
        let mut flags = Overridable::new(true, Capability::CheckDigit);
        assert!(flags.set_override(BarcodeType::empty(), false));
        assert!(flags.effective(SymbolType::Ean13));
    }
}
