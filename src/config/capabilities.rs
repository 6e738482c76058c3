//! Per-symbology capability tables
//!
//! Not every decoder option applies to every symbology. A symbology outside
//! a capability set never receives that option in an exported configuration,
//! and overrides targeting it are rejected.

use crate::symbol::{BarcodeType, SymbolType};

/// Symbologies that honor `ZBAR_CFG_MIN_LEN` and `ZBAR_CFG_MAX_LEN`.
pub const LENGTH_LIMITS: BarcodeType = BarcodeType::EAN_13
    .union(BarcodeType::I25)
    .union(BarcodeType::CODABAR)
    .union(BarcodeType::CODE_39)
    .union(BarcodeType::CODE_93)
    .union(BarcodeType::CODE_128);

/// Symbologies that honor `ZBAR_CFG_ASCII`.
pub const FULL_CHARACTER_SET: BarcodeType = BarcodeType::ALL
    .difference(BarcodeType::COMPOSITE)
    .difference(BarcodeType::PDF417);

/// Symbologies that honor `ZBAR_CFG_ADD_CHECK` and `ZBAR_CFG_EMIT_CHECK`.
pub const CHECK_DIGIT: BarcodeType = BarcodeType::EAN_8
    .union(BarcodeType::EAN_13)
    .union(BarcodeType::UPC_E)
    .union(BarcodeType::UPC_A)
    .union(BarcodeType::ISBN_10)
    .union(BarcodeType::ISBN_13)
    .union(BarcodeType::I25)
    .union(BarcodeType::CODABAR)
    .union(BarcodeType::CODE_39);

/// Symbologies that honor `ZBAR_CFG_UNCERTAINTY`.
pub const UNCERTAINTY: BarcodeType = BarcodeType::ALL;

/// A tunable decoder option with a restricted set of applicable symbologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    LengthLimits,
    FullCharacterSet,
    CheckDigit,
    Uncertainty,
}

impl Capability {
    /// Every symbology supporting this option.
    pub const fn supported(self) -> BarcodeType {
        match self {
            Self::LengthLimits => LENGTH_LIMITS,
            Self::FullCharacterSet => FULL_CHARACTER_SET,
            Self::CheckDigit => CHECK_DIGIT,
            Self::Uncertainty => UNCERTAINTY,
        }
    }

    /// Whether `sym` supports this option.
    pub const fn supports(self, sym: SymbolType) -> bool {
        self.supported().has(sym)
    }
}
