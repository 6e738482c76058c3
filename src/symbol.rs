//! Symbology vocabulary and decoded symbol records
//!
//! [`SymbolType`] names a single symbology and owns the mapping to the
//! decoder's wire constants. [`BarcodeType`] is the combinable flag set used
//! to describe what a scanning surface should look for.

use serde::{Serialize, Serializer};
use std::fmt::Display;

/// Wire name of the decoder's "all symbologies" sentinel.
pub const SYMBOL_ALL: &str = "ZBAR_NONE";

/// A single barcode symbology understood by the decoder.
///
/// Discriminants are the decoder's numeric symbol codes. Serialises as its
/// wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolType {
    Ean2 = 2,
    Ean5 = 5,
    Ean8 = 8,
    Ean13 = 13,
    Upce = 9,
    Upca = 12,
    Isbn10 = 10,
    Isbn13 = 14,
    Composite = 15,
    I25 = 25,
    Databar = 34,
    DatabarExp = 35,
    Codabar = 38,
    Pdf417 = 57,
    QrCode = 64,
    SqCode = 80,
    Code39 = 39,
    Code93 = 93,
    Code128 = 128,
}

impl SymbolType {
    /// Number of distinct symbologies.
    pub const COUNT: usize = 19;

    /// Every symbology, in flag order. Exports walk this order.
    pub const ALL: [Self; Self::COUNT] = [
        SymbolType::Ean2,
        SymbolType::Ean5,
        SymbolType::Ean8,
        SymbolType::Ean13,
        SymbolType::Upce,
        SymbolType::Upca,
        SymbolType::Isbn10,
        SymbolType::Isbn13,
        SymbolType::Composite,
        SymbolType::I25,
        SymbolType::Databar,
        SymbolType::DatabarExp,
        SymbolType::Codabar,
        SymbolType::Pdf417,
        SymbolType::QrCode,
        SymbolType::SqCode,
        SymbolType::Code39,
        SymbolType::Code93,
        SymbolType::Code128,
    ];

    /// Position of this symbology in [`SymbolType::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Ean2 => 0,
            Self::Ean5 => 1,
            Self::Ean8 => 2,
            Self::Ean13 => 3,
            Self::Upce => 4,
            Self::Upca => 5,
            Self::Isbn10 => 6,
            Self::Isbn13 => 7,
            Self::Composite => 8,
            Self::I25 => 9,
            Self::Databar => 10,
            Self::DatabarExp => 11,
            Self::Codabar => 12,
            Self::Pdf417 => 13,
            Self::QrCode => 14,
            Self::SqCode => 15,
            Self::Code39 => 16,
            Self::Code93 => 17,
            Self::Code128 => 18,
        }
    }

    /// The flag representing this symbology in a [`BarcodeType`] set.
    pub const fn flag(self) -> BarcodeType {
        match self {
            Self::Ean2 => BarcodeType::EAN_2,
            Self::Ean5 => BarcodeType::EAN_5,
            Self::Ean8 => BarcodeType::EAN_8,
            Self::Ean13 => BarcodeType::EAN_13,
            Self::Upce => BarcodeType::UPC_E,
            Self::Upca => BarcodeType::UPC_A,
            Self::Isbn10 => BarcodeType::ISBN_10,
            Self::Isbn13 => BarcodeType::ISBN_13,
            Self::Composite => BarcodeType::COMPOSITE,
            Self::I25 => BarcodeType::I25,
            Self::Databar => BarcodeType::DATABAR,
            Self::DatabarExp => BarcodeType::DATABAR_EXPANDED,
            Self::Codabar => BarcodeType::CODABAR,
            Self::Pdf417 => BarcodeType::PDF417,
            Self::QrCode => BarcodeType::QR_CODE,
            Self::SqCode => BarcodeType::QR_CODE_SECURE,
            Self::Code39 => BarcodeType::CODE_39,
            Self::Code93 => BarcodeType::CODE_93,
            Self::Code128 => BarcodeType::CODE_128,
        }
    }

    /// Wire constant naming this symbology in decoder configuration calls.
    pub const fn symbol_name(self) -> &'static str {
        match self {
            Self::Ean2 => "ZBAR_EAN2",
            Self::Ean5 => "ZBAR_EAN5",
            Self::Ean8 => "ZBAR_EAN8",
            Self::Ean13 => "ZBAR_EAN13",
            Self::Upce => "ZBAR_UPCE",
            Self::Upca => "ZBAR_UPCA",
            Self::Isbn10 => "ZBAR_ISBN10",
            Self::Isbn13 => "ZBAR_ISBN13",
            Self::Composite => "ZBAR_COMPOSITE",
            Self::I25 => "ZBAR_I25",
            Self::Databar => "ZBAR_DATABAR",
            Self::DatabarExp => "ZBAR_DATABAR_EXP",
            Self::Codabar => "ZBAR_CODABAR",
            Self::Pdf417 => "ZBAR_PDF417",
            Self::QrCode => "ZBAR_QRCODE",
            Self::SqCode => "ZBAR_SQCODE",
            Self::Code39 => "ZBAR_CODE39",
            Self::Code93 => "ZBAR_CODE93",
            Self::Code128 => "ZBAR_CODE128",
        }
    }

    /// Inverse of [`SymbolType::symbol_name`].
    pub fn from_symbol_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sym| sym.symbol_name() == name)
    }
}

impl Display for SymbolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Ean2 => "EAN-2",
                Self::Ean5 => "EAN-5",
                Self::Ean8 => "EAN-8",
                Self::Ean13 => "EAN-13",
                Self::Upce => "UPC-E",
                Self::Upca => "UPC-A",
                Self::Isbn10 => "ISBN-10",
                Self::Isbn13 => "ISBN-13",
                Self::Composite => "COMPOSITE",
                Self::I25 => "I2/5",
                Self::Databar => "DataBar",
                Self::DatabarExp => "DataBar-Exp",
                Self::Codabar => "Codabar",
                Self::Pdf417 => "PDF417",
                Self::QrCode => "QR-Code",
                Self::SqCode => "SQ-Code",
                Self::Code39 => "CODE-39",
                Self::Code93 => "CODE-93",
                Self::Code128 => "CODE-128",
            }
        )
    }
}

impl Serialize for SymbolType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol_name())
    }
}

impl From<SymbolType> for i32 {
    fn from(value: SymbolType) -> Self {
        value as i32
    }
}

bitflags::bitflags! {
    /// Barcode types a scanning surface can look for.
    ///
    /// Multiple types are combined as flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BarcodeType: u32 {
        const EAN_2 = 1;
        const EAN_5 = 1 << 1;
        const EAN_8 = 1 << 2;
        const EAN_13 = 1 << 3;
        const UPC_E = 1 << 4;
        const UPC_A = 1 << 5;
        const ISBN_10 = 1 << 6;
        const ISBN_13 = 1 << 7;
        const COMPOSITE = 1 << 8;
        const I25 = 1 << 9;
        const DATABAR = 1 << 10;
        const DATABAR_EXPANDED = 1 << 11;
        const CODABAR = 1 << 12;
        const PDF417 = 1 << 13;
        const QR_CODE = 1 << 14;
        const QR_CODE_SECURE = 1 << 15;
        const CODE_39 = 1 << 16;
        const CODE_93 = 1 << 17;
        const CODE_128 = 1 << 18;
    }
}

impl BarcodeType {
    /// Union of every individual barcode type.
    pub const ALL: Self = Self::all();

    /// Iterate the individual symbologies contained in this set, in
    /// [`SymbolType::ALL`] order.
    pub fn symbol_types(self) -> impl Iterator<Item = SymbolType> {
        SymbolType::ALL
            .into_iter()
            .filter(move |sym| self.contains(sym.flag()))
    }

    /// Whether `sym` is part of this set.
    pub const fn has(self, sym: SymbolType) -> bool {
        self.contains(sym.flag())
    }
}

impl Default for BarcodeType {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<SymbolType> for BarcodeType {
    fn from(value: SymbolType) -> Self {
        value.flag()
    }
}

impl FromIterator<SymbolType> for BarcodeType {
    fn from_iter<I: IntoIterator<Item = SymbolType>>(iter: I) -> Self {
        iter.into_iter()
            .fold(BarcodeType::empty(), |acc, sym| acc | sym.flag())
    }
}

/// A symbol as reported by the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Decoder wire name of the symbology, e.g. `ZBAR_QRCODE`.
    pub type_name: String,

    /// Decoded payload.
    pub raw_value: String,
}

impl Symbol {
    pub fn new(type_name: impl Into<String>, raw_value: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            raw_value: raw_value.into(),
        }
    }
}

/// A barcode identified in an image source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Barcode {
    #[serde(rename = "type")]
    pub barcode_type: SymbolType,
    pub value: String,
}

/// Barcodes found by a single scan.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ScanResult {
    pub barcodes: Vec<Barcode>,
}

impl ScanResult {
    /// Get the number of barcodes
    pub fn len(&self) -> usize {
        self.barcodes.len()
    }

    /// Check if there are any barcodes
    pub fn is_empty(&self) -> bool {
        self.barcodes.is_empty()
    }
}

/// Outcome of a single scan on a scanning surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// One or more requested barcode types were found.
    Found(ScanResult),

    /// The scan completed without finding a requested barcode type.
    NotFound,

    /// A previous scan on the same surface was still pending, so this one
    /// did not run.
    Skipped,
}
