//! Barcode scanning surfaces for browser hosts, backed by zbar
//!
//! This crate does not decode barcodes itself. It keeps the declarative
//! scan configuration of a camera or image view in sync with an external
//! zbar decoder (typically zbar compiled to WebAssembly), and turns what the
//! decoder reports into typed results.
//!
//! - [`config`]: [`ScannerOptions`] and the wire records pushed to the decoder
//! - [`Scanner`], [`CameraScanner`], [`ImageScanner`]: scanning surfaces
//! - [`interop`]: the decoder and camera collaborator traits

pub mod camera;
pub mod config;
pub mod error;
pub mod image;
pub mod image_scan;
pub mod interop;
pub mod scanner;
pub mod symbol;

#[cfg(feature = "wasm")]
pub mod wasm;

#[cfg(test)]
mod proptest_options;

// Re-export main types
pub use camera::{CameraScanner, CameraViewType};
pub use config::{ConfigOption, ConfigType, ScannerOptions, SymbolOption};
pub use error::{Error, Result};
pub use image::Image;
pub use image_scan::ImageScanner;
pub use interop::{FeedSettings, HardwareDevice, SymbolDecoder, VideoCapture};
pub use scanner::{ScanParameters, Scanner};
pub use symbol::{Barcode, BarcodeType, SYMBOL_ALL, ScanOutcome, ScanResult, Symbol, SymbolType};
