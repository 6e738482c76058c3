//! WebAssembly bindings for the scanner configuration.
//!
//! The JS glue owns the zbar.wasm scanner instance; these bindings produce
//! the configuration calls it should make. Every method returning options
//! returns a JSON array of `{ symbolType, configOptions: [{ configType, value }] }`.

use wasm_bindgen::prelude::*;

use crate::config::{ScannerOptions, SymbolOption};
use crate::symbol::BarcodeType;

fn to_json(options: &[SymbolOption]) -> Result<String, JsValue> {
    serde_json::to_string(options).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Scan configuration of one scanning surface.
#[wasm_bindgen(js_name = ScannerOptions)]
pub struct WasmScannerOptions {
    inner: ScannerOptions,
}

#[wasm_bindgen(js_class = ScannerOptions)]
impl WasmScannerOptions {
    /// `scan_for` is a `BarcodeType` bit mask; unknown bits are ignored.
    #[wasm_bindgen(constructor)]
    pub fn new(scan_for: u32, min_value_length: i32, max_value_length: i32) -> Self {
        Self {
            inner: ScannerOptions::new(
                BarcodeType::from_bits_truncate(scan_for),
                min_value_length,
                max_value_length,
            ),
        }
    }

    /// Bit mask of every barcode type.
    #[wasm_bindgen(js_name = allBarcodeTypes)]
    pub fn all_barcode_types() -> u32 {
        BarcodeType::ALL.bits()
    }

    #[wasm_bindgen(getter, js_name = scanFor)]
    pub fn scan_for(&self) -> u32 {
        self.inner.scan_for().bits()
    }

    #[wasm_bindgen(getter, js_name = enabledBarcodeTypes)]
    pub fn enabled_barcode_types(&self) -> u32 {
        self.inner.enabled_barcode_types().bits()
    }

    pub fn export(&self) -> Result<String, JsValue> {
        to_json(&self.inner.export())
    }

    #[wasm_bindgen(js_name = updateScanFor)]
    pub fn update_scan_for(&mut self, scan_for: u32) -> Result<String, JsValue> {
        to_json(
            &self
                .inner
                .update_scan_for(BarcodeType::from_bits_truncate(scan_for)),
        )
    }

    #[wasm_bindgen(js_name = updateMinValueLength)]
    pub fn update_min_value_length(&mut self, value: i32) -> Result<String, JsValue> {
        to_json(&self.inner.update_min_value_length(value))
    }

    #[wasm_bindgen(js_name = updateMaxValueLength)]
    pub fn update_max_value_length(&mut self, value: i32) -> Result<String, JsValue> {
        to_json(&self.inner.update_max_value_length(value))
    }

    #[wasm_bindgen(js_name = updateUncertainty)]
    pub fn update_uncertainty(&mut self, value: i32) -> Result<String, JsValue> {
        to_json(&self.inner.update_uncertainty(value))
    }

    #[wasm_bindgen(js_name = updateEnableFullCharacterSet)]
    pub fn update_enable_full_character_set(&mut self, enable: bool) -> Result<String, JsValue> {
        to_json(&self.inner.update_enable_full_character_set(enable))
    }

    #[wasm_bindgen(js_name = updateHonorCheckDigit)]
    pub fn update_honor_check_digit(&mut self, honor: bool) -> Result<String, JsValue> {
        to_json(&self.inner.update_honor_check_digit(honor))
    }

    #[wasm_bindgen(js_name = updateIncludeCheckDigit)]
    pub fn update_include_check_digit(&mut self, include: bool) -> Result<String, JsValue> {
        to_json(&self.inner.update_include_check_digit(include))
    }

    #[wasm_bindgen(js_name = overrideMinimumValueLength)]
    pub fn override_minimum_value_length(&mut self, barcode_type: u32, value: i32) -> bool {
        self.inner
            .override_minimum_value_length(BarcodeType::from_bits_truncate(barcode_type), value)
    }

    #[wasm_bindgen(js_name = overrideMaximumValueLength)]
    pub fn override_maximum_value_length(&mut self, barcode_type: u32, value: i32) -> bool {
        self.inner
            .override_maximum_value_length(BarcodeType::from_bits_truncate(barcode_type), value)
    }

    #[wasm_bindgen(js_name = overrideUncertainty)]
    pub fn override_uncertainty(&mut self, barcode_type: u32, value: i32) -> bool {
        self.inner
            .override_uncertainty(BarcodeType::from_bits_truncate(barcode_type), value)
    }

    #[wasm_bindgen(js_name = overrideFullCharacterSet)]
    pub fn override_full_character_set(&mut self, barcode_type: u32, enable: bool) -> bool {
        self.inner
            .override_full_character_set(BarcodeType::from_bits_truncate(barcode_type), enable)
    }

    #[wasm_bindgen(js_name = overrideHonorCheckDigit)]
    pub fn override_honor_check_digit(&mut self, barcode_type: u32, honor: bool) -> bool {
        self.inner
            .override_honor_check_digit(BarcodeType::from_bits_truncate(barcode_type), honor)
    }

    #[wasm_bindgen(js_name = overrideIncludeCheckDigit)]
    pub fn override_include_check_digit(&mut self, barcode_type: u32, include: bool) -> bool {
        self.inner
            .override_include_check_digit(BarcodeType::from_bits_truncate(barcode_type), include)
    }
}
