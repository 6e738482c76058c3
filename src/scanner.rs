//! Scanning surface core
//!
//! A [`Scanner`] pairs one [`ScannerOptions`] with one decoder instance.
//! Parameter changes are reconciled into configuration diffs and pushed to
//! the decoder; scan results are filtered down to the requested barcode
//! types.

use crate::config::{ScannerOptions, SymbolOption};
use crate::image::Image;
use crate::interop::SymbolDecoder;
use crate::symbol::{Barcode, BarcodeType, ScanOutcome, ScanResult, Symbol, SymbolType};
use crate::{Error, Result};
use log::Level;
use std::cell::{Cell, Ref, RefCell};

/// Parameter values supplied by the presentation layer.
///
/// `None` leaves the corresponding setting untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanParameters {
    pub scan_for: Option<BarcodeType>,
    pub minimum_value_length: Option<i32>,
    pub maximum_value_length: Option<i32>,
    pub honor_check_digit: Option<bool>,
    pub include_check_digit: Option<bool>,
    pub enable_full_character_set: Option<bool>,
    pub uncertainty: Option<i32>,
}

/// Marks a scan in flight; cleared on drop.
pub(crate) struct BusyGuard<'a>(&'a Cell<bool>);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(BusyGuard(flag))
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Configuration and decoder instance of one scanning surface.
///
/// # Example
/// ```no_run
/// # async fn run<D: zbar_web::SymbolDecoder>(decoder: D, image: zbar_web::Image) -> zbar_web::Result<()> {
/// use zbar_web::{BarcodeType, ScanOutcome, ScanParameters, Scanner, ScannerOptions};
///
/// let scanner = Scanner::new(decoder, ScannerOptions::new(BarcodeType::QR_CODE, 0, 0));
/// scanner.open().await?;
///
/// scanner
///     .set_parameters(&ScanParameters {
///         scan_for: Some(BarcodeType::QR_CODE | BarcodeType::EAN_13),
///         ..Default::default()
///     })
///     .await?;
///
/// if let ScanOutcome::Found(result) = scanner.scan(&image).await? {
///     for barcode in result.barcodes {
///         println!("{}: {}", barcode.barcode_type, barcode.value);
///     }
/// }
/// scanner.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct Scanner<D: SymbolDecoder> {
    decoder: D,
    options: RefCell<ScannerOptions>,
    handle: RefCell<Option<D::Handle>>,
    verbose: Cell<bool>,
    busy: Cell<bool>,
    /// The decoder may hold a partial configuration after a failed push
    stale: Cell<bool>,
}

impl<D: SymbolDecoder> Scanner<D> {
    pub fn new(decoder: D, options: ScannerOptions) -> Self {
        Scanner {
            decoder,
            options: RefCell::new(options),
            handle: RefCell::new(None),
            verbose: Cell::new(false),
            busy: Cell::new(false),
            stale: Cell::new(false),
        }
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    /// Current configuration.
    pub fn options(&self) -> Ref<'_, ScannerOptions> {
        self.options.borrow()
    }

    pub fn verbose(&self) -> bool {
        self.verbose.get()
    }

    /// Log every configuration call at `info` instead of `debug`.
    pub fn set_verbose(&self, verbose: bool) {
        self.verbose.set(verbose);
    }

    /// Whether a decoder instance is open.
    pub fn is_open(&self) -> bool {
        self.handle.borrow().is_some()
    }

    /// Whether a scan is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Create the decoder instance and push the full configuration to it.
    ///
    /// If the configuration cannot be pushed the instance is destroyed again
    /// and the surface stays closed.
    pub async fn open(&self) -> Result<()> {
        if self.is_open() {
            return Err(Error::ScannerExists);
        }

        let handle = self.decoder.create_scanner().await?;
        let export = self.options.borrow().export();
        log::debug!("opened scanner, pushing {} symbol option(s)", export.len());

        if let Err(e) = self.push(&handle, &export).await {
            log::warn!("initial configuration failed, destroying scanner: {e}");
            let _ = self.decoder.destroy(handle).await;
            return Err(e);
        }

        *self.handle.borrow_mut() = Some(handle);
        self.stale.set(false);
        Ok(())
    }

    /// Release the decoder instance. Does nothing if none is open.
    pub async fn close(&self) -> Result<()> {
        self.stale.set(false);
        let handle = self.handle.borrow_mut().take();
        match handle {
            Some(handle) => {
                log::debug!("closing scanner");
                self.decoder.destroy(handle).await
            }
            None => Ok(()),
        }
    }

    /// Apply changed parameters and push the resulting diffs to the decoder.
    ///
    /// Parameters equal to the current value are ignored. Returns the diffs
    /// that were produced, whether or not a decoder instance was open to
    /// receive them.
    ///
    /// If an earlier push failed partway, the full configuration is pushed
    /// instead of the diffs.
    pub async fn set_parameters(&self, params: &ScanParameters) -> Result<Vec<SymbolOption>> {
        let diffs = self.reconcile(params);

        let handle = self.handle.borrow().clone();
        let Some(handle) = handle else {
            return Ok(diffs);
        };

        if self.stale.get() {
            self.resync(&handle).await?;
        } else if !diffs.is_empty()
            && let Err(e) = self.push(&handle, &diffs).await
        {
            self.stale.set(true);
            return Err(e);
        }
        Ok(diffs)
    }

    /// Push the full configuration to bring a stale decoder back in line.
    async fn resync(&self, handle: &D::Handle) -> Result<()> {
        let export = self.options.borrow().export();
        log::debug!("resyncing scanner with {} symbol option(s)", export.len());
        self.push(handle, &export).await?;
        self.stale.set(false);
        Ok(())
    }

    fn reconcile(&self, params: &ScanParameters) -> Vec<SymbolOption> {
        let mut options = self.options.borrow_mut();
        let mut diffs = Vec::new();

        if let Some(scan_for) = params.scan_for
            && scan_for != options.scan_for()
        {
            diffs.extend(options.update_scan_for(scan_for));
        }
        if let Some(value) = params.minimum_value_length
            && value.max(0) != options.minimum_value_length()
        {
            diffs.extend(options.update_min_value_length(value));
        }
        if let Some(value) = params.maximum_value_length
            && value.max(0) != options.maximum_value_length()
        {
            diffs.extend(options.update_max_value_length(value));
        }
        if let Some(value) = params.honor_check_digit
            && value != options.honor_check_digit()
        {
            diffs.extend(options.update_honor_check_digit(value));
        }
        if let Some(value) = params.include_check_digit
            && value != options.include_check_digit()
        {
            diffs.extend(options.update_include_check_digit(value));
        }
        if let Some(value) = params.enable_full_character_set
            && value != options.enable_full_character_set()
        {
            diffs.extend(options.update_enable_full_character_set(value));
        }
        if let Some(value) = params.uncertainty
            && value.max(0) != options.uncertainty()
        {
            diffs.extend(options.update_uncertainty(value));
        }

        diffs
    }

    async fn push(&self, handle: &D::Handle, options: &[SymbolOption]) -> Result<()> {
        let level = if self.verbose.get() {
            Level::Info
        } else {
            Level::Debug
        };

        for option in options {
            for config in &option.config_options {
                let accepted = self
                    .decoder
                    .set_config(handle, option.symbol_type, config.config_type, config.value)
                    .await?;

                log::log!(
                    level,
                    "Set {} w/ {} to {} with result {}",
                    option.symbol_type,
                    config.config_type,
                    config.value,
                    accepted
                );
                if !accepted {
                    log::warn!(
                        "decoder rejected {} = {} for {}",
                        config.config_type,
                        config.value,
                        option.symbol_type
                    );
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Per-Symbology Overrides
    // ========================================================================
    //
    // Overrides are recorded only; they reach the decoder with the next
    // full export or the next update of the same option.

    /// Override the minimum value length for specific barcode types.
    pub fn override_minimum_value_length(&self, barcode_type: BarcodeType, value: i32) -> bool {
        self.options
            .borrow_mut()
            .override_minimum_value_length(barcode_type, value)
    }

    /// Override the maximum value length for specific barcode types.
    pub fn override_maximum_value_length(&self, barcode_type: BarcodeType, value: i32) -> bool {
        self.options
            .borrow_mut()
            .override_maximum_value_length(barcode_type, value)
    }

    /// Override the uncertainty for specific barcode types.
    pub fn override_uncertainty(&self, barcode_type: BarcodeType, value: i32) -> bool {
        self.options
            .borrow_mut()
            .override_uncertainty(barcode_type, value)
    }

    /// Override full character set mode for specific barcode types.
    pub fn override_full_character_set(&self, barcode_type: BarcodeType, enable: bool) -> bool {
        self.options
            .borrow_mut()
            .override_full_character_set(barcode_type, enable)
    }

    /// Override check digit validation for specific barcode types.
    pub fn override_honor_check_digit(&self, barcode_type: BarcodeType, honor: bool) -> bool {
        self.options
            .borrow_mut()
            .override_honor_check_digit(barcode_type, honor)
    }

    /// Override check digit reporting for specific barcode types.
    pub fn override_include_check_digit(&self, barcode_type: BarcodeType, include: bool) -> bool {
        self.options
            .borrow_mut()
            .override_include_check_digit(barcode_type, include)
    }

    // ========================================================================
    // Scanning
    // ========================================================================

    /// Scan an image for the requested barcode types.
    ///
    /// Returns [`ScanOutcome::Skipped`] without touching the decoder if a
    /// scan on this surface is still pending.
    pub async fn scan(&self, image: &Image) -> Result<ScanOutcome> {
        let Some(_guard) = self.begin() else {
            log::debug!("scan skipped, previous scan still pending");
            return Ok(ScanOutcome::Skipped);
        };
        self.decode(image).await
    }

    /// Mark a scan as in flight, unless one already is.
    pub(crate) fn begin(&self) -> Option<BusyGuard<'_>> {
        BusyGuard::acquire(&self.busy)
    }

    /// Decode without taking the busy guard; callers hold it.
    pub(crate) async fn decode(&self, image: &Image) -> Result<ScanOutcome> {
        let handle = self.handle.borrow().clone().ok_or(Error::NoScanner)?;
        if self.stale.get() {
            self.resync(&handle).await?;
        }
        let symbols = self.decoder.decode(&handle, image).await?;
        Ok(self.outcome(symbols))
    }

    fn outcome(&self, symbols: Vec<Symbol>) -> ScanOutcome {
        let scan_for = self.options.borrow().scan_for();
        let verbose = self.verbose.get();

        let barcodes: Vec<Barcode> = symbols
            .into_iter()
            .filter_map(|symbol| {
                if verbose {
                    log::info!("{symbol:?}");
                }
                match SymbolType::from_symbol_name(&symbol.type_name) {
                    Some(sym) if scan_for.has(sym) => Some(Barcode {
                        barcode_type: sym,
                        value: symbol.raw_value,
                    }),
                    Some(_) => None,
                    None => {
                        log::warn!("decoder reported unknown symbology {}", symbol.type_name);
                        None
                    }
                }
            })
            .collect();

        if barcodes.is_empty() {
            ScanOutcome::NotFound
        } else {
            ScanOutcome::Found(ScanResult { barcodes })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_guard() {
        let flag = Cell::new(false);
        {
            let guard = BusyGuard::acquire(&flag);
            assert!(guard.is_some());
            assert!(flag.get());
            assert!(BusyGuard::acquire(&flag).is_none());
        }
        assert!(!flag.get());
        assert!(BusyGuard::acquire(&flag).is_some());
    }
}
