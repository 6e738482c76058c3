//! Still image scanning surface

use crate::config::ScannerOptions;
use crate::image::Image;
use crate::interop::SymbolDecoder;
use crate::scanner::Scanner;
use crate::symbol::ScanOutcome;
use crate::{Error, Result};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Scans images loaded from encoded bytes (files, uploads, streams).
pub struct ImageScanner<D: SymbolDecoder> {
    scanner: Scanner<D>,
    image: RefCell<Option<Rc<Image>>>,
    auto_scan: Cell<bool>,
}

impl<D: SymbolDecoder> ImageScanner<D> {
    pub fn new(decoder: D, options: ScannerOptions) -> Self {
        ImageScanner {
            scanner: Scanner::new(decoder, options),
            image: RefCell::new(None),
            auto_scan: Cell::new(true),
        }
    }

    /// The configuration and decoder instance behind this surface.
    pub fn scanner(&self) -> &Scanner<D> {
        &self.scanner
    }

    pub fn auto_scan(&self) -> bool {
        self.auto_scan.get()
    }

    /// Scan each image as soon as it is loaded.
    pub fn set_auto_scan(&self, enabled: bool) {
        self.auto_scan.set(enabled);
    }

    /// The most recently loaded image.
    pub fn image(&self) -> Option<Rc<Image>> {
        self.image.borrow().clone()
    }

    /// Create the decoder instance.
    pub async fn open(&self) -> Result<()> {
        self.scanner.open().await
    }

    /// Release the decoder instance and the loaded image.
    pub async fn close(&self) -> Result<()> {
        self.image.borrow_mut().take();
        self.scanner.close().await
    }

    /// Decode and keep an image.
    ///
    /// With auto-scan on the image is scanned right away and the outcome
    /// returned; otherwise `None`. A source that is not a readable image
    /// fails with [`Error::ImageLoad`] and leaves the previous image in place.
    pub async fn load_from_bytes(&self, bytes: &[u8]) -> Result<Option<ScanOutcome>> {
        let image = match Image::from_encoded(bytes) {
            Ok(image) => Rc::new(image),
            Err(e) => {
                log::warn!("image load failed: {e}");
                return Err(e);
            }
        };

        log::debug!("loaded {}x{} image", image.width(), image.height());
        *self.image.borrow_mut() = Some(image);

        if self.auto_scan.get() {
            self.scan().await.map(Some)
        } else {
            Ok(None)
        }
    }

    /// Scan the loaded image.
    pub async fn scan(&self) -> Result<ScanOutcome> {
        let image = self
            .image()
            .ok_or_else(|| Error::ImageLoad("no image loaded".to_string()))?;
        self.scanner.scan(&image).await
    }
}
