//! Camera scanning surface

use crate::Result;
use crate::config::ScannerOptions;
use crate::interop::{FeedSettings, HardwareDevice, SymbolDecoder, VideoCapture};
use crate::scanner::Scanner;
use crate::symbol::ScanOutcome;
use std::cell::Cell;

/// Default milliseconds between automatic scans.
pub const DEFAULT_SCAN_INTERVAL_MS: u32 = 1000;

/// What the camera surface displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraViewType {
    /// No video output.
    None,
    /// The direct feed from the video source.
    #[default]
    VideoFeed,
    /// The individual frames captured at each scan interval.
    ScannerFeed,
}

/// Scans frames from a camera feed, either on demand or on every tick of
/// the feed's interval timer.
pub struct CameraScanner<V: VideoCapture, D: SymbolDecoder> {
    capture: V,
    scanner: Scanner<D>,
    auto_scan: Cell<bool>,
    scan_interval: Cell<u32>,
    view_type: Cell<CameraViewType>,
    running: Cell<bool>,
}

impl<V: VideoCapture, D: SymbolDecoder> CameraScanner<V, D> {
    pub fn new(capture: V, decoder: D, options: ScannerOptions) -> Self {
        CameraScanner {
            capture,
            scanner: Scanner::new(decoder, options),
            auto_scan: Cell::new(true),
            scan_interval: Cell::new(DEFAULT_SCAN_INTERVAL_MS),
            view_type: Cell::new(CameraViewType::default()),
            running: Cell::new(false),
        }
    }

    pub fn capture(&self) -> &V {
        &self.capture
    }

    /// The configuration and decoder instance behind this surface.
    pub fn scanner(&self) -> &Scanner<D> {
        &self.scanner
    }

    /// Whether a video feed is running.
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn auto_scan(&self) -> bool {
        self.auto_scan.get()
    }

    /// Scan automatically on every tick of a running feed.
    pub fn set_auto_scan(&self, enabled: bool) {
        self.auto_scan.set(enabled);
    }

    pub fn scan_interval(&self) -> u32 {
        self.scan_interval.get()
    }

    /// Change the interval between automatic scans.
    pub async fn set_scan_interval(&self, interval_ms: u32) -> Result<()> {
        self.scan_interval.set(interval_ms);
        if self.running.get() {
            self.capture.set_interval(interval_ms).await?;
        }
        Ok(())
    }

    pub fn set_verbose(&self, verbose: bool) {
        self.scanner.set_verbose(verbose);
    }

    pub fn view_type(&self) -> CameraViewType {
        self.view_type.get()
    }

    /// Change what the capture surface renders. Takes effect when the next
    /// feed starts.
    pub fn set_view_type(&self, view_type: CameraViewType) {
        self.view_type.set(view_type);
    }

    /// List the camera devices currently available.
    ///
    /// May prompt the user for camera permission.
    pub async fn available_devices(&self) -> Result<Vec<HardwareDevice>> {
        self.capture.available_devices().await
    }

    /// Start the camera and begin scanning.
    ///
    /// `device_id` selects the camera; `None` uses the system default. A feed
    /// that is already running is ended first.
    pub async fn start_video_feed(&self, device_id: Option<&str>) -> Result<()> {
        if self.running.get() {
            self.end_video_feed().await?;
        }

        let settings = FeedSettings {
            device_id: device_id.map(str::to_owned),
            interval_ms: self.scan_interval.get(),
            view_type: self.view_type.get(),
        };
        self.capture.start_feed(&settings).await?;

        if let Err(e) = self.scanner.open().await {
            log::warn!("scanner failed to open, stopping feed: {e}");
            let _ = self.capture.stop_feed().await;
            return Err(e);
        }

        self.running.set(true);
        log::debug!(
            "video feed started on {} every {}ms",
            device_id.unwrap_or("default device"),
            settings.interval_ms
        );
        Ok(())
    }

    /// Stop the camera and release the decoder instance.
    pub async fn end_video_feed(&self) -> Result<()> {
        if !self.running.replace(false) {
            return Ok(());
        }

        let stopped = self.capture.stop_feed().await;
        let closed = self.scanner.close().await;
        log::debug!("video feed ended");
        stopped.and(closed)
    }

    /// Capture the current frame and scan it.
    pub async fn scan_once(&self) -> Result<ScanOutcome> {
        let Some(_guard) = self.scanner.begin() else {
            log::debug!("frame skipped, previous scan still pending");
            return Ok(ScanOutcome::Skipped);
        };

        let frame = self.capture.capture_frame().await?;
        self.scanner.decode(&frame).await
    }

    /// Handle one tick of the feed's interval timer.
    ///
    /// Returns [`ScanOutcome::Skipped`] when auto-scan is off, no feed is
    /// running, or the previous scan is still pending.
    pub async fn on_tick(&self) -> Result<ScanOutcome> {
        if !self.auto_scan.get() || !self.running.get() {
            return Ok(ScanOutcome::Skipped);
        }
        self.scan_once().await
    }
}
