//! Collaborator interfaces
//!
//! The decoder and the camera live outside this crate (zbar compiled to
//! WebAssembly and the browser's media APIs). Scanning surfaces talk to them
//! only through these traits, so they can be driven by in-memory fakes.

// Futures are polled on a single-threaded host, so no `Send` bound is wanted.
#![allow(async_fn_in_trait)]

use crate::Result;
use crate::camera::CameraViewType;
use crate::config::ConfigType;
use crate::image::Image;
use crate::symbol::Symbol;

/// A camera device available to the host.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct HardwareDevice {
    pub id: String,
    pub name: String,
}

/// Parameters for starting a camera feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSettings {
    /// Device to capture from; `None` selects the system default.
    pub device_id: Option<String>,

    /// Milliseconds between frames offered for scanning.
    pub interval_ms: u32,

    /// What the capture surface renders while the feed runs.
    pub view_type: CameraViewType,
}

/// The barcode decoder.
pub trait SymbolDecoder {
    /// A decoder instance holding its own configuration.
    type Handle: Clone;

    /// Create a decoder instance.
    async fn create_scanner(&self) -> Result<Self::Handle>;

    /// Apply a single configuration value. Returns whether the decoder
    /// accepted it.
    async fn set_config(
        &self,
        scanner: &Self::Handle,
        symbol_type: &str,
        config_type: ConfigType,
        value: i32,
    ) -> Result<bool>;

    /// Scan `image` using the configuration of `scanner`.
    async fn decode(&self, scanner: &Self::Handle, image: &Image) -> Result<Vec<Symbol>>;

    /// Release a decoder instance.
    async fn destroy(&self, scanner: Self::Handle) -> Result<()>;
}

/// A camera feed.
pub trait VideoCapture {
    /// List camera devices. May prompt the user for camera permission.
    async fn available_devices(&self) -> Result<Vec<HardwareDevice>>;

    /// Start capturing. May prompt the user for camera permission.
    async fn start_feed(&self, settings: &FeedSettings) -> Result<()>;

    /// Stop capturing and release the device.
    async fn stop_feed(&self) -> Result<()>;

    /// Grab the current frame.
    async fn capture_frame(&self) -> Result<Image>;

    /// Change the frame interval of a running feed.
    async fn set_interval(&self, interval_ms: u32) -> Result<()>;
}
