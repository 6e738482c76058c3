//! Error types and handling
//!
//! The configuration core never fails; these errors come from the
//! collaborators around it (camera, image loading, the decoder).

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The user refused camera access
    PermissionDenied,
    /// The camera could not be started or read
    Camera(String),
    /// An image source could not be loaded or interpreted as image data
    ImageLoad(String),
    /// Image buffer does not match its dimensions
    Invalid,
    /// The decoder instance could not be created
    DecoderCreation(String),
    /// The decoder failed while scanning an image
    Decode(String),
    /// A decoder instance already exists for this surface
    ScannerExists,
    /// No decoder instance is open for this surface
    NoScanner,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "camera permission denied"),
            Self::Camera(msg) => write!(f, "camera error: {msg}"),
            Self::ImageLoad(msg) => write!(f, "failed to load image: {msg}"),
            Self::Invalid => write!(f, "invalid image buffer"),
            Self::DecoderCreation(msg) => write!(f, "failed to create scanner: {msg}"),
            Self::Decode(msg) => write!(f, "failed to scan image: {msg}"),
            Self::ScannerExists => write!(f, "a scanner already exists for this surface"),
            Self::NoScanner => write!(f, "no scanner is open for this surface"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T, E = Error> = std::result::Result<T, E>;
