//! Grayscale frames handed to the decoder

use crate::{Error, Result};

/// An 8-bit grayscale image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Image {
    /// Create an image from grayscale data
    pub fn from_gray(data: impl Into<Vec<u8>>, width: u32, height: u32) -> Result<Self> {
        let data = data.into();
        if (data.len() as u64) != (width as u64) * (height as u64) {
            return Err(Error::Invalid);
        }

        Ok(Image {
            width,
            height,
            data,
        })
    }

    /// Decode an encoded image (PNG, JPEG, ...) and convert it to grayscale.
    pub fn from_encoded(bytes: &[u8]) -> Result<Self> {
        let img = ::image::load_from_memory(bytes).map_err(|e| Error::ImageLoad(e.to_string()))?;
        let gray = img.to_luma8();
        let (width, height) = gray.dimensions();
        Ok(Image {
            width,
            height,
            data: gray.into_raw(),
        })
    }

    /// Get the image width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get access to the raw image data
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
