use crate::error::Result;
use crate::pixel_grid::{DetailImage, Dimensions, PixelGrid};

/// An 8-bit grayscale image with its declared maximum intensity.
///
/// Photos are value snapshots: narrowing detail values back to intensities
/// yields a new `Photo` rather than mutating an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    /// Intensity samples, one byte per pixel.
    pixels: PixelGrid<u8>,

    /// The declared maximum intensity. Always 255 for decoded 8-bit input.
    max_value: u8,
}

impl Photo {
    pub const DEFAULT_MAX_VALUE: u8 = u8::MAX;

    /// Wraps a grid of intensities with the default maximum value of 255.
    pub fn new(pixels: PixelGrid<u8>) -> Self {
        Self {
            pixels,
            max_value: Self::DEFAULT_MAX_VALUE,
        }
    }

    /// Builds a photo from a row-major intensity buffer.
    ///
    /// # Parameters
    /// - `width`, `height`: The image dimensions.
    /// - `data`: `width * height` intensities, row by row.
    ///
    /// # Returns
    /// An error if the buffer length does not match the dimensions.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        Ok(Self::new(PixelGrid::from_vec(width, height, data)?))
    }

    /// Narrows a signed grid to a photo, clamping every value into `[0, max_value]`.
    pub fn from_detail_clamped(detail: &DetailImage, max_value: u8) -> Self {
        let max = i32::from(max_value);
        Self {
            pixels: detail.map(|v| v.clamp(0, max) as u8),
            max_value,
        }
    }

    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.pixels.dimensions()
    }

    pub fn max_value(&self) -> u8 {
        self.max_value
    }

    /// Intensity at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels.get(x, y)
    }

    pub fn pixels(&self) -> &PixelGrid<u8> {
        &self.pixels
    }
}
