//! Raster access trait and the owned RGB image.

use std::borrow::Cow;

use crate::color::{ColorSpace, Rgb};
use crate::error::DitherError;
use crate::palette::Palette;

/// Read access to a two-dimensional image.
///
/// Implemented by both [`RgbImage`] and
/// [`IndexedImage`](super::IndexedImage), so quantization and dithering
/// accept either. Palette-typed images additionally expose their palette
/// and raw indices.
pub trait Raster {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Color at `(x, y)`. Panics if out of bounds.
    fn pixel(&self, x: usize, y: usize) -> Rgb;

    /// Palette of an indexed image, `None` for direct-color images.
    fn palette(&self) -> Option<&Palette> {
        None
    }

    /// Raw palette indices of an indexed image, row-major.
    fn indices(&self) -> Option<&[u8]> {
        None
    }

    /// All pixels in row-major order.
    ///
    /// Collecting the pixels fails with [`DitherError::AllocationFailed`]
    /// when the buffer cannot be allocated.
    fn pixels(&self) -> Result<Cow<'_, [Rgb]>, DitherError> {
        let mut out = Vec::new();
        out.try_reserve_exact(pixel_count(self.width(), self.height())?)?;
        for y in 0..self.height() {
            for x in 0..self.width() {
                out.push(self.pixel(x, y));
            }
        }
        Ok(Cow::Owned(out))
    }

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// `width * height`, or [`DitherError::AllocationFailed`] on overflow.
pub(crate) fn pixel_count(width: usize, height: usize) -> Result<usize, DitherError> {
    width
        .checked_mul(height)
        .ok_or(DitherError::AllocationFailed)
}

/// An owned direct-color image, row-major.
///
/// ```
/// use indexed_dither::{Raster, Rgb, RgbImage};
///
/// let mut image = RgbImage::new(2, 1).unwrap();
/// image.set_pixel(1, 0, Rgb::WHITE);
/// assert_eq!(image.pixel(0, 0), Rgb::BLACK);
/// assert_eq!(image.pixel(1, 0), Rgb::WHITE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl RgbImage {
    /// Create a black image.
    ///
    /// # Errors
    ///
    /// [`DitherError::AllocationFailed`] if `width * height` overflows or
    /// the buffer cannot be allocated.
    pub fn new(width: usize, height: usize) -> Result<Self, DitherError> {
        let len = pixel_count(width, height)?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len)?;
        pixels.resize(len, Rgb::BLACK);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap an existing row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// [`DitherError::PixelCountMismatch`] if `pixels.len() != width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, DitherError> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(DitherError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from interleaved `[R, G, B, R, G, B, ...]` bytes.
    pub fn from_rgb_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, DitherError> {
        let expected = pixel_count(width, height)?;
        if bytes.len() / 3 != expected || bytes.len() % 3 != 0 {
            return Err(DitherError::PixelCountMismatch {
                expected,
                actual: bytes.len() / 3,
            });
        }
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(expected)?;
        pixels.extend(bytes.chunks_exact(3).map(|p| Rgb::new(p[0], p[1], p[2])));
        Self::from_pixels(width, height, pixels)
    }

    /// Build by evaluating `f(x, y)` for every pixel.
    ///
    /// Fails like [`new`](Self::new) when the buffer cannot be allocated.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> Rgb,
    ) -> Result<Self, DitherError> {
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(pixel_count(width, height)?)?;
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Set the color at `(x, y)`. Panics if out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.pixels[y * self.width + x] = color;
    }

    #[inline]
    pub fn as_slice(&self) -> &[Rgb] {
        &self.pixels
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<Rgb> {
        self.pixels
    }

    /// Convert every pixel into `space` in place.
    pub fn convert_to_space(&mut self, space: ColorSpace) {
        space.convert_slice_to(&mut self.pixels);
    }

    /// Convert every pixel back from `space` in place.
    pub fn convert_from_space(&mut self, space: ColorSpace) {
        space.convert_slice_from(&mut self.pixels);
    }
}

impl Raster for RgbImage {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Rgb {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.pixels[y * self.width + x]
    }

    fn pixels(&self) -> Result<Cow<'_, [Rgb]>, DitherError> {
        Ok(Cow::Borrowed(&self.pixels))
    }
}
