//! IndexedImage: palette indices plus the palette they refer into.
//!
//! [`IndexedImage`] is the output of every dithering entry point. The
//! indexed form is canonical; RGB renderings are computed on demand by
//! looking up palette colors.

use std::borrow::Cow;

use super::raster::pixel_count;
use super::{Raster, RgbImage};
use crate::color::{ColorSpace, Rgb};
use crate::error::DitherError;
use crate::palette::Palette;

/// Largest palette a `u8` index can address.
pub const MAX_INDEXED_COLORS: usize = 256;

/// One `u8` palette index per pixel in row-major order, the image
/// dimensions, and the owned [`Palette`].
///
/// ```
/// use indexed_dither::{IndexedImage, Palette, Rgb};
///
/// let palette = Palette::new(vec![Rgb::BLACK, Rgb::WHITE]);
/// let image = IndexedImage::new(vec![0, 1, 1, 0], 2, 2, palette).unwrap();
///
/// assert_eq!(image.index(1, 0), 1);
/// assert_eq!(image.to_rgb_bytes().unwrap().len(), 2 * 2 * 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    indices: Vec<u8>,
    width: usize,
    height: usize,
    palette: Palette,
}

impl IndexedImage {
    /// Create an indexed image from existing indices.
    ///
    /// # Errors
    ///
    /// - [`DitherError::PixelCountMismatch`] if `indices.len() != width * height`
    /// - [`DitherError::PaletteTooLarge`] if the palette exceeds 256 entries
    /// - [`DitherError::IndexOutOfRange`] if an index is not in `0..palette.len()`
    pub fn new(
        indices: Vec<u8>,
        width: usize,
        height: usize,
        palette: Palette,
    ) -> Result<Self, DitherError> {
        check_palette_size(&palette)?;
        let expected = pixel_count(width, height)?;
        if indices.len() != expected {
            return Err(DitherError::PixelCountMismatch {
                expected,
                actual: indices.len(),
            });
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= palette.len()) {
            return Err(DitherError::IndexOutOfRange {
                index,
                len: palette.len(),
            });
        }
        Ok(Self {
            indices,
            width,
            height,
            palette,
        })
    }

    /// Allocate an all-zero index buffer, e.g. as preallocated dither output.
    ///
    /// Allocation failure is reported as [`DitherError::AllocationFailed`].
    /// A non-empty image needs a non-empty palette for index 0 to be valid.
    pub fn blank(width: usize, height: usize, palette: Palette) -> Result<Self, DitherError> {
        check_palette_size(&palette)?;
        let len = pixel_count(width, height)?;
        if len > 0 && palette.is_empty() {
            return Err(DitherError::EmptyPalette);
        }
        let mut indices = Vec::new();
        indices.try_reserve_exact(len)?;
        indices.resize(len, 0);
        Ok(Self {
            indices,
            width,
            height,
            palette,
        })
    }

    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub(crate) fn indices_mut(&mut self) -> &mut [u8] {
        &mut self.indices
    }

    /// Palette index at `(x, y)`. Panics if out of bounds.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.indices[y * self.width + x]
    }

    /// Set the palette index at `(x, y)`. Panics if the pixel is out of bounds.
    ///
    /// Returns [`DitherError::IndexOutOfRange`] and leaves the image
    /// untouched if `index` does not address a palette entry.
    pub fn set_index(&mut self, x: usize, y: usize, index: u8) -> Result<(), DitherError> {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        if index as usize >= self.palette.len() {
            return Err(DitherError::IndexOutOfRange {
                index,
                len: self.palette.len(),
            });
        }
        self.indices[y * self.width + x] = index;
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub(crate) fn replace_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn into_parts(self) -> (Vec<u8>, Palette) {
        (self.indices, self.palette)
    }

    /// Convert the palette entries into `space`; indices are untouched.
    pub fn convert_palette_to_space(&mut self, space: ColorSpace) {
        self.palette = self.palette.to_space(space);
    }

    /// Convert the palette entries back from `space`; indices are untouched.
    pub fn convert_palette_from_space(&mut self, space: ColorSpace) {
        self.palette = self.palette.from_space(space);
    }

    /// Render to interleaved `[R, G, B, R, G, B, ...]` bytes.
    ///
    /// The returned buffer has length `width * height * 3`.
    pub fn to_rgb_bytes(&self) -> Result<Vec<u8>, DitherError> {
        let len = self
            .indices
            .len()
            .checked_mul(3)
            .ok_or(DitherError::AllocationFailed)?;
        let mut rgb = Vec::new();
        rgb.try_reserve_exact(len)?;
        for &idx in &self.indices {
            rgb.extend_from_slice(&self.palette.color(idx as usize).to_bytes());
        }
        Ok(rgb)
    }

    /// Render to a direct-color image.
    pub fn to_rgb_image(&self) -> Result<RgbImage, DitherError> {
        RgbImage::from_pixels(self.width, self.height, self.pixels()?.into_owned())
    }
}

fn check_palette_size(palette: &Palette) -> Result<(), DitherError> {
    if palette.len() > MAX_INDEXED_COLORS {
        return Err(DitherError::PaletteTooLarge {
            len: palette.len(),
            max: MAX_INDEXED_COLORS,
        });
    }
    Ok(())
}

impl Raster for IndexedImage {
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
        self.palette.color(self.index(x, y) as usize)
    }

    fn palette(&self) -> Option<&Palette> {
        Some(&self.palette)
    }

    fn indices(&self) -> Option<&[u8]> {
        Some(&self.indices)
    }

    fn pixels(&self) -> Result<Cow<'_, [Rgb]>, DitherError> {
        let mut out = Vec::new();
        out.try_reserve_exact(self.indices.len())?;
        out.extend(self.indices.iter().map(|&i| self.palette.color(i as usize)));
        Ok(Cow::Owned(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bw() -> Palette {
        Palette::new(vec![Rgb::BLACK, Rgb::WHITE])
    }

    #[test]
    fn test_new_checks_length() {
        let err = IndexedImage::new(vec![0, 1, 0], 2, 2, bw()).unwrap_err();
        assert_eq!(
            err,
            DitherError::PixelCountMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_new_rejects_oversized_palette() {
        let palette: Palette = (0..=256u32).map(Rgb::from_packed).collect();
        let err = IndexedImage::new(vec![0], 1, 1, palette).unwrap_err();
        assert_eq!(err, DitherError::PaletteTooLarge { len: 257, max: 256 });
    }

    #[test]
    fn test_new_rejects_index_past_palette() {
        let err = IndexedImage::new(vec![0, 5], 2, 1, bw()).unwrap_err();
        assert_eq!(err, DitherError::IndexOutOfRange { index: 5, len: 2 });
        assert_eq!(err.to_string(), "index 5 out of range for palette of 2 colors");

        let err = IndexedImage::new(vec![2], 1, 1, bw()).unwrap_err();
        assert_eq!(err, DitherError::IndexOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn test_set_index_checks_palette_range() {
        let mut image = IndexedImage::blank(2, 1, bw()).unwrap();
        image.set_index(1, 0, 1).unwrap();
        assert_eq!(image.indices(), &[0, 1]);

        let err = image.set_index(0, 0, 2).unwrap_err();
        assert_eq!(err, DitherError::IndexOutOfRange { index: 2, len: 2 });
        assert_eq!(image.indices(), &[0, 1]);
    }

    #[test]
    #[should_panic(expected = "pixel out of bounds")]
    fn test_set_index_panics_outside_image() {
        let mut image = IndexedImage::blank(2, 1, bw()).unwrap();
        let _ = image.set_index(2, 0, 0);
    }

    #[test]
    fn test_blank_is_zeroed() {
        let image = IndexedImage::blank(3, 2, bw()).unwrap();
        assert_eq!(image.indices(), &[0; 6]);
        assert_eq!(
            IndexedImage::blank(3, 2, Palette::new(Vec::new())).unwrap_err(),
            DitherError::EmptyPalette
        );
    }

    #[test]
    fn test_rgb_rendering() {
        let image = IndexedImage::new(vec![1, 0], 2, 1, bw()).unwrap();
        assert_eq!(image.to_rgb_bytes().unwrap(), vec![255, 255, 255, 0, 0, 0]);
        let rgb = image.to_rgb_image().unwrap();
        assert_eq!(rgb.as_slice(), &[Rgb::WHITE, Rgb::BLACK]);
    }

    #[test]
    fn test_raster_view() {
        let image = IndexedImage::new(vec![0, 1, 1, 0], 2, 2, bw()).unwrap();
        assert_eq!(image.pixel(0, 1), Rgb::WHITE);
        assert_eq!(Raster::palette(&image), Some(&bw()));
        assert_eq!(Raster::indices(&image), Some(&[0u8, 1, 1, 0][..]));
        assert_eq!(image.pixels().unwrap().len(), 4);
    }

    #[test]
    fn test_palette_space_conversion_keeps_indices() {
        let mut image = IndexedImage::new(vec![1, 0], 2, 1, bw()).unwrap();
        image.convert_palette_to_space(ColorSpace::Hsv);
        assert_eq!(image.palette().color(1), Rgb::new(0, 0, 255));
        image.convert_palette_from_space(ColorSpace::Hsv);
        assert_eq!(image.palette(), &bw());
        assert_eq!(image.indices(), &[1, 0]);
    }
}
