//! Atkinson error diffusion dithering algorithm.
//!
//! Atkinson dithering propagates only 75% of the quantization error,
//! which gives higher contrast and keeps highlights and shadows clean.

use crate::color::Rgb;
use crate::error::DitherError;
use crate::palette::Palette;

use super::{dither_with_kernel, Dither, DitherOptions, ATKINSON};

/// Atkinson error diffusion dithering.
///
/// Originally developed by Bill Atkinson for the Apple Macintosh.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
///
/// Each of the 6 neighbors receives 1/8 of the error; the remaining 2/8 is
/// discarded. The small-palette error reduction of the other kernels does
/// not apply.
pub struct Atkinson;

impl Dither for Atkinson {
    fn dither_into(
        &self,
        pixels: &[Rgb],
        width: usize,
        height: usize,
        palette: &Palette,
        options: &DitherOptions,
        out: &mut [u8],
    ) -> Result<(), DitherError> {
        dither_with_kernel(pixels, width, height, palette, &ATKINSON, options, out)
    }
}
