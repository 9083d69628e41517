//! Burkes error diffusion dithering algorithm.

use crate::color::Rgb;
use crate::error::DitherError;
use crate::palette::Palette;

use super::{dither_with_kernel, Dither, DitherOptions, BURKES};

/// Burkes error diffusion dithering.
///
/// Distributes 100% of quantization error to 7 neighbors over 2 rows.
///
/// ```text
///            X   8   4
///    2   4   8   4   2
/// ```
pub struct Burkes;

impl Dither for Burkes {
    fn dither_into(
        &self,
        pixels: &[Rgb],
        width: usize,
        height: usize,
        palette: &Palette,
        options: &DitherOptions,
        out: &mut [u8],
    ) -> Result<(), DitherError> {
        dither_with_kernel(pixels, width, height, palette, &BURKES, options, out)
    }
}
