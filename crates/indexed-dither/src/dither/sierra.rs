//! Sierra error diffusion dithering algorithm.

use crate::color::Rgb;
use crate::error::DitherError;
use crate::palette::Palette;

use super::{dither_with_kernel, Dither, DitherOptions, SIERRA};

/// Sierra (full) error diffusion dithering.
///
/// Also known as Sierra-3, this algorithm distributes 100% of quantization
/// error to 10 neighbors over 3 rows.
///
/// ```text
///            X   5   3
///    2   4   5   4   2
///        2   3   2
/// ```
///
/// Total: 32/32. Requires a 3-row error buffer.
pub struct Sierra;

impl Dither for Sierra {
    fn dither_into(
        &self,
        pixels: &[Rgb],
        width: usize,
        height: usize,
        palette: &Palette,
        options: &DitherOptions,
        out: &mut [u8],
    ) -> Result<(), DitherError> {
        dither_with_kernel(pixels, width, height, palette, &SIERRA, options, out)
    }
}
