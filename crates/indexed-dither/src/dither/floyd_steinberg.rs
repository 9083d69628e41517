//! Floyd-Steinberg error diffusion dithering algorithm.

use crate::color::Rgb;
use crate::error::DitherError;
use crate::palette::Palette;

use super::{dither_with_kernel, Dither, DitherOptions, FLOYD_STEINBERG};

/// Floyd-Steinberg error diffusion dithering.
///
/// The classic error diffusion algorithm, distributing 100% of quantization
/// error to 4 neighboring pixels.
///
/// ```text
///        X   7
///    3   5   1
/// ```
///
/// Weights: 7/16 right, 3/16 bottom-left, 5/16 bottom, 1/16 bottom-right.
/// With fewer than 64 palette colors only 3/4 of the pending error feeds
/// into each match decision, which keeps small palettes from "worming".
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither_into(
        &self,
        pixels: &[Rgb],
        width: usize,
        height: usize,
        palette: &Palette,
        options: &DitherOptions,
        out: &mut [u8],
    ) -> Result<(), DitherError> {
        dither_with_kernel(pixels, width, height, palette, &FLOYD_STEINBERG, options, out)
    }
}
