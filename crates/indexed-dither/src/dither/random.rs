//! Random dithering between the two nearest palette colors.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::Rgb;
use crate::error::DitherError;
use crate::palette::Palette;

use super::{Dither, DitherOptions};

/// Stochastic dithering with no spatial error propagation.
///
/// For each pixel, find the nearest and second-nearest palette colors at
/// Euclidean distances `e1 <= e2`. An exact match (`e1 == 0`) is used
/// directly; otherwise the second-nearest color is chosen with probability
/// `e1 / (e1 + e2)`. On the segment between the two colors the expected
/// output equals the input.
///
/// The generator is seeded from [`DitherOptions::seed`], so equal seeds give
/// equal output.
pub struct RandomDither;

impl Dither for RandomDither {
    fn dither_into(
        &self,
        pixels: &[Rgb],
        _width: usize,
        _height: usize,
        palette: &Palette,
        options: &DitherOptions,
        out: &mut [u8],
    ) -> Result<(), DitherError> {
        let mut rng = StdRng::seed_from_u64(options.seed);

        for (dst, &pixel) in out.iter_mut().zip(pixels) {
            let ((first, d1), second) = palette.two_nearest(pixel);
            *dst = match second {
                Some((second, d2)) if d1 != 0 => {
                    let e1 = (d1 as f64).sqrt();
                    let e2 = (d2 as f64).sqrt();
                    if rng.gen::<f64>() < e1 / (e1 + e2) {
                        second as u8
                    } else {
                        first as u8
                    }
                }
                _ => first as u8,
            };
        }
        Ok(())
    }
}
