//! Direct nearest-color mapping without error diffusion.

use crate::color::Rgb;
use crate::error::DitherError;
use crate::palette::Palette;

use super::{Dither, DitherOptions};

/// Maps every pixel to its nearest palette color independently.
///
/// No error is carried between pixels, so the result is the pointwise
/// optimum but shows banding on gradients.
pub struct Nearest;

impl Dither for Nearest {
    fn dither_into(
        &self,
        pixels: &[Rgb],
        _width: usize,
        _height: usize,
        palette: &Palette,
        _options: &DitherOptions,
        out: &mut [u8],
    ) -> Result<(), DitherError> {
        for (dst, &pixel) in out.iter_mut().zip(pixels) {
            *dst = palette.nearest(pixel).0 as u8;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::RgbImage;

    #[test]
    fn test_nearest_maps_each_pixel_independently() {
        let palette = Palette::new(vec![Rgb::BLACK, Rgb::gray(128), Rgb::WHITE]);
        let image = RgbImage::from_pixels(
            4,
            1,
            vec![Rgb::gray(10), Rgb::gray(100), Rgb::gray(200), Rgb::gray(250)],
        )
        .unwrap();
        let result = Nearest
            .dither(&image, &palette, None, &DitherOptions::new())
            .unwrap();
        assert_eq!(result.indices(), &[0, 1, 2, 2]);
    }

    #[test]
    fn test_nearest_uniform_input_uniform_output() {
        let palette = Palette::new(vec![Rgb::BLACK, Rgb::WHITE]);
        let image = RgbImage::from_fn(5, 5, |_, _| Rgb::gray(100)).unwrap();
        let result = Nearest
            .dither(&image, &palette, None, &DitherOptions::new())
            .unwrap();
        assert!(result.indices().iter().all(|&i| i == 0));
    }
}
