//! Test images.

use palquant::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 2x2 image of four distinct colors.
pub fn four_colors() -> RgbImage {
    RgbImage::from_pixels(
        2,
        2,
        vec![
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(255, 255, 255),
        ],
    )
    .unwrap()
}

/// `width x 1` image of one color.
pub fn solid(width: usize, color: Rgb) -> RgbImage {
    RgbImage::from_fn(width, 1, |_, _| color).unwrap()
}

/// 256x1 gray ramp, value = x.
pub fn gray_ramp() -> RgbImage {
    RgbImage::from_fn(256, 1, |x, _| Rgb::gray(x as u8)).unwrap()
}

/// One-row image whose histogram is exactly `counts`, in that order.
pub fn from_histogram(counts: &[(Rgb, usize)]) -> RgbImage {
    let pixels: Vec<Rgb> = counts
        .iter()
        .flat_map(|&(color, n)| std::iter::repeat(color).take(n))
        .collect();
    RgbImage::from_pixels(pixels.len(), 1, pixels).unwrap()
}

/// Random image drawing from `distinct` random colors, deterministic per seed.
pub fn random_image(width: usize, height: usize, distinct: usize, seed: u64) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let colors: Vec<Rgb> = (0..distinct)
        .map(|_| Rgb::new(rng.gen(), rng.gen(), rng.gen()))
        .collect();
    RgbImage::from_fn(width, height, |_, _| colors[rng.gen_range(0..colors.len())]).unwrap()
}

/// Smooth two-axis gradient with many distinct colors.
pub fn gradient(width: usize, height: usize) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb::new(
            (x * 255 / width.saturating_sub(1).max(1)) as u8,
            (y * 255 / height.saturating_sub(1).max(1)) as u8,
            ((x + y) * 4 % 256) as u8,
        )
    })
    .unwrap()
}
