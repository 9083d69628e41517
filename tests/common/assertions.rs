//! Assertion helpers for tests.

use palquant::{IndexedImage, Raster, RgbImage};
use pretty_assertions::assert_eq;

/// Assert the output has the source's dimensions and only valid indices.
pub fn assert_well_formed(out: &IndexedImage, source: &RgbImage) {
    assert_eq!(
        (out.width(), out.height()),
        (source.width(), source.height()),
        "Output dimensions differ from source"
    );
    let len = out.palette().len();
    if let Some(bad) = out.indices().iter().find(|&&i| i as usize >= len) {
        panic!("Index {bad} out of range for palette of {len} colors");
    }
}

/// Assert every output pixel renders as exactly its source color.
pub fn assert_exact_mapping(out: &IndexedImage, source: &RgbImage) {
    assert_eq!(out.to_rgb_image().unwrap().as_slice(), source.as_slice());
}

/// Mean squared red-channel error after averaging both images over a
/// `2 * radius + 1` window (clipped at the edges), for one-row gray images.
pub fn local_mean_sq_error(out: &IndexedImage, source: &RgbImage, radius: usize) -> f64 {
    let width = source.width();
    let rendered = out.to_rgb_image().unwrap();
    let mut total = 0.0;
    for x in 0..width {
        let lo = x.saturating_sub(radius);
        let hi = (x + radius).min(width - 1);
        let n = (hi - lo + 1) as f64;
        let got: f64 = (lo..=hi).map(|k| rendered.pixel(k, 0).r as f64).sum::<f64>() / n;
        let want: f64 = (lo..=hi).map(|k| source.pixel(k, 0).r as f64).sum::<f64>() / n;
        total += (got - want) * (got - want);
    }
    total / width as f64
}
