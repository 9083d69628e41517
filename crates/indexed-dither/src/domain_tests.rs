//! Domain-critical regression tests for indexed-dither.
//!
//! These tests are designed to catch specific classes of bugs, not just
//! confirm happy paths. Each test documents the regression it guards against.

#[cfg(test)]
mod domain_tests {
    use crate::color::{ColorSpace, Rgb};
    use crate::dither::{
        Atkinson, Burkes, Dither, DitherAlgorithm, DitherOptions, ErrorBuffer, FloydSteinberg,
        Sierra, ATKINSON, BURKES, FLOYD_STEINBERG, SIERRA,
    };
    use crate::image::{IndexedImage, Raster, RgbImage};
    use crate::palette::Palette;
    use pretty_assertions::assert_eq;

    fn bw() -> Palette {
        Palette::new(vec![Rgb::BLACK, Rgb::WHITE])
    }

    // ========================================================================
    // Sweep order
    // ========================================================================

    /// If this breaks, it means: the reverse rows of the serpentine scan are
    /// no longer mirroring the kernel, so error is pushed onto pixels that
    /// were already decided and lost. A right-to-left row must come out as
    /// the mirror image of the same row scanned left-to-right.
    #[test]
    fn test_reverse_rows_mirror_the_kernel() {
        // Row 0 is exact (no error), row 1 is a ramp.
        let image = RgbImage::from_fn(12, 2, |x, y| {
            if y == 0 {
                Rgb::BLACK
            } else {
                Rgb::gray(x as u8 * 20)
            }
        })
        .unwrap();
        let mirrored = RgbImage::from_fn(12, 1, |x, _| Rgb::gray((11 - x) as u8 * 20)).unwrap();
        let cases: [(&str, &dyn Dither); 4] = [
            ("floyd_steinberg", &FloydSteinberg),
            ("sierra", &Sierra),
            ("burkes", &Burkes),
            ("atkinson", &Atkinson),
        ];
        for (kernel_name, ditherer) in cases {
            let options = DitherOptions::new();
            let mut two_rows = vec![0u8; 24];
            ditherer
                .dither_into(
                    &image.pixels().unwrap(),
                    12,
                    2,
                    &bw(),
                    &options,
                    &mut two_rows,
                )
                .unwrap();
            let mut one_row = vec![0u8; 12];
            ditherer
                .dither_into(&mirrored.pixels().unwrap(), 12, 1, &bw(), &options, &mut one_row)
                .unwrap();
            let row1: Vec<u8> = two_rows[12..].iter().rev().copied().collect();
            assert_eq!(row1, one_row, "{kernel_name}: reverse row is not a mirror");
        }
    }

    /// If this breaks, it means: a tap offset was flipped or dropped. The
    /// exact pending error after a single non-zero residual must land on
    /// the kernel's positions with the kernel's weights.
    #[test]
    fn test_single_residual_lands_on_kernel_taps() {
        for kernel in [FLOYD_STEINBERG, SIERRA, BURKES, ATKINSON] {
            let mut buf = ErrorBuffer::new(8, 8, kernel.max_dy + 1).unwrap();
            for &(dx, dy, w) in kernel.entries {
                buf.diffuse(3 + dx, dy, [1, 0, 0], w);
            }
            let mut total = 0;
            for _ in 0..=kernel.max_dy {
                for x in 0..8 {
                    total += buf.get_accumulated(x)[0];
                }
                buf.advance_row();
            }
            assert_eq!(total as u32, kernel.weight_sum());
        }
    }

    // ========================================================================
    // Fixed-point error accounting
    // ========================================================================

    /// If this breaks, it means: residual error is computed against the
    /// original pixel instead of the error-adjusted candidate, or the
    /// fixed-point scale is wrong, so a flat field no longer averages to
    /// its input level under full propagation.
    #[test]
    fn test_full_propagation_preserves_mean_level() {
        let palette: Palette = (0..64).map(|i| Rgb::gray(i * 4)).collect();
        for (name, algorithm) in [
            ("floyd_steinberg", DitherAlgorithm::FloydSteinberg),
            ("sierra", DitherAlgorithm::Sierra),
            ("burkes", DitherAlgorithm::Burkes),
        ] {
            let image = RgbImage::from_fn(32, 32, |_, _| Rgb::gray(101)).unwrap();
            let out = algorithm
                .apply(&image, &palette, None, &DitherOptions::new())
                .unwrap();
            let mean = out
                .indices()
                .iter()
                .map(|&i| palette.color(i as usize).r as f64)
                .sum::<f64>()
                / 1024.0;
            assert!((mean - 101.0).abs() < 0.5, "{name}: mean {mean}");
        }
    }

    /// If this breaks, it means: accumulated error pushed a channel outside
    /// [0, 255] and it wrapped instead of clamping, turning a dark pixel
    /// next to a bright one into white (or vice versa).
    #[test]
    fn test_extreme_error_does_not_wrap() {
        let palette = Palette::new(vec![Rgb::BLACK, Rgb::gray(250)]);
        let image = RgbImage::from_fn(16, 4, |x, _| if x % 2 == 0 { Rgb::WHITE } else { Rgb::BLACK }).unwrap();
        for algorithm in DitherAlgorithm::ALL {
            let out = algorithm
                .apply(&image, &palette, None, &DitherOptions::new())
                .unwrap();
            assert!(
                out.indices().iter().all(|&i| i < 2),
                "{algorithm}: invalid index"
            );
        }
    }

    // ========================================================================
    // Palette handling
    // ========================================================================

    /// If this breaks, it means: the output image shares or forgets the
    /// palette it was dithered against, so rendering it back produces
    /// colors from a different palette.
    #[test]
    fn test_output_renders_with_dither_palette() {
        let palette = Palette::new(vec![Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)]);
        let image = RgbImage::from_fn(4, 1, |x, _| if x < 2 { Rgb::new(200, 0, 0) } else { Rgb::new(0, 0, 200) }).unwrap();
        let out = DitherAlgorithm::None
            .apply(&image, &palette, None, &DitherOptions::new())
            .unwrap();
        assert_eq!(
            out.to_rgb_image().unwrap().as_slice(),
            &[
                Rgb::new(255, 0, 0),
                Rgb::new(255, 0, 0),
                Rgb::new(0, 0, 255),
                Rgb::new(0, 0, 255)
            ]
        );
    }

    /// If this breaks, it means: an indexed source image is read through
    /// its indices instead of its colors.
    #[test]
    fn test_indexed_source_is_read_as_colors() {
        let source_palette = Palette::new(vec![Rgb::WHITE, Rgb::BLACK]);
        let source = IndexedImage::new(vec![0, 1, 0, 1], 4, 1, source_palette).unwrap();
        let out = DitherAlgorithm::None
            .apply(&source, &bw(), None, &DitherOptions::new())
            .unwrap();
        assert_eq!(out.indices(), &[1, 0, 1, 0]);
    }

    /// If this breaks, it means: matching in an alternate space no longer
    /// round-trips the palette, so re-dithering a converted image against
    /// its converted palette picks different entries.
    #[test]
    fn test_matching_in_converted_space_keeps_exact_matches() {
        let palette = Palette::new(vec![
            Rgb::new(200, 30, 30),
            Rgb::new(30, 200, 30),
            Rgb::new(30, 30, 200),
        ]);
        let image = RgbImage::from_fn(3, 3, |x, _| palette.color(x)).unwrap();
        for space in ColorSpace::ALL {
            let space_palette = palette.to_space(space);
            let mut converted = image.clone();
            converted.convert_to_space(space);
            let out = DitherAlgorithm::FloydSteinberg
                .apply(&converted, &space_palette, None, &DitherOptions::new())
                .unwrap();
            assert_eq!(out.indices(), &[0, 1, 2, 0, 1, 2, 0, 1, 2], "{space}");
        }
    }
}
