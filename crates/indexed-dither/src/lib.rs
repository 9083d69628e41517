//! indexed-dither: palette matching and error-diffusion dithering
//!
//! This library maps direct-color images onto a fixed palette, producing
//! indexed images. It is the pixel-mapping half of a color quantizer and
//! is usable on its own to re-dither against a hand-built palette.
//!
//! # Quick Start
//!
//! ```
//! use indexed_dither::{DitherAlgorithm, DitherOptions, Palette, Rgb, RgbImage};
//!
//! let palette = Palette::from_hex(&["#000", "#fff"]).unwrap();
//! let image = RgbImage::from_fn(4, 4, |x, _| Rgb::gray(x as u8 * 80)).unwrap();
//!
//! let out = DitherAlgorithm::FloydSteinberg
//!     .apply(&image, &palette, None, &DitherOptions::new())
//!     .unwrap();
//! assert_eq!(out.width(), 4);
//! assert_eq!(out.palette().len(), 2);
//! ```
//!
//! # Per-Algorithm Entry Points
//!
//! [`dither_none`], [`dither_floyd_steinberg`], [`dither_sierra`],
//! [`dither_burkes`], [`dither_atkinson`] and [`dither_random`] take the
//! source image, the palette and an optional preallocated output whose
//! index buffer is reused.
//!
//! # Numeric Model
//!
//! Colors are 8-bit triplets and distances are squared Euclidean in
//! whatever [`ColorSpace`] the caller converted into. Error diffusion runs
//! in integer fixed point scaled by the kernel divisor (16 for
//! Floyd-Steinberg, 32 for Sierra and Burkes, 8 for Atkinson), so results
//! are bit-for-bit reproducible across platforms.
//!
//! Rows are swept boustrophedon: even rows left-to-right, odd rows
//! right-to-left with the kernel mirrored. With fewer than 64 palette
//! colors, Floyd-Steinberg, Sierra and Burkes feed only 3/4 of the pending
//! error into each match decision.

pub mod color;
pub mod dither;
pub mod error;
pub mod image;
pub mod palette;

mod domain_tests;

pub use color::{ColorSpace, Rgb};
pub use dither::{
    dither_atkinson, dither_burkes, dither_floyd_steinberg, dither_none, dither_random,
    dither_sierra, Atkinson, Burkes, Dither, DitherAlgorithm, DitherOptions, FloydSteinberg,
    Kernel, Nearest, RandomDither, Sierra,
};
pub use error::{DitherError, ParseColorError};
pub use image::{IndexedImage, Raster, RgbImage, MAX_INDEXED_COLORS};
pub use palette::Palette;
