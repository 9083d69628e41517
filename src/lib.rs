//! palquant - palette quantization for raster images
//!
//! Builds a bounded palette from an image and maps every pixel onto it,
//! optionally diffusing the quantization error to hide banding. Pixel
//! mapping lives in the `indexed-dither` crate; this crate adds the color
//! histogram, the greedy palette builder and the pipeline around them.
//!
//! # Quick Start
//!
//! ```
//! use palquant::{quantize_full, ColorSpace, DitherAlgorithm, Rgb, RgbImage};
//!
//! let image = RgbImage::from_fn(64, 8, |x, _| Rgb::gray(x as u8 * 4)).unwrap();
//! let out = quantize_full(&image, 16, None, DitherAlgorithm::FloydSteinberg, ColorSpace::Rgb)
//!     .unwrap();
//!
//! assert_eq!(out.palette().len(), 16);
//! assert_eq!(out.indices().len(), 64 * 8);
//! ```
//!
//! # Palette Construction
//!
//! [`PaletteBuilder`] seeds the palette with well-separated frequent colors
//! and then repeatedly adds the color maximizing `count * distance^2` to
//! the palette so far. [`quantize_fast`] skips that growth and keeps the
//! most frequent colors.

pub mod builder;
pub mod error;
pub mod options;
pub mod population;
pub mod quantizer;

pub use builder::{BuildStats, PaletteBuilder};
pub use error::QuantizeError;
pub use options::QuantizeOptions;
pub use population::{PopulationEntry, PopulationTable};
pub use quantizer::{
    count_unique_colors, extract_full_palette, quantize_fast, quantize_full, Quantizer,
};

pub use indexed_dither::{
    ColorSpace, DitherAlgorithm, DitherError, DitherOptions, IndexedImage, Palette, Raster, Rgb,
    RgbImage,
};
