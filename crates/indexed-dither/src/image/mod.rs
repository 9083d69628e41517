//! Image containers.
//!
//! - [`Raster`]: read access shared by all image types
//! - [`RgbImage`]: owned direct-color source image
//! - [`IndexedImage`]: palette indices plus owned palette (dither output)

mod indexed;
mod raster;

pub use indexed::{IndexedImage, MAX_INDEXED_COLORS};
pub use raster::{Raster, RgbImage};
