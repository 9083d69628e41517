//! Color types and colorspace transforms.
//!
//! - [`Rgb`]: 8-bit three-component color, packed or triplet
//! - [`ColorSpace`]: RGB, HSV, YIQ and YCbCr per-pixel transforms

mod rgb;
mod space;

pub use rgb::Rgb;
pub use space::{ColorSpace, HSV_HUE_STEPS};
