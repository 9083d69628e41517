//! Pixel-to-palette mapping algorithms.
//!
//! # Algorithms
//!
//! - **None** ([`Nearest`]): direct nearest-color lookup, no error carried
//! - **Floyd-Steinberg**, **Sierra**, **Burkes**: full error diffusion
//! - **Atkinson**: 6/8 error diffusion
//! - **Random** ([`RandomDither`]): stochastic choice between the two
//!   nearest colors, no spatial propagation
//!
//! # Architecture
//!
//! All algorithms implement the [`Dither`] trait. The diffusion algorithms
//! share one fixed-point scan, parameterized by a [`Kernel`]. Rows are swept
//! boustrophedon (alternating direction) with the kernel mirrored on
//! right-to-left rows.
//!
//! # Example
//!
//! ```
//! use indexed_dither::{Dither, DitherOptions, FloydSteinberg, Palette, Rgb, RgbImage};
//!
//! let palette = Palette::new(vec![Rgb::BLACK, Rgb::WHITE]);
//! let image = RgbImage::from_fn(8, 8, |_, _| Rgb::gray(128)).unwrap();
//!
//! let out = FloydSteinberg
//!     .dither(&image, &palette, None, &DitherOptions::new())
//!     .unwrap();
//! assert!(out.indices().contains(&0) && out.indices().contains(&1));
//! ```

mod atkinson;
mod burkes;
mod floyd_steinberg;
mod kernel;
mod nearest;
mod options;
mod random;
mod sierra;

pub use atkinson::Atkinson;
pub use burkes::Burkes;
pub use floyd_steinberg::FloydSteinberg;
pub use kernel::*;
pub use nearest::Nearest;
pub use options::{DitherOptions, DEFAULT_SEED};
pub use random::RandomDither;
pub use sierra::Sierra;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::DitherError;
use crate::image::{IndexedImage, Raster, MAX_INDEXED_COLORS};
use crate::palette::Palette;

/// Dither algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DitherAlgorithm {
    /// Direct nearest-color lookup.
    None,

    /// Floyd-Steinberg error diffusion (4 taps, /16).
    #[default]
    FloydSteinberg,

    /// Sierra error diffusion (10 taps over 3 rows, /32).
    Sierra,

    /// Burkes error diffusion (7 taps over 2 rows, /32).
    Burkes,

    /// Atkinson error diffusion (6 taps, 6/8 propagated).
    Atkinson,

    /// Random choice between the two nearest colors.
    ///
    /// Preferable on large smooth gradients, where diffusion patterns show.
    Random,
}

impl DitherAlgorithm {
    pub const ALL: [DitherAlgorithm; 6] = [
        DitherAlgorithm::None,
        DitherAlgorithm::FloydSteinberg,
        DitherAlgorithm::Sierra,
        DitherAlgorithm::Burkes,
        DitherAlgorithm::Atkinson,
        DitherAlgorithm::Random,
    ];

    /// The implementation behind this selector.
    pub fn ditherer(self) -> &'static dyn Dither {
        match self {
            DitherAlgorithm::None => &Nearest,
            DitherAlgorithm::FloydSteinberg => &FloydSteinberg,
            DitherAlgorithm::Sierra => &Sierra,
            DitherAlgorithm::Burkes => &Burkes,
            DitherAlgorithm::Atkinson => &Atkinson,
            DitherAlgorithm::Random => &RandomDither,
        }
    }

    /// Map `image` onto `palette` with this algorithm.
    ///
    /// See [`Dither::dither`] for the meaning of `output` and the errors.
    pub fn apply<R: Raster + ?Sized>(
        self,
        image: &R,
        palette: &Palette,
        output: Option<IndexedImage>,
        options: &DitherOptions,
    ) -> Result<IndexedImage, DitherError> {
        dither_image(self.ditherer(), image, palette, output, options)
    }
}

impl std::fmt::Display for DitherAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DitherAlgorithm::None => "none",
            DitherAlgorithm::FloydSteinberg => "floyd_steinberg",
            DitherAlgorithm::Sierra => "sierra",
            DitherAlgorithm::Burkes => "burkes",
            DitherAlgorithm::Atkinson => "atkinson",
            DitherAlgorithm::Random => "random",
        };
        f.write_str(name)
    }
}

/// Trait for pixel-to-palette mapping algorithms.
pub trait Dither {
    /// Map row-major `pixels` to palette indices, writing into `out`.
    ///
    /// `pixels` and `out` must both hold `width * height` entries and the
    /// palette must hold between 1 and 256 colors; [`Dither::dither`]
    /// checks all of this before calling here.
    fn dither_into(
        &self,
        pixels: &[Rgb],
        width: usize,
        height: usize,
        palette: &Palette,
        options: &DitherOptions,
        out: &mut [u8],
    ) -> Result<(), DitherError>;

    /// Map `image` onto `palette`, producing an indexed image that owns a
    /// copy of the palette.
    ///
    /// When `output` is given its index buffer is reused instead of
    /// allocating a new one.
    ///
    /// # Errors
    ///
    /// - [`DitherError::EmptyImage`] for a zero-sized image
    /// - [`DitherError::EmptyPalette`] / [`DitherError::PaletteTooLarge`]
    /// - [`DitherError::DimensionMismatch`] if `output` has other dimensions
    /// - [`DitherError::AllocationFailed`] if a buffer cannot be allocated
    fn dither<R: Raster + ?Sized>(
        &self,
        image: &R,
        palette: &Palette,
        output: Option<IndexedImage>,
        options: &DitherOptions,
    ) -> Result<IndexedImage, DitherError>
    where
        Self: Sized,
    {
        dither_image(self, image, palette, output, options)
    }
}

/// Validate inputs, obtain the output buffer and run `ditherer`.
pub(crate) fn dither_image<R: Raster + ?Sized>(
    ditherer: &dyn Dither,
    image: &R,
    palette: &Palette,
    output: Option<IndexedImage>,
    options: &DitherOptions,
) -> Result<IndexedImage, DitherError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(DitherError::EmptyImage);
    }
    if palette.is_empty() {
        return Err(DitherError::EmptyPalette);
    }
    if palette.len() > MAX_INDEXED_COLORS {
        return Err(DitherError::PaletteTooLarge {
            len: palette.len(),
            max: MAX_INDEXED_COLORS,
        });
    }

    let mut out = match output {
        Some(mut out) => {
            if out.width() != width || out.height() != height {
                return Err(DitherError::DimensionMismatch {
                    width,
                    height,
                    actual_width: out.width(),
                    actual_height: out.height(),
                });
            }
            out.replace_palette(palette.clone());
            out
        }
        None => IndexedImage::blank(width, height, palette.clone())?,
    };

    let pixels = image.pixels()?;
    ditherer.dither_into(&pixels, width, height, palette, options, out.indices_mut())?;
    Ok(out)
}

/// Per-algorithm entry point for [`Nearest`] with default options.
pub fn dither_none<R: Raster + ?Sized>(
    image: &R,
    palette: &Palette,
    output: Option<IndexedImage>,
) -> Result<IndexedImage, DitherError> {
    Nearest.dither(image, palette, output, &DitherOptions::default())
}

/// Per-algorithm entry point for [`FloydSteinberg`] with default options.
pub fn dither_floyd_steinberg<R: Raster + ?Sized>(
    image: &R,
    palette: &Palette,
    output: Option<IndexedImage>,
) -> Result<IndexedImage, DitherError> {
    FloydSteinberg.dither(image, palette, output, &DitherOptions::default())
}

/// Per-algorithm entry point for [`Sierra`] with default options.
pub fn dither_sierra<R: Raster + ?Sized>(
    image: &R,
    palette: &Palette,
    output: Option<IndexedImage>,
) -> Result<IndexedImage, DitherError> {
    Sierra.dither(image, palette, output, &DitherOptions::default())
}

/// Per-algorithm entry point for [`Burkes`] with default options.
pub fn dither_burkes<R: Raster + ?Sized>(
    image: &R,
    palette: &Palette,
    output: Option<IndexedImage>,
) -> Result<IndexedImage, DitherError> {
    Burkes.dither(image, palette, output, &DitherOptions::default())
}

/// Per-algorithm entry point for [`Atkinson`] with default options.
pub fn dither_atkinson<R: Raster + ?Sized>(
    image: &R,
    palette: &Palette,
    output: Option<IndexedImage>,
) -> Result<IndexedImage, DitherError> {
    Atkinson.dither(image, palette, output, &DitherOptions::default())
}

/// Per-algorithm entry point for [`RandomDither`] with default options.
pub fn dither_random<R: Raster + ?Sized>(
    image: &R,
    palette: &Palette,
    output: Option<IndexedImage>,
) -> Result<IndexedImage, DitherError> {
    RandomDither.dither(image, palette, output, &DitherOptions::default())
}

/// Rolling window of pending fixed-point error.
///
/// Holds `row_depth` rows of three `i32` accumulators per pixel, scaled by
/// the kernel divisor. Row 0 is the row being scanned; rows beyond the
/// window are never addressed.
///
/// # Usage Pattern
///
/// 1. Create buffer with `new(width, height, row_depth)`
/// 2. For each row:
///    a. Read pending error with `get_accumulated(x)`
///    b. After matching a pixel, spread its residual with `diffuse(..)`
///    c. After the row, call `advance_row()`
#[derive(Debug)]
pub struct ErrorBuffer {
    rows: Vec<Vec<[i32; 3]>>,
    width: usize,
    height: usize,
    /// Image row that `rows[0]` belongs to.
    y: usize,
}

impl ErrorBuffer {
    /// Allocate a zeroed buffer. Allocation failure is reported, not aborted.
    pub fn new(width: usize, height: usize, row_depth: usize) -> Result<Self, DitherError> {
        let mut rows = Vec::new();
        rows.try_reserve_exact(row_depth)?;
        for _ in 0..row_depth {
            let mut row = Vec::new();
            row.try_reserve_exact(width)?;
            row.resize(width, [0; 3]);
            rows.push(row);
        }
        Ok(Self {
            rows,
            width,
            height,
            y: 0,
        })
    }

    /// Pending error for column `x` of the current row.
    #[inline]
    pub fn get_accumulated(&self, x: usize) -> [i32; 3] {
        self.rows[0][x]
    }

    /// Add `residual * weight` to the pixel at `(target_x, target_y)`.
    ///
    /// Targets left or right of the image, below its last row, or outside
    /// the window are skipped.
    #[inline]
    pub fn diffuse(&mut self, target_x: isize, target_y: usize, residual: [i32; 3], weight: u8) {
        if target_x < 0 || target_x as usize >= self.width || target_y >= self.height {
            return;
        }
        let Some(row) = target_y
            .checked_sub(self.y)
            .and_then(|dy| self.rows.get_mut(dy))
        else {
            return;
        };
        let cell = &mut row[target_x as usize];
        let w = weight as i32;
        cell[0] += residual[0] * w;
        cell[1] += residual[1] * w;
        cell[2] += residual[2] * w;
    }

    /// Move the window down one row; the new last row starts at zero.
    pub fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill([0; 3]);
        }
        self.y += 1;
    }

    /// Largest absolute pending error in the window.
    #[cfg(test)]
    pub(crate) fn max_abs(&self) -> i32 {
        self.rows
            .iter()
            .flatten()
            .flat_map(|cell| cell.iter())
            .map(|v| v.abs())
            .max()
            .unwrap_or(0)
    }
}

/// `v / d` rounded half away from zero.
#[inline]
pub(crate) fn div_round(v: i32, d: i32) -> i32 {
    if v >= 0 {
        (v + d / 2) / d
    } else {
        -((-v + d / 2) / d)
    }
}

/// Match one pixel given its pending error.
///
/// Returns the chosen palette index and the residual
/// (candidate minus chosen color) per channel.
#[inline]
pub(crate) fn match_with_error(
    color: Rgb,
    pending: [i32; 3],
    kernel: &Kernel,
    reduce: bool,
    palette: &Palette,
) -> (usize, [i32; 3]) {
    let d = kernel.divisor as i32;
    let c = color.to_bytes();
    let mut candidate = [0u8; 3];
    for ch in 0..3 {
        let err = if reduce { pending[ch] * 3 / 4 } else { pending[ch] };
        candidate[ch] = div_round(c[ch] as i32 * d + err, d).clamp(0, 255) as u8;
    }

    let (idx, _) = palette.nearest(Rgb::from_bytes(candidate));
    let chosen = palette.color(idx).to_bytes();
    let residual = [
        candidate[0] as i32 - chosen[0] as i32,
        candidate[1] as i32 - chosen[1] as i32,
        candidate[2] as i32 - chosen[2] as i32,
    ];
    (idx, residual)
}

/// Core error diffusion scan parameterized by kernel.
pub(crate) fn dither_with_kernel(
    pixels: &[Rgb],
    width: usize,
    height: usize,
    palette: &Palette,
    kernel: &Kernel,
    options: &DitherOptions,
    out: &mut [u8],
) -> Result<(), DitherError> {
    let mut errors = ErrorBuffer::new(width, height, kernel.max_dy + 1)?;
    scan_with_kernel(pixels, width, height, palette, kernel, options, out, &mut errors);
    Ok(())
}

/// The scan itself, leaving the window on the last row for inspection.
#[allow(clippy::too_many_arguments)]
pub(crate) fn scan_with_kernel(
    pixels: &[Rgb],
    width: usize,
    height: usize,
    palette: &Palette,
    kernel: &Kernel,
    options: &DitherOptions,
    out: &mut [u8],
    errors: &mut ErrorBuffer,
) {
    debug_assert_eq!(pixels.len(), width * height);
    debug_assert_eq!(out.len(), width * height);

    let reduce = kernel.reduce_small_palette && palette.len() < SMALL_PALETTE;

    for y in 0..height {
        let reverse = options.serpentine && y % 2 == 1;

        for step in 0..width {
            let x = if reverse { width - 1 - step } else { step };
            let idx = y * width + x;

            let pending = errors.get_accumulated(x);
            let (nearest, residual) = match_with_error(pixels[idx], pending, kernel, reduce, palette);
            out[idx] = nearest as u8;

            if residual == [0; 3] {
                continue;
            }
            for &(dx, dy, weight) in kernel.entries {
                // Mirror for right-to-left rows
                let dx = if reverse { -dx } else { dx };
                errors.diffuse(x as isize + dx, y + dy, residual, weight);
            }
        }

        if y + 1 < height {
            errors.advance_row();
        }
    }
}
