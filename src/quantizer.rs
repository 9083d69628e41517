//! Quantizer -- the entry point wiring table, builder and ditherer together.

use std::collections::HashMap;

use indexed_dither::{
    ColorSpace, DitherAlgorithm, DitherError, IndexedImage, Palette, Raster, Rgb, RgbImage,
};

use crate::builder::PaletteBuilder;
use crate::error::{check_color_count, QuantizeError};
use crate::options::QuantizeOptions;
use crate::population::PopulationTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Full,
    Fast,
}

/// Reusable quantization pipeline.
///
/// Configuration methods consume and return `self`; [`quantize`](Self::quantize)
/// takes `&self`, so one quantizer serves any number of images. Every call
/// owns its own population table, distance cache and error buffers.
///
/// ```
/// use palquant::{ColorSpace, DitherAlgorithm, Quantizer, Rgb, RgbImage};
///
/// let image = RgbImage::from_fn(16, 16, |x, y| Rgb::new(x as u8 * 16, y as u8 * 16, 128)).unwrap();
/// let quantizer = Quantizer::new(8)
///     .dither(DitherAlgorithm::Sierra)
///     .match_space(ColorSpace::Ycbcr);
///
/// let out = quantizer.quantize(&image).unwrap();
/// assert_eq!(out.palette().len(), 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Quantizer {
    options: QuantizeOptions,
    seed_palette: Option<Palette>,
}

impl Quantizer {
    /// Quantizer for `colors` palette entries with default settings.
    pub fn new(colors: usize) -> Self {
        Self::from_options(QuantizeOptions {
            colors,
            ..QuantizeOptions::default()
        })
    }

    pub fn from_options(options: QuantizeOptions) -> Self {
        Self {
            options,
            seed_palette: None,
        }
    }

    #[inline]
    pub fn dither(mut self, algorithm: DitherAlgorithm) -> Self {
        self.options.dither = algorithm;
        self
    }

    /// Colorspace in which colors are compared.
    ///
    /// Palette construction and matching measure distances in `space`;
    /// the output palette always holds colors taken from the source image
    /// (or the seed palette), never a round-tripped conversion.
    #[inline]
    pub fn match_space(mut self, space: ColorSpace) -> Self {
        self.options.match_space = space;
        self
    }

    /// Colors to start the palette with (RGB). Only used by
    /// [`quantize`](Self::quantize).
    #[inline]
    pub fn seed_palette(mut self, palette: Palette) -> Self {
        self.seed_palette = Some(palette);
        self
    }

    #[inline]
    pub fn serpentine(mut self, enabled: bool) -> Self {
        self.options.serpentine = enabled;
        self
    }

    #[inline]
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.options.random_seed = seed;
        self
    }

    pub fn options(&self) -> &QuantizeOptions {
        &self.options
    }

    /// Full-quality quantization: greedy palette growth, then dithering.
    ///
    /// # Errors
    ///
    /// - [`QuantizeError::ZeroColors`] / [`QuantizeError::TooManyColors`]
    /// - [`QuantizeError::EmptyImage`]
    /// - [`QuantizeError::AllocationFailed`]
    pub fn quantize<R: Raster + ?Sized>(&self, image: &R) -> Result<IndexedImage, QuantizeError> {
        self.run(image, Mode::Full)
    }

    /// Fast quantization: the most frequent colors form the palette.
    ///
    /// Skips growth and its distance cache entirely. On skewed histograms
    /// this picks near-duplicate colors that the full build would not;
    /// that is the accepted cost. The seed palette is ignored.
    pub fn quantize_fast<R: Raster + ?Sized>(
        &self,
        image: &R,
    ) -> Result<IndexedImage, QuantizeError> {
        self.run(image, Mode::Fast)
    }

    fn run<R: Raster + ?Sized>(&self, image: &R, mode: Mode) -> Result<IndexedImage, QuantizeError> {
        check_color_count(self.options.colors)?;
        if image.is_empty() {
            return Err(QuantizeError::EmptyImage);
        }

        let space = self.options.match_space;
        let table = PopulationTable::build(image)?;
        let builder = PaletteBuilder::new(&table, self.options.colors)
            .seed_palette(self.seed_palette.as_ref())
            .match_space(space);
        let palette = match mode {
            Mode::Full => builder.build()?,
            Mode::Fast => builder.build_most_frequent()?,
        };

        let out = if table.len() <= self.options.colors {
            map_exact(image, palette)?
        } else if space == ColorSpace::Rgb {
            self.options
                .dither
                .apply(image, &palette, None, &self.options.dither_options())?
        } else {
            self.dither_in_space(image, palette)?
        };

        tracing::info!(
            requested = self.options.colors,
            distinct = table.len(),
            palette = out.palette().len(),
            dither = %self.options.dither,
            match_space = %space,
            fast = mode == Mode::Fast,
            "Quantized image"
        );
        Ok(out)
    }

    /// Dither with image and palette converted into the match space, then
    /// pair the indices with the RGB palette.
    fn dither_in_space<R: Raster + ?Sized>(
        &self,
        image: &R,
        palette: Palette,
    ) -> Result<IndexedImage, QuantizeError> {
        let space = self.options.match_space;
        let space_palette = palette.to_space(space);
        let options = self.options.dither_options();
        let dithered = match (image.palette(), image.indices()) {
            (Some(source_palette), Some(indices)) => {
                let converted = IndexedImage::new(
                    copy_of(indices)?,
                    image.width(),
                    image.height(),
                    source_palette.to_space(space),
                )?;
                self.options.dither.apply(&converted, &space_palette, None, &options)?
            }
            _ => {
                let mut converted =
                    RgbImage::from_pixels(image.width(), image.height(), image.pixels()?.into_owned())?;
                converted.convert_to_space(space);
                self.options.dither.apply(&converted, &space_palette, None, &options)?
            }
        };
        let (indices, _) = dithered.into_parts();
        Ok(IndexedImage::new(indices, image.width(), image.height(), palette)?)
    }
}

/// Index every pixel by its exact color.
///
/// `palette` holds every distinct color of `image`, so there is no error
/// to diffuse and no metric to apply.
fn map_exact<R: Raster + ?Sized>(image: &R, palette: Palette) -> Result<IndexedImage, QuantizeError> {
    let mut slots: HashMap<u32, u8> = HashMap::new();
    slots.try_reserve(palette.len())?;
    for (i, color) in palette.iter().enumerate() {
        slots.entry(color.to_packed()).or_insert(i as u8);
    }
    let lookup = |color: Rgb| {
        slots
            .get(&color.to_packed())
            .copied()
            .unwrap_or_else(|| palette.nearest(color).0 as u8)
    };

    let mut indices = Vec::new();
    let len = image
        .width()
        .checked_mul(image.height())
        .ok_or(DitherError::AllocationFailed)?;
    indices.try_reserve_exact(len)?;
    match (image.palette(), image.indices()) {
        (Some(source_palette), Some(source_indices)) => {
            let mut remap = Vec::new();
            remap.try_reserve_exact(source_palette.len())?;
            remap.extend(source_palette.iter().map(lookup));
            indices.extend(source_indices.iter().map(|&i| remap[i as usize]));
        }
        _ => indices.extend(image.pixels()?.iter().map(|&c| lookup(c))),
    }
    Ok(IndexedImage::new(indices, image.width(), image.height(), palette)?)
}

fn copy_of<T: Copy>(items: &[T]) -> Result<Vec<T>, QuantizeError> {
    let mut out = Vec::new();
    out.try_reserve_exact(items.len())?;
    out.extend_from_slice(items);
    Ok(out)
}

/// Full-quality quantization of `image` to at most `desired` colors.
pub fn quantize_full<R: Raster + ?Sized>(
    image: &R,
    desired: usize,
    seed_palette: Option<&Palette>,
    dither: DitherAlgorithm,
    match_space: ColorSpace,
) -> Result<IndexedImage, QuantizeError> {
    let mut quantizer = Quantizer::new(desired).dither(dither).match_space(match_space);
    if let Some(seed) = seed_palette {
        quantizer = quantizer.seed_palette(seed.clone());
    }
    quantizer.quantize(image)
}

/// Most-frequent-colors quantization of `image` to at most `desired` colors.
pub fn quantize_fast<R: Raster + ?Sized>(
    image: &R,
    desired: usize,
    dither: DitherAlgorithm,
) -> Result<IndexedImage, QuantizeError> {
    Quantizer::new(desired).dither(dither).quantize_fast(image)
}

/// Number of distinct colors in `image`.
pub fn count_unique_colors<R: Raster + ?Sized>(image: &R) -> Result<usize, QuantizeError> {
    Ok(PopulationTable::build(image)?.len())
}

/// Every distinct color of `image`, in first-occurrence order. Unbounded.
pub fn extract_full_palette<R: Raster + ?Sized>(image: &R) -> Result<Palette, QuantizeError> {
    Ok(PopulationTable::build(image)?.to_palette())
}
