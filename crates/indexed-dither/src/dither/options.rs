//! Dithering options.
//!
//! [`DitherOptions`] configures the sweep order of the error-diffusion
//! algorithms and the random stream of [`RandomDither`](super::RandomDither).

/// Seed used by [`DitherOptions::default`], so repeated runs are identical.
pub const DEFAULT_SEED: u64 = 0x5eed_0f_d17e;

/// Configuration options shared by all dithering algorithms.
///
/// # Defaults
///
/// - Serpentine scanning: enabled
/// - Seed: [`DEFAULT_SEED`]
///
/// ```
/// use indexed_dither::DitherOptions;
///
/// let options = DitherOptions::new().serpentine(false).seed(7);
/// assert!(!options.serpentine);
/// assert_eq!(options.seed, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DitherOptions {
    /// Enable serpentine scanning (alternating row direction).
    ///
    /// When enabled, odd rows are processed right-to-left and the diffusion
    /// kernel is horizontally mirrored so error still flows toward pixels
    /// that have not been visited yet. Disabling it is only useful for
    /// comparing against a plain raster scan.
    ///
    /// Default: `true`
    pub serpentine: bool,

    /// Seed for the random ditherer's generator.
    ///
    /// Default: [`DEFAULT_SEED`]
    pub seed: u64,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            serpentine: true,
            seed: DEFAULT_SEED,
        }
    }
}

impl DitherOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn serpentine(mut self, enabled: bool) -> Self {
        self.serpentine = enabled;
        self
    }

    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
