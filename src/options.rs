use indexed_dither::{ColorSpace, DitherAlgorithm, DitherOptions};
use serde::{Deserialize, Serialize};

use crate::error::QuantizeError;

/// Quantization settings, loadable from YAML.
///
/// ```yaml
/// colors: 16
/// dither: sierra
/// match_space: ycbcr
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantizeOptions {
    /// Requested palette size (1..=256)
    #[serde(default = "default_colors")]
    pub colors: usize,

    /// Pixel mapping algorithm
    #[serde(default)]
    pub dither: DitherAlgorithm,

    /// Colorspace used for palette construction and matching
    #[serde(default)]
    pub match_space: ColorSpace,

    /// Alternate row direction during error diffusion
    #[serde(default = "default_serpentine")]
    pub serpentine: bool,

    /// Seed for random dithering
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,
}

fn default_colors() -> usize {
    256
}

fn default_serpentine() -> bool {
    true
}

fn default_random_seed() -> u64 {
    indexed_dither::dither::DEFAULT_SEED
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            colors: default_colors(),
            dither: DitherAlgorithm::default(),
            match_space: ColorSpace::default(),
            serpentine: default_serpentine(),
            random_seed: default_random_seed(),
        }
    }
}

impl QuantizeOptions {
    /// Parse options from a YAML document; missing keys take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, QuantizeError> {
        let options: Self = serde_yaml::from_str(yaml)?;
        tracing::debug!(
            colors = options.colors,
            dither = %options.dither,
            match_space = %options.match_space,
            "Loaded quantize options"
        );
        Ok(options)
    }

    pub(crate) fn dither_options(&self) -> DitherOptions {
        DitherOptions::new()
            .serpentine(self.serpentine)
            .seed(self.random_seed)
    }
}
