use indexed_dither::{DitherError, MAX_INDEXED_COLORS};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuantizeError {
    #[error("Image has no pixels")]
    EmptyImage,

    #[error("Requested palette size is zero")]
    ZeroColors,

    #[error("Requested {requested} colors (max {max})")]
    TooManyColors { requested: usize, max: usize },

    #[error("Failed to allocate quantizer buffers")]
    AllocationFailed,

    #[error("Dither error: {0}")]
    Dither(#[from] DitherError),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl From<std::collections::TryReserveError> for QuantizeError {
    fn from(_: std::collections::TryReserveError) -> Self {
        QuantizeError::AllocationFailed
    }
}

/// Check a requested palette size against what an indexed image can hold.
pub(crate) fn check_color_count(requested: usize) -> Result<(), QuantizeError> {
    if requested == 0 {
        return Err(QuantizeError::ZeroColors);
    }
    if requested > MAX_INDEXED_COLORS {
        return Err(QuantizeError::TooManyColors {
            requested,
            max: MAX_INDEXED_COLORS,
        });
    }
    Ok(())
}
