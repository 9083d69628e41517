//! Error types for the indexed-dither public API.
//!
//! [`DitherError`] covers every failure the dithering entry points can
//! report; [`ParseColorError`] is returned by hex color parsing.

use std::collections::TryReserveError;
use std::num::ParseIntError;

use thiserror::Error;

/// Error type for parsing hex color strings.
///
/// Returned when parsing a hex color string fails, either due to
/// invalid length or invalid hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,

    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Unified error type for palette construction and dithering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DitherError {
    /// The source image has zero width or zero height.
    #[error("image has no pixels")]
    EmptyImage,

    /// The palette has no entries to map pixels onto.
    #[error("palette cannot be empty")]
    EmptyPalette,

    /// More palette entries than a `u8` index can address.
    #[error("palette has {len} colors (max {max})")]
    PaletteTooLarge { len: usize, max: usize },

    /// A preallocated output image does not match the source dimensions.
    #[error("output is {actual_width}x{actual_height}, source is {width}x{height}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    /// A pixel buffer does not hold `width * height` entries.
    #[error("expected {expected} pixels, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },

    /// An index does not address an entry of the palette.
    #[error("index {index} out of range for palette of {len} colors")]
    IndexOutOfRange { index: u8, len: usize },

    /// Growing the index or error buffers failed.
    #[error("failed to allocate dither buffers")]
    AllocationFailed,

    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}

impl From<TryReserveError> for DitherError {
    fn from(_: TryReserveError) -> Self {
        DitherError::AllocationFailed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_message() {
        let err = DitherError::DimensionMismatch {
            width: 4,
            height: 2,
            actual_width: 2,
            actual_height: 2,
        };
        assert_eq!(err.to_string(), "output is 2x2, source is 4x2");
    }

    #[test]
    fn test_parse_error_wraps_into_dither_error() {
        let err: DitherError = ParseColorError::InvalidLength.into();
        assert!(matches!(err, DitherError::ParseColor(_)));
        assert_eq!(
            err.to_string(),
            "invalid color: invalid hex color length (expected 3 or 6 characters)"
        );
    }

    #[test]
    fn test_try_reserve_failure_maps_to_allocation_failed() {
        let mut buf: Vec<u8> = Vec::new();
        let err = buf.try_reserve(usize::MAX).unwrap_err();
        assert_eq!(DitherError::from(err), DitherError::AllocationFailed);
    }
}
