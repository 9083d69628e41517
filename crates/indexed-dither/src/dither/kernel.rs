//! Error diffusion kernel definitions.
//!
//! Each kernel specifies how the quantization residual of one pixel is
//! distributed to neighboring pixels that have not been processed yet.

/// An error diffusion kernel.
///
/// Each entry is an offset `(dx, dy)` and an integer weight; a neighbor
/// receives `residual * weight / divisor`. The divisor is also the
/// fixed-point scale of the error buffer, so accumulated error is stored
/// as `residual * weight` and never divided until it is consumed.
///
/// # Error Propagation
///
/// The total error propagated is `sum(weights) / divisor`. Floyd-Steinberg,
/// Sierra and Burkes propagate all of it; Atkinson only 6/8.
///
/// # Buffer Sizing
///
/// `max_dy` is how many rows ahead the kernel reaches; the error buffer
/// holds `max_dy + 1` rows.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries for error diffusion.
    ///
    /// - `dx`: horizontal offset (positive = right, mirrored on reverse rows)
    /// - `dy`: vertical offset (never negative)
    /// - `weight`: numerator over `divisor`
    pub entries: &'static [(isize, usize, u8)],

    /// Denominator of every weight, and the fixed-point scale.
    pub divisor: u8,

    /// Maximum dy value in entries.
    pub max_dy: usize,

    /// Feed only 3/4 of the pending error into the match decision when the
    /// palette has fewer than [`SMALL_PALETTE`] colors.
    pub reduce_small_palette: bool,
}

/// Palettes below this size get the 3/4 error reduction.
pub const SMALL_PALETTE: usize = 64;

/// Floyd-Steinberg dithering kernel.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
    max_dy: 1,
    reduce_small_palette: true,
};

/// Sierra (full/Sierra-3) dithering kernel.
///
/// ```text
///            X   5   3
///    2   4   5   4   2
///        2   3   2
/// ```
pub const SIERRA: Kernel = Kernel {
    entries: &[
        (1, 0, 5),
        (2, 0, 3),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 5),
        (1, 1, 4),
        (2, 1, 2),
        (-1, 2, 2),
        (0, 2, 3),
        (1, 2, 2),
    ],
    divisor: 32,
    max_dy: 2,
    reduce_small_palette: true,
};

/// Burkes dithering kernel.
///
/// ```text
///            X   8   4
///    2   4   8   4   2
/// ```
pub const BURKES: Kernel = Kernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
    ],
    divisor: 32,
    max_dy: 1,
    reduce_small_palette: true,
};

/// Atkinson dithering kernel.
///
/// Six taps of 1/8 each; the remaining 2/8 of the residual is dropped.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),  // right
        (2, 0, 1),  // two right
        (-1, 1, 1), // bottom-left
        (0, 1, 1),  // bottom
        (1, 1, 1),  // bottom-right
        (0, 2, 1),  // two below
    ],
    divisor: 8,
    max_dy: 2,
    reduce_small_palette: false,
};

impl Kernel {
    /// Sum of all tap weights.
    pub fn weight_sum(&self) -> u32 {
        self.entries.iter().map(|&(_, _, w)| w as u32).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn actual_max_dy(kernel: &Kernel) -> usize {
        kernel.entries.iter().map(|&(_, dy, _)| dy).max().unwrap()
    }

    #[test]
    fn test_full_propagation_kernels_conserve_weight() {
        for (name, kernel) in [
            ("Floyd-Steinberg", FLOYD_STEINBERG),
            ("Sierra", SIERRA),
            ("Burkes", BURKES),
        ] {
            assert_eq!(
                kernel.weight_sum(),
                kernel.divisor as u32,
                "{name} weights should sum to its divisor"
            );
        }
        assert_eq!(FLOYD_STEINBERG.divisor, 16);
        assert_eq!(SIERRA.divisor, 32);
        assert_eq!(BURKES.divisor, 32);
    }

    #[test]
    fn test_atkinson_propagation_75_percent() {
        assert_eq!(ATKINSON.weight_sum(), 6, "Atkinson should have 6 weight units");
        assert_eq!(ATKINSON.divisor, 8, "Atkinson divisor should be 8");
    }

    #[test]
    fn test_max_dy_matches_entries() {
        for kernel in [FLOYD_STEINBERG, SIERRA, BURKES, ATKINSON] {
            assert_eq!(actual_max_dy(&kernel), kernel.max_dy);
        }
    }

    #[test]
    fn test_taps_only_reach_unvisited_pixels() {
        for kernel in [FLOYD_STEINBERG, SIERRA, BURKES, ATKINSON] {
            for &(dx, dy, _) in kernel.entries {
                assert!(dy > 0 || dx > 0, "tap ({dx}, {dy}) points backwards");
            }
        }
    }

    #[test]
    fn test_error_reduction_excludes_atkinson() {
        assert!(FLOYD_STEINBERG.reduce_small_palette);
        assert!(SIERRA.reduce_small_palette);
        assert!(BURKES.reduce_small_palette);
        assert!(!ATKINSON.reduce_small_palette);
    }

    #[test]
    fn test_sierra_taps() {
        assert_eq!(
            SIERRA.entries.to_vec(),
            vec![
                (1, 0, 5),
                (2, 0, 3),
                (-2, 1, 2),
                (-1, 1, 4),
                (0, 1, 5),
                (1, 1, 4),
                (2, 1, 2),
                (-1, 2, 2),
                (0, 2, 3),
                (1, 2, 2),
            ]
        );
    }
}
