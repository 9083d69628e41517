//! Per-candidate minimum-distance bookkeeping for palette growth.

use indexed_dither::Rgb;

use crate::error::QuantizeError;

/// Upper bounds on each candidate's distance to the growing palette.
///
/// A bound is only ever tightened, and recomputing against the whole
/// palette always gives the exact value; the cache only lets growth skip
/// candidates that cannot win.
pub(crate) trait DistanceCache {
    /// Upper bound on `count * min_distance` for `entry`, if any distance
    /// has been computed yet.
    fn fitness_bound(&self, entry: usize, count: u64) -> Option<u64>;

    /// Fold in palette colors not yet seen by `entry`, stopping early once
    /// the fitness drops to `best` or below. Returns the resulting bound,
    /// exact whenever it exceeds `best`.
    fn refine(&mut self, entry: usize, color: Rgb, count: u64, palette: &[Rgb], best: u64) -> u64;

    /// Number of color distances computed so far.
    fn evaluations(&self) -> u64;
}

/// One scalar per candidate, plus how many palette entries it has seen.
pub(crate) struct MinDistanceCache {
    min: Vec<u32>,
    checked: Vec<usize>,
    evaluations: u64,
}

impl MinDistanceCache {
    pub(crate) fn new(entries: usize) -> Result<Self, QuantizeError> {
        let mut min = Vec::new();
        min.try_reserve_exact(entries)?;
        min.resize(entries, u32::MAX);
        let mut checked = Vec::new();
        checked.try_reserve_exact(entries)?;
        checked.resize(entries, 0);
        Ok(Self {
            min,
            checked,
            evaluations: 0,
        })
    }
}

impl DistanceCache for MinDistanceCache {
    #[inline]
    fn fitness_bound(&self, entry: usize, count: u64) -> Option<u64> {
        (self.checked[entry] > 0).then(|| (self.min[entry] as u64).saturating_mul(count))
    }

    fn refine(&mut self, entry: usize, color: Rgb, count: u64, palette: &[Rgb], best: u64) -> u64 {
        let mut min = self.min[entry];
        let mut checked = self.checked[entry];
        while checked < palette.len() {
            min = min.min(color.distance_sq(palette[checked]));
            checked += 1;
            self.evaluations += 1;
            if (min as u64).saturating_mul(count) <= best {
                break;
            }
        }
        self.min[entry] = min;
        self.checked[entry] = checked;
        (min as u64).saturating_mul(count)
    }

    fn evaluations(&self) -> u64 {
        self.evaluations
    }
}
