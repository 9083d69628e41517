//! Greedy palette construction from a population table.
//!
//! # Algorithm
//!
//! 1. **Trivial case**: with no more distinct colors than requested, the
//!    palette is every color in table order.
//! 2. **Seeding**: either the caller's seed palette (up to the requested
//!    size), or up to `max(1, min(n / 4, 16))` of the most frequent colors,
//!    skipping any within [`SEED_MIN_DISTANCE_SQ`] of an accepted seed.
//! 3. **Growth**: repeatedly add the unselected color maximizing
//!    `count * min_distance_sq_to_palette`. Candidates are scanned in
//!    descending-count order (ties in table order); the first strictly
//!    greater fitness wins. Colors that coincide with a palette entry in
//!    the match space score zero and are taken in scan order once nothing
//!    scores higher, so the palette always reaches the requested size.
//!
//! Distances are measured in the builder's [`ColorSpace`]; the palette
//! itself always holds the table's RGB colors.
//!
//! Growth keeps a per-candidate upper bound on its distance to the palette
//! and skips candidates whose bound cannot beat the current best
//! (branch-and-bound). The bound is tightened lazily, so the result equals
//! an exhaustive scan.

mod distance;

use indexed_dither::{ColorSpace, Palette, Rgb};

use self::distance::{DistanceCache, MinDistanceCache};
use crate::error::{check_color_count, QuantizeError};
use crate::population::PopulationTable;

/// Seeds closer than this (≈ 40 per channel) to an accepted seed are skipped.
pub const SEED_MIN_DISTANCE_SQ: u32 = 4800;

/// Upper limit on frequency-based seeds.
pub const MAX_SEEDS: usize = 16;

/// Counters from one palette build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Palette entries present before growth started.
    pub seeds: usize,
    /// Colors added by the growth phase.
    pub growth_picks: usize,
    /// Color distances computed during growth.
    pub distance_evaluations: u64,
    /// Candidates skipped on their cached bound alone.
    pub pruned: u64,
    /// Table indices in the order they were selected from the table.
    pub selection_order: Vec<usize>,
}

/// A table entry while being consumed by the builder.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    color: Rgb,
    /// `color` in the match space.
    key: Rgb,
    count: u64,
    /// Palette position once chosen.
    selected: Option<usize>,
}

/// Builds a bounded palette from a [`PopulationTable`].
///
/// ```
/// use palquant::{PaletteBuilder, PopulationTable, Rgb, RgbImage};
///
/// let image = RgbImage::from_fn(8, 1, |x, _| Rgb::gray(x as u8 * 30)).unwrap();
/// let table = PopulationTable::build(&image).unwrap();
/// let palette = PaletteBuilder::new(&table, 3).build().unwrap();
/// assert_eq!(palette.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct PaletteBuilder<'a> {
    table: &'a PopulationTable,
    desired: usize,
    seed: Option<&'a Palette>,
    space: ColorSpace,
}

impl<'a> PaletteBuilder<'a> {
    pub fn new(table: &'a PopulationTable, desired: usize) -> Self {
        Self {
            table,
            desired,
            seed: None,
            space: ColorSpace::Rgb,
        }
    }

    /// Compare colors in `space` (RGB by default).
    pub fn match_space(mut self, space: ColorSpace) -> Self {
        self.space = space;
        self
    }

    /// Start from these colors instead of frequency-based seeds.
    ///
    /// An empty palette counts as no seed palette.
    pub fn seed_palette(mut self, seed: Option<&'a Palette>) -> Self {
        self.seed = seed.filter(|p| !p.is_empty());
        self
    }

    pub fn build(&self) -> Result<Palette, QuantizeError> {
        self.build_with_stats().map(|(palette, _)| palette)
    }

    /// Full greedy build, also returning what the build did.
    ///
    /// # Errors
    ///
    /// - [`QuantizeError::ZeroColors`] / [`QuantizeError::TooManyColors`]
    /// - [`QuantizeError::EmptyImage`] for an empty table
    /// - [`QuantizeError::AllocationFailed`]
    pub fn build_with_stats(&self) -> Result<(Palette, BuildStats), QuantizeError> {
        self.validate()?;
        let mut stats = BuildStats::default();

        if self.table.len() <= self.desired {
            return Ok((self.table.to_palette(), stats));
        }

        let mut candidates = self.candidates()?;
        let order = by_descending_count(&candidates)?;

        let mut palette: Vec<Rgb> = Vec::new();
        palette.try_reserve_exact(self.desired)?;
        let mut keys: Vec<Rgb> = Vec::new();
        keys.try_reserve_exact(self.desired)?;

        match self.seed {
            Some(seed) => {
                palette.extend(seed.iter().take(self.desired));
                keys.extend(palette.iter().map(|&c| self.space.to_space(c)));
                for candidate in candidates.iter_mut() {
                    candidate.selected = palette.iter().position(|&c| c == candidate.color);
                }
            }
            None => {
                let nseeds = seed_count(self.desired);
                for &i in &order {
                    if palette.len() >= nseeds {
                        break;
                    }
                    let key = candidates[i].key;
                    if keys
                        .iter()
                        .all(|&seed| seed.distance_sq(key) >= SEED_MIN_DISTANCE_SQ)
                    {
                        candidates[i].selected = Some(palette.len());
                        palette.push(candidates[i].color);
                        keys.push(key);
                        stats.selection_order.push(i);
                    }
                }
            }
        }
        stats.seeds = palette.len();
        tracing::debug!(seeds = stats.seeds, desired = self.desired, "Seeded palette");

        let mut cache = MinDistanceCache::new(candidates.len())?;
        grow(
            &mut candidates,
            &order,
            (&mut palette, &mut keys),
            self.desired,
            &mut cache,
            &mut stats,
        );
        stats.distance_evaluations = cache.evaluations();

        tracing::debug!(
            growth_picks = stats.growth_picks,
            distance_evaluations = stats.distance_evaluations,
            pruned = stats.pruned,
            "Palette growth finished"
        );
        Ok((Palette::new(palette), stats))
    }

    /// Low-memory build: the most frequent colors, no distance search.
    ///
    /// Skewed histograms can yield near-duplicate entries; that is the
    /// price of skipping growth. The seed palette is ignored.
    pub fn build_most_frequent(&self) -> Result<Palette, QuantizeError> {
        self.validate()?;
        if self.table.len() <= self.desired {
            return Ok(self.table.to_palette());
        }
        let candidates = self.candidates()?;
        let order = by_descending_count(&candidates)?;
        Ok(order
            .iter()
            .take(self.desired)
            .map(|&i| candidates[i].color)
            .collect())
    }

    fn validate(&self) -> Result<(), QuantizeError> {
        check_color_count(self.desired)?;
        if self.table.is_empty() {
            return Err(QuantizeError::EmptyImage);
        }
        Ok(())
    }

    fn candidates(&self) -> Result<Vec<Candidate>, QuantizeError> {
        let mut candidates = Vec::new();
        candidates.try_reserve_exact(self.table.len())?;
        candidates.extend(self.table.entries().iter().map(|e| Candidate {
            color: e.color,
            key: self.space.to_space(e.color),
            count: e.count,
            selected: None,
        }));
        Ok(candidates)
    }
}

/// Number of frequency-based seeds for a palette of `desired` colors.
pub fn seed_count(desired: usize) -> usize {
    (desired / 4).clamp(1, MAX_SEEDS).min(desired)
}

/// Table indices sorted by descending count; equal counts keep table order.
fn by_descending_count(candidates: &[Candidate]) -> Result<Vec<usize>, QuantizeError> {
    let mut order = Vec::new();
    order.try_reserve_exact(candidates.len())?;
    order.extend(0..candidates.len());
    order.sort_by(|&a, &b| candidates[b].count.cmp(&candidates[a].count));
    Ok(order)
}

fn grow<C: DistanceCache>(
    candidates: &mut [Candidate],
    order: &[usize],
    (palette, keys): (&mut Vec<Rgb>, &mut Vec<Rgb>),
    desired: usize,
    cache: &mut C,
    stats: &mut BuildStats,
) {
    while palette.len() < desired {
        let mut best = 0u64;
        let mut winner = None;

        for &i in order {
            let candidate = candidates[i];
            if candidate.selected.is_some() {
                continue;
            }
            if let Some(bound) = cache.fitness_bound(i, candidate.count) {
                if winner.is_some() && bound <= best {
                    stats.pruned += 1;
                    continue;
                }
            }
            let fitness = cache.refine(i, candidate.key, candidate.count, keys, best);
            if winner.is_none() || fitness > best {
                best = fitness;
                winner = Some(i);
            }
        }

        // Only when every table color is already in the palette.
        let Some(i) = winner else {
            break;
        };
        candidates[i].selected = Some(palette.len());
        palette.push(candidates[i].color);
        keys.push(candidates[i].key);
        stats.growth_picks += 1;
        stats.selection_order.push(i);
        tracing::trace!(
            index = palette.len() - 1,
            color = %candidates[i].color,
            fitness = best,
            "Palette growth pick"
        );
    }
}
