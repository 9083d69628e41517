//! Histogram of the distinct colors in an image.

use std::collections::HashMap;

use indexed_dither::{Palette, Raster, Rgb};

use crate::error::QuantizeError;

/// One distinct color and how many pixels carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationEntry {
    pub color: Rgb,
    pub count: u64,
}

impl PopulationEntry {
    pub fn new(color: Rgb, count: u64) -> Self {
        Self { color, count }
    }
}

/// Distinct colors of one image with their occurrence counts.
///
/// Entries are kept in first-occurrence order of a row-major scan; for an
/// indexed image, in palette order (unused palette entries are left out).
/// The order is deterministic and is the tie-break order everywhere a
/// table is consumed.
///
/// A table is built per quantize call and owned by it.
///
/// # Capacity
///
/// Tables are documented for up to [`PopulationTable::CAPACITY`] distinct
/// colors. Larger tables are still built exactly, but palette construction
/// over them is quadratic-ish in practice and a warning is logged.
#[derive(Debug, Clone, Default)]
pub struct PopulationTable {
    entries: Vec<PopulationEntry>,
    total: u64,
}

impl PopulationTable {
    /// Documented number of distinct colors a table is meant to hold.
    pub const CAPACITY: usize = 1 << 20;

    /// Count every pixel of `image` (or, for indexed images, every index).
    ///
    /// # Errors
    ///
    /// - [`QuantizeError::EmptyImage`] for a zero-sized image
    /// - [`QuantizeError::AllocationFailed`] if the table cannot grow
    pub fn build<R: Raster + ?Sized>(image: &R) -> Result<Self, QuantizeError> {
        if image.is_empty() {
            return Err(QuantizeError::EmptyImage);
        }

        let mut table = Counter::default();
        match (image.palette(), image.indices()) {
            (Some(palette), Some(indices)) => {
                let mut counts: Vec<u64> = Vec::new();
                counts.try_reserve_exact(palette.len())?;
                counts.resize(palette.len(), 0);
                for &i in indices {
                    counts[i as usize] += 1;
                }
                for (color, count) in palette.iter().zip(counts) {
                    if count > 0 {
                        table.add(color, count)?;
                    }
                }
            }
            _ => {
                for &color in image.pixels()?.iter() {
                    table.add(color, 1)?;
                }
            }
        }

        let table = table.finish();
        tracing::debug!(colors = table.len(), pixels = table.total, "Built population table");
        if table.is_over_capacity() {
            tracing::warn!(
                colors = table.len(),
                capacity = Self::CAPACITY,
                "Population table exceeds its documented capacity"
            );
        }
        Ok(table)
    }

    /// Wrap hand-built entries, e.g. a histogram with known counts.
    ///
    /// Entries are used as given; callers keep colors distinct.
    pub fn from_entries(entries: Vec<PopulationEntry>) -> Self {
        let total = entries.iter().map(|e| e.count).sum();
        Self { entries, total }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[PopulationEntry] {
        &self.entries
    }

    /// Number of pixels counted.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_over_capacity(&self) -> bool {
        self.entries.len() > Self::CAPACITY
    }

    /// Every distinct color, in table order.
    pub fn to_palette(&self) -> Palette {
        self.entries.iter().map(|e| e.color).collect()
    }
}

#[derive(Default)]
struct Counter {
    slots: HashMap<u32, usize>,
    entries: Vec<PopulationEntry>,
    total: u64,
}

impl Counter {
    #[inline]
    fn add(&mut self, color: Rgb, count: u64) -> Result<(), QuantizeError> {
        self.total += count;
        let key = color.to_packed();
        if let Some(&slot) = self.slots.get(&key) {
            self.entries[slot].count += count;
            return Ok(());
        }
        self.slots.try_reserve(1)?;
        self.entries.try_reserve(1)?;
        self.slots.insert(key, self.entries.len());
        self.entries.push(PopulationEntry::new(color, count));
        Ok(())
    }

    fn finish(self) -> PopulationTable {
        PopulationTable {
            entries: self.entries,
            total: self.total,
        }
    }
}
