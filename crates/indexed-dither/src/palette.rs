//! Ordered color palette with nearest-color matching.

use std::str::FromStr;

use crate::color::{ColorSpace, Rgb};
use crate::error::ParseColorError;

/// An ordered set of colors that indexed pixels refer into.
///
/// Insertion order is significant: entry 0 is index 0 of every image that
/// uses this palette. A palette is immutable once built; conversions such as
/// [`Palette::to_space`] return a new palette.
///
/// Duplicate entries are allowed. Matching always resolves to the lowest
/// index among equally near entries.
///
/// ```
/// use indexed_dither::{Palette, Rgb};
///
/// let palette = Palette::new(vec![Rgb::BLACK, Rgb::WHITE]);
/// assert_eq!(palette.nearest(Rgb::gray(200)), (1, 3 * 55 * 55));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    /// Create a palette from hex color strings such as `"#FF0000"` or `"#F00"`.
    ///
    /// ```
    /// use indexed_dither::{Palette, Rgb};
    ///
    /// let palette = Palette::from_hex(&["#000", "#FFFFFF", "#ff0000"]).unwrap();
    /// assert_eq!(palette.color(2), Rgb::new(255, 0, 0));
    /// ```
    pub fn from_hex(colors: &[&str]) -> Result<Self, ParseColorError> {
        let colors = colors
            .iter()
            .map(|s| Rgb::from_str(s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(colors))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `idx`. Panics if out of range.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<Rgb> {
        self.colors.get(idx).copied()
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn iter(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.colors.iter().copied()
    }

    pub fn into_colors(self) -> Vec<Rgb> {
        self.colors
    }

    /// Index of the first entry equal to `color`.
    pub fn position(&self, color: Rgb) -> Option<usize> {
        self.colors.iter().position(|&c| c == color)
    }

    /// Find the nearest palette entry by squared Euclidean distance.
    ///
    /// Returns `(index, distance_sq)`. Ties resolve to the lowest index.
    /// An empty palette yields `(0, u32::MAX)`.
    #[inline]
    pub fn nearest(&self, color: Rgb) -> (usize, u32) {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;

        for (i, &entry) in self.colors.iter().enumerate() {
            let dist = color.distance_sq(entry);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
                if dist == 0 {
                    break;
                }
            }
        }

        (best_idx, best_dist)
    }

    /// Find the nearest and second-nearest entries.
    ///
    /// Returns `((index, distance_sq), Option<(index, distance_sq)>)`; the
    /// second element is `None` for a single-entry palette. Ties keep the
    /// lower index in front.
    pub fn two_nearest(&self, color: Rgb) -> ((usize, u32), Option<(usize, u32)>) {
        let mut first = (0, u32::MAX);
        let mut second: Option<(usize, u32)> = None;

        for (i, &entry) in self.colors.iter().enumerate() {
            let dist = color.distance_sq(entry);
            if dist < first.1 {
                if first.1 != u32::MAX {
                    second = Some(first);
                }
                first = (i, dist);
            } else if second.map_or(true, |(_, d)| dist < d) {
                second = Some((i, dist));
            }
        }

        (first, second)
    }

    /// Returns a copy with every entry converted into `space`.
    pub fn to_space(&self, space: ColorSpace) -> Palette {
        let mut colors = self.colors.clone();
        space.convert_slice_to(&mut colors);
        Palette::new(colors)
    }

    /// Returns a copy with every entry converted back from `space`.
    pub fn from_space(&self, space: ColorSpace) -> Palette {
        let mut colors = self.colors.clone();
        space.convert_slice_from(&mut colors);
        Palette::new(colors)
    }
}

impl From<Vec<Rgb>> for Palette {
    fn from(colors: Vec<Rgb>) -> Self {
        Self::new(colors)
    }
}

impl FromIterator<Rgb> for Palette {
    fn from_iter<I: IntoIterator<Item = Rgb>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_palette() -> Palette {
        Palette::new(vec![Rgb::gray(0), Rgb::gray(100), Rgb::gray(200)])
    }

    #[test]
    fn test_nearest_exact_match() {
        let palette = gray_palette();
        assert_eq!(palette.nearest(Rgb::gray(100)), (1, 0));
    }

    #[test]
    fn test_nearest_tie_prefers_lowest_index() {
        let palette = gray_palette();
        // 50 is equidistant from 0 and 100.
        assert_eq!(palette.nearest(Rgb::gray(50)).0, 0);
        assert_eq!(palette.nearest(Rgb::gray(150)).0, 1);
    }

    #[test]
    fn test_nearest_with_duplicates() {
        let palette = Palette::new(vec![Rgb::WHITE, Rgb::BLACK, Rgb::BLACK]);
        assert_eq!(palette.nearest(Rgb::gray(3)).0, 1);
    }

    #[test]
    fn test_two_nearest_orders_by_distance() {
        let palette = gray_palette();
        let (first, second) = palette.two_nearest(Rgb::gray(130));
        assert_eq!(first, (1, 3 * 30 * 30));
        assert_eq!(second, Some((2, 3 * 70 * 70)));

        let (first, second) = palette.two_nearest(Rgb::gray(190));
        assert_eq!(first.0, 2);
        assert_eq!(second.map(|s| s.0), Some(1));
    }

    #[test]
    fn test_two_nearest_single_entry() {
        let palette = Palette::new(vec![Rgb::gray(9)]);
        assert_eq!(palette.two_nearest(Rgb::WHITE), ((0, 3 * 246 * 246), None));
    }

    #[test]
    fn test_two_nearest_tie_keeps_lower_index_first() {
        let palette = gray_palette();
        let (first, second) = palette.two_nearest(Rgb::gray(50));
        assert_eq!(first.0, 0);
        assert_eq!(second.map(|s| s.0), Some(1));
    }

    #[test]
    fn test_from_hex() {
        let palette = Palette::from_hex(&["#000000", "fff", " #808080 "]).unwrap();
        assert_eq!(
            palette.colors(),
            &[Rgb::BLACK, Rgb::WHITE, Rgb::gray(0x80)]
        );
        assert!(Palette::from_hex(&["#12"]).is_err());
    }

    #[test]
    fn test_space_round_trip_keeps_order() {
        let palette = Palette::new(vec![Rgb::new(255, 0, 0), Rgb::gray(128)]);
        let ycc = palette.to_space(ColorSpace::Ycbcr);
        assert_eq!(ycc.len(), 2);
        assert_eq!(ycc.color(1), Rgb::new(128, 128, 128));
        let back = ycc.from_space(ColorSpace::Ycbcr);
        assert_eq!(back.color(1), Rgb::gray(128));
    }
}
