//! 8-bit RGB color with packed and triplet representations.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseColorError;

/// An 8-bit-per-channel color.
///
/// The same type carries colors in any of the supported
/// [`ColorSpace`](super::ColorSpace)s; the fields are then simply the three
/// components of that space in `[0, 255]`.
///
/// Two representations convert losslessly:
///
/// - triplet: `[r, g, b]` via [`Rgb::to_bytes`] / [`Rgb::from_bytes`]
/// - packed: `0x00RRGGBB` via [`Rgb::to_packed`] / [`Rgb::from_packed`]
///
/// ```
/// use indexed_dither::Rgb;
///
/// let c = Rgb::new(0x12, 0x34, 0x56);
/// assert_eq!(c.to_packed(), 0x123456);
/// assert_eq!(Rgb::from_packed(0x123456), c);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Packs the color as `0x00RRGGBB`.
    #[inline]
    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Unpacks `0x00RRGGBB`; the top byte is ignored.
    #[inline]
    pub const fn from_packed(packed: u32) -> Self {
        Self::new((packed >> 16) as u8, (packed >> 8) as u8, packed as u8)
    }

    /// Squared Euclidean distance between two colors.
    ///
    /// Symmetric, never negative, and zero only for identical colors.
    /// The maximum value is `3 * 255²`, which always fits in a `u32`.
    #[inline]
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        c.to_bytes()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive,
    /// with surrounding whitespace trimmed.
    ///
    /// ```
    /// use indexed_dither::Rgb;
    ///
    /// let red: Rgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // 0xF -> 0xFF
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
