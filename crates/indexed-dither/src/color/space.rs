//! Per-pixel colorspace transforms.
//!
//! Alternate spaces only change the metric by which "nearest color" is
//! judged. Every space keeps three 8-bit components so converted colors
//! flow through the same [`Rgb`] type, palette and dither code.
//!
//! | Space   | Components                      | Round-trip bound |
//! |---------|---------------------------------|------------------|
//! | `Rgb`   | identity                        | exact            |
//! | `Hsv`   | hue in `[0, 240)`, sat, value   | ±3               |
//! | `Yiq`   | luma, I and Q offset by 128     | ±2               |
//! | `Ycbcr` | BT.601 full-range luma, Cb, Cr  | ±1               |
//!
//! Grays and primaries round-trip within ±1 in every space. The wider
//! bounds are accepted: YIQ scales I and Q down to fit a byte, and HSV
//! keeps hue at 240 steps so one step is exactly 1.5 degrees. The bounds
//! hold over the whole RGB cube; `#000020` is the YIQ worst case and
//! `#0003dd` the HSV one.

use serde::{Deserialize, Serialize};

use super::Rgb;

/// Number of hue steps in the HSV encoding (40 per sextant).
pub const HSV_HUE_STEPS: u8 = 240;

// I spans roughly ±152 and Q ±133; these scales fit both into a byte.
const YIQ_I_SCALE: f64 = 0.838;
const YIQ_Q_SCALE: f64 = 0.955;

/// Colorspace used for palette construction and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    /// Identity transform.
    #[default]
    Rgb,
    /// Hue, saturation, value.
    Hsv,
    /// NTSC luma plus in-phase and quadrature chroma.
    Yiq,
    /// ITU-R BT.601 luma and chroma differences.
    Ycbcr,
}

impl ColorSpace {
    pub const ALL: [ColorSpace; 4] = [
        ColorSpace::Rgb,
        ColorSpace::Hsv,
        ColorSpace::Yiq,
        ColorSpace::Ycbcr,
    ];

    /// Converts an RGB color into this space.
    pub fn to_space(self, c: Rgb) -> Rgb {
        match self {
            ColorSpace::Rgb => c,
            ColorSpace::Hsv => rgb_to_hsv(c),
            ColorSpace::Yiq => rgb_to_yiq(c),
            ColorSpace::Ycbcr => rgb_to_ycbcr(c),
        }
    }

    /// Converts a color in this space back to RGB.
    pub fn from_space(self, c: Rgb) -> Rgb {
        match self {
            ColorSpace::Rgb => c,
            ColorSpace::Hsv => hsv_to_rgb(c),
            ColorSpace::Yiq => yiq_to_rgb(c),
            ColorSpace::Ycbcr => ycbcr_to_rgb(c),
        }
    }

    /// Applies [`to_space`](Self::to_space) to every color in place.
    pub fn convert_slice_to(self, colors: &mut [Rgb]) {
        if self == ColorSpace::Rgb {
            return;
        }
        for c in colors.iter_mut() {
            *c = self.to_space(*c);
        }
    }

    /// Applies [`from_space`](Self::from_space) to every color in place.
    pub fn convert_slice_from(self, colors: &mut [Rgb]) {
        if self == ColorSpace::Rgb {
            return;
        }
        for c in colors.iter_mut() {
            *c = self.from_space(*c);
        }
    }
}

impl std::fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ColorSpace::Rgb => "rgb",
            ColorSpace::Hsv => "hsv",
            ColorSpace::Yiq => "yiq",
            ColorSpace::Ycbcr => "ycbcr",
        };
        f.write_str(name)
    }
}

/// Rounds half away from zero and clamps to a byte.
#[inline]
fn to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn rgb_to_hsv(c: Rgb) -> Rgb {
    let (r, g, b) = (c.r as i32, c.g as i32, c.b as i32);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    if delta == 0 {
        return Rgb::new(0, 0, max as u8);
    }

    let s = (255.0 * delta as f64 / max as f64 + 0.5) as u8;
    let sector = if r == max {
        (g - b) as f64 / delta as f64
    } else if g == max {
        2.0 + (b - r) as f64 / delta as f64
    } else {
        4.0 + (r - g) as f64 / delta as f64
    };
    let mut h = sector * 40.0;
    if h < 0.0 {
        h += HSV_HUE_STEPS as f64;
    }
    if h >= HSV_HUE_STEPS as f64 - 0.5 {
        h = 0.0;
    }
    Rgb::new((h + 0.5) as u8, s, max as u8)
}

fn hsv_to_rgb(c: Rgb) -> Rgb {
    let (h, s, v) = (c.r, c.g, c.b);
    if s == 0 {
        return Rgb::gray(v);
    }
    let h = if h >= HSV_HUE_STEPS { 0 } else { h };

    let hf = h as f64 / 40.0;
    let sector = hf as u8;
    let frac = hf - sector as f64;
    let sf = s as f64 / 255.0;
    let vf = v as f64;
    let x = (vf * (1.0 - sf) + 0.5) as u8;
    let y = (vf * (1.0 - sf * frac) + 0.5) as u8;
    let z = (vf * (1.0 - sf * (1.0 - frac)) + 0.5) as u8;
    match sector {
        0 => Rgb::new(v, z, x),
        1 => Rgb::new(y, v, x),
        2 => Rgb::new(x, v, z),
        3 => Rgb::new(x, y, v),
        4 => Rgb::new(z, x, v),
        _ => Rgb::new(v, x, y),
    }
}

fn rgb_to_yiq(c: Rgb) -> Rgb {
    let (r, g, b) = (c.r as f64, c.g as f64, c.b as f64);
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let i = 0.595716 * r - 0.274453 * g - 0.321263 * b;
    let q = 0.211456 * r - 0.522591 * g + 0.311135 * b;
    Rgb::new(
        to_u8(y),
        to_u8(i * YIQ_I_SCALE + 128.0),
        to_u8(q * YIQ_Q_SCALE + 128.0),
    )
}

fn yiq_to_rgb(c: Rgb) -> Rgb {
    let y = c.r as f64;
    let i = (c.g as f64 - 128.0) / YIQ_I_SCALE;
    let q = (c.b as f64 - 128.0) / YIQ_Q_SCALE;
    Rgb::new(
        to_u8(y + 0.9563 * i + 0.6210 * q),
        to_u8(y - 0.2721 * i - 0.6474 * q),
        to_u8(y - 1.1070 * i + 1.7046 * q),
    )
}

fn rgb_to_ycbcr(c: Rgb) -> Rgb {
    let (r, g, b) = (c.r as f64, c.g as f64, c.b as f64);
    Rgb::new(
        to_u8(0.299 * r + 0.587 * g + 0.114 * b),
        to_u8(128.0 - 0.168736 * r - 0.331264 * g + 0.5 * b),
        to_u8(128.0 + 0.5 * r - 0.418688 * g - 0.081312 * b),
    )
}

fn ycbcr_to_rgb(c: Rgb) -> Rgb {
    let y = c.r as f64;
    let cb = c.g as f64 - 128.0;
    let cr = c.b as f64 - 128.0;
    Rgb::new(
        to_u8(y + 1.402 * cr),
        to_u8(y - 0.344136 * cb - 0.714136 * cr),
        to_u8(y + 1.772 * cb),
    )
}
