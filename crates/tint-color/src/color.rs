#![forbid(unsafe_code)]

//! The immutable RGBA color value.
//!
//! A [`Color`] stores four 8-bit channels plus an HSV view derived from the
//! RGB channels at construction. The HSV fields are never set independently,
//! so every constructor and transform goes through the same conversion and
//! quantization path.
//!
//! Equality, ordering, and hashing look only at R, G, B, A.
//!
//! Notes
//! -----
//! Channels are **straight alpha** (not pre-multiplied). [`Color::over`]
//! composites with Porter-Duff SourceOver.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use tint_core::{Error, Result};

use crate::channel::{Channel, clamp_unit};
use crate::parse;

/// Immutable RGBA color with a derived HSV view.
#[derive(Debug, Clone, Copy)]
pub struct Color {
    r: Channel,
    g: Channel,
    b: Channel,
    a: Channel,
    hue: f64,
    saturation: f64,
    value: f64,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::gray_const(0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::gray_const(0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::gray_const(255, 255);

    const fn gray_const(level: u8, alpha: u8) -> Self {
        Self {
            r: Channel(level),
            g: Channel(level),
            b: Channel(level),
            a: Channel(alpha),
            hue: 0.0,
            saturation: 0.0,
            value: level as f64 / 255.0,
        }
    }

    /// Create an opaque color (alpha = 255).
    #[must_use]
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create a color with explicit alpha.
    #[must_use]
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_channels(Channel(r), Channel(g), Channel(b), Channel(a))
    }

    /// Create a color from channels, deriving the HSV view.
    #[must_use]
    pub fn from_channels(r: Channel, g: Channel, b: Channel, a: Channel) -> Self {
        let (hue, saturation, value) = rgb_to_hsv(r, g, b);
        Self {
            r,
            g,
            b,
            a,
            hue,
            saturation,
            value,
        }
    }

    /// Unpack `0xRRGGBBAA`.
    #[must_use]
    pub fn from_u32(packed: u32) -> Self {
        let [r, g, b, a] = packed.to_be_bytes();
        Self::rgba(r, g, b, a)
    }

    /// Pack into `0xRRGGBBAA`.
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes([self.r.0, self.g.0, self.b.0, self.a.0])
    }

    /// Create an opaque color from hue (degrees, any finite value),
    /// saturation and value (both `0..=1`).
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Result<Self> {
        Self::from_hsva(hue, saturation, value, 1.0)
    }

    /// Create a color from HSV plus a fractional alpha (`0..=1`).
    pub fn from_hsva(hue: f64, saturation: f64, value: f64, alpha: f64) -> Result<Self> {
        if !hue.is_finite() {
            return Err(Error::InvalidArgumentRange {
                name: "hue",
                value: hue,
                min: f64::MIN,
                max: f64::MAX,
            });
        }
        let saturation = Error::check_range("saturation", saturation, 0.0, 1.0)?;
        let value = Error::check_range("value", value, 0.0, 1.0)?;
        let alpha = Error::check_range("alpha", alpha, 0.0, 1.0)?;
        Ok(Self::from_hsv_parts(
            hue,
            saturation,
            value,
            Channel::from_normalized(alpha),
        ))
    }

    /// HSV construction without validation: hue wraps, S/V clamp.
    pub(crate) fn from_hsv_parts(hue: f64, saturation: f64, value: f64, alpha: Channel) -> Self {
        let (r, g, b) = hsv_to_rgb(hue, saturation, value);
        Self::from_channels(r, g, b, alpha)
    }

    /// Parse color text (hex, `rgb()`/`rgba()`, `hsv()`/`hsva()`, or a
    /// named color).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColorFormat`] carrying `text` when no grammar
    /// matches or a component is out of range.
    pub fn parse(text: &str) -> Result<Self> {
        parse::parse_color(text)
    }

    /// Parse color text, returning `None` instead of an error.
    #[must_use]
    pub fn try_parse(text: &str) -> Option<Self> {
        parse::parse_color(text).ok()
    }

    /// Parse color text, returning `fallback` on failure.
    #[must_use]
    pub fn parse_or(text: &str, fallback: Self) -> Self {
        Self::try_parse(text).unwrap_or(fallback)
    }

    /// Canonical `#RRGGBBAA` form (uppercase, alpha always present).
    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_string()
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> Channel {
        self.r
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> Channel {
        self.g
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> Channel {
        self.b
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> Channel {
        self.a
    }

    /// Hue in degrees, `[0, 360)`. Gray colors report 0.
    #[inline]
    pub const fn hue(self) -> f64 {
        self.hue
    }

    /// HSV saturation, `[0, 1]`.
    #[inline]
    pub const fn saturation(self) -> f64 {
        self.saturation
    }

    /// HSV value, `[0, 1]`.
    #[inline]
    pub const fn value(self) -> f64 {
        self.value
    }

    /// Whether alpha is 255.
    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.a.0 == 255
    }

    /// Replace the alpha channel.
    #[must_use]
    pub fn with_alpha(self, alpha: u8) -> Self {
        Self {
            a: Channel(alpha),
            ..self
        }
    }

    /// Replace alpha with a fraction in `0..=1`.
    pub fn with_opacity(self, opacity: f64) -> Result<Self> {
        let opacity = Error::check_range("opacity", opacity, 0.0, 1.0)?;
        Ok(self.with_alpha(Channel::from_normalized(opacity).0))
    }

    /// Move along the value rail: same hue and saturation, new V (clamped).
    #[must_use]
    pub fn with_value(self, value: f64) -> Self {
        Self::from_hsv_parts(self.hue, self.saturation, clamp_unit(value), self.a)
    }

    /// Same hue and value, new saturation (clamped).
    #[must_use]
    pub fn with_saturation(self, saturation: f64) -> Self {
        Self::from_hsv_parts(self.hue, clamp_unit(saturation), self.value, self.a)
    }

    /// Raise V by `amount` (clamped at 1).
    #[must_use]
    pub fn lighten(self, amount: f64) -> Self {
        self.with_value(self.value + amount)
    }

    /// Lower V by `amount` (clamped at 0).
    #[must_use]
    pub fn darken(self, amount: f64) -> Self {
        self.with_value(self.value - amount)
    }

    /// Scale saturation by `1 - amount`.
    #[must_use]
    pub fn desaturate(self, amount: f64) -> Self {
        self.with_saturation(self.saturation * (1.0 - clamp_unit(amount)))
    }

    /// Plain per-channel interpolation toward `other` (alpha included).
    #[must_use]
    pub fn mix(self, other: Self, t: f64) -> Self {
        Self::from_channels(
            self.r.lerp(other.r, t),
            self.g.lerp(other.g, t),
            self.b.lerp(other.b, t),
            self.a.lerp(other.a, t),
        )
    }

    /// Gamma-correct interpolation toward `other`: RGB blends in linear
    /// light, alpha blends linearly.
    #[must_use]
    pub fn mix_linear_light(self, other: Self, t: f64) -> Self {
        Self::from_channels(
            self.r.lerp_linear_light(other.r, t),
            self.g.lerp_linear_light(other.g, t),
            self.b.lerp_linear_light(other.b, t),
            self.a.lerp(other.a, t),
        )
    }

    /// Porter-Duff SourceOver: `self over dst`.
    ///
    /// Computes the exact rational form in the 255² domain and rounds once.
    #[must_use]
    pub fn over(self, dst: Self) -> Self {
        let s_a = u64::from(self.a.0);
        if s_a == 255 {
            return self;
        }
        if s_a == 0 {
            return dst;
        }

        let d_a = u64::from(dst.a.0);
        let inv_s_a = 255 - s_a;
        let numer_a = 255 * s_a + d_a * inv_s_a;
        if numer_a == 0 {
            return Self::TRANSPARENT;
        }

        let channel = |src: Channel, dst_c: Channel| {
            div_round_u8(
                u64::from(src.0) * s_a * 255 + u64::from(dst_c.0) * d_a * inv_s_a,
                numer_a,
            )
        };
        Self::rgba(
            channel(self.r, dst.r),
            channel(self.g, dst.g),
            channel(self.b, dst.b),
            div_round_u8(numer_a, 255),
        )
    }
}

const fn div_round_u8(numer: u64, denom: u64) -> u8 {
    let v = (numer + (denom / 2)) / denom;
    if v > 255 { 255 } else { v as u8 }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.to_u32() == other.to_u32()
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_u32().hash(state);
    }
}

impl PartialOrd for Color {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Color {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_u32().cmp(&other.to_u32())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.r.0, self.g.0, self.b.0, self.a.0
        )
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Wrap any finite hue into `[0, 360)`. Non-finite input maps to 0.
#[must_use]
pub fn normalize_hue(hue: f64) -> f64 {
    if !hue.is_finite() {
        return 0.0;
    }
    let wrapped = hue.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert RGB channels to `(hue°, saturation, value)`.
///
/// Hue sector tie-break: when several channels share the maximum, red wins,
/// then green, then blue. Gray (zero chroma) has hue 0.
#[must_use]
pub fn rgb_to_hsv(r: Channel, g: Channel, b: Channel) -> (f64, f64, f64) {
    let max_byte = r.0.max(g.0).max(b.0);
    let min_byte = r.0.min(g.0).min(b.0);
    let max = f64::from(max_byte) / 255.0;
    let delta = f64::from(max_byte - min_byte) / 255.0;

    let (rn, gn, bn) = (r.normalized(), g.normalized(), b.normalized());
    let hue = if max_byte == min_byte {
        0.0
    } else if r.0 == max_byte {
        60.0 * ((gn - bn) / delta).rem_euclid(6.0)
    } else if g.0 == max_byte {
        60.0 * ((bn - rn) / delta + 2.0)
    } else {
        60.0 * ((rn - gn) / delta + 4.0)
    };
    let hue = if hue >= 360.0 { hue - 360.0 } else { hue };

    let saturation = if max_byte == 0 { 0.0 } else { delta / max };
    (hue, saturation, max)
}

/// Convert `(hue°, saturation, value)` to quantized RGB channels.
///
/// Hue wraps; saturation and value clamp to `[0, 1]`.
#[must_use]
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> (Channel, Channel, Channel) {
    let h = normalize_hue(hue);
    let s = clamp_unit(saturation);
    let v = clamp_unit(value);

    let chroma = v * s;
    let sector = h / 60.0;
    let x = chroma * (1.0 - ((sector % 2.0) - 1.0).abs());
    let m = v - chroma;

    let (r1, g1, b1) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    (
        Channel::from_normalized(r1 + m),
        Channel::from_normalized(g1 + m),
        Channel::from_normalized(b1 + m),
    )
}
