#![forbid(unsafe_code)]

//! 8-bit color channels and the sRGB transfer curve.

/// Threshold below which the sRGB EOTF is linear.
pub const SRGB_LINEAR_THRESHOLD: f64 = 0.04045;

/// Threshold below which the inverse transfer (OETF) is linear.
const LINEAR_SRGB_THRESHOLD: f64 = 0.003_130_8;

/// A single 8-bit color channel (0–255).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Channel(pub u8);

impl Channel {
    /// Channel fully off.
    pub const MIN: Self = Self(0);
    /// Channel fully on.
    pub const MAX: Self = Self(255);

    /// Wrap a raw byte.
    #[inline]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Raw byte value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Value scaled to `[0.0, 1.0]`.
    #[inline]
    pub fn normalized(self) -> f64 {
        f64::from(self.0) / 255.0
    }

    /// Quantize a normalized value: clamp to `[0, 1]`, scale, and round half
    /// to even. NaN maps to zero.
    #[inline]
    pub fn from_normalized(value: f64) -> Self {
        if value.is_nan() {
            return Self::MIN;
        }
        let scaled = (value.clamp(0.0, 1.0) * 255.0).round_ties_even();
        Self(scaled as u8)
    }

    /// Linear-light intensity of this channel.
    #[inline]
    pub fn to_linear(self) -> f64 {
        srgb_to_linear(self.normalized())
    }

    /// Encode a linear-light intensity back to an sRGB channel.
    #[inline]
    pub fn from_linear(linear: f64) -> Self {
        Self::from_normalized(linear_to_srgb(linear))
    }

    /// Plain interpolation in encoded sRGB space. `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = clamp_unit(t);
        let a = self.normalized();
        let b = other.normalized();
        Self::from_normalized(a + (b - a) * t)
    }

    /// Gamma-correct interpolation: blend in linear light, then re-encode.
    #[must_use]
    pub fn lerp_linear_light(self, other: Self, t: f64) -> Self {
        let t = clamp_unit(t);
        let a = self.to_linear();
        let b = other.to_linear();
        Self::from_linear(a + (b - a) * t)
    }
}

impl From<u8> for Channel {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<Channel> for u8 {
    fn from(channel: Channel) -> Self {
        channel.0
    }
}

/// sRGB electro-optical transfer function (encoded → linear light).
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c < SRGB_LINEAR_THRESHOLD {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Inverse sRGB transfer function (linear light → encoded).
#[must_use]
pub fn linear_to_srgb(l: f64) -> f64 {
    let l = l.clamp(0.0, 1.0);
    if l <= LINEAR_SRGB_THRESHOLD {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

#[inline]
pub(crate) fn clamp_unit(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}
