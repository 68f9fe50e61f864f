#![forbid(unsafe_code)]

//! Values stored at the leaves of the cascade tree.

use std::fmt;

use tint_color::Color;
use tint_core::{Error, Result};

use crate::keys::normalize_key;

/// CSS length unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    Px,
    Rem,
    Em,
    Percent,
    Vw,
    Vh,
}

impl LengthUnit {
    /// Suffix written after the number.
    pub const fn suffix(self) -> &'static str {
        match self {
            LengthUnit::Px => "px",
            LengthUnit::Rem => "rem",
            LengthUnit::Em => "em",
            LengthUnit::Percent => "%",
            LengthUnit::Vw => "vw",
            LengthUnit::Vh => "vh",
        }
    }
}

/// A resolved style value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Color(Color),
    Length(f64, LengthUnit),
    /// Unitless number (`line-height`, `opacity`, `font-weight`).
    Number(f64),
    /// Bare keyword such as `solid` or `pointer`, stored normalized.
    Keyword(String),
}

impl StyleValue {
    #[must_use]
    pub fn px(value: f64) -> Self {
        Self::Length(value, LengthUnit::Px)
    }

    #[must_use]
    pub fn rem(value: f64) -> Self {
        Self::Length(value, LengthUnit::Rem)
    }

    #[must_use]
    pub fn percent(value: f64) -> Self {
        Self::Length(value, LengthUnit::Percent)
    }

    /// Length with a validated magnitude.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgumentRange`] for NaN or infinite values.
    pub fn length(value: f64, unit: LengthUnit) -> Result<Self> {
        Ok(Self::Length(finite("length", value)?, unit))
    }

    /// Unitless number with a validated value.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgumentRange`] for NaN or infinite values.
    pub fn number(value: f64) -> Result<Self> {
        Ok(Self::Number(finite("number", value)?))
    }

    /// Keyword value, normalized with [`normalize_key`].
    #[must_use]
    pub fn keyword(word: &str) -> Self {
        Self::Keyword(normalize_key(word))
    }

    /// The color, if this is a color value.
    #[must_use]
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_color(&self) -> bool {
        matches!(self, Self::Color(_))
    }

    /// Whether the value renders as valid CSS. Non-finite numbers and empty
    /// keywords do not.
    #[must_use]
    pub fn is_emittable(&self) -> bool {
        match self {
            Self::Color(_) => true,
            Self::Length(v, _) | Self::Number(v) => v.is_finite(),
            Self::Keyword(word) => !word.is_empty(),
        }
    }

    /// CSS text for the value.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

fn finite(name: &'static str, value: f64) -> Result<f64> {
    Error::check_range(name, value, f64::MIN, f64::MAX)
}

/// Shortest decimal form, with `-0` written as `0`.
struct CssNumber(f64);

impl fmt::Display for CssNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = if self.0 == 0.0 { 0.0 } else { self.0 };
        write!(f, "{v}")
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(c) => write!(f, "{c}"),
            Self::Length(v, unit) => write!(f, "{}{}", CssNumber(*v), unit.suffix()),
            Self::Number(v) => write!(f, "{}", CssNumber(*v)),
            Self::Keyword(word) => f.write_str(word),
        }
    }
}

impl From<Color> for StyleValue {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_use_canonical_hex() {
        let v = StyleValue::from(Color::rgb(0x12, 0xab, 0xff));
        assert_eq!(v.to_css(), "#12ABFFFF");
        assert_eq!(v.as_color(), Some(Color::rgb(0x12, 0xab, 0xff)));
    }

    #[test]
    fn lengths_carry_units() {
        assert_eq!(StyleValue::px(1.0).to_css(), "1px");
        assert_eq!(StyleValue::rem(0.75).to_css(), "0.75rem");
        assert_eq!(StyleValue::percent(50.0).to_css(), "50%");
        assert_eq!(StyleValue::Length(-0.0, LengthUnit::Em).to_css(), "0em");
        assert_eq!(StyleValue::Length(100.0, LengthUnit::Vh).to_css(), "100vh");
    }

    #[test]
    fn numbers_and_keywords() {
        assert_eq!(StyleValue::Number(1.5).to_css(), "1.5");
        assert_eq!(StyleValue::Number(600.0).to_css(), "600");
        assert_eq!(StyleValue::keyword("  Not_Allowed ").to_css(), "not-allowed");
        assert!(!StyleValue::keyword("solid").is_color());
    }

    #[test]
    fn validated_constructors_reject_non_finite() {
        assert_eq!(StyleValue::length(2.5, LengthUnit::Em), Ok(StyleValue::Length(2.5, LengthUnit::Em)));
        assert_eq!(StyleValue::number(600.0), Ok(StyleValue::Number(600.0)));
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                StyleValue::length(bad, LengthUnit::Px),
                Err(Error::InvalidArgumentRange { name: "length", .. })
            ));
            assert!(matches!(
                StyleValue::number(bad),
                Err(Error::InvalidArgumentRange { name: "number", .. })
            ));
        }
    }

    #[test]
    fn non_finite_and_empty_values_are_not_emittable() {
        assert!(StyleValue::px(0.0).is_emittable());
        assert!(StyleValue::from(Color::BLACK).is_emittable());
        assert!(!StyleValue::Number(f64::NAN).is_emittable());
        assert!(!StyleValue::Length(f64::INFINITY, LengthUnit::Rem).is_emittable());
        assert!(!StyleValue::keyword("  ").is_emittable());
    }
}
