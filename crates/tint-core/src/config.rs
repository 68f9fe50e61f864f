#![forbid(unsafe_code)]

//! Engine configuration: contrast thresholds, CSS variable prefix, and
//! high-contrast forcing.
//!
//! A [`TokenConfig`] starts from the WCAG defaults and is adjusted by a
//! [`ConfigOverride`] patch. Each override field is an `Option`:
//! - `Some(value)` - replace the base value
//! - `None` - keep the base value
//!
//! The environment is read through a lookup function so tests never touch
//! process state.
//!
//! # Example
//!
//! ```
//! use tint_core::config::{ConfigOverride, TokenConfig};
//!
//! let config = TokenConfig::default()
//!     .with_override(&ConfigOverride::new().var_prefix(Some("ds".into())))
//!     .unwrap();
//! assert_eq!(config.var_prefix.as_deref(), Some("ds"));
//! assert_eq!(config.text_contrast, 4.5);
//! ```

use std::env;

use crate::error::{Error, Result};

/// Environment variable for the text contrast threshold.
pub const ENV_TEXT_CONTRAST: &str = "TINT_TEXT_CONTRAST";
/// Environment variable for the non-text (border, icon) contrast threshold.
pub const ENV_NON_TEXT_CONTRAST: &str = "TINT_NON_TEXT_CONTRAST";
/// Environment variable for the default CSS custom-property prefix.
pub const ENV_VAR_PREFIX: &str = "TINT_VAR_PREFIX";
/// Environment variable forcing high-contrast output.
pub const ENV_HIGH_CONTRAST: &str = "TINT_HIGH_CONTRAST";

/// Lowest contrast ratio WCAG can express (identical colors).
pub const MIN_RATIO: f64 = 1.0;
/// Highest contrast ratio WCAG can express (black on white).
pub const MAX_RATIO: f64 = 21.0;

/// Resolved engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenConfig {
    /// Minimum ratio for text and companion colors (WCAG AA: 4.5).
    pub text_contrast: f64,
    /// Minimum ratio for borders and other non-text strokes (WCAG 1.4.11: 3.0).
    pub non_text_contrast: f64,
    /// Prefix for emitted custom properties; `None` emits bare declarations.
    pub var_prefix: Option<String>,
    /// Treat every variant as high-contrast (skip state derivation).
    pub high_contrast: bool,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            text_contrast: 4.5,
            non_text_contrast: 3.0,
            var_prefix: None,
            high_contrast: false,
        }
    }
}

impl TokenConfig {
    /// Build a configuration from defaults plus the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from defaults plus values returned by `lookup`.
    ///
    /// Unparsable values are ignored; parsed thresholds outside `1..=21`
    /// are rejected.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let patch = ConfigOverride::from_lookup(lookup);
        Self::default().with_override(&patch)
    }

    /// Apply an override patch, validating the merged result.
    pub fn with_override(&self, patch: &ConfigOverride) -> Result<Self> {
        let merged = Self {
            text_contrast: patch.text_contrast.unwrap_or(self.text_contrast),
            non_text_contrast: patch.non_text_contrast.unwrap_or(self.non_text_contrast),
            var_prefix: patch
                .var_prefix
                .clone()
                .unwrap_or_else(|| self.var_prefix.clone()),
            high_contrast: patch.high_contrast.unwrap_or(self.high_contrast),
        };
        merged.validate()?;
        Ok(merged)
    }

    /// Check that both thresholds are valid contrast ratios.
    pub fn validate(&self) -> Result<()> {
        Error::check_range("text_contrast", self.text_contrast, MIN_RATIO, MAX_RATIO)?;
        Error::check_range(
            "non_text_contrast",
            self.non_text_contrast,
            MIN_RATIO,
            MAX_RATIO,
        )?;
        Ok(())
    }
}

/// Sparse configuration patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverride {
    pub text_contrast: Option<f64>,
    pub non_text_contrast: Option<f64>,
    /// `Some(None)` clears a base prefix.
    pub var_prefix: Option<Option<String>>,
    pub high_contrast: Option<bool>,
}

impl ConfigOverride {
    /// Create an empty override (no fields overridden).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text_contrast: None,
            non_text_contrast: None,
            var_prefix: None,
            high_contrast: None,
        }
    }

    /// Override the text contrast threshold.
    #[must_use]
    pub fn text_contrast(mut self, ratio: f64) -> Self {
        self.text_contrast = Some(ratio);
        self
    }

    /// Override the non-text contrast threshold.
    #[must_use]
    pub fn non_text_contrast(mut self, ratio: f64) -> Self {
        self.non_text_contrast = Some(ratio);
        self
    }

    /// Override the custom-property prefix.
    #[must_use]
    pub fn var_prefix(mut self, prefix: Option<String>) -> Self {
        self.var_prefix = Some(prefix);
        self
    }

    /// Override high-contrast forcing.
    #[must_use]
    pub fn high_contrast(mut self, enabled: bool) -> Self {
        self.high_contrast = Some(enabled);
        self
    }

    /// Collect overrides from `TINT_*` variables returned by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut patch = Self::new();
        if let Some(raw) = lookup(ENV_TEXT_CONTRAST) {
            patch.text_contrast = parse_ratio(ENV_TEXT_CONTRAST, &raw);
        }
        if let Some(raw) = lookup(ENV_NON_TEXT_CONTRAST) {
            patch.non_text_contrast = parse_ratio(ENV_NON_TEXT_CONTRAST, &raw);
        }
        if let Some(raw) = lookup(ENV_VAR_PREFIX) {
            let trimmed = raw.trim();
            patch.var_prefix = Some((!trimmed.is_empty()).then(|| trimmed.to_string()));
        }
        if let Some(raw) = lookup(ENV_HIGH_CONTRAST) {
            patch.high_contrast = parse_flag(&raw);
            if patch.high_contrast.is_none() {
                crate::warn!(key = ENV_HIGH_CONTRAST, value = %raw, "ignoring unrecognized flag");
            }
        }
        patch
    }
}

fn parse_ratio(key: &str, raw: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            crate::warn!(key, value = %raw, "ignoring unparsable contrast ratio");
            None
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
