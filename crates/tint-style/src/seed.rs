#![forbid(unsafe_code)]

//! Whole-theme generation from a handful of seed colors.
//!
//! Each variant is seeded with a background, a foreground, and an accent.
//! For every requested component the seed background is raised to the
//! component's elevation, every interaction state gets its own background,
//! and the text, accent, and border colors are resolved against it.
//! High-contrast variants keep the seed surface for every state.

use tint_color::Color;
use tint_core::{Result, TokenConfig};

use crate::border::{BorderRequest, derive_border};
use crate::cascade::{CascadeTree, Navigator};
use crate::contrast::ensure_minimum_contrast;
use crate::keys::{Component, InteractionState, StyleProperty, ThemeVariant};
use crate::patch::{Slots, StylePatch};
use crate::state::{derive_state, elevation};
use crate::value::StyleValue;

/// Seed colors for one theme variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariantSeed {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
}

impl VariantSeed {
    #[must_use]
    pub fn new(background: Color, foreground: Color, accent: Color) -> Self {
        Self {
            background,
            foreground,
            accent,
        }
    }

    /// Built-in seed for `variant`.
    #[must_use]
    pub fn preset(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Light => Self::new(
                Color::rgb(0xFF, 0xFF, 0xFF),
                Color::rgb(0x1A, 0x1A, 0x1A),
                Color::rgb(0x0B, 0x63, 0xCE),
            ),
            ThemeVariant::Dark => Self::new(
                Color::rgb(0x12, 0x12, 0x12),
                Color::rgb(0xE6, 0xE6, 0xE6),
                Color::rgb(0x7A, 0xB8, 0xFF),
            ),
            ThemeVariant::HighContrastLight => Self::new(
                Color::rgb(0xFF, 0xFF, 0xFF),
                Color::rgb(0x00, 0x00, 0x00),
                Color::rgb(0x00, 0x00, 0xEE),
            ),
            ThemeVariant::HighContrastDark => Self::new(
                Color::rgb(0x00, 0x00, 0x00),
                Color::rgb(0xFF, 0xFF, 0xFF),
                Color::rgb(0xFF, 0xFF, 0x00),
            ),
        }
    }
}

/// Per-variant seeds plus the thresholds used to resolve them.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeSeed {
    variants: Slots<ThemeVariant, VariantSeed>,
    config: TokenConfig,
}

impl Default for ThemeSeed {
    /// Every variant seeded with its preset.
    fn default() -> Self {
        let mut variants = Slots::new();
        for &variant in ThemeVariant::ALL {
            variants.insert(variant, VariantSeed::preset(variant));
        }
        Self {
            variants,
            config: TokenConfig::default(),
        }
    }
}

impl ThemeSeed {
    /// Seed with no variants.
    #[must_use]
    pub fn new(config: TokenConfig) -> Self {
        Self {
            variants: Slots::new(),
            config,
        }
    }

    #[must_use]
    pub fn with_variant(mut self, variant: ThemeVariant, seed: VariantSeed) -> Self {
        self.variants.insert(variant, seed);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: TokenConfig) -> Self {
        self.config = config;
        self
    }

    pub fn variant(&self, variant: ThemeVariant) -> Option<&VariantSeed> {
        self.variants.get(variant)
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Generate a token tree for `components`; an empty slice means every
    /// component.
    ///
    /// Generated patches are stored verbatim: borders keep the non-text
    /// threshold rather than being raised to the text threshold.
    ///
    /// # Errors
    ///
    /// [`tint_core::Error::InvalidArgumentRange`] when the configuration
    /// holds an invalid threshold.
    pub fn generate(&self, components: &[Component]) -> Result<CascadeTree> {
        let span = tint_core::debug_span!("theme_generate");
        let _guard = span.enter();

        let mut tree = CascadeTree::from_config(&self.config)?;
        let components = if components.is_empty() {
            Component::ALL
        } else {
            components
        };

        for &component in components {
            for (variant, seed) in self.variants.iter() {
                let high_contrast = self.config.high_contrast || variant.is_high_contrast();
                let surface = if high_contrast {
                    seed.background
                } else {
                    elevation(seed.background, component.elevation())?
                };
                for &state in InteractionState::ALL {
                    let background = if high_contrast {
                        surface
                    } else {
                        derive_state(surface, state, variant)
                    };
                    let patch = self.state_patch(seed, background, high_contrast)?;
                    tree.insert_patch(component, variant, state, patch);
                }
            }
        }

        tint_core::debug!(
            components = components.len(),
            variants = self.variants.len(),
            "theme generated"
        );
        Ok(tree)
    }

    fn state_patch(&self, seed: &VariantSeed, background: Color, high_contrast: bool) -> Result<StylePatch> {
        let text = self.config.text_contrast;
        let foreground = ensure_minimum_contrast(seed.foreground, background, text)?.color;
        let accent = ensure_minimum_contrast(seed.accent, background, text)?.color;
        let border = derive_border(
            &BorderRequest::new(foreground, seed.background)
                .fill(background)
                .min_ratio(self.config.non_text_contrast)
                .high_contrast(high_contrast),
        )?
        .color;
        let border_width = if high_contrast { 2.0 } else { 1.0 };

        Ok(StylePatch::new()
            .with(StyleProperty::BackgroundColor, background)
            .with(StyleProperty::ForegroundColor, foreground)
            .with(StyleProperty::AccentColor, accent)
            .with(StyleProperty::BorderColor, border)
            .with(StyleProperty::CaretColor, foreground)
            .with(StyleProperty::OutlineColor, accent)
            .with(StyleProperty::TextDecorationColor, accent)
            .with(StyleProperty::BorderWidth, StyleValue::px(border_width))
            .with(StyleProperty::BorderStyle, StyleValue::keyword("solid")))
    }

    /// Generate and emit CSS under the configured variable prefix.
    pub fn to_css(&self, components: &[Component]) -> Result<String> {
        let tree = self.generate(components)?;
        Ok(tree.build(&Navigator::new(), self.config.var_prefix.as_deref()))
    }
}
