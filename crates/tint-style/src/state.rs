#![forbid(unsafe_code)]

//! Interaction-state and elevation variants of a base color.
//!
//! All transforms work on the HSV value axis. A "shift" lightens dark
//! colors and darkens light ones (V ≥ 0.5), so every state differs visibly
//! from its base whatever the starting tone. High-contrast variants skip
//! derivation entirely.

use tint_color::Color;
use tint_core::{Error, Result};

use crate::keys::{InteractionState, ThemeVariant};

pub const HOVER_SHIFT: f64 = 0.06;
pub const FOCUS_SHIFT: f64 = 0.10;
pub const PRESS_SHIFT: f64 = 0.14;
pub const DRAG_SHIFT: f64 = 0.18;
pub const DISABLED_DESATURATION: f64 = 0.6;
/// Fraction of the way V moves toward [`DISABLED_TARGET_VALUE`].
pub const DISABLED_BLEND: f64 = 0.15;
pub const DISABLED_TARGET_VALUE: f64 = 0.5;
pub const VISITED_DESATURATION: f64 = 0.3;

/// Value shift per elevation level.
pub const ELEVATION_STEP: f64 = 0.02;
/// Highest elevation level.
pub const MAX_ELEVATION: u8 = 5;

/// Move V by `amount` away from the nearer extreme: up when V < 0.5, down
/// otherwise.
#[must_use]
pub fn shift(color: Color, amount: f64) -> Color {
    if color.value() >= 0.5 {
        color.darken(amount)
    } else {
        color.lighten(amount)
    }
}

/// Muted, mid-toned rendition for disabled controls.
#[must_use]
pub fn disabled(color: Color) -> Color {
    let muted = color.desaturate(DISABLED_DESATURATION);
    let v = muted.value();
    muted.with_value(v + (DISABLED_TARGET_VALUE - v) * DISABLED_BLEND)
}

/// Color for `state` derived from the default-state `base`.
#[must_use]
pub fn state_color(base: Color, state: InteractionState) -> Color {
    match state {
        InteractionState::Default => base,
        InteractionState::Hovered => shift(base, HOVER_SHIFT),
        InteractionState::Focused => shift(base, FOCUS_SHIFT),
        InteractionState::Pressed => shift(base, PRESS_SHIFT),
        InteractionState::Dragged => shift(base, DRAG_SHIFT),
        InteractionState::Disabled => disabled(base),
        InteractionState::Visited => base.desaturate(VISITED_DESATURATION),
    }
}

/// [`state_color`], bypassed for high-contrast variants.
#[must_use]
pub fn derive_state(base: Color, state: InteractionState, variant: ThemeVariant) -> Color {
    if variant.is_high_contrast() {
        return base;
    }
    state_color(base, state)
}

/// Surface color for elevation `level` (0 returns `base`).
///
/// # Errors
///
/// [`Error::InvalidArgumentRange`] for levels above [`MAX_ELEVATION`].
pub fn elevation(base: Color, level: u8) -> Result<Color> {
    if level > MAX_ELEVATION {
        return Err(Error::InvalidArgumentRange {
            name: "elevation",
            value: f64::from(level),
            min: 0.0,
            max: f64::from(MAX_ELEVATION),
        });
    }
    if level == 0 {
        return Ok(base);
    }
    Ok(shift(base, ELEVATION_STEP * f64::from(level)))
}
