#![forbid(unsafe_code)]

//! tint public facade crate.
//!
//! Re-exports the color, contrast, and cascade types from the internal
//! crates and offers a prelude for day-to-day usage.
//!
//! # Example
//! ```
//! use tint::prelude::*;
//!
//! let config = TokenConfig::from_lookup(|key| match key {
//!     "TINT_VAR_PREFIX" => Some("ds".to_string()),
//!     _ => None,
//! })
//! .unwrap();
//! let css = ThemeSeed::default()
//!     .with_config(config)
//!     .to_css(&[Component::Button])
//!     .unwrap();
//! assert!(css.contains("--ds-button-dark-hovered-color:"));
//! ```

// --- Core re-exports -------------------------------------------------------

pub use tint_core::config::{ConfigOverride, TokenConfig};
pub use tint_core::{Error, Result};

#[cfg(feature = "subscriber")]
pub use tint_core::logging::init_subscriber;

// --- Color re-exports ------------------------------------------------------

pub use tint_color::named;
pub use tint_color::{Channel, Color};

// --- Style re-exports ------------------------------------------------------

pub use tint_style::contrast::{self, AA_LARGE_TEXT, AA_TEXT, AAA_TEXT, NON_TEXT};
pub use tint_style::css::{custom_property_name, join_segments};
pub use tint_style::keys::{kebab_case, normalize_key};
pub use tint_style::{
    BorderOutcome, BorderRequest, BorderSource, Cascade, CascadeTree, Companions, ComponentNode,
    Component, ContrastOutcome, ContrastSearch, Declaration, DeclarationBlock, Direction,
    InteractionState, LengthUnit, Navigator, SearchRail, SearchTrace, StyleKey, StylePatch,
    StyleProperty, StyleValue, Subtree, ThemeSeed, ThemeVariant, VariantNode, VariantSeed,
    border_color, contrast_ratio, derive_border, derive_state, elevation,
    ensure_minimum_contrast, relative_luminance, resolve_contrast,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Cascade, CascadeTree, Color, Component, Error, InteractionState, Navigator, Result,
        StylePatch, StyleProperty, StyleValue, ThemeSeed, ThemeVariant, TokenConfig,
        contrast_ratio, ensure_minimum_contrast,
    };
}
