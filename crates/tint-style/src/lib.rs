#![forbid(unsafe_code)]

//! Contrast resolution, state derivation, and the design-token cascade.
//!
//! # Example
//! ```
//! use tint_color::Color;
//! use tint_style::{CascadeTree, Component, Navigator, StyleProperty, ThemeVariant};
//!
//! let mut tree = CascadeTree::new();
//! let nav = Navigator::new()
//!     .component(Component::Button)
//!     .variant(ThemeVariant::Light)
//!     .property(StyleProperty::BackgroundColor);
//! tree.set(&nav, Color::parse("#0B63CE").unwrap()).unwrap();
//!
//! let css = tree.build(&Navigator::new().component(Component::Button), Some("ds"));
//! assert!(css.starts_with("--ds-button-light-default-background-color:#0B63CEFF;"));
//! ```

pub mod border;
pub mod cascade;
pub mod contrast;
pub mod css;
pub mod keys;
pub mod patch;
pub mod seed;
pub mod state;
pub mod value;

pub use border::{BorderOutcome, BorderRequest, BorderSource, border_color, derive_border};
pub use cascade::{CascadeTree, Companions, ComponentNode, Navigator, Subtree, VariantNode};
pub use contrast::{
    ContrastOutcome, ContrastSearch, Direction, SearchRail, SearchTrace, contrast_ratio,
    ensure_minimum_contrast, relative_luminance, resolve_contrast,
};
pub use css::{Declaration, DeclarationBlock};
pub use keys::{Component, InteractionState, StyleKey, StyleProperty, ThemeVariant};
pub use patch::{Cascade, Slots, StylePatch};
pub use seed::{ThemeSeed, VariantSeed};
pub use state::{derive_state, elevation};
pub use value::{LengthUnit, StyleValue};
