#![forbid(unsafe_code)]

//! Closed key sets for the cascade tree levels.
//!
//! Every level of the tree is keyed by a small enum with a fixed order. The
//! order decides emission order and slot index; the CSS name is the
//! kebab-cased variant identifier.

use std::fmt;
use std::hash::Hash;

/// A closed, ordered key set usable as a slot index.
pub trait StyleKey: Copy + Eq + Ord + Hash + fmt::Debug + 'static {
    /// Every key, in enumeration order.
    const ALL: &'static [Self];
    /// Number of keys.
    const COUNT: usize;
    /// Entry a freshly created node always holds.
    const DEFAULT: Self;

    /// Position in [`Self::ALL`].
    fn index(self) -> usize;

    /// Kebab-case name used in CSS output.
    fn css_name(self) -> &'static str;
}

macro_rules! style_keys {
    (
        $(#[$meta:meta])*
        pub enum $name:ident (default $default:ident) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $css:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every key, in enumeration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Position in [`Self::ALL`].
            #[inline]
            pub const fn index(self) -> usize {
                self as usize
            }

            /// Kebab-case name used in CSS output.
            pub const fn css_name(self) -> &'static str {
                match self {
                    $($name::$variant => $css,)+
                }
            }

            /// Key at `idx`, if in range.
            pub const fn from_index(idx: usize) -> Option<Self> {
                if idx < Self::ALL.len() {
                    Some(Self::ALL[idx])
                } else {
                    None
                }
            }

            /// Look up a key by CSS name, after [`normalize_key`].
            pub fn from_css_name(name: &str) -> Option<Self> {
                let wanted = normalize_key(name);
                Self::ALL.iter().copied().find(|k| k.css_name() == wanted)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.css_name())
            }
        }

        impl StyleKey for $name {
            const ALL: &'static [Self] = $name::ALL;
            const COUNT: usize = $name::ALL.len();
            const DEFAULT: Self = $name::$default;

            #[inline]
            fn index(self) -> usize {
                $name::index(self)
            }

            #[inline]
            fn css_name(self) -> &'static str {
                $name::css_name(self)
            }
        }
    };
}

style_keys! {
    /// UI component a token set applies to.
    pub enum Component (default Base) {
        /// Shared tokens every component inherits.
        Base => "base",
        Button => "button",
        Card => "card",
        Checkbox => "checkbox",
        Dialog => "dialog",
        Input => "input",
        Link => "link",
        Menu => "menu",
        Select => "select",
        Switch => "switch",
        Tab => "tab",
        Tooltip => "tooltip",
    }
}

impl Component {
    /// Surface elevation the component sits at (0 = page level).
    pub const fn elevation(self) -> u8 {
        match self {
            Component::Card => 1,
            Component::Menu | Component::Select => 2,
            Component::Dialog => 3,
            Component::Tooltip => 4,
            _ => 0,
        }
    }
}

style_keys! {
    /// Theme variant.
    pub enum ThemeVariant (default Light) {
        Light => "light",
        Dark => "dark",
        HighContrastLight => "high-contrast-light",
        HighContrastDark => "high-contrast-dark",
    }
}

impl ThemeVariant {
    /// High-contrast variants skip state derivation.
    pub const fn is_high_contrast(self) -> bool {
        matches!(
            self,
            ThemeVariant::HighContrastLight | ThemeVariant::HighContrastDark
        )
    }

    /// Whether the variant uses a dark background.
    pub const fn is_dark(self) -> bool {
        matches!(self, ThemeVariant::Dark | ThemeVariant::HighContrastDark)
    }
}

style_keys! {
    /// Interaction state of a component.
    pub enum InteractionState (default Default) {
        Default => "default",
        Hovered => "hovered",
        Focused => "focused",
        Pressed => "pressed",
        Disabled => "disabled",
        Dragged => "dragged",
        Visited => "visited",
    }
}

style_keys! {
    /// A styleable CSS property.
    pub enum StyleProperty (default BackgroundColor) {
        BackgroundColor => "background-color",
        ForegroundColor => "color",
        AccentColor => "accent-color",
        BorderColor => "border-color",
        CaretColor => "caret-color",
        OutlineColor => "outline-color",
        TextDecorationColor => "text-decoration-color",
        BorderWidth => "border-width",
        BorderRadius => "border-radius",
        BorderStyle => "border-style",
        OutlineWidth => "outline-width",
        OutlineOffset => "outline-offset",
        Padding => "padding",
        Gap => "gap",
        FontSize => "font-size",
        FontWeight => "font-weight",
        LineHeight => "line-height",
        Opacity => "opacity",
        BoxShadow => "box-shadow",
        Cursor => "cursor",
    }
}

impl StyleProperty {
    /// Whether the property holds a color.
    pub const fn is_color(self) -> bool {
        matches!(
            self,
            StyleProperty::BackgroundColor
                | StyleProperty::ForegroundColor
                | StyleProperty::AccentColor
                | StyleProperty::BorderColor
                | StyleProperty::CaretColor
                | StyleProperty::OutlineColor
                | StyleProperty::TextDecorationColor
        )
    }
}

/// Normalize a free-form key: whitespace, underscores, and hyphen runs
/// become one hyphen; leading and trailing hyphens are dropped; the result
/// is lowercase.
#[must_use]
pub fn normalize_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_hyphen = false;
    for ch in raw.chars() {
        if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_hyphen = true;
            continue;
        }
        if pending_hyphen && !out.is_empty() {
            out.push('-');
        }
        pending_hyphen = false;
        out.extend(ch.to_lowercase());
    }
    out
}

/// Kebab-case an identifier: `HighContrastLight` → `high-contrast-light`.
#[must_use]
pub fn kebab_case(ident: &str) -> String {
    let mut spaced = String::with_capacity(ident.len() + 4);
    let mut prev: Option<char> = None;
    for ch in ident.chars() {
        if ch.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            spaced.push('-');
        }
        spaced.push(ch);
        prev = Some(ch);
    }
    normalize_key(&spaced)
}
