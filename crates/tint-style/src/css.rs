#![forbid(unsafe_code)]

//! CSS declaration assembly.
//!
//! Output is compact: declarations are concatenated as `name:value;` with no
//! inserted whitespace. Custom properties are written `--name:value;`.

use std::fmt;

use crate::keys::normalize_key;
use crate::patch::StylePatch;

/// A single `name:value;` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Declaration {
    name: String,
    value: String,
    custom: bool,
}

impl Declaration {
    /// Plain property declaration.
    #[must_use]
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: property.into(),
            value: value.into(),
            custom: false,
        }
    }

    /// Custom property declaration; `name` is given without the leading
    /// `--` and is normalized.
    #[must_use]
    pub fn custom(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: normalize_key(name),
            value: value.into(),
            custom: true,
        }
    }

    /// Name without any `--` marker.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_custom(&self) -> bool {
        self.custom
    }

    /// Append this declaration to `out`.
    pub fn write_css(&self, out: &mut String) {
        if self.custom {
            out.push_str("--");
        }
        out.push_str(&self.name);
        out.push(':');
        out.push_str(&self.value);
        out.push(';');
    }

    #[must_use]
    pub fn to_css(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + self.value.len() + 4);
        self.write_css(&mut out);
        out
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.custom {
            f.write_str("--")?;
        }
        write!(f, "{}:{};", self.name, self.value)
    }
}

/// Ordered list of declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationBlock {
    declarations: Vec<Declaration>,
}

impl DeclarationBlock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Declaration> {
        self.declarations.iter()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Every declaration rewritten as a custom property under `prefix`.
    ///
    /// `color:#000000FF;` under `app` becomes `--app-color:#000000FF;`.
    #[must_use]
    pub fn with_prefix(&self, prefix: &str) -> Self {
        self.declarations
            .iter()
            .map(|d| {
                Declaration::custom(&join_segments([prefix, d.name.as_str()]), d.value.clone())
            })
            .collect()
    }

    /// Concatenated CSS text.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        for declaration in &self.declarations {
            declaration.write_css(&mut out);
        }
        out
    }
}

impl Extend<Declaration> for DeclarationBlock {
    fn extend<I: IntoIterator<Item = Declaration>>(&mut self, iter: I) {
        self.declarations.extend(iter);
    }
}

impl FromIterator<Declaration> for DeclarationBlock {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        Self {
            declarations: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DeclarationBlock {
    type Item = &'a Declaration;
    type IntoIter = std::slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.iter()
    }
}

impl From<&StylePatch> for DeclarationBlock {
    fn from(patch: &StylePatch) -> Self {
        patch
            .iter()
            .filter(|(_, value)| value.is_emittable())
            .map(|(property, value)| Declaration::new(property.css_name(), value.to_css()))
            .collect()
    }
}

impl fmt::Display for DeclarationBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for declaration in &self.declarations {
            write!(f, "{declaration}")?;
        }
        Ok(())
    }
}

/// Normalize each segment and join the non-empty ones with `-`.
#[must_use]
pub fn join_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for segment in segments {
        let segment = normalize_key(segment);
        if segment.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('-');
        }
        out.push_str(&segment);
    }
    out
}

/// `--` followed by [`join_segments`].
#[must_use]
pub fn custom_property_name<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::from("--");
    out.push_str(&join_segments(segments));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::StyleProperty;
    use crate::value::StyleValue;
    use tint_color::Color;

    #[test]
    fn declarations_have_no_whitespace() {
        assert_eq!(Declaration::new("color", "#000000FF").to_css(), "color:#000000FF;");
        assert_eq!(Declaration::custom("App Color", "red").to_css(), "--app-color:red;");
    }

    #[test]
    fn display_matches_to_css() {
        let d = Declaration::custom("x", "1px");
        assert_eq!(d.to_string(), d.to_css());
        assert!(d.is_custom());
        assert_eq!(d.name(), "x");
        assert_eq!(d.value(), "1px");
    }

    #[test]
    fn block_concatenates_in_order() {
        let mut block = DeclarationBlock::new();
        block.push(Declaration::new("a", "1"));
        block.extend([Declaration::new("b", "2"), Declaration::new("c", "3")]);
        assert_eq!(block.len(), 3);
        assert_eq!(block.to_css(), "a:1;b:2;c:3;");
        assert_eq!(block.to_string(), block.to_css());
    }

    #[test]
    fn prefix_rewrites_to_custom_properties() {
        let block: DeclarationBlock = [Declaration::new("border-color", "#FFFFFFFF")]
            .into_iter()
            .collect();
        assert_eq!(block.with_prefix("ds").to_css(), "--ds-border-color:#FFFFFFFF;");
    }

    #[test]
    fn block_from_patch_uses_property_order() {
        let patch = StylePatch::new()
            .with(StyleProperty::Padding, StyleValue::px(4.0))
            .with(StyleProperty::BackgroundColor, Color::WHITE);
        let block = DeclarationBlock::from(&patch);
        assert_eq!(block.to_css(), "background-color:#FFFFFFFF;padding:4px;");
    }

    #[test]
    fn block_from_patch_drops_non_finite_values() {
        let patch = StylePatch::new()
            .with(StyleProperty::LineHeight, StyleValue::Number(f64::NAN))
            .with(StyleProperty::FontWeight, StyleValue::Number(600.0));
        assert_eq!(DeclarationBlock::from(&patch).to_css(), "font-weight:600;");
    }

    #[test]
    fn custom_property_names_skip_empty_segments() {
        assert_eq!(
            custom_property_name(["", "My App", "button", "high-contrast-light"]),
            "--my-app-button-high-contrast-light"
        );
        assert_eq!(join_segments(["a__b", "--", "c"]), "a-b-c");
    }
}
