#![forbid(unsafe_code)]

//! The four-level override tree: Component → ThemeVariant →
//! InteractionState → StyleProperty.
//!
//! Each level is a [`Slots`] array indexed by key ordinal. Newly created
//! nodes hold their level's default entry (`Base`, `Light`, `Default`);
//! property patches start empty.
//!
//! # Writes
//!
//! [`CascadeTree::set`] addresses nodes with a [`Navigator`]: one key list
//! per level, where an empty list means every key of that level. Missing
//! intermediate nodes are created on the way down. When a write touches a
//! color, each touched variant re-contrasts its companion colors against
//! the state's background, so foregrounds never go stale after a background
//! change.
//!
//! # Reads
//!
//! [`CascadeTree::build`] walks top-down. An empty key list visits the
//! existing children in enumeration order; otherwise only the listed keys
//! are visited and absent ones are skipped.

use smallvec::SmallVec;
use tint_color::Color;
use tint_core::{Result, TokenConfig};

use crate::contrast::{AA_TEXT, ensure_minimum_contrast};
use crate::css::{Declaration, DeclarationBlock, join_segments};
use crate::keys::{Component, InteractionState, StyleKey, StyleProperty, ThemeVariant, normalize_key};
use crate::patch::{Cascade, Slots, StylePatch};
use crate::value::StyleValue;

bitflags::bitflags! {
    /// Color properties re-contrasted against the background after a write.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Companions: u8 {
        const FOREGROUND      = 0b0000_0001;
        const ACCENT          = 0b0000_0010;
        const BORDER          = 0b0000_0100;
        const CARET           = 0b0000_1000;
        const OUTLINE         = 0b0001_0000;
        const TEXT_DECORATION = 0b0010_0000;
    }
}

const COMPANION_PROPERTIES: [(Companions, StyleProperty); 6] = [
    (Companions::FOREGROUND, StyleProperty::ForegroundColor),
    (Companions::ACCENT, StyleProperty::AccentColor),
    (Companions::BORDER, StyleProperty::BorderColor),
    (Companions::CARET, StyleProperty::CaretColor),
    (Companions::OUTLINE, StyleProperty::OutlineColor),
    (Companions::TEXT_DECORATION, StyleProperty::TextDecorationColor),
];

impl Companions {
    /// Properties selected by these flags, in enumeration order.
    pub fn properties(self) -> impl Iterator<Item = StyleProperty> {
        COMPANION_PROPERTIES
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, property)| property)
    }
}

impl Default for Companions {
    fn default() -> Self {
        Self::all()
    }
}

/// States of one theme variant.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantNode {
    states: Slots<InteractionState, StylePatch>,
}

impl VariantNode {
    /// Node holding an empty `Default` state.
    #[must_use]
    pub fn new() -> Self {
        let mut states = Slots::new();
        states.insert(InteractionState::DEFAULT, StylePatch::new());
        Self { states }
    }

    /// Builder: set the patch for `state`.
    #[must_use]
    pub fn with_state(mut self, state: InteractionState, patch: StylePatch) -> Self {
        self.states.insert(state, patch);
        self
    }

    pub fn state(&self, state: InteractionState) -> Option<&StylePatch> {
        self.states.get(state)
    }

    pub fn state_mut(&mut self, state: InteractionState) -> Option<&mut StylePatch> {
        self.states.get_mut(state)
    }

    /// Present states in enumeration order.
    pub fn states(&self) -> impl Iterator<Item = (InteractionState, &StylePatch)> + '_ {
        self.states.iter()
    }

    /// Background `state` is drawn on: its own, else the `Default` state's.
    pub fn background(&self, state: InteractionState) -> Option<Color> {
        self.states
            .get(state)
            .and_then(|p| p.color(StyleProperty::BackgroundColor))
            .or_else(|| self.default_background())
    }

    fn default_background(&self) -> Option<Color> {
        self.states
            .get(InteractionState::Default)
            .and_then(|p| p.color(StyleProperty::BackgroundColor))
    }

    fn has_color(&self) -> bool {
        self.states.iter().any(|(_, p)| p.has_color())
    }

    /// Re-contrast companion colors in every state. Returns how many
    /// values changed.
    fn reconcile(&mut self, companions: Companions, min_ratio: f64) -> Result<usize> {
        let fallback = self.default_background();
        let mut adjusted = 0;
        for (_, patch) in self.states.iter_mut() {
            let Some(bg) = patch.color(StyleProperty::BackgroundColor).or(fallback) else {
                continue;
            };
            for property in companions.properties() {
                let Some(fg) = patch.color(property) else {
                    continue;
                };
                let outcome = ensure_minimum_contrast(fg, bg, min_ratio)?;
                if outcome.color != fg {
                    patch.set(property, outcome.color);
                    adjusted += 1;
                }
            }
        }
        Ok(adjusted)
    }
}

impl Default for VariantNode {
    fn default() -> Self {
        Self::new()
    }
}

impl Cascade for VariantNode {
    fn merge_from(&mut self, over: &Self) {
        self.states.merge_from(&over.states);
    }
}

/// Variants of one component.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentNode {
    variants: Slots<ThemeVariant, VariantNode>,
}

impl ComponentNode {
    /// Node holding a fresh `Light` variant.
    #[must_use]
    pub fn new() -> Self {
        let mut variants = Slots::new();
        variants.insert(ThemeVariant::DEFAULT, VariantNode::new());
        Self { variants }
    }

    /// Builder: set the node for `variant`.
    #[must_use]
    pub fn with_variant(mut self, variant: ThemeVariant, node: VariantNode) -> Self {
        self.variants.insert(variant, node);
        self
    }

    pub fn variant(&self, variant: ThemeVariant) -> Option<&VariantNode> {
        self.variants.get(variant)
    }

    /// Present variants in enumeration order.
    pub fn variants(&self) -> impl Iterator<Item = (ThemeVariant, &VariantNode)> + '_ {
        self.variants.iter()
    }

    fn has_color(&self) -> bool {
        self.variants.iter().any(|(_, v)| v.has_color())
    }
}

impl Default for ComponentNode {
    fn default() -> Self {
        Self::new()
    }
}

impl Cascade for ComponentNode {
    fn merge_from(&mut self, over: &Self) {
        self.variants.merge_from(&over.variants);
    }
}

/// Per-level key selection. An empty list selects every key of its level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    pub components: SmallVec<[Component; 4]>,
    pub variants: SmallVec<[ThemeVariant; 4]>,
    pub states: SmallVec<[InteractionState; 4]>,
    pub properties: SmallVec<[StyleProperty; 4]>,
}

fn push_unique<K: PartialEq>(list: &mut SmallVec<[K; 4]>, key: K) {
    if !list.contains(&key) {
        list.push(key);
    }
}

impl Navigator {
    /// Select everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn component(mut self, component: Component) -> Self {
        push_unique(&mut self.components, component);
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: ThemeVariant) -> Self {
        push_unique(&mut self.variants, variant);
        self
    }

    #[must_use]
    pub fn state(mut self, state: InteractionState) -> Self {
        push_unique(&mut self.states, state);
        self
    }

    #[must_use]
    pub fn property(mut self, property: StyleProperty) -> Self {
        push_unique(&mut self.properties, property);
        self
    }
}

/// Keys a write addresses at one level.
fn write_targets<K: StyleKey>(listed: &[K]) -> &[K] {
    if listed.is_empty() { K::ALL } else { listed }
}

/// Present children a read visits at one level.
fn read_targets<'a, K: StyleKey, V>(slots: &'a Slots<K, V>, listed: &[K]) -> SmallVec<[(K, &'a V); 8]> {
    if listed.is_empty() {
        slots.iter().collect()
    } else {
        listed
            .iter()
            .filter_map(|&k| slots.get(k).map(|v| (k, v)))
            .collect()
    }
}

/// What [`CascadeTree::set`] writes at the navigated position.
#[derive(Debug, Clone, PartialEq)]
pub enum Subtree {
    /// Replace whole component nodes.
    Component(ComponentNode),
    /// Replace variant nodes under the selected components.
    Variant(VariantNode),
    /// Replace state patches under the selected variants.
    State(StylePatch),
    /// Set leaf values under the selected states.
    Property(StyleValue),
}

impl From<ComponentNode> for Subtree {
    fn from(node: ComponentNode) -> Self {
        Self::Component(node)
    }
}

impl From<VariantNode> for Subtree {
    fn from(node: VariantNode) -> Self {
        Self::Variant(node)
    }
}

impl From<StylePatch> for Subtree {
    fn from(patch: StylePatch) -> Self {
        Self::State(patch)
    }
}

impl From<StyleValue> for Subtree {
    fn from(value: StyleValue) -> Self {
        Self::Property(value)
    }
}

impl From<Color> for Subtree {
    fn from(color: Color) -> Self {
        Self::Property(StyleValue::Color(color))
    }
}

/// Design-token tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeTree {
    components: Slots<Component, ComponentNode>,
    min_ratio: f64,
    companions: Companions,
}

impl Default for CascadeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl CascadeTree {
    /// Tree holding a fresh `Base` component, reconciling at WCAG AA.
    #[must_use]
    pub fn new() -> Self {
        let mut components = Slots::new();
        components.insert(Component::DEFAULT, ComponentNode::new());
        Self {
            components,
            min_ratio: AA_TEXT,
            companions: Companions::all(),
        }
    }

    /// Tree reconciling at the configured text contrast.
    pub fn from_config(config: &TokenConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            min_ratio: config.text_contrast,
            ..Self::new()
        })
    }

    /// Change the companion contrast threshold.
    pub fn with_min_ratio(mut self, min_ratio: f64) -> Result<Self> {
        self.min_ratio = tint_core::Error::check_range("min_ratio", min_ratio, 1.0, 21.0)?;
        Ok(self)
    }

    /// Change which companions are re-contrasted.
    #[must_use]
    pub fn with_companions(mut self, companions: Companions) -> Self {
        self.companions = companions;
        self
    }

    pub fn min_ratio(&self) -> f64 {
        self.min_ratio
    }

    pub fn companions(&self) -> Companions {
        self.companions
    }

    pub fn component(&self, component: Component) -> Option<&ComponentNode> {
        self.components.get(component)
    }

    /// Present components in enumeration order.
    pub fn components(&self) -> impl Iterator<Item = (Component, &ComponentNode)> + '_ {
        self.components.iter()
    }

    pub fn variant(&self, component: Component, variant: ThemeVariant) -> Option<&VariantNode> {
        self.component(component)?.variant(variant)
    }

    pub fn patch(
        &self,
        component: Component,
        variant: ThemeVariant,
        state: InteractionState,
    ) -> Option<&StylePatch> {
        self.variant(component, variant)?.state(state)
    }

    /// Leaf value at a fully specified position.
    pub fn get(
        &self,
        component: Component,
        variant: ThemeVariant,
        state: InteractionState,
        property: StyleProperty,
    ) -> Option<&StyleValue> {
        self.patch(component, variant, state)?.get(property)
    }

    /// Color leaf at a fully specified position.
    pub fn color(
        &self,
        component: Component,
        variant: ThemeVariant,
        state: InteractionState,
        property: StyleProperty,
    ) -> Option<Color> {
        self.get(component, variant, state, property)
            .and_then(StyleValue::as_color)
    }

    fn variant_entry(&mut self, component: Component, variant: ThemeVariant) -> &mut VariantNode {
        self.components
            .get_or_insert_with(component, ComponentNode::new)
            .variants
            .get_or_insert_with(variant, VariantNode::new)
    }

    /// Store `patch` verbatim, creating intermediates. No companion
    /// re-contrasting happens.
    pub fn insert_patch(
        &mut self,
        component: Component,
        variant: ThemeVariant,
        state: InteractionState,
        patch: StylePatch,
    ) -> Option<StylePatch> {
        self.variant_entry(component, variant).states.insert(state, patch)
    }

    /// Write `value` at every position `nav` selects.
    ///
    /// # Errors
    ///
    /// Propagates contrast errors from companion re-contrasting; with a
    /// validated threshold none occur.
    pub fn set(&mut self, nav: &Navigator, value: impl Into<Subtree>) -> Result<()> {
        let value = value.into();
        let components = write_targets(&nav.components);
        let variants = write_targets(&nav.variants);
        let states = write_targets(&nav.states);
        let properties = write_targets(&nav.properties);

        let mut touched: SmallVec<[(Component, ThemeVariant); 8]> = SmallVec::new();
        let touches_color = match value {
            Subtree::Component(node) => {
                for &c in components {
                    touched.extend(node.variants.keys().map(|v| (c, v)));
                    self.components.insert(c, node.clone());
                }
                node.has_color()
            }
            Subtree::Variant(node) => {
                for &c in components {
                    let comp = self.components.get_or_insert_with(c, ComponentNode::new);
                    for &v in variants {
                        comp.variants.insert(v, node.clone());
                        touched.push((c, v));
                    }
                }
                node.has_color()
            }
            Subtree::State(patch) => {
                for &c in components {
                    for &v in variants {
                        let node = self.variant_entry(c, v);
                        for &s in states {
                            node.states.insert(s, patch.clone());
                        }
                        touched.push((c, v));
                    }
                }
                patch.has_color()
            }
            Subtree::Property(leaf) => {
                for &c in components {
                    for &v in variants {
                        let node = self.variant_entry(c, v);
                        for &s in states {
                            let patch = node.states.get_or_insert_with(s, StylePatch::new);
                            for &p in properties {
                                patch.set(p, leaf.clone());
                            }
                        }
                        touched.push((c, v));
                    }
                }
                properties.iter().any(|p| p.is_color())
            }
        };

        tint_core::trace!(variants = touched.len(), touches_color, "cascade set");

        if touches_color {
            let mut adjusted = 0;
            for (c, v) in touched {
                if let Some(node) = self
                    .components
                    .get_mut(c)
                    .and_then(|comp| comp.variants.get_mut(v))
                {
                    adjusted += node.reconcile(self.companions, self.min_ratio)?;
                }
            }
            tint_core::trace!(adjusted, "companions re-contrasted");
        }
        Ok(())
    }

    /// Re-contrast companions everywhere. Returns how many values changed.
    pub fn reconcile(&mut self) -> Result<usize> {
        let (companions, min_ratio) = (self.companions, self.min_ratio);
        let mut adjusted = 0;
        for (_, comp) in self.components.iter_mut() {
            for (_, node) in comp.variants.iter_mut() {
                adjusted += node.reconcile(companions, min_ratio)?;
            }
        }
        Ok(adjusted)
    }

    /// `self` with `over` layered on top. Configuration comes from `self`.
    ///
    /// Every variant that `over` contributes colors to is re-contrasted
    /// afterwards.
    pub fn cascade(&self, over: &Self) -> Result<Self> {
        let mut out = self.clone();
        out.layer(over)?;
        Ok(out)
    }

    /// Layer trees left to right; `None` for an empty input.
    pub fn cascade_all<'a>(
        layers: impl IntoIterator<Item = &'a CascadeTree>,
    ) -> Result<Option<Self>> {
        let mut layers = layers.into_iter();
        let Some(first) = layers.next() else {
            return Ok(None);
        };
        let mut out = first.clone();
        for layer in layers {
            out.layer(layer)?;
        }
        Ok(Some(out))
    }

    fn layer(&mut self, over: &Self) -> Result<usize> {
        self.components.merge_from(&over.components);
        let (companions, min_ratio) = (self.companions, self.min_ratio);
        let mut adjusted = 0;
        for (c, comp) in over.components.iter() {
            for (v, node) in comp.variants.iter() {
                if !node.has_color() {
                    continue;
                }
                if let Some(merged) = self
                    .components
                    .get_mut(c)
                    .and_then(|comp| comp.variants.get_mut(v))
                {
                    adjusted += merged.reconcile(companions, min_ratio)?;
                }
            }
        }
        tint_core::trace!(adjusted, "cascade layer re-contrasted");
        Ok(adjusted)
    }

    /// Emit the selected declarations as CSS text.
    ///
    /// Without a prefix, leaves render as `property:value;`. With one, they
    /// render as `--prefix-component-variant-state-property:value;`.
    #[must_use]
    pub fn build(&self, nav: &Navigator, var_prefix: Option<&str>) -> String {
        self.declarations(nav, var_prefix).to_css()
    }

    /// Selected declarations, in traversal order.
    #[must_use]
    pub fn declarations(&self, nav: &Navigator, var_prefix: Option<&str>) -> DeclarationBlock {
        let span = tint_core::trace_span!("cascade_build");
        let _guard = span.enter();
        let root = var_prefix.map(normalize_key);
        let mut block = DeclarationBlock::new();

        for (c, comp) in read_targets(&self.components, &nav.components) {
            let comp_path = root.as_deref().map(|p| join_segments([p, c.css_name()]));
            for (v, node) in read_targets(&comp.variants, &nav.variants) {
                let variant_path = comp_path.as_deref().map(|p| join_segments([p, v.css_name()]));
                for (s, patch) in read_targets(&node.states, &nav.states) {
                    let state_path =
                        variant_path.as_deref().map(|p| join_segments([p, s.css_name()]));
                    for (p, leaf) in read_targets(patch.values(), &nav.properties) {
                        if !leaf.is_emittable() {
                            tint_core::trace!(property = p.css_name(), "skipping non-emittable value");
                            continue;
                        }
                        let declaration = match state_path.as_deref() {
                            Some(path) => {
                                Declaration::custom(&join_segments([path, p.css_name()]), leaf.to_css())
                            }
                            None => Declaration::new(p.css_name(), leaf.to_css()),
                        };
                        block.push(declaration);
                    }
                }
            }
        }
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::contrast_ratio;

    fn nav() -> Navigator {
        Navigator::new()
    }

    fn base_light() -> Navigator {
        nav()
            .component(Component::Base)
            .variant(ThemeVariant::Light)
            .state(InteractionState::Default)
    }

    // --- construction ---

    #[test]
    fn new_tree_holds_level_defaults() {
        let tree = CascadeTree::new();
        let keys: Vec<_> = tree.components().map(|(c, _)| c).collect();
        assert_eq!(keys, vec![Component::Base]);
        let patch = tree
            .patch(Component::Base, ThemeVariant::Light, InteractionState::Default)
            .unwrap();
        assert!(patch.is_empty());
        assert_eq!(tree.build(&nav(), None), "");
    }

    #[test]
    fn fresh_nodes_hold_defaults() {
        let node = ComponentNode::new();
        assert!(node.variant(ThemeVariant::Light).is_some());
        assert!(node.variant(ThemeVariant::Dark).is_none());
        let variant = VariantNode::new();
        assert!(variant.state(InteractionState::Default).is_some());
        assert_eq!(variant.states().count(), 1);
    }

    #[test]
    fn from_config_uses_text_contrast() {
        let config = TokenConfig {
            text_contrast: 7.0,
            ..TokenConfig::default()
        };
        assert_eq!(CascadeTree::from_config(&config).unwrap().min_ratio(), 7.0);
        let bad = TokenConfig {
            text_contrast: 0.0,
            ..TokenConfig::default()
        };
        assert!(CascadeTree::from_config(&bad).is_err());
        assert!(CascadeTree::new().with_min_ratio(30.0).is_err());
    }

    // --- set ---

    #[test]
    fn set_leaf_creates_intermediates() {
        let mut tree = CascadeTree::new();
        let nav = nav()
            .component(Component::Button)
            .variant(ThemeVariant::Dark)
            .state(InteractionState::Hovered)
            .property(StyleProperty::Padding);
        tree.set(&nav, StyleValue::px(6.0)).unwrap();

        let button = tree.component(Component::Button).unwrap();
        // Fresh component got its Light default as well as the requested Dark.
        assert!(button.variant(ThemeVariant::Light).is_some());
        let dark = button.variant(ThemeVariant::Dark).unwrap();
        assert!(dark.state(InteractionState::Default).unwrap().is_empty());
        assert_eq!(
            tree.get(
                Component::Button,
                ThemeVariant::Dark,
                InteractionState::Hovered,
                StyleProperty::Padding
            ),
            Some(&StyleValue::px(6.0))
        );
    }

    #[test]
    fn empty_level_means_every_key() {
        let mut tree = CascadeTree::new();
        let nav = nav()
            .component(Component::Base)
            .state(InteractionState::Default)
            .property(StyleProperty::Gap);
        tree.set(&nav, StyleValue::px(2.0)).unwrap();
        let base = tree.component(Component::Base).unwrap();
        assert_eq!(base.variants().count(), ThemeVariant::ALL.len());
    }

    #[test]
    fn set_state_replaces_patch() {
        let mut tree = CascadeTree::new();
        tree.set(
            &base_light().property(StyleProperty::Gap),
            StyleValue::px(2.0),
        )
        .unwrap();
        tree.set(
            &base_light(),
            StylePatch::new().with(StyleProperty::Padding, StyleValue::px(1.0)),
        )
        .unwrap();
        let patch = tree
            .patch(Component::Base, ThemeVariant::Light, InteractionState::Default)
            .unwrap();
        assert_eq!(patch.len(), 1);
        assert!(patch.get(StyleProperty::Gap).is_none());
    }

    #[test]
    fn set_component_replaces_subtree() {
        let mut tree = CascadeTree::new();
        tree.set(
            &nav().component(Component::Card).variant(ThemeVariant::Dark).property(StyleProperty::Gap),
            StyleValue::px(3.0),
        )
        .unwrap();
        tree.set(&nav().component(Component::Card), ComponentNode::new())
            .unwrap();
        let card = tree.component(Component::Card).unwrap();
        assert!(card.variant(ThemeVariant::Dark).is_none());
    }

    #[test]
    fn background_change_recontrasts_companions() {
        let mut tree = CascadeTree::new();
        let grey = Color::rgb(0x77, 0x77, 0x77);
        tree.set(
            &base_light(),
            StylePatch::new()
                .with(StyleProperty::BackgroundColor, Color::BLACK)
                .with(StyleProperty::ForegroundColor, grey)
                .with(StyleProperty::BorderColor, grey),
        )
        .unwrap();
        // Grey on black already passes.
        assert_eq!(
            tree.color(Component::Base, ThemeVariant::Light, InteractionState::Default, StyleProperty::ForegroundColor),
            Some(grey)
        );

        tree.set(
            &base_light().property(StyleProperty::BackgroundColor),
            Color::rgb(0x70, 0x70, 0x70),
        )
        .unwrap();
        let bg = Color::rgb(0x70, 0x70, 0x70);
        for property in [StyleProperty::ForegroundColor, StyleProperty::BorderColor] {
            let fg = tree
                .color(Component::Base, ThemeVariant::Light, InteractionState::Default, property)
                .unwrap();
            assert_ne!(fg, grey);
            assert!(contrast_ratio(fg, bg).unwrap() >= AA_TEXT, "{property:?}");
        }
    }

    #[test]
    fn states_without_background_use_default_state_background() {
        let mut tree = CascadeTree::new();
        tree.set(
            &base_light().property(StyleProperty::BackgroundColor),
            Color::WHITE,
        )
        .unwrap();
        tree.set(
            &nav()
                .component(Component::Base)
                .variant(ThemeVariant::Light)
                .state(InteractionState::Hovered)
                .property(StyleProperty::ForegroundColor),
            Color::rgb(0xEE, 0xEE, 0xEE),
        )
        .unwrap();
        let fg = tree
            .color(Component::Base, ThemeVariant::Light, InteractionState::Hovered, StyleProperty::ForegroundColor)
            .unwrap();
        assert!(contrast_ratio(fg, Color::WHITE).unwrap() >= AA_TEXT);
    }

    #[test]
    fn companion_mask_limits_reconciliation() {
        let mut tree = CascadeTree::new().with_companions(Companions::FOREGROUND);
        let grey = Color::rgb(0xF0, 0xF0, 0xF0);
        tree.set(
            &base_light(),
            StylePatch::new()
                .with(StyleProperty::BackgroundColor, Color::WHITE)
                .with(StyleProperty::ForegroundColor, grey)
                .with(StyleProperty::OutlineColor, grey),
        )
        .unwrap();
        let at = |p| {
            tree.color(Component::Base, ThemeVariant::Light, InteractionState::Default, p)
                .unwrap()
        };
        assert_ne!(at(StyleProperty::ForegroundColor), grey);
        assert_eq!(at(StyleProperty::OutlineColor), grey);
    }

    #[test]
    fn non_color_writes_do_not_reconcile() {
        let mut tree = CascadeTree::new();
        let grey = Color::rgb(0xF0, 0xF0, 0xF0);
        tree.insert_patch(
            Component::Base,
            ThemeVariant::Light,
            InteractionState::Default,
            StylePatch::new()
                .with(StyleProperty::BackgroundColor, Color::WHITE)
                .with(StyleProperty::ForegroundColor, grey),
        );
        tree.set(&base_light().property(StyleProperty::Gap), StyleValue::px(1.0))
            .unwrap();
        assert_eq!(
            tree.color(Component::Base, ThemeVariant::Light, InteractionState::Default, StyleProperty::ForegroundColor),
            Some(grey)
        );
        assert_eq!(tree.reconcile().unwrap(), 1);
    }

    // --- cascade ---

    #[test]
    fn cascade_later_present_values_win() {
        let mut base = CascadeTree::new();
        base.set(
            &base_light(),
            StylePatch::new()
                .with(StyleProperty::Padding, StyleValue::px(4.0))
                .with(StyleProperty::Gap, StyleValue::px(2.0)),
        )
        .unwrap();
        let mut over = CascadeTree::new();
        over.set(&base_light().property(StyleProperty::Padding), StyleValue::px(8.0))
            .unwrap();
        over.set(
            &nav().component(Component::Link).variant(ThemeVariant::Light).state(InteractionState::Visited).property(StyleProperty::Cursor),
            StyleValue::keyword("pointer"),
        )
        .unwrap();

        let merged = base.cascade(&over).unwrap();
        let at = |p| merged.get(Component::Base, ThemeVariant::Light, InteractionState::Default, p);
        assert_eq!(at(StyleProperty::Padding), Some(&StyleValue::px(8.0)));
        assert_eq!(at(StyleProperty::Gap), Some(&StyleValue::px(2.0)));
        assert!(merged.component(Component::Link).is_some());
        // Inputs are unchanged.
        assert!(base.component(Component::Link).is_none());
    }

    #[test]
    fn cascade_all_folds_left_to_right() {
        let layer = |px: f64| {
            let mut t = CascadeTree::new();
            t.set(&base_light().property(StyleProperty::Gap), StyleValue::px(px))
                .unwrap();
            t
        };
        let layers = [layer(1.0), layer(2.0), layer(3.0)];
        let merged = CascadeTree::cascade_all(&layers).unwrap().unwrap();
        assert_eq!(
            merged.get(Component::Base, ThemeVariant::Light, InteractionState::Default, StyleProperty::Gap),
            Some(&StyleValue::px(3.0))
        );
        assert!(CascadeTree::cascade_all(std::iter::empty()).unwrap().is_none());
    }

    #[test]
    fn overlaid_background_recontrasts_base_companions() {
        let ink = Color::rgb(0x33, 0x33, 0x33);
        let mut base = CascadeTree::new();
        base.set(
            &base_light(),
            StylePatch::new()
                .with(StyleProperty::BackgroundColor, Color::WHITE)
                .with(StyleProperty::ForegroundColor, ink),
        )
        .unwrap();
        let dark = Color::rgb(0x20, 0x20, 0x20);
        let mut over = CascadeTree::new();
        over.set(&base_light().property(StyleProperty::BackgroundColor), dark)
            .unwrap();

        let fg_of = |tree: &CascadeTree| {
            tree.color(Component::Base, ThemeVariant::Light, InteractionState::Default, StyleProperty::ForegroundColor)
                .unwrap()
        };
        let merged = base.cascade(&over).unwrap();
        assert_ne!(fg_of(&merged), ink);
        assert!(contrast_ratio(fg_of(&merged), dark).unwrap() >= AA_TEXT);

        let folded = CascadeTree::cascade_all([&base, &over]).unwrap().unwrap();
        assert_eq!(fg_of(&folded), fg_of(&merged));
        // The base layer keeps its own colors.
        assert_eq!(fg_of(&base), ink);
    }

    #[test]
    fn colorless_overlay_leaves_companions_alone() {
        let pale = Color::rgb(0xF0, 0xF0, 0xF0);
        let mut base = CascadeTree::new();
        base.insert_patch(
            Component::Base,
            ThemeVariant::Light,
            InteractionState::Default,
            StylePatch::new()
                .with(StyleProperty::BackgroundColor, Color::WHITE)
                .with(StyleProperty::ForegroundColor, pale),
        );
        let mut over = CascadeTree::new();
        over.set(&base_light().property(StyleProperty::Gap), StyleValue::px(4.0))
            .unwrap();
        let merged = base.cascade(&over).unwrap();
        assert_eq!(
            merged.color(Component::Base, ThemeVariant::Light, InteractionState::Default, StyleProperty::ForegroundColor),
            Some(pale)
        );
    }

    // --- build ---

    #[test]
    fn build_bare_declarations() {
        let mut tree = CascadeTree::new();
        tree.set(
            &base_light(),
            StylePatch::new()
                .with(StyleProperty::Padding, StyleValue::px(4.0))
                .with(StyleProperty::BorderStyle, StyleValue::keyword("solid")),
        )
        .unwrap();
        assert_eq!(tree.build(&nav(), None), "border-style:solid;padding:4px;");
    }

    #[test]
    fn build_with_prefix_accumulates_keys() {
        let mut tree = CascadeTree::new();
        tree.set(
            &nav()
                .component(Component::Button)
                .variant(ThemeVariant::HighContrastDark)
                .state(InteractionState::Focused)
                .property(StyleProperty::OutlineWidth),
            StyleValue::px(2.0),
        )
        .unwrap();
        let css = tree.build(
            &nav()
                .component(Component::Button)
                .variant(ThemeVariant::HighContrastDark),
            Some("DS"),
        );
        assert_eq!(css, "--ds-button-high-contrast-dark-focused-outline-width:2px;");
    }

    #[test]
    fn build_visits_requested_keys_and_skips_absent() {
        let mut tree = CascadeTree::new();
        tree.set(
            &base_light().property(StyleProperty::Gap),
            StyleValue::px(1.0),
        )
        .unwrap();
        tree.set(
            &base_light().property(StyleProperty::Padding),
            StyleValue::px(2.0),
        )
        .unwrap();
        let css = tree.build(
            &nav()
                .component(Component::Dialog)
                .component(Component::Base)
                .property(StyleProperty::Padding)
                .property(StyleProperty::Gap),
            None,
        );
        // Requested order, not enumeration order.
        assert_eq!(css, "padding:2px;gap:1px;");
    }

    #[test]
    fn build_skips_non_finite_values() {
        let mut tree = CascadeTree::new();
        tree.set(
            &base_light(),
            StylePatch::new()
                .with(StyleProperty::Opacity, StyleValue::Number(f64::NAN))
                .with(StyleProperty::Padding, StyleValue::Length(f64::INFINITY, crate::value::LengthUnit::Px))
                .with(StyleProperty::Gap, StyleValue::px(2.0)),
        )
        .unwrap();
        assert_eq!(tree.build(&nav(), None), "gap:2px;");
        assert_eq!(tree.build(&nav(), Some("ds")), "--ds-base-light-default-gap:2px;");
    }

    #[test]
    fn build_is_read_only() {
        let mut tree = CascadeTree::new();
        tree.set(&base_light().property(StyleProperty::Opacity), StyleValue::Number(0.5))
            .unwrap();
        let before = tree.clone();
        let first = tree.build(&nav(), Some("x"));
        let second = tree.build(&nav(), Some("x"));
        assert_eq!(first, second);
        assert_eq!(tree, before);
    }

    #[test]
    fn companions_bitflags_map_to_properties() {
        let props: Vec<_> = (Companions::ACCENT | Companions::CARET).properties().collect();
        assert_eq!(props, vec![StyleProperty::AccentColor, StyleProperty::CaretColor]);
        assert_eq!(Companions::default().properties().count(), 6);
    }
}
