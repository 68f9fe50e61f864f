#![forbid(unsafe_code)]

//! Sparse, ordinal-indexed maps and the property patch at each tree leaf.
//!
//! [`Slots`] stores one optional entry per key of a closed key set, indexed
//! by the key's ordinal. Iteration always follows enumeration order.
//! [`StylePatch`] is the property map of a single state; absent entries mean
//! "not overridden".

use std::fmt;
use std::marker::PhantomData;

use tint_color::Color;

use crate::keys::{StyleKey, StyleProperty};
use crate::value::StyleValue;

/// Sparse override merge: values present in `over` win, absent ones keep
/// `self`'s value.
pub trait Cascade {
    fn merge_from(&mut self, over: &Self);

    /// `self` with `over` merged on top.
    #[must_use]
    fn merged(&self, over: &Self) -> Self
    where
        Self: Clone,
    {
        let mut out = self.clone();
        out.merge_from(over);
        out
    }
}

/// One optional `V` per key of `K`.
pub struct Slots<K: StyleKey, V> {
    slots: Box<[Option<V>]>,
    _key: PhantomData<fn() -> K>,
}

impl<K: StyleKey, V> Slots<K, V> {
    /// All slots empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(K::COUNT).collect(),
            _key: PhantomData,
        }
    }

    #[inline]
    pub fn get(&self, key: K) -> Option<&V> {
        self.slots[key.index()].as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.slots[key.index()].as_mut()
    }

    /// Store `value`, returning the previous entry.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.slots[key.index()].replace(value)
    }

    pub fn remove(&mut self, key: K) -> Option<V> {
        self.slots[key.index()].take()
    }

    #[inline]
    pub fn contains(&self, key: K) -> bool {
        self.slots[key.index()].is_some()
    }

    /// Entry for `key`, created with `make` if absent.
    pub fn get_or_insert_with(&mut self, key: K, make: impl FnOnce() -> V) -> &mut V {
        self.slots[key.index()].get_or_insert_with(make)
    }

    /// Present entries in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        K::ALL
            .iter()
            .zip(self.slots.iter())
            .filter_map(|(&k, slot)| slot.as_ref().map(|v| (k, v)))
    }

    /// Present entries in enumeration order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (K, &mut V)> + '_ {
        K::ALL
            .iter()
            .zip(self.slots.iter_mut())
            .filter_map(|(&k, slot)| slot.as_mut().map(|v| (k, v)))
    }

    /// Present keys in enumeration order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

impl<K: StyleKey, V> Default for Slots<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StyleKey, V: Clone> Clone for Slots<K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            _key: PhantomData,
        }
    }
}

impl<K: StyleKey, V: PartialEq> PartialEq for Slots<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl<K: StyleKey, V: fmt::Debug> fmt::Debug for Slots<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: StyleKey, V: Cascade + Clone> Cascade for Slots<K, V> {
    fn merge_from(&mut self, over: &Self) {
        for (key, value) in over.iter() {
            match self.get_mut(key) {
                Some(existing) => existing.merge_from(value),
                None => {
                    self.insert(key, value.clone());
                }
            }
        }
    }
}

/// Property overrides for one interaction state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylePatch {
    values: Slots<StyleProperty, StyleValue>,
}

impl StylePatch {
    /// Empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`StylePatch::set`].
    #[must_use]
    pub fn with(mut self, property: StyleProperty, value: impl Into<StyleValue>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: StyleProperty, value: impl Into<StyleValue>) -> Option<StyleValue> {
        self.values.insert(property, value.into())
    }

    pub fn get(&self, property: StyleProperty) -> Option<&StyleValue> {
        self.values.get(property)
    }

    /// Color stored under `property`, if it holds one.
    pub fn color(&self, property: StyleProperty) -> Option<Color> {
        self.get(property).and_then(StyleValue::as_color)
    }

    pub fn remove(&mut self, property: StyleProperty) -> Option<StyleValue> {
        self.values.remove(property)
    }

    /// Overridden properties in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, &StyleValue)> + '_ {
        self.values.iter()
    }

    /// Whether any color property is overridden.
    pub fn has_color(&self) -> bool {
        self.values.iter().any(|(_, v)| v.is_color())
    }

    /// Underlying ordinal map.
    pub(crate) fn values(&self) -> &Slots<StyleProperty, StyleValue> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Cascade for StylePatch {
    fn merge_from(&mut self, over: &Self) {
        for (property, value) in over.values.iter() {
            self.values.insert(property, value.clone());
        }
    }
}

impl FromIterator<(StyleProperty, StyleValue)> for StylePatch {
    fn from_iter<I: IntoIterator<Item = (StyleProperty, StyleValue)>>(iter: I) -> Self {
        let mut patch = Self::new();
        for (property, value) in iter {
            patch.set(property, value);
        }
        patch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::ThemeVariant;

    #[test]
    fn slots_iterate_in_enum_order() {
        let mut slots: Slots<ThemeVariant, u32> = Slots::new();
        slots.insert(ThemeVariant::HighContrastDark, 4);
        slots.insert(ThemeVariant::Light, 1);
        let keys: Vec<_> = slots.keys().collect();
        assert_eq!(keys, vec![ThemeVariant::Light, ThemeVariant::HighContrastDark]);
        assert_eq!(slots.len(), 2);
        assert!(!slots.contains(ThemeVariant::Dark));
    }

    #[test]
    fn slots_insert_replaces_and_remove_clears() {
        let mut slots: Slots<ThemeVariant, &str> = Slots::new();
        assert_eq!(slots.insert(ThemeVariant::Dark, "a"), None);
        assert_eq!(slots.insert(ThemeVariant::Dark, "b"), Some("a"));
        assert_eq!(slots.remove(ThemeVariant::Dark), Some("b"));
        assert!(slots.is_empty());
    }

    #[test]
    fn get_or_insert_with_creates_once() {
        let mut slots: Slots<ThemeVariant, Vec<u8>> = Slots::new();
        slots.get_or_insert_with(ThemeVariant::Dark, Vec::new).push(1);
        slots.get_or_insert_with(ThemeVariant::Dark, || vec![9]).push(2);
        assert_eq!(slots.get(ThemeVariant::Dark), Some(&vec![1, 2]));
    }

    #[test]
    fn patch_merge_later_present_wins() {
        let base = StylePatch::new()
            .with(StyleProperty::BackgroundColor, Color::WHITE)
            .with(StyleProperty::Padding, StyleValue::px(4.0));
        let over = StylePatch::new().with(StyleProperty::BackgroundColor, Color::BLACK);
        let merged = base.merged(&over);
        assert_eq!(merged.color(StyleProperty::BackgroundColor), Some(Color::BLACK));
        assert_eq!(merged.get(StyleProperty::Padding), Some(&StyleValue::px(4.0)));
        // Base is untouched.
        assert_eq!(base.color(StyleProperty::BackgroundColor), Some(Color::WHITE));
    }

    #[test]
    fn nested_slots_merge_recursively() {
        let mut base: Slots<ThemeVariant, StylePatch> = Slots::new();
        base.insert(
            ThemeVariant::Light,
            StylePatch::new().with(StyleProperty::Gap, StyleValue::px(2.0)),
        );
        let mut over: Slots<ThemeVariant, StylePatch> = Slots::new();
        over.insert(
            ThemeVariant::Light,
            StylePatch::new().with(StyleProperty::Padding, StyleValue::px(8.0)),
        );
        over.insert(ThemeVariant::Dark, StylePatch::new());
        base.merge_from(&over);

        let light = base.get(ThemeVariant::Light).unwrap();
        assert_eq!(light.len(), 2);
        assert!(base.contains(ThemeVariant::Dark));
    }

    #[test]
    fn patch_reports_colors() {
        let patch = StylePatch::new().with(StyleProperty::Cursor, StyleValue::keyword("pointer"));
        assert!(!patch.has_color());
        let patch = patch.with(StyleProperty::CaretColor, Color::BLACK);
        assert!(patch.has_color());
        assert_eq!(patch.color(StyleProperty::Cursor), None);
    }

    #[test]
    fn collects_from_pairs() {
        let patch: StylePatch = [
            (StyleProperty::Opacity, StyleValue::Number(0.5)),
            (StyleProperty::Opacity, StyleValue::Number(0.8)),
        ]
        .into_iter()
        .collect();
        assert_eq!(patch.len(), 1);
        assert_eq!(patch.get(StyleProperty::Opacity), Some(&StyleValue::Number(0.8)));
    }
}
