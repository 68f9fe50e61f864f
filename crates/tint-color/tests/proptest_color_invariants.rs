//! Property-based invariant tests for color values and parsing.
//!
//! 1. `#RRGGBBAA` output parses back to the same channels.
//! 2. HSV → RGB → HSV reproduces RGB within ±1 for saturated colors.
//! 3. Derived HSV stays in range.
//! 4. Equality ignores how a color was built.
//! 5. Parsing arbitrary text never panics.
//! 6. Value-rail transforms keep alpha.

use proptest::prelude::*;
use tint_color::{Channel, Color};

// ── Helpers ─────────────────────────────────────────────────────────────

fn color_strategy() -> impl Strategy<Value = Color> {
    any::<u32>().prop_map(Color::from_u32)
}

fn saturated_strategy() -> impl Strategy<Value = Color> {
    (any::<u8>(), any::<u8>(), any::<u8>())
        .prop_filter("needs chroma", |(r, g, b)| !(r == g && g == b))
        .prop_map(|(r, g, b)| Color::rgb(r, g, b))
}

fn channel_distance(a: Channel, b: Channel) -> u8 {
    a.value().abs_diff(b.value())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Canonical hex round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn hex_round_trip(c in color_strategy()) {
        let text = c.to_hex();
        prop_assert_eq!(text.len(), 9);
        prop_assert_eq!(text.to_uppercase(), text.clone());
        let back = Color::parse(&text).unwrap();
        prop_assert_eq!(back, c, "round trip through {}", text);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. HSV round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn hsv_round_trip_within_one(c in saturated_strategy()) {
        prop_assume!(c.saturation() > 0.0);
        let back = Color::from_hsv(c.hue(), c.saturation(), c.value()).unwrap();
        prop_assert!(channel_distance(back.r(), c.r()) <= 1, "{} vs {}", back, c);
        prop_assert!(channel_distance(back.g(), c.g()) <= 1, "{} vs {}", back, c);
        prop_assert!(channel_distance(back.b(), c.b()) <= 1, "{} vs {}", back, c);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. HSV ranges
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn derived_hsv_in_range(c in color_strategy()) {
        prop_assert!((0.0..360.0).contains(&c.hue()), "hue {}", c.hue());
        prop_assert!((0.0..=1.0).contains(&c.saturation()));
        prop_assert!((0.0..=1.0).contains(&c.value()));
    }

    #[test]
    fn from_hsv_accepts_any_finite_hue(h in -10_000.0f64..10_000.0, s in 0.0f64..=1.0, v in 0.0f64..=1.0) {
        let c = Color::from_hsv(h, s, v).unwrap();
        prop_assert!((0.0..360.0).contains(&c.hue()));
        prop_assert!(c.is_opaque());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Equality is channel-only
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn equality_matches_packed_channels(a in color_strategy(), b in color_strategy()) {
        prop_assert_eq!(a == b, a.to_u32() == b.to_u32());
        prop_assert_eq!(a.cmp(&b), a.to_u32().cmp(&b.to_u32()));
    }

    #[test]
    fn rgb_function_matches_hex(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let from_fn = Color::parse(&format!("rgb({r}, {g}, {b})")).unwrap();
        let from_space = Color::parse(&format!("rgb({r} {g} {b})")).unwrap();
        let from_hex = Color::parse(&format!("#{r:02x}{g:02x}{b:02x}")).unwrap();
        prop_assert_eq!(from_fn, from_hex);
        prop_assert_eq!(from_space, from_hex);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Parsing never panics
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn parse_arbitrary_text_never_panics(s in ".{0,40}") {
        let _ = Color::try_parse(&s);
    }

    #[test]
    fn parse_function_shaped_text_never_panics(
        name in "(rgb|rgba|hsv|hsva|foo)",
        body in "[0-9a-z.,%/ -]{0,24}",
    ) {
        let _ = Color::try_parse(&format!("{name}({body})"));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Transforms keep alpha
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn value_transforms_keep_alpha(c in color_strategy(), v in 0.0f64..=1.0, amount in 0.0f64..=1.0) {
        prop_assert_eq!(c.with_value(v).a(), c.a());
        prop_assert_eq!(c.lighten(amount).a(), c.a());
        prop_assert_eq!(c.darken(amount).a(), c.a());
        prop_assert_eq!(c.desaturate(amount).a(), c.a());
    }

    #[test]
    fn lighten_never_lowers_value(c in color_strategy(), amount in 0.0f64..=1.0) {
        prop_assert!(c.lighten(amount).value() + 1.0 / 255.0 >= c.value());
        prop_assert!(c.darken(amount).value() <= c.value() + 1.0 / 255.0);
    }
}
