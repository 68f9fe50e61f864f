#![forbid(unsafe_code)]

//! Border and divider colors that meet non-text contrast.
//!
//! A border sits between an outer background and (optionally) a component
//! fill. Two candidates are derived, one from each surface pushed away from
//! itself, and the one that passes with the least excess contrast wins.
//! The result is then kept subordinate to the foreground text.

use tint_color::Color;
use tint_core::{Error, Result};

use crate::contrast::{NON_TEXT, ensure_minimum_contrast, ratio, strong_stroke};

/// Blend toward the fill when the border outshines the foreground.
pub const HIERARCHY_BLEND: f64 = 0.15;
/// Below this ratio against the foreground, the border reads as the text.
pub const MERGE_THRESHOLD: f64 = 1.5;
/// Nudge toward the strong stroke pole when the border merges.
pub const MERGE_NUDGE: f64 = 0.10;

/// Inputs for [`derive_border`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderRequest {
    /// Foreground (text) color drawn inside the component.
    pub base: Color,
    /// Background outside the component.
    pub outer: Color,
    /// Component fill; `None` means the component is transparent.
    pub fill: Option<Color>,
    pub min_ratio: f64,
    /// Emit the foreground itself as a maximal outline.
    pub high_contrast: bool,
}

impl BorderRequest {
    /// Request with the WCAG non-text threshold and no fill.
    #[must_use]
    pub fn new(base: Color, outer: Color) -> Self {
        Self {
            base,
            outer,
            fill: None,
            min_ratio: NON_TEXT,
            high_contrast: false,
        }
    }

    #[must_use]
    pub fn fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    #[must_use]
    pub fn min_ratio(mut self, min_ratio: f64) -> Self {
        self.min_ratio = min_ratio;
        self
    }

    #[must_use]
    pub fn high_contrast(mut self, enabled: bool) -> Self {
        self.high_contrast = enabled;
        self
    }
}

/// Which surface the border was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderSource {
    Fill,
    Outer,
    /// High-contrast mode: the foreground color.
    Foreground,
}

/// A derived border with the decisions that shaped it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderOutcome {
    pub color: Color,
    pub source: BorderSource,
    /// Smallest passing ratio of the chosen candidate (`+∞` if none passed).
    pub score: f64,
    /// Blended toward the fill to stay below the foreground's contrast.
    pub softened: bool,
    /// Nudged toward a pole to separate it from the foreground.
    pub nudged: bool,
}

/// Score a candidate: its smallest ratio that passes across both
/// adjacencies, or `+∞` if neither passes.
fn score(candidate: Color, fill: Color, outer: Color, min_ratio: f64) -> f64 {
    [ratio(candidate, fill), ratio(candidate, outer)]
        .into_iter()
        .filter(|&r| r >= min_ratio)
        .fold(f64::INFINITY, f64::min)
}

/// Derive a border color.
///
/// # Errors
///
/// [`Error::InvalidArgumentRange`] when `min_ratio` is outside `[1, 21]`.
pub fn derive_border(request: &BorderRequest) -> Result<BorderOutcome> {
    let min_ratio = Error::check_range("min_ratio", request.min_ratio, 1.0, 21.0)?;
    let base = request.base;

    if request.high_contrast {
        return Ok(BorderOutcome {
            color: base,
            source: BorderSource::Foreground,
            score: ratio(base, request.fill.unwrap_or(request.outer)),
            softened: false,
            nudged: false,
        });
    }

    let outer = request.outer;
    let fill = request.fill.unwrap_or(outer);

    let from_fill = ensure_minimum_contrast(fill, fill, min_ratio)?.color;
    let from_outer = ensure_minimum_contrast(outer, outer, min_ratio)?.color;
    let fill_score = score(from_fill, fill, outer, min_ratio);
    let outer_score = score(from_outer, fill, outer, min_ratio);

    let (mut color, source, chosen_score) = if outer_score < fill_score {
        (from_outer, BorderSource::Outer, outer_score)
    } else {
        (from_fill, BorderSource::Fill, fill_score)
    };

    let softened = ratio(color, fill) > ratio(base, fill);
    if softened {
        color = color.mix_linear_light(fill, HIERARCHY_BLEND);
    }

    let nudged = ratio(color, base) < MERGE_THRESHOLD;
    if nudged {
        let pole = strong_stroke(fill).with_alpha(color.a().value());
        color = color.mix_linear_light(pole, MERGE_NUDGE);
    }

    tint_core::trace!(?source, score = chosen_score, softened, nudged, "border derived");

    Ok(BorderOutcome {
        color,
        source,
        score: chosen_score,
        softened,
        nudged,
    })
}

/// Border for `base` text between `outer` and an optional `fill`, at the
/// WCAG non-text threshold.
pub fn border_color(base: Color, outer: Color, fill: Option<Color>) -> Result<Color> {
    let mut request = BorderRequest::new(base, outer);
    request.fill = fill;
    derive_border(&request).map(|outcome| outcome.color)
}
