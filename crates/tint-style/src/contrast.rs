#![forbid(unsafe_code)]

//! WCAG 2.x luminance, contrast ratios, and contrast resolution.
//!
//! [`ensure_minimum_contrast`] adjusts a color until it reaches a minimum
//! ratio against a background, trying three rails in a fixed order:
//!
//! 1. the HSV value rail (hue and saturation held fixed), in the direction
//!    picked by probing V ± [`DIRECTION_PROBE`],
//! 2. a gamma-correct blend toward white,
//! 3. a gamma-correct blend toward black.
//!
//! Each rail is a bisection bounded by [`SEARCH_ITERATIONS`] steps and
//! [`SEARCH_EPSILON`] on its parameter. The first rail that meets the ratio
//! wins; if none does, the highest ratio seen on any rail is returned.
//! Resolution never fails for a valid ratio.

use smallvec::SmallVec;
use tint_color::Color;
use tint_core::{Error, Result};

/// WCAG AA minimum for body text.
pub const AA_TEXT: f64 = 4.5;
/// WCAG AA minimum for large text.
pub const AA_LARGE_TEXT: f64 = 3.0;
/// WCAG AAA minimum for body text.
pub const AAA_TEXT: f64 = 7.0;
/// WCAG 1.4.11 minimum for UI strokes and icons.
pub const NON_TEXT: f64 = 3.0;

/// Bisection step budget per rail.
pub const SEARCH_ITERATIONS: usize = 18;
/// Bisection stops once the bracket is narrower than this.
pub const SEARCH_EPSILON: f64 = 1e-4;
/// Distance along V used to pick the search direction.
pub const DIRECTION_PROBE: f64 = 0.02;

/// Background luminance at which black and white give the same contrast:
/// `sqrt(1.05 * 0.05) - 0.05`.
pub const CROSSOVER_LUMINANCE: f64 = 0.179_128_784_747_792;

const LUMINANCE_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// WCAG relative luminance of the RGB channels (alpha ignored).
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    LUMINANCE_WEIGHTS[0] * color.r().to_linear()
        + LUMINANCE_WEIGHTS[1] * color.g().to_linear()
        + LUMINANCE_WEIGHTS[2] * color.b().to_linear()
}

/// Contrast ratio of two relative luminances.
///
/// # Errors
///
/// [`Error::InvalidOperation`] when either luminance or the result is NaN
/// or infinite.
pub fn contrast_ratio_from_luminance(a: f64, b: f64) -> Result<f64> {
    // max/min ignore a NaN operand.
    let a = Error::check_finite("relative_luminance", a)?;
    let b = Error::check_finite("relative_luminance", b)?;
    let lighter = a.max(b);
    let darker = a.min(b);
    Error::check_finite("contrast_ratio", (lighter + 0.05) / (darker + 0.05))
}

/// WCAG contrast ratio between two colors, in `[1, 21]`. Symmetric.
pub fn contrast_ratio(a: Color, b: Color) -> Result<f64> {
    contrast_ratio_from_luminance(relative_luminance(a), relative_luminance(b))
}

/// Ratio for byte-quantized colors, whose luminance is always finite.
#[inline]
pub(crate) fn ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    (la.max(lb) + 0.05) / (la.min(lb) + 0.05)
}

/// Whether `fg` reaches `min_ratio` against `bg`.
#[must_use]
pub fn meets(fg: Color, bg: Color, min_ratio: f64) -> bool {
    ratio(fg, bg) >= min_ratio
}

/// The candidate with the highest contrast against `bg` (first wins ties).
#[must_use]
pub fn best_text_color(bg: Color, candidates: &[Color]) -> Option<Color> {
    let (&first, rest) = candidates.split_first()?;
    let mut best = first;
    let mut best_ratio = ratio(best, bg);
    for &candidate in rest {
        let r = ratio(candidate, bg);
        if r > best_ratio {
            best = candidate;
            best_ratio = r;
        }
    }
    Some(best)
}

/// Black or white, whichever contrasts more with `bg` (black on ties).
#[must_use]
pub fn strong_stroke(bg: Color) -> Color {
    if ratio(Color::WHITE, bg) > ratio(Color::BLACK, bg) {
        Color::WHITE
    } else {
        Color::BLACK
    }
}

/// Which way the value rail moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Brighten,
    Darken,
}

/// The search that produced a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchRail {
    /// The input already met the ratio.
    Unchanged,
    /// HSV value rail.
    Value,
    /// Gamma-correct blend toward white.
    WhitePole,
    /// Gamma-correct blend toward black.
    BlackPole,
}

/// Result of a contrast resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastOutcome {
    pub color: Color,
    pub achieved_ratio: f64,
    pub met_threshold: bool,
    pub rail: SearchRail,
}

/// One rail's bisection record.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTrace {
    rail: SearchRail,
    best: Color,
    best_ratio: f64,
    found: Option<(Color, f64)>,
    history: SmallVec<[f64; 20]>,
}

impl SearchTrace {
    fn start(rail: SearchRail, origin: Color, origin_ratio: f64) -> Self {
        let mut history = SmallVec::new();
        history.push(origin_ratio);
        Self {
            rail,
            best: origin,
            best_ratio: origin_ratio,
            found: None,
            history,
        }
    }

    fn observe(&mut self, candidate: Color, r: f64) {
        if r > self.best_ratio {
            self.best = candidate;
            self.best_ratio = r;
        }
        self.history.push(self.best_ratio);
    }

    /// Rail searched.
    pub fn rail(&self) -> SearchRail {
        self.rail
    }

    /// Highest-ratio candidate seen, passing or not.
    pub fn best(&self) -> (Color, f64) {
        (self.best, self.best_ratio)
    }

    /// Minimal-change candidate meeting the ratio, if any.
    pub fn found(&self) -> Option<(Color, f64)> {
        self.found
    }

    /// Best ratio after each evaluation, starting with the origin.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Number of candidates evaluated after the origin.
    pub fn evaluations(&self) -> usize {
        self.history.len() - 1
    }
}

/// Full record of a contrast resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastSearch {
    pub outcome: ContrastOutcome,
    /// Value-rail direction; `None` when the input already met the ratio.
    pub direction: Option<Direction>,
    /// Rails searched, in search order.
    pub traces: SmallVec<[SearchTrace; 3]>,
}

/// Adjust `fg` until it reaches `min_ratio` against `bg`.
///
/// # Errors
///
/// [`Error::InvalidArgumentRange`] when `min_ratio` is outside `[1, 21]`.
pub fn ensure_minimum_contrast(fg: Color, bg: Color, min_ratio: f64) -> Result<ContrastOutcome> {
    resolve_contrast(fg, bg, min_ratio).map(|search| search.outcome)
}

/// Like [`ensure_minimum_contrast`], also returning every rail's trace.
pub fn resolve_contrast(fg: Color, bg: Color, min_ratio: f64) -> Result<ContrastSearch> {
    let min_ratio = Error::check_range("min_ratio", min_ratio, 1.0, 21.0)?;

    let initial = ratio(fg, bg);
    if initial >= min_ratio {
        return Ok(ContrastSearch {
            outcome: ContrastOutcome {
                color: fg,
                achieved_ratio: initial,
                met_threshold: true,
                rail: SearchRail::Unchanged,
            },
            direction: None,
            traces: SmallVec::new(),
        });
    }

    let span = tint_core::debug_span!("ensure_minimum_contrast", min_ratio);
    let _guard = span.enter();

    let direction = probe_direction(fg, bg);
    let mut traces: SmallVec<[SearchTrace; 3]> = SmallVec::new();
    traces.push(search_value_rail(fg, bg, min_ratio, direction, initial));
    if traces[0].found.is_none() {
        let white = Color::WHITE.with_alpha(fg.a().value());
        let black = Color::BLACK.with_alpha(fg.a().value());
        traces.push(search_pole(fg, bg, min_ratio, white, SearchRail::WhitePole, initial));
        traces.push(search_pole(fg, bg, min_ratio, black, SearchRail::BlackPole, initial));
    }

    let outcome = match traces.iter().find_map(|t| t.found.map(|f| (t.rail, f))) {
        Some((rail, (color, achieved))) => ContrastOutcome {
            color,
            achieved_ratio: achieved,
            met_threshold: true,
            rail,
        },
        None => {
            let mut best = &traces[0];
            for trace in traces.iter().skip(1) {
                if trace.best_ratio > best.best_ratio {
                    best = trace;
                }
            }
            tint_core::debug!(
                best_ratio = best.best_ratio,
                min_ratio,
                "contrast target unreachable, returning best effort"
            );
            ContrastOutcome {
                color: best.best,
                achieved_ratio: best.best_ratio,
                met_threshold: false,
                rail: best.rail,
            }
        }
    };

    tint_core::debug!(
        ?direction,
        rail = ?outcome.rail,
        achieved = outcome.achieved_ratio,
        "contrast resolved"
    );

    Ok(ContrastSearch {
        outcome,
        direction: Some(direction),
        traces,
    })
}

/// Pick the value-rail direction from the ratios at V ± probe.
pub fn probe_direction(fg: Color, bg: Color) -> Direction {
    let v = fg.value();
    let up = ratio(fg.with_value(v + DIRECTION_PROBE), bg);
    let down = ratio(fg.with_value(v - DIRECTION_PROBE), bg);
    if up > down {
        Direction::Brighten
    } else if down > up {
        Direction::Darken
    } else if relative_luminance(bg) < CROSSOVER_LUMINANCE {
        Direction::Brighten
    } else {
        Direction::Darken
    }
}

/// Bisect `t ∈ [0, 1]` for the smallest `t` whose candidate meets the ratio.
///
/// `at(0)` is the origin (known to fail). The endpoint is checked first;
/// along each rail the pass/fail predicate flips at most once, so a failing
/// endpoint means nothing on the rail passes.
fn bisect(
    mut trace: SearchTrace,
    bg: Color,
    min_ratio: f64,
    at: impl Fn(f64) -> Color,
) -> SearchTrace {
    let end = at(1.0);
    let end_ratio = ratio(end, bg);
    trace.observe(end, end_ratio);
    if end_ratio < min_ratio {
        return trace;
    }
    trace.found = Some((end, end_ratio));

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..SEARCH_ITERATIONS {
        if hi - lo < SEARCH_EPSILON {
            break;
        }
        let mid = (lo + hi) / 2.0;
        let candidate = at(mid);
        let r = ratio(candidate, bg);
        trace.observe(candidate, r);
        if r >= min_ratio {
            trace.found = Some((candidate, r));
            hi = mid;
        } else {
            lo = mid;
        }
    }
    trace
}

fn search_value_rail(
    fg: Color,
    bg: Color,
    min_ratio: f64,
    direction: Direction,
    initial: f64,
) -> SearchTrace {
    let v0 = fg.value();
    let target = match direction {
        Direction::Brighten => 1.0,
        Direction::Darken => 0.0,
    };
    let trace = SearchTrace::start(SearchRail::Value, fg, initial);
    let trace = bisect(trace, bg, min_ratio, |t| fg.with_value(v0 + (target - v0) * t));
    tint_core::trace!(
        found = trace.found.is_some(),
        evaluations = trace.evaluations(),
        "value rail"
    );
    trace
}

fn search_pole(
    fg: Color,
    bg: Color,
    min_ratio: f64,
    pole: Color,
    rail: SearchRail,
    initial: f64,
) -> SearchTrace {
    let trace = SearchTrace::start(rail, fg, initial);
    let trace = bisect(trace, bg, min_ratio, |t| fg.mix_linear_light(pole, t));
    tint_core::trace!(
        ?rail,
        found = trace.found.is_some(),
        evaluations = trace.evaluations(),
        "pole rail"
    );
    trace
}
