#![forbid(unsafe_code)]

//! Color text parsing.
//!
//! Accepted grammars:
//! - `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
//! - `rgb(r, g, b)`, `rgba(r, g, b, a)`, and the space form
//!   `rgb(r g b / a)`; the two function names are aliases
//! - `hsv(h, s, v)`, `hsva(h, s, v, a)`
//! - a bare CSS color name (case-insensitive)
//!
//! Every failure is reported as [`Error::InvalidColorFormat`] carrying the
//! caller's text unchanged.

use smallvec::SmallVec;
use tint_core::{Error, Result};

use crate::channel::Channel;
use crate::color::Color;
use crate::named;

type Args<'a> = SmallVec<[&'a str; 4]>;

/// Parse any supported color syntax.
pub fn parse_color(input: &str) -> Result<Color> {
    parse_inner(input).ok_or_else(|| {
        tint_core::trace!(input, "rejected color text");
        Error::invalid_color(input)
    })
}

fn parse_inner(input: &str) -> Option<Color> {
    let text = input.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex);
    }

    if let Some(open) = text.find('(') {
        let body = text[open + 1..].strip_suffix(')')?;
        let name = text[..open].trim().to_ascii_lowercase();
        return match name.as_str() {
            "rgb" | "rgba" => parse_rgb_args(body),
            "hsv" | "hsva" => parse_hsv_args(body),
            _ => None,
        };
    }

    named::lookup(text)
}

/// Parse the digits after `#`.
fn parse_hex(hex: &str) -> Option<Color> {
    let nibble = |c: u8| -> Option<u8> {
        match c {
            b'0'..=b'9' => Some(c - b'0'),
            b'a'..=b'f' => Some(c - b'a' + 10),
            b'A'..=b'F' => Some(c - b'A' + 10),
            _ => None,
        }
    };
    let short = |c: u8| nibble(c).map(|n| n * 17);
    let pair = |hi: u8, lo: u8| Some(nibble(hi)? << 4 | nibble(lo)?);

    match *hex.as_bytes() {
        [r, g, b] => Some(Color::rgb(short(r)?, short(g)?, short(b)?)),
        [r, g, b, a] => Some(Color::rgba(short(r)?, short(g)?, short(b)?, short(a)?)),
        [r1, r2, g1, g2, b1, b2] => Some(Color::rgb(pair(r1, r2)?, pair(g1, g2)?, pair(b1, b2)?)),
        [r1, r2, g1, g2, b1, b2, a1, a2] => Some(Color::rgba(
            pair(r1, r2)?,
            pair(g1, g2)?,
            pair(b1, b2)?,
            pair(a1, a2)?,
        )),
        _ => None,
    }
}

/// Split a function body into component tokens plus an optional alpha token.
///
/// Comma bodies yield 3 or 4 tokens with no slash. Space bodies yield
/// exactly 3 tokens, optionally followed by `/ alpha`.
fn split_components(body: &str, allow_space_form: bool) -> Option<(Args<'_>, Option<&str>)> {
    if body.contains(',') {
        if body.contains('/') {
            return None;
        }
        let mut args: Args<'_> = body.split(',').map(str::trim).collect();
        let alpha = match args.len() {
            3 => None,
            4 => args.pop(),
            _ => return None,
        };
        return Some((args, alpha));
    }

    if !allow_space_form {
        return None;
    }
    let mut halves = body.splitn(2, '/');
    let channels: Args<'_> = halves.next()?.split_whitespace().collect();
    if channels.len() != 3 {
        return None;
    }
    let alpha = match halves.next() {
        None => None,
        Some(rest) => {
            let mut tokens = rest.split_whitespace();
            let token = tokens.next()?;
            if tokens.next().is_some() {
                return None;
            }
            Some(token)
        }
    };
    Some((channels, alpha))
}

fn parse_rgb_args(body: &str) -> Option<Color> {
    let (channels, alpha) = split_components(body, true)?;
    if channels.iter().any(|t| t.is_empty()) {
        return None;
    }
    let r = parse_rgb_channel(channels[0])?;
    let g = parse_rgb_channel(channels[1])?;
    let b = parse_rgb_channel(channels[2])?;
    let a = match alpha {
        Some(token) => parse_alpha(token)?,
        None => Channel::MAX,
    };
    Some(Color::from_channels(r, g, b, a))
}

fn parse_hsv_args(body: &str) -> Option<Color> {
    let (components, alpha) = split_components(body, false)?;
    let hue = parse_hue(components[0])?;
    let saturation = parse_unit_or_percent(components[1])?;
    let value = parse_unit_or_percent(components[2])?;
    let a = match alpha {
        Some(token) => parse_alpha(token)?,
        None => Channel::MAX,
    };
    Some(Color::from_hsv_parts(hue, saturation, value, a))
}

fn parse_finite(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `N%` with `0 <= N <= 100`, as a fraction.
fn parse_percent(token: &str) -> Option<f64> {
    let number = token.strip_suffix('%')?;
    parse_finite(number)
        .filter(|p| (0.0..=100.0).contains(p))
        .map(|p| p / 100.0)
}

/// Integer `0..=255` or `N%`.
fn parse_rgb_channel(token: &str) -> Option<Channel> {
    if token.ends_with('%') {
        return parse_percent(token).map(Channel::from_normalized);
    }
    token
        .parse::<u16>()
        .ok()
        .filter(|&v| v <= 255)
        .map(|v| Channel(v as u8))
}

/// Fraction `0..=1` or `N%`.
fn parse_alpha(token: &str) -> Option<Channel> {
    let fraction = if token.ends_with('%') {
        parse_percent(token)?
    } else {
        parse_finite(token).filter(|a| (0.0..=1.0).contains(a))?
    };
    Some(Channel::from_normalized(fraction))
}

/// Any finite number of degrees, with an optional `deg` suffix.
fn parse_hue(token: &str) -> Option<f64> {
    let lowered = token.to_ascii_lowercase();
    let number = lowered.strip_suffix("deg").unwrap_or(&lowered);
    parse_finite(number)
}

/// Saturation or value.
///
/// With `%` the number is a percentage. Without it, values up to and
/// including 1 are fractions and larger values (up to 100) are percentages.
fn parse_unit_or_percent(token: &str) -> Option<f64> {
    if token.ends_with('%') {
        return parse_percent(token);
    }
    let raw = parse_finite(token)?;
    if raw < 0.0 {
        None
    } else if raw <= 1.0 {
        Some(raw)
    } else if raw <= 100.0 {
        Some(raw / 100.0)
    } else {
        None
    }
}
