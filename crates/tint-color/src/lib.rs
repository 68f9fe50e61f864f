#![forbid(unsafe_code)]

//! Color values for tint: 8-bit channels, RGBA colors with derived HSV, and
//! parsing of hex, `rgb()`, `hsv()`, and named-color text.
//!
//! # Example
//! ```
//! use tint_color::Color;
//!
//! let white = Color::parse("#fff").unwrap();
//! assert_eq!(white.to_hex(), "#FFFFFFFF");
//!
//! let red = Color::parse("rgb(255 0 0 / .5)").unwrap();
//! assert_eq!(red.a().value(), 128);
//! ```

pub mod channel;
pub mod color;
pub mod named;
pub mod parse;

pub use channel::Channel;
pub use color::Color;
pub use tint_core::{Error, Result};
