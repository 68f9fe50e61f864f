#![forbid(unsafe_code)]

//! Core: error taxonomy, logging macros, and engine configuration for tint.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{ConfigOverride, TokenConfig};
pub use error::{Error, Result};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
