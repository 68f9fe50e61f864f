#![forbid(unsafe_code)]

//! Diagnostics for the token engine.
//!
//! Call sites across the workspace log through `tint_core::debug!`,
//! `tint_core::trace!` and friends:
//!
//! | Level | Emitted by |
//! |-------|------------|
//! | `debug` | contrast direction, winning rail, unreachable targets; theme generation |
//! | `trace` | border candidate choice, cascade writes and layering, re-contrast counts, rejected color text |
//! | `warn` | unparsable `TINT_*` configuration values |
//!
//! With the `tracing` feature these names are the `tracing` macros. Without
//! it they expand to nothing, and the span forms yield [`NoopSpan`] so
//! `let span = ...; let _guard = span.enter();` still compiles.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

#[cfg(not(feature = "tracing"))]
mod disabled {
    /// Discarded: contrast and theme events are only recorded with `tracing`.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// Discarded.
    #[macro_export]
    macro_rules! error {
        ($($arg:tt)*) => {};
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! error_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// Discarded.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! info_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// Discarded: cascade and border decisions are only recorded with
    /// `tracing`.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! trace_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// Discarded: configuration fallbacks stay silent without `tracing`.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! warn_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

/// Span stand-in used when `tracing` is off.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    #[inline]
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }
}

/// Guard returned by [`NoopSpan::enter`].
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopGuard;

/// Environment variable holding the subscriber filter directive.
pub const LOG_ENV: &str = "TINT_LOG";

/// Install a formatted subscriber filtered by `TINT_LOG` (default `warn`).
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "subscriber")]
pub fn init_subscriber() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    #[test]
    fn span_macros_compile_in_both_modes() {
        let span = crate::debug_span!("contrast_search", rail = "value");
        let _guard = span.enter();
        crate::trace!("inside span");
        crate::debug!(ratio = 4.5, "met");
    }

    #[cfg(not(feature = "tracing"))]
    #[test]
    fn disabled_spans_are_inert_values() {
        let span = crate::trace_span!("cascade_layer", adjusted = 3);
        let copy = span;
        let _a = span.enter();
        let _b = copy.enter();
        crate::warn!(key = "TINT_TEXT_CONTRAST", "ignored");
        assert_eq!(super::LOG_ENV, "TINT_LOG");
    }
}
