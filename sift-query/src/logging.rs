//! Logging for Sift.
//!
//! Structured logging is controlled by environment variables:
//!
//! - `SIFT_DEBUG=true` (or `1`, `yes`) enables debug logging
//! - `SIFT_LOG_LEVEL=trace|debug|info|warn|error` sets the level
//! - `SIFT_LOG_FORMAT=json|pretty|compact` picks the output format (default: json)
//!
//! ```rust,no_run
//! use sift_query::logging;
//!
//! // Once, at startup.
//! logging::init();
//! ```
//!
//! Installing a subscriber requires the `tracing-subscriber` feature. Without
//! it, `init` does nothing and events go to whatever subscriber the
//! application installed.

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Check if `SIFT_DEBUG` is set to `true`, `1` or `yes` (case-insensitive).
#[inline]
pub fn is_debug_enabled() -> bool {
    parse_debug_flag(env::var("SIFT_DEBUG").ok().as_deref())
}

/// Level from `SIFT_LOG_LEVEL`.
///
/// Falls back to "debug" when `SIFT_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    parse_log_level(env::var("SIFT_LOG_LEVEL").ok().as_deref(), is_debug_enabled())
}

/// Format from `SIFT_LOG_FORMAT`, defaulting to "json".
pub fn get_log_format() -> &'static str {
    parse_log_format(env::var("SIFT_LOG_FORMAT").ok().as_deref())
}

fn parse_debug_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
}

fn parse_log_level(value: Option<&str>, debug: bool) -> &'static str {
    let fallback = if debug { "debug" } else { "warn" };
    match value.map(str::to_lowercase).as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ => fallback,
    }
}

fn parse_log_format(value: Option<&str>) -> &'static str {
    match value.map(str::to_lowercase).as_deref() {
        Some("pretty") => "pretty",
        Some("compact") => "compact",
        _ => "json",
    }
}

/// Initialize logging. Subsequent calls are no-ops.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var("SIFT_LOG_LEVEL").is_err() {
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = get_log_level();
            let filter = EnvFilter::try_new(format!(
                "sift={},sift_query={},sift_schema={}",
                level, level, level
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

            let registry = tracing_subscriber::registry().with(filter);
            let installed = match get_log_format() {
                "json" => registry.with(fmt::layer().json()).try_init(),
                "compact" => registry.with(fmt::layer().compact()).try_init(),
                _ => registry.with(fmt::layer().pretty()).try_init(),
            };

            if installed.is_ok() {
                tracing::info!(level = level, format = get_log_format(), "Sift logging initialized");
            }
        }
    });
}

/// Log at debug level, only when `SIFT_DEBUG` is enabled.
#[macro_export]
macro_rules! sift_debug {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            tracing::debug!($($arg)*);
        }
    };
}

/// Log at trace level, only when `SIFT_DEBUG` is enabled.
#[macro_export]
macro_rules! sift_trace {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            tracing::trace!($($arg)*);
        }
    };
}
