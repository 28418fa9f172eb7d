//! Logging abstraction layer.
//!
//! The router logs through these macros so the backend stays a compile-time
//! choice:
//!
//! - `log` (default) - emits through the standard `log` facade
//! - `tracing` - emits through `tracing` for structured logging
//!
//! Choose one feature at compile time; they are mutually exclusive. With
//! neither enabled the macros expand to nothing.
//!
//! # Usage
//!
//! ```ignore
//! use detour_router::{debug_log, trace_log, warn_log};
//!
//! trace_log!("enqueue: {}", snapshot.pathname);
//! debug_log!("history push: {}", next.href);
//! warn_log!("history push ignored: {}", err);
//! ```

/// Trace-level logging
///
/// Per-snapshot flow: enqueues, drain pops, dispatch starts.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
    };
}

/// Debug-level logging
///
/// Router lifecycle and history mutations.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
    };
}

/// Info-level logging
///
/// General informational messages.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::info!($($arg)*);
        #[cfg(feature = "log")]
        ::log::info!($($arg)*);
    };
}

/// Warn-level logging
///
/// Recoverable oddities: rejected history pushes, unevaluable conditions.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!($($arg)*);
        #[cfg(feature = "log")]
        ::log::warn!($($arg)*);
    };
}

/// Error-level logging
///
/// Listener failures and panics caught at the dispatch boundary.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::error!($($arg)*);
        #[cfg(feature = "log")]
        ::log::error!($($arg)*);
    };
}
