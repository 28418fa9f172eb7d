//! Error types for the router.
//!
//! Condition evaluation and listener dispatch can each fail independently,
//! and the types here carry those failures to the logging boundary. Nothing
//! in this module ever aborts a drain: the engine logs a [`DispatchError`]
//! and moves on to the next detour or the next queued snapshot.

use std::fmt;

// ============================================================================
// Pattern and Location Errors
// ============================================================================

/// A glob pattern that could not be compiled.
///
/// Raised the first time a glob condition is evaluated against a snapshot,
/// not when the condition is constructed (compilation is deferred). Every
/// later evaluation of the same condition reports the same error.
///
/// # Example
///
/// ```
/// use detour_router::{glob, Location, LocationSnapshot};
///
/// let condition = glob("/files/[");
/// let location = Location::parse("http://app.test/files/a").unwrap();
/// let snapshot = LocationSnapshot::capture(&location);
///
/// let err = condition.matches(&snapshot).unwrap_err();
/// assert_eq!(err.pattern, "/files/[");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchError {
    /// The offending pattern, exactly as supplied.
    pub pattern: String,
    /// Why the pattern was rejected.
    pub reason: String,
}

impl MatchError {
    pub(crate) fn new(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid glob pattern '{}': {}", self.pattern, self.reason)
    }
}

impl std::error::Error for MatchError {}

/// An href or navigation target that could not be parsed as a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationError {
    /// The input that failed to parse or resolve.
    pub input: String,
    /// Parser diagnostic.
    pub reason: String,
}

impl LocationError {
    pub(crate) fn new(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot parse location '{}': {}", self.input, self.reason)
    }
}

impl std::error::Error for LocationError {}

// ============================================================================
// Dispatch Failures
// ============================================================================

/// Error type listeners may resolve with.
///
/// Listeners are user code, so any error they produce is boxed at the
/// dispatch boundary, logged, and dropped.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// A failure observed while dispatching one snapshot to one detour.
///
/// Dispatch failures are logged and never propagated: a failing listener
/// must not starve the snapshots still waiting in the queue, and must not
/// stop the remaining detours for the current snapshot.
#[derive(Debug)]
pub enum DispatchError {
    /// The detour's condition could not be evaluated.
    Condition {
        /// Diagnostic name of the listener whose condition failed.
        listener: String,
        /// The underlying pattern error.
        error: MatchError,
    },
    /// The listener resolved with an error.
    Handler {
        /// Diagnostic name of the failing listener.
        listener: String,
        /// Pathname of the snapshot being dispatched.
        pathname: String,
        /// The error the listener resolved with.
        error: HandlerError,
    },
    /// The listener panicked mid-dispatch.
    HandlerPanic {
        /// Diagnostic name of the panicking listener.
        listener: String,
        /// Pathname of the snapshot being dispatched.
        pathname: String,
    },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Condition { listener, error } => {
                write!(f, "condition for listener '{}' failed: {}", listener, error)
            }
            Self::Handler {
                listener,
                pathname,
                error,
            } => {
                write!(f, "listener '{}' failed for '{}': {}", listener, pathname, error)
            }
            Self::HandlerPanic { listener, pathname } => {
                write!(f, "listener '{}' panicked for '{}'", listener, pathname)
            }
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Condition { error, .. } => Some(error),
            Self::Handler { error, .. } => Some(&**error),
            Self::HandlerPanic { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_error_display() {
        let err = MatchError::new("/a/[", "unclosed character class");
        assert_eq!(
            err.to_string(),
            "invalid glob pattern '/a/[': unclosed character class"
        );
    }

    #[test]
    fn location_error_display() {
        let err = LocationError::new("::nope", "relative URL without a base");
        assert_eq!(
            err.to_string(),
            "cannot parse location '::nope': relative URL without a base"
        );
    }

    #[test]
    fn dispatch_error_display_covers_variants() {
        let condition = DispatchError::Condition {
            listener: "Sidebar".to_string(),
            error: MatchError::new("/x/[", "unclosed character class"),
        };
        assert!(condition.to_string().contains("Sidebar"));
        assert!(condition.to_string().contains("/x/["));

        let handler = DispatchError::Handler {
            listener: "Sidebar".to_string(),
            pathname: "/inbox".to_string(),
            error: "boom".into(),
        };
        assert_eq!(
            handler.to_string(),
            "listener 'Sidebar' failed for '/inbox': boom"
        );

        let panic = DispatchError::HandlerPanic {
            listener: "Sidebar".to_string(),
            pathname: "/inbox".to_string(),
        };
        assert_eq!(panic.to_string(), "listener 'Sidebar' panicked for '/inbox'");
    }

    #[test]
    fn dispatch_error_exposes_source() {
        use std::error::Error;

        let err = DispatchError::Condition {
            listener: "Sidebar".to_string(),
            error: MatchError::new("/x/[", "unclosed character class"),
        };
        let source = err.source().expect("condition errors carry a source");
        assert!(source.to_string().contains("/x/["));

        let wedged = DispatchError::HandlerPanic {
            listener: "Sidebar".to_string(),
            pathname: "/inbox".to_string(),
        };
        assert!(wedged.source().is_none());
    }
}
