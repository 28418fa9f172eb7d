//! Detour conditions, the predicate half of a (condition, listener) pair.
//!
//! Three constructors cover the matching the router supports: [`path`] for
//! exact pathname equality, [`regex`] for pre-compiled regular expressions,
//! and [`glob`] for extended glob patterns. Conditions are pure predicates
//! over the snapshot's `pathname`; they read nothing else and have no side
//! effects, so the engine can evaluate them freely while holding no locks.

use std::fmt;
use std::sync::{Arc, OnceLock};

use globset::{GlobBuilder, GlobMatcher};
use regex::Regex;

use crate::error::MatchError;
use crate::location::LocationSnapshot;

// ============================================================================
// RouteCondition
// ============================================================================

/// Condition evaluated against each queued snapshot.
///
/// Built through [`path`], [`regex`] or [`glob`]; a detour registered with
/// no condition fires for every snapshot instead.
#[derive(Debug, Clone)]
pub enum RouteCondition {
    /// Exact pathname equality.
    Path(String),
    /// Regular expression tested against the pathname.
    Regex(Regex),
    /// Extended glob pattern tested against the pathname.
    Glob(GlobCondition),
}

impl RouteCondition {
    /// Evaluate this condition against a snapshot's pathname.
    ///
    /// The only failure mode is a malformed glob pattern; path and regex
    /// conditions cannot fail.
    pub fn matches(&self, snapshot: &LocationSnapshot) -> Result<bool, MatchError> {
        match self {
            Self::Path(expected) => Ok(snapshot.pathname == *expected),
            Self::Regex(pattern) => Ok(pattern.is_match(&snapshot.pathname)),
            Self::Glob(pattern) => pattern.matches(&snapshot.pathname),
        }
    }
}

/// Condition matching the pathname exactly.
///
/// `path("/inbox")` fires for `/inbox` and nothing else, not `/inbox/` and
/// not `/inbox/archive`.
#[must_use]
pub fn path(pathname: impl Into<String>) -> RouteCondition {
    RouteCondition::Path(pathname.into())
}

/// Condition testing the pathname with a pre-compiled regular expression.
///
/// The expression is unanchored; anchor with `^` and `$` for whole-path
/// matches.
///
/// # Example
///
/// ```
/// use detour_router::{regex, Regex};
///
/// let condition = regex(Regex::new(r"^/user/\d+$").unwrap());
/// # let _ = condition;
/// ```
#[must_use]
pub fn regex(pattern: Regex) -> RouteCondition {
    RouteCondition::Regex(pattern)
}

/// Condition testing the pathname with an extended glob pattern.
///
/// Supported syntax:
///
/// * `*` matches within one path component (never across `/`)
/// * `**` matches across path components
/// * `?` matches a single character other than `/`
/// * `[abc]`, `[a-z]` and `[!a-z]` character classes
/// * `{png,jpg}` alternation
/// * a leading `!` negates the whole pattern
///
/// Extended-glob groups (`@(a|b)`) and POSIX named classes (`[[:alpha:]]`)
/// are not part of the dialect.
///
/// Compilation is deferred: a malformed pattern surfaces as
/// [`MatchError`](crate::MatchError) when the condition is first evaluated,
/// and the condition then reports the same error on every evaluation.
///
/// # Example
///
/// ```
/// use detour_router::{glob, Location, LocationSnapshot};
///
/// let condition = glob("/files/*.txt");
/// let at = |href: &str| LocationSnapshot::capture(&Location::parse(href).unwrap());
///
/// assert!(condition.matches(&at("http://app.test/files/a.txt")).unwrap());
/// assert!(!condition.matches(&at("http://app.test/files/a/b.txt")).unwrap());
/// ```
#[must_use]
pub fn glob(pattern: impl Into<String>) -> RouteCondition {
    RouteCondition::Glob(GlobCondition::new(pattern))
}

// ============================================================================
// GlobCondition
// ============================================================================

/// Deferred-compilation glob pattern.
///
/// The compiled matcher is cached behind an `Arc`, so the clones the engine
/// takes while dispatching share one compilation with the registered
/// original.
#[derive(Clone)]
pub struct GlobCondition {
    pattern: String,
    compiled: Arc<OnceLock<Result<GlobMatcher, MatchError>>>,
}

impl GlobCondition {
    fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            compiled: Arc::new(OnceLock::new()),
        }
    }

    /// Pattern as supplied, including any leading `!`.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    fn matches(&self, pathname: &str) -> Result<bool, MatchError> {
        // A leading '!' negates the whole pattern; the glob engine itself
        // has no whole-pattern negation.
        let (negated, body) = match self.pattern.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, self.pattern.as_str()),
        };
        let compiled = self.compiled.get_or_init(|| {
            GlobBuilder::new(body)
                .literal_separator(true)
                .build()
                .map(|pattern| pattern.compile_matcher())
                .map_err(|err| MatchError::new(&self.pattern, err.kind().to_string()))
        });
        match compiled {
            Ok(matcher) => {
                let hit = matcher.is_match(pathname);
                Ok(if negated { !hit } else { hit })
            }
            Err(err) => Err(err.clone()),
        }
    }
}

impl fmt::Debug for GlobCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobCondition")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;

    fn at(pathname: &str) -> LocationSnapshot {
        let href = format!("http://app.test{}", pathname);
        LocationSnapshot::capture(&Location::parse(&href).unwrap())
    }

    #[test]
    fn path_requires_exact_equality() {
        let condition = path("/inbox");
        assert!(condition.matches(&at("/inbox")).unwrap());
        assert!(!condition.matches(&at("/inbox/")).unwrap());
        assert!(!condition.matches(&at("/inbox/archive")).unwrap());
        assert!(!condition.matches(&at("/Inbox")).unwrap());
    }

    #[test]
    fn regex_is_unanchored_by_default() {
        let condition = regex(Regex::new(r"/user/\d+").unwrap());
        assert!(condition.matches(&at("/user/42")).unwrap());
        assert!(condition.matches(&at("/app/user/42/edit")).unwrap());

        let anchored = regex(Regex::new(r"^/user/\d+$").unwrap());
        assert!(anchored.matches(&at("/user/42")).unwrap());
        assert!(!anchored.matches(&at("/user/42/edit")).unwrap());

        let prefix = regex(Regex::new(r"^/a").unwrap());
        assert!(prefix.matches(&at("/abc")).unwrap());
        assert!(!prefix.matches(&at("/bcd")).unwrap());
    }

    #[test]
    fn glob_star_stays_inside_one_component() {
        let condition = glob("/a/*.js");
        assert!(condition.matches(&at("/a/b.js")).unwrap());
        assert!(!condition.matches(&at("/a/b/c.js")).unwrap());
        assert!(!condition.matches(&at("/a.js")).unwrap());
        assert!(!condition.matches(&at("/b/b.js")).unwrap());
    }

    #[test]
    fn glob_double_star_crosses_components() {
        let condition = glob("/reports/**/*.pdf");
        assert!(condition.matches(&at("/reports/2025/q3/summary.pdf")).unwrap());
        assert!(!condition.matches(&at("/reports/2025/q3/summary.txt")).unwrap());
    }

    #[test]
    fn glob_question_mark_and_classes() {
        let condition = glob("/v?/[a-c]");
        assert!(condition.matches(&at("/v1/a")).unwrap());
        assert!(condition.matches(&at("/v2/c")).unwrap());
        assert!(!condition.matches(&at("/v12/a")).unwrap());
        assert!(!condition.matches(&at("/v1/d")).unwrap());
    }

    #[test]
    fn glob_alternation() {
        let condition = glob("/img/*.{png,jpg}");
        assert!(condition.matches(&at("/img/logo.png")).unwrap());
        assert!(condition.matches(&at("/img/logo.jpg")).unwrap());
        assert!(!condition.matches(&at("/img/logo.gif")).unwrap());
    }

    #[test]
    fn glob_has_no_extended_groups() {
        // '@', '(' and ')' are ordinary characters, not extglob syntax.
        let condition = glob("/v/@(ab)");
        assert!(condition.matches(&at("/v/@(ab)")).unwrap());
        assert!(!condition.matches(&at("/v/ab")).unwrap());
    }

    #[test]
    fn glob_leading_bang_negates() {
        let condition = glob("!/admin/**");
        assert!(!condition.matches(&at("/admin/users")).unwrap());
        assert!(condition.matches(&at("/inbox")).unwrap());
    }

    #[test]
    fn malformed_glob_errors_at_evaluation() {
        let condition = glob("/files/[");
        let err = condition.matches(&at("/files/a")).unwrap_err();
        assert_eq!(err.pattern, "/files/[");

        // The error carries the pattern exactly as the accessor reports it.
        if let RouteCondition::Glob(inner) = &condition {
            assert_eq!(inner.pattern(), err.pattern);
        } else {
            unreachable!("glob() builds glob conditions");
        }

        // Cached: later evaluations report the same error.
        let again = condition.matches(&at("/other")).unwrap_err();
        assert_eq!(again, err);
    }

    #[test]
    fn glob_clones_share_the_compiled_matcher() {
        let condition = glob("/a/*.js");
        let clone = condition.clone();
        assert!(condition.matches(&at("/a/b.js")).unwrap());
        if let (RouteCondition::Glob(original), RouteCondition::Glob(copy)) = (&condition, &clone) {
            assert!(original.compiled.get().is_some());
            assert!(Arc::ptr_eq(&original.compiled, &copy.compiled));
        } else {
            unreachable!("glob() builds glob conditions");
        }
    }
}
