//! Address-bar state: the live [`Location`] view and the immutable
//! [`LocationSnapshot`] the router queues.
//!
//! A bridge owns a `Location` and replaces it on every history mutation.
//! The engine copies that state into a `LocationSnapshot` at the instant a
//! navigation is enqueued, so a queued snapshot keeps the address bar of
//! its enqueue time even when the live location has moved on before the
//! drain loop reaches it.

use url::Url;

use crate::error::LocationError;

// ============================================================================
// Location
// ============================================================================

/// Live address-bar state as seen through a
/// [`HistoryBridge`](crate::HistoryBridge).
///
/// Field semantics mirror the DOM `Location` object: `search` and `hash`
/// keep their `?`/`#` prefix and are empty when the component is absent,
/// `port` is empty when the scheme default applies, and `host` carries
/// `hostname:port` only for non-default ports.
///
/// # Example
///
/// ```
/// use detour_router::Location;
///
/// let location = Location::parse("https://app.test:8443/inbox?page=2#top").unwrap();
/// assert_eq!(location.protocol, "https:");
/// assert_eq!(location.host, "app.test:8443");
/// assert_eq!(location.pathname, "/inbox");
/// assert_eq!(location.search, "?page=2");
/// assert_eq!(location.hash, "#top");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Fragment including the leading `#`, or empty.
    pub hash: String,
    /// `hostname:port`, the port elided when it is the scheme default.
    pub host: String,
    /// Host name without the port.
    pub hostname: String,
    /// The full serialized URL.
    pub href: String,
    /// Scheme-host-port triple in ASCII serialization.
    pub origin: String,
    /// Path component, at least `/` for hierarchical URLs.
    pub pathname: String,
    /// Port as a decimal string, empty for the scheme default.
    pub port: String,
    /// Scheme including the trailing `:`.
    pub protocol: String,
    /// Query including the leading `?`, or empty.
    pub search: String,
}

impl Location {
    /// Parse an absolute URL into a location.
    pub fn parse(href: &str) -> Result<Self, LocationError> {
        let url = Url::parse(href).map_err(|err| LocationError::new(href, err.to_string()))?;
        Ok(Self::from_url(&url))
    }

    /// Resolve `target` against this location, the way the address bar
    /// would.
    ///
    /// Accepts absolute URLs, absolute paths (`/a/b`), relative paths,
    /// query-only (`?page=2`) and fragment-only (`#top`) targets.
    pub fn resolve(&self, target: &str) -> Result<Self, LocationError> {
        let base =
            Url::parse(&self.href).map_err(|err| LocationError::new(&self.href, err.to_string()))?;
        let url = base
            .join(target)
            .map_err(|err| LocationError::new(target, err.to_string()))?;
        Ok(Self::from_url(&url))
    }

    fn from_url(url: &Url) -> Self {
        let port = url.port().map(|p| p.to_string()).unwrap_or_default();
        let hostname = url.host_str().unwrap_or_default().to_string();
        let host = if port.is_empty() {
            hostname.clone()
        } else {
            format!("{}:{}", hostname, port)
        };
        let hash = match url.fragment() {
            Some(fragment) if !fragment.is_empty() => format!("#{}", fragment),
            _ => String::new(),
        };
        let search = match url.query() {
            Some(query) if !query.is_empty() => format!("?{}", query),
            _ => String::new(),
        };
        Self {
            hash,
            host,
            hostname,
            href: url.as_str().to_string(),
            origin: url.origin().ascii_serialization(),
            pathname: url.path().to_string(),
            port,
            protocol: format!("{}:", url.scheme()),
            search,
        }
    }
}

// ============================================================================
// LocationSnapshot
// ============================================================================

/// Immutable capture of the address bar at one instant.
///
/// Snapshots are what detour conditions test and listeners receive. They
/// are never mutated after capture and are dropped once every matching
/// listener has run for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationSnapshot {
    /// Fragment including the leading `#`, or empty.
    pub hash: String,
    /// `hostname:port`, the port elided when it is the scheme default.
    pub host: String,
    /// Host name without the port.
    pub hostname: String,
    /// The full serialized URL.
    pub href: String,
    /// Scheme-host-port triple in ASCII serialization.
    pub origin: String,
    /// Path component, the part conditions match against.
    pub pathname: String,
    /// Port as a decimal string, empty for the scheme default.
    pub port: String,
    /// Scheme including the trailing `:`.
    pub protocol: String,
    /// Query including the leading `?`, or empty.
    pub search: String,
}

impl LocationSnapshot {
    /// Copy the current address-bar state.
    ///
    /// A pure field copy. The engine calls this synchronously while
    /// enqueuing, never later, so the snapshot cannot observe a location
    /// change that happens after the navigation it belongs to.
    #[must_use]
    pub fn capture(location: &Location) -> Self {
        Self {
            hash: location.hash.clone(),
            host: location.host.clone(),
            hostname: location.hostname.clone(),
            href: location.href.clone(),
            origin: location.origin.clone(),
            pathname: location.pathname.clone(),
            port: location.port.clone(),
            protocol: location.protocol.clone(),
            search: location.search.clone(),
        }
    }
}
