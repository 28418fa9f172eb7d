//! # Detour Router
//!
//! A headless navigation router for single-page-style applications: an
//! ordered queue of address-bar snapshots, drained one at a time through
//! predicate-filtered async listeners.
//!
//! - **FIFO dispatch** - navigations are captured synchronously and
//!   processed strictly in the order they happened
//! - **Single-flight drain** - one consumer task per router; listener runs
//!   for two snapshots never interleave
//! - **Detours** - (condition, listener) pairs with [`path`], [`regex`] and
//!   [`glob`] conditions, or no condition to fire on every change
//! - **Pluggable host** - the browser is a capability trait; the bundled
//!   [`MemoryBridge`] runs the router anywhere
//! - **Unload interception** - unloads under the configured base path are
//!   converted into internal route changes
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use detour_router::{create_router, listener_fn, path, MemoryBridge};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let bridge = Arc::new(MemoryBridge::new());
//! let router = create_router(bridge.clone());
//!
//! router
//!     .on_url_change(
//!         listener_fn(|snapshot| async move {
//!             println!("now at {}", snapshot.pathname);
//!             Ok(())
//!         }),
//!         None,
//!     )
//!     .on_url_change(
//!         listener_fn(|_| async { Ok(()) }),
//!         Some(path("/inbox")),
//!     );
//!
//! router.navigate_to("/inbox");
//! router.settled().await;
//! # }
//! ```
//!
//! # Host Events
//!
//! A host feeds the router through its [`HistoryBridge`]:
//!
//! ```
//! use std::sync::Arc;
//! use detour_router::{create_router, MemoryBridge};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let bridge = Arc::new(MemoryBridge::new());
//! let router = create_router(bridge.clone());
//!
//! // Back button: the host moves the address bar, then announces it.
//! bridge.set_current("/previous").unwrap();
//! bridge.fire_pop_state();
//!
//! router.settled().await;
//! # }
//! ```
//!
//! # Feature Flags
//!
//! - `log` (default) - Uses the standard `log` crate for logging
//! - `tracing` - Uses the `tracing` crate for structured logging (mutually exclusive with `log`)

#![doc(html_root_url = "https://docs.rs/detour_router/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Core routing modules
pub mod bridge;
pub mod condition;
pub mod listener;
pub mod location;
pub mod queue;
pub mod router;

// Error handling
pub mod error;

// Query extraction
pub mod params;

// Re-export main types for convenient access
pub use bridge::{EventCallback, EventDisposition, HistoryBridge, MemoryBridge};
pub use condition::{glob, path, regex, GlobCondition, RouteCondition};
pub use error::{DispatchError, HandlerError, LocationError, MatchError};
pub use listener::{listener_fn, FnListener, ListenerFuture, RouteListener, SharedListener};
pub use location::{Location, LocationSnapshot};
pub use params::get_url_params;
pub use queue::{RoutingQueue, DEFAULT_QUEUE_CAPACITY};
pub use router::{create_router, Router};

/// Re-export of the regular expression type accepted by [`regex`]
/// conditions, so downstreams need no direct `regex` dependency.
pub use ::regex::Regex;
