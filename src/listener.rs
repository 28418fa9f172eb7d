//! Async navigation listeners.
//!
//! A listener is invoked once per queued snapshot whose condition fires,
//! and the drain loop awaits the returned future before touching the next
//! detour. The trait uses an associated `Future` so concrete
//! implementations can stay allocation-free; [`SharedListener`] is the
//! erased form the router stores.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::HandlerError;
use crate::location::LocationSnapshot;

/// Future type used by erased listeners.
pub type ListenerFuture = Pin<Box<dyn Future<Output = Result<(), HandlerError>> + Send>>;

/// Reference-counted, type-erased listener as stored by the router.
///
/// The detour list is re-read for every snapshot, so the engine clones its
/// listener handles once per dispatch round; `Arc` keeps that clone cheap.
pub type SharedListener = Arc<dyn RouteListener<Future = ListenerFuture>>;

// ============================================================================
// RouteListener Trait
// ============================================================================

/// Trait for navigation listeners.
///
/// An `Err` resolution is logged and dropped; it never stops the dispatch
/// of the current snapshot to later detours, and never stalls the queue.
///
/// # Example
///
/// ```
/// use detour_router::{ListenerFuture, LocationSnapshot, RouteListener};
///
/// struct TitleSync;
///
/// impl RouteListener for TitleSync {
///     type Future = ListenerFuture;
///
///     fn on_route(&self, snapshot: &LocationSnapshot) -> Self::Future {
///         let pathname = snapshot.pathname.clone();
///         Box::pin(async move {
///             // mirror the pathname into whatever tracks it
///             let _ = pathname;
///             Ok(())
///         })
///     }
///
///     fn name(&self) -> &str {
///         "TitleSync"
///     }
/// }
/// ```
pub trait RouteListener: Send + Sync + 'static {
    /// The future returned by [`on_route`](Self::on_route).
    type Future: Future<Output = Result<(), HandlerError>> + Send + 'static;

    /// Handle one navigation snapshot.
    ///
    /// The drain loop runs the returned future to completion before the
    /// next detour is evaluated for the same snapshot.
    fn on_route(&self, snapshot: &LocationSnapshot) -> Self::Future;

    /// Diagnostic name used in dispatch logs.
    fn name(&self) -> &str {
        "RouteListener"
    }
}

// ============================================================================
// Function Listeners
// ============================================================================

/// Create a listener from an async closure.
///
/// The closure receives an owned snapshot, so the returned future borrows
/// nothing.
///
/// # Example
///
/// ```
/// use detour_router::listener_fn;
///
/// let listener = listener_fn(|snapshot| async move {
///     println!("now at {}", snapshot.pathname);
///     Ok(())
/// });
/// # let _ = listener;
/// ```
pub fn listener_fn<F, Fut>(f: F) -> FnListener<F>
where
    F: Fn(LocationSnapshot) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    FnListener { f }
}

/// Listener created from a function or closure; see [`listener_fn`].
pub struct FnListener<F> {
    f: F,
}

impl<F, Fut> RouteListener for FnListener<F>
where
    F: Fn(LocationSnapshot) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    type Future = ListenerFuture;

    fn on_route(&self, snapshot: &LocationSnapshot) -> Self::Future {
        Box::pin((self.f)(snapshot.clone()))
    }

    fn name(&self) -> &str {
        "FnListener"
    }
}
