//! The router engine: detour registration, the pending-snapshot queue, and
//! the single-flight drain loop.
//!
//! ## Queue discipline
//!
//! Every navigation, whether an in-app [`navigate_to`](Router::navigate_to)
//! or a host pop-state, captures a snapshot synchronously and pushes it
//! onto the queue. The first push into an idle engine flips the drain state
//! and spawns the drain task; while that task is alive every further push
//! just appends. The task pops snapshots strictly in order and, for each
//! one, runs the matching listeners sequentially to completion before
//! moving on. When the queue runs dry the task flips back to idle and
//! exits.
//!
//! The state shared between the enqueue path and the drain task is exactly
//! the queue and the drain flag, held in one mutex so push-check-spawn is a
//! single critical section. The lock is never held across an await.

use std::panic::AssertUnwindSafe;
use std::pin::pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use tokio::sync::Notify;

use crate::bridge::{EventDisposition, HistoryBridge};
use crate::condition::RouteCondition;
use crate::error::DispatchError;
use crate::listener::{ListenerFuture, RouteListener, SharedListener};
use crate::location::LocationSnapshot;
use crate::queue::RoutingQueue;
use crate::{debug_log, error_log, trace_log, warn_log};

// ============================================================================
// Detours
// ============================================================================

/// One (condition, listener) registration.
///
/// Registrations are append-only and permanent. The list is re-read at the
/// start of every snapshot's dispatch, so a detour added while a drain is
/// in progress still applies to the snapshots waiting behind the current
/// one.
#[derive(Clone)]
struct Detour {
    condition: Option<RouteCondition>,
    listener: SharedListener,
}

// ============================================================================
// Drain State
// ============================================================================

/// Whether a drain task currently owns the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrainState {
    Idle,
    Draining,
}

/// Queue and drain flag, guarded together: the enqueue path must observe
/// and update both atomically or two drain tasks could start.
struct Routing {
    queue: RoutingQueue,
    state: DrainState,
}

struct Engine {
    routing: Mutex<Routing>,
    detours: Mutex<Vec<Detour>>,
    settled: Notify,
    bridge: Arc<dyn HistoryBridge>,
    base_path: String,
}

impl Engine {
    fn lock_routing(&self) -> MutexGuard<'_, Routing> {
        self.routing.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_detours(&self) -> MutexGuard<'_, Vec<Detour>> {
        self.detours.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// Router
// ============================================================================

/// Navigation router over an injected [`HistoryBridge`].
///
/// Cloning is cheap and clones share one engine. Dispatch runs on the
/// ambient Tokio runtime, so create and drive the router from inside one.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use detour_router::{listener_fn, path, MemoryBridge, Router};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let bridge = Arc::new(MemoryBridge::new());
/// let router = Router::new(bridge);
///
/// router.on_url_change(
///     listener_fn(|snapshot| async move {
///         println!("now at {}", snapshot.pathname);
///         Ok(())
///     }),
///     Some(path("/inbox")),
/// );
///
/// router.navigate_to("/inbox");
/// router.settled().await;
/// # }
/// ```
#[derive(Clone)]
pub struct Router {
    engine: Arc<Engine>,
}

impl Router {
    /// Router with the default base path `/`.
    pub fn new(bridge: Arc<dyn HistoryBridge>) -> Self {
        Self::with_base_path(bridge, "/")
    }

    /// Router that intercepts unloads only for pathnames under `base_path`.
    pub fn with_base_path(bridge: Arc<dyn HistoryBridge>, base_path: impl Into<String>) -> Self {
        let engine = Arc::new(Engine {
            routing: Mutex::new(Routing {
                queue: RoutingQueue::new(),
                state: DrainState::Idle,
            }),
            detours: Mutex::new(Vec::new()),
            settled: Notify::new(),
            bridge,
            base_path: base_path.into(),
        });
        let router = Self { engine };
        router.subscribe();
        debug_log!("router created, base path '{}'", router.engine.base_path);
        router
    }

    /// Register a detour: `listener` runs for every snapshot accepted by
    /// `condition`, or for every snapshot when `condition` is `None`.
    ///
    /// Registration order is dispatch order; there is no deregistration.
    /// Returns `&self` so registrations chain.
    pub fn on_url_change<L>(&self, listener: L, condition: Option<RouteCondition>) -> &Self
    where
        L: RouteListener<Future = ListenerFuture>,
    {
        self.engine.lock_detours().push(Detour {
            condition,
            listener: Arc::new(listener),
        });
        self
    }

    /// Push a history entry for `url` without dispatching anything.
    ///
    /// The address bar moves; listeners stay quiet. Use
    /// [`navigate_to`](Self::navigate_to) for a push that dispatches.
    pub fn set_url(&self, url: &str) -> &Self {
        self.engine.bridge.push_history_state(url);
        self
    }

    /// Push a history entry for `url` and queue the resulting location for
    /// dispatch.
    pub fn navigate_to(&self, url: &str) -> &Self {
        self.set_url(url);
        self.enqueue_current_route();
        self
    }

    /// Capture the current address-bar state and queue it for dispatch.
    ///
    /// Returns immediately. When the engine is idle this flips it to
    /// draining and spawns the drain task; when a drain is already running
    /// the snapshot just waits its turn.
    pub fn enqueue_current_route(&self) {
        let snapshot = self.current_location();
        trace_log!("enqueue: {}", snapshot.pathname);
        let spawn_drain = {
            let mut routing = self.engine.lock_routing();
            routing.queue.push(snapshot);
            if routing.queue.len() > 1 || routing.state == DrainState::Draining {
                false
            } else {
                routing.state = DrainState::Draining;
                true
            }
        };
        if spawn_drain {
            let engine = Arc::clone(&self.engine);
            tokio::spawn(drain(engine));
        }
    }

    /// Snapshot of the bridge's live location.
    #[must_use]
    pub fn current_location(&self) -> LocationSnapshot {
        LocationSnapshot::capture(&self.engine.bridge.current_location())
    }

    /// Base path within which unloads are intercepted.
    pub fn base_path(&self) -> &str {
        &self.engine.base_path
    }

    /// Wait until the queue is empty and the drain task has exited.
    ///
    /// Purely observational, for tests and shutdown paths that need the
    /// fire-and-forget dispatch to have caught up.
    pub async fn settled(&self) {
        loop {
            let mut notified = pin!(self.engine.settled.notified());
            // Register before checking, or a notification between the
            // check and the await would be lost.
            notified.as_mut().enable();
            {
                let routing = self.engine.lock_routing();
                if routing.state == DrainState::Idle && routing.queue.is_empty() {
                    return;
                }
            }
            notified.await;
        }
    }

    /// Wire pop-state and unload interception into the bridge.
    ///
    /// Callbacks hold a weak engine handle: a dropped router leaves inert
    /// callbacks behind rather than a reference cycle through the bridge.
    fn subscribe(&self) {
        let weak = Arc::downgrade(&self.engine);
        self.engine.bridge.on_pop_state(Box::new(move || {
            let Some(engine) = weak.upgrade() else {
                return EventDisposition::Allow;
            };
            trace_log!("pop-state intercepted");
            Router { engine }.enqueue_current_route();
            EventDisposition::Intercept
        }));

        let weak = Arc::downgrade(&self.engine);
        self.engine.bridge.on_unload(Box::new(move || {
            let Some(engine) = weak.upgrade() else {
                return EventDisposition::Allow;
            };
            let pathname = engine.bridge.current_location().pathname;
            if pathname.starts_with(&engine.base_path) {
                debug_log!("unload at '{}' intercepted, re-routing internally", pathname);
                engine.bridge.emit_pop_state();
                EventDisposition::Intercept
            } else {
                EventDisposition::Allow
            }
        }));
    }
}

/// Build a [`Router`] over `bridge` with the default base path `/`.
///
/// Plain factory, and the usual entry point:
///
/// ```
/// use std::sync::Arc;
/// use detour_router::{create_router, MemoryBridge};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let router = create_router(Arc::new(MemoryBridge::new()));
/// assert_eq!(router.base_path(), "/");
/// # }
/// ```
pub fn create_router(bridge: Arc<dyn HistoryBridge>) -> Router {
    Router::new(bridge)
}

// ============================================================================
// Drain Loop
// ============================================================================

/// Single-flight queue consumer.
///
/// Exactly one instance runs per engine. The idle transition happens under
/// the queue lock, so a racing enqueue either sees `Draining` and leaves
/// the new snapshot for this task, or sees `Idle` and spawns the next task
/// itself.
async fn drain(engine: Arc<Engine>) {
    loop {
        let next = {
            let mut routing = engine.lock_routing();
            match routing.queue.pop() {
                Some(snapshot) => Some(snapshot),
                None => {
                    routing.state = DrainState::Idle;
                    None
                }
            }
        };
        let Some(snapshot) = next else {
            engine.settled.notify_waiters();
            return;
        };
        trace_log!("dispatching {}", snapshot.pathname);
        dispatch(&engine, &snapshot).await;
    }
}

/// Run every matching detour for one snapshot, in registration order,
/// awaiting each listener before evaluating the next. Failures are logged
/// and skipped: a broken listener must not stall the snapshots behind this
/// one.
async fn dispatch(engine: &Engine, snapshot: &LocationSnapshot) {
    // Re-read the registrations for each snapshot; detours added during
    // earlier snapshots of this drain apply from here on.
    let detours: Vec<Detour> = engine.lock_detours().clone();
    for detour in detours {
        let fired = match &detour.condition {
            None => true,
            Some(condition) => match condition.matches(snapshot) {
                Ok(fired) => fired,
                Err(error) => {
                    warn_log!(
                        "{}",
                        DispatchError::Condition {
                            listener: detour.listener.name().to_string(),
                            error,
                        }
                    );
                    false
                }
            },
        };
        if !fired {
            continue;
        }
        let outcome = AssertUnwindSafe(detour.listener.on_route(snapshot))
            .catch_unwind()
            .await;
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(error)) => {
                error_log!(
                    "{}",
                    DispatchError::Handler {
                        listener: detour.listener.name().to_string(),
                        pathname: snapshot.pathname.clone(),
                        error,
                    }
                );
            }
            Err(_) => {
                error_log!(
                    "{}",
                    DispatchError::HandlerPanic {
                        listener: detour.listener.name().to_string(),
                        pathname: snapshot.pathname.clone(),
                    }
                );
            }
        }
    }
}
