//! Host integration.
//!
//! The router never touches a real browser. Everything it needs from its
//! host, reading the address bar, pushing history entries, hearing about
//! pop-state and unload, goes through the [`HistoryBridge`] capability
//! trait, so any host that can answer those five calls can carry the
//! router. [`MemoryBridge`] is the bundled implementation: an in-process
//! address bar used by the demos and tests, and a template for wiring a
//! real host.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::LocationError;
use crate::location::Location;
use crate::{debug_log, warn_log};

// ============================================================================
// Event Plumbing
// ============================================================================

/// How a delivered host event should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// Suppress the host's default handling; the router owns the event.
    Intercept,
    /// Let the host's default handling proceed.
    Allow,
}

/// Callback registered for pop-state or unload notifications.
pub type EventCallback = Box<dyn Fn() -> EventDisposition + Send + Sync>;

// ============================================================================
// HistoryBridge Trait
// ============================================================================

/// Capability the router requires from its host.
///
/// Implementations translate between the host's navigation machinery and
/// the router: they expose the live address-bar state, apply history
/// pushes, and deliver pop-state and unload notifications to registered
/// callbacks.
///
/// `emit_pop_state` must reach every callback registered through
/// `on_pop_state`, exactly as a host-originated pop-state would; the router
/// uses it to convert intercepted unloads into internal route changes.
pub trait HistoryBridge: Send + Sync + 'static {
    /// Current address-bar state.
    fn current_location(&self) -> Location;

    /// Push a history entry for `url`, resolved against the current
    /// location. Must not deliver a pop-state notification.
    fn push_history_state(&self, url: &str);

    /// Register a pop-state callback. Registrations are permanent.
    fn on_pop_state(&self, callback: EventCallback);

    /// Register an unload callback. Registrations are permanent.
    fn on_unload(&self, callback: EventCallback);

    /// Deliver a synthetic pop-state notification to all subscribers.
    fn emit_pop_state(&self);
}

// ============================================================================
// MemoryBridge
// ============================================================================

const DEFAULT_HREF: &str = "http://localhost/";

type SharedCallback = Arc<dyn Fn() -> EventDisposition + Send + Sync>;

struct BridgeState {
    location: Location,
    pushed: Vec<String>,
}

/// In-process address bar.
///
/// Tracks a [`Location`], records every pushed history entry, and lets the
/// caller fire the events a host would: [`fire_pop_state`] for a back or
/// forward move, [`fire_unload`] for a leaving page.
///
/// [`fire_pop_state`]: Self::fire_pop_state
/// [`fire_unload`]: Self::fire_unload
///
/// # Example
///
/// ```
/// // `current_location` comes from the `HistoryBridge` trait.
/// use detour_router::{HistoryBridge, MemoryBridge};
///
/// let bridge = MemoryBridge::new();
/// assert_eq!(bridge.current_location().pathname, "/");
/// ```
pub struct MemoryBridge {
    state: Mutex<BridgeState>,
    pop_callbacks: Mutex<Vec<SharedCallback>>,
    unload_callbacks: Mutex<Vec<SharedCallback>>,
}

impl MemoryBridge {
    /// Bridge parked at `http://localhost/`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_href(DEFAULT_HREF).expect("default href is a valid URL")
    }

    /// Bridge parked at `href`.
    pub fn with_href(href: &str) -> Result<Self, LocationError> {
        Ok(Self {
            state: Mutex::new(BridgeState {
                location: Location::parse(href)?,
                pushed: Vec::new(),
            }),
            pop_callbacks: Mutex::new(Vec::new()),
            unload_callbacks: Mutex::new(Vec::new()),
        })
    }

    /// Move the address bar without notifying anyone.
    ///
    /// This is the location change that precedes a host pop-state: call it,
    /// then [`fire_pop_state`](Self::fire_pop_state), to simulate the user
    /// pressing Back.
    pub fn set_current(&self, url: &str) -> Result<(), LocationError> {
        let mut state = self.lock_state();
        let next = state.location.resolve(url)?;
        state.location = next;
        Ok(())
    }

    /// Deliver a pop-state notification as the host would.
    ///
    /// Reports whether any subscriber intercepted the event.
    pub fn fire_pop_state(&self) -> EventDisposition {
        Self::notify(&self.pop_callbacks)
    }

    /// Deliver an unload notification as the host would.
    ///
    /// Reports whether any subscriber intercepted the default handling,
    /// which for a real host decides whether the page actually unloads.
    pub fn fire_unload(&self) -> EventDisposition {
        Self::notify(&self.unload_callbacks)
    }

    /// Hrefs pushed through
    /// [`push_history_state`](HistoryBridge::push_history_state), oldest
    /// first.
    pub fn pushed_entries(&self) -> Vec<String> {
        self.lock_state().pushed.clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, BridgeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Invoke callbacks outside the list lock; a callback may re-enter the
    /// bridge (the router's unload handler does).
    fn notify(callbacks: &Mutex<Vec<SharedCallback>>) -> EventDisposition {
        let callbacks: Vec<SharedCallback> = callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let mut disposition = EventDisposition::Allow;
        for callback in callbacks {
            if (*callback)() == EventDisposition::Intercept {
                disposition = EventDisposition::Intercept;
            }
        }
        disposition
    }
}

impl Default for MemoryBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryBridge for MemoryBridge {
    fn current_location(&self) -> Location {
        self.lock_state().location.clone()
    }

    fn push_history_state(&self, url: &str) {
        let mut state = self.lock_state();
        match state.location.resolve(url) {
            Ok(next) => {
                debug_log!("history push: {}", next.href);
                state.pushed.push(next.href.clone());
                state.location = next;
            }
            Err(err) => {
                warn_log!("history push ignored: {}", err);
            }
        }
    }

    fn on_pop_state(&self, callback: EventCallback) {
        self.pop_callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::from(callback));
    }

    fn on_unload(&self, callback: EventCallback) {
        self.unload_callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::from(callback));
    }

    fn emit_pop_state(&self) {
        Self::notify(&self.pop_callbacks);
    }
}
