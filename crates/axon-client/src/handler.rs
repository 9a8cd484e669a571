//! User-facing goal event callbacks.

use crate::handle::GoalHandle;
use crate::state::CommState;
use serde_json::Value;

/// Observer for one goal's transitions and feedback.
///
/// Register a handler at submit time to be told, in order, about every
/// comm-state transition and every feedback message for the goal. Both
/// methods default to no-ops so a handler may implement either one.
///
/// # Locking Contract
///
/// Callbacks run **while the goal's state lock is held**, so an
/// observer sees each transition atomically with the state change and
/// in exactly the order the states were entered. The price: a callback
/// must not call back into the *same* goal's operations
/// (`comm_state()`, `cancel()`, `result()`, ...) - the lock is not
/// reentrant. Operating on a *different* handle, or on the manager
/// (e.g. cancelling a sibling goal, `shutdown`), is fine.
///
/// The entered state and the feedback payload are passed as arguments
/// precisely so that handlers do not need to read them back through
/// the handle.
///
/// # Example
///
/// ```
/// use axon_client::{CommState, GoalEventHandler, GoalHandle};
/// use parking_lot::Mutex;
/// use serde_json::Value;
///
/// #[derive(Default)]
/// struct Tracer {
///     seen: Mutex<Vec<CommState>>,
/// }
///
/// impl GoalEventHandler for Tracer {
///     fn on_transition(&self, _handle: &GoalHandle, state: CommState) {
///         self.seen.lock().push(state);
///     }
/// }
/// ```
pub trait GoalEventHandler: Send + Sync {
    /// Called after the goal entered `state`.
    fn on_transition(&self, handle: &GoalHandle, state: CommState) {
        let _ = (handle, state);
    }

    /// Called for every feedback message addressed to the goal.
    fn on_feedback(&self, handle: &GoalHandle, feedback: &Value) {
        let _ = (handle, feedback);
    }
}
