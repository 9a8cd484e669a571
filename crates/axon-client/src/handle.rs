//! Client-side goal references.

use crate::csm::CommStateMachine;
use crate::error::ClientError;
use crate::manager::ManagerCore;
use crate::state::{CommState, TerminalState};
use axon_types::{ErrorCode, GoalId, Stamp};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tracing::{error, warn};

/// Reference to one in-flight goal.
///
/// A handle is the user's interface to a submitted goal: query its
/// progress and outcome, re-send or cancel it, and finally
/// [`shutdown`](Self::shutdown) it when the goal should no longer be
/// tracked. Handles are cheap to clone; clones refer to the same goal
/// and share the same active flag.
///
/// # Shutdown Semantics
///
/// After `shutdown`, the handle is inert: event callbacks stop firing
/// for this goal, reads answer safe defaults (`comm_state()` → done,
/// `terminal_state()` → lost) and writes do nothing. Every such call
/// is logged as misuse but never panics. Shutting down twice is a
/// no-op.
#[derive(Clone)]
pub struct GoalHandle {
    manager: Weak<ManagerCore>,
    csm: Arc<CommStateMachine>,
    active: Arc<AtomicBool>,
}

impl GoalHandle {
    pub(crate) fn new(manager: Weak<ManagerCore>, csm: Arc<CommStateMachine>) -> Self {
        Self {
            manager,
            csm,
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Returns `false` once the handle has been shut down.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// The goal's correlation id.
    #[must_use]
    pub fn goal_id(&self) -> &str {
        self.csm.goal_id()
    }

    /// The goal's state machine.
    #[must_use]
    pub fn state_machine(&self) -> &CommStateMachine {
        &self.csm
    }

    pub(crate) fn csm_arc(&self) -> &Arc<CommStateMachine> {
        &self.csm
    }

    /// Current comm state; done for an inactive handle.
    #[must_use]
    pub fn comm_state(&self) -> CommState {
        if !self.is_active() {
            self.log_misuse("comm_state() called on an inactive goal handle");
            return CommState::Done;
        }
        self.csm.comm_state()
    }

    /// Terminal outcome of the goal.
    ///
    /// Intended to be called once [`comm_state`](Self::comm_state) is
    /// [`CommState::Done`]; earlier calls are answered from the latest
    /// status anyway (degrading to lost) with a warning.
    #[must_use]
    pub fn terminal_state(&self) -> TerminalState {
        if !self.is_active() {
            self.log_misuse("terminal_state() called on an inactive goal handle");
            return TerminalState::lost();
        }

        let state = self.csm.comm_state();
        if !state.is_done() {
            warn!(
                goal_id = self.goal_id(),
                state = %state,
                "terminal state queried before the goal finished"
            );
        }
        self.csm.terminal_state()
    }

    /// The user result payload, once it arrived.
    #[must_use]
    pub fn result(&self) -> Option<Value> {
        if !self.is_active() {
            self.log_misuse("result() called on an inactive goal handle");
        }
        self.csm.result()
    }

    /// Re-publishes the original goal envelope, id and stamp included.
    ///
    /// Used when the server may have missed the first send; the server
    /// treats the repeated id as idempotent and the state machine does
    /// not reset.
    pub fn resend(&self) {
        if !self.is_active() {
            self.log_misuse("resend() called on an inactive goal handle");
            return;
        }
        let Some(core) = self.manager.upgrade() else {
            error!(goal_id = self.goal_id(), "goal manager dropped; cannot resend");
            return;
        };
        core.publish_goal(self.csm.action_goal());
    }

    /// Asks the server to cancel this goal.
    ///
    /// Publishes a cancel message bearing the goal's id and a zero
    /// stamp, then optimistically moves the goal to
    /// [`CommState::WaitingForCancelAck`]. The rest of the lifecycle
    /// is driven by the server's subsequent status and result
    /// messages; there is no local timeout.
    pub fn cancel(&self) {
        if !self.is_active() {
            self.log_misuse("cancel() called on an inactive goal handle");
            return;
        }
        let Some(core) = self.manager.upgrade() else {
            error!(goal_id = self.goal_id(), "goal manager dropped; cannot cancel");
            return;
        };
        core.publish_cancel(&GoalId::new(self.goal_id(), Stamp::ZERO));
        self.csm.transition_to(CommState::WaitingForCancelAck, self);
    }

    /// Stops tracking the goal through this handle.
    ///
    /// With `delete_from_manager`, the manager also forgets the goal
    /// entirely: no clone of this handle will see further messages and
    /// the state machine is dropped with the last handle.
    pub fn shutdown(&self, delete_from_manager: bool) {
        self.active.swap(false, Ordering::SeqCst);
        if delete_from_manager {
            if let Some(core) = self.manager.upgrade() {
                core.delete_handle(self);
            }
        }
    }

    fn log_misuse(&self, what: &'static str) {
        let err = ClientError::Misuse(what);
        error!(code = err.code(), goal_id = self.goal_id(), "{err}");
    }
}
