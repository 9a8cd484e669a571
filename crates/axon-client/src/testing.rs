//! Testing support for action clients.
//!
//! Everything here is plain library code (no `cfg(test)`) so
//! downstream crates can drive a [`GoalManager`](crate::GoalManager)
//! against a recorded transport in their own tests, without a
//! messaging fabric.

use crate::handle::GoalHandle;
use crate::handler::GoalEventHandler;
use crate::state::CommState;
use crate::transport::{ActionTransport, TransportError};
use axon_msgs::{ActionSpec, ActionTypeNames, GoalStatus, GoalStatusArray, StaticMessageFactory};
use axon_types::{GoalId, Stamp, StatusCode};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// A transport that records every publish instead of sending it.
///
/// # Example
///
/// ```
/// use axon_client::testing::RecordingTransport;
/// use axon_client::ActionTransport;
/// use axon_types::GoalId;
///
/// let transport = RecordingTransport::default();
/// transport.publish_cancel(&GoalId::empty()).unwrap();
/// assert_eq!(transport.published_cancels().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RecordingTransport {
    goals: Mutex<Vec<Value>>,
    cancels: Mutex<Vec<GoalId>>,
}

impl RecordingTransport {
    /// Every action-goal envelope published so far, in order.
    #[must_use]
    pub fn published_goals(&self) -> Vec<Value> {
        self.goals.lock().clone()
    }

    /// Every cancel message published so far, in order.
    #[must_use]
    pub fn published_cancels(&self) -> Vec<GoalId> {
        self.cancels.lock().clone()
    }
}

impl ActionTransport for RecordingTransport {
    fn publish_goal(&self, action_goal: &Value) -> Result<(), TransportError> {
        self.goals.lock().push(action_goal.clone());
        Ok(())
    }

    fn publish_cancel(&self, cancel: &GoalId) -> Result<(), TransportError> {
        self.cancels.lock().push(cancel.clone());
        Ok(())
    }
}

/// A transport that refuses every publish.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingTransport;

impl ActionTransport for FailingTransport {
    fn publish_goal(&self, _action_goal: &Value) -> Result<(), TransportError> {
        Err(TransportError::new("fabric unavailable"))
    }

    fn publish_cancel(&self, _cancel: &GoalId) -> Result<(), TransportError> {
        Err(TransportError::new("fabric unavailable"))
    }
}

/// An event handler that records transitions and feedback in order.
#[derive(Debug, Default)]
pub struct RecordingHandler {
    transitions: Mutex<Vec<CommState>>,
    feedback: Mutex<Vec<Value>>,
}

impl RecordingHandler {
    /// Every comm state entered so far, in callback order.
    #[must_use]
    pub fn transitions(&self) -> Vec<CommState> {
        self.transitions.lock().clone()
    }

    /// Every feedback payload delivered so far, in callback order.
    #[must_use]
    pub fn feedback(&self) -> Vec<Value> {
        self.feedback.lock().clone()
    }
}

impl GoalEventHandler for RecordingHandler {
    fn on_transition(&self, _handle: &GoalHandle, state: CommState) {
        self.transitions.lock().push(state);
    }

    fn on_feedback(&self, _handle: &GoalHandle, feedback: &Value) {
        self.feedback.lock().push(feedback.clone());
    }
}

/// An [`ActionSpec`] for a synthetic `Probe` action, backed by a
/// [`StaticMessageFactory`] that knows all seven wire types.
#[must_use]
pub fn test_spec() -> Arc<ActionSpec> {
    let factory = StaticMessageFactory::with_action("Probe");
    Arc::new(
        ActionSpec::new(ActionTypeNames::for_action("Probe"), &factory)
            .expect("probe action types are all registered"),
    )
}

/// Builds a status array from `(goal id, status)` pairs, stamped now.
#[must_use]
pub fn status_array(entries: &[(&str, StatusCode)]) -> GoalStatusArray {
    GoalStatusArray::new(
        entries
            .iter()
            .map(|(id, status)| GoalStatus::new(GoalId::new(*id, Stamp::ZERO), *status))
            .collect(),
    )
}
