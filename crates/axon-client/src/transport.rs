//! The outgoing pub/sub seam.
//!
//! The client core does not know how messages reach the action server.
//! It publishes through an [`ActionTransport`], which the surrounding
//! system implements over its messaging fabric. Publication is assumed
//! non-blocking; a transport that buffers or drops is acceptable, one
//! that blocks the caller is not.

use axon_types::GoalId;
use serde_json::Value;
use thiserror::Error;

/// Outgoing message publisher for one action client.
///
/// Implementations route to the action's goal and cancel topics. The
/// incoming direction (status, feedback, result) is delivered by the
/// host environment straight to
/// [`GoalManager`](crate::GoalManager)'s `on_*` methods, optionally
/// through [`dispatch`](crate::dispatch).
pub trait ActionTransport: Send + Sync {
    /// Publishes an action-goal envelope on the goal topic.
    ///
    /// # Errors
    ///
    /// [`TransportError`] when the fabric refuses the message. The
    /// manager logs and drops; delivery is not retried here.
    fn publish_goal(&self, action_goal: &Value) -> Result<(), TransportError>;

    /// Publishes a cancel request on the cancel topic.
    ///
    /// An empty id asks the server to cancel every goal; the stamp is
    /// always zero.
    ///
    /// # Errors
    ///
    /// [`TransportError`] when the fabric refuses the message.
    fn publish_cancel(&self, cancel: &GoalId) -> Result<(), TransportError>;
}

/// The transport refused a publish.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    /// Creates a transport error from a reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}
