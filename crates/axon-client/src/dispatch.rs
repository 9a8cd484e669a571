//! Async delivery glue.
//!
//! The goal-tracking core is synchronous; message delivery usually is
//! not. [`run`] bridges the two: it drains the three incoming streams
//! from tokio mpsc channels and forwards each message to the manager
//! in arrival order, ending once every sender is gone.
//!
//! ```ignore
//! let (status_tx, status_rx) = mpsc::channel(64);
//! let (feedback_tx, feedback_rx) = mpsc::channel(64);
//! let (result_tx, result_rx) = mpsc::channel(64);
//!
//! // Subscribe the senders to the transport's topics, then:
//! tokio::spawn(dispatch::run(manager.clone(), status_rx, feedback_rx, result_rx));
//! ```

use crate::manager::GoalManager;
use axon_msgs::GoalStatusArray;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::info;

/// Forwards incoming messages to `manager` until all senders close.
///
/// Messages are dispatched inline on this task, one at a time, so
/// per-goal callback order matches arrival order across all three
/// streams seen by this loop.
pub async fn run(
    manager: GoalManager,
    mut status_rx: mpsc::Receiver<GoalStatusArray>,
    mut feedback_rx: mpsc::Receiver<Value>,
    mut result_rx: mpsc::Receiver<Value>,
) {
    info!("action dispatch loop started");

    loop {
        tokio::select! {
            Some(array) = status_rx.recv() => manager.on_status(&array),
            Some(envelope) = feedback_rx.recv() => manager.on_feedback(&envelope),
            Some(envelope) = result_rx.recv() => manager.on_result(&envelope),
            else => break,
        }
    }

    info!("action dispatch loop stopped");
}
