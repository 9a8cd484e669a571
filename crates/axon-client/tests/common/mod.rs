//! Shared helpers for the integration tests.

use axon_client::testing::{test_spec, RecordingTransport};
use axon_client::{GoalEventHandler, GoalHandle, GoalManager};
use axon_types::{GoalId, Stamp};
use serde_json::{json, Value};
use std::sync::Arc;

/// Installs a test tracing subscriber; repeated calls are harmless.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// A manager over a recording transport, plus the transport.
pub fn manager() -> (GoalManager, Arc<RecordingTransport>) {
    init_logging();
    let transport = Arc::new(RecordingTransport::default());
    let manager = GoalManager::new(test_spec(), transport.clone(), "probe_client");
    (manager, transport)
}

/// Submits a fresh goal with the given handler, returning its handle.
pub fn submit(
    manager: &GoalManager,
    handler: Option<Arc<dyn GoalEventHandler>>,
) -> anyhow::Result<GoalHandle> {
    let envelope = manager.spec().new_action_goal(
        json!({"target": "dock"}),
        Stamp::now(),
        GoalId::empty(),
    )?;
    Ok(manager.submit(envelope, handler)?)
}

/// Builds a result envelope for `goal_id` with the given status code.
pub fn result_envelope(
    manager: &GoalManager,
    goal_id: &str,
    status: axon_types::StatusCode,
    payload: Value,
) -> anyhow::Result<Value> {
    Ok(manager.spec().new_action_result(
        payload,
        Stamp::now(),
        axon_msgs::GoalStatus::new(GoalId::new(goal_id, Stamp::ZERO), status),
    )?)
}
