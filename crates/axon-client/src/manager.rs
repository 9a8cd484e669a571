//! Per-client goal bookkeeping and message fan-out.

use crate::csm::CommStateMachine;
use crate::error::ClientError;
use crate::handle::GoalHandle;
use crate::handler::GoalEventHandler;
use crate::id_gen::GoalIdGenerator;
use crate::transport::ActionTransport;
use axon_msgs::{ActionSpec, GoalStatusArray, SpecError};
use axon_types::{ErrorCode, GoalId, Stamp};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

pub(crate) struct ManagerCore {
    spec: Arc<ActionSpec>,
    transport: Arc<dyn ActionTransport>,
    id_gen: GoalIdGenerator,
    handles: Mutex<Vec<GoalHandle>>,
}

impl ManagerCore {
    pub(crate) fn publish_goal(&self, action_goal: &Value) {
        if let Err(cause) = self.transport.publish_goal(action_goal) {
            let err = ClientError::Transport(cause.to_string());
            error!(code = err.code(), "{err}");
        }
    }

    pub(crate) fn publish_cancel(&self, cancel: &GoalId) {
        if let Err(cause) = self.transport.publish_cancel(cancel) {
            let err = ClientError::Transport(cause.to_string());
            error!(code = err.code(), "{err}");
        }
    }

    pub(crate) fn delete_handle(&self, handle: &GoalHandle) {
        self.handles
            .lock()
            .retain(|tracked| !Arc::ptr_eq(tracked.csm_arc(), handle.csm_arc()));
    }
}

/// Owns the live goals of one action client.
///
/// The manager creates a [`GoalHandle`] (with its state machine) per
/// submitted goal, publishes outgoing goal and cancel messages through
/// the [`ActionTransport`], and fans every incoming status, feedback
/// and result message out to every tracked goal. Each goal decides for
/// itself whether a message concerns it.
///
/// Cloning a manager is cheap and yields another front to the same
/// goal set; [`dispatch`](crate::dispatch) uses that to consume one
/// clone in its delivery loop.
///
/// # Example
///
/// ```
/// use axon_client::testing::{test_spec, RecordingTransport};
/// use axon_client::GoalManager;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let transport = Arc::new(RecordingTransport::default());
/// let manager = GoalManager::new(test_spec(), transport.clone(), "probe_client");
///
/// let goal = manager.spec().new_action_goal(
///     json!({"target": "dock"}),
///     axon_types::Stamp::now(),
///     axon_types::GoalId::empty(),
/// ).unwrap();
///
/// let handle = manager.submit(goal, None).unwrap();
/// assert!(handle.goal_id().starts_with("probe_client-0-"));
/// assert_eq!(transport.published_goals().len(), 1);
/// ```
#[derive(Clone)]
pub struct GoalManager {
    core: Arc<ManagerCore>,
}

impl GoalManager {
    /// Creates a manager publishing through `transport`.
    ///
    /// `node_name` seeds the goal-id generator; every id this client
    /// assigns starts with it.
    #[must_use]
    pub fn new(
        spec: Arc<ActionSpec>,
        transport: Arc<dyn ActionTransport>,
        node_name: impl Into<String>,
    ) -> Self {
        Self {
            core: Arc::new(ManagerCore {
                spec,
                transport,
                id_gen: GoalIdGenerator::new(node_name),
                handles: Mutex::new(Vec::new()),
            }),
        }
    }

    /// The schema this client speaks.
    #[must_use]
    pub fn spec(&self) -> &Arc<ActionSpec> {
        &self.core.spec
    }

    /// Submits an action-goal envelope and starts tracking it.
    ///
    /// An envelope without an id gets a fresh one from the generator;
    /// an id with a zero stamp is re-stamped with now. The (possibly
    /// amended) envelope is published, and a new active handle in the
    /// initial comm state is returned.
    ///
    /// # Errors
    ///
    /// [`SpecError`] when the envelope's goal id cannot be read or
    /// written.
    pub fn submit(
        &self,
        action_goal: Value,
        handler: Option<Arc<dyn GoalEventHandler>>,
    ) -> Result<GoalHandle, SpecError> {
        let mut action_goal = action_goal;
        let mut goal_id = self.core.spec.goal_id_of(&action_goal)?;

        if goal_id.is_unset() {
            goal_id = self.core.id_gen.generate();
            self.core.spec.set_goal_id(&mut action_goal, &goal_id)?;
        } else if goal_id.stamp.is_zero() {
            goal_id.stamp = Stamp::now();
            self.core.spec.set_goal_id(&mut action_goal, &goal_id)?;
        }

        self.core.publish_goal(&action_goal);

        let csm = Arc::new(CommStateMachine::new(
            action_goal,
            Arc::clone(&self.core.spec),
            handler,
        )?);
        let handle = GoalHandle::new(Arc::downgrade(&self.core), csm);
        self.core.handles.lock().push(handle.clone());

        debug!(goal_id = handle.goal_id(), "goal submitted");
        Ok(handle)
    }

    /// Fans a status-array advertisement out to every tracked goal.
    pub fn on_status(&self, array: &GoalStatusArray) {
        for handle in self.snapshot() {
            handle.state_machine().update_status(array, &handle);
        }
    }

    /// Fans an action-feedback envelope out to every tracked goal.
    pub fn on_feedback(&self, action_feedback: &Value) {
        for handle in self.snapshot() {
            handle.state_machine().update_feedback(action_feedback, &handle);
        }
    }

    /// Fans an action-result envelope out to every tracked goal.
    pub fn on_result(&self, action_result: &Value) {
        for handle in self.snapshot() {
            handle.state_machine().update_result(action_result, &handle);
        }
    }

    /// Publishes a cancel request for one goal id.
    pub fn send_cancel(&self, goal_id: &str) {
        self.core.publish_cancel(&GoalId::new(goal_id, Stamp::ZERO));
    }

    /// Publishes the cancel-all request (empty id).
    pub fn cancel_all(&self) {
        self.core.publish_cancel(&GoalId::empty());
    }

    /// Stops tracking a goal; its state machine is dropped with the
    /// last outstanding handle clone.
    pub fn delete_handle(&self, handle: &GoalHandle) {
        self.core.delete_handle(handle);
    }

    /// Number of goals currently tracked.
    #[must_use]
    pub fn live_goals(&self) -> usize {
        self.core.handles.lock().len()
    }

    // Event handlers may re-enter the manager during dispatch
    // (cancel a sibling, shutdown-with-delete), so fan-out walks a
    // snapshot, never the locked set.
    fn snapshot(&self) -> Vec<GoalHandle> {
        self.core.handles.lock().clone()
    }
}
