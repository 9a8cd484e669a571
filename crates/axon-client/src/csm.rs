//! Per-goal communication state machine.
//!
//! One [`CommStateMachine`] tracks one submitted goal. It folds the
//! server's advertised status, feedback and result streams into the
//! client-side [`CommState`] view, firing the registered
//! [`GoalEventHandler`] on every observable transition.
//!
//! The legal transition relation is the pure function [`transitions`];
//! everything stateful lives behind one mutex per machine.

use crate::error::ClientError;
use crate::handle::GoalHandle;
use crate::handler::GoalEventHandler;
use crate::state::{CommState, TerminalState};
use axon_msgs::{ActionSpec, GoalStatus, GoalStatusArray, SpecError};
use axon_types::{ErrorCode, GoalId, Stamp, StatusCode};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Reaction of the state machine to one advertised server status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The status confirms the current state; nothing to do.
    Stay,
    /// Enter these states, in order, firing the transition callback
    /// for each.
    Go(&'static [CommState]),
    /// The server may not advertise this status from here; log and
    /// keep the current state.
    Illegal,
}

fn go(seq: &'static [CommState]) -> Step {
    Step::Go(seq)
}

/// The legal reaction to a server `status` observed in comm state
/// `from`.
///
/// A single server status can imply several client transitions: a
/// server that already preempted a goal the client still believes is
/// pending yields `Active`, `Preempting`, `WaitingForResult` in one
/// step, so observers hear about the states the wire skipped.
///
/// `Lost` is illegal from every state: servers never advertise it, the
/// client synthesizes it locally when a tracked goal vanishes from the
/// status stream.
#[must_use]
pub fn transitions(from: CommState, status: StatusCode) -> Step {
    use CommState as C;
    use StatusCode as S;

    match (from, status) {
        (C::WaitingForGoalAck, S::Pending) => go(&[C::Pending]),
        (C::WaitingForGoalAck, S::Active) => go(&[C::Active]),
        (C::WaitingForGoalAck, S::Preempted) => {
            go(&[C::Active, C::Preempting, C::WaitingForResult])
        }
        (C::WaitingForGoalAck, S::Succeeded | S::Aborted) => go(&[C::Active, C::WaitingForResult]),
        (C::WaitingForGoalAck, S::Rejected | S::Recalled) => {
            go(&[C::Pending, C::WaitingForResult])
        }
        (C::WaitingForGoalAck, S::Preempting) => go(&[C::Active, C::Preempting]),
        (C::WaitingForGoalAck, S::Recalling) => go(&[C::Pending, C::Recalling]),

        (C::Pending, S::Pending) => Step::Stay,
        (C::Pending, S::Active) => go(&[C::Active]),
        (C::Pending, S::Preempted) => go(&[C::Active, C::Preempting, C::WaitingForResult]),
        (C::Pending, S::Succeeded | S::Aborted) => go(&[C::Active, C::WaitingForResult]),
        (C::Pending, S::Rejected) => go(&[C::WaitingForResult]),
        (C::Pending, S::Preempting) => go(&[C::Active, C::Preempting]),
        (C::Pending, S::Recalling) => go(&[C::Recalling]),
        (C::Pending, S::Recalled) => go(&[C::Recalling, C::WaitingForResult]),

        (C::Active, S::Pending | S::Rejected | S::Recalling | S::Recalled) => Step::Illegal,
        (C::Active, S::Active) => Step::Stay,
        (C::Active, S::Preempted) => go(&[C::Preempting, C::WaitingForResult]),
        (C::Active, S::Succeeded | S::Aborted) => go(&[C::WaitingForResult]),
        (C::Active, S::Preempting) => go(&[C::Preempting]),

        (C::WaitingForResult, S::Pending | S::Preempting | S::Recalling) => Step::Illegal,
        (
            C::WaitingForResult,
            S::Active | S::Preempted | S::Succeeded | S::Aborted | S::Rejected | S::Recalled,
        ) => Step::Stay,

        (C::WaitingForCancelAck, S::Pending | S::Active) => Step::Stay,
        (C::WaitingForCancelAck, S::Preempted | S::Succeeded | S::Aborted) => {
            go(&[C::Preempting, C::WaitingForResult])
        }
        (C::WaitingForCancelAck, S::Rejected) => go(&[C::WaitingForResult]),
        (C::WaitingForCancelAck, S::Preempting) => go(&[C::Preempting]),
        (C::WaitingForCancelAck, S::Recalling) => go(&[C::Recalling]),
        (C::WaitingForCancelAck, S::Recalled) => go(&[C::Recalling, C::WaitingForResult]),

        (C::Recalling, S::Pending | S::Active) => Step::Illegal,
        (C::Recalling, S::Preempted | S::Succeeded | S::Aborted) => {
            go(&[C::Preempting, C::WaitingForResult])
        }
        (C::Recalling, S::Rejected | S::Recalled) => go(&[C::WaitingForResult]),
        (C::Recalling, S::Preempting) => go(&[C::Preempting]),
        (C::Recalling, S::Recalling) => Step::Stay,

        (C::Preempting, S::Pending | S::Active | S::Rejected | S::Recalling | S::Recalled) => {
            Step::Illegal
        }
        (C::Preempting, S::Preempted | S::Succeeded | S::Aborted) => go(&[C::WaitingForResult]),
        (C::Preempting, S::Preempting) => Step::Stay,

        // `update_status` drops late messages before consulting the
        // table; the row exists so the relation is total.
        (C::Done, S::Pending | S::Preempting | S::Recalling) => Step::Illegal,
        (
            C::Done,
            S::Active | S::Preempted | S::Succeeded | S::Aborted | S::Rejected | S::Recalled,
        ) => Step::Stay,

        (_, S::Lost) => Step::Illegal,
    }
}

struct CsmState {
    comm_state: CommState,
    latest_status: Option<GoalStatus>,
    latest_result: Option<Value>,
}

/// Tracks the conversation between this client and the action server
/// for a single goal.
///
/// Created by [`GoalManager::submit`](crate::GoalManager::submit) and
/// shared with the goal's [`GoalHandle`]s. All mutable state sits
/// behind one mutex; update operations, the explicit transition, and
/// the derived queries each hold it for their full duration, so
/// handlers observe transitions atomically and in order.
pub struct CommStateMachine {
    goal_id: String,
    action_goal: Value,
    spec: Arc<ActionSpec>,
    handler: Option<Arc<dyn GoalEventHandler>>,
    state: Mutex<CsmState>,
}

impl CommStateMachine {
    /// Creates a machine for a submitted action-goal envelope.
    ///
    /// # Errors
    ///
    /// [`SpecError`] when the envelope carries no readable goal id.
    pub fn new(
        action_goal: Value,
        spec: Arc<ActionSpec>,
        handler: Option<Arc<dyn GoalEventHandler>>,
    ) -> Result<Self, SpecError> {
        let goal_id = spec.goal_id_of(&action_goal)?.id;
        Ok(Self {
            goal_id,
            action_goal,
            spec,
            handler,
            state: Mutex::new(CsmState {
                comm_state: CommState::WaitingForGoalAck,
                latest_status: None,
                latest_result: None,
            }),
        })
    }

    /// The id this machine correlates incoming messages against.
    #[must_use]
    pub fn goal_id(&self) -> &str {
        &self.goal_id
    }

    /// The original action-goal envelope, as published.
    #[must_use]
    pub fn action_goal(&self) -> &Value {
        &self.action_goal
    }

    /// Current comm state.
    #[must_use]
    pub fn comm_state(&self) -> CommState {
        self.state.lock().comm_state
    }

    /// Last status the server advertised for this goal, if any.
    #[must_use]
    pub fn goal_status(&self) -> Option<GoalStatus> {
        self.state.lock().latest_status.clone()
    }

    /// The user result payload, once the result envelope arrived.
    #[must_use]
    pub fn result(&self) -> Option<Value> {
        let st = self.state.lock();
        let envelope = st.latest_result.as_ref()?;
        match self.spec.result_of(envelope) {
            Ok(result) => Some(result),
            Err(err) => {
                error!(code = err.code(), goal_id = %self.goal_id, "{err}");
                None
            }
        }
    }

    /// Terminal outcome per the last observed status.
    ///
    /// Meaningful once [`comm_state`](Self::comm_state) is
    /// [`CommState::Done`]; before that the latest status is
    /// non-terminal and the answer degrades to lost, with a log.
    #[must_use]
    pub fn terminal_state(&self) -> TerminalState {
        let st = self.state.lock();
        match &st.latest_status {
            Some(status) => TerminalState::from_status(status),
            None => {
                error!(
                    goal_id = %self.goal_id,
                    "terminal state queried before any status arrived"
                );
                TerminalState::lost()
            }
        }
    }

    /// Folds one status-array advertisement into the machine.
    ///
    /// The array entry matching this goal's id drives the transition
    /// table. A missing entry is meaningful: once a goal has been seen
    /// by the server (or a cancel is in flight), its disappearance
    /// from the stream marks it lost and the machine goes straight to
    /// [`CommState::Done`].
    pub fn update_status(&self, array: &GoalStatusArray, handle: &GoalHandle) {
        let mut st = self.state.lock();

        // Stale advertisements keep arriving after the result; drop
        // them before they can disturb the terminal state.
        if st.comm_state.is_done() {
            return;
        }

        let Some(status) = array.find(&self.goal_id) else {
            if !matches!(
                st.comm_state,
                CommState::WaitingForGoalAck | CommState::WaitingForResult
            ) {
                warn!(goal_id = %self.goal_id, "goal absent from status stream, marking lost");
                let mut latest = st.latest_status.take().unwrap_or_else(|| {
                    GoalStatus::new(
                        GoalId::new(self.goal_id.clone(), Stamp::ZERO),
                        StatusCode::Lost,
                    )
                });
                latest.status = StatusCode::Lost.as_wire();
                st.latest_status = Some(latest);
                self.transition_locked(&mut st, CommState::Done, handle);
            }
            return;
        };

        st.latest_status = Some(status.clone());
        self.step_locked(&mut st, status, handle);
    }

    /// Folds the terminal result envelope into the machine.
    ///
    /// The result's embedded status is driven through the transition
    /// table first, so any states the wire skipped are announced, then
    /// the machine enters [`CommState::Done`]. A second result for a
    /// finished goal is a server error: logged, nothing overwritten.
    pub fn update_result(&self, action_result: &Value, handle: &GoalHandle) {
        let status = match self.spec.status_of_result(action_result) {
            Ok(status) => status,
            Err(err) => {
                error!(code = err.code(), goal_id = %self.goal_id, "{err}");
                return;
            }
        };
        if status.goal_id.id != self.goal_id {
            return;
        }

        let mut st = self.state.lock();

        if st.comm_state.is_done() {
            let err = ClientError::ProtocolViolation {
                from: CommState::Done,
                status: status.status_code().unwrap_or(StatusCode::Lost),
            };
            error!(
                code = err.code(),
                goal_id = %self.goal_id,
                "received a result for a goal already done"
            );
            return;
        }

        st.latest_status = Some(status.clone());
        st.latest_result = Some(action_result.clone());
        self.step_locked(&mut st, &status, handle);
        self.transition_locked(&mut st, CommState::Done, handle);
    }

    /// Delivers a feedback envelope to the registered handler.
    ///
    /// Feedback never changes state; the lock is still held across the
    /// callback so feedback and transitions interleave in a single
    /// per-goal order.
    pub fn update_feedback(&self, action_feedback: &Value, handle: &GoalHandle) {
        let status = match self.spec.status_of_feedback(action_feedback) {
            Ok(status) => status,
            Err(err) => {
                error!(code = err.code(), goal_id = %self.goal_id, "{err}");
                return;
            }
        };
        if status.goal_id.id != self.goal_id {
            return;
        }

        let feedback = match self.spec.feedback_of(action_feedback) {
            Ok(feedback) => feedback,
            Err(err) => {
                error!(code = err.code(), goal_id = %self.goal_id, "{err}");
                return;
            }
        };

        let _st = self.state.lock();
        if handle.is_active() {
            if let Some(handler) = &self.handler {
                handler.on_feedback(handle, &feedback);
            }
        }
    }

    /// Enters `state` and fires the transition callback.
    ///
    /// Used by the table walk and by user-initiated cancel, which
    /// optimistically moves the goal to
    /// [`CommState::WaitingForCancelAck`] before the server reacts.
    pub fn transition_to(&self, state: CommState, handle: &GoalHandle) {
        let mut st = self.state.lock();
        self.transition_locked(&mut st, state, handle);
    }

    fn step_locked(&self, st: &mut CsmState, status: &GoalStatus, handle: &GoalHandle) {
        let Some(code) = status.status_code() else {
            let err = ClientError::UnknownStatusCode(status.status);
            error!(code = err.code(), goal_id = %self.goal_id, "{err}");
            return;
        };

        match transitions(st.comm_state, code) {
            Step::Stay => {}
            Step::Illegal => {
                let err = ClientError::ProtocolViolation {
                    from: st.comm_state,
                    status: code,
                };
                error!(code = err.code(), goal_id = %self.goal_id, "{err}");
            }
            Step::Go(sequence) => {
                for next in sequence {
                    self.transition_locked(st, *next, handle);
                }
            }
        }
    }

    fn transition_locked(&self, st: &mut CsmState, next: CommState, handle: &GoalHandle) {
        debug!(
            goal_id = %self.goal_id,
            from = %st.comm_state,
            to = %next,
            "comm state transition"
        );
        st.comm_state = next;
        if handle.is_active() {
            if let Some(handler) = &self.handler {
                handler.on_transition(handle, next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TerminalOutcome;
    use crate::testing::{status_array, test_spec, RecordingHandler};
    use std::sync::Weak;

    fn machine(handler: Option<Arc<RecordingHandler>>) -> (Arc<CommStateMachine>, GoalHandle) {
        let spec = test_spec();
        let goal_id = GoalId::new("g1", Stamp::new(1, 0));
        let envelope = spec
            .new_action_goal(serde_json::json!({"x": 1}), Stamp::new(1, 0), goal_id)
            .expect("envelope");
        let handler: Option<Arc<dyn GoalEventHandler>> = match handler {
            Some(h) => Some(h),
            None => None,
        };
        let csm = Arc::new(CommStateMachine::new(envelope, spec, handler).expect("machine"));
        let handle = GoalHandle::new(Weak::new(), Arc::clone(&csm));
        (csm, handle)
    }

    #[test]
    fn starts_waiting_for_goal_ack() {
        let (csm, _handle) = machine(None);
        assert_eq!(csm.comm_state(), CommState::WaitingForGoalAck);
        assert!(csm.goal_status().is_none());
        assert!(csm.result().is_none());
    }

    #[test]
    fn full_table_enumeration() {
        use CommState as C;
        use StatusCode as S;

        let stay = Step::Stay;
        let ill = Step::Illegal;
        let go = |seq: &'static [CommState]| Step::Go(seq);

        // One row per comm state, one cell per server status in wire
        // order PENDING..RECALLED.
        #[rustfmt::skip]
        let rows: [(CommState, [Step; 9]); 8] = [
            (C::WaitingForGoalAck, [
                go(&[C::Pending]),
                go(&[C::Active]),
                go(&[C::Active, C::Preempting, C::WaitingForResult]),
                go(&[C::Active, C::WaitingForResult]),
                go(&[C::Active, C::WaitingForResult]),
                go(&[C::Pending, C::WaitingForResult]),
                go(&[C::Active, C::Preempting]),
                go(&[C::Pending, C::Recalling]),
                go(&[C::Pending, C::WaitingForResult]),
            ]),
            (C::Pending, [
                stay,
                go(&[C::Active]),
                go(&[C::Active, C::Preempting, C::WaitingForResult]),
                go(&[C::Active, C::WaitingForResult]),
                go(&[C::Active, C::WaitingForResult]),
                go(&[C::WaitingForResult]),
                go(&[C::Active, C::Preempting]),
                go(&[C::Recalling]),
                go(&[C::Recalling, C::WaitingForResult]),
            ]),
            (C::Active, [
                ill,
                stay,
                go(&[C::Preempting, C::WaitingForResult]),
                go(&[C::WaitingForResult]),
                go(&[C::WaitingForResult]),
                ill,
                go(&[C::Preempting]),
                ill,
                ill,
            ]),
            (C::WaitingForResult, [
                ill, stay, stay, stay, stay, stay, ill, ill, stay,
            ]),
            (C::WaitingForCancelAck, [
                stay,
                stay,
                go(&[C::Preempting, C::WaitingForResult]),
                go(&[C::Preempting, C::WaitingForResult]),
                go(&[C::Preempting, C::WaitingForResult]),
                go(&[C::WaitingForResult]),
                go(&[C::Preempting]),
                go(&[C::Recalling]),
                go(&[C::Recalling, C::WaitingForResult]),
            ]),
            (C::Recalling, [
                ill,
                ill,
                go(&[C::Preempting, C::WaitingForResult]),
                go(&[C::Preempting, C::WaitingForResult]),
                go(&[C::Preempting, C::WaitingForResult]),
                go(&[C::WaitingForResult]),
                go(&[C::Preempting]),
                stay,
                go(&[C::WaitingForResult]),
            ]),
            (C::Preempting, [
                ill,
                ill,
                go(&[C::WaitingForResult]),
                go(&[C::WaitingForResult]),
                go(&[C::WaitingForResult]),
                ill,
                stay,
                ill,
                ill,
            ]),
            (C::Done, [
                ill, stay, stay, stay, stay, stay, ill, ill, stay,
            ]),
        ];

        for (from, cells) in rows {
            for (code, expected) in (0..9u8).zip(cells) {
                let status = StatusCode::from_wire(code).expect("protocol code");
                assert_eq!(
                    transitions(from, status),
                    expected,
                    "cell ({from}, {status})"
                );
            }
            // LOST is never a legal advertisement; it only arises
            // locally when a goal vanishes from the status stream.
            assert_eq!(transitions(from, S::Lost), Step::Illegal);
        }

        // Only results finish a goal: no emitted sequence is empty or
        // ends in the terminal comm state.
        for (from, _) in rows {
            for status in StatusCode::ALL {
                if let Step::Go(seq) = transitions(from, status) {
                    assert!(!seq.is_empty());
                    assert!(!seq.contains(&C::Done));
                }
            }
        }
    }

    #[test]
    fn multi_hop_transition_announces_skipped_states() {
        let handler = Arc::new(RecordingHandler::default());
        let (csm, handle) = machine(Some(Arc::clone(&handler)));

        csm.update_status(&status_array(&[("g1", StatusCode::Preempted)]), &handle);

        assert_eq!(csm.comm_state(), CommState::WaitingForResult);
        assert_eq!(
            handler.transitions(),
            vec![
                CommState::Active,
                CommState::Preempting,
                CommState::WaitingForResult,
            ]
        );
    }

    #[test]
    fn illegal_status_leaves_state_unchanged() {
        let (csm, handle) = machine(None);
        csm.update_status(&status_array(&[("g1", StatusCode::Active)]), &handle);
        assert_eq!(csm.comm_state(), CommState::Active);

        csm.update_status(&status_array(&[("g1", StatusCode::Pending)]), &handle);
        assert_eq!(csm.comm_state(), CommState::Active);
    }

    #[test]
    fn unknown_status_code_is_ignored() {
        let (csm, handle) = machine(None);
        let mut array = status_array(&[("g1", StatusCode::Active)]);
        array.status_list[0].status = 42;

        csm.update_status(&array, &handle);
        assert_eq!(csm.comm_state(), CommState::WaitingForGoalAck);
        // The bogus entry still matched our goal id, so it was recorded.
        assert_eq!(csm.goal_status().map(|gs| gs.status), Some(42));
    }

    #[test]
    fn unrelated_status_is_ignored_entirely() {
        let handler = Arc::new(RecordingHandler::default());
        let (csm, handle) = machine(Some(Arc::clone(&handler)));

        csm.update_status(&status_array(&[("g99", StatusCode::Succeeded)]), &handle);

        assert_eq!(csm.comm_state(), CommState::WaitingForGoalAck);
        assert!(csm.goal_status().is_none());
        assert!(handler.transitions().is_empty());
    }

    #[test]
    fn vanished_goal_is_marked_lost() {
        let (csm, handle) = machine(None);
        csm.update_status(&status_array(&[("g1", StatusCode::Active)]), &handle);
        csm.update_status(&status_array(&[]), &handle);

        assert_eq!(csm.comm_state(), CommState::Done);
        assert_eq!(csm.terminal_state().outcome, TerminalOutcome::Lost);
    }

    #[test]
    fn vanished_goal_before_ack_is_not_lost() {
        let (csm, handle) = machine(None);
        csm.update_status(&status_array(&[]), &handle);
        assert_eq!(csm.comm_state(), CommState::WaitingForGoalAck);
    }

    #[test]
    fn result_walks_skipped_states_then_finishes() {
        let handler = Arc::new(RecordingHandler::default());
        let (csm, handle) = machine(Some(Arc::clone(&handler)));
        let spec = test_spec();

        csm.update_status(&status_array(&[("g1", StatusCode::Active)]), &handle);

        let result = spec
            .new_action_result(
                serde_json::json!({"ok": true}),
                Stamp::new(2, 0),
                GoalStatus::new(GoalId::new("g1", Stamp::ZERO), StatusCode::Succeeded),
            )
            .expect("result envelope");
        csm.update_result(&result, &handle);

        assert_eq!(csm.comm_state(), CommState::Done);
        assert_eq!(csm.result(), Some(serde_json::json!({"ok": true})));
        assert_eq!(csm.terminal_state().outcome, TerminalOutcome::Succeeded);
        assert_eq!(
            handler.transitions(),
            vec![
                CommState::Active,
                CommState::WaitingForResult,
                CommState::Done,
            ]
        );
    }

    #[test]
    fn duplicate_result_keeps_first_terminal() {
        let (csm, handle) = machine(None);
        let spec = test_spec();

        let first = spec
            .new_action_result(
                serde_json::json!("first"),
                Stamp::new(2, 0),
                GoalStatus::new(GoalId::new("g1", Stamp::ZERO), StatusCode::Succeeded),
            )
            .expect("result envelope");
        let second = spec
            .new_action_result(
                serde_json::json!("second"),
                Stamp::new(3, 0),
                GoalStatus::new(GoalId::new("g1", Stamp::ZERO), StatusCode::Aborted),
            )
            .expect("result envelope");

        csm.update_result(&first, &handle);
        csm.update_result(&second, &handle);

        assert_eq!(csm.comm_state(), CommState::Done);
        assert_eq!(csm.result(), Some(serde_json::json!("first")));
        assert_eq!(csm.terminal_state().outcome, TerminalOutcome::Succeeded);
    }

    #[test]
    fn result_for_other_goal_is_ignored() {
        let (csm, handle) = machine(None);
        let spec = test_spec();
        let result = spec
            .new_action_result(
                serde_json::json!(1),
                Stamp::ZERO,
                GoalStatus::new(GoalId::new("g2", Stamp::ZERO), StatusCode::Succeeded),
            )
            .expect("result envelope");

        csm.update_result(&result, &handle);
        assert_eq!(csm.comm_state(), CommState::WaitingForGoalAck);
        assert!(csm.result().is_none());
    }

    #[test]
    fn status_after_done_is_dropped() {
        let (csm, handle) = machine(None);
        let spec = test_spec();
        let result = spec
            .new_action_result(
                serde_json::json!(1),
                Stamp::ZERO,
                GoalStatus::new(GoalId::new("g1", Stamp::ZERO), StatusCode::Succeeded),
            )
            .expect("result envelope");
        csm.update_result(&result, &handle);

        csm.update_status(&status_array(&[("g1", StatusCode::Pending)]), &handle);
        assert_eq!(csm.comm_state(), CommState::Done);
        assert_eq!(csm.terminal_state().outcome, TerminalOutcome::Succeeded);
    }

    #[test]
    fn feedback_reaches_handler_without_state_change() {
        let handler = Arc::new(RecordingHandler::default());
        let (csm, handle) = machine(Some(Arc::clone(&handler)));
        let spec = test_spec();

        let feedback = spec
            .new_action_feedback(
                serde_json::json!({"progress": 0.4}),
                Stamp::new(2, 0),
                GoalStatus::new(GoalId::new("g1", Stamp::ZERO), StatusCode::Active),
            )
            .expect("feedback envelope");
        csm.update_feedback(&feedback, &handle);

        assert_eq!(csm.comm_state(), CommState::WaitingForGoalAck);
        assert_eq!(handler.feedback(), vec![serde_json::json!({"progress": 0.4})]);
    }

    #[test]
    fn feedback_for_other_goal_is_ignored() {
        let handler = Arc::new(RecordingHandler::default());
        let (csm, handle) = machine(Some(Arc::clone(&handler)));
        let spec = test_spec();

        let feedback = spec
            .new_action_feedback(
                serde_json::json!(1),
                Stamp::ZERO,
                GoalStatus::new(GoalId::new("g2", Stamp::ZERO), StatusCode::Active),
            )
            .expect("feedback envelope");
        csm.update_feedback(&feedback, &handle);

        assert!(handler.feedback().is_empty());
    }
}
