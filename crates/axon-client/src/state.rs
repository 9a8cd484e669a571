//! Client-side goal lifecycle states.
//!
//! The client tracks each goal with an eight-state view of the
//! conversation with the action server, distinct from the server's own
//! ten status codes.
//!
//! # State Machine
//!
//! ```text
//!  WaitingForGoalAck ──► Pending ──► Active ──► WaitingForResult ──► Done
//!        │                  │           │              ▲
//!        │ cancel()         ▼           ▼              │
//!        └─────────► WaitingForCancelAck ──► Recalling/Preempting ──┘
//! ```
//!
//! Every goal starts in [`CommState::WaitingForGoalAck`];
//! [`CommState::Done`] is terminal and never left. The full legal
//! transition relation lives in
//! [`transitions`](crate::transitions).

use axon_msgs::GoalStatus;
use axon_types::StatusCode;
use std::fmt;
use tracing::error;

/// The client's view of one goal's conversation with the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommState {
    /// Goal sent; no status seen for it yet.
    WaitingForGoalAck,
    /// Server has the goal queued.
    Pending,
    /// Server is executing the goal.
    Active,
    /// A terminal status arrived; the result envelope has not.
    WaitingForResult,
    /// The client asked to cancel; the server has not acknowledged.
    WaitingForCancelAck,
    /// The server is cancelling the goal before execution.
    Recalling,
    /// The server is cancelling the goal during execution.
    Preempting,
    /// The conversation is over. Terminal.
    Done,
}

impl CommState {
    /// Returns `true` for the terminal state.
    #[must_use]
    pub fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for CommState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::WaitingForGoalAck => "waiting_for_goal_ack",
            Self::Pending => "pending",
            Self::Active => "active",
            Self::WaitingForResult => "waiting_for_result",
            Self::WaitingForCancelAck => "waiting_for_cancel_ack",
            Self::Recalling => "recalling",
            Self::Preempting => "preempting",
            Self::Done => "done",
        };
        write!(f, "{name}")
    }
}

/// How a finished goal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalOutcome {
    /// Cancelled before execution started.
    Recalled,
    /// Refused by the server.
    Rejected,
    /// Cancelled during execution.
    Preempted,
    /// Achieved.
    Succeeded,
    /// Failed during execution.
    Aborted,
    /// The client lost track of the goal.
    Lost,
}

impl fmt::Display for TerminalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Recalled => "recalled",
            Self::Rejected => "rejected",
            Self::Preempted => "preempted",
            Self::Succeeded => "succeeded",
            Self::Aborted => "aborted",
            Self::Lost => "lost",
        };
        write!(f, "{name}")
    }
}

/// Terminal outcome of a goal, with the server's optional annotation.
///
/// Only meaningful once the goal's comm state is
/// [`CommState::Done`]; queried earlier, the tracking layer answers
/// [`TerminalState::lost`] and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalState {
    /// How the goal ended.
    pub outcome: TerminalOutcome,
    /// Human-readable annotation from the server, if any.
    pub text: Option<String>,
}

impl TerminalState {
    /// Creates a terminal state without annotation.
    #[must_use]
    pub fn new(outcome: TerminalOutcome) -> Self {
        Self {
            outcome,
            text: None,
        }
    }

    /// Attaches the server's annotation.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// The fallback outcome for inconsistent or premature queries.
    #[must_use]
    pub fn lost() -> Self {
        Self::new(TerminalOutcome::Lost)
    }

    /// Derives the terminal outcome from the last observed status.
    ///
    /// A non-terminal or out-of-range status means the caller asked
    /// too early or the tracking state is inconsistent: the answer is
    /// [`TerminalOutcome::Lost`] and an error is logged.
    #[must_use]
    pub fn from_status(status: &GoalStatus) -> Self {
        let text = if status.text.is_empty() {
            None
        } else {
            Some(status.text.clone())
        };

        let outcome = match status.status_code() {
            Some(StatusCode::Preempted) => TerminalOutcome::Preempted,
            Some(StatusCode::Succeeded) => TerminalOutcome::Succeeded,
            Some(StatusCode::Aborted) => TerminalOutcome::Aborted,
            Some(StatusCode::Rejected) => TerminalOutcome::Rejected,
            Some(StatusCode::Recalled) => TerminalOutcome::Recalled,
            Some(StatusCode::Lost) => TerminalOutcome::Lost,
            Some(other) => {
                error!(
                    goal_id = %status.goal_id,
                    status = %other,
                    "terminal state queried while latest status is non-terminal"
                );
                TerminalOutcome::Lost
            }
            None => {
                error!(
                    goal_id = %status.goal_id,
                    status = status.status,
                    "terminal state queried with unknown status code"
                );
                TerminalOutcome::Lost
            }
        };

        Self { outcome, text }
    }
}
