//! Client-side goal tracking for AXON.
//!
//! This crate is the runtime half of the AXON (Action eXchange Over
//! Notifications) client: it keeps one communication state machine per
//! submitted goal, interprets the action server's status, feedback and
//! result streams against it, and exposes each goal to the user
//! through a [`GoalHandle`].
//!
//! # Architecture
//!
//! ```text
//!  submitter ──► GoalManager ───────────────► ActionTransport ──► fabric
//!                   │   creates                  (goal / cancel topics)
//!                   ▼
//!            GoalHandle ⇄ CommStateMachine
//!                   ▲              │ on_transition / on_feedback
//!  fabric ──► on_status /          ▼
//!             on_feedback /   GoalEventHandler (user callbacks)
//!             on_result
//! ```
//!
//! Incoming messages are fanned out to every tracked goal; each goal's
//! machine decides by id whether a message concerns it. Outgoing
//! messages (the goal itself, cancel requests) go through the
//! [`ActionTransport`] seam, implemented by the surrounding system
//! over its messaging fabric.
//!
//! # Threading Model
//!
//! Messages may arrive on any number of transport threads. Each state
//! machine serializes its own updates behind one mutex and invokes the
//! registered [`GoalEventHandler`] while holding it, so per-goal
//! callbacks are strictly ordered and observe the state they are told
//! about. See [`GoalEventHandler`] for the re-entrance rules this
//! implies. Nothing in this crate blocks on I/O.
//!
//! # Example
//!
//! ```
//! use axon_client::testing::{test_spec, RecordingTransport};
//! use axon_client::{CommState, GoalManager};
//! use axon_client::testing::status_array;
//! use axon_types::{GoalId, Stamp, StatusCode};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let transport = Arc::new(RecordingTransport::default());
//! let manager = GoalManager::new(test_spec(), transport, "probe_client");
//!
//! let envelope = manager
//!     .spec()
//!     .new_action_goal(json!({"target": "dock"}), Stamp::now(), GoalId::empty())
//!     .unwrap();
//! let handle = manager.submit(envelope, None).unwrap();
//! assert_eq!(handle.comm_state(), CommState::WaitingForGoalAck);
//!
//! let goal_id = handle.goal_id().to_string();
//! manager.on_status(&status_array(&[(goal_id.as_str(), StatusCode::Active)]));
//! assert_eq!(handle.comm_state(), CommState::Active);
//! ```

pub mod dispatch;
pub mod testing;

mod csm;
mod error;
mod handle;
mod handler;
mod id_gen;
mod manager;
mod state;
mod transport;

pub use csm::{transitions, CommStateMachine, Step};
pub use error::ClientError;
pub use handle::GoalHandle;
pub use handler::GoalEventHandler;
pub use id_gen::GoalIdGenerator;
pub use manager::GoalManager;
pub use state::{CommState, TerminalOutcome, TerminalState};
pub use transport::{ActionTransport, TransportError};
