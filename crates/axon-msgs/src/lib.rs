//! Wire messages for AXON.
//!
//! This crate defines the messages exchanged between an action client
//! and an action server, and the [`ActionSpec`] schema object that
//! makes the client core agnostic to the shape of any particular
//! action.
//!
//! # Message Model
//!
//! The protocol fixes the shape of its bookkeeping messages, so those
//! are concrete structs:
//!
//! - [`Header`] - a wire timestamp
//! - [`GoalStatus`] / [`GoalStatusArray`] - the server's periodic
//!   advertisement of every goal it tracks
//! - a cancel message is a bare [`GoalId`](axon_types::GoalId) with a
//!   zero stamp (empty id = cancel all)
//!
//! The three *action envelopes* wrap user-defined payloads, so they
//! stay schemaless [`serde_json::Value`] objects with normative field
//! names:
//!
//! ```text
//! action-goal     { "header": .., "goal_id": ..,  "goal": <user> }
//! action-feedback { "header": .., "status": ..,   "feedback": <user> }
//! action-result   { "header": .., "status": ..,   "result": <user> }
//! ```
//!
//! # The Injected Schema
//!
//! Rather than threading seven type parameters through every component
//! of the client, all knowledge about a concrete action lives in one
//! [`ActionSpec`]: the seven wire-type names plus pure functions to
//! pack and unpack the envelopes. Constructing a spec validates - via
//! the injected [`MessageFactory`] - that every named type can be
//! materialized; a broken wiring surfaces immediately instead of at
//! first use.
//!
//! # Example
//!
//! ```
//! use axon_msgs::{ActionSpec, ActionTypeNames, StaticMessageFactory};
//! use axon_types::{GoalId, Stamp};
//! use serde_json::json;
//!
//! let factory = StaticMessageFactory::with_action("Probe");
//! let spec = ActionSpec::new(ActionTypeNames::for_action("Probe"), &factory).unwrap();
//!
//! let goal_id = GoalId::new("probe-0-1.0", Stamp::new(1, 0));
//! let env = spec
//!     .new_action_goal(json!({"target": "dock"}), Stamp::new(1, 0), goal_id.clone())
//!     .unwrap();
//!
//! assert_eq!(spec.goal_of(&env).unwrap(), json!({"target": "dock"}));
//! assert_eq!(spec.goal_id_of(&env).unwrap(), goal_id);
//! ```

mod error;
mod factory;
mod spec;
mod status;

pub use error::SpecError;
pub use factory::{MessageFactory, StaticMessageFactory};
pub use spec::{ActionSpec, ActionTypeNames};
pub use status::{GoalStatus, GoalStatusArray, Header};
