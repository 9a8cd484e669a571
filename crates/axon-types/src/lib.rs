//! Core types for AXON.
//!
//! This crate provides the foundational vocabulary for the AXON
//! (Action eXchange Over Notifications) client runtime: goal
//! identifiers, wire timestamps, server status codes, and the unified
//! [`ErrorCode`] interface.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Protocol Layer                            │
//! │  (stable vocabulary, safe for transports to depend on)      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  axon-types     : GoalId, Stamp, StatusCode  ◄── HERE       │
//! │  axon-msgs      : envelopes, GoalStatusArray, ActionSpec    │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Client Layer                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  axon-client    : state machine, goal handles, manager      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Identifier Design
//!
//! A goal is identified by a [`GoalId`]: a string id plus a wall-clock
//! [`Stamp`]. Two `GoalId`s are equal when their id strings are equal;
//! the stamp never participates in equality. This matches the wire
//! protocol, where status, feedback and result messages are correlated
//! to a submitted goal by id string alone.
//!
//! An *empty* id has a second meaning on the cancel topic: it asks the
//! action server to cancel every goal it is tracking.
//!
//! # Example
//!
//! ```
//! use axon_types::{GoalId, Stamp, StatusCode};
//!
//! let id = GoalId::new("probe-0-17.500", Stamp::now());
//!
//! // Equality ignores the stamp.
//! let same = GoalId::new("probe-0-17.500", Stamp::ZERO);
//! assert_eq!(id, same);
//!
//! // Wire status codes are numeric.
//! let code = StatusCode::from_wire(3).unwrap();
//! assert_eq!(code, StatusCode::Succeeded);
//! assert!(code.is_terminal());
//! ```

mod error;
mod id;
mod status;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{GoalId, Stamp};
pub use status::StatusCode;
