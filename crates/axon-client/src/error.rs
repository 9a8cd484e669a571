//! Client layer errors.
//!
//! The goal-tracking core never propagates errors out of its message
//! update path: bad input from the server or misuse of a handle is
//! logged and absorbed, and the state machine keeps operating
//! (`SpecError`s from schema wiring are the exception - those surface
//! at construction and submit time).
//!
//! `ClientError` exists so every such log line carries a stable code.

use crate::state::CommState;
use axon_types::{ErrorCode, StatusCode};
use thiserror::Error;

/// Client layer error.
///
/// These values are constructed for logging and for inspection in
/// tests; the update path never returns them.
///
/// # Example
///
/// ```
/// use axon_client::{ClientError, CommState};
/// use axon_types::{ErrorCode, StatusCode};
///
/// let err = ClientError::ProtocolViolation {
///     from: CommState::Active,
///     status: StatusCode::Pending,
/// };
/// assert_eq!(err.code(), "CLIENT_PROTOCOL_VIOLATION");
/// assert!(!err.is_recoverable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server advertised a status that has no legal transition
    /// from the current comm state. The state is left unchanged.
    #[error("illegal transition: comm state '{from}' got server status '{status}'")]
    ProtocolViolation {
        /// Comm state when the status arrived.
        from: CommState,
        /// The offending server status.
        status: StatusCode,
    },

    /// An operation was called on a handle that no longer supports it;
    /// a safe default is returned instead.
    #[error("goal handle misuse: {0}")]
    Misuse(&'static str),

    /// The server reported a status code outside the protocol range.
    #[error("unknown status code {0} from action server")]
    UnknownStatusCode(u8),

    /// The transport refused an outgoing publish. The message is
    /// dropped; the server will see a resend or nothing.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl ErrorCode for ClientError {
    fn code(&self) -> &'static str {
        match self {
            Self::ProtocolViolation { .. } => "CLIENT_PROTOCOL_VIOLATION",
            Self::Misuse(_) => "CLIENT_MISUSE",
            Self::UnknownStatusCode(_) => "CLIENT_UNKNOWN_STATUS_CODE",
            Self::Transport(_) => "CLIENT_TRANSPORT",
        }
    }

    fn is_recoverable(&self) -> bool {
        // A transport may come back; wrong input stays wrong.
        matches!(self, Self::Transport(_))
    }
}
