//! Schema layer errors.
//!
//! Everything that can go wrong while wiring up or using an
//! [`ActionSpec`](crate::ActionSpec) is a [`SpecError`]. Construction
//! errors are fatal to the client and surface to the caller; accessor
//! errors surface to whoever asked for the field.
//!
//! Codes are prefixed `SPEC_`; none of them are recoverable - a
//! missing type or field will be just as missing on retry.

use axon_types::ErrorCode;
use thiserror::Error;

/// Schema layer error.
///
/// # Example
///
/// ```
/// use axon_msgs::SpecError;
/// use axon_types::ErrorCode;
///
/// let err = SpecError::UnknownMessageType("ProbeActionGoal".into());
/// assert_eq!(err.code(), "SPEC_UNKNOWN_MESSAGE_TYPE");
/// assert!(!err.is_recoverable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// The message factory has no definition for a wire type named in
    /// the action specification.
    #[error("message factory cannot materialize type '{0}'")]
    UnknownMessageType(String),

    /// An envelope lacks a field the protocol requires.
    #[error("missing field '{field}' in {message} message")]
    MissingField {
        /// Which envelope kind was being read.
        message: &'static str,
        /// The absent field.
        field: &'static str,
    },

    /// An envelope field is present but cannot be decoded.
    #[error("malformed field '{field}' in {message} message: {reason}")]
    MalformedField {
        /// Which envelope kind was being read.
        message: &'static str,
        /// The offending field.
        field: &'static str,
        /// Decoder diagnostics.
        reason: String,
    },
}

impl ErrorCode for SpecError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownMessageType(_) => "SPEC_UNKNOWN_MESSAGE_TYPE",
            Self::MissingField { .. } => "SPEC_MISSING_FIELD",
            Self::MalformedField { .. } => "SPEC_MALFORMED_FIELD",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
