//! Server-side goal status codes.
//!
//! The action server advertises each tracked goal's progress as a
//! numeric code on the status topic. [`StatusCode`] enumerates the ten
//! protocol values; the raw `u8` stays visible at the message layer so
//! that unknown codes from a misbehaving server can be logged instead
//! of failing deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server status for one goal, as carried on the wire.
///
/// # Wire Codes
///
/// | Code | Status | Terminal |
/// |------|------------|----------|
/// | 0 | `Pending` | no |
/// | 1 | `Active` | no |
/// | 2 | `Preempted` | yes |
/// | 3 | `Succeeded` | yes |
/// | 4 | `Aborted` | yes |
/// | 5 | `Rejected` | yes |
/// | 6 | `Preempting` | no |
/// | 7 | `Recalling` | no |
/// | 8 | `Recalled` | yes |
/// | 9 | `Lost` | yes |
///
/// `Lost` is special: a server never advertises it. The client
/// synthesizes it locally when a tracked goal disappears from the
/// status stream.
///
/// # Example
///
/// ```
/// use axon_types::StatusCode;
///
/// assert_eq!(StatusCode::from_wire(3), Some(StatusCode::Succeeded));
/// assert_eq!(StatusCode::from_wire(42), None);
/// assert_eq!(StatusCode::Recalled.as_wire(), 8);
/// assert!(StatusCode::Aborted.is_terminal());
/// assert!(!StatusCode::Recalling.is_terminal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCode {
    /// Goal accepted by the server but not yet processed.
    Pending,
    /// Goal is being processed.
    Active,
    /// Goal was cancelled after it started executing; terminal.
    Preempted,
    /// Goal was achieved; terminal.
    Succeeded,
    /// Goal failed during execution; terminal.
    Aborted,
    /// Goal was refused without being processed; terminal.
    Rejected,
    /// A cancel request reached a goal in execution.
    Preempting,
    /// A cancel request reached a goal before execution.
    Recalling,
    /// Goal was cancelled before it started executing; terminal.
    Recalled,
    /// The client lost track of the goal; terminal, client-local.
    Lost,
}

impl StatusCode {
    /// All codes in wire order.
    pub const ALL: [StatusCode; 10] = [
        StatusCode::Pending,
        StatusCode::Active,
        StatusCode::Preempted,
        StatusCode::Succeeded,
        StatusCode::Aborted,
        StatusCode::Rejected,
        StatusCode::Preempting,
        StatusCode::Recalling,
        StatusCode::Recalled,
        StatusCode::Lost,
    ];

    /// Decodes a wire code. Returns `None` for codes outside `0..=9`.
    #[must_use]
    pub fn from_wire(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Pending),
            1 => Some(Self::Active),
            2 => Some(Self::Preempted),
            3 => Some(Self::Succeeded),
            4 => Some(Self::Aborted),
            5 => Some(Self::Rejected),
            6 => Some(Self::Preempting),
            7 => Some(Self::Recalling),
            8 => Some(Self::Recalled),
            9 => Some(Self::Lost),
            _ => None,
        }
    }

    /// Encodes this status as its wire code.
    #[must_use]
    pub fn as_wire(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Active => 1,
            Self::Preempted => 2,
            Self::Succeeded => 3,
            Self::Aborted => 4,
            Self::Rejected => 5,
            Self::Preempting => 6,
            Self::Recalling => 7,
            Self::Recalled => 8,
            Self::Lost => 9,
        }
    }

    /// Returns `true` if this status ends the goal's lifecycle.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Preempted
                | Self::Succeeded
                | Self::Aborted
                | Self::Rejected
                | Self::Recalled
                | Self::Lost
        )
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Preempted => "preempted",
            Self::Succeeded => "succeeded",
            Self::Aborted => "aborted",
            Self::Rejected => "rejected",
            Self::Preempting => "preempting",
            Self::Recalling => "recalling",
            Self::Recalled => "recalled",
            Self::Lost => "lost",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_round_trip() {
        for code in StatusCode::ALL {
            assert_eq!(StatusCode::from_wire(code.as_wire()), Some(code));
        }
    }

    #[test]
    fn wire_order_is_stable() {
        assert_eq!(StatusCode::Pending.as_wire(), 0);
        assert_eq!(StatusCode::Active.as_wire(), 1);
        assert_eq!(StatusCode::Preempted.as_wire(), 2);
        assert_eq!(StatusCode::Succeeded.as_wire(), 3);
        assert_eq!(StatusCode::Aborted.as_wire(), 4);
        assert_eq!(StatusCode::Rejected.as_wire(), 5);
        assert_eq!(StatusCode::Preempting.as_wire(), 6);
        assert_eq!(StatusCode::Recalling.as_wire(), 7);
        assert_eq!(StatusCode::Recalled.as_wire(), 8);
        assert_eq!(StatusCode::Lost.as_wire(), 9);
    }

    #[test]
    fn out_of_range_codes_rejected() {
        assert_eq!(StatusCode::from_wire(10), None);
        assert_eq!(StatusCode::from_wire(255), None);
    }

    #[test]
    fn terminal_statuses() {
        let terminal: Vec<_> = StatusCode::ALL
            .iter()
            .filter(|c| c.is_terminal())
            .collect();
        assert_eq!(
            terminal,
            vec![
                &StatusCode::Preempted,
                &StatusCode::Succeeded,
                &StatusCode::Aborted,
                &StatusCode::Rejected,
                &StatusCode::Recalled,
                &StatusCode::Lost,
            ]
        );
    }

    #[test]
    fn display_names() {
        assert_eq!(StatusCode::Pending.to_string(), "pending");
        assert_eq!(StatusCode::Preempting.to_string(), "preempting");
        assert_eq!(StatusCode::Lost.to_string(), "lost");
    }
}
