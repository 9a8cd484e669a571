//! Protocol bookkeeping messages.
//!
//! The action server publishes a [`GoalStatusArray`] at a fixed rate
//! listing every goal it currently tracks. Clients correlate entries
//! by goal id and feed them to their per-goal state machines.

use axon_types::{GoalId, StatusCode};
use serde::{Deserialize, Serialize};

/// Message header carrying the publish timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// When the enclosing message was published.
    pub stamp: axon_types::Stamp,
}

impl Header {
    /// Creates a header with the given stamp.
    #[must_use]
    pub fn new(stamp: axon_types::Stamp) -> Self {
        Self { stamp }
    }
}

/// The server's view of one goal.
///
/// The `status` field is the raw wire code. A well-behaved server only
/// sends `0..=9`, but the field is kept as `u8` so that an out-of-range
/// code reaches the client, which logs it and ignores the entry instead
/// of failing to deserialize the whole array.
///
/// # Example
///
/// ```
/// use axon_msgs::GoalStatus;
/// use axon_types::{GoalId, Stamp, StatusCode};
///
/// let gs = GoalStatus::new(GoalId::new("g1", Stamp::ZERO), StatusCode::Active);
/// assert_eq!(gs.status_code(), Some(StatusCode::Active));
///
/// let bogus = GoalStatus { status: 42, ..gs.clone() };
/// assert_eq!(bogus.status_code(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalStatus {
    /// Which goal this entry describes.
    pub goal_id: GoalId,
    /// Wire status code; see [`StatusCode`].
    pub status: u8,
    /// Optional human-readable annotation from the server.
    #[serde(default)]
    pub text: String,
}

impl GoalStatus {
    /// Creates a status entry for a goal.
    #[must_use]
    pub fn new(goal_id: GoalId, status: StatusCode) -> Self {
        Self {
            goal_id,
            status: status.as_wire(),
            text: String::new(),
        }
    }

    /// Attaches a human-readable annotation.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Decodes the wire code. `None` for codes outside the protocol.
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        StatusCode::from_wire(self.status)
    }
}

/// Periodic status advertisement for every goal the server tracks.
///
/// An empty `status_list` is meaningful: a client that is tracking a
/// goal which no longer appears in the array concludes the goal is
/// lost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalStatusArray {
    /// Publish timestamp.
    pub header: Header,
    /// One entry per tracked goal.
    pub status_list: Vec<GoalStatus>,
}

impl GoalStatusArray {
    /// Creates a status array from its entries, stamped now.
    #[must_use]
    pub fn new(status_list: Vec<GoalStatus>) -> Self {
        Self {
            header: Header::new(axon_types::Stamp::now()),
            status_list,
        }
    }

    /// Finds the entry for a goal id, if the server tracks it.
    #[must_use]
    pub fn find(&self, goal_id: &str) -> Option<&GoalStatus> {
        self.status_list.iter().find(|gs| gs.goal_id.id == goal_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_types::Stamp;

    fn gid(id: &str) -> GoalId {
        GoalId::new(id, Stamp::ZERO)
    }

    #[test]
    fn status_code_round_trip() {
        let gs = GoalStatus::new(gid("g1"), StatusCode::Preempting);
        assert_eq!(gs.status, 6);
        assert_eq!(gs.status_code(), Some(StatusCode::Preempting));
    }

    #[test]
    fn unknown_wire_code_survives_deserialization() {
        let json = r#"{"goal_id":{"id":"g1","stamp":{"secs":0,"nanos":0}},"status":77}"#;
        let gs: GoalStatus = serde_json::from_str(json).expect("deserialize");
        assert_eq!(gs.status, 77);
        assert_eq!(gs.status_code(), None);
        assert_eq!(gs.text, "");
    }

    #[test]
    fn with_text() {
        let gs = GoalStatus::new(gid("g1"), StatusCode::Rejected).with_text("duplicate goal");
        assert_eq!(gs.text, "duplicate goal");
    }

    #[test]
    fn find_matches_by_id_string() {
        let array = GoalStatusArray::new(vec![
            GoalStatus::new(gid("g1"), StatusCode::Pending),
            GoalStatus::new(gid("g2"), StatusCode::Active),
        ]);

        assert_eq!(
            array.find("g2").and_then(GoalStatus::status_code),
            Some(StatusCode::Active)
        );
        assert!(array.find("g3").is_none());
    }

    #[test]
    fn empty_array_finds_nothing() {
        let array = GoalStatusArray::default();
        assert!(array.find("g1").is_none());
    }

    #[test]
    fn serde_round_trip() {
        let array = GoalStatusArray::new(vec![
            GoalStatus::new(gid("g1"), StatusCode::Succeeded).with_text("done"),
        ]);
        let json = serde_json::to_string(&array).expect("serialize");
        let restored: GoalStatusArray = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, array);
    }
}
