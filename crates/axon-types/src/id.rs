//! Goal identity and wire timestamps.
//!
//! Every message in the action protocol that refers to a goal does so
//! through a [`GoalId`]. The embedded [`Stamp`] records when the goal
//! was created; correlation between messages is by id string only.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Wire timestamp: seconds and nanoseconds since the Unix epoch.
///
/// [`Stamp::ZERO`] is distinguished and means "unset". A cancel
/// message always carries a zero stamp, and a submitted goal whose id
/// stamp is zero gets re-stamped with the current time.
///
/// # Example
///
/// ```
/// use axon_types::Stamp;
///
/// assert!(Stamp::ZERO.is_zero());
///
/// let now = Stamp::now();
/// assert!(!now.is_zero());
/// assert!(now > Stamp::ZERO);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Stamp {
    /// Whole seconds since the Unix epoch.
    pub secs: i64,
    /// Nanoseconds within the second.
    pub nanos: u32,
}

impl Stamp {
    /// The unset timestamp.
    pub const ZERO: Stamp = Stamp { secs: 0, nanos: 0 };

    /// Creates a stamp from raw seconds and nanoseconds.
    #[must_use]
    pub fn new(secs: i64, nanos: u32) -> Self {
        Self { secs, nanos }
    }

    /// Returns the current wall-clock time as a stamp.
    #[must_use]
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            secs: now.timestamp(),
            nanos: now.timestamp_subsec_nanos(),
        }
    }

    /// Returns `true` if this is the unset timestamp.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.secs, self.nanos)
    }
}

/// Identifier for one submitted goal.
///
/// A `GoalId` bundles the id string used for message correlation with
/// the wall-clock stamp of goal creation.
///
/// # Equality Semantics
///
/// `PartialEq`, `Eq` and `Hash` consider the id string **only**. The
/// stamp is carried for diagnostics and server-side bookkeeping but
/// never distinguishes two goals.
///
/// # Cancel-All
///
/// On the cancel topic, a `GoalId` with an empty id string means
/// "cancel every goal". [`GoalId::empty`] constructs that form; on a
/// goal envelope the same form means "no id assigned yet" and the
/// manager will assign a fresh one at submit time.
///
/// # Example
///
/// ```
/// use axon_types::{GoalId, Stamp};
///
/// let a = GoalId::new("node-1-42.0", Stamp::new(42, 0));
/// let b = GoalId::new("node-1-42.0", Stamp::ZERO);
/// assert_eq!(a, b);
///
/// assert!(GoalId::empty().is_unset());
/// assert!(!a.is_unset());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalId {
    /// Correlation id, unique per goal within the client process.
    pub id: String,
    /// When the goal was created. Zero means unset.
    pub stamp: Stamp,
}

impl GoalId {
    /// Creates a goal id from an id string and a stamp.
    #[must_use]
    pub fn new(id: impl Into<String>, stamp: Stamp) -> Self {
        Self {
            id: id.into(),
            stamp,
        }
    }

    /// The unassigned id: empty string, zero stamp.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            id: String::new(),
            stamp: Stamp::ZERO,
        }
    }

    /// Returns `true` if no id string has been assigned.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.id.is_empty()
    }
}

impl PartialEq for GoalId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GoalId {}

impl Hash for GoalId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "goal:{}", self.id)
    }
}
