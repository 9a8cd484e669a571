//! Message factories.
//!
//! A [`MessageFactory`] is the collaborator that knows how to produce
//! an empty instance ("prototype") of a named wire type. In a full
//! deployment the transport layer supplies one backed by its type
//! registry; tests and simple deployments use the in-memory
//! [`StaticMessageFactory`].

use crate::error::SpecError;
use serde_json::{json, Value};
use std::collections::HashMap;

/// Produces empty prototypes of named wire types.
///
/// [`ActionSpec`](crate::ActionSpec) construction calls
/// [`materialize`](Self::materialize) once per wire type to prove the
/// surrounding system can actually build the messages the action
/// needs; the returned prototypes seed the envelope constructors.
pub trait MessageFactory: Send + Sync {
    /// Returns an empty prototype of `message_type`.
    ///
    /// # Errors
    ///
    /// [`SpecError::UnknownMessageType`] when the factory has no
    /// definition for `message_type`.
    fn materialize(&self, message_type: &str) -> Result<Value, SpecError>;
}

/// In-memory factory: a registry of type name → prototype.
///
/// # Example
///
/// ```
/// use axon_msgs::{MessageFactory, StaticMessageFactory};
/// use serde_json::json;
///
/// let factory = StaticMessageFactory::new()
///     .with_type("ProbeGoal", json!({"target": null}));
///
/// assert!(factory.materialize("ProbeGoal").is_ok());
/// assert!(factory.materialize("ProbeResult").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticMessageFactory {
    types: HashMap<String, Value>,
}

impl StaticMessageFactory {
    /// Creates an empty factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a prototype under a type name.
    #[must_use]
    pub fn with_type(mut self, name: impl Into<String>, prototype: Value) -> Self {
        self.types.insert(name.into(), prototype);
        self
    }

    /// Registers a prototype under a type name, in place.
    pub fn register(&mut self, name: impl Into<String>, prototype: Value) {
        self.types.insert(name.into(), prototype);
    }

    /// Builds a factory pre-loaded with the seven conventional types
    /// for one action (`<base>Action`, `<base>ActionGoal`, ... -
    /// see [`ActionTypeNames::for_action`](crate::ActionTypeNames::for_action)).
    ///
    /// Payload prototypes are `null`; envelope prototypes carry the
    /// normative field layout.
    #[must_use]
    pub fn with_action(base: &str) -> Self {
        let zero_stamp = json!({"secs": 0, "nanos": 0});
        let header = json!({"stamp": zero_stamp});
        let goal_id = json!({"id": "", "stamp": zero_stamp});
        let status = json!({"goal_id": goal_id, "status": 0, "text": ""});

        Self::new()
            .with_type(format!("{base}Action"), json!({}))
            .with_type(
                format!("{base}ActionGoal"),
                json!({"header": header, "goal_id": goal_id, "goal": null}),
            )
            .with_type(
                format!("{base}ActionFeedback"),
                json!({"header": header, "status": status, "feedback": null}),
            )
            .with_type(
                format!("{base}ActionResult"),
                json!({"header": header, "status": status, "result": null}),
            )
            .with_type(format!("{base}Goal"), Value::Null)
            .with_type(format!("{base}Feedback"), Value::Null)
            .with_type(format!("{base}Result"), Value::Null)
    }

    /// Returns how many types are registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl MessageFactory for StaticMessageFactory {
    fn materialize(&self, message_type: &str) -> Result<Value, SpecError> {
        self.types
            .get(message_type)
            .cloned()
            .ok_or_else(|| SpecError::UnknownMessageType(message_type.to_string()))
    }
}
