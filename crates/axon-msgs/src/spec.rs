//! The action specification: an injected schema for one action.
//!
//! All knowledge about a concrete action - its wire-type names and how
//! to pack/unpack its envelopes - lives in one [`ActionSpec`] value.
//! The client core receives a spec at construction and stays fully
//! generic over message shapes without carrying type parameters.

use crate::error::SpecError;
use crate::factory::MessageFactory;
use crate::status::{GoalStatus, Header};
use axon_types::{GoalId, Stamp};
use serde_json::Value;

const FIELD_HEADER: &str = "header";
const FIELD_GOAL_ID: &str = "goal_id";
const FIELD_STATUS: &str = "status";
const FIELD_GOAL: &str = "goal";
const FIELD_FEEDBACK: &str = "feedback";
const FIELD_RESULT: &str = "result";

const MSG_ACTION_GOAL: &str = "action goal";
const MSG_ACTION_FEEDBACK: &str = "action feedback";
const MSG_ACTION_RESULT: &str = "action result";

/// The seven wire-type names that describe one action.
///
/// # Example
///
/// ```
/// use axon_msgs::ActionTypeNames;
///
/// let names = ActionTypeNames::for_action("Probe");
/// assert_eq!(names.action, "ProbeAction");
/// assert_eq!(names.action_goal, "ProbeActionGoal");
/// assert_eq!(names.result, "ProbeResult");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTypeNames {
    /// The umbrella action type.
    pub action: String,
    /// Goal envelope type.
    pub action_goal: String,
    /// Feedback envelope type.
    pub action_feedback: String,
    /// Result envelope type.
    pub action_result: String,
    /// User goal payload type.
    pub goal: String,
    /// User feedback payload type.
    pub feedback: String,
    /// User result payload type.
    pub result: String,
}

impl ActionTypeNames {
    /// Derives the conventional seven names from an action base name.
    #[must_use]
    pub fn for_action(base: &str) -> Self {
        Self {
            action: format!("{base}Action"),
            action_goal: format!("{base}ActionGoal"),
            action_feedback: format!("{base}ActionFeedback"),
            action_result: format!("{base}ActionResult"),
            goal: format!("{base}Goal"),
            feedback: format!("{base}Feedback"),
            result: format!("{base}Result"),
        }
    }
}

/// Schema object for one action.
///
/// Bundles the wire-type names with pure functions to build and pick
/// apart the three envelope messages. Constructing a spec proves - via
/// the injected [`MessageFactory`] - that the surrounding system can
/// materialize every named type; the error is surfaced, never
/// swallowed.
///
/// # Example
///
/// ```
/// use axon_msgs::{ActionSpec, ActionTypeNames, StaticMessageFactory};
///
/// let factory = StaticMessageFactory::with_action("Probe");
/// let spec = ActionSpec::new(ActionTypeNames::for_action("Probe"), &factory).unwrap();
///
/// assert_eq!(spec.action_name(), "ProbeAction");
/// assert!(spec.is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct ActionSpec {
    names: ActionTypeNames,
    proto_action_goal: Value,
    proto_action_feedback: Value,
    proto_action_result: Value,
}

impl ActionSpec {
    /// Builds a spec, validating every wire type against the factory.
    ///
    /// # Errors
    ///
    /// [`SpecError::UnknownMessageType`] if the factory cannot
    /// materialize any of the seven types.
    pub fn new(names: ActionTypeNames, factory: &dyn MessageFactory) -> Result<Self, SpecError> {
        // Payload types are validated but not retained; only the
        // envelope prototypes seed the constructors.
        factory.materialize(&names.action)?;
        factory.materialize(&names.goal)?;
        factory.materialize(&names.feedback)?;
        factory.materialize(&names.result)?;

        let proto_action_goal = factory.materialize(&names.action_goal)?;
        let proto_action_feedback = factory.materialize(&names.action_feedback)?;
        let proto_action_result = factory.materialize(&names.action_result)?;

        Ok(Self {
            names,
            proto_action_goal,
            proto_action_feedback,
            proto_action_result,
        })
    }

    /// The umbrella action type name.
    #[must_use]
    pub fn action_name(&self) -> &str {
        &self.names.action
    }

    /// All seven wire-type names.
    #[must_use]
    pub fn type_names(&self) -> &ActionTypeNames {
        &self.names
    }

    /// Re-checks that the stored envelope prototypes still carry the
    /// fields the protocol requires.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let has = |proto: &Value, field: &str| proto.get(field).is_some();

        has(&self.proto_action_goal, FIELD_GOAL_ID)
            && has(&self.proto_action_goal, FIELD_GOAL)
            && has(&self.proto_action_feedback, FIELD_STATUS)
            && has(&self.proto_action_feedback, FIELD_FEEDBACK)
            && has(&self.proto_action_result, FIELD_STATUS)
            && has(&self.proto_action_result, FIELD_RESULT)
    }

    /// Extracts the user goal payload from an action-goal envelope.
    pub fn goal_of(&self, action_goal: &Value) -> Result<Value, SpecError> {
        Ok(field(action_goal, MSG_ACTION_GOAL, FIELD_GOAL)?.clone())
    }

    /// Extracts the user feedback payload from an action-feedback
    /// envelope.
    pub fn feedback_of(&self, action_feedback: &Value) -> Result<Value, SpecError> {
        Ok(field(action_feedback, MSG_ACTION_FEEDBACK, FIELD_FEEDBACK)?.clone())
    }

    /// Extracts the user result payload from an action-result envelope.
    pub fn result_of(&self, action_result: &Value) -> Result<Value, SpecError> {
        Ok(field(action_result, MSG_ACTION_RESULT, FIELD_RESULT)?.clone())
    }

    /// Extracts the goal id from an action-goal envelope.
    pub fn goal_id_of(&self, action_goal: &Value) -> Result<GoalId, SpecError> {
        decode(action_goal, MSG_ACTION_GOAL, FIELD_GOAL_ID)
    }

    /// Extracts the goal status from an action-feedback envelope.
    pub fn status_of_feedback(&self, action_feedback: &Value) -> Result<GoalStatus, SpecError> {
        decode(action_feedback, MSG_ACTION_FEEDBACK, FIELD_STATUS)
    }

    /// Extracts the goal status from an action-result envelope.
    pub fn status_of_result(&self, action_result: &Value) -> Result<GoalStatus, SpecError> {
        decode(action_result, MSG_ACTION_RESULT, FIELD_STATUS)
    }

    /// Overwrites the goal id embedded in an action-goal envelope.
    pub fn set_goal_id(
        &self,
        action_goal: &mut Value,
        goal_id: &GoalId,
    ) -> Result<(), SpecError> {
        let obj = action_goal
            .as_object_mut()
            .ok_or(SpecError::MissingField {
                message: MSG_ACTION_GOAL,
                field: FIELD_GOAL_ID,
            })?;
        obj.insert(FIELD_GOAL_ID.to_string(), encode(goal_id, MSG_ACTION_GOAL, FIELD_GOAL_ID)?);
        Ok(())
    }

    /// Builds an action-goal envelope around a user goal payload.
    pub fn new_action_goal(
        &self,
        goal: Value,
        stamp: Stamp,
        goal_id: GoalId,
    ) -> Result<Value, SpecError> {
        let mut env = self.proto_action_goal.clone();
        let obj = as_envelope(&mut env, MSG_ACTION_GOAL)?;
        obj.insert(
            FIELD_HEADER.to_string(),
            encode(&Header::new(stamp), MSG_ACTION_GOAL, FIELD_HEADER)?,
        );
        obj.insert(
            FIELD_GOAL_ID.to_string(),
            encode(&goal_id, MSG_ACTION_GOAL, FIELD_GOAL_ID)?,
        );
        obj.insert(FIELD_GOAL.to_string(), goal);
        Ok(env)
    }

    /// Builds an action-feedback envelope around a user feedback
    /// payload.
    pub fn new_action_feedback(
        &self,
        feedback: Value,
        stamp: Stamp,
        status: GoalStatus,
    ) -> Result<Value, SpecError> {
        let mut env = self.proto_action_feedback.clone();
        let obj = as_envelope(&mut env, MSG_ACTION_FEEDBACK)?;
        obj.insert(
            FIELD_HEADER.to_string(),
            encode(&Header::new(stamp), MSG_ACTION_FEEDBACK, FIELD_HEADER)?,
        );
        obj.insert(
            FIELD_STATUS.to_string(),
            encode(&status, MSG_ACTION_FEEDBACK, FIELD_STATUS)?,
        );
        obj.insert(FIELD_FEEDBACK.to_string(), feedback);
        Ok(env)
    }

    /// Builds an action-result envelope around a user result payload.
    pub fn new_action_result(
        &self,
        result: Value,
        stamp: Stamp,
        status: GoalStatus,
    ) -> Result<Value, SpecError> {
        let mut env = self.proto_action_result.clone();
        let obj = as_envelope(&mut env, MSG_ACTION_RESULT)?;
        obj.insert(
            FIELD_HEADER.to_string(),
            encode(&Header::new(stamp), MSG_ACTION_RESULT, FIELD_HEADER)?,
        );
        obj.insert(
            FIELD_STATUS.to_string(),
            encode(&status, MSG_ACTION_RESULT, FIELD_STATUS)?,
        );
        obj.insert(FIELD_RESULT.to_string(), result);
        Ok(env)
    }
}

fn field<'a>(
    msg: &'a Value,
    message: &'static str,
    name: &'static str,
) -> Result<&'a Value, SpecError> {
    msg.get(name)
        .ok_or(SpecError::MissingField { message, field: name })
}

fn decode<T: serde::de::DeserializeOwned>(
    msg: &Value,
    message: &'static str,
    name: &'static str,
) -> Result<T, SpecError> {
    serde_json::from_value(field(msg, message, name)?.clone()).map_err(|e| {
        SpecError::MalformedField {
            message,
            field: name,
            reason: e.to_string(),
        }
    })
}

fn encode<T: serde::Serialize>(
    value: &T,
    message: &'static str,
    name: &'static str,
) -> Result<Value, SpecError> {
    serde_json::to_value(value).map_err(|e| SpecError::MalformedField {
        message,
        field: name,
        reason: e.to_string(),
    })
}

fn as_envelope<'a>(
    env: &'a mut Value,
    message: &'static str,
) -> Result<&'a mut serde_json::Map<String, Value>, SpecError> {
    env.as_object_mut().ok_or(SpecError::MalformedField {
        message,
        field: FIELD_HEADER,
        reason: "envelope prototype is not an object".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::StaticMessageFactory;
    use axon_types::StatusCode;
    use serde_json::json;

    fn probe_spec() -> ActionSpec {
        let factory = StaticMessageFactory::with_action("Probe");
        ActionSpec::new(ActionTypeNames::for_action("Probe"), &factory)
            .expect("probe spec should build")
    }

    #[test]
    fn construction_validates_all_seven_types() {
        // A factory that knows everything except the result payload.
        let full = StaticMessageFactory::with_action("Probe");
        let mut factory = StaticMessageFactory::new();
        for name in [
            "ProbeAction",
            "ProbeActionGoal",
            "ProbeActionFeedback",
            "ProbeActionResult",
            "ProbeGoal",
            "ProbeFeedback",
        ] {
            factory.register(name, full.materialize(name).expect("prototype"));
        }

        let err = ActionSpec::new(ActionTypeNames::for_action("Probe"), &factory)
            .expect_err("missing ProbeResult should fail");
        assert_eq!(err, SpecError::UnknownMessageType("ProbeResult".into()));
    }

    #[test]
    fn spec_is_valid_after_construction() {
        assert!(probe_spec().is_valid());
        assert_eq!(probe_spec().action_name(), "ProbeAction");
    }

    #[test]
    fn goal_round_trip() {
        let spec = probe_spec();
        let id = GoalId::new("probe-0-5.0", Stamp::new(5, 0));
        let env = spec
            .new_action_goal(json!({"target": [1.0, 2.0]}), Stamp::new(5, 0), id.clone())
            .expect("build envelope");

        assert_eq!(spec.goal_of(&env).expect("goal"), json!({"target": [1.0, 2.0]}));
        assert_eq!(spec.goal_id_of(&env).expect("goal id"), id);
        assert_eq!(spec.goal_id_of(&env).expect("goal id").stamp, Stamp::new(5, 0));
    }

    #[test]
    fn feedback_round_trip() {
        let spec = probe_spec();
        let status = GoalStatus::new(GoalId::new("g1", Stamp::ZERO), StatusCode::Active);
        let env = spec
            .new_action_feedback(json!({"progress": 0.5}), Stamp::new(6, 0), status.clone())
            .expect("build envelope");

        assert_eq!(spec.feedback_of(&env).expect("feedback"), json!({"progress": 0.5}));
        assert_eq!(spec.status_of_feedback(&env).expect("status"), status);
    }

    #[test]
    fn result_round_trip() {
        let spec = probe_spec();
        let status = GoalStatus::new(GoalId::new("g1", Stamp::ZERO), StatusCode::Succeeded);
        let env = spec
            .new_action_result(json!({"samples": 3}), Stamp::new(7, 0), status.clone())
            .expect("build envelope");

        assert_eq!(spec.result_of(&env).expect("result"), json!({"samples": 3}));
        assert_eq!(spec.status_of_result(&env).expect("status"), status);
    }

    #[test]
    fn missing_field_surfaces() {
        let spec = probe_spec();
        let not_an_envelope = json!({"unrelated": true});

        assert_eq!(
            spec.goal_of(&not_an_envelope),
            Err(SpecError::MissingField {
                message: "action goal",
                field: "goal",
            })
        );
        assert!(spec.goal_id_of(&not_an_envelope).is_err());
    }

    #[test]
    fn malformed_field_surfaces() {
        let spec = probe_spec();
        let env = json!({"goal_id": 42, "goal": null});

        assert!(matches!(
            spec.goal_id_of(&env),
            Err(SpecError::MalformedField { field: "goal_id", .. })
        ));
    }

    #[test]
    fn set_goal_id_overwrites() {
        let spec = probe_spec();
        let mut env = spec
            .new_action_goal(json!(null), Stamp::ZERO, GoalId::empty())
            .expect("build envelope");
        assert!(spec.goal_id_of(&env).expect("goal id").is_unset());

        let fresh = GoalId::new("probe-1-9.0", Stamp::new(9, 0));
        spec.set_goal_id(&mut env, &fresh).expect("set goal id");
        assert_eq!(spec.goal_id_of(&env).expect("goal id"), fresh);
    }
}
