use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::Logic;
use crate::pipeline::{Context, TapError};
use crate::predicates::{contains, is_truthy};

/// Action type(s) a point listens for
///
/// Example:
/// ```json
/// { "triggerAction": "increment" }
/// { "triggerAction": ["increment", "decrement"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerAction {
    /// Matches one action type by equality
    Single(String),
    /// Matches any member of the sequence
    Sequence(Vec<String>),
}

impl TriggerAction {
    /// Build from a raw `triggerAction` value
    ///
    /// Non-string sequence elements are dropped. Any other non-string value,
    /// or a missing one, becomes an empty sequence that never matches.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(action_type)) => TriggerAction::Single(action_type.clone()),
            Some(Value::Array(items)) => TriggerAction::Sequence(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
            ),
            _ => TriggerAction::Sequence(Vec::new()),
        }
    }

    /// Check whether `action_type` triggers this point
    pub fn matches(&self, action_type: &str) -> bool {
        match self {
            TriggerAction::Single(expected) => expected == action_type,
            TriggerAction::Sequence(expected) => contains(expected.as_slice(), action_type),
        }
    }

    /// All referenced action types, in declaration order
    pub fn action_types(&self) -> &[String] {
        match self {
            TriggerAction::Single(action_type) => std::slice::from_ref(action_type),
            TriggerAction::Sequence(action_types) => action_types,
        }
    }
}

impl From<&str> for TriggerAction {
    fn from(action_type: &str) -> Self {
        TriggerAction::Single(action_type.to_string())
    }
}

impl From<String> for TriggerAction {
    fn from(action_type: String) -> Self {
        TriggerAction::Single(action_type)
    }
}

impl From<Vec<String>> for TriggerAction {
    fn from(action_types: Vec<String>) -> Self {
        TriggerAction::Sequence(action_types)
    }
}

impl<const N: usize> From<[&str; N]> for TriggerAction {
    fn from(action_types: [&str; N]) -> Self {
        TriggerAction::Sequence(action_types.iter().map(|t| t.to_string()).collect())
    }
}

/// Outcome of evaluating a matched point
///
/// A `should_fire` of `Some(false)` keeps the point away from the callbacks;
/// leaving it unset fires the point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Firing {
    /// Payload handed to the per-point hooks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_fire: Option<bool>,
}

impl Firing {
    /// Fire with no payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire with a payload
    pub fn with_data(data: Value) -> Self {
        Self {
            data: Some(data),
            should_fire: None,
        }
    }

    /// Set `should_fire` explicitly
    pub fn should_fire(mut self, should_fire: bool) -> Self {
        self.should_fire = Some(should_fire);
        self
    }

    /// True when `should_fire` is present and false
    pub fn is_vetoed(&self) -> bool {
        self.should_fire == Some(false)
    }
}

/// A rule pairing a trigger with optional firing logic
pub struct Point<S> {
    /// Action type(s) this point listens for
    pub trigger_action: TriggerAction,

    /// Payload used when the point has no logic
    pub data: Option<Value>,

    /// Firing switch used when the point has no logic
    pub should_fire: Option<bool>,

    logic: Option<Logic<S>>,
}

impl<S> fmt::Debug for Point<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Point")
            .field("trigger_action", &self.trigger_action)
            .field("data", &self.data)
            .field("should_fire", &self.should_fire)
            .field("logic", &self.logic.as_ref().map(|_| "<function>"))
            .finish()
    }
}

impl<S> Point<S> {
    /// Create a point with no logic
    pub fn new(trigger_action: impl Into<TriggerAction>) -> Self {
        Self {
            trigger_action: trigger_action.into(),
            data: None,
            should_fire: None,
            logic: None,
        }
    }

    /// Build a point from one raw `points` entry
    ///
    /// Non-object entries produce a point that never matches.
    pub fn from_value(value: &Value) -> Self {
        let Some(raw) = value.as_object() else {
            return Self::new(TriggerAction::Sequence(Vec::new()));
        };

        Self {
            trigger_action: TriggerAction::from_value(raw.get("triggerAction")),
            data: raw.get("data").cloned(),
            should_fire: raw.get("shouldFire").map(is_truthy),
            logic: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_should_fire(mut self, should_fire: bool) -> Self {
        self.should_fire = Some(should_fire);
        self
    }

    /// Attach custom firing logic
    ///
    /// The logic's result replaces the point's own `data` and `should_fire`.
    pub fn with_logic<F>(mut self, logic: F) -> Self
    where
        F: Fn(&Context<'_, S>) -> Result<Option<Firing>, TapError> + 'static,
    {
        self.logic = Some(Box::new(logic));
        self
    }

    pub fn has_logic(&self) -> bool {
        self.logic.is_some()
    }

    /// Evaluate the point for a dispatch it matched
    ///
    /// Without logic the point passes itself through unchanged.
    pub fn fire(&self, context: &Context<'_, S>) -> Result<Option<Firing>, TapError> {
        match &self.logic {
            Some(logic) => logic(context),
            None => Ok(Some(Firing {
                data: self.data.clone(),
                should_fire: self.should_fire,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_matches() {
        let trigger = TriggerAction::from("INCREMENT");

        assert!(trigger.matches("INCREMENT"));
        assert!(!trigger.matches("TRIGGER_ACTION"));
    }

    #[test]
    fn test_sequence_matches() {
        let trigger = TriggerAction::from(["TRIGGER_ACTION_1", "INCREMENT", "TRIGGER_ACTION_2"]);
        assert!(trigger.matches("INCREMENT"));

        let trigger = TriggerAction::from(["TRIGGER_ACTION_1", "TRIGGER_ACTION_2"]);
        assert!(!trigger.matches("INCREMENT"));
    }

    #[test]
    fn test_trigger_from_value_drops_non_strings() {
        let trigger = TriggerAction::from_value(Some(&json!([null, "RESET", 3, "INCREMENT"])));

        assert_eq!(
            trigger,
            TriggerAction::Sequence(vec!["RESET".to_string(), "INCREMENT".to_string()])
        );
    }

    #[test]
    fn test_trigger_from_invalid_value_never_matches() {
        for raw in [json!(false), json!(123), json!({"type": "INCREMENT"})] {
            let trigger = TriggerAction::from_value(Some(&raw));
            assert!(trigger.action_types().is_empty());
            assert!(!trigger.matches("INCREMENT"));
        }

        assert!(TriggerAction::from_value(None).action_types().is_empty());
    }

    #[test]
    fn test_point_from_value() {
        let point: Point<()> = Point::from_value(&json!({
            "triggerAction": "INCREMENT",
            "data": {"source": "config"},
            "shouldFire": 0
        }));

        assert_eq!(point.trigger_action, TriggerAction::from("INCREMENT"));
        assert_eq!(point.data, Some(json!({"source": "config"})));
        assert_eq!(point.should_fire, Some(false));
        assert!(!point.has_logic());
    }

    #[test]
    fn test_point_from_non_object() {
        let point: Point<()> = Point::from_value(&json!("INCREMENT"));
        assert!(!point.trigger_action.matches("INCREMENT"));
    }

    #[test]
    fn test_firing_veto() {
        assert!(!Firing::new().is_vetoed());
        assert!(!Firing::with_data(json!(1)).should_fire(true).is_vetoed());
        assert!(Firing::new().should_fire(false).is_vetoed());
    }

    #[test]
    fn test_firing_serialization() {
        let firing: Firing = serde_json::from_value(json!({"data": {"x": 1}, "shouldFire": true})).unwrap();

        assert_eq!(firing, Firing::with_data(json!({"x": 1})).should_fire(true));
        assert_eq!(serde_json::to_value(Firing::new()).unwrap(), json!({}));
    }
}
