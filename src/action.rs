use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A dispatched action
///
/// Carries a required `type` discriminator plus arbitrary payload fields.
///
/// Example:
/// ```json
/// { "type": "increment", "by": 2 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Action type used for trigger matching
    #[serde(rename = "type")]
    pub action_type: String,

    /// Remaining fields
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Action {
    /// Create an action with no payload
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: Map::new(),
        }
    }

    /// Add a payload field
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.payload.insert(name.into(), value);
        self
    }

    /// Get a payload field
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.payload.get(name)
    }
}
