/// Strict validation of raw configuration
///
/// Normalization accepts anything. This module is the opt-in check for
/// tooling that wants to report configuration mistakes instead of
/// silently ignoring them.

use serde_json::{Value, json};

use crate::pipeline::TapError;

/// JSON Schema describing the declarative part of a configuration
///
/// Hook keys are rejected because raw data cannot carry functions.
pub fn config_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "beforeAnyAction": false,
            "beforeCallback": false,
            "callback": false,
            "afterCallback": false,
            "afterAnyAction": false,
            "points": {
                "type": "array",
                "items": {"$ref": "#/$defs/point"}
            },
            "vars": {}
        },
        "$defs": {
            "point": {
                "type": "object",
                "required": ["triggerAction"],
                "properties": {
                    "triggerAction": {
                        "oneOf": [
                            {"type": "string"},
                            {"type": "array", "items": {"type": "string"}}
                        ]
                    },
                    "shouldFire": {"type": "boolean"},
                    "data": {}
                }
            }
        }
    })
}

/// Validate a raw configuration against `config_schema`
pub fn validate(raw: &Value) -> Result<(), TapError> {
    let validator = jsonschema::validator_for(&config_schema())
        .map_err(|e| TapError::custom(format!("Failed to compile schema: {}", e)))?;

    if validator.is_valid(raw) {
        return Ok(());
    }

    let errors: Vec<String> = validator.iter_errors(raw).map(|e| e.to_string()).collect();
    Err(TapError::validation("Invalid configuration", errors))
}
