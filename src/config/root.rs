use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

use tracing::debug;

use super::{ActionHook, Hook, Point, PointHook};
use crate::pipeline::{Context, TapError};
use crate::predicates::{is_truthy, type_name};

/// Normalized wiretap configuration
///
/// Every hook slot is either a function or `None` (disabled), `points` is
/// always a list, and `vars` always holds a truthy value.
///
/// Example of the declarative part:
/// ```json
/// {
///   "points": [
///     {"triggerAction": "increment"},
///     {"triggerAction": ["decrement", "reset"], "data": {"source": "counter"}}
///   ],
///   "vars": {"seen": 0}
/// }
/// ```
pub struct Config<S = Value> {
    pub before_any_action: Option<ActionHook<S>>,
    pub before_callback: Option<PointHook<S>>,
    pub callback: Option<PointHook<S>>,
    pub after_callback: Option<PointHook<S>>,
    pub after_any_action: Option<ActionHook<S>>,

    /// Rules evaluated per dispatch, in order
    pub points: Vec<Point<S>>,

    /// Initial value of the variable store
    pub vars: Value,
}

impl<S> Default for Config<S> {
    fn default() -> Self {
        Self {
            before_any_action: None,
            before_callback: None,
            callback: None,
            after_callback: None,
            after_any_action: None,
            points: Vec::new(),
            vars: Value::Object(Map::new()),
        }
    }
}

impl<S> fmt::Debug for Config<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = |enabled: bool| if enabled { "<function>" } else { "<disabled>" };

        f.debug_struct("Config")
            .field("before_any_action", &slot(self.before_any_action.is_some()))
            .field("before_callback", &slot(self.before_callback.is_some()))
            .field("callback", &slot(self.callback.is_some()))
            .field("after_callback", &slot(self.after_callback.is_some()))
            .field("after_any_action", &slot(self.after_any_action.is_some()))
            .field("points", &self.points)
            .field("vars", &self.vars)
            .finish()
    }
}

impl<S> Config<S> {
    /// Create an empty configuration (pure pass-through)
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a raw configuration value
    ///
    /// Never fails: anything malformed degrades to a "do nothing" default.
    /// Hook keys in raw data can never hold functions, so they stay disabled.
    pub fn from_value(raw: &Value) -> Self {
        let Some(raw) = raw.as_object() else {
            debug!(kind = type_name(raw), "configuration is not an object, using defaults");
            return Self::default();
        };

        for hook in Hook::ALL {
            if raw.contains_key(hook.key()) {
                debug!(%hook, "hook is not invocable, disabled");
            }
        }

        let points = match raw.get("points") {
            Some(Value::Array(items)) => items.iter().map(Point::from_value).collect(),
            Some(other) => {
                debug!(kind = type_name(other), "points is not an array, ignored");
                Vec::new()
            }
            None => Vec::new(),
        };

        Self {
            points,
            ..Self::default()
        }
        .with_vars(raw.get("vars").cloned().unwrap_or(Value::Null))
    }

    /// Parse and normalize a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, TapError> {
        let raw: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&raw))
    }

    /// Read, parse and normalize a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TapError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn with_before_any_action<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Context<'_, S>) -> Result<(), TapError> + 'static,
    {
        self.before_any_action = Some(Box::new(hook));
        self
    }

    pub fn with_before_callback<F>(mut self, hook: F) -> Self
    where
        F: Fn(Option<&Value>, &Context<'_, S>) -> Result<(), TapError> + 'static,
    {
        self.before_callback = Some(Box::new(hook));
        self
    }

    pub fn with_callback<F>(mut self, hook: F) -> Self
    where
        F: Fn(Option<&Value>, &Context<'_, S>) -> Result<(), TapError> + 'static,
    {
        self.callback = Some(Box::new(hook));
        self
    }

    pub fn with_after_callback<F>(mut self, hook: F) -> Self
    where
        F: Fn(Option<&Value>, &Context<'_, S>) -> Result<(), TapError> + 'static,
    {
        self.after_callback = Some(Box::new(hook));
        self
    }

    pub fn with_after_any_action<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Context<'_, S>) -> Result<(), TapError> + 'static,
    {
        self.after_any_action = Some(Box::new(hook));
        self
    }

    /// Append a point
    pub fn with_point(mut self, point: Point<S>) -> Self {
        self.points.push(point);
        self
    }

    /// Set the initial vars; falsy values fall back to an empty object
    pub fn with_vars(mut self, vars: Value) -> Self {
        self.vars = if is_truthy(&vars) {
            vars
        } else {
            Value::Object(Map::new())
        };
        self
    }

    /// Get a per-point hook slot
    pub fn point_hook(&self, hook: Hook) -> Option<&PointHook<S>> {
        match hook {
            Hook::BeforeCallback => self.before_callback.as_ref(),
            Hook::Callback => self.callback.as_ref(),
            Hook::AfterCallback => self.after_callback.as_ref(),
            Hook::BeforeAnyAction | Hook::AfterAnyAction => None,
        }
    }

    /// Get a once-per-dispatch hook slot
    pub fn action_hook(&self, hook: Hook) -> Option<&ActionHook<S>> {
        match hook {
            Hook::BeforeAnyAction => self.before_any_action.as_ref(),
            Hook::AfterAnyAction => self.after_any_action.as_ref(),
            _ => None,
        }
    }

    /// Check whether a hook slot is enabled
    pub fn is_enabled(&self, hook: Hook) -> bool {
        if hook.is_per_point() {
            self.point_hook(hook).is_some()
        } else {
            self.action_hook(hook).is_some()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TriggerAction;
    use serde_json::json;

    #[test]
    fn test_default_config() {
        let config: Config = Config::from_value(&json!(null));

        for hook in Hook::ALL {
            assert!(!config.is_enabled(hook));
        }
        assert!(config.points.is_empty());
        assert_eq!(config.vars, json!({}));
    }

    #[test]
    fn test_hooks_in_raw_config_are_disabled() {
        for raw in [json!(true), json!(false), json!(123), json!("test")] {
            let config: Config = Config::from_value(&json!({
                "beforeAnyAction": raw,
                "beforeCallback": raw,
                "callback": raw,
                "afterCallback": raw,
                "afterAnyAction": raw
            }));

            for hook in Hook::ALL {
                assert!(!config.is_enabled(hook), "{} should be disabled", hook);
            }
        }
    }

    #[test]
    fn test_builder_enables_hooks() {
        let config: Config = Config::new()
            .with_before_any_action(|_| Ok(()))
            .with_callback(|_, _| Ok(()));

        assert!(config.is_enabled(Hook::BeforeAnyAction));
        assert!(config.is_enabled(Hook::Callback));
        assert!(!config.is_enabled(Hook::BeforeCallback));
        assert!(!config.is_enabled(Hook::AfterCallback));
        assert!(!config.is_enabled(Hook::AfterAnyAction));
    }

    #[test]
    fn test_points_not_array() {
        for raw in [json!(true), json!(false), json!(123), json!("test"), json!({"triggerAction": "INCREMENT"})] {
            let config: Config = Config::from_value(&json!({"points": raw}));
            assert!(config.points.is_empty());
        }
    }

    #[test]
    fn test_points_array() {
        let config: Config = Config::from_value(&json!({
            "points": [
                {"triggerAction": "INCREMENT"},
                {"triggerAction": "DECREMENT"}
            ]
        }));

        assert_eq!(config.points.len(), 2);
        assert_eq!(config.points[0].trigger_action, TriggerAction::from("INCREMENT"));
        assert_eq!(config.points[1].trigger_action, TriggerAction::from("DECREMENT"));
    }

    #[test]
    fn test_vars_defaults_to_empty_object() {
        let config: Config = Config::from_value(&json!({}));
        assert_eq!(config.vars, json!({}));

        let config: Config = Config::from_value(&json!({"vars": false}));
        assert_eq!(config.vars, json!({}));
    }

    #[test]
    fn test_vars_keeps_value() {
        let config: Config = Config::from_value(&json!({"vars": 123}));
        assert_eq!(config.vars, json!(123));

        let config: Config = Config::from_value(&json!({"vars": "test"}));
        assert_eq!(config.vars, json!("test"));

        let config: Config = Config::from_value(&json!({"vars": {"test": 123}}));
        assert_eq!(config.vars, json!({"test": 123}));
    }

    #[test]
    fn test_from_json_str_invalid() {
        let result = Config::<Value>::from_json_str("{ not json");
        assert!(matches!(result, Err(TapError::Parse(_))));
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = Config::<Value>::from_path("/nonexistent/wiretap.json");
        assert!(matches!(result, Err(TapError::Io { .. })));
    }
}
