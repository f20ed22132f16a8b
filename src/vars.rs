use serde_json::Value;
use std::cell::RefCell;

use crate::predicates::is_truthy;

/// Per-middleware variable store
///
/// A single mutable cell shared by every dispatch that passes through one
/// middleware instance. Values are replaced wholesale, never merged.
/// Access is single-threaded and follows the store's dispatch cycle.
#[derive(Debug)]
pub struct VarStore {
    vars: RefCell<Value>,
}

impl Default for VarStore {
    fn default() -> Self {
        Self::new(None)
    }
}

impl VarStore {
    /// Create a store seeded with `initial`, or an empty object
    pub fn new(initial: Option<Value>) -> Self {
        let vars = initial
            .filter(is_truthy)
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

        Self {
            vars: RefCell::new(vars),
        }
    }

    /// Get the current value
    pub fn get(&self) -> Value {
        self.vars.borrow().clone()
    }

    /// Replace the current value if `replacement` is truthy
    ///
    /// A falsy (or absent) replacement leaves the existing value in place.
    /// Returns the value held after the call.
    pub fn set(&self, replacement: impl Into<Option<Value>>) -> Value {
        let mut vars = self.vars.borrow_mut();
        if let Some(value) = replacement.into().filter(is_truthy) {
            *vars = value;
        }
        vars.clone()
    }
}
