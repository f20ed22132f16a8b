use serde_json::Value;

use crate::action::Action;
use crate::config::Config;
use crate::vars::VarStore;

/// Values handed to every hook and point logic
///
/// A fresh context is built for each hook invocation. All contexts of one
/// dispatch share the same action and state snapshots; all contexts of one
/// middleware instance share the same variable store.
pub struct Context<'a, S> {
    /// The dispatched action
    pub action: &'a Action,

    /// The normalized configuration
    pub config: &'a Config<S>,

    /// Store state before the action was applied
    pub prev_state: &'a S,

    /// Store state after the action was applied
    pub next_state: &'a S,

    vars: &'a VarStore,
}

impl<'a, S> Context<'a, S> {
    pub fn new(
        action: &'a Action,
        config: &'a Config<S>,
        prev_state: &'a S,
        next_state: &'a S,
        vars: &'a VarStore,
    ) -> Self {
        Self {
            action,
            config,
            prev_state,
            next_state,
            vars,
        }
    }

    /// Current vars value
    pub fn get_vars(&self) -> Value {
        self.vars.get()
    }

    /// Replace vars; falsy values are ignored
    ///
    /// # Example
    /// ```
    /// use serde_json::json;
    /// use wiretap::{Action, Config, Context, VarStore};
    ///
    /// let action = Action::new("increment");
    /// let config: Config<i64> = Config::new();
    /// let vars = VarStore::new(Some(json!({"a": 1})));
    /// let ctx = Context::new(&action, &config, &0, &1, &vars);
    ///
    /// ctx.set_vars(json!(false));
    /// assert_eq!(ctx.get_vars(), json!({"a": 1}));
    ///
    /// ctx.set_vars(json!({"b": 2}));
    /// assert_eq!(ctx.get_vars(), json!({"b": 2}));
    /// ```
    pub fn set_vars(&self, vars: impl Into<Option<Value>>) -> Value {
        self.vars.set(vars)
    }
}
