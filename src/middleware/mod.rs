/// Store middleware
///
/// This module contains the dispatch-chain traits and the wiretap
/// middleware that evaluates configured points around each action.

mod traits;

pub use traits::{Middleware, Next, StateView};

use serde_json::Value;
use tracing::{debug, trace};

use crate::action::Action;
use crate::config::Config;
use crate::pipeline::{Context, TapError, TriggerIndex, filter_points, run_callbacks};
use crate::vars::VarStore;

/// The wiretap middleware
///
/// Owns the normalized configuration, the trigger index built from its
/// points, and the variable store shared by every dispatch through this
/// instance. Each installation gets its own variable store.
pub struct Wiretap<S = Value> {
    config: Config<S>,
    index: TriggerIndex,
    vars: VarStore,
}

impl<S> std::fmt::Debug for Wiretap<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wiretap")
            .field("config", &self.config)
            .field("index", &self.index)
            .field("vars", &self.vars)
            .finish()
    }
}

impl<S> Wiretap<S> {
    /// Create the middleware from a configuration
    pub fn new(config: Config<S>) -> Self {
        let index = TriggerIndex::build(&config.points);
        let vars = VarStore::new(Some(config.vars.clone()));

        debug!(
            points = config.points.len(),
            trigger_actions = index.len(),
            "wiretap created"
        );

        Self { config, index, vars }
    }

    /// Create the middleware from a raw configuration value
    ///
    /// # Example
    /// ```
    /// use serde_json::json;
    /// use wiretap::Wiretap;
    ///
    /// let tap: Wiretap = Wiretap::from_value(&json!({
    ///     "points": [{"triggerAction": ["increment", "decrement"]}]
    /// }));
    ///
    /// assert!(tap.index().contains("decrement"));
    /// ```
    pub fn from_value(raw: &Value) -> Self {
        Self::new(Config::from_value(raw))
    }

    pub fn config(&self) -> &Config<S> {
        &self.config
    }

    pub fn index(&self) -> &TriggerIndex {
        &self.index
    }

    pub fn vars(&self) -> &VarStore {
        &self.vars
    }

    /// Intercept one dispatched action
    ///
    /// Snapshots state, lets `next` apply the action, snapshots state
    /// again, then runs `beforeAnyAction`, the matching points and their
    /// hooks, and `afterAnyAction`. Actions outside the trigger index skip
    /// point evaluation. The result of `next` is returned untouched.
    ///
    /// Any error from `next` or from a hook is returned immediately and
    /// the remaining phases are skipped.
    pub fn intercept<R>(
        &self,
        store: &dyn StateView<S>,
        action: &Action,
        next: impl FnOnce(&Action) -> Result<R, TapError>,
    ) -> Result<R, TapError> {
        let prev_state = store.state();
        let result = next(action)?;
        let next_state = store.state();

        let context = || Context::new(action, &self.config, &prev_state, &next_state, &self.vars);

        if let Some(hook) = &self.config.before_any_action {
            hook(&context())?;
        }

        if self.index.contains(&action.action_type) {
            let fired = filter_points(&context())?;
            debug!(
                action_type = %action.action_type,
                fired = fired.len(),
                "points evaluated"
            );
            run_callbacks(&fired, &context())?;
        } else {
            trace!(action_type = %action.action_type, "action not in trigger index");
        }

        if let Some(hook) = &self.config.after_any_action {
            hook(&context())?;
        }

        Ok(result)
    }
}

impl<S> Middleware<S> for Wiretap<S> {
    fn handle(&self, store: &dyn StateView<S>, action: &Action, next: Next<'_>) -> Result<Action, TapError> {
        self.intercept(store, action, next)
    }
}
