use std::cell::RefCell;
use std::fmt;

use tracing::trace;

use crate::action::Action;
use crate::middleware::{Middleware, StateView};
use crate::pipeline::TapError;

/// Reducer computing the next state from the current state and an action
pub type Reducer<S> = Box<dyn Fn(&S, &Action) -> S>;

/// In-process store with a middleware chain
///
/// Dispatch is synchronous: an action runs through every middleware in
/// installation order and finally the reducer before `dispatch` returns.
pub struct Store<S> {
    state: RefCell<S>,
    reducer: Reducer<S>,
    middleware: Vec<Box<dyn Middleware<S>>>,
}

impl<S: fmt::Debug> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("reducer", &"<function>")
            .field("middleware", &self.middleware.len())
            .finish()
    }
}

impl<S: Clone> Store<S> {
    pub fn new<F>(initial_state: S, reducer: F) -> Self
    where
        F: Fn(&S, &Action) -> S + 'static,
    {
        Self {
            state: RefCell::new(initial_state),
            reducer: Box::new(reducer),
            middleware: Vec::new(),
        }
    }

    /// Append a middleware to the chain
    pub fn with_middleware<M>(mut self, middleware: M) -> Self
    where
        M: Middleware<S> + 'static,
    {
        self.middleware.push(Box::new(middleware));
        self
    }

    /// Dispatch an action through the chain
    ///
    /// Returns the dispatched action, or the first error raised by a
    /// middleware.
    pub fn dispatch(&self, action: Action) -> Result<Action, TapError> {
        self.dispatch_from(0, &action)
    }

    fn dispatch_from(&self, position: usize, action: &Action) -> Result<Action, TapError> {
        match self.middleware.get(position) {
            Some(middleware) => {
                let next = |action: &Action| self.dispatch_from(position + 1, action);
                middleware.handle(self, action, &next)
            }
            None => {
                trace!(action_type = %action.action_type, "reducing action");
                let next_state = {
                    let state = self.state.borrow();
                    (self.reducer)(&*state, action)
                };
                self.state.replace(next_state);
                Ok(action.clone())
            }
        }
    }
}

impl<S: Clone> StateView<S> for Store<S> {
    fn state(&self) -> S {
        self.state.borrow().clone()
    }
}
