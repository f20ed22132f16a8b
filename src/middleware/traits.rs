use crate::action::Action;
use crate::pipeline::TapError;

/// Read access to a store's current state
///
/// Middleware snapshots state through this trait before and after the
/// action is applied.
pub trait StateView<S> {
    /// Get a snapshot of the current state
    fn state(&self) -> S;
}

/// The next layer of a dispatch chain
pub type Next<'a> = &'a dyn Fn(&Action) -> Result<Action, TapError>;

/// A layer in a store's dispatch chain
///
/// Implementations receive the store, the action and the rest of the
/// chain, and must call `next` exactly once to let the action through.
pub trait Middleware<S> {
    fn handle(&self, store: &dyn StateView<S>, action: &Action, next: Next<'_>) -> Result<Action, TapError>;
}
