/// wiretap - A configurable interception layer for action-dispatching stores
///
/// This library lets a declarative configuration describe "points" that
/// match dispatched actions and run callbacks, without touching the
/// store's reducer or the code that dispatches actions.

pub mod action;
pub mod config;
pub mod middleware;
pub mod pipeline;
pub mod predicates;
pub mod store;
pub mod vars;

// Re-export commonly used types
pub use action::Action;
pub use config::{Config, Firing, Hook, Point, TriggerAction};
pub use middleware::{Middleware, StateView, Wiretap};
pub use pipeline::{Context, TapError, TriggerIndex};
pub use store::Store;
pub use vars::VarStore;
