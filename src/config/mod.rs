/// Configuration types for wiretap
///
/// This module contains the normalized configuration, the point rules it
/// carries, and the hook slots invoked around each dispatch.

mod hooks;
mod point;
mod root;
pub mod schema;

pub use hooks::{ActionHook, Hook, Logic, PointHook};
pub use point::{Firing, Point, TriggerAction};
pub use root::Config;
