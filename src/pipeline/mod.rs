/// Per-dispatch evaluation
///
/// This module contains the context handed to every hook, the trigger
/// index used to skip unrelated actions, point filtering and the
/// per-point callback runner.

mod callbacks;
mod context;
mod error;
mod filter;
mod index;

pub use callbacks::run_callbacks;
pub use context::Context;
pub use error::TapError;
pub use filter::filter_points;
pub use index::TriggerIndex;
