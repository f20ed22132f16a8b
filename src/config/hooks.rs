use serde_json::Value;
use std::fmt;

use super::Firing;
use crate::pipeline::{Context, TapError};

/// Hook run once per dispatch (`beforeAnyAction`, `afterAnyAction`)
pub type ActionHook<S> = Box<dyn Fn(&Context<'_, S>) -> Result<(), TapError>>;

/// Hook run once per fired point, receiving that point's `data`
pub type PointHook<S> = Box<dyn Fn(Option<&Value>, &Context<'_, S>) -> Result<(), TapError>>;

/// Custom firing logic attached to a point
///
/// Returning `Ok(None)` vetoes the point.
pub type Logic<S> = Box<dyn Fn(&Context<'_, S>) -> Result<Option<Firing>, TapError>>;

/// Lifecycle hook slots, in invocation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    BeforeAnyAction,
    BeforeCallback,
    Callback,
    AfterCallback,
    AfterAnyAction,
}

impl Hook {
    /// Every slot, in invocation order
    pub const ALL: [Hook; 5] = [
        Hook::BeforeAnyAction,
        Hook::BeforeCallback,
        Hook::Callback,
        Hook::AfterCallback,
        Hook::AfterAnyAction,
    ];

    /// Slots run for each fired point
    pub const PER_POINT: [Hook; 3] = [Hook::BeforeCallback, Hook::Callback, Hook::AfterCallback];

    /// Configuration key of the slot
    pub fn key(self) -> &'static str {
        match self {
            Hook::BeforeAnyAction => "beforeAnyAction",
            Hook::BeforeCallback => "beforeCallback",
            Hook::Callback => "callback",
            Hook::AfterCallback => "afterCallback",
            Hook::AfterAnyAction => "afterAnyAction",
        }
    }

    /// Whether the slot runs once per fired point
    pub fn is_per_point(self) -> bool {
        Self::PER_POINT.contains(&self)
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_order() {
        let keys: Vec<&str> = Hook::ALL.iter().map(|hook| hook.key()).collect();
        assert_eq!(
            keys,
            vec!["beforeAnyAction", "beforeCallback", "callback", "afterCallback", "afterAnyAction"]
        );
    }

    #[test]
    fn test_per_point() {
        assert!(Hook::Callback.is_per_point());
        assert!(!Hook::BeforeAnyAction.is_per_point());
        assert!(!Hook::AfterAnyAction.is_per_point());
    }
}
