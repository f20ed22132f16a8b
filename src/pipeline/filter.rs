use tracing::trace;

use super::{Context, TapError};
use crate::config::Firing;

/// Select the points that fire for the context's action
///
/// Points whose trigger matches are evaluated in order: a point's logic
/// (or the point itself, when it has none) produces a `Firing`. Results
/// of `None`, or with `should_fire` explicitly false, are dropped.
/// An error from any logic aborts the selection.
pub fn filter_points<S>(context: &Context<'_, S>) -> Result<Vec<Firing>, TapError> {
    let action_type = context.action.action_type.as_str();
    let mut fired = Vec::new();

    for (position, point) in context.config.points.iter().enumerate() {
        if !point.trigger_action.matches(action_type) {
            continue;
        }

        match point.fire(context)? {
            Some(firing) if !firing.is_vetoed() => fired.push(firing),
            Some(_) => trace!(position, action_type, "point vetoed by shouldFire"),
            None => trace!(position, action_type, "point vetoed by logic"),
        }
    }

    Ok(fired)
}
