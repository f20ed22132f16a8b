use tracing::trace;

use super::{Context, TapError};
use crate::config::{Firing, Hook};

/// Run the per-point hooks for every fired point
///
/// For each point, in order, `beforeCallback`, `callback` and
/// `afterCallback` run when enabled, each receiving the point's `data`.
/// Hook return values are ignored; the first error stops the run.
pub fn run_callbacks<S>(fired: &[Firing], context: &Context<'_, S>) -> Result<(), TapError> {
    for firing in fired {
        for hook in Hook::PER_POINT {
            if let Some(callback) = context.config.point_hook(hook) {
                trace!(%hook, action_type = %context.action.action_type, "running point hook");
                callback(firing.data.as_ref(), context)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::config::Config;
    use crate::vars::VarStore;
    use serde_json::{Value, json};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Calls = Rc<RefCell<Vec<(Hook, Option<Value>)>>>;

    fn recording_config(calls: &Calls) -> Config<()> {
        let (before, during, after) = (calls.clone(), calls.clone(), calls.clone());

        Config::new()
            .with_before_callback(move |data, _| {
                before.borrow_mut().push((Hook::BeforeCallback, data.cloned()));
                Ok(())
            })
            .with_callback(move |data, _| {
                during.borrow_mut().push((Hook::Callback, data.cloned()));
                Ok(())
            })
            .with_after_callback(move |data, _| {
                after.borrow_mut().push((Hook::AfterCallback, data.cloned()));
                Ok(())
            })
    }

    fn run(config: &Config<()>, fired: &[Firing]) -> Result<(), TapError> {
        let action = Action::new("INCREMENT");
        let vars = VarStore::default();
        run_callbacks(fired, &Context::new(&action, config, &(), &(), &vars))
    }

    #[test]
    fn test_no_points_is_noop() {
        let calls = Calls::default();
        let config = recording_config(&calls);

        run(&config, &[]).unwrap();

        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_hooks_run_in_order_per_point() {
        let calls = Calls::default();
        let config = recording_config(&calls);

        run(&config, &[Firing::with_data(json!({"test": 1})), Firing::new()]).unwrap();

        assert_eq!(
            *calls.borrow(),
            vec![
                (Hook::BeforeCallback, Some(json!({"test": 1}))),
                (Hook::Callback, Some(json!({"test": 1}))),
                (Hook::AfterCallback, Some(json!({"test": 1}))),
                (Hook::BeforeCallback, None),
                (Hook::Callback, None),
                (Hook::AfterCallback, None),
            ]
        );
    }

    #[test]
    fn test_disabled_hooks_skipped() {
        let calls = Calls::default();
        let recorder = calls.clone();
        let config = Config::new().with_callback(move |data, _| {
            recorder.borrow_mut().push((Hook::Callback, data.cloned()));
            Ok(())
        });

        run(&config, &[Firing::with_data(json!("x"))]).unwrap();

        assert_eq!(*calls.borrow(), vec![(Hook::Callback, Some(json!("x")))]);
    }

    #[test]
    fn test_error_stops_remaining_hooks() {
        let calls = Calls::default();
        let recorder = calls.clone();
        let config = Config::new()
            .with_callback(|_, _| Err(TapError::custom("callback failed")))
            .with_after_callback(move |data, _| {
                recorder.borrow_mut().push((Hook::AfterCallback, data.cloned()));
                Ok(())
            });

        let result = run(&config, &[Firing::new(), Firing::new()]);

        assert!(result.is_err());
        assert!(calls.borrow().is_empty());
    }
}
