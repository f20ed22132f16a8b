use std::collections::HashSet;

use crate::config::Point;

/// Every action type referenced by any point
///
/// Built once when the middleware is created and used as a fast path:
/// actions outside the index skip point evaluation entirely. Keeps the
/// first occurrence of each type across the flattened triggers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerIndex {
    action_types: Vec<String>,
    lookup: HashSet<String>,
}

impl TriggerIndex {
    pub fn build<S>(points: &[Point<S>]) -> Self {
        let mut index = Self::default();

        for action_type in points
            .iter()
            .flat_map(|point| point.trigger_action.action_types())
        {
            if index.lookup.insert(action_type.clone()) {
                index.action_types.push(action_type.clone());
            }
        }

        index
    }

    pub fn contains(&self, action_type: &str) -> bool {
        self.lookup.contains(action_type)
    }

    /// Indexed action types, in first-seen order
    pub fn action_types(&self) -> &[String] {
        &self.action_types
    }

    pub fn len(&self) -> usize {
        self.action_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.action_types.is_empty()
    }
}
