// Set arithmetic between the current fetch and the seen set.
//
// All pure. `diff` picks out what to notify about; `prune` keeps the
// persisted set from growing past what the API currently lists.

use std::collections::HashSet;

use crate::hamsat::models::{Alert, AlertId};
use crate::state::SeenSet;

/// Alerts in `current` whose id is not in `seen`, in their original order.
pub fn diff<'a>(current: &'a [Alert], seen: &SeenSet) -> Vec<&'a Alert> {
    current
        .iter()
        .filter(|a| a.id().is_some_and(|id| !seen.contains(id)))
        .collect()
}

/// Keep only the seen ids that still appear in `current`.
pub fn prune(seen: &SeenSet, current: &[Alert]) -> SeenSet {
    let current_ids: HashSet<&AlertId> = current.iter().filter_map(Alert::id).collect();
    seen.iter()
        .filter(|id| current_ids.contains(id))
        .cloned()
        .collect()
}

/// Union the ids of `new_alerts` into `seen`.
pub fn merge(seen: &mut SeenSet, new_alerts: &[&Alert]) {
    seen.extend(new_alerts.iter().filter_map(|a| a.id()).cloned());
}
