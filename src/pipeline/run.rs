// One check run: diff the fetch against the seen set, notify, persist.
//
// `plan` is the pure part: (current alerts, seen set) -> (notification,
// next seen set). `reconcile` wires it to the store and the sink.

use chrono::TimeZone;
use tracing::{info, warn};

use super::diff::{diff, merge, prune};
use crate::hamsat::models::Alert;
use crate::notify::{self, desktop::NotificationSink, format};
use crate::state::store::SeenStore;
use crate::state::SeenSet;

/// Outcome of planning a run, before any side effects.
#[derive(Debug)]
pub struct RunPlan<'a> {
    /// Alerts not previously notified, in fetch order.
    pub new_alerts: Vec<&'a Alert>,
    /// Notification to send, if there are new alerts.
    pub notification: Option<format::Notification>,
    /// Seen set to persist: old set plus new ids, pruned to `current`.
    pub next_seen: SeenSet,
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Alerts in the latest fetch.
    pub total: usize,
    /// Alerts that hadn't been notified before.
    pub new: usize,
    /// Ids persisted for the next run.
    pub tracking: usize,
    /// Whether the sink accepted a notification.
    pub notified: bool,
    /// Whether the seen set reached disk.
    pub saved: bool,
}

/// Work out what this run should do, without doing it.
pub fn plan<'a, Tz>(current: &'a [Alert], seen: &SeenSet, tz: &Tz) -> RunPlan<'a>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let new_alerts = diff(current, seen);
    let notification = format::compose(&new_alerts, tz);

    let mut next_seen = seen.clone();
    merge(&mut next_seen, &new_alerts);
    let next_seen = prune(&next_seen, current);

    RunPlan {
        new_alerts,
        notification,
        next_seen,
    }
}

/// Load the seen set, notify about anything new, and persist the updated set.
///
/// Only call this with a successful fetch; on a failed fetch the seen file
/// must be left as it is. Neither a delivery failure nor a save failure
/// aborts the run; both are logged.
pub fn reconcile<Tz>(
    current: &[Alert],
    store: &dyn SeenStore,
    sink: &dyn NotificationSink,
    tz: &Tz,
) -> RunReport
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let seen = store.load();
    let plan = plan(current, &seen, tz);

    let notified = match &plan.notification {
        Some(notification) => notify::dispatch(sink, notification),
        None => {
            info!("No new alerts found");
            false
        }
    };

    let saved = match store.save(&plan.next_seen) {
        Ok(()) => true,
        Err(e) => {
            let chain = format!("{e:#}");
            warn!(error = %chain, "Failed to save seen alerts");
            false
        }
    };

    let report = RunReport {
        total: current.len(),
        new: plan.new_alerts.len(),
        tracking: plan.next_seen.len(),
        notified,
        saved,
    };
    info!(
        total = report.total,
        new = report.new,
        tracking = report.tracking,
        "Check complete"
    );
    report
}
