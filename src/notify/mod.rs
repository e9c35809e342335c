// Notifications: composing the "new alerts" message and delivering it.
//
// `format` is pure text building; `desktop` holds the delivery sinks.

pub mod desktop;
pub mod format;

use chrono::TimeZone;
use tracing::{info, warn};

use crate::hamsat::models::Alert;
use desktop::NotificationSink;
use format::Notification;

/// Compose and deliver one notification for `new_alerts`.
///
/// No-op (log only) when the list is empty. A delivery failure is logged and
/// the notification is printed to the console instead. Returns whether a
/// notification was dispatched to the sink successfully.
pub fn notify_new_alerts<Tz>(sink: &dyn NotificationSink, new_alerts: &[&Alert], tz: &Tz) -> bool
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match format::compose(new_alerts, tz) {
        Some(notification) => dispatch(sink, &notification),
        None => {
            info!("No new alerts");
            false
        }
    }
}

/// Deliver an already composed notification, falling back to the console
/// when the sink fails. Returns whether the sink accepted it.
pub fn dispatch(sink: &dyn NotificationSink, notification: &Notification) -> bool {
    match sink.deliver(notification) {
        Ok(()) => {
            info!(title = %notification.title, "Notified about new alerts");
            true
        }
        Err(e) => {
            let chain = format!("{e:#}");
            warn!(error = %chain, "Error sending notification");
            desktop::print_notification(notification);
            false
        }
    }
}
