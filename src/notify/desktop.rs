// Notification delivery: desktop and console sinks.
//
// The desktop sink goes through notify-rust, which talks to the platform
// notification center (D-Bus on Linux/BSD, NSUserNotification on macOS,
// toast notifications on Windows).

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::debug;

use super::format::Notification;

/// Application name shown by the notification center.
pub const APP_NAME: &str = "hamsalert";

/// Where composed notifications go.
pub trait NotificationSink {
    fn deliver(&self, notification: &Notification) -> Result<()>;
}

/// The host's desktop notification center.
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationSink for DesktopNotifier {
    fn deliver(&self, notification: &Notification) -> Result<()> {
        debug!(title = %notification.title, "Dispatching desktop notification");
        build_toast(notification)
            .show()
            .context("Failed to show desktop notification")?;
        Ok(())
    }
}

/// Translate a composed notification into a notify-rust one.
fn build_toast(notification: &Notification) -> notify_rust::Notification {
    let mut toast = notify_rust::Notification::new();
    toast
        .summary(&notification.title)
        .body(&notification.body)
        .appname(APP_NAME);
    if let Some(sound) = &notification.sound {
        toast.sound_name(sound);
    }
    toast
}

/// Prints notifications to stdout. Used with `--no-desktop` and as the
/// fallback when desktop delivery fails.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn deliver(&self, notification: &Notification) -> Result<()> {
        print_notification(notification);
        Ok(())
    }
}

pub fn print_notification(notification: &Notification) {
    println!("{}", notification.title.bold());
    println!("{}", notification.body);
}
