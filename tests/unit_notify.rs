// Unit tests for notification composition and dispatch.
//
// Body layout, the five-alert cap with its overflow line, optional-field
// handling, and sink behavior (no dispatch on empty, console fallback on
// delivery failure).

use std::cell::RefCell;

use anyhow::Result;
use chrono::Utc;
use hamsalert::hamsat::models::{Alert, Satellite};
use hamsalert::notify::desktop::NotificationSink;
use hamsalert::notify::format::{compose, Notification, DEFAULT_SOUND, MAX_LISTED};
use hamsalert::notify::notify_new_alerts;

/// Records every notification instead of showing it.
#[derive(Default)]
struct RecordingSink {
    sent: RefCell<Vec<Notification>>,
    fail: bool,
}

impl NotificationSink for RecordingSink {
    fn deliver(&self, notification: &Notification) -> Result<()> {
        if self.fail {
            anyhow::bail!("notification center unavailable");
        }
        self.sent.borrow_mut().push(notification.clone());
        Ok(())
    }
}

fn callsign_alert(id: i64, callsign: &str) -> Alert {
    Alert {
        callsign: Some(callsign.to_string()),
        ..Alert::with_id(id)
    }
}

// ============================================================
// Body layout
// ============================================================

#[test]
fn callsign_only_alert_has_single_line() {
    let alert = callsign_alert(1, "N0CALL");
    let n = compose(&[&alert], &Utc).unwrap();
    assert_eq!(n.title, "🆕 1 New Satellite Alert!");
    assert_eq!(n.body, "N0CALL");
    assert_eq!(n.sound.as_deref(), Some(DEFAULT_SOUND));
}

#[test]
fn segments_are_included_only_when_present() {
    let alert = Alert {
        callsign: Some("K1ABC".to_string()),
        grids: Some(vec!["FN42".to_string()]),
        ..Alert::with_id(1_i64)
    };
    let n = compose(&[&alert], &Utc).unwrap();
    assert_eq!(n.body, "K1ABC • FN42");
}

#[test]
fn satellite_without_name_is_omitted() {
    let alert = Alert {
        callsign: Some("K1ABC".to_string()),
        satellite: Some(Satellite { name: None }),
        mode: Some("SSB".to_string()),
        ..Alert::with_id(1_i64)
    };
    let n = compose(&[&alert], &Utc).unwrap();
    assert_eq!(n.body, "K1ABC\n  SSB");
}

#[test]
fn blocks_follow_input_order() {
    let a = callsign_alert(1, "AAA");
    let b = callsign_alert(2, "BBB");
    let c = callsign_alert(3, "CCC");
    let n = compose(&[&c, &a, &b], &Utc).unwrap();
    assert_eq!(n.body, "CCC\nAAA\nBBB");
}

#[test]
fn body_has_no_trailing_whitespace() {
    let alert = Alert {
        mode: Some("FM".to_string()),
        ..Alert::with_id(1_i64)
    };
    let n = compose(&[&alert], &Utc).unwrap();
    assert_eq!(n.body, "Unknown\n  FM");
    assert_eq!(n.body, n.body.trim_end());
}

// ============================================================
// Five-alert cap
// ============================================================

#[test]
fn seven_alerts_show_five_blocks_and_overflow() {
    let alerts: Vec<Alert> = (1..=7)
        .map(|i| callsign_alert(i, &format!("CALL{i}")))
        .collect();
    let refs: Vec<&Alert> = alerts.iter().collect();

    let n = compose(&refs, &Utc).unwrap();
    assert_eq!(n.title, "🆕 7 New Satellite Alerts!");

    let lines: Vec<&str> = n.body.lines().collect();
    assert_eq!(
        lines,
        vec!["CALL1", "CALL2", "CALL3", "CALL4", "CALL5", "", "...and 2 more"]
    );
    assert!(!n.body.contains("CALL6"));
}

#[test]
fn exactly_five_alerts_has_no_overflow_line() {
    let alerts: Vec<Alert> = (1..=MAX_LISTED as i64)
        .map(|i| callsign_alert(i, "X"))
        .collect();
    let refs: Vec<&Alert> = alerts.iter().collect();

    let n = compose(&refs, &Utc).unwrap();
    assert!(!n.body.contains("more"));
    assert_eq!(n.body.lines().count(), MAX_LISTED);
}

// ============================================================
// Dispatch
// ============================================================

#[test]
fn empty_list_dispatches_nothing() {
    let sink = RecordingSink::default();
    assert!(!notify_new_alerts(&sink, &[], &Utc));
    assert!(sink.sent.borrow().is_empty());
}

#[test]
fn new_alerts_dispatch_exactly_once() {
    let sink = RecordingSink::default();
    let a = callsign_alert(1, "AAA");
    let b = callsign_alert(2, "BBB");

    assert!(notify_new_alerts(&sink, &[&a, &b], &Utc));

    let sent = sink.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "🆕 2 New Satellite Alerts!");
    assert_eq!(sent[0].body, "AAA\nBBB");
}

#[test]
fn delivery_failure_is_reported_not_raised() {
    let sink = RecordingSink {
        fail: true,
        ..RecordingSink::default()
    };
    let a = callsign_alert(1, "AAA");
    assert!(!notify_new_alerts(&sink, &[&a], &Utc));
}
