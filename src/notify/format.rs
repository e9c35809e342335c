// Notification text for a batch of new alerts.
//
// Title: "🆕 N New Satellite Alert(s)!"
// Body, per alert (first five only):
//
//   CALLSIGN • Satellite • GRID1, GRID2
//     Mar 1 14:05 FM 436.795 MHz
//
// followed by a blank line and "...and N more" when there were more than
// five. Absent fields are dropped entirely; only the callsign has a
// fallback ("Unknown").

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::hamsat::models::Alert;

/// Maximum number of alerts spelled out in one notification body.
pub const MAX_LISTED: usize = 5;

/// Sound cue attached to every notification.
pub const DEFAULT_SOUND: &str = "default";

const SEGMENT_SEPARATOR: &str = " • ";
const TITLE_PREFIX: &str = "🆕";
const UNKNOWN_CALLSIGN: &str = "Unknown";

/// A composed, ready-to-dispatch notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub sound: Option<String>,
}

/// Compose the notification for `new_alerts`, or None if there are none.
///
/// AOS times are shown in `tz`.
pub fn compose<Tz>(new_alerts: &[&Alert], tz: &Tz) -> Option<Notification>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if new_alerts.is_empty() {
        return None;
    }

    let mut blocks: Vec<String> = new_alerts
        .iter()
        .take(MAX_LISTED)
        .map(|alert| format_block(alert, tz))
        .collect();

    if new_alerts.len() > MAX_LISTED {
        blocks.push(format!("\n...and {} more", new_alerts.len() - MAX_LISTED));
    }

    Some(Notification {
        title: title(new_alerts.len()),
        body: blocks.join("\n").trim_end().to_string(),
        sound: Some(DEFAULT_SOUND.to_string()),
    })
}

/// "🆕 3 New Satellite Alerts!", singular for exactly one.
pub fn title(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{TITLE_PREFIX} {count} New Satellite Alert{plural}!")
}

/// One alert's lines: the headline, plus an indented detail line if there
/// is anything to put on it.
pub fn format_block<Tz>(alert: &Alert, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let grids = alert.grids().map(|g| g.join(", "));

    let mut headline = alert.callsign().unwrap_or(UNKNOWN_CALLSIGN).to_string();
    for segment in [alert.satellite_name(), grids.as_deref()].into_iter().flatten() {
        headline.push_str(SEGMENT_SEPARATOR);
        headline.push_str(segment);
    }

    let details: Vec<String> = [
        alert.aos_at().and_then(|at| format_aos(at, tz)),
        alert.mode().map(str::to_string),
        alert.mhz().map(|mhz| format!("{mhz} MHz")),
    ]
    .into_iter()
    .flatten()
    .collect();

    if details.is_empty() {
        headline
    } else {
        format!("{headline}\n  {}", details.join(" "))
    }
}

/// Parse an ISO 8601 timestamp and render it as "Mar 1 14:05" in `tz`.
///
/// Timestamps without an offset are taken as UTC. Anything unparseable
/// yields None so the field is simply left out.
pub fn format_aos<Tz>(iso: &str, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let utc = match DateTime::parse_from_rfc3339(iso) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(_) => NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()?
            .and_utc(),
    };
    Some(utc.with_timezone(tz).format("%b %-d %H:%M").to_string())
}
