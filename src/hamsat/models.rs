// Alert models: serde types for the hams.at upcoming-alerts response.
//
// Every field except `id` is optional. Presence is checked through the
// accessor methods on Alert, never by poking at the raw Options, so
// "empty string" and "missing" behave the same everywhere.
//
// Optional fields are read leniently: a value of the wrong JSON type is
// treated as absent rather than failing the whole response.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Stable identifier of an alert.
///
/// The API has used both numeric and string IDs, and the seen file is a
/// plain JSON array, so both shapes round-trip untouched. `1` and `"1"`
/// are different identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlertId {
    Number(i64),
    Text(String),
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertId::Number(n) => write!(f, "{n}"),
            AlertId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for AlertId {
    fn from(n: i64) -> Self {
        AlertId::Number(n)
    }
}

impl From<&str> for AlertId {
    fn from(s: &str) -> Self {
        AlertId::Text(s.to_string())
    }
}

/// The satellite an activation is planned on.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Satellite {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

/// A single upcoming activation.
///
/// Identity is the `id` alone; two alerts with the same id are the same
/// alert even if the other fields changed between fetches.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Alert {
    pub id: Option<AlertId>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub callsign: Option<String>,
    #[serde(default, deserialize_with = "lenient_satellite")]
    pub satellite: Option<Satellite>,
    #[serde(default, deserialize_with = "lenient_grids")]
    pub grids: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mode: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub mhz: Option<f64>,
    /// Acquisition of signal, ISO 8601.
    #[serde(default, deserialize_with = "lenient_string")]
    pub aos_at: Option<String>,
}

impl Alert {
    /// Build an alert with only an identifier set. Handy for tests and fakes.
    pub fn with_id(id: impl Into<AlertId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// The identifier. Envelope validation guarantees it is set for every
    /// alert that came out of a fetch.
    pub fn id(&self) -> Option<&AlertId> {
        self.id.as_ref()
    }

    pub fn callsign(&self) -> Option<&str> {
        non_empty(self.callsign.as_deref())
    }

    pub fn satellite_name(&self) -> Option<&str> {
        self.satellite
            .as_ref()
            .and_then(|s| non_empty(s.name.as_deref()))
    }

    /// Grid squares, or None if the list is missing or empty.
    pub fn grids(&self) -> Option<&[String]> {
        self.grids.as_deref().filter(|g| !g.is_empty())
    }

    pub fn mode(&self) -> Option<&str> {
        non_empty(self.mode.as_deref())
    }

    /// Frequency in MHz. Zero counts as absent.
    pub fn mhz(&self) -> Option<f64> {
        self.mhz.filter(|mhz| *mhz != 0.0)
    }

    pub fn aos_at(&self) -> Option<&str> {
        non_empty(self.aos_at.as_deref())
    }
}

impl PartialEq for Alert {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Strings as-is, numbers in their JSON spelling, anything else absent.
fn lenient_string<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Numbers, or strings that parse as one ("145.8").
fn lenient_number<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok().filter(|n: &f64| n.is_finite()),
        _ => None,
    })
}

/// An object with an optional `name`; any other shape is absent.
fn lenient_satellite<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Satellite>, D::Error> {
    Ok(match Value::deserialize(de)? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// A list of grid squares. Non-string entries are skipped; a non-list is absent.
fn lenient_grids<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

/// Response envelope of `GET /api/alerts/upcoming`.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertsEnvelope {
    pub data: Vec<Alert>,
}

impl AlertsEnvelope {
    /// Reject envelopes where any alert lacks an identifier. Such an alert
    /// could never be de-duplicated.
    pub fn into_alerts(self) -> anyhow::Result<Vec<Alert>> {
        if let Some(pos) = self.data.iter().position(|a| a.id.is_none()) {
            anyhow::bail!("alert at index {pos} has no id");
        }
        Ok(self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_alert() {
        let json = r#"{
            "id": 42,
            "callsign": "N0CALL",
            "satellite": {"name": "SO-50"},
            "grids": ["EM12", "EM13"],
            "mode": "FM",
            "mhz": 436.795,
            "aos_at": "2024-03-01T14:05:00Z"
        }"#;
        let alert: Alert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.id(), Some(&AlertId::Number(42)));
        assert_eq!(alert.callsign(), Some("N0CALL"));
        assert_eq!(alert.satellite_name(), Some("SO-50"));
        assert_eq!(alert.grids().map(|g| g.len()), Some(2));
        assert_eq!(alert.mode(), Some("FM"));
        assert_eq!(alert.mhz(), Some(436.795));
        assert_eq!(alert.aos_at(), Some("2024-03-01T14:05:00Z"));
    }

    #[test]
    fn test_string_id() {
        let alert: Alert = serde_json::from_str(r#"{"id": "abc-123"}"#).unwrap();
        assert_eq!(alert.id(), Some(&AlertId::Text("abc-123".to_string())));
    }

    #[test]
    fn test_null_and_empty_fields_are_absent() {
        let json = r#"{
            "id": 1,
            "callsign": "",
            "satellite": {"name": null},
            "grids": [],
            "mode": null,
            "mhz": null,
            "aos_at": ""
        }"#;
        let alert: Alert = serde_json::from_str(json).unwrap();
        assert!(alert.callsign().is_none());
        assert!(alert.satellite_name().is_none());
        assert!(alert.grids().is_none());
        assert!(alert.mode().is_none());
        assert!(alert.mhz().is_none());
        assert!(alert.aos_at().is_none());
    }

    #[test]
    fn test_equality_is_by_id_only() {
        let mut a = Alert::with_id(7_i64);
        a.callsign = Some("K1ABC".to_string());
        let b = Alert::with_id(7_i64);
        assert_eq!(a, b);
        assert_ne!(a, Alert::with_id("7"));
    }

    #[test]
    fn test_envelope_rejects_missing_id() {
        let env: AlertsEnvelope =
            serde_json::from_str(r#"{"data": [{"id": 1}, {"callsign": "X"}]}"#).unwrap();
        let err = env.into_alerts().unwrap_err();
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_mistyped_optional_fields_do_not_fail_envelope() {
        let json = r#"{"data": [
            {"id": 1, "callsign": "A"},
            {"id": 2, "mhz": "145.8", "satellite": "ISS", "callsign": 123,
             "grids": "FN31", "mode": ["FM"], "aos_at": false}
        ]}"#;
        let alerts = serde_json::from_str::<AlertsEnvelope>(json)
            .unwrap()
            .into_alerts()
            .unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].callsign(), Some("A"));

        let odd = &alerts[1];
        assert_eq!(odd.mhz(), Some(145.8));
        assert!(odd.satellite_name().is_none());
        assert_eq!(odd.callsign(), Some("123"));
        assert!(odd.grids().is_none());
        assert!(odd.mode().is_none());
        assert!(odd.aos_at().is_none());
    }

    #[test]
    fn test_mixed_grid_entries_keep_strings() {
        let alert: Alert =
            serde_json::from_str(r#"{"id": 1, "grids": ["EM12", 7, null, "EM13"]}"#).unwrap();
        assert_eq!(
            alert.grids(),
            Some(&["EM12".to_string(), "EM13".to_string()][..])
        );
    }

    #[test]
    fn test_zero_frequency_is_absent() {
        let alert: Alert = serde_json::from_str(r#"{"id": 1, "mhz": 0}"#).unwrap();
        assert!(alert.mhz().is_none());
        let text: Alert = serde_json::from_str(r#"{"id": 1, "mhz": "abc"}"#).unwrap();
        assert!(text.mhz().is_none());
    }

    #[test]
    fn test_mixed_ids_sort_numbers_first() {
        let mut ids = vec![AlertId::from("b"), AlertId::from(3), AlertId::from(1)];
        ids.sort();
        assert_eq!(
            ids,
            vec![AlertId::from(1), AlertId::from(3), AlertId::from("b")]
        );
    }
}
