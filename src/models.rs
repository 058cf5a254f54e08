use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::fmt::{parse_date, parse_datetime};

/// One workplace-accident investigation record as persisted in storage.
///
/// Free-text fields are kept as entered (after trimming); `report_date` and
/// `accident_date` stay strings because stored data may hold values that do
/// not parse, and queries must tolerate those. Decoding never rejects a
/// record over a field's shape: `null` or compound values read as empty text
/// and an unreadable `created_at` reads as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Report {
    #[serde(deserialize_with = "lenient_text")]
    pub report_number: String,
    #[serde(deserialize_with = "lenient_text")]
    pub company_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub report_date: String,
    #[serde(deserialize_with = "lenient_text")]
    pub accident_date: String,
    #[serde(deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(deserialize_with = "lenient_text")]
    pub department: String,
    #[serde(deserialize_with = "lenient_text")]
    pub accident_type: String,
    #[serde(deserialize_with = "lenient_text")]
    pub accident_desc: String,
    #[serde(deserialize_with = "lenient_text")]
    pub injured_person: String,
    #[serde(deserialize_with = "lenient_text")]
    pub injury_type: String,
    #[serde(deserialize_with = "lenient_text")]
    pub injured_part: String,
    #[serde(deserialize_with = "lenient_text")]
    pub witnesses: String,
    #[serde(deserialize_with = "lenient_text")]
    pub immediate_action: String,
    #[serde(deserialize_with = "lenient_text")]
    pub root_cause: String,
    #[serde(deserialize_with = "lenient_text")]
    pub corrective_action: String,
    #[serde(deserialize_with = "lenient_text")]
    pub preventive_action: String,
    #[serde(deserialize_with = "lenient_text")]
    pub investigator: String,
    #[serde(deserialize_with = "lenient_text")]
    pub supervisor: String,
    #[serde(
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// Strings as-is, numbers and booleans as their text, anything else empty.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

/// RFC 3339 text or epoch milliseconds; anything else is `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    })
}

impl Report {
    pub fn report_day(&self) -> Option<NaiveDate> {
        parse_date(&self.report_date)
    }

    pub fn accident_at(&self) -> Option<NaiveDateTime> {
        parse_datetime(&self.accident_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case_with_missing_fields() {
        let json = r#"{
            "reportNumber": "LAP-20240101-1000",
            "companyName": "PT Maju",
            "reportDate": "2024-01-01",
            "createdAt": "2024-01-01T08:00:00.000Z"
        }"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.report_number, "LAP-20240101-1000");
        assert_eq!(report.company_name, "PT Maju");
        assert!(report.location.is_empty());
        assert_eq!(report.report_day(), NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn test_serialize_uses_camel_case_keys() {
        let report = Report {
            injured_person: "Budi".to_string(),
            created_at: DateTime::from_timestamp(0, 0),
            ..Report::default()
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["injuredPerson"], "Budi");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("injured_person").is_none());
    }

    #[test]
    fn test_null_and_odd_field_shapes_do_not_reject_record() {
        let json = r#"{
            "reportNumber": 1042,
            "witnesses": null,
            "location": ["Gudang"],
            "createdAt": ""
        }"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.report_number, "1042");
        assert!(report.witnesses.is_empty());
        assert!(report.location.is_empty());
        assert_eq!(report.created_at, None);
    }

    #[test]
    fn test_created_at_accepts_rfc3339_and_epoch_millis() {
        let iso: Report = serde_json::from_str(r#"{"createdAt": "2024-01-01T08:00:00.000Z"}"#).unwrap();
        let millis: Report = serde_json::from_str(r#"{"createdAt": 1704096000000}"#).unwrap();
        assert!(iso.created_at.is_some());
        assert_eq!(iso.created_at, millis.created_at);
    }

    #[test]
    fn test_missing_created_at_is_not_serialized() {
        let value = serde_json::to_value(Report::default()).unwrap();
        assert!(value.get("createdAt").is_none());
    }

    #[test]
    fn test_unparsable_dates_are_none() {
        let report = Report {
            report_date: "minggu lalu".to_string(),
            accident_date: String::new(),
            ..Report::default()
        };
        assert!(report.report_day().is_none());
        assert!(report.accident_at().is_none());
    }
}
