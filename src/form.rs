use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use regex::Regex;
use serde::Deserialize;

use crate::error::{LaporError, Result};
use crate::models::Report;

/// Field names (storage spelling) that must be non-empty before a report is
/// persisted.
pub const REQUIRED_FIELDS: [&str; 10] = [
    "companyName",
    "accidentType",
    "accidentDesc",
    "injuredPerson",
    "injuryType",
    "injuredPart",
    "immediateAction",
    "rootCause",
    "correctiveAction",
    "preventiveAction",
];

/// Raw input for one report, one field per form control.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportForm {
    pub report_number: String,
    pub company_name: String,
    pub report_date: String,
    pub accident_date: String,
    pub location: String,
    pub department: String,
    pub accident_type: String,
    pub accident_desc: String,
    pub injured_person: String,
    pub injury_type: String,
    pub injured_part: String,
    pub witnesses: String,
    pub immediate_action: String,
    pub root_cause: String,
    pub corrective_action: String,
    pub preventive_action: String,
    pub investigator: String,
    pub supervisor: String,
}

impl ReportForm {
    /// Trim every input and stamp the creation time. The report number is
    /// taken as given.
    pub fn collect(&self, now: DateTime<Utc>) -> Report {
        let t = |s: &String| s.trim().to_string();
        Report {
            report_number: t(&self.report_number),
            company_name: t(&self.company_name),
            report_date: t(&self.report_date),
            accident_date: t(&self.accident_date),
            location: t(&self.location),
            department: t(&self.department),
            accident_type: t(&self.accident_type),
            accident_desc: t(&self.accident_desc),
            injured_person: t(&self.injured_person),
            injury_type: t(&self.injury_type),
            injured_part: t(&self.injured_part),
            witnesses: t(&self.witnesses),
            immediate_action: t(&self.immediate_action),
            root_cause: t(&self.root_cause),
            corrective_action: t(&self.corrective_action),
            preventive_action: t(&self.preventive_action),
            investigator: t(&self.investigator),
            supervisor: t(&self.supervisor),
            created_at: Some(now),
        }
    }

    /// Collect and validate in one step.
    pub fn build(&self, now: DateTime<Utc>) -> Result<Report> {
        let report = self.collect(now);
        let missing = missing_fields(&report);
        if missing.is_empty() {
            Ok(report)
        } else {
            Err(LaporError::ValidationFailed(missing))
        }
    }
}

/// Values of the required fields, in `REQUIRED_FIELDS` order.
fn required_values(report: &Report) -> [&str; 10] {
    [
        report.company_name.as_str(),
        report.accident_type.as_str(),
        report.accident_desc.as_str(),
        report.injured_person.as_str(),
        report.injury_type.as_str(),
        report.injured_part.as_str(),
        report.immediate_action.as_str(),
        report.root_cause.as_str(),
        report.corrective_action.as_str(),
        report.preventive_action.as_str(),
    ]
}

/// Required fields that are empty, in declaration order.
pub fn missing_fields(report: &Report) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .into_iter()
        .zip(required_values(report))
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
}

/// Presence check only: no format, range or enumeration checks.
pub fn validate(report: &Report) -> bool {
    missing_fields(report).is_empty()
}

/// `LAP-<YYYYMMDD>-<NNNN>` with NNNN drawn from 1000..=9999.
pub fn generate_report_number<R: Rng + ?Sized>(date: NaiveDate, rng: &mut R) -> String {
    let suffix: u32 = rng.gen_range(1000..=9999);
    format!("LAP-{}-{suffix}", date.format("%Y%m%d"))
}

pub fn is_well_formed_report_number(number: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^LAP-\d{8}-\d{4}$").expect("static pattern"))
        .is_match(number)
}
