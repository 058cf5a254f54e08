use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};

use crate::models::Report;

/// Accident types counted as serious on the dashboard (compared lowercase).
pub const SEVERE_ACCIDENT_TYPES: [&str; 4] =
    ["tersengat listrik", "terbakar", "tertimpa", "tersangkut mesin"];

/// Fallback chart label for reports without an accident type.
pub const UNKNOWN_TYPE: &str = "Lainnya";
/// Fallback chart label for reports without a department.
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

/// Chart filter; `None` (or an empty string) matches everything.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub year: Option<i32>,
    pub department: Option<String>,
    pub accident_type: Option<String>,
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl ReportFilter {
    pub fn matches(&self, report: &Report) -> bool {
        if let Some(year) = self.year {
            match report.report_day() {
                Some(day) if day.year() == year => {}
                _ => return false,
            }
        }
        if let Some(dept) = active(&self.department) {
            if !eq_ignore_case(&report.department, dept) {
                return false;
            }
        }
        if let Some(kind) = active(&self.accident_type) {
            if !eq_ignore_case(&report.accident_type, kind) {
                return false;
            }
        }
        true
    }
}

pub fn by_year_department_type(reports: &[Report], filter: &ReportFilter) -> Vec<Report> {
    reports.iter().filter(|r| filter.matches(r)).cloned().collect()
}

/// Report counts per calendar month of `report_date`, January first.
/// Unparsable dates are skipped.
pub fn monthly_histogram(reports: &[Report]) -> [usize; 12] {
    let mut buckets = [0usize; 12];
    for day in reports.iter().filter_map(Report::report_day) {
        buckets[day.month0() as usize] += 1;
    }
    buckets
}

/// Count reports per label, largest count first. Ties keep first-seen order.
pub fn count_by_key<F>(reports: &[Report], key: F, default_label: &str) -> Vec<(String, usize)>
where
    F: Fn(&Report) -> &str,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    for report in reports {
        let label = match key(report) {
            "" => default_label,
            value => value,
        };
        match counts.iter_mut().find(|(l, _)| l.as_str() == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label.to_string(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Departments present in `reports`, deduplicated ignoring case (the first
/// spelling seen wins) and sorted alphabetically ignoring case.
pub fn distinct_departments(reports: &[Report]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for dept in reports.iter().map(|r| r.department.trim()).filter(|d| !d.is_empty()) {
        if !seen.iter().any(|s| eq_ignore_case(s, dept)) {
            seen.push(dept.to_string());
        }
    }
    seen.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    seen
}

/// Reports dated in the same calendar month and year as `reference`.
pub fn monthly_count(reports: &[Report], reference: NaiveDate) -> usize {
    reports
        .iter()
        .filter_map(Report::report_day)
        .filter(|d| d.year() == reference.year() && d.month() == reference.month())
        .count()
}

pub fn is_severe(report: &Report) -> bool {
    let kind = report.accident_type.to_lowercase();
    SEVERE_ACCIDENT_TYPES.iter().any(|severe| *severe == kind)
}

pub fn severe_count(reports: &[Report]) -> usize {
    reports.iter().filter(|r| is_severe(r)).count()
}

/// Case-insensitive substring search over report number, location, injured
/// person, accident type and company name. A blank term matches everything.
pub fn search(reports: &[Report], term: &str) -> Vec<Report> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return reports.to_vec();
    }
    reports
        .iter()
        .filter(|r| {
            [
                &r.report_number,
                &r.location,
                &r.injured_person,
                &r.accident_type,
                &r.company_name,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

fn by_report_date_desc(a: &Report, b: &Report) -> Ordering {
    match (a.report_day(), b.report_day()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Table order: newest `report_date` first, unparsable dates last.
pub fn sorted_by_report_date(reports: &[Report]) -> Vec<Report> {
    let mut sorted = reports.to_vec();
    sorted.sort_by(by_report_date_desc);
    sorted
}

pub fn recent(reports: &[Report], limit: usize) -> Vec<Report> {
    let mut sorted = sorted_by_report_date(reports);
    sorted.truncate(limit);
    sorted
}

/// Dashboard counters plus the most recent reports.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub total: usize,
    pub this_month: usize,
    pub severe: usize,
    pub recent: Vec<Report>,
}

pub const RECENT_LIMIT: usize = 5;

impl DashboardSummary {
    pub fn compute(reports: &[Report], today: NaiveDate) -> Self {
        Self {
            total: reports.len(),
            this_month: monthly_count(reports, today),
            severe: severe_count(reports),
            recent: recent(reports, RECENT_LIMIT),
        }
    }
}

/// The three chart datasets for one (already filtered) collection.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub monthly: [usize; 12],
    pub types: Vec<(String, usize)>,
    pub departments: Vec<(String, usize)>,
}

impl ChartData {
    pub fn compute(reports: &[Report]) -> Self {
        Self {
            monthly: monthly_histogram(reports),
            types: count_by_key(reports, |r| r.accident_type.as_str(), UNKNOWN_TYPE),
            departments: count_by_key(reports, |r| r.department.as_str(), UNKNOWN_DEPARTMENT),
        }
    }
}
