use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Timelike};

/// Short Indonesian month names, indexed from January.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Ags", "Sep", "Okt", "Nov", "Des",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a stored timestamp. Accepts RFC 3339 (converted to local time),
/// `datetime-local` style values with or without seconds, and bare dates
/// (midnight).
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse a stored calendar date. Timestamps are reduced to their date part.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_datetime(trimmed).map(|dt| dt.date()))
}

/// Indonesian short date (`d/m/yyyy`). Unparsable values are returned as-is.
pub fn date(value: &str) -> String {
    if value.trim().is_empty() {
        return "-".to_string();
    }
    match parse_date(value) {
        Some(d) => format!("{}/{}/{}", d.day(), d.month(), d.year()),
        None => value.to_string(),
    }
}

/// Indonesian date and time (`d/m/yyyy, HH.MM.SS`). Unparsable values are
/// returned as-is.
pub fn datetime(value: &str) -> String {
    if value.trim().is_empty() {
        return "-".to_string();
    }
    match parse_datetime(value) {
        Some(dt) => local_datetime(&dt),
        None => value.to_string(),
    }
}

pub fn local_datetime(dt: &NaiveDateTime) -> String {
    format!(
        "{}/{}/{}, {:02}.{:02}.{:02}",
        dt.day(),
        dt.month(),
        dt.year(),
        dt.hour(),
        dt.minute(),
        dt.second()
    )
}

/// Format a byte count as a human-readable size.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Empty values render as a placeholder.
pub fn or_dash(value: &str) -> &str {
    or_default(value, "-")
}

pub fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
