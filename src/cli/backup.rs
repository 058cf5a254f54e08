use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use rusqlite::backup::Backup;

use crate::cli::open_store;
use crate::db::SqliteKv;
use crate::error::{LaporError, Result};
use crate::fmt::format_bytes;
use crate::notify::ConsoleNotifier;
use crate::settings::get_data_dir;
use crate::store::ReportStore;

fn default_path(extension: &str) -> Result<PathBuf> {
    let backups_dir = get_data_dir().join("backups");
    std::fs::create_dir_all(&backups_dir)?;
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    Ok(backups_dir.join(format!("lapor-{stamp}.{extension}")))
}

/// Copy the whole database, then reopen the copy and check it holds the
/// same number of reports.
fn copy_database(
    source: &ReportStore<SqliteKv>,
    expected: usize,
    dest: &Path,
) -> Result<usize> {
    {
        let mut dest_conn = rusqlite::Connection::open(dest)?;
        let backup = Backup::new(source.kv().connection(), &mut dest_conn)?;
        backup.run_to_completion(100, Duration::from_millis(10), None)?;
    }
    let copy = ReportStore::new(SqliteKv::open(dest)?, Box::new(ConsoleNotifier));
    let copied = copy.load()?.len();
    if copied != expected {
        return Err(LaporError::Other(format!(
            "backup holds {copied} reports, expected {expected}"
        )));
    }
    Ok(copied)
}

/// The report collection as a pretty-printed JSON array.
fn collection_json(store: &ReportStore<SqliteKv>) -> Result<(String, usize)> {
    let reports = store.load()?;
    Ok((serde_json::to_string_pretty(&reports)?, reports.len()))
}

pub fn run(output: Option<String>, json: bool) -> Result<()> {
    let store = open_store()?;
    // Refuse to back up a collection that does not decode.
    let reports = store.load()?.len();

    let dest = match output {
        Some(p) => PathBuf::from(p),
        None => default_path(if json { "json" } else { "db" })?,
    };

    let count = if json {
        let (text, count) = collection_json(&store)?;
        std::fs::write(&dest, format!("{text}\n"))?;
        count
    } else {
        copy_database(&store, reports, &dest)?
    };

    let size = std::fs::metadata(&dest)?.len();
    tracing::info!(path = %dest.display(), reports = count, size, "backup written");
    println!("Backup saved to {}", dest.display());
    println!("Reports: {count}");
    println!("Size: {}", format_bytes(size));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Report;

    fn store_with(dir: &Path, numbers: &[&str]) -> ReportStore<SqliteKv> {
        let store = ReportStore::new(
            SqliteKv::open(&dir.join("lapor.db")).unwrap(),
            Box::new(ConsoleNotifier),
        );
        store.init().unwrap();
        for number in numbers {
            let report = Report {
                report_number: number.to_string(),
                company_name: "PT Maju Jaya".to_string(),
                accident_type: "Terjatuh".to_string(),
                accident_desc: "Terpeleset".to_string(),
                injured_person: "Sari".to_string(),
                injury_type: "Keseleo".to_string(),
                injured_part: "Kaki".to_string(),
                immediate_action: "Pemberian P3K".to_string(),
                root_cause: "Lantai basah".to_string(),
                corrective_action: "Pasang rambu".to_string(),
                preventive_action: "Jadwal pembersihan".to_string(),
                ..Report::default()
            };
            store.create(report).unwrap();
        }
        store
    }

    #[test]
    fn test_database_copy_holds_same_reports() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with(dir.path(), &["LAP-20240501-1001", "LAP-20240501-1002"]);
        let dest = dir.path().join("copy.db");
        assert_eq!(copy_database(&store, 2, &dest).unwrap(), 2);

        let copy = ReportStore::new(SqliteKv::open(&dest).unwrap(), Box::new(ConsoleNotifier));
        assert!(copy.find("LAP-20240501-1002").is_some());
    }

    #[test]
    fn test_database_copy_count_mismatch_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with(dir.path(), &["LAP-20240501-1001"]);
        let dest = dir.path().join("copy.db");
        assert!(copy_database(&store, 3, &dest).is_err());
    }

    #[test]
    fn test_collection_json_is_camel_case_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with(dir.path(), &["LAP-20240501-1001"]);
        let (text, count) = collection_json(&store).unwrap();
        assert_eq!(count, 1);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["reportNumber"], "LAP-20240501-1001");
    }
}
