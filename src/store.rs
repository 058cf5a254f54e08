use std::fmt::Display;

use tracing::{debug, error, info, warn};

use crate::db::KeyValueStore;
use crate::error::{LaporError, Result};
use crate::form::{missing_fields, validate};
use crate::models::Report;
use crate::notify::{Notice, Notifier};

/// The single key under which the whole report collection is stored.
pub const STORAGE_KEY: &str = "accidentReports";

/// Report persistence over a key-value medium.
///
/// The collection is the unit of storage: every mutation reads the full
/// list, changes it and writes it back. There is no locking, so two
/// processes mutating the same medium can overwrite each other.
pub struct ReportStore<K: KeyValueStore> {
    kv: K,
    notifier: Box<dyn Notifier>,
}

impl<K: KeyValueStore> ReportStore<K> {
    pub fn new(kv: K, notifier: Box<dyn Notifier>) -> Self {
        Self { kv, notifier }
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// Write an empty collection if nothing is stored yet.
    pub fn init(&self) -> Result<()> {
        let outcome = match self.kv.get(STORAGE_KEY) {
            Ok(Some(_)) => Ok(()),
            Ok(None) => self.kv.set(STORAGE_KEY, "[]"),
            Err(e) => Err(e),
        };
        if let Err(e) = &outcome {
            error!(error = %e, "storage initialization failed");
            self.notifier
                .notify(Notice::error("Gagal menginisialisasi penyimpanan lokal"));
        }
        outcome
    }

    /// Strict read: a stored value that is not a JSON array and an
    /// unreachable medium are errors. Array elements that are not objects
    /// are skipped; odd field values inside a record are tolerated.
    pub fn load(&self) -> Result<Vec<Report>> {
        let raw = match self.kv.get(STORAGE_KEY)? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };
        let records: Vec<serde_json::Value> = serde_json::from_str(&raw)
            .map_err(|e| LaporError::StorageCorrupt(e.to_string()))?;
        let mut reports = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<Report>(record) {
                Ok(report) => reports.push(report),
                Err(e) => warn!(index, error = %e, "skipping unreadable report record"),
            }
        }
        // None sorts below any timestamp, so undated records come last.
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }

    /// All reports, newest `created_at` first. Any read failure yields an
    /// empty collection plus a notice.
    pub fn list_all(&self) -> Vec<Report> {
        match self.load() {
            Ok(reports) => reports,
            Err(e) => {
                warn!(error = %e, "reading reports failed; using empty collection");
                self.notifier.notify(Notice::error("Gagal memuat data laporan"));
                Vec::new()
            }
        }
    }

    /// Prepend `candidate` and persist the whole collection.
    ///
    /// Incomplete candidates and numbers already in use are refused. A
    /// corrupt stored value is discarded and replaced.
    pub fn create(&self, candidate: Report) -> Result<Report> {
        let outcome = self.try_create(candidate);
        if let Err(e) = &outcome {
            error!(error = %e, "saving report failed");
            self.notifier.notify(Notice::error("Gagal menyimpan laporan"));
        }
        outcome
    }

    fn try_create(&self, candidate: Report) -> Result<Report> {
        if !validate(&candidate) {
            return Err(LaporError::ValidationFailed(missing_fields(&candidate)));
        }
        let mut reports = self.load_for_write()?;
        if !candidate.report_number.is_empty()
            && reports.iter().any(|r| r.report_number == candidate.report_number)
        {
            return Err(LaporError::DuplicateReportNumber(candidate.report_number));
        }
        reports.insert(0, candidate.clone());
        self.persist(&reports)?;
        info!(report_number = %candidate.report_number, total = reports.len(), "report saved");
        Ok(candidate)
    }

    /// Remove every report carrying `report_number`. Returns whether the
    /// write completed, not whether anything matched.
    pub fn delete(&self, report_number: &str) -> bool {
        if report_number.is_empty() {
            return false;
        }
        let outcome = self.load_for_write().and_then(|reports| {
            let before = reports.len();
            let remaining: Vec<Report> = reports
                .into_iter()
                .filter(|r| r.report_number != report_number)
                .collect();
            self.persist(&remaining)?;
            Ok(before - remaining.len())
        });
        match outcome {
            Ok(removed) => {
                info!(report_number, removed, "reports deleted");
                true
            }
            Err(e) => {
                error!(error = %e, report_number, "deleting report failed");
                self.notifier.notify(Notice::error("Gagal menghapus laporan"));
                false
            }
        }
    }

    /// First report (newest first) with the given number.
    pub fn find(&self, report_number: &str) -> Option<Report> {
        self.list_all()
            .into_iter()
            .find(|r| r.report_number == report_number)
    }

    pub fn filter<F>(&self, mut predicate: F) -> Vec<Report>
    where
        F: FnMut(&Report) -> bool,
    {
        self.list_all().into_iter().filter(|r| predicate(r)).collect()
    }

    /// Like [`filter`](Self::filter), but a predicate error only excludes the
    /// record it was raised for.
    pub fn try_filter<F, E>(&self, mut predicate: F) -> Vec<Report>
    where
        F: FnMut(&Report) -> std::result::Result<bool, E>,
        E: Display,
    {
        self.list_all()
            .into_iter()
            .filter(|r| match predicate(r) {
                Ok(keep) => keep,
                Err(e) => {
                    debug!(report_number = %r.report_number, error = %e, "predicate failed; record excluded");
                    false
                }
            })
            .collect()
    }

    fn load_for_write(&self) -> Result<Vec<Report>> {
        match self.load() {
            Err(LaporError::StorageCorrupt(reason)) => {
                warn!(%reason, "stored reports are corrupt and will be replaced");
                self.notifier.notify(Notice::warning("Data laporan rusak dan akan ditimpa"));
                Ok(Vec::new())
            }
            other => other,
        }
    }

    fn persist(&self, reports: &[Report]) -> Result<()> {
        let json = serde_json::to_string(reports)?;
        self.kv.set(STORAGE_KEY, &json)
    }
}
