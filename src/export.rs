//! Layout-free document model for a single report. Both the PDF renderer and
//! the terminal detail view consume it.

use chrono::NaiveDateTime;

use crate::fmt::{date, datetime, local_datetime, or_dash, or_default};
use crate::models::Report;

pub const HEADING: &str = "LAPORAN INVESTIGASI KECELAKAAN KERJA";

const NO_DESCRIPTION: &str = "Tidak ada deskripsi";
const NO_WITNESS: &str = "Tidak ada saksi";
const NO_ACTION: &str = "Tidak ada tindakan";
const UNKNOWN_CAUSE: &str = "Tidak diketahui";

/// A titled block of pre-formatted lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSection {
    pub title: String,
    pub rows: Vec<(String, String)>,
}

impl DocumentSection {
    fn new(title: &str, rows: &[(&str, String)]) -> Self {
        Self {
            title: title.to_string(),
            rows: rows
                .iter()
                .map(|(label, value)| (label.to_string(), value.clone()))
                .collect(),
        }
    }

    /// Rows as `label : value` lines with the colons aligned.
    pub fn lines(&self) -> Vec<String> {
        let width = self
            .rows
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        self.rows
            .iter()
            .map(|(label, value)| format!("{label:<width$} : {value}"))
            .collect()
    }

    pub fn body(&self) -> String {
        self.lines().join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub role: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    /// Document title, also used as the PDF title.
    pub title: String,
    pub heading: String,
    pub company_line: String,
    pub sections: Vec<DocumentSection>,
    pub signatures: Vec<Signature>,
    pub footer: String,
    pub file_name: String,
}

pub fn file_name(report: &Report) -> String {
    format!("Laporan_{}.pdf", or_default(&report.report_number, "new"))
}

/// Build the export document for `report`, stamped with `generated_at`.
pub fn build_document(report: &Report, generated_at: NaiveDateTime) -> ReportDocument {
    let sections = vec![
        DocumentSection::new(
            "Informasi Laporan",
            &[
                ("Nomor Laporan", or_dash(&report.report_number).to_string()),
                ("Tanggal Laporan", date(&report.report_date)),
            ],
        ),
        DocumentSection::new(
            "Informasi Kejadian",
            &[
                ("Tanggal Kejadian", datetime(&report.accident_date)),
                ("Lokasi", or_dash(&report.location).to_string()),
                ("Departemen", or_dash(&report.department).to_string()),
                ("Jenis Kecelakaan", or_dash(&report.accident_type).to_string()),
                (
                    "Deskripsi Kejadian",
                    or_default(&report.accident_desc, NO_DESCRIPTION).to_string(),
                ),
            ],
        ),
        DocumentSection::new(
            "Informasi Korban",
            &[
                ("Nama Korban", or_dash(&report.injured_person).to_string()),
                ("Jenis Cedera", or_dash(&report.injury_type).to_string()),
                ("Bagian yang Terluka", or_dash(&report.injured_part).to_string()),
                ("Saksi", or_default(&report.witnesses, NO_WITNESS).to_string()),
            ],
        ),
        DocumentSection::new(
            "Hasil Investigasi",
            &[
                (
                    "Tindakan Segera",
                    or_default(&report.immediate_action, NO_ACTION).to_string(),
                ),
                ("Penyebab Utama", or_default(&report.root_cause, UNKNOWN_CAUSE).to_string()),
                (
                    "Tindakan Korektif",
                    or_default(&report.corrective_action, NO_ACTION).to_string(),
                ),
                (
                    "Tindakan Pencegahan",
                    or_default(&report.preventive_action, NO_ACTION).to_string(),
                ),
            ],
        ),
        DocumentSection::new(
            "Penanggung Jawab",
            &[
                ("Investigator", or_dash(&report.investigator).to_string()),
                ("Atasan", or_dash(&report.supervisor).to_string()),
            ],
        ),
    ];

    ReportDocument {
        title: format!(
            "Laporan Kecelakaan - {}",
            or_default(&report.report_number, "No Number")
        ),
        heading: HEADING.to_string(),
        company_line: format!(
            "Perusahaan: {}",
            or_default(&report.company_name, "[Nama Perusahaan]")
        ),
        sections,
        signatures: vec![
            Signature {
                role: "Investigator".to_string(),
                name: or_dash(&report.investigator).to_string(),
            },
            Signature {
                role: "Atasan".to_string(),
                name: or_dash(&report.supervisor).to_string(),
            },
        ],
        footer: format!(
            "Dokumen ini di download pada: {}",
            local_datetime(&generated_at)
        ),
        file_name: file_name(report),
    }
}
