use std::io::{BufRead, Write};

use chrono::{Local, NaiveDateTime, Utc};
use clap::Args;
use colored::Colorize;
use comfy_table::{Cell, Table};
use rand::Rng;

use crate::cli::open_store;
use crate::error::{LaporError, Result};
use crate::export::{build_document, ReportDocument};
use crate::fmt::{date, or_dash};
use crate::form::{generate_report_number, is_well_formed_report_number, ReportForm};
use crate::master_data::MasterData;
use crate::models::Report;
use crate::notify::{ConsoleNotifier, Notice, Notifier};
use crate::query::{search as search_reports, sorted_by_report_date};
use crate::settings::load_settings;

/// Report fields as command-line flags. Flags override values read from
/// `--from-file`.
#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// JSON file with camelCase report fields
    #[arg(long = "from-file")]
    pub from_file: Option<String>,
    /// Report number (default: generated LAP-YYYYMMDD-NNNN)
    #[arg(long)]
    pub number: Option<String>,
    /// Company name (default: from settings)
    #[arg(long)]
    pub company: Option<String>,
    /// Report date, YYYY-MM-DD (default: today)
    #[arg(long = "report-date")]
    pub report_date: Option<String>,
    /// Accident date and time, YYYY-MM-DDTHH:MM (default: now)
    #[arg(long = "accident-date")]
    pub accident_date: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    /// Accident type, see `lapor options`
    #[arg(long = "type")]
    pub accident_type: Option<String>,
    /// What happened
    #[arg(long)]
    pub description: Option<String>,
    /// Name of the injured person
    #[arg(long)]
    pub injured: Option<String>,
    /// Injury type, see `lapor options`
    #[arg(long)]
    pub injury: Option<String>,
    /// Injured body part, see `lapor options`
    #[arg(long = "body-part")]
    pub body_part: Option<String>,
    #[arg(long)]
    pub witnesses: Option<String>,
    #[arg(long = "immediate-action")]
    pub immediate_action: Option<String>,
    #[arg(long = "root-cause")]
    pub root_cause: Option<String>,
    #[arg(long = "corrective-action")]
    pub corrective_action: Option<String>,
    #[arg(long = "preventive-action")]
    pub preventive_action: Option<String>,
    #[arg(long)]
    pub investigator: Option<String>,
    #[arg(long)]
    pub supervisor: Option<String>,
}

impl ReportArgs {
    /// Overwrite `form` fields with every flag that was given.
    fn apply_to(self, form: &mut ReportForm) {
        let pairs = [
            (self.number, &mut form.report_number),
            (self.company, &mut form.company_name),
            (self.report_date, &mut form.report_date),
            (self.accident_date, &mut form.accident_date),
            (self.location, &mut form.location),
            (self.department, &mut form.department),
            (self.accident_type, &mut form.accident_type),
            (self.description, &mut form.accident_desc),
            (self.injured, &mut form.injured_person),
            (self.injury, &mut form.injury_type),
            (self.body_part, &mut form.injured_part),
            (self.witnesses, &mut form.witnesses),
            (self.immediate_action, &mut form.immediate_action),
            (self.root_cause, &mut form.root_cause),
            (self.corrective_action, &mut form.corrective_action),
            (self.preventive_action, &mut form.preventive_action),
            (self.investigator, &mut form.investigator),
            (self.supervisor, &mut form.supervisor),
        ];
        for (flag, field) in pairs {
            if let Some(value) = flag {
                *field = value;
            }
        }
    }
}

fn read_form(path: &str) -> Result<ReportForm> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Fill blank fields the way a fresh form is prefilled.
fn fill_defaults<R: Rng + ?Sized>(
    form: &mut ReportForm,
    company_name: &str,
    now: NaiveDateTime,
    rng: &mut R,
) {
    if form.report_number.trim().is_empty() {
        form.report_number = generate_report_number(now.date(), rng);
    }
    if form.report_date.trim().is_empty() {
        form.report_date = now.format("%Y-%m-%d").to_string();
    }
    if form.accident_date.trim().is_empty() {
        form.accident_date = now.format("%Y-%m-%dT%H:%M").to_string();
    }
    if form.company_name.trim().is_empty() {
        form.company_name = company_name.to_string();
    }
}

/// Values outside the reference lists are allowed but worth a warning.
fn advisories(report: &Report, master: &MasterData) -> Vec<String> {
    let mut out = Vec::new();
    if !is_well_formed_report_number(&report.report_number) {
        out.push(format!(
            "Nomor laporan tidak sesuai format LAP-YYYYMMDD-NNNN: {}",
            report.report_number
        ));
    }
    if report.report_day().is_none() {
        out.push(format!("Tanggal laporan tidak dapat dibaca: {}", report.report_date));
    }
    match (report.accident_at(), report.report_day()) {
        (None, _) => out.push(format!(
            "Tanggal kejadian tidak dapat dibaca: {}",
            report.accident_date
        )),
        (Some(at), Some(day)) if at.date() > day => {
            out.push("Tanggal kejadian setelah tanggal laporan".to_string())
        }
        _ => {}
    }
    let checks = [
        ("Jenis kecelakaan", &master.accident_types, &report.accident_type),
        ("Jenis cedera", &master.injury_types, &report.injury_type),
        ("Bagian tubuh", &master.body_parts, &report.injured_part),
    ];
    for (label, list, value) in checks {
        if !value.is_empty() && !MasterData::contains(list, value) {
            out.push(format!("{label} tidak ada di daftar referensi: {value}"));
        }
    }
    out
}

pub fn new(args: ReportArgs, master: &MasterData) -> Result<()> {
    let mut form = match &args.from_file {
        Some(path) => read_form(path)?,
        None => ReportForm::default(),
    };
    args.apply_to(&mut form);
    let settings = load_settings();
    fill_defaults(
        &mut form,
        &settings.company_name,
        Local::now().naive_local(),
        &mut rand::thread_rng(),
    );

    let notifier = ConsoleNotifier;
    let report = match form.build(Utc::now()) {
        Ok(report) => report,
        Err(e) => {
            notifier.notify(Notice::error("Mohon lengkapi semua field yang wajib diisi!"));
            return Err(e);
        }
    };
    for advisory in advisories(&report, master) {
        notifier.notify(Notice::warning(advisory));
    }

    let store = open_store()?;
    let saved = store.create(report)?;
    notifier.notify(Notice::success("Laporan berhasil disimpan!"));
    println!("{}", saved.report_number);
    Ok(())
}

fn format_table(reports: &[Report]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Nomor Laporan", "Tanggal", "Jenis Kecelakaan", "Korban", "Departemen"]);
    for r in reports {
        table.add_row(vec![
            Cell::new(or_dash(&r.report_number)),
            Cell::new(date(&r.report_date)),
            Cell::new(or_dash(&r.accident_type)),
            Cell::new(or_dash(&r.injured_person)),
            Cell::new(or_dash(&r.department)),
        ]);
    }
    table.to_string()
}

pub fn list() -> Result<()> {
    let store = open_store()?;
    let reports = sorted_by_report_date(&store.list_all());
    if reports.is_empty() {
        println!("Tidak ada laporan");
    } else {
        println!("{}", format_table(&reports));
    }
    Ok(())
}

pub fn search(term: &str) -> Result<()> {
    let store = open_store()?;
    let found = sorted_by_report_date(&search_reports(&store.list_all(), term));
    if found.is_empty() {
        println!("Tidak ditemukan laporan");
    } else {
        println!("{}", format_table(&found));
    }
    Ok(())
}

/// Plain-text rendering of the export document.
fn format_document(doc: &ReportDocument) -> String {
    let mut out = Vec::new();
    out.push(format!("{}", doc.heading.bold()));
    out.push(doc.company_line.clone());
    for section in &doc.sections {
        out.push(String::new());
        out.push(format!("{}", section.title.bold().underline()));
        out.push(section.body());
    }
    out.join("\n")
}

pub(crate) fn find_or_notify(report_number: &str) -> Result<Report> {
    let store = open_store()?;
    store.find(report_number).ok_or_else(|| {
        ConsoleNotifier.notify(Notice::error("Laporan tidak ditemukan!"));
        LaporError::NotFound(report_number.to_string())
    })
}

pub fn view(report_number: &str) -> Result<()> {
    let report = find_or_notify(report_number)?;
    let doc = build_document(&report, Local::now().naive_local());
    println!("{}", format_document(&doc));
    Ok(())
}

fn confirmed(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "ya" | "yes")
}

pub fn delete(report_number: &str, yes: bool) -> Result<()> {
    let store = open_store()?;
    if store.find(report_number).is_none() {
        ConsoleNotifier.notify(Notice::error("Laporan tidak ditemukan!"));
        return Err(LaporError::NotFound(report_number.to_string()));
    }
    if !yes {
        print!("Apakah Anda yakin ingin menghapus laporan ini? [y/N] ");
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        if !confirmed(&answer) {
            ConsoleNotifier.notify(Notice::info("Penghapusan dibatalkan"));
            return Ok(());
        }
    }
    if !store.delete(report_number) {
        return Err(LaporError::Other(format!("could not delete {report_number}")));
    }
    ConsoleNotifier.notify(Notice::success("Laporan berhasil dihapus"));
    Ok(())
}
