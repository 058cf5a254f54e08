pub mod backup;
pub mod charts;
pub mod dashboard;
#[cfg(feature = "pdf")]
pub mod export;
pub mod init;
pub mod options;
pub mod report;
pub mod status;

use clap::{Parser, Subcommand};

use crate::db::{SqliteKv, DB_FILE};
use crate::error::{LaporError, Result};
use crate::notify::ConsoleNotifier;
use crate::settings::get_data_dir;
use crate::store::ReportStore;

pub use report::ReportArgs;

/// Open the report store in the configured data directory.
pub(crate) fn open_store() -> Result<ReportStore<SqliteKv>> {
    let data_dir = get_data_dir();
    let db_path = data_dir.join(DB_FILE);
    if !db_path.exists() {
        return Err(LaporError::Settings(format!(
            "No database found at {}\nRun `lapor init` to set up.",
            db_path.display()
        )));
    }
    let store = ReportStore::new(SqliteKv::open(&db_path)?, Box::new(ConsoleNotifier));
    store.init()?;
    Ok(store)
}

/// Terminal width in columns, or 80 when stdout is not a terminal.
pub(crate) fn terminal_width() -> u16 {
    crossterm::terminal::size().map(|(w, _)| w).unwrap_or(80)
}

#[derive(Parser)]
#[command(name = "lapor", about = "Workplace accident reporting and investigation.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up Lapor: choose a data directory and initialize local storage.
    Init {
        /// Path for report data (default: ~/Documents/lapor)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Company name used as the default for new reports
        #[arg(long)]
        company: Option<String>,
    },
    /// File a new accident report.
    New {
        #[command(flatten)]
        args: ReportArgs,
    },
    /// List all reports, newest report date first.
    List,
    /// Search reports by number, location, injured person, accident type or company.
    Search {
        /// Case-insensitive search term
        term: String,
    },
    /// Show one report in full.
    View {
        /// Report number, e.g. LAP-20240101-1234
        report_number: String,
    },
    /// Delete a report.
    Delete {
        /// Report number to delete
        report_number: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Show counters and the most recent reports.
    Dashboard,
    /// Show monthly, type and department charts.
    Charts {
        /// Only reports dated in this year
        #[arg(long)]
        year: Option<i32>,
        /// Only reports from this department
        #[arg(long)]
        department: Option<String>,
        /// Only reports of this accident type
        #[arg(long = "type")]
        accident_type: Option<String>,
    },
    /// Export a report as an investigation PDF.
    #[cfg(feature = "pdf")]
    Export {
        /// Report number to export
        report_number: String,
        /// Output path (default: <data_dir>/exports/Laporan_<number>.pdf)
        #[arg(long)]
        output: Option<String>,
    },
    /// Show the reference lists offered for report fields.
    Options,
    /// Back up the report collection.
    Backup {
        /// Output path (default: <data_dir>/backups/lapor-YYYYMMDD-HHMMSS.db)
        #[arg(long)]
        output: Option<String>,
        /// Write the reports as a JSON array instead of copying the database
        #[arg(long)]
        json: bool,
    },
    /// Show current data directory and summary statistics.
    Status,
}
