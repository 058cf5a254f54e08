use std::path::{Path, PathBuf};

use chrono::Local;

use crate::cli::report::find_or_notify;
use crate::error::Result;
use crate::export::build_document;
use crate::notify::{ConsoleNotifier, Notice, Notifier};
use crate::pdf::render_report;
use crate::settings::get_data_dir;

fn default_path(file_name: &str) -> PathBuf {
    get_data_dir().join("exports").join(file_name)
}

fn write_pdf(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    println!("Wrote {}", path.display());
    Ok(())
}

pub fn run(report_number: &str, output: Option<String>) -> Result<()> {
    let report = find_or_notify(report_number)?;
    let doc = build_document(&report, Local::now().naive_local());
    let bytes = match render_report(&doc) {
        Ok(bytes) => bytes,
        Err(e) => {
            ConsoleNotifier.notify(Notice::error(format!("Gagal menghasilkan PDF: {e}")));
            return Err(e);
        }
    };
    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_path(&doc.file_name));
    write_pdf(&bytes, &path)?;
    tracing::info!(report_number, path = %path.display(), "report exported");
    Ok(())
}
