use chrono::Local;
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::open_store;
use crate::error::Result;
use crate::fmt::{datetime, or_dash};
use crate::query::DashboardSummary;

fn format_summary(summary: &DashboardSummary) -> String {
    let mut out = vec![
        format!("{}", "Dashboard".bold()),
        format!("Total laporan        : {}", summary.total),
        format!("Laporan bulan ini    : {}", summary.this_month),
        format!("Kecelakaan serius    : {}", summary.severe.to_string().red()),
        String::new(),
        format!("{}", "Laporan terbaru".bold()),
    ];

    if summary.recent.is_empty() {
        out.push("Tidak ada laporan".to_string());
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Korban", "Departemen", "Tanggal Kejadian"]);
        for r in &summary.recent {
            table.add_row(vec![
                Cell::new(or_dash(&r.injured_person)),
                Cell::new(or_dash(&r.department)),
                Cell::new(datetime(&r.accident_date)),
            ]);
        }
        out.push(table.to_string());
    }
    out.join("\n")
}

pub fn run() -> Result<()> {
    let store = open_store()?;
    let reports = store.list_all();
    let summary = DashboardSummary::compute(&reports, Local::now().date_naive());
    println!("{}", format_summary(&summary));
    Ok(())
}
