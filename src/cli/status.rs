use chrono::{Datelike, Local};

use crate::cli::open_store;
use crate::db::DB_FILE;
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::query::is_severe;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let db_path = data_dir.join(DB_FILE);

    println!("Company:    {}", if settings.company_name.is_empty() { "(not set)" } else { &settings.company_name });
    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let store = open_store()?;
        let total = store.list_all().len();
        let severe = store.filter(is_severe).len();
        let year = Local::now().year();
        let this_year = store
            .try_filter(|r| {
                r.report_day()
                    .map(|d| d.year() == year)
                    .ok_or_else(|| format!("unparsable report date {:?}", r.report_date))
            })
            .len();
        let exports = std::fs::read_dir(data_dir.join("exports"))
            .map(|entries| entries.filter_map(|e| e.ok()).count())
            .unwrap_or(0);

        println!();
        println!("Reports:    {total}");
        println!("This year:  {this_year}");
        println!("Severe:     {severe}");
        println!("Exports:    {exports}");
    } else {
        println!();
        println!("Database not found. Run `lapor init` to set up.");
    }

    Ok(())
}
