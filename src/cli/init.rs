use std::path::PathBuf;

use crate::db::{SqliteKv, DB_FILE};
use crate::error::Result;
use crate::notify::ConsoleNotifier;
use crate::settings::{load_settings, save_settings, shellexpand_path};
use crate::store::ReportStore;

pub fn run(data_dir: Option<String>, company: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    if let Some(name) = company {
        settings.company_name = name.trim().to_string();
    }

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)?;
    std::fs::create_dir_all(resolved.join("exports"))?;

    let store = ReportStore::new(
        SqliteKv::open(&resolved.join(DB_FILE))?,
        Box::new(ConsoleNotifier),
    );
    store.init()?;

    save_settings(&settings)?;
    tracing::info!(data_dir = %resolved.display(), "storage initialized");
    println!("Initialized lapor at {}", resolved.display());
    if !settings.company_name.is_empty() {
        println!("Company:    {}", settings.company_name);
    }
    Ok(())
}
