mod cli;
mod db;
mod error;
mod export;
mod fmt;
mod form;
mod master_data;
mod models;
mod notify;
#[cfg(feature = "pdf")]
mod pdf;
mod query;
mod settings;
mod store;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};
use master_data::MasterData;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let master = MasterData::default();

    let result = match cli.command {
        Commands::Init { data_dir, company } => cli::init::run(data_dir, company),
        Commands::New { args } => cli::report::new(args, &master),
        Commands::List => cli::report::list(),
        Commands::Search { term } => cli::report::search(&term),
        Commands::View { report_number } => cli::report::view(&report_number),
        Commands::Delete { report_number, yes } => cli::report::delete(&report_number, yes),
        Commands::Dashboard => cli::dashboard::run(),
        Commands::Charts {
            year,
            department,
            accident_type,
        } => cli::charts::run(year, department, accident_type),
        #[cfg(feature = "pdf")]
        Commands::Export {
            report_number,
            output,
        } => cli::export::run(&report_number, output),
        Commands::Options => {
            cli::options::run(&master);
            Ok(())
        }
        Commands::Backup { output, json } => cli::backup::run(output, json),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
