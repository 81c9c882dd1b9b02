mod chart;
mod config;
mod db;
mod error;
mod export;
mod filter;
mod logging;
mod models;
mod run;
mod store;
mod ui;
mod view;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spendboard", version, about = "Local-first personal expense dashboard")]
struct Cli {
    /// SQLite database file (overrides config)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Config file (default: config.toml in the data directory)
    #[arg(long, global = true, env = "SPENDBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Run a single command instead of the dashboard
    #[command(subcommand)]
    command: Option<run::CliCommand>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = config::data_dir()?;
    let mut app_config = config::AppConfig::load(cli.config.as_deref(), &data_dir)?;
    if let Some(db) = cli.db {
        app_config.db_path = Some(db);
    }
    logging::init(&data_dir, &app_config.log_level)?;

    let db_path = app_config.db_path(&data_dir);
    let db = db::Database::open(&db_path)?;
    tracing::info!(
        db = %db_path.display(),
        expenses = db.get_expense_count()?,
        "starting spendboard"
    );
    let store = store::ExpenseStore::new(db);

    match cli.command {
        None => run::as_tui(store, &app_config),
        Some(command) => run::as_cli(command, store, &app_config),
    }
}
