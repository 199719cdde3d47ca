//! BiblioDB command-line entry point.
//!
//! # Responsibility
//! - Resolve data and log locations from flags or environment.
//! - Open one catalog session, run a single command, save on change.
//!
//! # Invariants
//! - A rejected operation prints its reason, exits non-zero and saves nothing.

mod commands;

use anyhow::{Context, Result};
use bibliodb_core::{default_log_level, init_logging, CatalogService, CsvCatalogStorage};
use clap::Parser;
use commands::{Command, Outcome};
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// School library catalog over flat CSV files.
#[derive(Parser)]
#[command(name = "bibliodb", version, about = "School library catalog")]
struct Cli {
    /// Directory holding authors.csv, books.csv, students.csv and loans.csv.
    #[arg(
        long,
        env = "BIBLIODB_DATA_DIR",
        default_value = bibliodb_core::DEFAULT_DATA_DIR,
        global = true
    )]
    data_dir: PathBuf,

    /// Directory for rolling log files. Defaults to `<data-dir>/logs`.
    #[arg(long, env = "BIBLIODB_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    /// One of trace|debug|info|warn|error.
    #[arg(long, env = "BIBLIODB_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if matches!(cli.command, Command::Version) {
        println!("bibliodb_core version={}", bibliodb_core::core_version());
        return Ok(ExitCode::SUCCESS);
    }

    let log_dir = match cli.log_dir {
        Some(dir) => absolutize(&dir)?,
        None => absolutize(&cli.data_dir.join("logs"))?,
    };
    let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
    init_logging(level, &log_dir).context("failed to initialize logging")?;

    let storage = CsvCatalogStorage::new(&cli.data_dir);
    let mut service = CatalogService::open(storage)
        .with_context(|| format!("failed to load catalog from `{}`", cli.data_dir.display()))?;
    let skipped = service.load_report().skipped.len();
    if skipped > 0 {
        eprintln!("Warning: skipped {skipped} malformed line(s) while loading");
    }

    if let Outcome::Rejected(err) = commands::execute(&mut service, cli.command)? {
        eprintln!("Error: {err}");
        return Ok(ExitCode::FAILURE);
    }

    if service.save_if_dirty().context("failed to save catalog")? {
        info!(
            "event=session_save module=cli status=ok data_dir={}",
            cli.data_dir.display()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(cwd.join(path))
}
