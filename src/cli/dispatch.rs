//! Subcommand dispatch
//!
//! Loads the config, resolves the database path, opens the database in the
//! mode the subcommand needs and runs it. Reports open read-only; only
//! `init` may create a file.

use crate::cli::{resolve_db_path, Args, Command, Error, EXIT_DB_ERROR, EXIT_FAILURE, EXIT_SUCCESS};
use crate::commands::add_actl::{self, AddActlOptions};
use crate::commands::{batch_status, check, dump_batches, init, overview, reset_processed, seed};
use crate::config::{self, ToolConfig};
use crate::database::{self, CoordinatorDb};
use crate::report::OutputFormat;
use chrono::{Local, NaiveDateTime};
use std::io::{self, Write};
use tracing::debug;

/// Exit code wrapper for CLI operations
pub type ExitCode = i32;

/// Run the parsed command against stdout and return the exit code
///
/// Errors go to stderr. A missing database file prints only
/// `Database file not found: <path>`.
pub fn run_cli(args: Args) -> ExitCode {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let now = Local::now().naive_local();

    match run_command(&args, &mut out, now) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let _ = out.flush();
            match not_found(&e) {
                Some(missing) => eprintln!("{}", missing),
                None => eprintln!("Error: {:#}", e),
            }
            exit_code_for(&e)
        }
    }
}

/// Run one subcommand, writing its report to `out`
///
/// `now` anchors every relative track-in time and the future track-in check.
pub fn run_command<W: Write>(args: &Args, out: &mut W, now: NaiveDateTime) -> anyhow::Result<()> {
    let config = ToolConfig::load_or_default(args.config.as_deref())?;
    let db_path = resolve_db_path(args.db.as_deref(), &config);
    debug!(path = %db_path.display(), command = ?args.command, "resolved database");

    if db_path.is_dir() {
        return Err(Error::InvalidArgs(format!(
            "database path '{}' is a directory",
            db_path.display()
        ))
        .into());
    }

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    match &args.command {
        Command::DumpBatches => {
            let db = CoordinatorDb::open_readonly(&db_path)?;
            dump_batches::run(&db, out, format)?;
        }
        Command::Overview => {
            let db = CoordinatorDb::open_readonly(&db_path)?;
            overview::run(&db, out, format)?;
        }
        Command::BatchStatus { batch_id } => {
            let batch_id = batch_id.as_deref().unwrap_or(&config.batch_status.batch_id);
            let db = CoordinatorDb::open_readonly(&db_path)?;
            batch_status::run(&db, batch_id, out, format)?;
        }
        Command::ResetProcessed { keep } => {
            let keep = keep.as_deref().unwrap_or(&config.reset.keep_equipment);
            let mut db = CoordinatorDb::open(&db_path)?;
            reset_processed::run(&mut db, keep, out, format)?;
        }
        Command::Seed => {
            let mut db = CoordinatorDb::open(&db_path)?;
            seed::run(&mut db, now, out, format)?;
        }
        Command::AddActl {
            equipment,
            hours_ago,
            lot_type,
        } => {
            let options = AddActlOptions {
                equipment: equipment
                    .clone()
                    .unwrap_or_else(|| config.add_actl.equipment.clone()),
                hours_ago: hours_ago.unwrap_or(config.add_actl.hours_ago),
                lot_type: lot_type
                    .clone()
                    .unwrap_or_else(|| config.add_actl.lot_type.clone()),
            };
            let mut db = CoordinatorDb::open(&db_path)?;
            add_actl::run(&mut db, &options, now, out, format)?;
        }
        Command::Check => {
            let db = CoordinatorDb::open_readonly(&db_path)?;
            check::run(&db, now, out, format)?;
        }
        Command::Init { baseline } => {
            init::run(&db_path, *baseline, now, out, format)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Map an error to the process exit code
///
/// SQLite failures exit with `EXIT_DB_ERROR`; a missing database file,
/// config and argument problems exit with `EXIT_FAILURE`.
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(db_err) = cause.downcast_ref::<database::Error>() {
            return match db_err {
                database::Error::Sqlite(_) => EXIT_DB_ERROR,
                _ => EXIT_FAILURE,
            };
        }
        if cause.downcast_ref::<rusqlite::Error>().is_some() {
            return EXIT_DB_ERROR;
        }
        if cause.downcast_ref::<config::Error>().is_some() || cause.downcast_ref::<Error>().is_some() {
            return EXIT_FAILURE;
        }
    }
    EXIT_FAILURE
}

fn not_found(err: &anyhow::Error) -> Option<&database::Error> {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<database::Error>())
        .find(|e| matches!(e, database::Error::NotFound(_)))
}
