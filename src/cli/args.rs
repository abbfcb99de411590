//! CLI argument parsing
//!
//! ```text
//! coordctl [--db <path>] [--config <path>] [--json] [-v...] <command>
//! ```
//!
//! Per-command flags left out fall back to coordctl.toml, then to built-in
//! defaults.

use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "coordctl",
    about = "Inspect, seed and reset the dispatch coordinator database",
    version,
    propagate_version = true
)]
pub struct Args {
    /// Database file (overrides $COORDINATOR_DB and the config file)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Config file (default: ./coordctl.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print every DC_Batch row
    DumpBatches,

    /// Print WIPs, actl records, batch summary and per-tool counts
    Overview,

    /// Show one batch's member lots and processed flags
    BatchStatus {
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        batch_id: Option<String>,
    },

    /// Clear IsProcessed on every batch row except one tool's
    ResetProcessed {
        /// Tool whose rows keep their flag
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        keep: Option<String>,
    },

    /// Insert the fixed WIP / actl / carrier-step test scenario
    Seed,

    /// Insert actl records for every lot batched onto a tool
    AddActl {
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        equipment: Option<String>,

        /// Track-in offset before now, in hours
        #[arg(long, value_parser = clap::value_parser!(i64).range(0..))]
        hours_ago: Option<i64>,

        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        lot_type: Option<String>,
    },

    /// Report rows that break the batch/actl invariants
    Check,

    /// Create the coordinator tables in a new or existing file
    Init {
        /// Also insert the baseline tools and data into an empty database
        #[arg(long)]
        baseline: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(argv)
    }

    #[test]
    fn test_parse_subcommand_without_flags() {
        let args = parse(&["coordctl", "dump-batches"]).unwrap();
        assert_eq!(args.command, Command::DumpBatches);
        assert!(args.db.is_none());
        assert!(!args.json);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse(&["coordctl", "overview", "--db", "/tmp/c.db", "--json", "-vv"]).unwrap();
        assert_eq!(args.db, Some(PathBuf::from("/tmp/c.db")));
        assert!(args.json);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_add_actl_flags() {
        let args = parse(&[
            "coordctl",
            "add-actl",
            "--equipment",
            "DVETC27",
            "--hours-ago",
            "5",
        ])
        .unwrap();
        assert_eq!(
            args.command,
            Command::AddActl {
                equipment: Some("DVETC27".to_string()),
                hours_ago: Some(5),
                lot_type: None,
            }
        );
    }

    #[test]
    fn test_negative_hours_rejected() {
        assert!(parse(&["coordctl", "add-actl", "--hours-ago", "-3"]).is_err());
    }

    #[test]
    fn test_empty_keep_rejected() {
        assert!(parse(&["coordctl", "reset-processed", "--keep", ""]).is_err());
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(parse(&["coordctl"]).is_err());
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(parse(&["coordctl", "vacuum"]).is_err());
    }
}
