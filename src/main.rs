//! coordctl: coordinator database maintenance tool
//!
//! Reports go to stdout, logs and errors to stderr.

use clap::Parser;
use coordinator_tools::cli::{run_cli, Args, EXIT_FAILURE, EXIT_SUCCESS};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version also arrive here
            let _ = e.print();
            let code = if e.use_stderr() { EXIT_FAILURE } else { EXIT_SUCCESS };
            std::process::exit(code);
        }
    };

    init_logging(args.verbose);

    let exit_code = run_cli(args);
    std::process::exit(exit_code);
}

/// `RUST_LOG` wins; otherwise warn, `-v` info, `-vv` debug
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("coordinator_tools={level},coordctl={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
