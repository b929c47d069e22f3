//! depconflict - installed package conflict checker CLI tool
//!
//! Reads the metadata of every installed distribution, checks each declared
//! requirement against the version actually installed, and reports the
//! requirements that are not satisfied.

use clap::Parser;
use depconflict::cli::CliArgs;
use depconflict::orchestrator::{Orchestrator, EXIT_ERROR};
use depconflict::output::{create_formatter, OutputConfig};
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// `--debug` forces debug level, otherwise `RUST_LOG` applies, defaulting
/// to warnings only. Logs go to stderr so stdout stays parseable.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("depconflict=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("depconflict=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.debug);

    tracing::debug!("depconflict starting with args: {:?}", args);

    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let orchestrator = Orchestrator::from_cli(&args)?;

    if args.verbose {
        eprintln!("depconflict v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Scheme: {}", args.scheme);
    }

    let result = orchestrator.run()?;

    let color = !args.no_color && io::stdout().is_terminal();
    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet, color);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::from(result.exit_code()))
}
