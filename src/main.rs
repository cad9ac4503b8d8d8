use ripple::cli::{Args, Command};
use ripple::error::{ErrorSeverity, RippleError};
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let args = Args::parse_args();

    init_tracing(args.global.verbose, args.global.quiet);

    let command = Command::from_args(args);
    let exit_code = run_command(command);

    process::exit(exit_code);
}

/// Install the global subscriber; `RUST_LOG` wins over the verbosity flags
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "ripple=debug"
    } else if quiet {
        "ripple=error"
    } else {
        "ripple=warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

/// Run the command and map failures to an exit code
fn run_command(command: Command) -> i32 {
    match command.execute() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("\nError: {}", err.user_message());

            if let Some(suggestion) = suggestion(&err) {
                eprintln!("Suggestion: {}", suggestion);
            }

            let exit_code = match err.severity() {
                ErrorSeverity::Warning => 0,
                ErrorSeverity::Error => 1,
                ErrorSeverity::Critical => 2,
            };

            if exit_code > 0 {
                eprintln!("\nExiting with code {} due to {}", exit_code, err.severity());
            }

            exit_code
        }
    }
}

fn suggestion(err: &RippleError) -> Option<&'static str> {
    match err {
        RippleError::InvalidPath { .. } => Some("Check that the path exists and is a directory, or pass --path"),
        RippleError::ConfigNotFound { .. } => {
            Some("Run `ripple init` to create .ripple.toml, or point --config at an existing file")
        }
        RippleError::PermissionDenied { .. } => Some("Check the file permissions"),
        RippleError::NotFound { .. } => {
            Some("Pass the path as it appears under the scan root, e.g. src/utils/date.ts")
        }
        RippleError::PlanStep { .. } => Some("Re-run with --rollback-on-failure to restore the original state"),
        _ => None,
    }
}
