//! opsync - mirror plaintext secrets into 1Password and keep only references.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use opsync::cli::output;
use opsync::cli::{execute, Cli};
use opsync::core::constants;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("opsync=debug")
        } else {
            EnvFilter::new("opsync=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli) {
        output::error(&e.to_string());
        if let Some(hint) = e.hint() {
            output::hint(hint);
        }
        std::process::exit(e.exit_code());
    }
}
