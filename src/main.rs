//! Entry point for the command-line front end.

use std::process::ExitCode;

use clap::Parser;
use i18n_flatten::cli::{
    Arguments,
    run,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Arguments::parse();
    let mut stdout = std::io::stdout().lock();

    match run(args, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
