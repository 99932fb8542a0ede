//! Terminal host for the CRUD client core.
//!
//! Parses configuration, installs logging, executes requests with ureq and
//! prints the resulting local view. Failures are reported on stderr and
//! turn into a non-zero exit code.

mod commands;
mod config;
mod transport;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crud_core::ResourceClient;
use tracing_subscriber::EnvFilter;

use crate::config::Cli;
use crate::transport::UreqTransport;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let timeout = (cli.timeout_secs > 0).then(|| Duration::from_secs(cli.timeout_secs));
    let transport = UreqTransport::new(timeout);
    let client = ResourceClient::new(&cli.base_url);
    tracing::debug!(base_url = %cli.base_url, ?timeout, "starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match commands::run(cli.command, &client, &transport, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
