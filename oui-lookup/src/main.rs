//! Vendor lookup binary.
//!
//! Loads the vendor assignment table once, then resolves addresses, looks up vendors,
//! prints bucket statistics or verifies the index, depending on the subcommand.

use std::process::ExitCode;

use clap::Parser;
use oui_config::Environment;
use oui_config::shared::LookupConfig;
use oui_telemetry::metrics::init_metrics;
use oui_telemetry::tracing::init_tracing;
use tracing::error;

use crate::cli::{Args, Commands};
use crate::config::load_lookup_config;
use crate::core::run_command;
use crate::error::{LookupError, LookupResult};

mod cli;
mod config;
mod core;
mod error;

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprint!("{}", err.render_report());
            ExitCode::FAILURE
        }
    }
}

/// Initializes logging and configuration, then runs the command on a multi-threaded runtime.
fn run(args: Args) -> LookupResult<ExitCode> {
    let environment = Environment::from(args.log_target);

    let _log_flusher =
        init_tracing(env!("CARGO_BIN_NAME"), environment).map_err(LookupError::config)?;

    let config = load_lookup_config(args.vendor_file, environment)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async_main(config, args.command))
}

async fn async_main(config: LookupConfig, command: Commands) -> LookupResult<ExitCode> {
    if let Some(metrics) = &config.metrics {
        init_metrics(metrics.port).map_err(LookupError::config)?;
    }

    let result = run_command(config, command).await;
    if let Err(err) = &result {
        error!("{err}");
    }

    result
}
