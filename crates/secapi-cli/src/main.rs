// SPDX-License-Identifier: Apache-2.0

//! secapi - thin CLI wrappers for the Snyk REST/v1 API and the Wiz GraphQL API.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;
mod provider;

use anyhow::{Context, Result};
use clap::Parser;
use secapi_core::{Dispatcher, config};
use tracing::debug;

use crate::cli::{Cli, OutputContext};
use crate::commands::CommandContext;
use crate::provider::EnvCredentials;

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Ok(path) = dotenv {
        debug!("Loaded environment from {}", path.display());
    }

    let output_ctx = OutputContext::from_cli(cli.output, cli.quiet);

    let result = run(cli, output_ctx).await;

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            let formatted = errors::format_error(&e);
            eprintln!("Error: {formatted}");
            Err(e)
        }
    }
}

async fn run(cli: Cli, output_ctx: OutputContext) -> Result<()> {
    let config = config::load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    let credentials = EnvCredentials::from_env();
    let dispatcher = Dispatcher::new(config.http.timeout())?;

    let ctx = CommandContext {
        output: output_ctx,
        config: &config,
        dispatcher,
        credentials: &credentials,
    };
    commands::run(cli.command, ctx).await
}
