// SPDX-License-Identifier: Apache-2.0

//! Command handlers for secapi CLI.

pub mod completion;
pub mod snyk;
pub mod wiz;

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use secapi_core::{ApiResponse, AppConfig, Dispatcher};

use crate::cli::{Commands, OutputContext};
use crate::output;
use crate::provider::EnvCredentials;

/// Everything a command needs besides its own arguments.
pub struct CommandContext<'a> {
    /// Output settings
    pub output: OutputContext,
    /// Loaded configuration
    pub config: &'a AppConfig,
    /// Shared HTTP dispatcher
    pub dispatcher: Dispatcher,
    /// Credentials captured at startup
    pub credentials: &'a EnvCredentials,
}

/// Creates a styled spinner (only if interactive).
fn maybe_spinner(ctx: &OutputContext, message: &str) -> Option<ProgressBar> {
    if !ctx.is_interactive() {
        return None;
    }
    let s = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        s.set_style(style);
    }
    s.set_message(message.to_string());
    s.enable_steady_tick(Duration::from_millis(100));
    Some(s)
}

/// Renders a response, then fails if its status is not 2xx.
fn finish(response: ApiResponse, service: &str, ctx: &OutputContext) -> Result<()> {
    output::render_response(&response, ctx)?;
    response.error_for_status(service)?;
    Ok(())
}

/// Dispatch to the appropriate command handler.
pub async fn run(command: Commands, ctx: CommandContext<'_>) -> Result<()> {
    match command {
        Commands::Snyk(cmd) => snyk::run(cmd, &ctx).await,
        Commands::Wiz(cmd) => wiz::run(cmd, &ctx).await,
        Commands::Completion { shell } => completion::run_generate(shell),
    }
}
